//! Unicode -> CP437 for outbound data.

use alloc::vec::Vec;

use crate::CodepageTable;

/// Byte sent for characters the code page cannot represent.
pub const SUBSTITUTE: u8 = b'?';

impl CodepageTable {
    /// Encodes one character: the code page byte if there is one, else its
    /// Latin-1 value, else [`SUBSTITUTE`].
    #[must_use]
    pub fn encode_char_lossy(&self, ch: char) -> u8 {
        if let Some(byte) = self.encode_char(ch) {
            return byte;
        }
        u8::try_from(ch).unwrap_or_else(|_| {
            tracing::trace!(?ch, "no CP437 or Latin-1 byte for character");
            SUBSTITUTE
        })
    }

    /// Encodes `text`, one byte per character. Never fails.
    ///
    /// Escape sequences are written as plain text (`"\x1b[A"`) and come out
    /// byte for byte, since ESC and the ASCII range have Latin-1 values.
    ///
    /// ```rust
    /// use cp437modem::CodepageTable;
    ///
    /// let table = CodepageTable::cp437();
    /// assert_eq!(table.encode("Hi ☺"), b"Hi \x01");
    /// assert_eq!(table.encode("\x1b[A"), b"\x1b[A");
    /// assert_eq!(table.encode("日本"), b"??");
    /// ```
    #[must_use]
    pub fn encode(&self, text: &str) -> Vec<u8> {
        let mut out = Vec::with_capacity(text.len());
        self.encode_into(text, &mut out);
        out
    }

    /// Appends the encoding of `text` to `out`.
    pub fn encode_into(&self, text: &str, out: &mut Vec<u8>) {
        out.extend(text.chars().map(|ch| self.encode_char_lossy(ch)));
    }
}

/// Encodes `text` with the shared table. See [`CodepageTable::encode`].
#[cfg(feature = "std")]
#[must_use]
pub fn encode(text: &str) -> Vec<u8> {
    CodepageTable::shared().encode(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_round_trip() {
        let table = CodepageTable::cp437();
        let encoded = table.encode("Test☺♥♦");
        assert_eq!(encoded, b"Test\x01\x03\x04");
        assert_eq!(table.decode_all(&encoded), "Test☺♥♦");
    }

    #[test]
    fn box_drawing_uses_the_upper_half() {
        let table = CodepageTable::cp437();
        assert_eq!(table.encode("╔═╗"), [0xC9, 0xCD, 0xBB]);
    }

    #[test]
    fn latin1_fallback_for_unmapped_low_codepoints() {
        let table = CodepageTable::cp437();
        // BEL and ESC were displaced by glyphs in the table.
        assert_eq!(table.encode("\x07\x1b"), [0x07, 0x1B]);
        // '¤' (U+00A4) has no CP437 byte but fits in Latin-1.
        assert_eq!(table.encode("\u{a4}"), [0xA4]);
    }

    #[test]
    fn one_byte_per_char_with_substitution() {
        let table = CodepageTable::cp437();
        let text = "Hello\u{fffd}World😀";
        let encoded = table.encode(text);
        assert_eq!(encoded.len(), text.chars().count());
        assert_eq!(encoded, b"Hello?World?");
    }

    #[test]
    fn encode_into_appends() {
        let table = CodepageTable::cp437();
        let mut out = Vec::from(&b"> "[..]);
        table.encode_into("ß", &mut out);
        assert_eq!(out, b"> \xe1");
    }
}
