//! Incremental CP437 decoding.
//!
//! Two entry points share one decoding loop:
//!
//! - the functional [`CodepageTable::decode`], which takes the bytes held
//!   back by the previous call as an explicit `pending` argument and returns
//!   the new ones in [`DecodeResult`], keeping no state of its own;
//! - [`Cp437Decoder`], which owns `pending` between [`feed`] calls and
//!   applies the display fixups from [`DecoderOptions`].
//!
//! Bytes outside escape sequences go through the code page. Complete
//! sequences are copied through as Latin-1 characters, byte for byte, so the
//! terminal downstream sees exactly what the server sent.
//!
//! [`feed`]: Cp437Decoder::feed

use alloc::{borrow::Cow, string::String, vec::Vec};

use bstr::{BStr, ByteSlice};

use crate::{
    CodepageTable, DecoderOptions, StreamError, ensure_home_after_clear,
    sequence::{ESC, Scan, SequenceMatcher},
};

/// Text decoded from one chunk, plus the bytes held back for the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeResult {
    /// Decoded text, in arrival order.
    pub text: String,
    /// Prefix of an escape sequence that did not complete within the chunk.
    /// Pass it back as `pending` on the next call.
    pub pending: Vec<u8>,
}

/// Decodes as much of `window` as possible into `out` and returns how many
/// bytes were consumed. Whatever is left starts with an ESC.
fn decode_window(
    table: &CodepageTable,
    matcher: &mut SequenceMatcher,
    window: &[u8],
    out: &mut String,
) -> usize {
    let mut pos = 0;
    while pos < window.len() {
        let rest = &window[pos..];
        let Some(esc) = rest.find_byte(ESC) else {
            out.extend(rest.iter().map(|&b| table.decode_byte(b)));
            return window.len();
        };
        out.extend(rest[..esc].iter().map(|&b| table.decode_byte(b)));
        pos += esc;

        match matcher.scan(&window[pos..]) {
            Scan::Complete { len, .. } => {
                out.extend(window[pos..pos + len].iter().map(|&b| char::from(b)));
                pos += len;
            }
            Scan::Literal => {
                out.push(table.decode_byte(ESC));
                pos += 1;
            }
            Scan::Incomplete { .. } => return pos,
        }
    }
    pos
}

impl CodepageTable {
    /// Decodes `chunk`, continuing from the `pending` bytes a previous call
    /// returned.
    ///
    /// ```rust
    /// use cp437modem::CodepageTable;
    ///
    /// let table = CodepageTable::cp437();
    /// let first = table.decode(b"\x01\x1b[", b"");
    /// assert_eq!(first.text, "☺");
    /// assert_eq!(first.pending, b"\x1b[");
    ///
    /// let second = table.decode(b"31mRed", &first.pending);
    /// assert_eq!(second.text, "\x1b[31mRed");
    /// assert!(second.pending.is_empty());
    /// ```
    #[must_use]
    pub fn decode(&self, chunk: &[u8], pending: &[u8]) -> DecodeResult {
        self.decode_with(chunk, pending, &DecoderOptions::default())
    }

    /// [`decode`](Self::decode) with explicit scan limits.
    ///
    /// `options.home_after_clear` is ignored here; apply
    /// [`ensure_home_after_clear`] to the text if needed.
    #[must_use]
    pub fn decode_with(
        &self,
        chunk: &[u8],
        pending: &[u8],
        options: &DecoderOptions,
    ) -> DecodeResult {
        let window: Cow<'_, [u8]> = if pending.is_empty() {
            Cow::Borrowed(chunk)
        } else {
            let mut joined = Vec::with_capacity(pending.len() + chunk.len());
            joined.extend_from_slice(pending);
            joined.extend_from_slice(chunk);
            Cow::Owned(joined)
        };

        let mut text = String::with_capacity(window.len());
        let mut matcher = SequenceMatcher::new(options);
        let consumed = decode_window(self, &mut matcher, &window, &mut text);

        DecodeResult {
            text,
            pending: window[consumed..].to_vec(),
        }
    }

    /// Decodes a complete buffer. A trailing incomplete sequence is dropped.
    #[must_use]
    pub fn decode_all(&self, bytes: &[u8]) -> String {
        let DecodeResult { text, pending } = self.decode(bytes, &[]);
        if !pending.is_empty() {
            tracing::debug!(
                pending = ?BStr::new(&pending),
                "dropping incomplete escape sequence at end of input"
            );
        }
        text
    }
}

/// Decodes `chunk` with the shared table. See [`CodepageTable::decode`].
#[cfg(feature = "std")]
#[must_use]
pub fn decode(chunk: &[u8], pending: &[u8]) -> DecodeResult {
    CodepageTable::shared().decode(chunk, pending)
}

/// Decodes a complete buffer with the shared table. See
/// [`CodepageTable::decode_all`].
#[cfg(feature = "std")]
#[must_use]
pub fn decode_all(bytes: &[u8]) -> String {
    CodepageTable::shared().decode_all(bytes)
}

/// Streaming decoder that carries incomplete sequences between chunks.
///
/// ```rust
/// use cp437modem::{CodepageTable, Cp437Decoder, DecoderOptions};
///
/// let table = CodepageTable::cp437();
/// let mut decoder = Cp437Decoder::new(&table, DecoderOptions::default());
/// let mut screen = String::new();
/// for chunk in [&b"\x1b[1;3"[..], b"3m\x03 ", b"hi\x1b", b"[0m"] {
///     screen.push_str(&decoder.feed(chunk));
/// }
/// assert_eq!(screen, "\x1b[1;33m♥ hi\x1b[0m");
/// assert!(decoder.finish().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Cp437Decoder<'t> {
    table: &'t CodepageTable,
    options: DecoderOptions,
    pending: Vec<u8>,
}

impl<'t> Cp437Decoder<'t> {
    /// Create a decoder over `table`.
    #[must_use]
    pub fn new(table: &'t CodepageTable, options: DecoderOptions) -> Self {
        Self {
            table,
            options,
            pending: Vec::new(),
        }
    }

    /// The options this decoder was built with.
    #[must_use]
    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Bytes held back from previous chunks.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Decode the next chunk of the stream.
    pub fn feed(&mut self, chunk: &[u8]) -> String {
        let mut matcher = SequenceMatcher::new(&self.options);
        let mut text = String::with_capacity(self.pending.len() + chunk.len());

        if self.pending.is_empty() {
            let consumed = decode_window(self.table, &mut matcher, chunk, &mut text);
            self.pending.extend_from_slice(&chunk[consumed..]);
        } else {
            self.pending.extend_from_slice(chunk);
            let consumed = decode_window(self.table, &mut matcher, &self.pending, &mut text);
            self.pending.drain(..consumed);
        }
        debug_assert!(self.pending.len() <= self.options.max_pending());

        if self.options.home_after_clear {
            if let Cow::Owned(patched) = ensure_home_after_clear(&text) {
                return patched;
            }
        }
        text
    }

    /// Discards and returns the bytes held back so far.
    pub fn take_pending(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.pending)
    }

    /// Ends the stream.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::UnterminatedSequence`] if an escape sequence
    /// was still open. Its bytes are dropped either way; the error is a
    /// diagnostic and callers may ignore it.
    pub fn finish(self) -> Result<(), StreamError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let kind = match SequenceMatcher::new(&self.options).scan(&self.pending) {
            Scan::Incomplete { kind } => kind,
            Scan::Complete { .. } | Scan::Literal => None,
        };
        tracing::debug!(
            pending = ?BStr::new(&self.pending),
            "stream ended inside an escape sequence"
        );
        Err(StreamError::UnterminatedSequence {
            kind,
            len: self.pending.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, vec, vec::Vec};

    use super::*;
    use crate::SequenceKind;

    fn decode(bytes: &[u8]) -> DecodeResult {
        CodepageTable::cp437().decode(bytes, &[])
    }

    #[test]
    fn low_range_glyphs() {
        let result = decode(&[0x01, 0x02, 0x03]);
        assert_eq!(result.text, "☺☻♥");
        assert!(result.pending.is_empty());
    }

    #[test]
    fn ascii_and_line_endings_pass_through() {
        assert_eq!(decode(b"text\r\nmore\tcol\x08").text, "text\r\nmore\tcol\x08");
    }

    #[test]
    fn split_csi_is_reassembled() {
        let table = CodepageTable::cp437();
        let first = table.decode(b"\x1b[", &[]);
        assert_eq!(first.text, "");
        assert_eq!(first.pending, b"\x1b[");
        let second = table.decode(b"31mRed", &first.pending);
        assert_eq!(second.text, "\x1b[31mRed");
        assert!(second.pending.is_empty());
        assert_eq!(decode(b"\x1b[31mRed").text, "\x1b[31mRed");
    }

    #[test]
    fn sequences_are_latin1_passthrough() {
        // High bytes inside a sequence are not translated; 0xE9 stays 'é'
        // instead of becoming 'Θ', and only the trailing 0x82 goes through
        // the code page.
        let result = decode(b"\x1b]0;caf\xe9\x07\x82");
        assert_eq!(result.text, "\x1b]0;caf\u{e9}\x07\u{e9}");
    }

    #[test]
    fn charset_designations_pass_through() {
        let result = decode(b"\x1b(0lqqk\x1b(B");
        assert_eq!(result.text, "\x1b(0lqqk\x1b(B");
        assert!(result.pending.is_empty());
    }

    #[test]
    fn rejected_charset_resumes_after_esc() {
        assert_eq!(decode(b"\x1b(Zx").text, "↔(Zx");
    }

    #[test]
    fn unrecognized_escape_is_a_glyph() {
        assert_eq!(decode(b"\x1b7saved\x1b8").text, "↔7saved↔8");
    }

    #[test]
    fn lone_trailing_esc_is_pending() {
        let result = decode(b"abc\x1b");
        assert_eq!(result.text, "abc");
        assert_eq!(result.pending, b"\x1b");
    }

    #[test]
    fn charset_introducer_without_designator_is_pending() {
        let result = decode(b"x\x1b)");
        assert_eq!(result.text, "x");
        assert_eq!(result.pending, b"\x1b)");
    }

    #[test]
    fn overlong_csi_resumes_after_esc() {
        let mut bytes = Vec::from(&b"\x1b["[..]);
        bytes.extend(core::iter::repeat_n(b'0', 150));
        let result = decode(&bytes);

        let expected = format!("↔[{}", "0".repeat(150));
        assert_eq!(result.text, expected);
        assert!(result.pending.is_empty());
    }

    #[test]
    fn overlong_csi_can_hide_a_real_sequence() {
        // The byte after the abandoned ESC may start a new sequence.
        let mut bytes = Vec::from(&b"\x1b"[..]);
        bytes.extend_from_slice(b"\x1b[");
        bytes.extend(core::iter::repeat_n(b';', 120));
        let result = decode(&bytes);
        assert!(result.text.starts_with("↔↔["));
        assert!(result.pending.is_empty());
    }

    #[test]
    fn pending_grows_until_the_limit() {
        let table = CodepageTable::cp437();
        let mut pending = vec![];
        let mut text = String::new();
        for chunk in [&b"\x1b]0;"[..], &[b'x'; 100], &[b'x'; 95]] {
            let result = table.decode(chunk, &pending);
            text.push_str(&result.text);
            pending = result.pending;
        }
        assert_eq!(text, "");
        assert_eq!(pending.len(), 199);

        let result = table.decode(b"x", &pending);
        assert!(result.text.starts_with("↔]0;"));
        assert_eq!(result.text.chars().count(), 200);
        assert!(result.pending.is_empty());
    }

    #[test]
    fn streaming_decoder_carries_pending() {
        let table = CodepageTable::cp437();
        let mut decoder = Cp437Decoder::new(&table, DecoderOptions::default());
        assert_eq!(decoder.feed(b"\x03\x1b]0;ti"), "♥");
        assert_eq!(decoder.pending(), b"\x1b]0;ti");
        assert_eq!(decoder.feed(b"tle\x1b"), "");
        assert_eq!(decoder.feed(b"\\ok"), "\x1b]0;title\x1b\\ok");
        assert!(decoder.pending().is_empty());
        assert!(decoder.finish().is_ok());
    }

    #[test]
    fn streaming_decoder_homes_after_clear() {
        let table = CodepageTable::cp437();
        let mut decoder = Cp437Decoder::new(&table, DecoderOptions::default());
        assert_eq!(decoder.feed(b"\x1b[2J"), "\x1b[2J\x1b[H");
        assert_eq!(decoder.feed(b"\x1b[2J\x1b[H"), "\x1b[2J\x1b[H");
    }

    #[test]
    fn finish_reports_unterminated_sequence() {
        let table = CodepageTable::cp437();
        let mut decoder = Cp437Decoder::new(&table, DecoderOptions::default());
        assert_eq!(decoder.feed(b"done\x1b[12;"), "done");
        match decoder.finish() {
            Err(StreamError::UnterminatedSequence { kind, len }) => {
                assert_eq!(kind, Some(SequenceKind::Csi));
                assert_eq!(len, 5);
            }
            other => panic!("expected unterminated sequence, got {other:?}"),
        }
    }

    #[test]
    fn take_pending_empties_the_decoder() {
        let table = CodepageTable::cp437();
        let mut decoder = Cp437Decoder::new(&table, DecoderOptions::default());
        let _ = decoder.feed(b"\x1b");
        assert_eq!(decoder.take_pending(), b"\x1b");
        assert!(decoder.finish().is_ok());
    }

    #[test]
    fn decode_all_drops_the_tail() {
        let table = CodepageTable::cp437();
        assert_eq!(table.decode_all(b"\x01 bye\x1b[3"), "☺ bye");
    }
}
