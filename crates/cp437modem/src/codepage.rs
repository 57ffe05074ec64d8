//! The CP437 byte <-> glyph table.
//!
//! The forward direction is total: every byte has exactly one glyph. The
//! upper half (0x80-0xFF) is the standard IBM assignment, the lower half is
//! ASCII except for the control bytes listed in [`GRAPHICAL_GLYPHS`], which
//! render as the symbols BBS art expects (smileys, card suits, arrows...).
//! BS, TAB, LF and CR are left alone so line discipline keeps working.
//!
//! The reverse direction is partial and first-writer-wins: `⌠` and `⌡`
//! appear both at 0x1E/0x1F and at 0xF4/0xF5, and encode to the low bytes.

use alloc::collections::BTreeMap;

/// One entry of the low-range glyph overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphInfo {
    /// Byte value on the wire.
    pub byte: u8,
    /// Glyph the byte is rendered as.
    pub glyph: char,
    /// Human readable name, for reference listings.
    pub name: &'static str,
}

const fn glyph(byte: u8, glyph: char, name: &'static str) -> GlyphInfo {
    GlyphInfo { byte, glyph, name }
}

/// Control bytes that render as a CP437 symbol instead of their C0 meaning.
pub const GRAPHICAL_GLYPHS: [GlyphInfo; 28] = [
    glyph(0x01, '\u{263A}', "Smiley Face"),
    glyph(0x02, '\u{263B}', "Reverse Smiley"),
    glyph(0x03, '\u{2665}', "Heart"),
    glyph(0x04, '\u{2666}', "Diamond"),
    glyph(0x05, '\u{2663}', "Club"),
    glyph(0x06, '\u{2660}', "Spade"),
    glyph(0x07, '\u{2022}', "Bullet"),
    glyph(0x0B, '\u{2642}', "Male Symbol"),
    glyph(0x0C, '\u{2640}', "Female Symbol"),
    glyph(0x0E, '\u{25BA}', "Right Triangle"),
    glyph(0x0F, '\u{25C4}', "Left Triangle"),
    glyph(0x10, '\u{2195}', "Up/Down Arrows"),
    glyph(0x11, '\u{203C}', "Double Exclamation"),
    glyph(0x12, '\u{00B6}', "Pilcrow"),
    glyph(0x13, '\u{00A7}', "Section Sign"),
    glyph(0x14, '\u{25AC}', "Horizontal Bar"),
    glyph(0x15, '\u{21A8}', "Up/Down Arrow With Base"),
    glyph(0x16, '\u{2191}', "Up Arrow"),
    glyph(0x17, '\u{2193}', "Down Arrow"),
    glyph(0x18, '\u{2192}', "Right Arrow"),
    glyph(0x19, '\u{2190}', "Left Arrow"),
    glyph(0x1A, '\u{221F}', "Right Angle"),
    glyph(0x1B, '\u{2194}', "Left/Right Arrow"),
    glyph(0x1C, '\u{25B2}', "Up Triangle"),
    glyph(0x1D, '\u{25BC}', "Down Triangle"),
    glyph(0x1E, '\u{2320}', "Top Half Integral"),
    glyph(0x1F, '\u{2321}', "Bottom Half Integral"),
    glyph(0x7F, '\u{2302}', "House"),
];

/// Standard CP437 assignment for 0x80-0xFF.
#[rustfmt::skip]
const UPPER_HALF: [char; 128] = [
    // 0x80
    '\u{C7}', '\u{FC}', '\u{E9}', '\u{E2}', '\u{E4}', '\u{E0}', '\u{E5}', '\u{E7}',
    '\u{EA}', '\u{EB}', '\u{E8}', '\u{EF}', '\u{EE}', '\u{EC}', '\u{C4}', '\u{C5}',
    // 0x90
    '\u{C9}', '\u{E6}', '\u{C6}', '\u{F4}', '\u{F6}', '\u{F2}', '\u{FB}', '\u{F9}',
    '\u{FF}', '\u{D6}', '\u{DC}', '\u{A2}', '\u{A3}', '\u{A5}', '\u{20A7}', '\u{192}',
    // 0xA0
    '\u{E1}', '\u{ED}', '\u{F3}', '\u{FA}', '\u{F1}', '\u{D1}', '\u{AA}', '\u{BA}',
    '\u{BF}', '\u{2310}', '\u{AC}', '\u{BD}', '\u{BC}', '\u{A1}', '\u{AB}', '\u{BB}',
    // 0xB0
    '\u{2591}', '\u{2592}', '\u{2593}', '\u{2502}', '\u{2524}', '\u{2561}', '\u{2562}', '\u{2556}',
    '\u{2555}', '\u{2563}', '\u{2551}', '\u{2557}', '\u{255D}', '\u{255C}', '\u{255B}', '\u{2510}',
    // 0xC0
    '\u{2514}', '\u{2534}', '\u{252C}', '\u{251C}', '\u{2500}', '\u{253C}', '\u{255E}', '\u{255F}',
    '\u{255A}', '\u{2554}', '\u{2569}', '\u{2566}', '\u{2560}', '\u{2550}', '\u{256C}', '\u{2567}',
    // 0xD0
    '\u{2568}', '\u{2564}', '\u{2565}', '\u{2559}', '\u{2558}', '\u{2552}', '\u{2553}', '\u{256B}',
    '\u{256A}', '\u{2518}', '\u{250C}', '\u{2588}', '\u{2584}', '\u{258C}', '\u{2590}', '\u{2580}',
    // 0xE0
    '\u{3B1}', '\u{DF}', '\u{393}', '\u{3C0}', '\u{3A3}', '\u{3C3}', '\u{B5}', '\u{3C4}',
    '\u{3A6}', '\u{398}', '\u{3A9}', '\u{3B4}', '\u{221E}', '\u{3C6}', '\u{3B5}', '\u{2229}',
    // 0xF0
    '\u{2261}', '\u{B1}', '\u{2265}', '\u{2264}', '\u{2320}', '\u{2321}', '\u{F7}', '\u{2248}',
    '\u{B0}', '\u{2219}', '\u{B7}', '\u{221A}', '\u{207F}', '\u{B2}', '\u{25A0}', '\u{A0}',
];

const fn build_forward() -> [char; 256] {
    let mut table = ['\0'; 256];
    let mut byte: u8 = 0;
    while byte < 0x80 {
        table[byte as usize] = byte as char;
        byte += 1;
    }
    let mut idx = 0;
    while idx < UPPER_HALF.len() {
        table[0x80 + idx] = UPPER_HALF[idx];
        idx += 1;
    }
    let mut idx = 0;
    while idx < GRAPHICAL_GLYPHS.len() {
        let entry = GRAPHICAL_GLYPHS[idx];
        table[entry.byte as usize] = entry.glyph;
        idx += 1;
    }
    table
}

const FORWARD: [char; 256] = build_forward();

/// Immutable CP437 byte <-> Unicode mapping.
///
/// Build one with [`CodepageTable::cp437`] and hand out references, or use
/// the process-wide [`CodepageTable::shared`] instance.
///
/// ```rust
/// use cp437modem::CodepageTable;
///
/// let table = CodepageTable::cp437();
/// assert_eq!(table.decode_byte(0x03), '♥');
/// assert_eq!(table.encode_char('♥'), Some(0x03));
/// assert_eq!(table.encode_char('\u{1F600}'), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodepageTable {
    forward: [char; 256],
    reverse: BTreeMap<char, u8>,
}

impl CodepageTable {
    /// Builds the graphical CP437 table.
    #[must_use]
    pub fn cp437() -> Self {
        let mut reverse = BTreeMap::new();
        for (byte, ch) in (0..=u8::MAX).zip(FORWARD) {
            reverse.entry(ch).or_insert(byte);
        }
        Self {
            forward: FORWARD,
            reverse,
        }
    }

    /// A lazily built table shared by the whole process.
    #[cfg(feature = "std")]
    #[must_use]
    pub fn shared() -> &'static Self {
        static SHARED: std::sync::LazyLock<CodepageTable> =
            std::sync::LazyLock::new(CodepageTable::cp437);
        &SHARED
    }

    /// Glyph for `byte`. Never fails.
    #[inline]
    #[must_use]
    pub fn decode_byte(&self, byte: u8) -> char {
        self.forward[usize::from(byte)]
    }

    /// Byte for `ch`, if the code page has one.
    #[inline]
    #[must_use]
    pub fn encode_char(&self, ch: char) -> Option<u8> {
        self.reverse.get(&ch).copied()
    }

    /// All 256 `(byte, glyph)` pairs in byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, char)> + '_ {
        (0..=u8::MAX).zip(self.forward.iter().copied())
    }

    /// The low-range overrides, for reference listings.
    #[must_use]
    pub fn graphical_glyphs(&self) -> &'static [GlyphInfo] {
        &GRAPHICAL_GLYPHS
    }
}

impl Default for CodepageTable {
    fn default() -> Self {
        Self::cp437()
    }
}
