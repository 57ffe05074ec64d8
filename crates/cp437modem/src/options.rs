/// Configuration options for [`Cp437Decoder`](crate::Cp437Decoder) and the
/// functional [`CodepageTable::decode_with`](crate::CodepageTable::decode_with).
///
/// # Examples
///
/// ```rust
/// use cp437modem::{CodepageTable, Cp437Decoder, DecoderOptions};
///
/// let table = CodepageTable::cp437();
/// let options = DecoderOptions {
///     home_after_clear: false,
///     ..Default::default()
/// };
/// let mut decoder = Cp437Decoder::new(&table, options);
/// assert_eq!(decoder.feed(b"\x1b[2J"), "\x1b[2J");
/// ```
///
/// # Default
///
/// Scan limits of 100 (CSI) and 200 (OSC) bytes; the clear-screen fixup is
/// enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecoderOptions {
    /// How many bytes, counted from the ESC, a CSI sequence (`ESC [`) may
    /// span before it is treated as malformed.
    ///
    /// The final byte must sit at an offset below this limit. When the limit
    /// is reached without a final byte, the ESC is decoded as the `↔` glyph
    /// and scanning resumes at the byte after it.
    ///
    /// # Default
    ///
    /// `100`
    pub csi_scan_limit: usize,

    /// How many bytes, counted from the ESC, an OSC sequence (`ESC ]`) may
    /// span before it is treated as malformed.
    ///
    /// The terminator is either `BEL` or `ESC \`; a BEL, or the ESC of an
    /// `ESC \` pair, must sit at an offset below this limit.
    ///
    /// # Default
    ///
    /// `200`
    pub osc_scan_limit: usize,

    /// Whether [`Cp437Decoder::feed`](crate::Cp437Decoder::feed) patches a
    /// clear-screen that is not followed by a cursor-home.
    ///
    /// See [`ensure_home_after_clear`](crate::ensure_home_after_clear). The
    /// functional decode API never applies it.
    ///
    /// # Default
    ///
    /// `true`
    pub home_after_clear: bool,
}

impl DecoderOptions {
    /// Default CSI scan limit.
    pub const CSI_SCAN_LIMIT: usize = 100;
    /// Default OSC scan limit.
    pub const OSC_SCAN_LIMIT: usize = 200;

    /// Longest prefix that can be held back as pending with these limits.
    #[must_use]
    pub fn max_pending(&self) -> usize {
        // An introducer (`ESC [`, `ESC ]`, `ESC (`...) is held back whatever
        // the limits are.
        self.csi_scan_limit.max(self.osc_scan_limit).max(2)
    }
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            csi_scan_limit: Self::CSI_SCAN_LIMIT,
            osc_scan_limit: Self::OSC_SCAN_LIMIT,
            home_after_clear: true,
        }
    }
}
