use thiserror::Error;

use crate::SequenceKind;

/// Diagnostics raised at the end of a stream.
///
/// Decoding itself never fails; this only reports what was lost.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// The stream ended while an escape sequence was still open. The held
    /// back bytes were dropped.
    #[error("stream ended inside an unterminated escape sequence ({len} bytes dropped)")]
    UnterminatedSequence {
        /// Family of the open sequence, if the introducer had arrived.
        kind: Option<SequenceKind>,
        /// Number of bytes dropped.
        len: usize,
    },
}
