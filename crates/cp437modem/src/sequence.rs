//! Escape sequence recognizer.
//!
//! The decoder hands every byte starting at an ESC to a [`SequenceMatcher`]
//! and learns one of three things: the bytes form a complete CSI, OSC or
//! charset designation (pass them through untouched), they are not a
//! sequence we know (decode the ESC as a glyph), or the input ran out before
//! we could tell (hold the bytes back until the next chunk).
//!
//! Only sequence boundaries are recognized. Parameters, final bytes and OSC
//! payloads are never interpreted.
//!
//! | kind    | start             | terminator           | scan limit        |
//! |---------|-------------------|----------------------|-------------------|
//! | CSI     | `ESC [`           | byte in `0x40..=0x7E`| `csi_scan_limit`  |
//! | OSC     | `ESC ]`           | `BEL` or `ESC \`     | `osc_scan_limit`  |
//! | charset | `ESC` + `( ) * +` | one of `0 A B U`     | 3 bytes           |
//!
//! Scan limits are counted from the ESC byte. Exceeding one means the
//! sequence is malformed rather than incomplete.

use core::fmt;

use crate::DecoderOptions;

pub(crate) const ESC: u8 = 0x1B;
pub(crate) const BEL: u8 = 0x07;

/// Family of a recognized escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    /// Control Sequence Introducer, `ESC [`.
    Csi,
    /// Operating System Command, `ESC ]`.
    Osc,
    /// Character set designation, `ESC (`, `ESC )`, `ESC *` or `ESC +`.
    Charset,
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SequenceKind::Csi => "CSI",
            SequenceKind::Osc => "OSC",
            SequenceKind::Charset => "charset designation",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    AwaitingClassification,
    ScanningCsi,
    ScanningOsc { esc_seen: bool },
    ScanningCharset,
}

/// What happened after feeding one more byte into the matcher?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Byte accepted, the sequence is not finished yet.
    NeedMore,
    /// Byte accepted *and* it terminated the sequence.
    Done(SequenceKind),
    /// Not a sequence we recognize.
    Reject,
    /// The scan limit was reached without a terminator.
    Abandon(SequenceKind),
}

/// Outcome of scanning a window that starts at an ESC byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scan {
    /// The first `len` bytes are a complete sequence.
    Complete { len: usize, kind: SequenceKind },
    /// The ESC does not start a sequence; decode it as a glyph.
    Literal,
    /// The window ended before the sequence could be classified or
    /// terminated.
    Incomplete { kind: Option<SequenceKind> },
}

/// Byte-at-a-time recognizer for the sequences in the module table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SequenceMatcher {
    state: State,
    scanned: usize,
    csi_limit: usize,
    osc_limit: usize,
}

impl SequenceMatcher {
    pub fn new(options: &DecoderOptions) -> Self {
        Self {
            state: State::Idle,
            scanned: 0,
            csi_limit: options.csi_scan_limit,
            osc_limit: options.osc_scan_limit,
        }
    }

    /// Returns the matcher to `Idle`, forgetting any partial sequence.
    pub fn reset(&mut self) {
        self.state = State::Idle;
        self.scanned = 0;
    }

    /// The family of the sequence in flight, once the introducer was seen.
    pub fn kind(&self) -> Option<SequenceKind> {
        match self.state {
            State::Idle | State::AwaitingClassification => None,
            State::ScanningCsi => Some(SequenceKind::Csi),
            State::ScanningOsc { .. } => Some(SequenceKind::Osc),
            State::ScanningCharset => Some(SequenceKind::Charset),
        }
    }

    fn settle(&mut self, step: Step) -> Step {
        self.reset();
        step
    }

    /// Feed the next byte. The first byte of a sequence must be ESC.
    pub fn step(&mut self, byte: u8) -> Step {
        // offset of `byte` from the ESC
        let index = self.scanned;
        self.scanned += 1;

        match self.state {
            State::Idle => {
                if byte == ESC {
                    self.state = State::AwaitingClassification;
                    Step::NeedMore
                } else {
                    self.settle(Step::Reject)
                }
            }
            State::AwaitingClassification => {
                self.state = match byte {
                    b'[' => State::ScanningCsi,
                    b']' => State::ScanningOsc { esc_seen: false },
                    b'(' | b')' | b'*' | b'+' => State::ScanningCharset,
                    _ => return self.settle(Step::Reject),
                };
                Step::NeedMore
            }
            State::ScanningCsi => {
                if (0x40..=0x7E).contains(&byte) && index < self.csi_limit {
                    self.settle(Step::Done(SequenceKind::Csi))
                } else if self.scanned >= self.csi_limit {
                    self.settle(Step::Abandon(SequenceKind::Csi))
                } else {
                    Step::NeedMore
                }
            }
            State::ScanningOsc { esc_seen } => {
                let in_bounds = index < self.osc_limit;
                if esc_seen && byte == b'\\' {
                    self.settle(Step::Done(SequenceKind::Osc))
                } else if esc_seen && !in_bounds {
                    // The ESC was the last byte allowed and it did not start
                    // a string terminator.
                    self.settle(Step::Abandon(SequenceKind::Osc))
                } else if byte == BEL && in_bounds {
                    self.settle(Step::Done(SequenceKind::Osc))
                } else if byte == ESC && in_bounds {
                    self.state = State::ScanningOsc { esc_seen: true };
                    Step::NeedMore
                } else if self.scanned >= self.osc_limit {
                    self.settle(Step::Abandon(SequenceKind::Osc))
                } else {
                    self.state = State::ScanningOsc { esc_seen: false };
                    Step::NeedMore
                }
            }
            State::ScanningCharset => match byte {
                b'0' | b'A' | b'B' | b'U' => self.settle(Step::Done(SequenceKind::Charset)),
                _ => self.settle(Step::Reject),
            },
        }
    }

    /// Classify the sequence at the start of `window`, which must begin with
    /// ESC. The matcher is idle again when this returns.
    pub fn scan(&mut self, window: &[u8]) -> Scan {
        debug_assert_eq!(window.first(), Some(&ESC));
        self.reset();

        for (offset, &byte) in window.iter().enumerate() {
            match self.step(byte) {
                Step::NeedMore => {}
                Step::Done(kind) => {
                    return Scan::Complete {
                        len: offset + 1,
                        kind,
                    };
                }
                Step::Reject => {
                    tracing::trace!(
                        next = ?window.get(1),
                        "ESC does not start a recognized sequence"
                    );
                    return Scan::Literal;
                }
                Step::Abandon(kind) => {
                    tracing::debug!(%kind, scanned = offset + 1, "abandoning unterminated sequence");
                    return Scan::Literal;
                }
            }
        }

        let kind = self.kind();
        self.reset();
        Scan::Incomplete { kind }
    }
}
