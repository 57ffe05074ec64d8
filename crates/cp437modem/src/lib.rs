//! Streaming CP437 decoding for ANSI terminal byte streams.
//!
//! BBS and MUD servers send text in IBM code page 437 interleaved with ANSI
//! escape sequences. This crate turns that byte stream into Unicode text a
//! modern terminal can render: ordinary bytes become their CP437 glyphs
//! (`0x03` is `♥`, `0xC9` is `╔`), while CSI, OSC and charset designation
//! sequences are passed through byte for byte. Sequences split across reads
//! are held back and completed on the next chunk, so the output does not
//! depend on how the transport fragments the stream.
//!
//! The reverse direction, [`CodepageTable::encode`], maps user input back to
//! one byte per character.
//!
//! ```rust
//! use cp437modem::{CodepageTable, Cp437Decoder, DecoderOptions};
//!
//! let table = CodepageTable::cp437();
//! let mut decoder = Cp437Decoder::new(&table, DecoderOptions::default());
//! let mut screen = decoder.feed(b"\x1b[1;31m\x03 \xc9\xcd\xbb \x1b");
//! screen.push_str(&decoder.feed(b"[0m"));
//! assert_eq!(screen, "\x1b[1;31m♥ ╔═╗ \x1b[0m");
//!
//! assert_eq!(table.encode("♥ ok"), b"\x03 ok");
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod codepage;
mod decoder;
mod display;
mod encoder;
mod error;
mod options;
mod sequence;

#[cfg(feature = "std")]
pub mod io;

#[cfg(any(test, feature = "fuzzing"))]
pub mod chunk_utils;

#[cfg(test)]
mod tests;

pub use codepage::{CodepageTable, GRAPHICAL_GLYPHS, GlyphInfo};
#[cfg(feature = "std")]
pub use decoder::{decode, decode_all};
pub use decoder::{Cp437Decoder, DecodeResult};
pub use display::{CLEAR_SCREEN, CURSOR_HOME, ensure_home_after_clear};
#[cfg(feature = "std")]
pub use encoder::encode;
pub use encoder::SUBSTITUTE;
pub use error::StreamError;
pub use options::DecoderOptions;
pub use sequence::SequenceKind;
