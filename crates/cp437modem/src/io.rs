//! Adapters between the codec and blocking `std::io` transports.
//!
//! The transport itself (telnet negotiation, sockets, timeouts) lives with
//! the caller; these types only turn a [`Read`] into a source of decoded text
//! and a [`Write`] into a sink for text.

use std::{
    io::{self, ErrorKind, Read, Write},
    string::String,
    vec,
    vec::Vec,
};

use bstr::BStr;
use thiserror::Error;

use crate::{CodepageTable, Cp437Decoder, StreamError};

/// Failure of a transport adapter.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The underlying reader or writer failed.
    #[error("transport error: {0}")]
    Io(#[from] io::Error),
    /// The codec reported a stream diagnostic.
    #[error(transparent)]
    Stream(#[from] StreamError),
}

/// Reads chunks from `R` and yields decoded text.
///
/// Each successful read produces one piece of text (possibly empty, when the
/// whole chunk was held back). A zero-length read ends the stream; bytes
/// still held back at that point are dropped.
///
/// ```rust
/// use cp437modem::{CodepageTable, Cp437Decoder, DecoderOptions, io::DecodeReader};
///
/// let table = CodepageTable::cp437();
/// let decoder = Cp437Decoder::new(&table, DecoderOptions::default());
/// let mut reader = DecodeReader::new(&b"\x1b[32m\x03\x04\x05\x06\x1b[0m"[..], decoder);
/// let mut screen = String::new();
/// while let Some(text) = reader.next_text()? {
///     screen.push_str(&text);
/// }
/// assert_eq!(screen, "\x1b[32m♥♦♣♠\x1b[0m");
/// # Ok::<(), cp437modem::io::TransportError>(())
/// ```
#[derive(Debug)]
pub struct DecodeReader<'t, R> {
    inner: R,
    decoder: Cp437Decoder<'t>,
    buf: Vec<u8>,
    done: bool,
}

impl<'t, R: Read> DecodeReader<'t, R> {
    /// Read size used by [`new`](Self::new).
    pub const DEFAULT_CHUNK: usize = 4096;

    /// Wraps `inner`, reading up to [`DEFAULT_CHUNK`](Self::DEFAULT_CHUNK)
    /// bytes at a time.
    pub fn new(inner: R, decoder: Cp437Decoder<'t>) -> Self {
        Self::with_chunk_size(Self::DEFAULT_CHUNK, inner, decoder)
    }

    /// Wraps `inner`, reading up to `chunk_size` bytes at a time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn with_chunk_size(chunk_size: usize, inner: R, decoder: Cp437Decoder<'t>) -> Self {
        assert!(chunk_size > 0);
        Self {
            inner,
            decoder,
            buf: vec![0; chunk_size],
            done: false,
        }
    }

    /// Reads one chunk and decodes it. Returns `Ok(None)` once the reader
    /// reports end of stream.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Io`] if the reader fails. Interrupted reads
    /// are retried.
    pub fn next_text(&mut self) -> Result<Option<String>, TransportError> {
        if self.done {
            return Ok(None);
        }
        loop {
            match self.inner.read(&mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    let dropped = self.decoder.take_pending();
                    if !dropped.is_empty() {
                        tracing::debug!(
                            pending = ?BStr::new(&dropped),
                            "end of stream inside an escape sequence"
                        );
                    }
                    return Ok(None);
                }
                Ok(n) => return Ok(Some(self.decoder.feed(&self.buf[..n]))),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Reads until end of stream, reporting an unterminated trailing
    /// sequence instead of dropping it silently.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Io`] if the reader fails, or
    /// [`TransportError::Stream`] if the stream ended inside a sequence.
    pub fn read_to_end_strict(mut self) -> Result<String, TransportError> {
        let mut text = String::new();
        while !self.done {
            match self.inner.read(&mut self.buf) {
                Ok(0) => self.done = true,
                Ok(n) => text.push_str(&self.decoder.feed(&self.buf[..n])),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        self.decoder.finish()?;
        Ok(text)
    }

    /// The decoder, for inspecting held back bytes.
    pub fn decoder(&self) -> &Cp437Decoder<'t> {
        &self.decoder
    }

    /// Unwraps the reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Iterator for DecodeReader<'_, R> {
    type Item = Result<String, TransportError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_text().transpose()
    }
}

/// Encodes text and writes it to `W`.
///
/// ```rust
/// use cp437modem::{CodepageTable, io::EncodeWriter};
///
/// let mut writer = EncodeWriter::new(Vec::new(), CodepageTable::shared());
/// writer.write_text("\x1b[A♥")?;
/// assert_eq!(writer.into_inner(), b"\x1b[A\x03");
/// # Ok::<(), cp437modem::io::TransportError>(())
/// ```
#[derive(Debug)]
pub struct EncodeWriter<'t, W> {
    inner: W,
    table: &'t CodepageTable,
    scratch: Vec<u8>,
}

impl<'t, W: Write> EncodeWriter<'t, W> {
    /// Wraps `inner`.
    pub fn new(inner: W, table: &'t CodepageTable) -> Self {
        Self {
            inner,
            table,
            scratch: Vec::new(),
        }
    }

    /// Encodes `text` and writes all of it.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Io`] if the writer fails.
    pub fn write_text(&mut self, text: &str) -> Result<(), TransportError> {
        self.scratch.clear();
        self.table.encode_into(text, &mut self.scratch);
        self.inner.write_all(&self.scratch)?;
        Ok(())
    }

    /// Flushes the writer.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Io`] if the writer fails.
    pub fn flush(&mut self) -> Result<(), TransportError> {
        self.inner.flush()?;
        Ok(())
    }

    /// A reference to the writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Unwraps the writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}
