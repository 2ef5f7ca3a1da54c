//! Byte-source abstraction over the device transport

use crate::error::Error;
use bytes::{Buf, BytesMut};
use std::io::Read;

/// A stream of bytes from the measuring device
///
/// The reader loop is the only consumer. Implementations report how many
/// bytes are ready without blocking, deliver exactly the requested count
/// (short only when closing), and say whether more bytes can ever arrive.
pub trait ByteSource {
    /// Number of bytes ready to read without blocking
    fn bytes_available(&mut self) -> Result<usize, Error>;

    /// Read bytes into `buf`, blocking until it is filled or the source
    /// closes; returns the number of bytes actually read
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<usize, Error>;

    /// Whether further bytes may still arrive
    ///
    /// A false return with insufficient bytes available is the loop's sole
    /// termination condition.
    fn is_open(&mut self) -> bool;
}

/// A finite, fully-buffered byte capture
///
/// Everything the source will ever produce is already available, so
/// [`is_open`](ByteSource::is_open) is always false: once the remaining
/// bytes cannot satisfy a request the loop terminates instead of waiting.
#[derive(Debug, Clone)]
pub struct MemorySource {
    data: Vec<u8>,
    pos: usize,
}

impl MemorySource {
    /// Wrap a captured byte run
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            pos: 0,
        }
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

impl ByteSource for MemorySource {
    fn bytes_available(&mut self) -> Result<usize, Error> {
        Ok(self.remaining())
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let n = buf.len().min(self.remaining());
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    fn is_open(&mut self) -> bool {
        false
    }
}

/// Adapter over any blocking [`Read`] (device node, FIFO, file)
///
/// Generic readers expose no non-blocking availability probe, so
/// [`bytes_available`](ByteSource::bytes_available) performs one blocking
/// fill whenever less than a full frame is staged. The wait the reader loop
/// would have spent polling happens inside the source instead; the loop's
/// semantics are unchanged.
#[derive(Debug)]
pub struct ReadSource<R> {
    inner: R,
    staged: BytesMut,
    open: bool,
}

/// Size of the scratch block used per fill
const FILL_CHUNK: usize = 512;

impl<R: Read> ReadSource<R> {
    /// Wrap a blocking reader
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            staged: BytesMut::new(),
            open: true,
        }
    }

    /// Pull whatever the reader has into the staging buffer, blocking until
    /// at least one byte arrives or the reader reaches end of stream
    fn fill(&mut self) -> Result<(), Error> {
        let mut chunk = [0u8; FILL_CHUNK];
        match self.inner.read(&mut chunk) {
            Ok(0) => self.open = false,
            Ok(n) => self.staged.extend_from_slice(&chunk[..n]),
            Err(e) => {
                self.open = false;
                return Err(e.into());
            }
        }
        Ok(())
    }
}

impl<R: Read> ByteSource for ReadSource<R> {
    fn bytes_available(&mut self) -> Result<usize, Error> {
        if self.staged.len() < crate::constants::FRAME_LEN && self.open {
            self.fill()?;
        }
        Ok(self.staged.len())
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        while self.staged.len() < buf.len() && self.open {
            self.fill()?;
        }
        let n = buf.len().min(self.staged.len());
        buf[..n].copy_from_slice(&self.staged[..n]);
        self.staged.advance(n);
        Ok(n)
    }

    fn is_open(&mut self) -> bool {
        self.open
    }
}
