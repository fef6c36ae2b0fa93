//! Byte-level input for the scanner.
use std::io::{ErrorKind, Read, Seek, SeekFrom};

/// Byte-addressable, seekable input driven by the [Scanner](crate::Scanner).
pub trait ByteCursor {
    /// Read the next byte, or `None` at the end of the stream.
    fn read_byte(&mut self) -> std::io::Result<Option<u8>>;

    /// Move the read position by `offset` bytes, backwards when negative.
    fn seek_relative(&mut self, offset: i64) -> std::io::Result<()>;

    /// Absolute read position.
    fn position(&mut self) -> std::io::Result<u64>;
}

impl<R: Read + Seek> ByteCursor for R {
    fn read_byte(&mut self) -> std::io::Result<Option<u8>> {
        let mut buf = [0];
        loop {
            match self.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }

    fn seek_relative(&mut self, offset: i64) -> std::io::Result<()> {
        self.seek(SeekFrom::Current(offset)).map(|_| ())
    }

    fn position(&mut self) -> std::io::Result<u64> {
        self.stream_position()
    }
}
