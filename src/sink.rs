//! The seekable byte sink the writer emits its wire format into.

use std::io::{self, Seek, SeekFrom, Write};

/// A seekable, writable byte stream.
///
/// This is the only capability the encoder needs from its destination: no magic bytes, no
/// framing beyond what [`crate::codec`] already produces. Any `T: Write + Seek` gets this for
/// free (see the blanket impl below), so [`std::fs::File`], `BufWriter<File>`, and
/// `Cursor<Vec<u8>>` are all usable sinks without an adapter.
pub trait ByteSink {
    /// Writes `bytes` in full, or returns an error. A short write is always an error here: the
    /// writer has no way to recover from a partial record.
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Current byte offset from the start of the stream.
    fn tell(&mut self) -> io::Result<u64>;

    /// Seeks to an absolute offset from the start of the stream.
    fn seek_set(&mut self, offset: u64) -> io::Result<()>;

    /// Seeks by `delta` bytes relative to the current position. `delta` may be negative.
    fn seek_cur(&mut self, delta: i64) -> io::Result<()>;

    /// Flushes any buffering between here and the OS. Not a durability guarantee (no fsync).
    fn flush(&mut self) -> io::Result<()>;
}

impl<T: Write + Seek> ByteSink for T {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        Write::write_all(self, bytes)
    }

    fn tell(&mut self) -> io::Result<u64> {
        self.stream_position()
    }

    fn seek_set(&mut self, offset: u64) -> io::Result<()> {
        self.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    fn seek_cur(&mut self, delta: i64) -> io::Result<()> {
        self.seek(SeekFrom::Current(delta))?;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Write::flush(self)
    }
}
