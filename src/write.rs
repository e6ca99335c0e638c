//! `LogWriter`: the top-level TIDE log encoder state machine.
//!
//! This owns the sink, the channel registry, the optional currently-open chunk, and the
//! file-level counters, orchestrating header emission, channel declarations, the chunk
//! lifecycle, entry writes, and finalization, the same responsibilities the teacher crate's
//! `Writer<W>` has for MCAP, minus compression, schemas, attachments, and the summary section
//! (none of which TIDE has).

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use log::{debug, error, trace};

use crate::channel::{Channel, ChannelRegistry};
use crate::chunk::ChunkBuilder;
use crate::codec::{self, block_tag};
use crate::error::{TideError, TideResult};
use crate::sink::ByteSink;

const MAJOR_VERSION: u8 = 1;
const MINOR_VERSION: u8 = 0;

/// Writes a TIDE log to the given [`ByteSink`].
///
/// Users should call [`close()`](Self::close) to flush the stream, back-patch the final chunk
/// and file header, and check for errors when done; `Drop` makes a best-effort attempt at the
/// same sequence and logs failures rather than panicking (`SPEC_FULL.md` §9.4).
pub struct LogWriter<W: ByteSink> {
    /// `None` once the writer is closed or has been poisoned by an I/O failure.
    sink: Option<W>,
    num_channels: u32,
    num_chunks: u32,
    channels: ChannelRegistry,
    current_chunk: Option<ChunkBuilder>,
}

impl LogWriter<BufWriter<File>> {
    /// Opens `path` for writing and wraps it in a [`BufWriter`], matching the original
    /// constructor's `fopen(path, "wb")` convenience path.
    pub fn open_path<P: AsRef<Path>>(path: P) -> TideResult<Self> {
        let file = File::create(path)?;
        Self::wrap_sink(BufWriter::new(file))
    }
}

impl<W: ByteSink> LogWriter<W> {
    /// Wraps an already-open [`ByteSink`], writing the initial TIDE block with
    /// `num_channels = num_chunks = 0`.
    pub fn wrap_sink(sink: W) -> TideResult<Self> {
        let mut writer = Self {
            sink: Some(sink),
            num_channels: 0,
            num_chunks: 0,
            channels: ChannelRegistry::default(),
            current_chunk: None,
        };
        writer.write_tide_block()?;
        Ok(writer)
    }

    fn ensure_open(&self) -> TideResult<()> {
        if self.sink.is_none() {
            return Err(TideError::WriterFinalized);
        }
        Ok(())
    }

    /// Runs `op` against the sink, poisoning the writer (dropping it to `None`) if it fails.
    fn with_sink<T>(&mut self, op: impl FnOnce(&mut W) -> TideResult<T>) -> TideResult<T> {
        self.ensure_open()?;
        let sink = self.sink.as_mut().expect("checked by ensure_open");
        match op(sink) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.sink = None;
                Err(err)
            }
        }
    }

    /// Writes (or rewrites, at close time) the 12-byte TIDE block header plus its 10-byte
    /// preamble at the current sink position. Callers are responsible for seeking first when
    /// rewriting.
    fn write_tide_block(&mut self) -> TideResult<()> {
        let num_channels = self.num_channels;
        let num_chunks = self.num_chunks;
        self.with_sink(|sink| {
            let header = codec::encode_block_header(block_tag::TIDE, 10);
            sink.write_all(&header)?;
            let preamble =
                codec::encode_tide(MAJOR_VERSION, MINOR_VERSION, num_channels, num_chunks);
            sink.write_all(&preamble)?;
            sink.flush()?;
            Ok(())
        })?;
        trace!(
            "wrote TIDE block: num_channels={} num_chunks={}",
            num_channels,
            num_chunks
        );
        Ok(())
    }

    /// Declares a new channel and returns a handle to it. See `SPEC_FULL.md` §4.3.
    #[allow(clippy::too_many_arguments)]
    pub fn write_channel(
        &mut self,
        name: &str,
        type_name: &str,
        source_desc: &str,
        source_spec: &[u8],
        fmt_spec: &[u8],
        data_size: u32,
    ) -> TideResult<Channel> {
        self.ensure_open()?;

        if type_name.len() > 10 {
            return Err(TideError::FieldTooLarge {
                field: "type",
                actual: type_name.len(),
                max: 10,
            });
        }

        // Validate and encode every variable-length field before writing anything: a bounds
        // failure must leave the sink untouched (Scenario D).
        let name_enc = codec::encode_sarray("name", name.as_bytes())?;
        let source_desc_enc = codec::encode_sarray("source_desc", source_desc.as_bytes())?;
        let source_spec_enc = codec::encode_sarray("source_spec", source_spec)?;
        let fmt_spec_enc = codec::encode_array("fmt_spec", fmt_spec)?;
        let type_field = codec::pack_type_field(type_name.as_bytes());

        let id = self.num_channels + 1;
        let body_size = 4 // id
            + name_enc.len() as u64
            + 10 // type
            + source_desc_enc.len() as u64
            + source_spec_enc.len() as u64
            + fmt_spec_enc.len() as u64
            + 4; // data_size

        self.with_sink(|sink| {
            sink.write_all(&codec::encode_block_header(block_tag::CHAN, body_size))?;
            sink.write_all(&id.to_le_bytes())?;
            sink.write_all(&name_enc)?;
            sink.write_all(&type_field)?;
            sink.write_all(&source_desc_enc)?;
            sink.write_all(&source_spec_enc)?;
            sink.write_all(&fmt_spec_enc)?;
            sink.write_all(&data_size.to_le_bytes())?;
            sink.flush()?;
            Ok(())
        })?;

        self.num_channels += 1;
        self.channels.insert(id);
        debug!("wrote CHAN id={id} name={name:?} data_size={data_size}");

        Ok(Channel { id, data_size })
    }

    /// Writes one entry to `channel`, opening a chunk first if none is currently open.
    pub fn write_entry(
        &mut self,
        channel: &Channel,
        ts_sec: u64,
        ts_usec: u64,
        payload: &[u8],
    ) -> TideResult<()> {
        self.ensure_open()?;

        if !self.channels.contains(channel.id) {
            return Err(TideError::InvalidArgument {
                reason: format!("channel id {} was not returned by write_channel", channel.id),
            });
        }

        if self.current_chunk.is_none() {
            self.start_chunk()?;
        }

        let ts = codec::ts_from_seconds_micros(ts_sec, ts_usec);
        let payload_enc = codec::encode_array("payload", payload)?;
        let entry_header = codec::encode_entry(channel.id, ts);
        let entry_total_bytes = entry_header.len() as u64 + payload_enc.len() as u64;

        self.with_sink(|sink| {
            sink.write_all(&entry_header)?;
            sink.write_all(&payload_enc)?;
            Ok(())
        })?;

        let chunk = self
            .current_chunk
            .as_mut()
            .expect("start_chunk guarantees a chunk is open");
        chunk.record(ts, entry_total_bytes);

        Ok(())
    }

    /// Finalizes the currently open chunk (if any) and begins a new one at the current sink
    /// position.
    pub fn start_chunk(&mut self) -> TideResult<()> {
        self.ensure_open()?;
        self.finish_chunk()?;

        let id = self.num_chunks + 1;
        let start_offset = self.with_sink(|sink| Ok(sink.tell()?))?;

        self.with_sink(|sink| {
            sink.write_all(&codec::encode_block_header(
                block_tag::CHNK,
                crate::records::ChunkPreamble::SIZE,
            ))?;
            sink.write_all(&codec::encode_chunk(id, 0, u64::MAX, 0, 0))?;
            sink.flush()?;
            Ok(())
        })?;

        self.num_chunks += 1;
        self.current_chunk = Some(ChunkBuilder::new(id, start_offset));
        debug!("opened CHNK id={id} at offset={start_offset}");
        Ok(())
    }

    /// Back-patches the currently open chunk's block header with its final size and preamble,
    /// then returns the sink to its prior position. Does nothing if no chunk is open.
    fn finish_chunk(&mut self) -> TideResult<()> {
        let Some(chunk) = self.current_chunk.take() else {
            return Ok(());
        };

        let block_size = chunk.size();
        let preamble = chunk.encode_preamble();
        let start_offset = chunk.start();
        let chunk_id = chunk.id();

        self.with_sink(|sink| {
            let cur_pos = sink.tell()?;
            sink.seek_set(start_offset)?;
            sink.write_all(&codec::encode_block_header(block_tag::CHNK, block_size))?;
            sink.write_all(&preamble)?;
            sink.seek_set(cur_pos)?;
            sink.flush()?;
            Ok(())
        })?;

        debug!(
            "closed CHNK id={chunk_id} start_offset={start_offset} block_size={block_size}"
        );
        Ok(())
    }

    /// Finalizes any open chunk, rewrites the TIDE header with the final counters, flushes, and
    /// marks the writer closed. Idempotent: closing an already-closed writer is a no-op.
    pub fn close(&mut self) -> TideResult<()> {
        if self.sink.is_none() {
            return Ok(());
        }

        self.finish_chunk()?;

        let num_channels = self.num_channels;
        let num_chunks = self.num_chunks;
        self.with_sink(|sink| {
            sink.seek_set(0)?;
            sink.write_all(&codec::encode_block_header(block_tag::TIDE, 10))?;
            sink.write_all(&codec::encode_tide(
                MAJOR_VERSION,
                MINOR_VERSION,
                num_channels,
                num_chunks,
            ))?;
            sink.flush()?;
            Ok(())
        })?;

        debug!("closed log: num_channels={num_channels} num_chunks={num_chunks}");
        self.sink = None;
        Ok(())
    }
}

impl<W: ByteSink> Drop for LogWriter<W> {
    fn drop(&mut self) {
        if self.sink.is_some() {
            if let Err(err) = self.close() {
                error!("failed to finalize TIDE log on drop: {err}");
            }
        }
    }
}
