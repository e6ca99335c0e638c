//! `ChunkBuilder`: in-memory aggregation for the currently open chunk.
//!
//! This mirrors the original `tide::log::Chunk` class (`start_filepos`, running `chunk_length`,
//! `start_timestamp`/`end_timestamp`, `num_entries`) and the min/max-tracking idiom the teacher
//! crate uses for its own per-chunk `message_bounds`.

use crate::codec;
use crate::records::ChunkPreamble;

/// Tracks the aggregate state of a chunk between `start_chunk()` and its finalization.
#[derive(Debug)]
pub struct ChunkBuilder {
    id: u32,
    start_offset: u64,
    count: u32,
    min_ts: u64,
    max_ts: u64,
    byte_size: u64,
}

impl ChunkBuilder {
    /// Begins a new chunk with the given id at `start_offset` (the file position of its block
    /// header). `byte_size` starts at the preamble's own size: 25 bytes, nothing else yet.
    pub fn new(id: u32, start_offset: u64) -> Self {
        Self {
            id,
            start_offset,
            count: 0,
            min_ts: u64::MAX,
            max_ts: 0,
            byte_size: ChunkPreamble::SIZE,
        }
    }

    /// Records one entry: widens the [min_ts, max_ts] range, increments the entry count, and
    /// accounts for `entry_total_bytes` (the ENTRY header plus its Array-framed payload) toward
    /// this chunk's on-disk size.
    pub fn record(&mut self, ts: u64, entry_total_bytes: u64) {
        self.min_ts = self.min_ts.min(ts);
        self.max_ts = self.max_ts.max(ts);
        self.count += 1;
        self.byte_size += entry_total_bytes;
    }

    /// Builds the CHNK preamble reflecting the current aggregates, with `compression` fixed at
    /// zero (TIDE reserves but never sets this field).
    pub fn snapshot(&self) -> ChunkPreamble {
        ChunkPreamble {
            id: self.id,
            count: self.count,
            start_ts: self.min_ts,
            end_ts: self.max_ts,
            compression: 0,
        }
    }

    /// The chunk's accumulated byte size: the 25-byte preamble plus every entry recorded so far.
    /// This is exactly the value written as the CHNK block's on-disk `block_size` at close (see
    /// `SPEC_FULL.md` I4 and §9.1 item 6).
    pub fn size(&self) -> u64 {
        self.byte_size
    }

    /// The file offset of this chunk's block header.
    pub fn start(&self) -> u64 {
        self.start_offset
    }

    /// The chunk's id.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Encodes this chunk's current preamble as wire bytes.
    pub fn encode_preamble(&self) -> Vec<u8> {
        let p = self.snapshot();
        codec::encode_chunk(p.id, p.count, p.start_ts, p.end_ts, p.compression)
    }
}
