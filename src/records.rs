//! Packed wire records for the TIDE log format.
//!
//! See `SPEC_FULL.md` §3/§6.2 for the byte layout. Every record here is little-endian and
//! packed with no padding, which `binrw`'s derive gives us for free on plain fixed-width
//! structs.

use binrw::binrw;

/// Tags used in block headers. TIDE files have exactly these three block kinds.
pub mod tag {
    pub const TIDE: &[u8; 4] = b"TIDE";
    pub const CHAN: &[u8; 4] = b"CHAN";
    pub const CHNK: &[u8; 4] = b"CHNK";
}

/// The 12-byte header that precedes every block: a 4-byte ASCII tag and an 8-byte body size.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BlockHeader {
    pub tag: [u8; 4],
    pub block_size: u64,
}

/// The 10-byte TIDE preamble: format version plus the file-level channel/chunk counts.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TidePreamble {
    pub major: u8,
    pub minor: u8,
    pub num_channels: u32,
    pub num_chunks: u32,
}

impl TidePreamble {
    /// On-disk size of this record, which is also the TIDE block's fixed `block_size`.
    pub const SIZE: u64 = 10;
}

/// The 25-byte preamble of a CHNK block: id, entry count, timestamp range, compression.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ChunkPreamble {
    pub id: u32,
    pub count: u32,
    pub start_ts: u64,
    pub end_ts: u64,
    pub compression: u8,
}

impl ChunkPreamble {
    pub const SIZE: u64 = 25;
}

/// The 12-byte header that precedes each entry's payload `Array` inside a chunk.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EntryHeader {
    pub channel_id: u32,
    pub timestamp: u64,
}

impl EntryHeader {
    pub const SIZE: u64 = 12;
}

#[cfg(test)]
mod tests {
    use super::*;
    use binrw::prelude::*;
    use std::io::Cursor;

    #[test]
    fn block_header_round_trips() {
        let hdr = BlockHeader {
            tag: *tag::CHAN,
            block_size: 43,
        };
        let mut buf = Vec::new();
        Cursor::new(&mut buf).write_le(&hdr).unwrap();
        assert_eq!(buf.len(), 12);
        assert_eq!(&buf[0..4], b"CHAN");
        assert_eq!(&buf[4..12], &43u64.to_le_bytes());

        let read: BlockHeader = Cursor::new(&buf).read_le().unwrap();
        assert_eq!(read, hdr);
    }

    #[test]
    fn tide_preamble_is_ten_bytes() {
        let preamble = TidePreamble {
            major: 1,
            minor: 0,
            num_channels: 3,
            num_chunks: 7,
        };
        let mut buf = Vec::new();
        Cursor::new(&mut buf).write_le(&preamble).unwrap();
        assert_eq!(buf.len(), TidePreamble::SIZE as usize);
        assert_eq!(buf, vec![1, 0, 3, 0, 0, 0, 7, 0, 0, 0]);
    }

    #[test]
    fn chunk_preamble_is_twenty_five_bytes() {
        let preamble = ChunkPreamble {
            id: 1,
            count: 1,
            start_ts: 128,
            end_ts: 128,
            compression: 0,
        };
        let mut buf = Vec::new();
        Cursor::new(&mut buf).write_le(&preamble).unwrap();
        assert_eq!(buf.len(), ChunkPreamble::SIZE as usize);
    }

    #[test]
    fn entry_header_is_twelve_bytes() {
        let header = EntryHeader {
            channel_id: 1,
            timestamp: 128,
        };
        let mut buf = Vec::new();
        Cursor::new(&mut buf).write_le(&header).unwrap();
        assert_eq!(buf.len(), EntryHeader::SIZE as usize);
    }
}
