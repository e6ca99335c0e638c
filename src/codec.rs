//! `RecordCodec`: pure, stateless serialization of TIDE's packed records.
//!
//! Nothing in this module touches I/O. Every function takes plain values and byte slices and
//! returns an owned `Vec<u8>` (or an error for oversized variable-length fields), the same way
//! the teacher crate's `write_record` builds a record into a scratch buffer via
//! `Cursor::new(&mut buf).write_le(...)` before it's ever handed to a sink.

use std::io::Cursor;

use binrw::prelude::*;
use byteorder::{WriteBytesExt, LE};

use crate::error::TideError;
use crate::records::{tag, BlockHeader, ChunkPreamble, EntryHeader, TidePreamble};

/// Maximum payload length an `SArray`'s 1-byte length prefix can represent.
pub const SARRAY_MAX_LEN: usize = u8::MAX as usize;

/// Maximum payload length an `Array`'s 4-byte length prefix can represent.
pub const ARRAY_MAX_LEN: usize = u32::MAX as usize;

/// Microseconds per second, as an integer. The distilled C++ source this format comes from used
/// the floating-point literal `10e6` (1×10⁷) here, which is wrong for any `sec>0`; this encoder
/// always uses the correct integer constant.
pub const USEC_PER_SEC: u64 = 1_000_000;

fn write_le<T>(record: &T) -> Vec<u8>
where
    T: for<'a> BinWrite<Args<'a> = ()>,
{
    let mut buf = Vec::new();
    Cursor::new(&mut buf)
        .write_le(record)
        .expect("writing a packed record into an in-memory buffer cannot fail");
    buf
}

/// Encodes a 12-byte block header: a 4-byte tag followed by an 8-byte body size.
pub fn encode_block_header(block_tag: &[u8; 4], block_size: u64) -> Vec<u8> {
    write_le(&BlockHeader {
        tag: *block_tag,
        block_size,
    })
}

/// Encodes the 10-byte TIDE preamble.
pub fn encode_tide(major: u8, minor: u8, num_channels: u32, num_chunks: u32) -> Vec<u8> {
    write_le(&TidePreamble {
        major,
        minor,
        num_channels,
        num_chunks,
    })
}

/// Encodes the 25-byte CHNK preamble.
pub fn encode_chunk(id: u32, count: u32, start: u64, end: u64, compression: u8) -> Vec<u8> {
    write_le(&ChunkPreamble {
        id,
        count,
        start_ts: start,
        end_ts: end,
        compression,
    })
}

/// Encodes the 12-byte ENTRY header that precedes an entry's payload `Array`.
pub fn encode_entry(channel_id: u32, timestamp: u64) -> Vec<u8> {
    write_le(&EntryHeader {
        channel_id,
        timestamp,
    })
}

/// Encodes an `SArray`: a 1-byte length prefix followed by `bytes`.
///
/// `field` is used only to label the error if `bytes` exceeds [`SARRAY_MAX_LEN`].
pub fn encode_sarray(field: &'static str, bytes: &[u8]) -> Result<Vec<u8>, TideError> {
    if bytes.len() > SARRAY_MAX_LEN {
        return Err(TideError::FieldTooLarge {
            field,
            actual: bytes.len(),
            max: SARRAY_MAX_LEN,
        });
    }
    let mut out = Vec::with_capacity(1 + bytes.len());
    out.write_u8(bytes.len() as u8).expect("writing to a Vec cannot fail");
    out.extend_from_slice(bytes);
    Ok(out)
}

/// Encodes an `Array`: a 4-byte length prefix followed by `bytes`.
pub fn encode_array(field: &'static str, bytes: &[u8]) -> Result<Vec<u8>, TideError> {
    if bytes.len() > ARRAY_MAX_LEN {
        return Err(TideError::FieldTooLarge {
            field,
            actual: bytes.len(),
            max: ARRAY_MAX_LEN,
        });
    }
    let mut out = Vec::with_capacity(4 + bytes.len());
    out.write_u32::<LE>(bytes.len() as u32)
        .expect("writing to a Vec cannot fail");
    out.extend_from_slice(bytes);
    Ok(out)
}

/// Packs a fixed 10-byte, zero-padded `type` field. Bytes beyond `type_name`'s length are zero.
///
/// Callers are expected to have already validated `type_name.len() <= 10`; this just does the
/// packing.
pub fn pack_type_field(type_name: &[u8]) -> [u8; 10] {
    let mut buf = [0u8; 10];
    let n = type_name.len().min(10);
    buf[..n].copy_from_slice(&type_name[..n]);
    buf
}

/// Converts seconds + microseconds into the packed microsecond timestamp used by ENTRY and
/// CHNK records.
pub fn ts_from_seconds_micros(sec: u64, usec: u64) -> u64 {
    sec.saturating_mul(USEC_PER_SEC).saturating_add(usec)
}

/// Block tag constants re-exported for convenience at the call site.
pub mod block_tag {
    pub use crate::records::tag::{CHAN, CHNK, TIDE};
}
