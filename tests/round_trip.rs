//! End-to-end tests against a real file on disk, the way the teacher crate's own
//! `round_trip.rs` exercises its writer through `tempfile` rather than an in-memory cursor.

mod common;

use std::fs;

use tidelog::{LogWriter, TideError};

#[test]
fn writes_a_readable_file_to_disk() {
    common::init_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.tide");

    let mut writer = LogWriter::open_path(&path).unwrap();
    let imu = writer
        .write_channel("imu", "Vector3d", "imu-driver", b"", b"", 24)
        .unwrap();
    let gps = writer
        .write_channel("gps", "LatLon", "gps-driver", b"wgs84", b"", 16)
        .unwrap();

    writer.write_entry(&imu, 10, 0, &[1u8; 24]).unwrap();
    writer.write_entry(&gps, 10, 500_000, &[2u8; 16]).unwrap();
    writer.write_entry(&imu, 11, 0, &[3u8; 24]).unwrap();

    writer.close().unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[0..4], b"TIDE");
    assert_eq!(
        u32::from_le_bytes(bytes[14..18].try_into().unwrap()),
        2,
        "final header must carry the declared channel count"
    );
    assert_eq!(
        u32::from_le_bytes(bytes[18..22].try_into().unwrap()),
        1,
        "final header must carry the chunk count (one implicit chunk)"
    );
}

#[test]
fn empty_log_is_just_the_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.tide");

    LogWriter::open_path(&path).unwrap().close().unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 22);
    assert_eq!(&bytes[0..4], b"TIDE");
}

#[test]
fn drop_without_close_still_finalizes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dropped.tide");

    {
        let mut writer = LogWriter::open_path(&path).unwrap();
        let ch = writer
            .write_channel("imu", "Vector3d", "imu-driver", b"", b"", 24)
            .unwrap();
        writer.write_entry(&ch, 0, 0, &[0u8; 24]).unwrap();
        // Writer drops here without an explicit close().
    }

    let bytes = fs::read(&path).unwrap();
    assert_eq!(
        u32::from_le_bytes(bytes[14..18].try_into().unwrap()),
        1,
        "Drop must still back-patch the final channel count"
    );
}

#[test]
fn multiple_explicit_chunks_each_get_disjoint_timestamp_ranges() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chunked.tide");

    let mut writer = LogWriter::open_path(&path).unwrap();
    let ch = writer
        .write_channel("imu", "Vector3d", "imu-driver", b"", b"", 24)
        .unwrap();

    writer.start_chunk().unwrap();
    writer.write_entry(&ch, 0, 0, &[0u8; 24]).unwrap();
    writer.write_entry(&ch, 0, 100, &[0u8; 24]).unwrap();

    writer.start_chunk().unwrap();
    writer.write_entry(&ch, 1, 0, &[0u8; 24]).unwrap();

    writer.close().unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(u32::from_le_bytes(bytes[18..22].try_into().unwrap()), 2);
}

#[test]
fn unknown_channel_handle_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad_channel.tide");

    let mut first = LogWriter::open_path(&path).unwrap();
    let ch = first
        .write_channel("imu", "Vector3d", "imu-driver", b"", b"", 24)
        .unwrap();
    first.close().unwrap();
    drop(first);

    let other_path = dir.path().join("other.tide");
    let mut second = LogWriter::open_path(&other_path).unwrap();
    let err = second.write_entry(&ch, 0, 0, &[0u8; 24]).unwrap_err();
    assert!(matches!(err, TideError::InvalidArgument { .. }));
}
