//! Tests for driving the reporter and indexer over whole streams.

use std::io::Cursor;

use jpegmarkers::{drive, Error, FrameIndex, Indexer, Reporter, ScanError};

/// One small baseline frame: SOI, APP0, DQT, SOF0, DHT, SOS with a restart
/// marker and a stuffed byte in its data, EOI.
fn frame() -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8];
    data.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x07, b'J', b'F', b'I', b'F', 0x00]);
    data.extend_from_slice(&[0xFF, 0xDB, 0x00, 0x04, 0x00, 0x01]);
    data.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x03, 0x08]);
    data.extend_from_slice(&[0xFF, 0xC4, 0x00, 0x03, 0x00]);
    data.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x03, 0x01]);
    data.extend_from_slice(&[0x10, 0xFF, 0x00, 0x20, 0xFF, 0xD0, 0x30]);
    data.extend_from_slice(&[0xFF, 0xD9]);
    data
}

fn trace(data: &[u8]) -> (Result<u64, Error>, String) {
    let mut out = Vec::new();
    let result = drive(Cursor::new(data), Reporter::new(&mut out));
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn reports_markers() {
    let (result, text) = trace(&frame());
    assert_eq!(result.unwrap(), 1);
    assert_eq!(
        text,
        "SOI\nAPP0\nDQT\nSOF0\nDHT\nSOS\n  RST0 (immediate)\nEOI\nFrames: 1\n"
    );
}

#[test]
fn reports_frames_separately() {
    let data = [frame(), frame()].concat();
    let (result, text) = trace(&data);
    assert_eq!(result.unwrap(), 2);
    assert!(text.contains("EOI\n\nSOI\n"));
    assert!(text.ends_with("EOI\nFrames: 2\n"));
}

#[test]
fn trace_is_repeatable() {
    let data = [frame(), frame(), frame()].concat();
    let (first, first_text) = trace(&data);
    let (second, second_text) = trace(&data);
    assert_eq!(first.unwrap(), second.unwrap());
    assert_eq!(first_text, second_text);
}

#[test]
fn trace_stops_at_error() {
    let mut data = frame();
    data.truncate(data.len() - 1);
    let (result, text) = trace(&data);
    assert!(matches!(
        result,
        Err(Error::Scan(ScanError::EofInScan))
    ));
    assert!(!text.contains("Frames:"));
}

#[test]
fn trace_shows_immediate_dnl_before_failing() {
    let data = [
        0xFF, 0xD8, 0xFF, 0xDA, 0x00, 0x02, 0x01, 0xFF, 0xDC, 0x00, 0x04, 0x00, 0x10, 0xFF, 0xD9,
    ];
    let (result, text) = trace(&data);
    assert!(matches!(
        result,
        Err(Error::Scan(ScanError::DnlUnsupported { offset: 7 }))
    ));
    assert_eq!(text, "SOI\nSOS\n  DNL (immediate)\n");
}

#[test]
fn index_round_trip() {
    let one = frame();
    let data = [one.clone(), one.clone(), one.clone()].concat();

    let mut out = Cursor::new(Vec::new());
    let frames = drive(Cursor::new(&data), Indexer::new(&mut out).unwrap()).unwrap();
    assert_eq!(frames, 3);

    let bytes = out.into_inner();
    assert_eq!(bytes.len(), 8 * 4);

    let index = FrameIndex::read_from(&bytes[..]).unwrap();
    let len = one.len() as u64;
    assert_eq!(index.offsets(), &[0, len, 2 * len]);
    index.validate(data.len() as u64).unwrap();
    assert_eq!(index.frame_range(2, data.len() as u64), Some(2 * len..3 * len));
}

#[test]
fn index_single_jpeg() {
    let mut out = Cursor::new(Vec::new());
    let frames = drive(
        Cursor::new([0xFF, 0xD8, 0xFF, 0xD9]),
        Indexer::new(&mut out).unwrap(),
    )
    .unwrap();
    assert_eq!(frames, 1);
    assert_eq!(
        out.into_inner(),
        vec![0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0]
    );
}

#[test]
fn failed_index_keeps_placeholder() {
    let mut data = [frame(), frame()].concat();
    data.truncate(data.len() - 2);

    let mut out = Cursor::new(Vec::new());
    let result = drive(Cursor::new(&data), Indexer::new(&mut out).unwrap());
    assert!(matches!(
        result,
        Err(Error::Scan(ScanError::EofInScan))
    ));

    let bytes = out.into_inner();
    assert_eq!(&bytes[..8], &[0; 8]);
    assert!(FrameIndex::read_from(&bytes[..]).is_err());
}

#[test]
fn index_without_frames() {
    // A stream of valid markers that never starts an image
    let data = [0xFF, 0xFE, 0x00, 0x02, 0xFF, 0xD9];
    let mut out = Cursor::new(Vec::new());
    let result = drive(Cursor::new(data), Indexer::new(&mut out).unwrap());
    assert!(matches!(result, Err(Error::NoFrames)));
}
