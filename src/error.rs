//! Error types.
//!
//! [ScanError] covers malformed or unreadable streams, [IndexError] rejected
//! index files, and [Error] a whole scan run including its sink.
use std::borrow::Cow;

use thiserror::Error;

fn marker_name(marker: &u8) -> Cow<'static, str> {
    crate::marker::name(*marker)
}

/// Malformed or unreadable marker stream. Every variant ends the scan.
#[derive(Error, Debug)]
pub enum ScanError {
    /// A byte other than 0xFF was found where a marker must start.
    #[error("missing pre-marker byte at offset {offset} (found 0x{found:02X})")]
    MissingPreMarker { offset: u64, found: u8 },
    /// The stream ended after one or more 0xFF bytes.
    #[error("missing marker byte")]
    MissingMarker,
    /// The stream ended before the first length byte.
    #[error("missing marker length for {}", marker_name(.marker))]
    MissingLength { marker: u8 },
    /// The stream ended between the two length bytes.
    #[error("partial marker length for {}", marker_name(.marker))]
    PartialLength { marker: u8 },
    /// The declared length doesn't cover its own two bytes.
    #[error("marker length less than two ({length}) for {}", marker_name(.marker))]
    LengthTooShort { marker: u8, length: u16 },
    /// Skipping a payload or backing up over a marker failed.
    #[error("seek failed: {0}")]
    Seek(#[source] std::io::Error),
    /// The underlying reader failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The stream ended inside entropy-coded data.
    #[error("EOF in compressed stream")]
    EofInScan,
    /// A DNL marker was found inside entropy-coded data.
    #[error("DNL markers not supported (offset {offset})")]
    DnlUnsupported { offset: u64 },
    /// The stream ended without an EOI as its last marker.
    #[error("missing EOI marker")]
    MissingEndOfImage,
}

/// Rejected frame index file.
#[derive(Error, Debug)]
pub enum IndexError {
    /// The file is shorter than its count header.
    #[error("index header truncated")]
    TruncatedHeader,
    /// The count header is zero.
    #[error("index holds no frames")]
    Empty,
    /// The file size isn't a whole number of records.
    #[error("index has a partial record")]
    PartialRecord,
    /// The header disagrees with the records actually present.
    #[error("index header counts {header} frames but {records} records follow")]
    CountMismatch { header: u64, records: u64 },
    /// Offsets aren't strictly ascending.
    #[error("index offset {offset} at frame {frame} doesn't follow {previous}")]
    NotAscending {
        frame: usize,
        offset: u64,
        previous: u64,
    },
    /// An offset lies outside the stream it indexes.
    #[error("index offset {offset} at frame {frame} is beyond the stream ({len} bytes)")]
    OutOfRange { frame: usize, offset: u64, len: u64 },
    /// A frame number past the last indexed frame.
    #[error("frame {frame} out of range ({frames} frames)")]
    NoSuchFrame { frame: usize, frames: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failure of a scan run, from the scanner or from the sink consuming it.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Scan(#[from] ScanError),
    /// Writing sink output failed.
    #[error("I/O error on write: {0}")]
    Io(#[from] std::io::Error),
    /// The stream held no SOI marker.
    #[error("no frames found")]
    NoFrames,
    /// The frame counter can't represent another frame.
    #[error("too many frames")]
    TooManyFrames,
    /// A frame start didn't come after the previous one.
    #[error("frame offset {offset} doesn't follow {previous}")]
    OffsetOrder { offset: u64, previous: u64 },
}
