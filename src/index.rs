//! Frame index file format.
//!
//! An index is a sequence of big-endian `u64` records. The first record is the
//! frame count `N` (at least one), followed by `N` strictly ascending byte
//! offsets of the frame starts in the indexed stream.
use std::io::{Read, Seek, SeekFrom, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::error::IndexError;

/// Suffix appended to a stream's path to name its index.
pub const INDEX_SUFFIX: &str = ".index";

/// Size of a single index record.
pub const RECORD_LEN: usize = 8;

/// Path of the index belonging to the stream at `input`.
pub fn index_path(input: &Path) -> PathBuf {
    let mut path = input.as_os_str().to_owned();
    path.push(INDEX_SUFFIX);
    path.into()
}

/// Write `value` as a big-endian record.
pub fn write_u64_be<W: Write>(w: &mut W, value: u64) -> std::io::Result<()> {
    w.write_all(&value.to_be_bytes())
}

/// Frame start offsets read back from an index file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameIndex {
    offsets: Vec<u64>,
}

impl FrameIndex {
    /// Parse a complete index file.
    ///
    /// Rejects files whose header doesn't match the number of records, which
    /// includes the zero placeholder left behind by an unfinished run.
    pub fn read_from<R: Read>(mut r: R) -> Result<Self, IndexError> {
        let mut data = Vec::new();
        r.read_to_end(&mut data)?;

        if data.len() < RECORD_LEN {
            return Err(IndexError::TruncatedHeader);
        }
        if data.len() % RECORD_LEN != 0 {
            return Err(IndexError::PartialRecord);
        }

        let mut records = data.chunks_exact(RECORD_LEN).map(|chunk| {
            let mut buf = [0; RECORD_LEN];
            buf.copy_from_slice(chunk);
            u64::from_be_bytes(buf)
        });

        let header = records.next().unwrap_or(0);
        let offsets: Vec<u64> = records.collect();

        if header == 0 && offsets.is_empty() {
            return Err(IndexError::Empty);
        }
        if header != offsets.len() as u64 {
            return Err(IndexError::CountMismatch {
                header,
                records: offsets.len() as u64,
            });
        }

        for (frame, pair) in offsets.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(IndexError::NotAscending {
                    frame: frame + 1,
                    offset: pair[1],
                    previous: pair[0],
                });
            }
        }

        Ok(Self { offsets })
    }

    /// Check every offset against the length of the indexed stream.
    pub fn validate(&self, source_len: u64) -> Result<(), IndexError> {
        // Ascending, so the last offset is the largest
        match self.offsets.iter().enumerate().last() {
            Some((frame, &offset)) if offset >= source_len => Err(IndexError::OutOfRange {
                frame,
                offset,
                len: source_len,
            }),
            _ => Ok(()),
        }
    }

    /// Byte range of frame `frame` (zero-based) in a stream of `source_len`
    /// bytes. The last frame runs to the end of the stream.
    pub fn frame_range(&self, frame: usize, source_len: u64) -> Option<Range<u64>> {
        let start = *self.offsets.get(frame)?;
        let end = self
            .offsets
            .get(frame + 1)
            .copied()
            .unwrap_or(source_len);

        Some(start..end)
    }

    /// Copy frame `frame` out of `source`, a stream of `source_len` bytes, into
    /// `out`. Returns the number of bytes copied.
    pub fn copy_frame<R, W>(
        &self,
        source: &mut R,
        source_len: u64,
        frame: usize,
        out: &mut W,
    ) -> Result<u64, IndexError>
    where
        R: Read + Seek,
        W: Write,
    {
        let range = self
            .frame_range(frame, source_len)
            .ok_or(IndexError::NoSuchFrame {
                frame,
                frames: self.len(),
            })?;
        log::debug!("frame {} spans bytes {}..{}", frame, range.start, range.end);

        source.seek(SeekFrom::Start(range.start))?;
        let copied = std::io::copy(&mut source.take(range.end - range.start), out)?;
        out.flush()?;

        Ok(copied)
    }

    pub fn offsets(&self) -> &[u64] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(values: &[u64]) -> Vec<u8> {
        let mut out = Vec::new();
        for &v in values {
            write_u64_be(&mut out, v).unwrap();
        }
        out
    }

    #[test]
    fn index_path_appends_suffix() {
        assert_eq!(
            index_path(Path::new("clips/cam.mjpg")),
            PathBuf::from("clips/cam.mjpg.index")
        );
    }

    #[test]
    fn reads_offsets() {
        let index = FrameIndex::read_from(&records(&[3, 0, 10, 42])[..]).unwrap();
        assert_eq!(index.offsets(), &[0, 10, 42]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.frame_range(1, 50), Some(10..42));
        assert_eq!(index.frame_range(2, 50), Some(42..50));
        assert_eq!(index.frame_range(3, 50), None);
    }

    #[test]
    fn rejects_placeholder_header() {
        let err = FrameIndex::read_from(&records(&[0, 0, 10])[..]).unwrap_err();
        assert!(matches!(
            err,
            IndexError::CountMismatch {
                header: 0,
                records: 2
            }
        ));
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            FrameIndex::read_from(&records(&[0])[..]),
            Err(IndexError::Empty)
        ));
        assert!(matches!(
            FrameIndex::read_from(&[0u8; 4][..]),
            Err(IndexError::TruncatedHeader)
        ));
    }

    #[test]
    fn rejects_partial_record() {
        let mut data = records(&[1, 0]);
        data.push(0);
        assert!(matches!(
            FrameIndex::read_from(&data[..]),
            Err(IndexError::PartialRecord)
        ));
    }

    #[test]
    fn rejects_unordered_offsets() {
        let err = FrameIndex::read_from(&records(&[3, 0, 20, 20])[..]).unwrap_err();
        assert!(matches!(
            err,
            IndexError::NotAscending {
                frame: 2,
                offset: 20,
                previous: 20
            }
        ));
    }

    #[test]
    fn copies_single_frame() {
        let stream = [0xFF, 0xD8, 0xFF, 0xD9, 0xFF, 0xD8, 0x01, 0xFF, 0xD9];
        let index = FrameIndex::read_from(&records(&[2, 0, 4])[..]).unwrap();
        index.validate(stream.len() as u64).unwrap();

        let mut source = std::io::Cursor::new(&stream[..]);
        let mut out = Vec::new();
        let copied = index
            .copy_frame(&mut source, stream.len() as u64, 1, &mut out)
            .unwrap();
        assert_eq!(copied, 5);
        assert_eq!(out, &stream[4..]);

        out.clear();
        index
            .copy_frame(&mut source, stream.len() as u64, 0, &mut out)
            .unwrap();
        assert_eq!(out, &stream[..4]);
    }

    #[test]
    fn copy_rejects_missing_frame() {
        let index = FrameIndex::read_from(&records(&[1, 0])[..]).unwrap();
        let mut source = std::io::Cursor::new(vec![0xFF, 0xD8, 0xFF, 0xD9]);
        let mut out = Vec::new();
        assert!(matches!(
            index.copy_frame(&mut source, 4, 1, &mut out),
            Err(IndexError::NoSuchFrame {
                frame: 1,
                frames: 1
            })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn validates_against_stream_length() {
        let index = FrameIndex::read_from(&records(&[2, 0, 100])[..]).unwrap();
        assert!(index.validate(101).is_ok());
        assert!(matches!(
            index.validate(100),
            Err(IndexError::OutOfRange {
                frame: 1,
                offset: 100,
                len: 100
            })
        ));
    }
}
