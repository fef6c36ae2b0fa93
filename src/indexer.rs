//! Frame index builder.
use std::io::{Seek, SeekFrom, Write};

use crate::error::Error;
use crate::index::write_u64_be;
use crate::marker::SOI;
use crate::scanner::Event;
use crate::sink::Sink;

/// Writes the offset of every frame start into a frame index.
///
/// The count header is written as zero up front and only filled in by
/// [finish](Sink::finish), so an index left by a failed run is recognizably
/// incomplete.
pub struct Indexer<W: Write + Seek> {
    out: W,
    frames: u64,
    last_offset: Option<u64>,
}

impl<W: Write + Seek> Indexer<W> {
    /// Start an index by writing the placeholder count. `out` must be
    /// positioned at its start.
    pub fn new(mut out: W) -> Result<Self, Error> {
        write_u64_be(&mut out, 0)?;

        Ok(Self {
            out,
            frames: 0,
            last_offset: None,
        })
    }

    /// Frames recorded so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Consume the indexer without finishing, returning the output.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Seek> Sink for Indexer<W> {
    type Output = u64;

    fn consume(&mut self, event: &Event) -> Result<(), Error> {
        let offset = match *event {
            Event::Marker {
                marker: SOI,
                offset,
            } => offset,
            _ => return Ok(()),
        };

        if let Some(previous) = self.last_offset {
            if offset <= previous {
                return Err(Error::OffsetOrder { offset, previous });
            }
        }

        self.frames = self.frames.checked_add(1).ok_or(Error::TooManyFrames)?;
        write_u64_be(&mut self.out, offset)?;
        self.last_offset = Some(offset);
        log::debug!("frame {} starts at offset {}", self.frames, offset);

        Ok(())
    }

    fn finish(mut self) -> Result<u64, Error> {
        if self.frames == 0 {
            return Err(Error::NoFrames);
        }

        self.out.seek(SeekFrom::Start(0))?;
        write_u64_be(&mut self.out, self.frames)?;
        self.out.flush()?;

        Ok(self.frames)
    }
}
