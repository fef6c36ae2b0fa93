//! Human-readable marker trace.
use std::io::Write;

use crate::error::Error;
use crate::marker::{self, SOI};
use crate::scanner::Event;
use crate::sink::Sink;

/// Prints every marker by name and counts frames.
///
/// ```text
/// SOI
/// DQT
/// SOS
///   RST0 (immediate)
/// EOI
///
/// SOI
/// ...
/// Frames: 2
/// ```
pub struct Reporter<W: Write> {
    out: W,
    frames: u64,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    /// Frames seen so far. Stops counting at `u64::MAX`.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl<W: Write> Sink for Reporter<W> {
    type Output = u64;

    fn consume(&mut self, event: &Event) -> Result<(), Error> {
        match *event {
            Event::Marker { marker, .. } => {
                if marker == SOI {
                    // Blank line between frames
                    if self.frames > 0 {
                        writeln!(self.out)?;
                    }
                    self.frames = self.frames.saturating_add(1);
                }
                writeln!(self.out, "{}", marker::name(marker))?;
            }
            Event::Immediate { marker, .. } => {
                writeln!(self.out, "  {} (immediate)", marker::name(marker))?;
            }
        }

        Ok(())
    }

    fn finish(mut self) -> Result<u64, Error> {
        if self.frames == u64::MAX {
            writeln!(self.out, "Frames: overflow (more than {})", u64::MAX - 1)?;
        } else {
            writeln!(self.out, "Frames: {}", self.frames)?;
        }
        self.out.flush()?;

        Ok(self.frames)
    }
}
