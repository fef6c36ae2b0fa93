//! Marker stream scanner.
//!
//! [Scanner] walks a JPEG or raw M-JPEG stream marker by marker. Payloads of
//! length-prefixed markers are skipped with a relative seek, and after an [SOS]
//! the entropy-coded data is read byte by byte until a marker that ends the
//! scan. Stuffed bytes (`FF 00`) are dropped there, restart markers are
//! reported as immediates, and any other marker is backed up over so the next
//! step reads it like every other marker.
use crate::cursor::ByteCursor;
use crate::error::ScanError;
use crate::marker::{self, DNL, EOI, PREMARK, SOS, STUFFING};

/// Structural event found in a marker stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A marker outside entropy-coded data.
    Marker { marker: u8, offset: u64 },
    /// A marker embedded in entropy-coded data that doesn't end the scan.
    Immediate { marker: u8, offset: u64 },
}

impl Event {
    /// The marker code.
    pub fn marker(&self) -> u8 {
        match *self {
            Event::Marker { marker, .. } | Event::Immediate { marker, .. } => marker,
        }
    }

    /// Offset of the 0xFF byte directly before the marker code.
    pub fn offset(&self) -> u64 {
        match *self {
            Event::Marker { offset, .. } | Event::Immediate { offset, .. } => offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Expecting 0xFF and a marker code.
    Prefix,
    /// Marker reported, its length and payload not consumed yet.
    Payload(u8),
    /// Inside the entropy-coded data following an SOS segment.
    EntropyData,
    /// Immediate DNL reported, the scan fails next.
    DnlFound(u64),
    Done,
}

/// Iterator over the [Event]s of a marker stream.
///
/// Yields `Err` at most once, after which it yields nothing. An immediate
/// [DNL] is yielded as an event before the scan fails on it. Reaching the end
/// of the stream right after an [EOI] ends the iteration without an error.
pub struct Scanner<C> {
    cursor: C,
    state: State,
    eoi_read: bool,
}

impl<C: ByteCursor> Scanner<C> {
    pub fn new(cursor: C) -> Self {
        Self {
            cursor,
            state: State::Prefix,
            eoi_read: false,
        }
    }

    /// Consume the scanner, returning the cursor.
    pub fn into_inner(self) -> C {
        self.cursor
    }

    fn next_marker(&mut self) -> Result<Option<Event>, ScanError> {
        let first = match self.cursor.read_byte()? {
            Some(b) => b,
            None if self.eoi_read => {
                self.state = State::Done;
                return Ok(None);
            }
            None => return Err(ScanError::MissingEndOfImage),
        };

        if first != PREMARK {
            let offset = self.cursor.position()?.saturating_sub(1);
            return Err(ScanError::MissingPreMarker {
                offset,
                found: first,
            });
        }

        // Consume all of the fill bytes that precede the marker byte
        let code = loop {
            match self.cursor.read_byte()? {
                Some(PREMARK) => {}
                Some(b) => break b,
                None => return Err(ScanError::MissingMarker),
            }
        };

        let offset = self.marker_offset()?;
        self.state = State::Payload(code);

        Ok(Some(Event::Marker {
            marker: code,
            offset,
        }))
    }

    fn consume_payload(&mut self, code: u8) -> Result<(), ScanError> {
        if !marker::is_stand_alone(code) {
            let hi = self
                .cursor
                .read_byte()?
                .ok_or(ScanError::MissingLength { marker: code })?;
            let lo = self
                .cursor
                .read_byte()?
                .ok_or(ScanError::PartialLength { marker: code })?;

            // Length of marker section includes length bytes
            let length = u16::from_be_bytes([hi, lo]);
            if length < 2 {
                return Err(ScanError::LengthTooShort {
                    marker: code,
                    length,
                });
            }

            let skip = length - 2;
            if skip > 0 {
                log::trace!("skipping {} byte {} payload", skip, marker::name(code));
                self.cursor
                    .seek_relative(i64::from(skip))
                    .map_err(ScanError::Seek)?;
            }
        }

        self.eoi_read = code == EOI;
        self.state = if code == SOS {
            State::EntropyData
        } else {
            State::Prefix
        };

        Ok(())
    }

    fn next_in_scan(&mut self) -> Result<Option<Event>, ScanError> {
        loop {
            // Find next fill byte
            loop {
                match self.cursor.read_byte()? {
                    Some(PREMARK) => break,
                    Some(_) => {}
                    None => return Err(ScanError::EofInScan),
                }
            }

            let code = loop {
                match self.cursor.read_byte()? {
                    Some(PREMARK) => {}
                    Some(b) => break b,
                    None => return Err(ScanError::EofInScan),
                }
            };

            if code == STUFFING {
                continue;
            }

            let offset = self.marker_offset()?;
            if marker::is_immediate(code) {
                // Its payload isn't skipped, so nothing after it can be trusted
                if code == DNL {
                    self.state = State::DnlFound(offset);
                }
                return Ok(Some(Event::Immediate {
                    marker: code,
                    offset,
                }));
            }

            // Rewind the cursor so the marker is read again outside the scan
            log::trace!("scan ended by {} at offset {}", marker::name(code), offset);
            self.cursor.seek_relative(-2).map_err(ScanError::Seek)?;
            self.state = State::Prefix;

            return Ok(None);
        }
    }

    /// Offset of the 0xFF before the marker code just read.
    fn marker_offset(&mut self) -> Result<u64, ScanError> {
        Ok(self.cursor.position()?.saturating_sub(2))
    }

    fn step(&mut self) -> Result<Option<Event>, ScanError> {
        loop {
            match self.state {
                State::Done => return Ok(None),
                State::Prefix => return self.next_marker(),
                State::Payload(code) => self.consume_payload(code)?,
                State::DnlFound(offset) => return Err(ScanError::DnlUnsupported { offset }),
                State::EntropyData => {
                    if let Some(event) = self.next_in_scan()? {
                        return Ok(Some(event));
                    }
                }
            }
        }
    }
}

impl<C: ByteCursor> Iterator for Scanner<C> {
    type Item = Result<Event, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.step() {
            Ok(event) => event.map(Ok),
            Err(e) => {
                self.state = State::Done;
                Some(Err(e))
            }
        }
    }
}

impl<C: ByteCursor> std::iter::FusedIterator for Scanner<C> {}
