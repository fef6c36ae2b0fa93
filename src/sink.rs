//! Event consumers and the loop that feeds them.
use crate::cursor::ByteCursor;
use crate::error::Error;
use crate::scanner::{Event, Scanner};

/// Consumer of scanner [Event]s.
pub trait Sink {
    /// Result of a completed run.
    type Output;

    /// Handle one event. An error stops the run.
    fn consume(&mut self, event: &Event) -> Result<(), Error>;

    /// Finalize after the stream ended cleanly.
    fn finish(self) -> Result<Self::Output, Error>;
}

/// Scan `cursor` to the end, pushing every event into `sink`.
///
/// The first scanner or sink error ends the run and `sink` is dropped without
/// being finished.
pub fn drive<C, S>(cursor: C, mut sink: S) -> Result<S::Output, Error>
where
    C: ByteCursor,
    S: Sink,
{
    for event in Scanner::new(cursor) {
        sink.consume(&event?)?;
    }

    sink.finish()
}
