//! Crate for walking the marker structure of JPEG and raw Motion-JPEG streams.
//!
//! A [Scanner] reads markers from any [ByteCursor], skipping segment payloads
//! and entropy-coded data, and yields one [Event] per marker. [drive] feeds
//! those events into a [Sink]: the [Reporter] prints them, the [Indexer]
//! records where each frame starts so a [FrameIndex] can later locate frames
//! in the stream without scanning it again.
pub mod cursor;
pub mod error;
pub mod index;
pub mod indexer;
pub mod logging;
pub mod marker;
pub mod reporter;
pub mod scanner;
pub mod sink;

pub use cursor::ByteCursor;
pub use error::{Error, IndexError, ScanError};
pub use index::{index_path, FrameIndex, INDEX_SUFFIX};
pub use indexer::Indexer;
pub use reporter::Reporter;
pub use scanner::{Event, Scanner};
pub use sink::{drive, Sink};
