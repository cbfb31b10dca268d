//! Segment Module
//!
//! The narrow capability surface the segment index consumes from a log
//! segment, plus an in-memory segment descriptor that implements it.
//!
//! ## Ranges
//! ```text
//!   base_offset                      dirty_offset
//!       │                                 │
//!       ▼                                 ▼
//!   ┌───────┬───────┬───────┬─────────┬───────┐
//!   │ rec 0 │ rec 1 │ rec 2 │   ...   │ rec N │   both ends inclusive
//!   └───────┴───────┴───────┴─────────┴───────┘
//!   base_timestamp ..................... max_timestamp
//! ```
//!
//! An empty segment has `dirty_offset == base_offset - 1`; its ranges are
//! not meaningful and it never contains any needle.

mod log_segment;

use std::fmt::Display;
use std::sync::Arc;

use crate::model::{Offset, Timestamp};

pub use log_segment::LogSegment;

/// Shared-ownership reference to a segment.
///
/// The index holds one of these per member but is never assumed to be the
/// only holder: uploaders, compactors and readers keep their own clones.
pub type SegmentHandle<S> = Arc<S>;

/// What the segment index needs to know about a segment
///
/// `dirty_offset` and `max_timestamp` may advance while the segment is the
/// active one; everything else is fixed once the segment holds a record.
pub trait Segment: Display + Send + Sync {
    /// First record offset (fixed at creation)
    fn base_offset(&self) -> Offset;

    /// Last record offset written so far (inclusive)
    fn dirty_offset(&self) -> Offset;

    /// Lowest record timestamp (inclusive)
    fn base_timestamp(&self) -> Timestamp;

    /// Highest record timestamp (inclusive)
    fn max_timestamp(&self) -> Timestamp;

    /// True if the segment holds zero records
    fn is_empty(&self) -> bool;
}
