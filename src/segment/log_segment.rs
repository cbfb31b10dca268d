//! In-memory segment descriptor
//!
//! Tracks the offset and timestamp ranges of one segment. The active
//! segment advances through `append`; segments discovered on disk are
//! described up front with `sealed`.

use std::fmt;

use parking_lot::RwLock;

use crate::error::{Result, SeglogError};
use crate::model::{Offset, Timestamp};

use super::Segment;

/// Mutable part of a segment (only changes while it is active)
#[derive(Debug, Clone, Copy)]
struct SegmentState {
    dirty_offset: Offset,
    base_timestamp: Timestamp,
    max_timestamp: Timestamp,
}

/// Offset and timestamp ranges of one log segment
///
/// ## Concurrency:
/// - `base_offset`: immutable, read without locking
/// - `state`: RwLock (readers never block each other, one appender at a time)
#[derive(Debug)]
pub struct LogSegment {
    /// First offset this segment may hold
    base_offset: Offset,

    /// Dirty offset and timestamp range
    state: RwLock<SegmentState>,
}

impl LogSegment {
    /// Create an empty, active segment starting at `base_offset`
    pub fn new(base_offset: Offset) -> Self {
        Self {
            base_offset,
            state: RwLock::new(SegmentState {
                dirty_offset: base_offset.prev(),
                base_timestamp: Timestamp::MISSING,
                max_timestamp: Timestamp::MISSING,
            }),
        }
    }

    /// Describe a segment whose contents are already known
    ///
    /// Both ranges are inclusive. Fails if either range is inverted, if
    /// `base_offset` is negative, or if `dirty_offset` leaves no room for a
    /// following offset.
    pub fn sealed(
        base_offset: Offset,
        dirty_offset: Offset,
        base_timestamp: Timestamp,
        max_timestamp: Timestamp,
    ) -> Result<Self> {
        if base_offset < Offset::default() {
            return Err(SeglogError::InvalidSegment(format!(
                "base offset {} is negative",
                base_offset
            )));
        }
        if dirty_offset > Offset::LAST_USABLE {
            return Err(SeglogError::InvalidSegment(format!(
                "dirty offset {} is past the last usable offset {}",
                dirty_offset,
                Offset::LAST_USABLE
            )));
        }
        if dirty_offset < base_offset {
            return Err(SeglogError::InvalidSegment(format!(
                "dirty offset {} is below base offset {}",
                dirty_offset, base_offset
            )));
        }
        if max_timestamp < base_timestamp {
            return Err(SeglogError::InvalidSegment(format!(
                "max timestamp {} is below base timestamp {}",
                max_timestamp, base_timestamp
            )));
        }

        Ok(Self {
            base_offset,
            state: RwLock::new(SegmentState {
                dirty_offset,
                base_timestamp,
                max_timestamp,
            }),
        })
    }

    /// Record that `offset` was written with `timestamp`
    ///
    /// Offsets must be dense: `offset` has to be exactly one past the
    /// current dirty offset.
    pub fn append(&self, offset: Offset, timestamp: Timestamp) -> Result<()> {
        let mut state = self.state.write();

        let expected = match state.dirty_offset.checked_next() {
            Some(expected) => expected,
            None => {
                return Err(SeglogError::InvalidSegment(format!(
                    "segment at {} has no offsets left",
                    self.base_offset
                )))
            }
        };
        if offset != expected {
            return Err(SeglogError::OffsetOutOfOrder {
                expected,
                got: offset,
            });
        }

        if offset == self.base_offset {
            state.base_timestamp = timestamp;
            state.max_timestamp = timestamp;
        } else {
            state.base_timestamp = state.base_timestamp.min(timestamp);
            state.max_timestamp = state.max_timestamp.max(timestamp);
        }
        state.dirty_offset = offset;

        Ok(())
    }

    /// Number of records in the segment
    pub fn record_count(&self) -> u64 {
        self.base_offset.span_to(self.state.read().dirty_offset)
    }
}

impl Segment for LogSegment {
    fn base_offset(&self) -> Offset {
        self.base_offset
    }

    fn dirty_offset(&self) -> Offset {
        self.state.read().dirty_offset
    }

    fn base_timestamp(&self) -> Timestamp {
        self.state.read().base_timestamp
    }

    fn max_timestamp(&self) -> Timestamp {
        self.state.read().max_timestamp
    }

    fn is_empty(&self) -> bool {
        self.state.read().dirty_offset < self.base_offset
    }
}

impl fmt::Display for LogSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Single snapshot so the rendering is self-consistent
        let state = *self.state.read();
        write!(
            f,
            "{{base_offset:{}, dirty_offset:{}, base_ts:{}, max_ts:{}, records:{}}}",
            self.base_offset,
            state.dirty_offset,
            state.base_timestamp,
            state.max_timestamp,
            self.base_offset.span_to(state.dirty_offset)
        )
    }
}
