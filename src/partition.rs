//! Partition Module
//!
//! Owns one partition's segment set and serializes every structural
//! mutation of it.
//!
//! ## Responsibilities
//! - Load discovered segments (any order) into a sorted segment set
//! - Assign offsets to appended records, rolling a new active segment when
//!   the current one is full
//! - Evict old segments (retention by count, or by offset)
//! - Answer offset/timestamp lookups with shared segment handles

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use parking_lot::RwLock;

use crate::config::Config;
use crate::error::{Result, SeglogError};
use crate::model::{Offset, Timestamp};
use crate::segment::{LogSegment, Segment, SegmentHandle};
use crate::segment_set::SegmentSet;

/// One partition's log
///
/// ## Concurrency Model: Single-Writer / Multiple-Reader (SWMR)
///
/// - **Mutations** (append/roll/evict/discard): take the write lock on
///   `segments`, so only one runs at a time and the set is never observed
///   half-changed
/// - **Lookups**: take the read lock, clone the matching handle and
///   release the lock; the caller keeps the segment alive on its own
/// - `next_offset`: written under the write lock, readable lock-free
pub struct Partition {
    /// Partition configuration
    config: Config,

    /// Ordered segments, newest (active) at the back
    segments: RwLock<SegmentSet<LogSegment>>,

    /// Offset the next appended record receives
    next_offset: AtomicI64,
}

impl Partition {
    /// Open a partition over segments discovered on load
    ///
    /// On startup:
    /// 1. Validate config
    /// 2. Sort discovered segments by base offset
    /// 3. Reject overlapping neighbours and negative offsets; only the last
    ///    segment may be empty
    /// 4. Resume offsets after the last segment
    pub fn open(config: Config, discovered: Vec<SegmentHandle<LogSegment>>) -> Result<Self> {
        config.validate()?;

        let segments = SegmentSet::new(discovered);

        if let Some(front) = segments.front() {
            if front.base_offset() < Offset::default() {
                return Err(SeglogError::Partition(format!(
                    "negative base offset in {}: {}",
                    config.partition_name, front
                )));
            }
        }

        for (prev, next) in segments.iter().zip(segments.iter().skip(1)) {
            // Only the active (last) segment may be empty
            if prev.is_empty() {
                return Err(SeglogError::Partition(format!(
                    "empty segment before the active one in {}: {} and {}",
                    config.partition_name, prev, next
                )));
            }
            if next.base_offset() <= prev.dirty_offset() {
                return Err(SeglogError::Partition(format!(
                    "overlapping segments in {}: {} and {}",
                    config.partition_name, prev, next
                )));
            }
        }

        let next_offset = match segments.back() {
            Some(last) => last.dirty_offset().checked_next().ok_or_else(|| {
                SeglogError::Partition(format!(
                    "offset space exhausted in {}: {}",
                    config.partition_name, last
                ))
            })?,
            None => Offset::default(),
        };

        tracing::info!(
            partition = %config.partition_name,
            segments = segments.len(),
            next_offset = %next_offset,
            "partition opened"
        );

        Ok(Self {
            config,
            segments: RwLock::new(segments),
            next_offset: AtomicI64::new(next_offset.value()),
        })
    }

    /// Open an empty partition
    pub fn create(config: Config) -> Result<Self> {
        Self::open(config, Vec::new())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Append one record and return the offset it was assigned
    ///
    /// Rolls a new active segment first if there is none or the current one
    /// already holds `max_segment_records`.
    pub fn append(&self, timestamp: Timestamp) -> Result<Offset> {
        let mut segments = self.segments.write();
        let offset = self.next_offset();

        let writable = segments
            .back()
            .filter(|active| active.record_count() < self.config.max_segment_records)
            .cloned();
        let active = match writable {
            Some(active) => active,
            None => self.roll_locked(&mut segments),
        };

        let following = offset.checked_next().ok_or_else(|| {
            SeglogError::Partition(format!(
                "offset space exhausted in {} at {}",
                self.config.partition_name, offset
            ))
        })?;

        active.append(offset, timestamp)?;
        self.next_offset.store(following.value(), Ordering::Release);

        Ok(offset)
    }

    /// Start a new, empty active segment at the next offset
    ///
    /// If the current active segment is still empty it is reused instead.
    pub fn roll(&self) -> SegmentHandle<LogSegment> {
        let mut segments = self.segments.write();
        self.roll_locked(&mut segments)
    }

    /// Drop the active segment if it holds no records
    ///
    /// Returns the discarded handle, or `None` if the active segment has
    /// data (or there is none).
    pub fn discard_active(&self) -> Option<SegmentHandle<LogSegment>> {
        let mut segments = self.segments.write();

        if !segments.back()?.is_empty() {
            return None;
        }

        let discarded = segments.pop_back()?;
        tracing::debug!(
            partition = %self.config.partition_name,
            base_offset = %discarded.base_offset(),
            "discarded empty active segment"
        );
        Some(discarded)
    }

    /// Evict every segment that lies entirely below `offset`
    ///
    /// The active segment is never evicted. Returns the evicted handles,
    /// oldest first.
    pub fn evict_before(&self, offset: Offset) -> Vec<SegmentHandle<LogSegment>> {
        let mut segments = self.segments.write();
        let mut evicted = Vec::new();

        while segments.len() > 1 {
            match segments.front() {
                Some(front) if front.dirty_offset() < offset => {}
                _ => break,
            }
            if let Some(front) = segments.pop_front() {
                evicted.push(front);
            }
        }

        if !evicted.is_empty() {
            tracing::debug!(
                partition = %self.config.partition_name,
                evicted = evicted.len(),
                before = %offset,
                "evicted segments by offset"
            );
        }
        evicted
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Segment holding `offset`, if any
    pub fn segment_for_offset(&self, offset: Offset) -> Option<SegmentHandle<LogSegment>> {
        self.segments.read().lower_bound(offset).cloned()
    }

    /// Segment whose timestamp range holds `timestamp`, if any
    pub fn segment_for_timestamp(&self, timestamp: Timestamp) -> Option<SegmentHandle<LogSegment>> {
        self.segments.read().lower_bound(timestamp).cloned()
    }

    /// Segments a reader starting at `offset` has to visit, in order
    ///
    /// Empty if `offset` is not covered by any segment.
    pub fn segments_from(&self, offset: Offset) -> Vec<SegmentHandle<LogSegment>> {
        self.segments.read().iter_from(offset).cloned().collect()
    }

    /// Snapshot of all segment handles, oldest first
    pub fn segments(&self) -> Vec<SegmentHandle<LogSegment>> {
        self.segments.read().iter().cloned().collect()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.read().is_empty()
    }

    /// Base offset of the oldest retained segment
    pub fn start_offset(&self) -> Option<Offset> {
        self.segments.read().front().map(|s| s.base_offset())
    }

    /// Offset the next appended record will receive
    pub fn next_offset(&self) -> Offset {
        Offset::new(self.next_offset.load(Ordering::Acquire))
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Roll with the write lock held, then apply count retention
    fn roll_locked(&self, segments: &mut SegmentSet<LogSegment>) -> SegmentHandle<LogSegment> {
        if let Some(active) = segments.back() {
            if active.is_empty() {
                return SegmentHandle::clone(active);
            }
        }

        let segment = SegmentHandle::new(LogSegment::new(self.next_offset()));
        segments.add(SegmentHandle::clone(&segment));

        tracing::debug!(
            partition = %self.config.partition_name,
            base_offset = %segment.base_offset(),
            "rolled new active segment"
        );

        self.apply_retention_locked(segments);
        segment
    }

    /// Evict from the front while more than `retention_max_segments` remain
    fn apply_retention_locked(&self, segments: &mut SegmentSet<LogSegment>) {
        let limit = self.config.retention_max_segments;
        if limit == 0 {
            return;
        }

        while segments.len() > limit {
            if let Some(evicted) = segments.pop_front() {
                tracing::debug!(
                    partition = %self.config.partition_name,
                    base_offset = %evicted.base_offset(),
                    "evicted segment by retention"
                );
            }
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segments = self.segments.read();
        write!(f, "{} {}", self.config.partition_name, *segments)
    }
}
