//! Segment Set
//!
//! Ordered collection of segment handles, mutated only at its ends.

use std::collections::vec_deque::{self, VecDeque};
use std::fmt;

use crate::segment::{Segment, SegmentHandle};

use super::lookup::segments_lower_bound;
use super::ordering::{compare_segments, Needle};

/// The ordered segments of one partition
///
/// ## Invariants (between mutations):
/// - Strictly ascending by `base_offset`
/// - Adjacent segments never overlap: `next.base_offset > prev.dirty_offset`
/// - Segments are added only at the back and removed only from either end
///
/// ## Concurrency:
/// No internal locking. The owning partition serializes mutations; lookups
/// take `&self` and may run concurrently with each other.
#[derive(Debug)]
pub struct SegmentSet<S: Segment> {
    handles: VecDeque<SegmentHandle<S>>,
}

impl<S: Segment> SegmentSet<S> {
    /// Build a set from segments in any order
    ///
    /// Directory scans do not return segments in offset order, so the
    /// handles are sorted by `base_offset` here.
    pub fn new(mut segments: Vec<SegmentHandle<S>>) -> Self {
        segments.sort_by(|a, b| compare_segments(&**a, &**b));
        Self {
            handles: VecDeque::from(segments),
        }
    }

    /// Append a segment at the back
    ///
    /// # Panics
    /// If the new segment's `base_offset` is not strictly greater than the
    /// current last segment's `dirty_offset`, or than its `base_offset` when
    /// the last segment is empty. Out-of-order segments mean the log writer
    /// is already corrupt; there is nothing safe to recover to.
    pub fn add(&mut self, segment: SegmentHandle<S>) {
        if let Some(last) = self.handles.back() {
            let base = segment.base_offset();
            let bound = last.dirty_offset().max(last.base_offset());
            if base <= bound {
                let message = format!(
                    "New segments must be monotonically increasing. Assertion failure: \
                     ({} > {}) Got:{} - Current:{}",
                    base, bound, segment, self
                );
                tracing::error!("{}", message);
                panic!("{}", message);
            }
        }

        tracing::debug!(
            base_offset = %segment.base_offset(),
            size = self.handles.len() + 1,
            "segment added"
        );
        self.handles.push_back(segment);
    }

    /// Remove the oldest segment
    pub fn pop_front(&mut self) -> Option<SegmentHandle<S>> {
        self.handles.pop_front()
    }

    /// Remove the newest segment
    pub fn pop_back(&mut self) -> Option<SegmentHandle<S>> {
        self.handles.pop_back()
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Find the segment whose closed range contains `needle`
    ///
    /// `needle` is either an [`Offset`](crate::model::Offset), matched
    /// against `[base_offset, dirty_offset]`, or a
    /// [`Timestamp`](crate::model::Timestamp), matched against
    /// `[base_timestamp, max_timestamp]`.
    ///
    /// Returns `None` when no segment covers the needle: before the first
    /// segment, inside a compaction gap, or past the end of the data. Empty
    /// segments are never returned.
    pub fn lower_bound<N: Needle>(&self, needle: N) -> Option<&SegmentHandle<S>> {
        self.position(needle).map(|idx| &self.handles[idx])
    }

    /// Mutable form of [`lower_bound`](Self::lower_bound)
    ///
    /// Resolves through the same search, so both forms always agree. A
    /// handle swapped in through the returned reference must cover the same
    /// range as the one it replaces.
    pub fn lower_bound_mut<N: Needle>(&mut self, needle: N) -> Option<&mut SegmentHandle<S>> {
        self.position(needle).map(move |idx| &mut self.handles[idx])
    }

    /// Index of the segment containing `needle`
    pub fn position<N: Needle>(&self, needle: N) -> Option<usize> {
        segments_lower_bound(&self.handles, needle)
    }

    /// Iterate forward starting at the segment containing `needle`
    ///
    /// Yields nothing on a miss.
    pub fn iter_from<N: Needle>(&self, needle: N) -> vec_deque::Iter<'_, SegmentHandle<S>> {
        let start = self.position(needle).unwrap_or(self.handles.len());
        self.handles.range(start..)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of segments
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Oldest segment
    pub fn front(&self) -> Option<&SegmentHandle<S>> {
        self.handles.front()
    }

    /// Newest segment (the active one, while the partition is writable)
    pub fn back(&self) -> Option<&SegmentHandle<S>> {
        self.handles.back()
    }

    pub fn get(&self, index: usize) -> Option<&SegmentHandle<S>> {
        self.handles.get(index)
    }

    /// Iterate front to back
    pub fn iter(&self) -> vec_deque::Iter<'_, SegmentHandle<S>> {
        self.handles.iter()
    }

    /// Release the handles, oldest first
    ///
    /// Used on unload; other holders keep their own references alive.
    pub fn into_inner(self) -> VecDeque<SegmentHandle<S>> {
        self.handles
    }
}

impl<S: Segment> Default for SegmentSet<S> {
    fn default() -> Self {
        Self {
            handles: VecDeque::new(),
        }
    }
}

impl<S: Segment> FromIterator<SegmentHandle<S>> for SegmentSet<S> {
    fn from_iter<I: IntoIterator<Item = SegmentHandle<S>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, S: Segment> IntoIterator for &'a SegmentSet<S> {
    type Item = &'a SegmentHandle<S>;
    type IntoIter = vec_deque::Iter<'a, SegmentHandle<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.handles.iter()
    }
}

impl<S: Segment> fmt::Display for SegmentSet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{size: {}, [", self.handles.len())?;
        for (i, segment) in self.handles.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", segment)?;
        }
        write!(f, "]}}")
    }
}
