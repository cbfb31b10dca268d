//! Ordering relation
//!
//! One relation, three comparisons, all consistent with ascending
//! `base_offset` order:
//! - segment vs segment: by `base_offset`
//! - segment vs offset needle: the segment's `dirty_offset` vs the needle
//! - segment vs timestamp needle: the segment's `max_timestamp` vs the needle

use std::cmp::Ordering;
use std::fmt::Display;

use crate::model::{Offset, Timestamp};
use crate::segment::Segment;

/// A key that segments can be searched by
///
/// Each axis names the closed interval a segment covers on it. The upper
/// end drives the binary search, the whole interval drives containment.
pub trait Needle: Copy + Ord + Display {
    /// Inclusive lower end of the segment's range on this axis
    fn range_start<S: Segment + ?Sized>(segment: &S) -> Self;

    /// Inclusive upper end of the segment's range on this axis
    fn range_end<S: Segment + ?Sized>(segment: &S) -> Self;

    /// Whether the segment covers this needle
    ///
    /// An empty segment covers nothing, whatever its nominal range says.
    fn is_within<S: Segment + ?Sized>(self, segment: &S) -> bool {
        if segment.is_empty() {
            return false;
        }
        Self::range_start(segment) <= self && self <= Self::range_end(segment)
    }
}

impl Needle for Offset {
    fn range_start<S: Segment + ?Sized>(segment: &S) -> Self {
        segment.base_offset()
    }

    fn range_end<S: Segment + ?Sized>(segment: &S) -> Self {
        segment.dirty_offset()
    }
}

impl Needle for Timestamp {
    fn range_start<S: Segment + ?Sized>(segment: &S) -> Self {
        segment.base_timestamp()
    }

    fn range_end<S: Segment + ?Sized>(segment: &S) -> Self {
        segment.max_timestamp()
    }
}

/// Segment vs segment
pub fn compare_segments<S: Segment + ?Sized>(a: &S, b: &S) -> Ordering {
    a.base_offset().cmp(&b.base_offset())
}

/// Segment vs needle
pub fn compare_to_needle<S: Segment + ?Sized, N: Needle>(segment: &S, needle: N) -> Ordering {
    N::range_end(segment).cmp(&needle)
}
