//! Closed-interval lower bound
//!
//! A binary search finds the first non-empty segment whose upper bound is
//! >= the needle. Upper bounds are inclusive, so that landing spot is either
//! the containing segment or one past it, and when the search runs off the
//! end the needle may still belong to the last non-empty segment. At most
//! two candidates are checked, never a scan.
//!
//! Empty segments carry no range (their timestamps are `MISSING`), so they
//! have no place in the ordering. The search steps over them: a probe that
//! lands on one moves left to the nearest non-empty segment inside the
//! current window. Empty segments normally sit only at the back, so this
//! costs nothing in the common case.

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::segment::{Segment, SegmentHandle};

use super::ordering::{compare_to_needle, Needle};

/// Index of the segment containing `needle`, or `None` for a miss
pub(crate) fn segments_lower_bound<S, N>(
    segments: &VecDeque<SegmentHandle<S>>,
    needle: N,
) -> Option<usize>
where
    S: Segment,
    N: Needle,
{
    let idx = partition_point_non_empty(segments, needle);

    let candidate = if idx == segments.len() {
        prev_non_empty(segments, idx)?
    } else {
        idx
    };

    if needle.is_within(&*segments[candidate]) {
        return Some(candidate);
    }

    // Predecessor
    match prev_non_empty(segments, candidate) {
        Some(prev) if needle.is_within(&*segments[prev]) => Some(prev),
        _ => None,
    }
}

/// First non-empty segment whose upper bound is not below `needle`
///
/// Returns `segments.len()` if there is none. Never returns the index of an
/// empty segment.
fn partition_point_non_empty<S, N>(segments: &VecDeque<SegmentHandle<S>>, needle: N) -> usize
where
    S: Segment,
    N: Needle,
{
    let mut lo = 0;
    let mut hi = segments.len();

    while lo < hi {
        let mid = lo + (hi - lo) / 2;

        let mut pivot = mid;
        while pivot > lo && segments[pivot].is_empty() {
            pivot -= 1;
        }

        let segment = &*segments[pivot];
        if segment.is_empty() || compare_to_needle(segment, needle) == Ordering::Less {
            // Everything in [lo, mid] is empty or below the needle
            lo = mid + 1;
        } else {
            hi = pivot;
        }
    }

    lo
}

/// Nearest non-empty segment strictly before `idx`
fn prev_non_empty<S: Segment>(segments: &VecDeque<SegmentHandle<S>>, idx: usize) -> Option<usize> {
    (0..idx).rev().find(|&i| !segments[i].is_empty())
}
