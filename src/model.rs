//! Offset and timestamp types
//!
//! The two key spaces a partition is indexed by. They are distinct types so
//! a lookup can never confuse one axis for the other.

use std::fmt;

/// Position of a record within a partition's log.
///
/// Signed so that an empty segment can report `base - 1` as its dirty
/// offset, including `-1` for a segment based at offset 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Offset(pub i64);

impl Offset {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    /// Largest offset that still has a successor
    pub const LAST_USABLE: Offset = Offset(i64::MAX - 1);

    /// The offset immediately before this one
    ///
    /// Saturates at `i64::MIN`.
    pub const fn prev(self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    /// The offset immediately after this one
    ///
    /// Saturates at `i64::MAX`; use [`checked_next`](Self::checked_next)
    /// where running out of offsets has to be reported.
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The offset immediately after this one, or `None` on overflow
    pub const fn checked_next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Number of offsets in the closed range `[self, last]`
    ///
    /// Zero when `last < self`. Never overflows.
    pub fn span_to(self, last: Offset) -> u64 {
        if last < self {
            return 0;
        }
        (last.0 as i128 - self.0 as i128 + 1).min(u64::MAX as i128) as u64
    }
}

impl From<i64> for Offset {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wall-clock record timestamp, in unix milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Reported by a segment that has no records yet
    pub const MISSING: Timestamp = Timestamp(-1);

    pub const fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn millis(self) -> i64 {
        self.0
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Self(millis)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
