//! Segment Set Module
//!
//! The segment index of a partition: which segment holds offset X, which
//! segment holds timestamp T.
//!
//! ## Responsibilities
//! - Keep segments sorted by base offset, with no overlap between neighbours
//! - Add at the back, remove from either end
//! - Answer offset and timestamp lookups with one binary search and at most
//!   two containment checks
//!
//! ## Lookup
//! ```text
//!   needle = 250
//!
//!   ┌──────────┐ ┌──────────┐           ┌──────────┐
//!   │ [0, 99]  │ │[100, 199]│    gap    │[300, 399]│
//!   └──────────┘ └──────────┘           └──────────┘
//!                     ▲                      ▲
//!                     │                      └── first dirty_offset >= 250
//!                     └── predecessor, checked if the first misses
//!
//!   neither contains 250 → None
//! ```

mod lookup;
mod ordering;
mod set;

pub use ordering::{compare_segments, compare_to_needle, Needle};
pub use set::SegmentSet;
