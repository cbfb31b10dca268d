//! # Seglog
//!
//! The segment index of a log-structured partition store:
//! - Ordered set of immutable log segments making up one partition
//! - Offset lookup: which segment holds record X
//! - Timestamp lookup: which segment holds time T
//! - Single-writer/multi-reader partition wrapper that rolls and evicts
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Partition                             │
//! │         (append / roll / evict under a write lock)          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       SegmentSet                             │
//! │   sorted by base offset, add at back, pop at either end     │
//! │        lower_bound(Offset) / lower_bound(Timestamp)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  Arc<S: Segment>
//!          ┌────────────┼────────────┐
//!          ▼            ▼            ▼
//!   ┌────────────┐┌────────────┐┌────────────┐
//!   │  Segment   ││  Segment   ││  Segment   │  (shared with readers,
//!   │  [0, 99]   ││ [100, 199] ││ [300, 399] │   uploaders, compactors)
//!   └────────────┘└────────────┘└────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod model;
pub mod segment;
pub mod segment_set;
pub mod partition;
pub mod remote;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, SeglogError};
pub use config::Config;
pub use model::{Offset, Timestamp};
pub use segment::{LogSegment, Segment, SegmentHandle};
pub use segment_set::SegmentSet;
pub use partition::Partition;
pub use remote::ErrorOutcome;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Seglog
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
