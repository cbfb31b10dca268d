//! Configuration for Seglog
//!
//! Centralized partition configuration with sensible defaults.

use crate::error::{Result, SeglogError};

/// Configuration for one partition's log
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Identity
    // -------------------------------------------------------------------------
    /// Name used in log output (e.g. "orders/3")
    pub partition_name: String,

    // -------------------------------------------------------------------------
    // Segment Configuration
    // -------------------------------------------------------------------------
    /// Records per segment before a new active segment is rolled
    pub max_segment_records: u64,

    // -------------------------------------------------------------------------
    // Retention Configuration
    // -------------------------------------------------------------------------
    /// Oldest segments are evicted once more than this many exist (0 = keep all)
    pub retention_max_segments: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            partition_name: "default/0".to_string(),
            max_segment_records: 100_000,
            retention_max_segments: 0,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the values are usable
    pub fn validate(&self) -> Result<()> {
        if self.partition_name.is_empty() {
            return Err(SeglogError::Config(
                "partition_name must not be empty".to_string(),
            ));
        }
        if self.max_segment_records == 0 {
            return Err(SeglogError::Config(
                "max_segment_records must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the partition name used in logs
    pub fn partition_name(mut self, name: impl Into<String>) -> Self {
        self.config.partition_name = name.into();
        self
    }

    /// Set how many records a segment holds before rolling
    pub fn max_segment_records(mut self, count: u64) -> Self {
        self.config.max_segment_records = count;
        self
    }

    /// Set how many segments retention keeps (0 = unlimited)
    pub fn retention_max_segments(mut self, count: usize) -> Self {
        self.config.retention_max_segments = count;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
