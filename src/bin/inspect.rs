//! Seglog Inspect Binary
//!
//! Loads a partition from segment descriptors and runs lookups against it.

use std::str::FromStr;
use std::sync::Arc;

use clap::Parser;
use seglog::{Config, LogSegment, Offset, Partition, SeglogError, Timestamp};
use tracing_subscriber::{fmt, EnvFilter};

/// Seglog Inspect
#[derive(Parser, Debug)]
#[command(name = "seglog-inspect")]
#[command(about = "Load segment descriptors and query the segment index")]
#[command(version)]
struct Args {
    /// Partition name used in log output
    #[arg(short, long, default_value = "inspect/0")]
    partition: String,

    /// Segment descriptor BASE:DIRTY:BASE_TS:MAX_TS (repeatable, any order)
    #[arg(short, long = "segment")]
    segments: Vec<SegmentArg>,

    /// Records per segment before rolling
    #[arg(long, default_value = "100000")]
    max_segment_records: u64,

    /// Segments kept by retention (0 = unlimited)
    #[arg(long, default_value = "0")]
    retention_max_segments: usize,

    /// Append a record with this timestamp before querying (repeatable)
    #[arg(short, long = "append")]
    appends: Vec<i64>,

    /// Offset to look up (repeatable)
    #[arg(short, long = "offset")]
    offsets: Vec<i64>,

    /// Timestamp to look up (repeatable)
    #[arg(short, long = "timestamp")]
    timestamps: Vec<i64>,
}

/// Parsed `BASE:DIRTY:BASE_TS:MAX_TS`
#[derive(Debug, Clone, Copy)]
struct SegmentArg {
    base_offset: i64,
    dirty_offset: i64,
    base_timestamp: i64,
    max_timestamp: i64,
}

impl FromStr for SegmentArg {
    type Err = SeglogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s
            .split(':')
            .map(|field| field.trim().parse::<i64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SeglogError::InvalidSegment(format!("{}: {}", s, e)))?;

        match fields.as_slice() {
            [base_offset, dirty_offset, base_timestamp, max_timestamp] => Ok(Self {
                base_offset: *base_offset,
                dirty_offset: *dirty_offset,
                base_timestamp: *base_timestamp,
                max_timestamp: *max_timestamp,
            }),
            _ => Err(SeglogError::InvalidSegment(format!(
                "{}: expected BASE:DIRTY:BASE_TS:MAX_TS",
                s
            ))),
        }
    }
}

impl SegmentArg {
    fn into_segment(self) -> seglog::Result<LogSegment> {
        LogSegment::sealed(
            Offset::new(self.base_offset),
            Offset::new(self.dirty_offset),
            Timestamp::new(self.base_timestamp),
            Timestamp::new(self.max_timestamp),
        )
    }
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,seglog=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    tracing::info!("Seglog Inspect v{}", seglog::VERSION);

    if let Err(e) = run(args) {
        tracing::error!("Inspect failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> seglog::Result<()> {
    let config = Config::builder()
        .partition_name(&args.partition)
        .max_segment_records(args.max_segment_records)
        .retention_max_segments(args.retention_max_segments)
        .build();

    let discovered = args
        .segments
        .iter()
        .map(|arg| arg.into_segment().map(Arc::new))
        .collect::<seglog::Result<Vec<_>>>()?;

    let partition = Partition::open(config, discovered)?;

    for &ts in &args.appends {
        let offset = partition.append(Timestamp::new(ts))?;
        println!("appended ts={} at offset={}", ts, offset);
    }

    println!("{}", partition);

    for &offset in &args.offsets {
        match partition.segment_for_offset(Offset::new(offset)) {
            Some(segment) => println!("offset {} -> {}", offset, segment),
            None => println!("offset {} -> not found", offset),
        }
    }

    for &ts in &args.timestamps {
        match partition.segment_for_timestamp(Timestamp::new(ts)) {
            Some(segment) => println!("timestamp {} -> {}", ts, segment),
            None => println!("timestamp {} -> not found", ts),
        }
    }

    Ok(())
}
