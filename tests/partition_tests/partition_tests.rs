//! Tests for Partition
//!
//! These tests verify:
//! - Opening over discovered segments (any order) and resuming offsets
//! - Offset assignment and segment rolling on append
//! - Retention by segment count and by offset
//! - Discarding an empty active segment
//! - Lookups returning shared handles
//! - Concurrent readers alongside a single writer

use std::sync::Arc;
use std::thread;

use seglog::{
    Config, LogSegment, Offset, Partition, Segment, SegmentHandle, SeglogError, Timestamp,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn seg(base: i64, dirty: i64, base_ts: i64, max_ts: i64) -> SegmentHandle<LogSegment> {
    Arc::new(
        LogSegment::sealed(
            Offset::new(base),
            Offset::new(dirty),
            Timestamp::new(base_ts),
            Timestamp::new(max_ts),
        )
        .unwrap(),
    )
}

fn config_with_segment_records(records: u64) -> Config {
    Config::builder()
        .partition_name("test/0")
        .max_segment_records(records)
        .build()
}

fn base_offsets(partition: &Partition) -> Vec<i64> {
    partition
        .segments()
        .iter()
        .map(|s| s.base_offset().value())
        .collect()
}

fn append_n(partition: &Partition, count: i64) {
    for i in 0..count {
        partition.append(Timestamp::new(1000 + i)).unwrap();
    }
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_create_empty() {
    let partition = Partition::create(Config::default()).unwrap();

    assert!(partition.is_empty());
    assert_eq!(partition.len(), 0);
    assert_eq!(partition.next_offset(), Offset::new(0));
    assert_eq!(partition.start_offset(), None);
}

#[test]
fn test_open_sorts_discovered_segments() {
    let partition = Partition::open(
        Config::default(),
        vec![
            seg(300, 399, 30, 39),
            seg(0, 99, 0, 9),
            seg(100, 199, 10, 19),
        ],
    )
    .unwrap();

    assert_eq!(base_offsets(&partition), vec![0, 100, 300]);
    assert_eq!(partition.start_offset(), Some(Offset::new(0)));
    assert_eq!(partition.next_offset(), Offset::new(400));
}

#[test]
fn test_open_rejects_overlap() {
    let result = Partition::open(
        Config::default(),
        vec![seg(0, 99, 0, 9), seg(50, 149, 5, 14)],
    );

    assert!(matches!(result, Err(SeglogError::Partition(_))));
}

#[test]
fn test_open_rejects_empty_segment_sharing_base_with_next() {
    let result = Partition::open(
        Config::default(),
        vec![
            seg(0, 99, 0, 9),
            Arc::new(LogSegment::new(Offset::new(100))),
            seg(100, 199, 10, 19),
        ],
    );

    assert!(matches!(result, Err(SeglogError::Partition(_))));
}

#[test]
fn test_open_rejects_empty_segment_before_last() {
    let result = Partition::open(
        Config::default(),
        vec![
            seg(0, 99, 0, 9),
            Arc::new(LogSegment::new(Offset::new(100))),
            seg(200, 299, 20, 29),
        ],
    );

    assert!(matches!(result, Err(SeglogError::Partition(_))));
}

#[test]
fn test_open_rejects_negative_base() {
    let result = Partition::open(
        Config::default(),
        vec![Arc::new(LogSegment::new(Offset::new(-10)))],
    );

    assert!(matches!(result, Err(SeglogError::Partition(_))));
}

#[test]
fn test_append_reports_exhausted_offsets() {
    let partition = Partition::open(
        Config::default(),
        vec![seg(0, i64::MAX - 2, 0, 9)],
    )
    .unwrap();

    let last = partition.append(Timestamp::new(10)).unwrap();
    assert_eq!(last, Offset::LAST_USABLE);

    let result = partition.append(Timestamp::new(11));
    assert!(matches!(result, Err(SeglogError::Partition(_))));
    assert_eq!(partition.next_offset(), Offset::new(i64::MAX));
}

#[test]
fn test_open_rejects_invalid_config() {
    let result = Partition::create(config_with_segment_records(0));

    assert!(matches!(result, Err(SeglogError::Config(_))));
}

#[test]
fn test_open_with_empty_active_segment() {
    let partition = Partition::open(
        Config::default(),
        vec![seg(0, 99, 0, 9), Arc::new(LogSegment::new(Offset::new(100)))],
    )
    .unwrap();

    assert_eq!(partition.next_offset(), Offset::new(100));

    let offset = partition.append(Timestamp::new(10)).unwrap();
    assert_eq!(offset, Offset::new(100));
    assert_eq!(partition.len(), 2);
}

// =============================================================================
// Append Tests
// =============================================================================

#[test]
fn test_append_assigns_dense_offsets() {
    let partition = Partition::create(Config::default()).unwrap();

    for expected in 0..5 {
        let offset = partition.append(Timestamp::new(expected * 10)).unwrap();
        assert_eq!(offset, Offset::new(expected));
    }

    assert_eq!(partition.len(), 1);
    assert_eq!(partition.next_offset(), Offset::new(5));
}

#[test]
fn test_append_rolls_when_segment_full() {
    let partition = Partition::create(config_with_segment_records(3)).unwrap();

    append_n(&partition, 7);

    assert_eq!(base_offsets(&partition), vec![0, 3, 6]);
    let segments = partition.segments();
    assert_eq!(segments[0].dirty_offset(), Offset::new(2));
    assert_eq!(segments[1].dirty_offset(), Offset::new(5));
    assert_eq!(segments[2].dirty_offset(), Offset::new(6));
}

#[test]
fn test_append_resumes_after_discovered_segments() {
    let partition = Partition::open(
        Config::default(),
        vec![seg(100, 199, 10, 19), seg(0, 99, 0, 9)],
    )
    .unwrap();

    let offset = partition.append(Timestamp::new(20)).unwrap();

    assert_eq!(offset, Offset::new(200));
    let active = partition.segment_for_offset(Offset::new(200)).unwrap();
    assert_eq!(active.base_offset(), Offset::new(100));
    assert_eq!(active.max_timestamp(), Timestamp::new(20));
}

// =============================================================================
// Lookup Tests
// =============================================================================

#[test]
fn test_lookups_with_gap() {
    let partition = Partition::open(
        Config::default(),
        vec![
            seg(0, 99, 0, 9),
            seg(100, 199, 10, 19),
            seg(300, 399, 30, 39),
        ],
    )
    .unwrap();

    let base = |o: i64| {
        partition
            .segment_for_offset(Offset::new(o))
            .map(|s| s.base_offset().value())
    };
    assert_eq!(base(50), Some(0));
    assert_eq!(base(150), Some(100));
    assert_eq!(base(250), None);
    assert_eq!(base(999), None);

    let by_ts = partition.segment_for_timestamp(Timestamp::new(15)).unwrap();
    assert_eq!(by_ts.base_offset(), Offset::new(100));
    assert!(partition.segment_for_timestamp(Timestamp::new(25)).is_none());
}

#[test]
fn test_segments_from() {
    let partition = Partition::create(config_with_segment_records(10)).unwrap();
    append_n(&partition, 35);

    let bases: Vec<i64> = partition
        .segments_from(Offset::new(15))
        .iter()
        .map(|s| s.base_offset().value())
        .collect();
    assert_eq!(bases, vec![10, 20, 30]);

    assert!(partition.segments_from(Offset::new(35)).is_empty());
}

#[test]
fn test_lookup_handle_outlives_eviction() {
    let partition = Partition::create(config_with_segment_records(2)).unwrap();
    append_n(&partition, 6);

    let held = partition.segment_for_offset(Offset::new(1)).unwrap();
    partition.evict_before(Offset::new(4));

    assert!(partition.segment_for_offset(Offset::new(1)).is_none());
    assert_eq!(held.base_offset(), Offset::new(0));
    assert_eq!(held.dirty_offset(), Offset::new(1));
    assert_eq!(Arc::strong_count(&held), 1);
}

// =============================================================================
// Retention Tests
// =============================================================================

#[test]
fn test_retention_by_segment_count() {
    let config = Config::builder()
        .max_segment_records(2)
        .retention_max_segments(2)
        .build();
    let partition = Partition::create(config).unwrap();

    append_n(&partition, 10);

    assert_eq!(base_offsets(&partition), vec![6, 8]);
    assert_eq!(partition.start_offset(), Some(Offset::new(6)));
    assert!(partition.segment_for_offset(Offset::new(3)).is_none());
    assert!(partition.segment_for_offset(Offset::new(7)).is_some());
}

#[test]
fn test_evict_before() {
    let partition = Partition::create(config_with_segment_records(3)).unwrap();
    append_n(&partition, 7);

    let evicted = partition.evict_before(Offset::new(6));

    let evicted_bases: Vec<i64> = evicted.iter().map(|s| s.base_offset().value()).collect();
    assert_eq!(evicted_bases, vec![0, 3]);
    assert_eq!(base_offsets(&partition), vec![6]);
}

#[test]
fn test_evict_before_keeps_partially_covered_segment() {
    let partition = Partition::create(config_with_segment_records(3)).unwrap();
    append_n(&partition, 7);

    let evicted = partition.evict_before(Offset::new(4));

    assert_eq!(evicted.len(), 1);
    assert_eq!(base_offsets(&partition), vec![3, 6]);
}

#[test]
fn test_evict_before_never_removes_active() {
    let partition = Partition::create(config_with_segment_records(3)).unwrap();
    append_n(&partition, 7);

    partition.evict_before(Offset::new(1_000));

    assert_eq!(base_offsets(&partition), vec![6]);
    assert_eq!(partition.next_offset(), Offset::new(7));
}

// =============================================================================
// Roll / Discard Tests
// =============================================================================

#[test]
fn test_roll_creates_empty_active() {
    let partition = Partition::create(Config::default()).unwrap();
    append_n(&partition, 3);

    let rolled = partition.roll();

    assert!(rolled.is_empty());
    assert_eq!(rolled.base_offset(), Offset::new(3));
    assert_eq!(partition.len(), 2);
}

#[test]
fn test_roll_reuses_empty_active() {
    let partition = Partition::create(Config::default()).unwrap();

    let first = partition.roll();
    let second = partition.roll();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(partition.len(), 1);
}

#[test]
fn test_discard_active() {
    let partition = Partition::create(Config::default()).unwrap();
    append_n(&partition, 3);
    partition.roll();

    let discarded = partition.discard_active().unwrap();
    assert_eq!(discarded.base_offset(), Offset::new(3));
    assert_eq!(partition.len(), 1);

    // The remaining active segment has data
    assert!(partition.discard_active().is_none());
    assert_eq!(partition.len(), 1);

    // Offsets continue where they left off
    assert_eq!(partition.append(Timestamp::new(0)).unwrap(), Offset::new(3));
}

#[test]
fn test_discard_active_on_empty_partition() {
    let partition = Partition::create(Config::default()).unwrap();
    assert!(partition.discard_active().is_none());
}

#[test]
fn test_display_includes_name_and_segments() {
    let partition = Partition::create(config_with_segment_records(5)).unwrap();
    append_n(&partition, 2);

    let rendered = partition.to_string();
    assert!(rendered.starts_with("test/0 {size: 1, ["));
    assert!(rendered.contains("dirty_offset:1"));
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_readers_with_writer() {
    let partition = Arc::new(Partition::create(config_with_segment_records(16)).unwrap());

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let partition = Arc::clone(&partition);
            thread::spawn(move || {
                for _ in 0..500 {
                    let next = partition.next_offset().value();
                    for offset in [0, next / 2, next - 1] {
                        if offset < 0 {
                            continue;
                        }
                        if let Some(segment) = partition.segment_for_offset(Offset::new(offset)) {
                            assert!(segment.base_offset().value() <= offset);
                            assert!(segment.dirty_offset().value() >= offset);
                        }
                    }
                }
            })
        })
        .collect();

    append_n(&partition, 1_000);

    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(partition.next_offset(), Offset::new(1_000));
    assert_eq!(partition.len(), 63);
    for offset in 0..1_000 {
        assert!(partition.segment_for_offset(Offset::new(offset)).is_some());
    }
}
