use httpload_engine::stats::{percentile_index, whole_millis, LatencyStats};
use std::time::Duration;

fn ms(values: &[u64]) -> Vec<Duration> {
    values.iter().map(|&v| Duration::from_millis(v)).collect()
}

#[test]
fn test_empty_input_is_all_zero() {
    let s = LatencyStats::from_durations(&[]);
    assert_eq!(s, LatencyStats { mean_ms: 0.0, min_ms: 0.0, p95_ms: 0.0, max_ms: 0.0 });
}

#[test]
fn test_single_sample() {
    let s = LatencyStats::from_durations(&ms(&[42]));
    assert_eq!(s.mean_ms, 42.0);
    assert_eq!(s.min_ms, 42.0);
    assert_eq!(s.p95_ms, 42.0);
    assert_eq!(s.max_ms, 42.0);
}

#[test]
fn test_percentile_index_floor_variant() {
    // floor(n * 0.95) - 1, clamped to 0
    assert_eq!(percentile_index(1, 0.95), 0);
    assert_eq!(percentile_index(2, 0.95), 0);
    assert_eq!(percentile_index(10, 0.95), 8);
    assert_eq!(percentile_index(20, 0.95), 18);
    assert_eq!(percentile_index(40, 0.95), 37);
    assert_eq!(percentile_index(0, 0.95), 0);
}

#[test]
fn test_p95_of_twenty_is_nineteenth_smallest() {
    // 1..=20 ms: index floor(20 * 0.95) - 1 = 18 holds 19 ms, not the maximum.
    let values: Vec<u64> = (1..=20).collect();
    let s = LatencyStats::from_durations(&ms(&values));
    assert_eq!(s.p95_ms, 19.0);
    assert_eq!(s.min_ms, 1.0);
    assert_eq!(s.max_ms, 20.0);
    assert_eq!(s.mean_ms, 10.5);
}

#[test]
fn test_unsorted_input() {
    // sorted: [10, 20, ..., 100], n=10, p95 index 8 -> 90
    let s = LatencyStats::from_durations(&ms(&[70, 10, 100, 40, 20, 90, 30, 60, 80, 50]));
    assert_eq!(s.min_ms, 10.0);
    assert_eq!(s.max_ms, 100.0);
    assert_eq!(s.p95_ms, 90.0);
    assert_eq!(s.mean_ms, 55.0);
}

#[test]
fn test_input_slice_is_not_reordered() {
    let input = ms(&[3, 1, 2]);
    let before = input.clone();
    let _ = LatencyStats::from_durations(&input);
    assert_eq!(input, before);
}

#[test]
fn test_order_independent_and_idempotent() {
    let shuffled = ms(&[9, 3, 7, 1, 5, 8, 2, 6, 4]);
    let mut sorted = shuffled.clone();
    sorted.sort();

    let a = LatencyStats::from_durations(&shuffled);
    let b = LatencyStats::from_durations(&sorted);
    let c = LatencyStats::from_durations(&sorted);
    assert_eq!(a, b);
    assert_eq!(b, c);
}

#[test]
fn test_samples_truncate_to_whole_millis() {
    assert_eq!(whole_millis(Duration::from_micros(1_999)), 1);
    assert_eq!(whole_millis(Duration::from_nanos(999_999)), 0);

    let s = LatencyStats::from_durations(&[Duration::from_micros(1_999), Duration::from_micros(2_001)]);
    assert_eq!(s.min_ms, 1.0);
    assert_eq!(s.max_ms, 2.0);
    // Sum is 4.000 ms before truncation: 4 / 2.
    assert_eq!(s.mean_ms, 2.0);
}

#[test]
fn test_mean_truncates_sum_not_samples() {
    // 3 x 1.5 ms = 4.5 ms total -> 4 ms -> 4 / 3
    let s = LatencyStats::from_durations(&[Duration::from_micros(1_500); 3]);
    assert_eq!(s.min_ms, 1.0);
    assert_eq!(s.mean_ms, 4.0 / 3.0);
}

#[test]
fn test_bounds_hold_for_varied_inputs() {
    let cases: Vec<Vec<u64>> = vec![
        vec![5],
        vec![5, 500],
        vec![1, 1, 1, 1000],
        (0..97).map(|i| (i * 37) % 113).collect(),
        vec![250; 8],
    ];
    for values in cases {
        let s = LatencyStats::from_durations(&ms(&values));
        assert!(s.min_ms <= s.mean_ms && s.mean_ms <= s.max_ms, "mean out of bounds for {values:?}: {s:?}");
        assert!(s.min_ms <= s.p95_ms && s.p95_ms <= s.max_ms, "p95 out of bounds for {values:?}: {s:?}");
    }
}
