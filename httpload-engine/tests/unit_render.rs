use chrono::{TimeZone, Utc};
use httpload_common::RunConfig;
use httpload_engine::render::{render_banner, render_json, render_text};
use httpload_engine::Report;
use std::collections::BTreeMap;
use std::time::Duration;

fn sample_report() -> Report {
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    Report {
        url: "http://localhost:3000/ping".to_string(),
        total_requests: 12,
        concurrency: 4,
        start_time: start,
        end_time: start + chrono::Duration::milliseconds(1500),
        total_time: Duration::from_millis(1500),
        requests_per_sec: 8.0,
        http_200: 8,
        status_dist: BTreeMap::from([(503, 1), (200, 8), (404, 2)]),
        errors: 1,
        avg_latency_ms: 12.5,
        min_latency_ms: 3.0,
        p95_latency_ms: 40.0,
        max_latency_ms: 41.0,
        latency_samples_ms: vec![3, 5, 7, 8, 9, 10, 12, 15, 20, 40, 41],
    }
}

#[test]
fn test_render_text_fields() {
    let text = render_text(&sample_report());
    assert!(text.contains("URL:                  http://localhost:3000/ping"));
    assert!(text.contains("Total requests:       12"));
    assert!(text.contains("Concurrency:          4"));
    assert!(text.contains("Total time:           1.500s"));
    assert!(text.contains("RPS (approx):         8.00 req/s"));
    assert!(text.contains("HTTP 200:             8"));
    assert!(text.contains("Errors (timeout/etc): 1"));
    assert!(text.contains("  Mean: 12.50"));
    assert!(text.contains("  Min:  3.00"));
    assert!(text.contains("  P95:  40.00"));
    assert!(text.contains("  Max:  41.00"));
    assert!(text.contains("Start: 2024-05-01T12:00:00Z"));
    assert!(text.contains("End:   2024-05-01T12:00:01Z"));
}

#[test]
fn test_render_text_status_codes_ascending() {
    let text = render_text(&sample_report());
    let p200 = text.find("  200: 8").expect("200 line");
    let p404 = text.find("  404: 2").expect("404 line");
    let p503 = text.find("  503: 1").expect("503 line");
    assert!(p200 < p404 && p404 < p503);
}

#[test]
fn test_render_json_fields() {
    let json = render_json(&sample_report()).unwrap();
    assert!(json.contains("\n  \"url\""), "expected two-space indentation:\n{json}");

    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["url"], "http://localhost:3000/ping");
    assert_eq!(v["total_requests"], 12);
    assert_eq!(v["concurrency"], 4);
    assert_eq!(v["total_time_secs"], 1.5);
    assert_eq!(v["requests_per_sec"], 8.0);
    assert_eq!(v["http_200"], 8);
    assert_eq!(v["errors"], 1);
    assert_eq!(v["status_dist"]["200"], 8);
    assert_eq!(v["status_dist"]["404"], 2);
    assert_eq!(v["p95_latency_ms"], 40.0);
    assert_eq!(v["start_time"], "2024-05-01T12:00:00Z");
    assert_eq!(v["latency_samples_ms"].as_array().unwrap().len(), 11);
}

#[test]
fn test_render_banner() {
    let config = RunConfig::new("http://example.test/", 100, 10, Duration::from_millis(2500)).unwrap();
    let banner = render_banner(&config, false);
    assert!(banner.contains("URL:            http://example.test/"));
    assert!(banner.contains("Total requests: 100"));
    assert!(banner.contains("Concurrency:    10"));
    assert!(banner.contains("Timeout:        2s 500ms"));
    assert!(banner.contains("JSON output:    false"));
}
