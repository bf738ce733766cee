use chrono::SecondsFormat;
use httpload_common::RunConfig;
use std::fmt::Write;

use crate::report::Report;

/// Parameters echoed before a text-mode run.
pub fn render_banner(config: &RunConfig, json: bool) -> String {
    let mut out = String::new();
    writeln!(out, "HTTP load generator").ok();
    writeln!(out, "-----------------------------").ok();
    writeln!(out, "URL:            {}", config.url()).ok();
    writeln!(out, "Total requests: {}", config.total()).ok();
    writeln!(out, "Concurrency:    {}", config.concurrency()).ok();
    writeln!(out, "Timeout:        {}", humantime::format_duration(config.timeout())).ok();
    writeln!(out, "JSON output:    {}", json).ok();
    writeln!(out, "-----------------------------").ok();
    out
}

/// Human-readable report. Status codes are listed in ascending order.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    writeln!(out, "==== Load Test Report ====").ok();
    writeln!(out, "URL:                  {}", report.url).ok();
    writeln!(out, "Total requests:       {}", report.total_requests).ok();
    writeln!(out, "Concurrency:          {}", report.concurrency).ok();
    writeln!(out, "Total time:           {:.3?}", report.total_time).ok();
    writeln!(out, "RPS (approx):         {:.2} req/s", report.requests_per_sec).ok();
    writeln!(out, "HTTP 200:             {}", report.http_200).ok();
    writeln!(out, "Errors (timeout/etc): {}", report.errors).ok();
    writeln!(out).ok();
    writeln!(out, "Status distribution:").ok();
    for (status, count) in &report.status_dist {
        writeln!(out, "  {status}: {count}").ok();
    }
    writeln!(out).ok();
    writeln!(out, "Latency (ms):").ok();
    writeln!(out, "  Mean: {:.2}", report.avg_latency_ms).ok();
    writeln!(out, "  Min:  {:.2}", report.min_latency_ms).ok();
    writeln!(out, "  P95:  {:.2}", report.p95_latency_ms).ok();
    writeln!(out, "  Max:  {:.2}", report.max_latency_ms).ok();
    writeln!(out).ok();
    writeln!(out, "Start: {}", report.start_time.to_rfc3339_opts(SecondsFormat::Secs, true)).ok();
    writeln!(out, "End:   {}", report.end_time.to_rfc3339_opts(SecondsFormat::Secs, true)).ok();
    out
}

/// The report as pretty-printed JSON (two-space indent).
pub fn render_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
