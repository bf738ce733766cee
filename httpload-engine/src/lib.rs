//! Request dispatch and aggregation for `httpload`.
//!
//! A run flows through these modules in order:
//!
//! - [`job`]: the shared source of request indices and the per-request result type
//! - [`worker`]: the fixed-size pool that claims jobs and issues GETs
//! - [`collector`]: fan-in of results into counts, a status histogram and latencies
//! - [`stats`]: mean / min / p95 / max over successful latencies
//! - [`report`]: the immutable summary handed to callers
//!
//! [`runner::run`] wires them together; [`render`] turns a [`Report`] into text or JSON.

pub mod collector;
pub mod job;
pub mod render;
pub mod report;
pub mod runner;
pub mod stats;
pub mod worker;

pub use report::Report;
pub use runner::{run, run_http};
