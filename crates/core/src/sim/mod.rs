//! Simulation driver.
//!
//! Connects a trace source to a cache and an optional verbose output sink.

/// Trace runner.
pub mod runner;

pub use runner::TraceRunner;
