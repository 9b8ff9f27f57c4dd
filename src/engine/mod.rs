//! Assessment orchestration.
//!
//! Wires the domain pipelines to the outside world: an injectable clock,
//! the data-provider boundary, the single-flight recompute engine with
//! coalescing, an explicit polling scheduler, and pluggable result sinks
//! for the presentation layer.

pub mod clock;
pub mod orchestrator;
pub mod provider;
pub mod scheduler;
pub mod sinks;
pub mod state;

pub use clock::{Clock, FixedClock, SystemClock};
pub use orchestrator::AssessmentEngine;
pub use provider::{ChangeDetector, SnapshotProvider};
pub use scheduler::{tick, Scheduler};
pub use sinks::{ConsoleSink, CycleOutcome, NdjsonSink, ResultSink};
pub use state::{Domain, DomainReading, DomainStatus, EngineStats};
