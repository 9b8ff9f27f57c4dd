//! **A deterministic assessment and scoring engine for energy-grid and climate telemetry.**
//!
//! `gridscore` ingests heterogeneous raw metrics (grid telemetry, climate
//! measurements, socio-economic indicators) and derives normalized
//! composite scores, ordinal risk classifications, ranked bottleneck
//! lists, and rule-based recommendations. It is designed as a pure
//! computation boundary: no file formats, no network protocols, no CLI.
//! Acquisition belongs to a data-provider collaborator, presentation to
//! whatever consumes the published results.
//!
//! Everything the engine computes is closed-form weighted aggregation
//! over fixed-size inputs. There is no model training, no iterative
//! optimization, and no randomness: the same snapshot and clock reading
//! always produce byte-identical results.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The snapshot types read from the data provider:
//!   [`EnergySnapshot`], [`ClimateSnapshot`], and the per-cycle
//!   [`AssessmentSnapshot`] combining them. Snapshots are immutable and
//!   validated once at the ingestion boundary.
//! - **[`scoring`]**: The deterministic primitives: normalization into
//!   [0, 100], weighted-sum and simple-average aggregation, ordinal risk
//!   classification, outlier detection, and recommendation rules.
//! - **[`domains`]**: One pure assessment pipeline per domain (energy
//!   flow, climate score, vulnerability, resilience), each producing a
//!   whole result object from the snapshot.
//! - **[`engine`]**: The orchestrator. A single-flight recompute cycle
//!   with coalescing, per-domain last-known-good slots with staleness,
//!   an explicit polling [`Scheduler`], and pluggable [`ResultSink`]s.
//! - **[`config`]**: Engine configuration with validation.
//!
//! ## Getting Started: Assessing a Snapshot
//!
//! ```
//! use chrono::Utc;
//! use gridscore::engine::AssessmentEngine;
//! use gridscore::model::{AssessmentSnapshot, EnergySnapshot};
//! use gridscore::EngineConfig;
//!
//! let engine = AssessmentEngine::new(&EngineConfig::default());
//!
//! let snapshot = AssessmentSnapshot::new(
//!     Some(EnergySnapshot {
//!         total_generation: 1000.0,
//!         total_consumption: 800.0,
//!         distribution_losses_percent: 10.0,
//!         distribution_nodes: vec![],
//!     }),
//!     None,
//!     Utc::now(),
//! );
//!
//! engine.submit(snapshot);
//!
//! let energy = engine.energy();
//! assert_eq!(energy.result.unwrap().efficiency, 72.0);
//! ```
//!
//! ## Continuous Operation
//!
//! In production the engine sits behind a [`Scheduler`] that polls a
//! [`SnapshotProvider`] and submits only real changes (snapshots carry a
//! content fingerprint, so republished identical payloads are no-ops).
//! Consumers read the latest result per domain at any time; a failed
//! cycle never discards the previous result; readings carry a staleness
//! flag instead.
//!
//! ```no_run
//! use std::sync::Arc;
//! use gridscore::engine::{AssessmentEngine, Scheduler, SnapshotProvider};
//! use gridscore::model::AssessmentSnapshot;
//! use gridscore::EngineConfig;
//!
//! struct Telemetry;
//!
//! impl SnapshotProvider for Telemetry {
//!     fn latest(&self) -> anyhow::Result<AssessmentSnapshot> {
//!         // read from your acquisition layer
//!         Ok(AssessmentSnapshot::new(None, None, chrono::Utc::now()))
//!     }
//! }
//!
//! let config = EngineConfig::default();
//! let engine = Arc::new(AssessmentEngine::new(&config));
//! let mut scheduler = Scheduler::start(Arc::clone(&engine), Arc::new(Telemetry), &config);
//! // ... later
//! scheduler.stop();
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Cast safety: usize↔f64 casts appear in mean/percentage math over
    // small collections; all values are bounded in practice
    clippy::cast_precision_loss,
    // Doc completeness: # Errors sections are aspirational for the few
    // fallible fns at the ingestion boundary
    clippy::missing_errors_doc,
    // Variable names like `min`/`mid` or `old`/`new` are clear in context
    clippy::similar_names
)]

pub mod config;
pub mod domains;
pub mod engine;
pub mod error;
pub mod model;
pub mod scoring;

// Re-export main types for convenience
pub use config::{ConfigError, EngineConfig, Validatable};
pub use domains::{
    ClimateScoreResult, EnergyFlowResult, OptimizationSummary, ResilienceMetrics,
    VulnerabilityResult,
};
pub use engine::{
    AssessmentEngine, Clock, DomainReading, DomainStatus, EngineStats, ResultSink, Scheduler,
    SnapshotProvider, SystemClock,
};
pub use error::{AssessError, Result};
pub use model::{AssessmentSnapshot, ClimateSnapshot, DistributionNode, EnergySnapshot};
pub use scoring::{
    CompositeScore, OutlierRecord, Recommendation, RiskLevel, Severity, MAX_OUTLIERS,
};
