//! Per-domain assessment pipelines.
//!
//! One pure function per domain, all reading the same immutable snapshot
//! and producing a whole result object. The orchestrator decides whether
//! they run in parallel or sequentially; there is no data dependency
//! between them.

pub mod climate;
pub mod energy;
pub mod resilience;
pub mod vulnerability;

pub use climate::{
    ClimateCategories, ClimateScoreResult, ClimateTrends, EmissionTrend, RenewableTrend,
    TemperatureTrend,
};
pub use energy::{EnergyFlowResult, OptimizationSummary};
pub use resilience::ResilienceMetrics;
pub use vulnerability::VulnerabilityResult;
