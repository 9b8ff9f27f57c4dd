//! Orchestrator state management.
//!
//! Tracks the per-domain state machine, the last published result for
//! each domain, and aggregate statistics for the engine's lifetime.

use chrono::{DateTime, Utc};
use std::sync::Arc;

/// The four assessment domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    EnergyFlow,
    ClimateScore,
    Vulnerability,
    Resilience,
}

impl Domain {
    /// All domains, in publication order.
    pub const ALL: [Self; 4] = [
        Self::EnergyFlow,
        Self::ClimateScore,
        Self::Vulnerability,
        Self::Resilience,
    ];

    /// Snake-case name used in logs and events.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EnergyFlow => "energy_flow",
            Self::ClimateScore => "climate_score",
            Self::Vulnerability => "vulnerability",
            Self::Resilience => "resilience",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of one domain pipeline.
///
/// `Idle -> Computing -> Ready` on success; `Computing -> Error` keeps
/// the previous Ready value available with a staleness flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainStatus {
    Idle,
    Computing,
    Ready,
    Error,
}

impl std::fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::Computing => write!(f, "CALC"),
            Self::Ready => write!(f, "OK"),
            Self::Error => write!(f, "ERR"),
        }
    }
}

/// Per-domain slot holding the last published result.
///
/// Mutation is whole-value replacement only; readers receive the `Arc`
/// and keep it valid for as long as they like.
#[derive(Debug)]
pub struct DomainSlot<T> {
    value: Option<Arc<T>>,
    status: DomainStatus,
    stale: bool,
    last_error: Option<String>,
    updated_at: Option<DateTime<Utc>>,
}

impl<T> DomainSlot<T> {
    pub(crate) fn new() -> Self {
        Self {
            value: None,
            status: DomainStatus::Idle,
            stale: false,
            last_error: None,
            updated_at: None,
        }
    }

    /// Enter the Computing state.
    pub(crate) fn begin(&mut self) {
        self.status = DomainStatus::Computing;
    }

    /// Publish a new result, replacing the previous one whole.
    pub(crate) fn publish(&mut self, value: Arc<T>, at: DateTime<Utc>) {
        self.value = Some(value);
        self.status = DomainStatus::Ready;
        self.stale = false;
        self.last_error = None;
        self.updated_at = Some(at);
    }

    /// Record a failed cycle. The previous Ready value is retained and
    /// flagged stale.
    pub(crate) fn degrade(&mut self, error: &str) {
        self.status = DomainStatus::Error;
        self.stale = true;
        self.last_error = Some(error.to_string());
    }

    /// Current pipeline status, without cloning the published value.
    pub(crate) fn status(&self) -> DomainStatus {
        self.status
    }

    /// Current consumer-facing reading.
    pub(crate) fn reading(&self) -> DomainReading<T> {
        DomainReading {
            result: self.value.clone(),
            status: self.status,
            stale: self.stale,
            last_error: self.last_error.clone(),
            updated_at: self.updated_at,
        }
    }
}

impl<T> Default for DomainSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// What a consumer sees when reading a domain slot.
#[derive(Debug, Clone)]
pub struct DomainReading<T> {
    /// Last published result, if any cycle has completed
    pub result: Option<Arc<T>>,
    /// Current pipeline status
    pub status: DomainStatus,
    /// True when the result predates a failed cycle
    pub stale: bool,
    /// Error message from the most recent failed cycle
    pub last_error: Option<String>,
    /// When the result was published
    pub updated_at: Option<DateTime<Utc>>,
}

/// Aggregate statistics for the engine's lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Completed recompute cycles (successful or degraded)
    pub cycle_count: u64,
    /// Submissions coalesced into a follow-up cycle
    pub coalesced_count: u64,
    /// Submissions skipped because the fingerprint was unchanged
    pub skipped_unchanged: u64,
    /// Cycles that ended degraded
    pub degraded_cycles: u64,
}
