//! Assessment orchestrator.
//!
//! Sequences the four domain pipelines against one immutable snapshot and
//! republishes whole result objects. Scheduling is cooperative and
//! single-flight: a boolean in-flight guard ensures at most one recompute
//! pipeline runs at a time, and submissions arriving mid-cycle are
//! coalesced into exactly one follow-up cycle computing the latest
//! snapshot: no unbounded queueing, no lost updates.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use crate::config::EngineConfig;
use crate::domains::{
    self, ClimateScoreResult, EnergyFlowResult, ResilienceMetrics, VulnerabilityResult,
};
use crate::model::AssessmentSnapshot;

use super::clock::{Clock, SystemClock};
use super::sinks::{CycleOutcome, ResultSink};
use super::state::{Domain, DomainReading, DomainSlot, DomainStatus, EngineStats};

/// Pending-submission state behind the in-flight guard.
#[derive(Default)]
struct CycleGuard {
    pending: Option<AssessmentSnapshot>,
    in_flight: bool,
}

/// The assessment engine.
///
/// Readers never block a recompute: each domain slot is replaced whole
/// under a short write lock, and consumers keep the published `Arc` for
/// as long as they need it.
pub struct AssessmentEngine {
    parallel: bool,
    skip_unchanged: bool,
    clock: Arc<dyn Clock>,
    guard: Mutex<CycleGuard>,
    energy: RwLock<DomainSlot<EnergyFlowResult>>,
    climate: RwLock<DomainSlot<ClimateScoreResult>>,
    vulnerability: RwLock<DomainSlot<VulnerabilityResult>>,
    resilience: RwLock<DomainSlot<ResilienceMetrics>>,
    sinks: Mutex<Vec<Box<dyn ResultSink>>>,
    stats: Mutex<EngineStats>,
    last_fingerprint: Mutex<Option<u64>>,
}

impl AssessmentEngine {
    /// Create an engine with the production clock.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create an engine with an injected clock (deterministic tests).
    #[must_use]
    pub fn with_clock(config: &EngineConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            parallel: config.parallel,
            skip_unchanged: config.skip_unchanged,
            clock,
            guard: Mutex::new(CycleGuard::default()),
            energy: RwLock::new(DomainSlot::new()),
            climate: RwLock::new(DomainSlot::new()),
            vulnerability: RwLock::new(DomainSlot::new()),
            resilience: RwLock::new(DomainSlot::new()),
            sinks: Mutex::new(Vec::new()),
            stats: Mutex::new(EngineStats::default()),
            last_fingerprint: Mutex::new(None),
        }
    }

    /// Register a result sink.
    pub fn add_sink(&self, sink: Box<dyn ResultSink>) {
        lock(&self.sinks).push(sink);
    }

    /// Submit a snapshot-changed signal.
    ///
    /// Runs the recompute pipeline synchronously unless one is already
    /// in flight, in which case the snapshot replaces any pending one and
    /// exactly one follow-up cycle picks it up.
    pub fn submit(&self, snapshot: AssessmentSnapshot) {
        if self.skip_unchanged {
            let fingerprint = snapshot.fingerprint();
            let mut last = lock(&self.last_fingerprint);
            if *last == Some(fingerprint) {
                lock(&self.stats).skipped_unchanged += 1;
                tracing::debug!("snapshot unchanged, skipping recompute");
                return;
            }
            *last = Some(fingerprint);
        }

        {
            let mut guard = lock(&self.guard);
            guard.pending = Some(snapshot);
            if guard.in_flight {
                lock(&self.stats).coalesced_count += 1;
                tracing::debug!("cycle in flight, submission coalesced");
                return;
            }
            guard.in_flight = true;
        }

        loop {
            let next = {
                let mut guard = lock(&self.guard);
                match guard.pending.take() {
                    Some(snapshot) => snapshot,
                    None => {
                        guard.in_flight = false;
                        break;
                    }
                }
            };
            self.run_cycle(&next);
        }
    }

    /// Latest energy-flow reading.
    #[must_use]
    pub fn energy(&self) -> DomainReading<EnergyFlowResult> {
        read(&self.energy).reading()
    }

    /// Latest climate reading.
    #[must_use]
    pub fn climate(&self) -> DomainReading<ClimateScoreResult> {
        read(&self.climate).reading()
    }

    /// Latest vulnerability reading.
    #[must_use]
    pub fn vulnerability(&self) -> DomainReading<VulnerabilityResult> {
        read(&self.vulnerability).reading()
    }

    /// Latest resilience reading.
    #[must_use]
    pub fn resilience(&self) -> DomainReading<ResilienceMetrics> {
        read(&self.resilience).reading()
    }

    /// Current status of one domain pipeline.
    #[must_use]
    pub fn status(&self, domain: Domain) -> DomainStatus {
        match domain {
            Domain::EnergyFlow => read(&self.energy).status(),
            Domain::ClimateScore => read(&self.climate).status(),
            Domain::Vulnerability => read(&self.vulnerability).status(),
            Domain::Resilience => read(&self.resilience).status(),
        }
    }

    /// Aggregate engine statistics.
    #[must_use]
    pub fn stats(&self) -> EngineStats {
        lock(&self.stats).clone()
    }

    /// Emit a status event to all sinks.
    pub fn emit_status(&self) {
        let stats = self.stats();
        for sink in lock(&self.sinks).iter_mut() {
            if let Err(e) = sink.on_status(&stats) {
                tracing::warn!("result sink error: {e}");
            }
        }
    }

    fn run_cycle(&self, snapshot: &AssessmentSnapshot) {
        write(&self.energy).begin();
        write(&self.climate).begin();
        write(&self.vulnerability).begin();
        write(&self.resilience).begin();

        if let Err(e) = snapshot.validate() {
            let reason = e.to_string();
            tracing::warn!("degraded cycle, serving last-known-good results: {reason}");
            write(&self.energy).degrade(&reason);
            write(&self.climate).degrade(&reason);
            write(&self.vulnerability).degrade(&reason);
            write(&self.resilience).degrade(&reason);
            {
                let mut stats = lock(&self.stats);
                stats.cycle_count += 1;
                stats.degraded_cycles += 1;
            }
            for sink in lock(&self.sinks).iter_mut() {
                if let Err(e) = sink.on_degraded(&reason) {
                    tracing::warn!("result sink error: {e}");
                }
            }
            return;
        }

        let now = self.clock.now();
        let energy_in = snapshot.energy.as_ref();
        let climate_in = snapshot.climate.as_ref();

        // The four pipelines share the snapshot read-only and write
        // disjoint slots; joining before publishing keeps the published
        // set consistent.
        let (energy, climate, vulnerability, resilience) = if self.parallel {
            let ((energy, climate), (vulnerability, resilience)) = rayon::join(
                || {
                    rayon::join(
                        || domains::energy::assess(energy_in, now),
                        || domains::climate::assess(climate_in, now),
                    )
                },
                || {
                    rayon::join(
                        || domains::vulnerability::assess(climate_in, energy_in, now),
                        || domains::resilience::assess(energy_in, climate_in, now),
                    )
                },
            );
            (energy, climate, vulnerability, resilience)
        } else {
            (
                domains::energy::assess(energy_in, now),
                domains::climate::assess(climate_in, now),
                domains::vulnerability::assess(climate_in, energy_in, now),
                domains::resilience::assess(energy_in, climate_in, now),
            )
        };

        let energy = Arc::new(energy);
        let climate = Arc::new(climate);
        let vulnerability = Arc::new(vulnerability);
        let resilience = Arc::new(resilience);

        write(&self.energy).publish(Arc::clone(&energy), now);
        write(&self.climate).publish(Arc::clone(&climate), now);
        write(&self.vulnerability).publish(Arc::clone(&vulnerability), now);
        write(&self.resilience).publish(Arc::clone(&resilience), now);

        let cycle = {
            let mut stats = lock(&self.stats);
            stats.cycle_count += 1;
            stats.cycle_count
        };

        let outcome = CycleOutcome {
            cycle,
            computed_at: now,
            energy: &energy,
            climate: &climate,
            vulnerability: &vulnerability,
            resilience: &resilience,
        };
        for sink in lock(&self.sinks).iter_mut() {
            if let Err(e) = sink.on_cycle(&outcome) {
                tracing::warn!("result sink error: {e}");
            }
        }

        tracing::info!(
            cycle,
            efficiency = energy.efficiency,
            climate_score = climate.overall_score,
            risk = %vulnerability.risk_level,
            resilience = resilience.overall_score,
            "assessment cycle complete"
        );
    }
}

/// Lock a mutex, recovering the guard if a writer panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::clock::FixedClock;
    use crate::engine::state::DomainStatus;
    use crate::model::{ClimateSnapshot, EmissionFigures, EnergySnapshot};
    use chrono::{DateTime, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn engine() -> AssessmentEngine {
        AssessmentEngine::with_clock(&EngineConfig::default(), Arc::new(FixedClock(now())))
    }

    fn energy(generation: f64) -> EnergySnapshot {
        EnergySnapshot {
            total_generation: generation,
            total_consumption: 800.0,
            distribution_losses_percent: 10.0,
            distribution_nodes: Vec::new(),
        }
    }

    fn climate() -> ClimateSnapshot {
        ClimateSnapshot {
            global_temperature: 1.5,
            co2_concentration: 420.0,
            renewable_share_percent: 50.0,
            emissions: EmissionFigures {
                annual: 25.0,
                target: 20.0,
                reduction_percent: 2.0,
            },
            regions: Vec::new(),
        }
    }

    fn snapshot(generation: f64) -> AssessmentSnapshot {
        AssessmentSnapshot::new(Some(energy(generation)), Some(climate()), now())
    }

    #[test]
    fn test_submit_publishes_all_domains() {
        let engine = engine();
        engine.submit(snapshot(1000.0));

        assert_eq!(engine.energy().status, DomainStatus::Ready);
        assert_eq!(engine.climate().status, DomainStatus::Ready);
        assert_eq!(engine.vulnerability().status, DomainStatus::Ready);
        assert_eq!(engine.resilience().status, DomainStatus::Ready);

        let reading = engine.energy();
        assert_eq!(reading.result.unwrap().efficiency, 72.0);
        assert!(!reading.stale);
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let sequential_config = EngineConfig {
            parallel: false,
            ..EngineConfig::default()
        };
        let parallel = engine();
        let sequential =
            AssessmentEngine::with_clock(&sequential_config, Arc::new(FixedClock(now())));

        parallel.submit(snapshot(1000.0));
        sequential.submit(snapshot(1000.0));

        let a = parallel.energy().result.unwrap();
        let b = sequential.energy().result.unwrap();
        assert_eq!(*a, *b);

        let a = parallel.resilience().result.unwrap();
        let b = sequential.resilience().result.unwrap();
        assert_eq!(*a, *b);
    }

    #[test]
    fn test_unchanged_snapshot_is_skipped() {
        let engine = engine();
        engine.submit(snapshot(1000.0));
        engine.submit(snapshot(1000.0));

        let stats = engine.stats();
        assert_eq!(stats.cycle_count, 1);
        assert_eq!(stats.skipped_unchanged, 1);
    }

    #[test]
    fn test_changed_snapshot_recomputes() {
        let engine = engine();
        engine.submit(snapshot(1000.0));
        engine.submit(snapshot(1600.0));

        let stats = engine.stats();
        assert_eq!(stats.cycle_count, 2);
        assert_eq!(engine.energy().result.unwrap().efficiency, 45.0);
    }

    #[test]
    fn test_invalid_snapshot_degrades_and_retains_last_good() {
        let engine = engine();
        engine.submit(snapshot(1000.0));

        let mut bad_energy = energy(1000.0);
        bad_energy.total_generation = f64::NAN;
        engine.submit(AssessmentSnapshot::new(Some(bad_energy), Some(climate()), now()));

        let reading = engine.energy();
        assert_eq!(reading.status, DomainStatus::Error);
        assert!(reading.stale);
        // Last-known-good result still readable
        assert_eq!(reading.result.unwrap().efficiency, 72.0);
        assert!(reading.last_error.is_some());

        let stats = engine.stats();
        assert_eq!(stats.cycle_count, 2);
        assert_eq!(stats.degraded_cycles, 1);
    }

    #[test]
    fn test_recovers_after_degraded_cycle() {
        let engine = engine();
        engine.submit(snapshot(1000.0));

        let mut bad_energy = energy(1000.0);
        bad_energy.total_generation = f64::NAN;
        engine.submit(AssessmentSnapshot::new(Some(bad_energy), Some(climate()), now()));
        engine.submit(snapshot(1600.0));

        let reading = engine.energy();
        assert_eq!(reading.status, DomainStatus::Ready);
        assert!(!reading.stale);
        assert_eq!(reading.result.unwrap().efficiency, 45.0);
    }

    #[test]
    fn test_idempotent_results_for_same_snapshot_and_clock() {
        let a = engine();
        let b = engine();
        a.submit(snapshot(1000.0));
        b.submit(snapshot(1000.0));

        let left = serde_json::to_string(&*a.vulnerability().result.unwrap()).unwrap();
        let right = serde_json::to_string(&*b.vulnerability().result.unwrap()).unwrap();
        assert_eq!(left, right);
    }

    #[test]
    fn test_missing_parts_still_publish() {
        let engine = engine();
        engine.submit(AssessmentSnapshot::new(None, None, now()));

        assert_eq!(engine.energy().status, DomainStatus::Ready);
        assert_eq!(engine.energy().result.unwrap().efficiency, 0.0);
        assert_eq!(engine.vulnerability().result.unwrap().risk_points, 0);
    }
}
