//! Result sinks for the assessment engine.
//!
//! Trait-based extensible publishing: console (human-readable) and NDJSON
//! (machine-readable). Sink failures are logged warnings, never fatal;
//! a broken consumer must not stall the recompute pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use super::state::EngineStats;
use crate::domains::{
    ClimateScoreResult, EnergyFlowResult, ResilienceMetrics, VulnerabilityResult,
};

/// One completed recompute cycle, as handed to sinks.
#[derive(Debug, Clone, Serialize)]
pub struct CycleOutcome<'a> {
    /// Monotonic cycle counter
    pub cycle: u64,
    /// Clock reading stamped on every result in this cycle
    pub computed_at: DateTime<Utc>,
    pub energy: &'a EnergyFlowResult,
    pub climate: &'a ClimateScoreResult,
    pub vulnerability: &'a VulnerabilityResult,
    pub resilience: &'a ResilienceMetrics,
}

/// Trait for receiving engine events.
pub trait ResultSink: Send {
    /// Called when a recompute cycle published fresh results.
    fn on_cycle(&mut self, outcome: &CycleOutcome<'_>) -> anyhow::Result<()>;

    /// Called when a cycle was degraded and consumers are reading stale
    /// results.
    fn on_degraded(&mut self, reason: &str) -> anyhow::Result<()>;

    /// Called with aggregate engine statistics.
    fn on_status(&mut self, stats: &EngineStats) -> anyhow::Result<()>;
}

// ============================================================================
// Console sink: human-readable output to stderr
// ============================================================================

/// Human-readable sink writing one line per event to stderr.
pub struct ConsoleSink {
    quiet: bool,
}

impl ConsoleSink {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl ResultSink for ConsoleSink {
    fn on_cycle(&mut self, outcome: &CycleOutcome<'_>) -> anyhow::Result<()> {
        let ts = chrono::Local::now().format("%H:%M:%S");
        eprintln!(
            "[{ts}] cycle {}: energy {:.1}% ({}) | climate {:.0} ({}) | vulnerability {} ({} pts) | resilience {:.1}",
            outcome.cycle,
            outcome.energy.efficiency,
            outcome.energy.grade,
            outcome.climate.overall_score,
            outcome.climate.grade,
            outcome.vulnerability.risk_level,
            outcome.vulnerability.risk_points,
            outcome.resilience.overall_score,
        );
        Ok(())
    }

    fn on_degraded(&mut self, reason: &str) -> anyhow::Result<()> {
        let ts = chrono::Local::now().format("%H:%M:%S");
        eprintln!("[{ts}] cycle degraded, serving stale results: {reason}");
        Ok(())
    }

    fn on_status(&mut self, stats: &EngineStats) -> anyhow::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let ts = chrono::Local::now().format("%H:%M:%S");
        eprintln!(
            "[{ts}] {} cycle(s) | {} coalesced | {} unchanged-skipped | {} degraded",
            stats.cycle_count, stats.coalesced_count, stats.skipped_unchanged, stats.degraded_cycles,
        );
        Ok(())
    }
}

// ============================================================================
// NDJSON sink: one JSON object per event
// ============================================================================

/// Machine-readable sink writing one JSON object per line.
pub struct NdjsonSink {
    writer: Box<dyn Write + Send>,
}

impl NdjsonSink {
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self { writer }
    }

    fn write_event(&mut self, event: &serde_json::Value) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl ResultSink for NdjsonSink {
    fn on_cycle(&mut self, outcome: &CycleOutcome<'_>) -> anyhow::Result<()> {
        let event = serde_json::json!({
            "type": "cycle",
            "cycle": outcome.cycle,
            "timestamp": outcome.computed_at.to_rfc3339(),
            "energy": outcome.energy,
            "climate": outcome.climate,
            "vulnerability": outcome.vulnerability,
            "resilience": outcome.resilience,
        });
        self.write_event(&event)
    }

    fn on_degraded(&mut self, reason: &str) -> anyhow::Result<()> {
        let event = serde_json::json!({
            "type": "degraded",
            "reason": reason,
        });
        self.write_event(&event)
    }

    fn on_status(&mut self, stats: &EngineStats) -> anyhow::Result<()> {
        let event = serde_json::json!({
            "type": "status",
            "cycles": stats.cycle_count,
            "coalesced": stats.coalesced_count,
            "skipped_unchanged": stats.skipped_unchanged,
            "degraded": stats.degraded_cycles,
        });
        self.write_event(&event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    struct SharedWriter(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl Write for SharedWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_ndjson_sink_produces_valid_json() {
        let buffer = std::sync::Arc::new(std::sync::Mutex::new(Vec::<u8>::new()));
        let mut sink = NdjsonSink::new(Box::new(SharedWriter(buffer.clone())));

        let energy = domains::energy::assess(None, now());
        let climate = domains::climate::assess(None, now());
        let vulnerability = domains::vulnerability::assess(None, None, now());
        let resilience = domains::resilience::assess(None, None, now());

        sink.on_cycle(&CycleOutcome {
            cycle: 3,
            computed_at: now(),
            energy: &energy,
            climate: &climate,
            vulnerability: &vulnerability,
            resilience: &resilience,
        })
        .unwrap();

        let output = buffer.lock().unwrap();
        let line = String::from_utf8_lossy(&output);
        let parsed: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(parsed["type"], "cycle");
        assert_eq!(parsed["cycle"], 3);
        assert_eq!(parsed["energy"]["efficiency"], 0.0);
    }

    #[test]
    fn test_ndjson_sink_degraded_event() {
        let buffer = std::sync::Arc::new(std::sync::Mutex::new(Vec::<u8>::new()));
        let mut sink = NdjsonSink::new(Box::new(SharedWriter(buffer.clone())));

        sink.on_degraded("provider sent NaN").unwrap();

        let output = buffer.lock().unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(String::from_utf8_lossy(&output).trim()).unwrap();
        assert_eq!(parsed["type"], "degraded");
        assert_eq!(parsed["reason"], "provider sent NaN");
    }

    #[test]
    fn test_console_sink_does_not_panic() {
        let mut sink = ConsoleSink::new(true);
        let energy = domains::energy::assess(None, now());
        let climate = domains::climate::assess(None, now());
        let vulnerability = domains::vulnerability::assess(None, None, now());
        let resilience = domains::resilience::assess(None, None, now());

        sink.on_cycle(&CycleOutcome {
            cycle: 1,
            computed_at: now(),
            energy: &energy,
            climate: &climate,
            vulnerability: &vulnerability,
            resilience: &resilience,
        })
        .unwrap();
        sink.on_degraded("test").unwrap();
        sink.on_status(&EngineStats::default()).unwrap();
    }
}
