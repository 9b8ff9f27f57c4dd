//! Data-provider boundary.
//!
//! The engine never reads upstream state ad hoc; it consumes immutable
//! snapshots from a [`SnapshotProvider`] and recomputes only when the
//! payload actually changed.

use crate::model::AssessmentSnapshot;

/// The external data-provider collaborator.
///
/// Implementations own acquisition and persistence; the engine only sees
/// complete snapshots.
pub trait SnapshotProvider: Send + Sync {
    /// Read the most recent upstream state.
    fn latest(&self) -> anyhow::Result<AssessmentSnapshot>;
}

/// Detects real payload changes between polls via the snapshot
/// fingerprint, so a provider that republishes identical data does not
/// trigger recomputation.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    last: Option<u64>,
}

impl ChangeDetector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the snapshot and report whether its payload differs from
    /// the previously seen one. The first snapshot always counts as a
    /// change.
    pub fn is_changed(&mut self, snapshot: &AssessmentSnapshot) -> bool {
        let fingerprint = snapshot.fingerprint();
        let changed = self.last != Some(fingerprint);
        self.last = Some(fingerprint);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EmissionFigures, ClimateSnapshot};
    use chrono::{TimeZone, Utc};

    fn snapshot(renewable_share: f64) -> AssessmentSnapshot {
        AssessmentSnapshot::new(
            None,
            Some(ClimateSnapshot {
                global_temperature: 1.4,
                co2_concentration: 420.0,
                renewable_share_percent: renewable_share,
                emissions: EmissionFigures {
                    annual: 25.0,
                    target: 20.0,
                    reduction_percent: 1.0,
                },
                regions: Vec::new(),
            }),
            Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_first_snapshot_is_a_change() {
        let mut detector = ChangeDetector::new();
        assert!(detector.is_changed(&snapshot(50.0)));
    }

    #[test]
    fn test_identical_payload_is_not_a_change() {
        let mut detector = ChangeDetector::new();
        assert!(detector.is_changed(&snapshot(50.0)));
        assert!(!detector.is_changed(&snapshot(50.0)));
    }

    #[test]
    fn test_changed_payload_is_a_change() {
        let mut detector = ChangeDetector::new();
        assert!(detector.is_changed(&snapshot(50.0)));
        assert!(detector.is_changed(&snapshot(51.0)));
        // And flips back correctly
        assert!(detector.is_changed(&snapshot(50.0)));
    }
}
