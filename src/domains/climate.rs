//! Climate-score assessment pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ClimateSnapshot;
use crate::scoring::{climate_composite, ClimateComponents, RiskLevel, CLIMATE_BANDS};

/// Direction of the emissions trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmissionTrend {
    Improving,
    Flat,
    Worsening,
}

/// Direction of the temperature trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureTrend {
    Stable,
    Rising,
    Critical,
}

/// Direction of renewable adoption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenewableTrend {
    Growing,
    Lagging,
}

/// Category scores behind the climate composite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateCategories {
    pub renewable: f64,
    pub emissions: f64,
    pub temperature: f64,
}

/// Trajectory labels derived from the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClimateTrends {
    pub emissions: EmissionTrend,
    pub temperature: TemperatureTrend,
    pub renewables: RenewableTrend,
}

/// Published result of one climate assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct ClimateScoreResult {
    /// Composite score (0-100, whole points)
    pub overall_score: f64,
    /// Ordinal grade of the composite
    pub grade: RiskLevel,
    /// Component scores
    pub categories: ClimateCategories,
    /// Trajectory labels
    pub trends: ClimateTrends,
    /// When this result was computed
    pub computed_at: DateTime<Utc>,
}

/// Assess the climate domain.
///
/// A missing snapshot yields the zero-score result, never an error.
pub fn assess(snapshot: Option<&ClimateSnapshot>, now: DateTime<Utc>) -> ClimateScoreResult {
    let Some(snapshot) = snapshot else {
        return empty_result(now);
    };

    let components = ClimateComponents::from_measurements(
        snapshot.renewable_share_percent,
        snapshot.emissions.annual,
        snapshot.global_temperature,
    );
    let composite = climate_composite(components, now);

    ClimateScoreResult {
        overall_score: composite.value,
        grade: RiskLevel::from_score(composite.value, &CLIMATE_BANDS),
        categories: ClimateCategories {
            renewable: components.renewable,
            emissions: components.emissions,
            temperature: components.temperature,
        },
        trends: derive_trends(snapshot),
        computed_at: now,
    }
}

/// Trajectory labels from snapshot figures alone.
fn derive_trends(snapshot: &ClimateSnapshot) -> ClimateTrends {
    let reducing = snapshot.emissions.reduction_percent > 0.0;
    let within_target = snapshot.emissions.annual <= snapshot.emissions.target;
    let emissions = match (reducing, within_target) {
        (true, true) => EmissionTrend::Improving,
        (false, false) => EmissionTrend::Worsening,
        _ => EmissionTrend::Flat,
    };

    let temperature = if snapshot.global_temperature >= 2.0 {
        TemperatureTrend::Critical
    } else if snapshot.global_temperature >= 1.5 {
        TemperatureTrend::Rising
    } else {
        TemperatureTrend::Stable
    };

    let renewables = if snapshot.renewable_share_percent >= 30.0 {
        RenewableTrend::Growing
    } else {
        RenewableTrend::Lagging
    };

    ClimateTrends {
        emissions,
        temperature,
        renewables,
    }
}

fn empty_result(now: DateTime<Utc>) -> ClimateScoreResult {
    ClimateScoreResult {
        overall_score: 0.0,
        grade: RiskLevel::from_score(0.0, &CLIMATE_BANDS),
        categories: ClimateCategories {
            renewable: 0.0,
            emissions: 0.0,
            temperature: 0.0,
        },
        trends: ClimateTrends {
            emissions: EmissionTrend::Flat,
            temperature: TemperatureTrend::Stable,
            renewables: RenewableTrend::Lagging,
        },
        computed_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EmissionFigures;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn snapshot() -> ClimateSnapshot {
        ClimateSnapshot {
            global_temperature: 1.5,
            co2_concentration: 420.0,
            renewable_share_percent: 50.0,
            emissions: EmissionFigures {
                annual: 25.0,
                target: 30.0,
                reduction_percent: 2.0,
            },
            regions: Vec::new(),
        }
    }

    #[test]
    fn test_assess_reference_score() {
        // renewable=100, emissions=50, temperature=75 -> 40+20+15 = 75
        let result = assess(Some(&snapshot()), now());
        assert_eq!(result.overall_score, 75.0);
        assert_eq!(result.categories.renewable, 100.0);
        assert_eq!(result.categories.emissions, 50.0);
        assert_eq!(result.categories.temperature, 75.0);
    }

    #[test]
    fn test_assess_grade() {
        let result = assess(Some(&snapshot()), now());
        assert_eq!(result.grade, RiskLevel::Low);
    }

    #[test]
    fn test_assess_missing_snapshot_is_zero_score() {
        let result = assess(None, now());
        assert_eq!(result.overall_score, 0.0);
        assert_eq!(result.grade, RiskLevel::Critical);
    }

    #[test]
    fn test_trends_improving() {
        let result = assess(Some(&snapshot()), now());
        assert_eq!(result.trends.emissions, EmissionTrend::Improving);
        assert_eq!(result.trends.temperature, TemperatureTrend::Rising);
        assert_eq!(result.trends.renewables, RenewableTrend::Growing);
    }

    #[test]
    fn test_trends_worsening() {
        let mut s = snapshot();
        s.emissions.annual = 40.0;
        s.emissions.target = 30.0;
        s.emissions.reduction_percent = -1.0;
        s.global_temperature = 2.3;
        s.renewable_share_percent = 12.0;

        let result = assess(Some(&s), now());
        assert_eq!(result.trends.emissions, EmissionTrend::Worsening);
        assert_eq!(result.trends.temperature, TemperatureTrend::Critical);
        assert_eq!(result.trends.renewables, RenewableTrend::Lagging);
    }

    #[test]
    fn test_trends_flat_when_signals_disagree() {
        let mut s = snapshot();
        // Reducing, but still above target
        s.emissions.annual = 40.0;
        s.emissions.target = 30.0;
        s.emissions.reduction_percent = 1.5;

        let result = assess(Some(&s), now());
        assert_eq!(result.trends.emissions, EmissionTrend::Flat);
    }

    #[test]
    fn test_assess_idempotent() {
        let s = snapshot();
        let a = assess(Some(&s), now());
        let b = assess(Some(&s), now());
        assert_eq!(a, b);
    }
}
