//! Weighted aggregation of normalized factors into composite scores.
//!
//! Composite scores are always recomputed whole; there is no partial
//! update path. Every score carries its per-factor breakdown so consumers
//! can show where a number came from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::normalize::{clamp_score, round2};
use super::weights::WeightTable;

/// One factor's contribution to a composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorContribution {
    /// Factor name from the category's weight table
    pub factor: String,
    /// Normalized value in [0, 100]
    pub normalized: f64,
    /// Weight applied to this factor
    pub weight: f64,
    /// `normalized * weight`
    pub weighted: f64,
}

/// A bounded composite score with its contributing breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct CompositeScore {
    /// Aggregate value in [0, 100], rounded to two decimals
    pub value: f64,
    /// Per-factor contributions, in category order
    pub breakdown: Vec<FactorContribution>,
    /// When this score was computed
    pub computed_at: DateTime<Utc>,
}

/// Combine values with a fixed ordered weight vector.
///
/// `values` must align positionally with `table`; extra values are
/// ignored, missing ones score 0. Each value is normalized before
/// weighting and the aggregate is clamped to [0, 100].
pub fn weighted_sum(values: &[f64], table: WeightTable, computed_at: DateTime<Utc>) -> CompositeScore {
    let breakdown: Vec<FactorContribution> = table
        .iter()
        .enumerate()
        .map(|(i, (factor, weight))| {
            let normalized = clamp_score(values.get(i).copied().unwrap_or(0.0));
            FactorContribution {
                factor: (*factor).to_string(),
                normalized,
                weight: *weight,
                weighted: normalized * weight,
            }
        })
        .collect();

    let total: f64 = breakdown.iter().map(|c| c.weighted).sum();

    CompositeScore {
        value: round2(clamp_score(total)),
        breakdown,
        computed_at,
    }
}

/// Combine equally important factors with a plain mean.
///
/// Empty input scores 0 (an absent category, not an error).
pub fn simple_average(
    factors: &[(&str, f64)],
    computed_at: DateTime<Utc>,
) -> CompositeScore {
    if factors.is_empty() {
        return CompositeScore {
            value: 0.0,
            breakdown: Vec::new(),
            computed_at,
        };
    }

    let weight = 1.0 / factors.len() as f64;
    let breakdown: Vec<FactorContribution> = factors
        .iter()
        .map(|(factor, value)| {
            let normalized = clamp_score(*value);
            FactorContribution {
                factor: (*factor).to_string(),
                normalized,
                weight,
                weighted: normalized * weight,
            }
        })
        .collect();

    let total: f64 = breakdown.iter().map(|c| c.weighted).sum();

    CompositeScore {
        value: round2(clamp_score(total)),
        breakdown,
        computed_at,
    }
}

/// Grid-wide energy efficiency in percent.
///
/// `(consumption / generation) * (100 - losses) / 100 * 100`, clamped to
/// [0, 100]. Zero (or negative) generation is a defined fallback of 0,
/// not an error.
#[must_use]
pub fn energy_efficiency(generation: f64, consumption: f64, losses_percent: f64) -> f64 {
    if generation <= 0.0 {
        return 0.0;
    }
    let delivered = (consumption / generation) * (100.0 - losses_percent) / 100.0 * 100.0;
    round2(clamp_score(delivered))
}

/// Component scores of the climate composite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateComponents {
    /// `min(100, renewable_share * 2)`
    pub renewable: f64,
    /// `max(0, 100 - (annual_emissions / 50) * 100)`
    pub emissions: f64,
    /// `max(0, 100 - (global_temperature - 1) * 50)`
    pub temperature: f64,
}

impl ClimateComponents {
    /// Derive the three component scores from raw climate measurements.
    #[must_use]
    pub fn from_measurements(
        renewable_share_percent: f64,
        annual_emissions: f64,
        global_temperature: f64,
    ) -> Self {
        Self {
            renewable: (renewable_share_percent * 2.0).clamp(0.0, 100.0),
            emissions: (100.0 - (annual_emissions / 50.0) * 100.0).max(0.0),
            temperature: (100.0 - (global_temperature - 1.0) * 50.0).max(0.0),
        }
    }
}

/// Overall climate composite: 0.4/0.4/0.2 blend, rounded to the nearest
/// whole point for display stability.
pub fn climate_composite(
    components: ClimateComponents,
    computed_at: DateTime<Utc>,
) -> CompositeScore {
    let mut score = weighted_sum(
        &[
            components.renewable,
            components.emissions,
            components.temperature,
        ],
        super::weights::CLIMATE_WEIGHTS,
        computed_at,
    );
    score.value = score.value.round();
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_weighted_sum_basic() {
        let table: WeightTable = &[("a", 0.5), ("b", 0.5)];
        let score = weighted_sum(&[80.0, 60.0], table, now());
        assert_eq!(score.value, 70.0);
        assert_eq!(score.breakdown.len(), 2);
        assert_eq!(score.breakdown[0].factor, "a");
        assert_eq!(score.breakdown[0].weighted, 40.0);
    }

    #[test]
    fn test_weighted_sum_clamps_inputs() {
        let table: WeightTable = &[("a", 1.0)];
        let score = weighted_sum(&[250.0], table, now());
        assert_eq!(score.value, 100.0);

        let score = weighted_sum(&[-40.0], table, now());
        assert_eq!(score.value, 0.0);
    }

    #[test]
    fn test_weighted_sum_missing_values_score_zero() {
        let table: WeightTable = &[("a", 0.5), ("b", 0.5)];
        let score = weighted_sum(&[100.0], table, now());
        assert_eq!(score.value, 50.0);
        assert_eq!(score.breakdown[1].normalized, 0.0);
    }

    #[test]
    fn test_simple_average() {
        let score = simple_average(&[("x", 40.0), ("y", 60.0), ("z", 80.0)], now());
        assert_eq!(score.value, 60.0);
        assert!((score.breakdown[0].weight - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_simple_average_empty_is_zero() {
        let score = simple_average(&[], now());
        assert_eq!(score.value, 0.0);
        assert!(score.breakdown.is_empty());
    }

    #[test]
    fn test_energy_efficiency_reference_case() {
        // generation=1000, consumption=800, losses=10% -> 72
        assert_eq!(energy_efficiency(1000.0, 800.0, 10.0), 72.0);
    }

    #[test]
    fn test_energy_efficiency_zero_generation() {
        assert_eq!(energy_efficiency(0.0, 800.0, 10.0), 0.0);
        assert_eq!(energy_efficiency(-5.0, 800.0, 10.0), 0.0);
    }

    #[test]
    fn test_energy_efficiency_bounded() {
        // Consumption above generation clamps at 100
        assert_eq!(energy_efficiency(100.0, 500.0, 0.0), 100.0);
        // Losses above 100% clamp at 0
        assert_eq!(energy_efficiency(100.0, 80.0, 150.0), 0.0);
    }

    #[test]
    fn test_climate_components_reference_case() {
        let c = ClimateComponents::from_measurements(50.0, 25.0, 1.5);
        assert_eq!(c.renewable, 100.0);
        assert_eq!(c.emissions, 50.0);
        assert_eq!(c.temperature, 75.0);
    }

    #[test]
    fn test_climate_composite_reference_case() {
        // 100*0.4 + 50*0.4 + 75*0.2 = 75
        let c = ClimateComponents::from_measurements(50.0, 25.0, 1.5);
        let score = climate_composite(c, now());
        assert_eq!(score.value, 75.0);
    }

    #[test]
    fn test_climate_components_floors() {
        let c = ClimateComponents::from_measurements(0.0, 120.0, 4.0);
        assert_eq!(c.renewable, 0.0);
        assert_eq!(c.emissions, 0.0);
        assert_eq!(c.temperature, 0.0);
    }

    #[test]
    fn test_climate_renewable_capped() {
        let c = ClimateComponents::from_measurements(80.0, 25.0, 1.5);
        assert_eq!(c.renewable, 100.0);
    }
}
