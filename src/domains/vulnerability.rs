//! Vulnerability assessment pipeline.
//!
//! Accumulates risk points from three independent signals (temperature,
//! grid stability, renewable share) and classifies the total. Regional
//! indicators feed the affected-region list and the remediation rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::model::{ClimateSnapshot, EnergySnapshot, RegionIndicator};
use crate::scoring::{energy_efficiency, round2, vulnerability_recommendations, Recommendation, RiskLevel};

/// Regions at or above this index are reported as affected.
const AFFECTED_REGION_THRESHOLD: f64 = 70.0;

/// Published result of one vulnerability assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct VulnerabilityResult {
    /// Classified risk level
    pub risk_level: RiskLevel,
    /// Accumulated risk-point total behind the classification
    pub risk_points: u32,
    /// Mean regional vulnerability index (0 when no regions)
    pub average_vulnerability: f64,
    /// Regions at or above the affected threshold, worst first
    pub affected_regions: Vec<RegionIndicator>,
    /// Prioritized actions
    pub recommendations: Vec<Recommendation>,
    /// When this result was computed
    pub computed_at: DateTime<Utc>,
}

/// Assess the vulnerability domain.
///
/// A missing climate snapshot yields the zero-score result. The energy
/// snapshot only sharpens the grid-stability signal; when absent, that
/// signal takes its middle value.
pub fn assess(
    climate: Option<&ClimateSnapshot>,
    energy: Option<&EnergySnapshot>,
    now: DateTime<Utc>,
) -> VulnerabilityResult {
    let Some(climate) = climate else {
        return empty_result(now);
    };

    let risk_points = temperature_risk(climate.global_temperature)
        + grid_stability_risk(energy)
        + renewable_share_risk(climate.renewable_share_percent);
    let risk_level = RiskLevel::from_points(risk_points);

    let average_vulnerability = average_index(&climate.regions);
    let affected_regions = affected_regions(&climate.regions);
    let recommendations = vulnerability_recommendations(
        risk_level,
        average_vulnerability,
        affected_regions.len(),
    );

    VulnerabilityResult {
        risk_level,
        risk_points,
        average_vulnerability,
        affected_regions,
        recommendations,
        computed_at: now,
    }
}

/// Temperature signal: 1-2 points.
fn temperature_risk(global_temperature: f64) -> u32 {
    if global_temperature >= 2.0 {
        2
    } else {
        1
    }
}

/// Grid-stability signal: 1-3 points, from grid efficiency.
///
/// Missing telemetry contributes the middle value rather than the best or
/// worst case.
fn grid_stability_risk(energy: Option<&EnergySnapshot>) -> u32 {
    let Some(energy) = energy else {
        return 2;
    };
    let efficiency = energy_efficiency(
        energy.total_generation,
        energy.total_consumption,
        energy.distribution_losses_percent,
    );
    if efficiency < 70.0 {
        3
    } else if efficiency < 85.0 {
        2
    } else {
        1
    }
}

/// Renewable-share signal: 1-2 points.
fn renewable_share_risk(share_percent: f64) -> u32 {
    if share_percent < 25.0 {
        2
    } else {
        1
    }
}

fn average_index(regions: &[RegionIndicator]) -> f64 {
    if regions.is_empty() {
        return 0.0;
    }
    let sum: f64 = regions.iter().map(|r| r.vulnerability_index).sum();
    round2(sum / regions.len() as f64)
}

fn affected_regions(regions: &[RegionIndicator]) -> Vec<RegionIndicator> {
    let mut affected: Vec<RegionIndicator> = regions
        .iter()
        .filter(|r| r.vulnerability_index >= AFFECTED_REGION_THRESHOLD)
        .cloned()
        .collect();
    affected.sort_by(|a, b| {
        b.vulnerability_index
            .partial_cmp(&a.vulnerability_index)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    affected
}

fn empty_result(now: DateTime<Utc>) -> VulnerabilityResult {
    VulnerabilityResult {
        risk_level: RiskLevel::Low,
        risk_points: 0,
        average_vulnerability: 0.0,
        affected_regions: Vec::new(),
        recommendations: Vec::new(),
        computed_at: now,
    }
}
