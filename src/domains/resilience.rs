//! Resilience assessment pipeline.
//!
//! Derives category scores from both snapshots and blends them into the
//! overall index. Infrastructure is a weighted-sum category with a fixed
//! ordered weight vector; community preparedness and the other derived
//! categories are simple averages. The two aggregation styles are part of
//! the contract and stay distinct per category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{ClimateSnapshot, EnergySnapshot};
use crate::scoring::{
    clamp_score, climate_composite, energy_efficiency, round2, simple_average, weighted_sum,
    ClimateComponents, INFRASTRUCTURE_WEIGHTS, RESILIENCE_WEIGHTS,
};

/// Published result of one resilience assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct ResilienceMetrics {
    /// Blended resilience index (0-100)
    pub overall_score: f64,
    /// Weighted infrastructure category (0-100)
    pub infrastructure_resilience: f64,
    /// Simple-average community category (0-100)
    pub community_preparedness: f64,
    /// Capacity to absorb and adapt to shocks (0-100)
    pub adaptation_capacity: f64,
    /// Economic stability category (0-100)
    pub economic_stability: f64,
    /// Social cohesion category (0-100)
    pub social_cohesion: f64,
    /// When this result was computed
    pub computed_at: DateTime<Utc>,
}

/// Assess the resilience domain.
///
/// Missing snapshots degrade the categories that need them to zero
/// scores; the blend itself always produces a result.
pub fn assess(
    energy: Option<&EnergySnapshot>,
    climate: Option<&ClimateSnapshot>,
    now: DateTime<Utc>,
) -> ResilienceMetrics {
    let infrastructure = infrastructure_score(energy, now);
    let community = community_score(climate, now);
    let economic = economic_score(energy, climate, now);
    let environmental = environmental_score(climate, now);

    let adaptation = adaptation_score(energy, climate, now);
    let social = social_cohesion_score(climate);

    let overall = weighted_sum(
        &[infrastructure, community, economic, environmental],
        RESILIENCE_WEIGHTS,
        now,
    );

    ResilienceMetrics {
        overall_score: overall.value,
        infrastructure_resilience: infrastructure,
        community_preparedness: community,
        adaptation_capacity: adaptation,
        economic_stability: economic,
        social_cohesion: social,
        computed_at: now,
    }
}

/// Weighted infrastructure category: capacity margin, mean node
/// efficiency, loss score, generation adequacy, in that fixed order.
fn infrastructure_score(energy: Option<&EnergySnapshot>, now: DateTime<Utc>) -> f64 {
    let Some(energy) = energy else {
        return 0.0;
    };
    weighted_sum(
        &[
            capacity_margin(energy),
            mean_node_efficiency(energy),
            clamp_score(100.0 - energy.distribution_losses_percent),
            generation_adequacy(energy),
        ],
        INFRASTRUCTURE_WEIGHTS,
        now,
    )
    .value
}

/// Simple-average community category: renewable adoption and
/// emission-reduction progress carry equal importance.
fn community_score(climate: Option<&ClimateSnapshot>, now: DateTime<Utc>) -> f64 {
    let Some(climate) = climate else {
        return 0.0;
    };
    simple_average(
        &[
            ("renewable_adoption", renewable_adoption(climate)),
            (
                "emission_progress",
                clamp_score(climate.emissions.reduction_percent * 2.0),
            ),
        ],
        now,
    )
    .value
}

fn economic_score(
    energy: Option<&EnergySnapshot>,
    climate: Option<&ClimateSnapshot>,
    now: DateTime<Utc>,
) -> f64 {
    let grid = energy.map_or(0.0, |e| {
        energy_efficiency(
            e.total_generation,
            e.total_consumption,
            e.distribution_losses_percent,
        )
    });
    let headroom = climate.map_or(0.0, emission_headroom);
    simple_average(&[("grid_efficiency", grid), ("emission_headroom", headroom)], now).value
}

fn environmental_score(climate: Option<&ClimateSnapshot>, now: DateTime<Utc>) -> f64 {
    let Some(climate) = climate else {
        return 0.0;
    };
    let components = ClimateComponents::from_measurements(
        climate.renewable_share_percent,
        climate.emissions.annual,
        climate.global_temperature,
    );
    climate_composite(components, now).value
}

fn adaptation_score(
    energy: Option<&EnergySnapshot>,
    climate: Option<&ClimateSnapshot>,
    now: DateTime<Utc>,
) -> f64 {
    let margin = energy.map_or(0.0, capacity_margin);
    let adoption = climate.map_or(0.0, renewable_adoption);
    simple_average(
        &[("capacity_margin", margin), ("renewable_adoption", adoption)],
        now,
    )
    .value
}

fn social_cohesion_score(climate: Option<&ClimateSnapshot>) -> f64 {
    let Some(climate) = climate else {
        return 0.0;
    };
    if climate.regions.is_empty() {
        return 0.0;
    }
    let sum: f64 = climate.regions.iter().map(|r| r.vulnerability_index).sum();
    let average = sum / climate.regions.len() as f64;
    round2(clamp_score(100.0 - average))
}

/// Headroom left in rated capacity across all nodes. No nodes means no
/// margin to speak of.
fn capacity_margin(energy: &EnergySnapshot) -> f64 {
    let total_capacity: f64 = energy.distribution_nodes.iter().map(|n| n.capacity).sum();
    if total_capacity <= 0.0 {
        return 0.0;
    }
    let total_load: f64 = energy
        .distribution_nodes
        .iter()
        .map(|n| n.current_load)
        .sum();
    clamp_score((total_capacity - total_load) / total_capacity * 100.0)
}

fn mean_node_efficiency(energy: &EnergySnapshot) -> f64 {
    if energy.distribution_nodes.is_empty() {
        return 0.0;
    }
    let sum: f64 = energy.distribution_nodes.iter().map(|n| n.efficiency).sum();
    clamp_score(sum / energy.distribution_nodes.len() as f64)
}

/// How well generation covers consumption, capped at parity.
fn generation_adequacy(energy: &EnergySnapshot) -> f64 {
    if energy.total_consumption <= 0.0 {
        return if energy.total_generation > 0.0 { 100.0 } else { 0.0 };
    }
    clamp_score((energy.total_generation / energy.total_consumption).min(1.0) * 100.0)
}

fn renewable_adoption(climate: &ClimateSnapshot) -> f64 {
    clamp_score(climate.renewable_share_percent * 2.0)
}

/// Distance below the emission target, at 100 when already within it.
fn emission_headroom(climate: &ClimateSnapshot) -> f64 {
    if climate.emissions.annual <= 0.0 || climate.emissions.target >= climate.emissions.annual {
        return 100.0;
    }
    clamp_score(climate.emissions.target / climate.emissions.annual * 100.0)
}
