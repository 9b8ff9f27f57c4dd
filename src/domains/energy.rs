//! Energy-flow assessment pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::EnergySnapshot;
use crate::scoring::{
    detect_bottlenecks, energy_efficiency, energy_recommendations, round2, OutlierRecord,
    Recommendation, RiskLevel, ENERGY_BANDS,
};

/// Optimization guidance attached to an energy-flow result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationSummary {
    /// Consumption (MWh) recoverable at ideal efficiency
    pub potential_savings: f64,
    /// Prioritized actions
    pub recommendations: Vec<Recommendation>,
}

/// Published result of one energy-flow assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct EnergyFlowResult {
    /// Grid-wide efficiency in percent (0-100)
    pub efficiency: f64,
    /// Ordinal grade of the efficiency score
    pub grade: RiskLevel,
    /// Congested or inefficient nodes, ranked by impact (at most 5)
    pub bottlenecks: Vec<OutlierRecord>,
    /// Optimization guidance
    pub optimization: OptimizationSummary,
    /// When this result was computed
    pub computed_at: DateTime<Utc>,
}

/// Assess the energy-flow domain.
///
/// A missing snapshot yields the zero-score result, never an error.
pub fn assess(snapshot: Option<&EnergySnapshot>, now: DateTime<Utc>) -> EnergyFlowResult {
    let Some(snapshot) = snapshot else {
        return empty_result(now);
    };

    let efficiency = energy_efficiency(
        snapshot.total_generation,
        snapshot.total_consumption,
        snapshot.distribution_losses_percent,
    );
    let grade = RiskLevel::from_score(efficiency, &ENERGY_BANDS);
    let bottlenecks = detect_bottlenecks(&snapshot.distribution_nodes);

    let potential_savings = round2(snapshot.total_consumption * (100.0 - efficiency) / 100.0);
    let recommendations = energy_recommendations(grade, efficiency, &bottlenecks);

    EnergyFlowResult {
        efficiency,
        grade,
        bottlenecks,
        optimization: OptimizationSummary {
            potential_savings,
            recommendations,
        },
        computed_at: now,
    }
}

fn empty_result(now: DateTime<Utc>) -> EnergyFlowResult {
    EnergyFlowResult {
        efficiency: 0.0,
        grade: RiskLevel::from_score(0.0, &ENERGY_BANDS),
        bottlenecks: Vec::new(),
        optimization: OptimizationSummary {
            potential_savings: 0.0,
            recommendations: Vec::new(),
        },
        computed_at: now,
    }
}
