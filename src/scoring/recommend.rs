//! Rule-based recommendation generation.
//!
//! Pure functions from a classification (plus the numbers behind it) to a
//! prioritized action list. No randomness anywhere: the same inputs yield
//! the same list in the same order. Urgent rules fire at elevated risk
//! and sort ahead of the baseline remediation set.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::classify::RiskLevel;
use super::outliers::OutlierRecord;

/// Grid efficiency below this appends the remediation set.
const ENERGY_COMPETENCY_THRESHOLD: f64 = 85.0;

/// Average regional vulnerability above this appends the remediation set.
const VULNERABILITY_COMPETENCY_THRESHOLD: f64 = 50.0;

/// One recommended action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Stable rule id (e.g. "EN-101")
    pub id: String,
    /// Priority (1 = most urgent, 5 = lowest)
    pub priority: u8,
    /// Human-readable action
    pub message: String,
    /// Estimated score impact if acted on (0-100)
    pub estimated_impact: Option<f64>,
}

impl Recommendation {
    fn new(id: &str, priority: u8, message: impl Into<String>, impact: Option<f64>) -> Self {
        Self {
            id: id.to_string(),
            priority,
            message: message.into(),
            estimated_impact: impact,
        }
    }
}

/// Sort by priority ascending, then estimated impact descending.
pub fn sort_recommendations(recommendations: &mut [Recommendation]) {
    recommendations.sort_by(|a, b| {
        a.priority.cmp(&b.priority).then_with(|| {
            b.estimated_impact
                .unwrap_or(0.0)
                .partial_cmp(&a.estimated_impact.unwrap_or(0.0))
                .unwrap_or(Ordering::Equal)
        })
    });
}

/// Recommendations for the energy-flow domain.
///
/// Urgent actions at high/critical grade, remediation below the
/// competency threshold, nothing when the grid is healthy.
#[must_use]
pub fn energy_recommendations(
    grade: RiskLevel,
    efficiency: f64,
    bottlenecks: &[OutlierRecord],
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if grade.is_elevated() {
        recommendations.push(Recommendation::new(
            "EN-101",
            1,
            "Shed non-critical load until distribution efficiency recovers",
            Some(15.0),
        ));
        recommendations.push(Recommendation::new(
            "EN-102",
            1,
            "Dispatch reserve generation to relieve overloaded feeders",
            Some(10.0),
        ));
    }

    if efficiency < ENERGY_COMPETENCY_THRESHOLD {
        recommendations.push(Recommendation::new(
            "EN-201",
            2,
            format!(
                "Audit transmission losses: grid efficiency is {efficiency:.1}%, target {ENERGY_COMPETENCY_THRESHOLD:.0}%"
            ),
            Some((ENERGY_COMPETENCY_THRESHOLD - efficiency).max(0.0)),
        ));
        recommendations.push(Recommendation::new(
            "EN-202",
            3,
            "Rebalance feeder assignments to flatten peak utilization",
            Some(5.0),
        ));
    }

    if !bottlenecks.is_empty() {
        let worst = &bottlenecks[0];
        recommendations.push(Recommendation::new(
            "EN-301",
            2,
            format!(
                "Inspect {} congested node(s); worst is '{}' at impact {:.1}",
                bottlenecks.len(),
                worst.id,
                worst.impact
            ),
            Some(worst.impact),
        ));
    }

    sort_recommendations(&mut recommendations);
    recommendations
}

/// Recommendations for the vulnerability domain.
#[must_use]
pub fn vulnerability_recommendations(
    risk_level: RiskLevel,
    average_vulnerability: f64,
    affected_regions: usize,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if risk_level.is_elevated() {
        recommendations.push(Recommendation::new(
            "VU-101",
            1,
            "Activate regional contingency plans for high-vulnerability areas",
            Some(20.0),
        ));
        recommendations.push(Recommendation::new(
            "VU-102",
            1,
            "Pre-position emergency generation and cooling capacity",
            Some(12.0),
        ));
    }

    if average_vulnerability > VULNERABILITY_COMPETENCY_THRESHOLD {
        recommendations.push(Recommendation::new(
            "VU-201",
            2,
            format!(
                "Prioritize hardening programs: average vulnerability index is {average_vulnerability:.1}"
            ),
            Some(average_vulnerability - VULNERABILITY_COMPETENCY_THRESHOLD),
        ));
    }

    if affected_regions > 0 {
        recommendations.push(Recommendation::new(
            "VU-301",
            3,
            format!("Review adaptation funding for {affected_regions} affected region(s)"),
            None,
        ));
    }

    sort_recommendations(&mut recommendations);
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::outliers::Severity;

    fn bottleneck(id: &str, impact: f64) -> OutlierRecord {
        OutlierRecord {
            id: id.to_string(),
            severity: Severity::Medium,
            impact,
        }
    }

    #[test]
    fn test_energy_healthy_grid_has_no_recommendations() {
        let recs = energy_recommendations(RiskLevel::Low, 95.0, &[]);
        assert!(recs.is_empty());
    }

    #[test]
    fn test_energy_elevated_grade_is_non_empty() {
        for grade in [RiskLevel::High, RiskLevel::Critical] {
            let recs = energy_recommendations(grade, 55.0, &[]);
            assert!(!recs.is_empty(), "{grade:?} must produce recommendations");
            assert_eq!(recs[0].priority, 1);
        }
    }

    #[test]
    fn test_energy_urgent_rules_sort_first() {
        let recs = energy_recommendations(RiskLevel::High, 55.0, &[bottleneck("n1", 45.0)]);
        let ids: Vec<&str> = recs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids[0], "EN-101");
        assert_eq!(ids[1], "EN-102");
        // Priority 2 rules follow, highest impact first
        assert_eq!(ids[2], "EN-301");
        assert_eq!(ids[3], "EN-201");
    }

    #[test]
    fn test_energy_below_competency_without_elevation() {
        let recs = energy_recommendations(RiskLevel::Medium, 80.0, &[]);
        let ids: Vec<&str> = recs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["EN-201", "EN-202"]);
    }

    #[test]
    fn test_energy_deterministic() {
        let bottlenecks = vec![bottleneck("n1", 30.0), bottleneck("n2", 20.0)];
        let a = energy_recommendations(RiskLevel::Critical, 40.0, &bottlenecks);
        let b = energy_recommendations(RiskLevel::Critical, 40.0, &bottlenecks);
        assert_eq!(a, b);
    }

    #[test]
    fn test_vulnerability_elevated_is_non_empty() {
        let recs = vulnerability_recommendations(RiskLevel::Critical, 75.0, 3);
        assert!(!recs.is_empty());
        assert!(recs.iter().any(|r| r.id == "VU-101"));
    }

    #[test]
    fn test_vulnerability_low_risk_is_minimal() {
        let recs = vulnerability_recommendations(RiskLevel::Low, 20.0, 0);
        assert!(recs.is_empty());
    }

    #[test]
    fn test_vulnerability_ordering() {
        let recs = vulnerability_recommendations(RiskLevel::High, 60.0, 2);
        let priorities: Vec<u8> = recs.iter().map(|r| r.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort_unstable();
        assert_eq!(priorities, sorted);
    }
}
