//! Outlier detection over grid entities.
//!
//! Scans a node collection for entities crossing the utilization or
//! efficiency thresholds and returns a bounded, ranked subset. Ranking
//! happens before truncation so the returned subset is stable and
//! reproducible.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::model::DistributionNode;

/// Maximum number of outlier records returned per scan.
pub const MAX_OUTLIERS: usize = 5;

/// Efficiency below this marks an entity as an outlier.
const EFFICIENCY_THRESHOLD: f64 = 85.0;

/// Efficiency below this escalates severity to high.
const EFFICIENCY_CRITICAL: f64 = 70.0;

/// Load above this fraction of capacity marks an entity as an outlier.
const UTILIZATION_THRESHOLD: f64 = 0.9;

/// Outlier severity band.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Band an entity's efficiency.
    #[must_use]
    pub fn from_efficiency(efficiency: f64) -> Self {
        if efficiency < EFFICIENCY_CRITICAL {
            Self::High
        } else if efficiency < EFFICIENCY_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Lowercase label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// One entity flagged by the detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierRecord {
    /// Entity id from the snapshot
    pub id: String,
    /// Severity band derived from efficiency
    pub severity: Severity,
    /// Distance from the healthy baseline: `max(0, 100 - efficiency)`
    pub impact: f64,
}

/// Scan nodes for bottlenecks.
///
/// Selection: `efficiency < 85 || current_load > 0.9 * capacity`. Output
/// is sorted by descending impact, ties broken by ascending id, truncated
/// to [`MAX_OUTLIERS`]. An empty or fully healthy collection yields an
/// empty result.
#[must_use]
pub fn detect_bottlenecks(nodes: &[DistributionNode]) -> Vec<OutlierRecord> {
    let mut records: Vec<OutlierRecord> = nodes
        .iter()
        .filter(|node| is_outlier(node))
        .map(|node| OutlierRecord {
            id: node.id.clone(),
            severity: Severity::from_efficiency(node.efficiency),
            impact: (100.0 - node.efficiency).max(0.0),
        })
        .collect();

    records.sort_by(|a, b| {
        b.impact
            .partial_cmp(&a.impact)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    records.truncate(MAX_OUTLIERS);
    records
}

fn is_outlier(node: &DistributionNode) -> bool {
    node.efficiency < EFFICIENCY_THRESHOLD
        || node.current_load > UTILIZATION_THRESHOLD * node.capacity
}
