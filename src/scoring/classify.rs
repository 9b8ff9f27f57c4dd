//! Ordinal risk classification.
//!
//! Two classifier styles: score bands (a composite score maps to a level,
//! lower score = higher risk) and accumulated risk points (independent
//! signals contribute points, higher total = higher risk). Both check
//! thresholds from the strictest label down so the strictest match wins,
//! and both are monotonic by construction.

use serde::{Deserialize, Serialize};

/// Ordinal risk level.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Classify a composite score against a domain's fixed bands.
    #[must_use]
    pub fn from_score(score: f64, bands: &ScoreBands) -> Self {
        if score < bands.critical_below {
            Self::Critical
        } else if score < bands.high_below {
            Self::High
        } else if score < bands.medium_below {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Classify an accumulated risk-point total.
    ///
    /// Fixed boundaries: >= 6 critical, >= 4 high, >= 3 medium, else low.
    #[must_use]
    pub const fn from_points(points: u32) -> Self {
        match points {
            6.. => Self::Critical,
            4..=5 => Self::High,
            3 => Self::Medium,
            _ => Self::Low,
        }
    }

    /// Lowercase label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Whether this level warrants urgent action
    #[must_use]
    pub const fn is_elevated(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monotonic per-domain score bands.
///
/// Scores below `critical_below` are critical, below `high_below` high,
/// below `medium_below` medium, otherwise low. Bounds must be strictly
/// increasing; the fixed tables below are, and
/// [`ScoreBands::is_monotonic`] guards any future additions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBands {
    pub critical_below: f64,
    pub high_below: f64,
    pub medium_below: f64,
}

impl ScoreBands {
    /// Whether the band boundaries are strictly increasing.
    #[must_use]
    pub fn is_monotonic(&self) -> bool {
        self.critical_below < self.high_below && self.high_below < self.medium_below
    }
}

/// Bands for grid efficiency grading.
pub const ENERGY_BANDS: ScoreBands = ScoreBands {
    critical_below: 40.0,
    high_below: 60.0,
    medium_below: 85.0,
};

/// Bands for the climate composite.
pub const CLIMATE_BANDS: ScoreBands = ScoreBands {
    critical_below: 30.0,
    high_below: 50.0,
    medium_below: 70.0,
};
