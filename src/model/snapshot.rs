//! Snapshot record types and ingestion validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::error::{AssessError, Result};

/// One monitored node in the distribution grid (substation, feeder).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionNode {
    /// Stable entity id, unique within a snapshot
    pub id: String,
    /// Rated capacity in MW
    pub capacity: f64,
    /// Instantaneous load in MW
    pub current_load: f64,
    /// Conversion efficiency in percent (0-100)
    pub efficiency: f64,
}

impl DistributionNode {
    /// Load as a fraction of rated capacity. Zero-capacity nodes report 0.
    #[must_use]
    pub fn utilization(&self) -> f64 {
        if self.capacity <= 0.0 {
            return 0.0;
        }
        self.current_load / self.capacity
    }
}

/// Grid-wide energy telemetry at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergySnapshot {
    /// Total generation in MWh
    pub total_generation: f64,
    /// Total consumption in MWh
    pub total_consumption: f64,
    /// Distribution losses in percent (0-100)
    pub distribution_losses_percent: f64,
    /// Per-node telemetry
    pub distribution_nodes: Vec<DistributionNode>,
}

/// Annual emission figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionFigures {
    /// Annual emissions in Gt CO2e
    pub annual: f64,
    /// Annual target in Gt CO2e
    pub target: f64,
    /// Year-over-year reduction in percent (negative means growth)
    pub reduction_percent: f64,
}

/// Socio-economic vulnerability indicator for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionIndicator {
    /// Stable entity id, unique within a snapshot
    pub id: String,
    /// Composite vulnerability index (0-100, higher is worse)
    pub vulnerability_index: f64,
}

/// Climate measurements at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateSnapshot {
    /// Warming above pre-industrial baseline in degrees Celsius
    pub global_temperature: f64,
    /// Atmospheric CO2 in ppm
    pub co2_concentration: f64,
    /// Share of generation from renewables in percent (0-100)
    pub renewable_share_percent: f64,
    /// Emission figures
    pub emissions: EmissionFigures,
    /// Per-region vulnerability indicators
    pub regions: Vec<RegionIndicator>,
}

/// Immutable per-cycle input read from the data provider.
///
/// A missing sub-snapshot is not an error: domains that need it publish
/// zero/default scores instead. Only structurally invalid numbers are
/// rejected, at [`AssessmentSnapshot::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSnapshot {
    /// Energy telemetry, if the provider has any
    pub energy: Option<EnergySnapshot>,
    /// Climate measurements, if the provider has any
    pub climate: Option<ClimateSnapshot>,
    /// When the provider observed this state
    pub observed_at: DateTime<Utc>,
}

impl AssessmentSnapshot {
    /// Create a snapshot from its parts.
    #[must_use]
    pub fn new(
        energy: Option<EnergySnapshot>,
        climate: Option<ClimateSnapshot>,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            energy,
            climate,
            observed_at,
        }
    }

    /// Deterministic content fingerprint over the payload.
    ///
    /// The observation timestamp is excluded so an unchanged payload
    /// republished later is recognized as a no-op and skipped.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut input = Vec::new();
        if let Ok(energy_json) = serde_json::to_vec(&self.energy) {
            input.extend(energy_json);
        }
        if let Ok(climate_json) = serde_json::to_vec(&self.climate) {
            input.extend(climate_json);
        }
        xxh3_64(&input)
    }

    /// Validate the snapshot at the ingestion boundary.
    ///
    /// Rejects non-finite numbers and physically impossible negatives
    /// (capacity, generation, consumption). Values that are merely out of
    /// scoring range are left alone; the normalizer clamps them later.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref energy) = self.energy {
            check_finite("energy.total_generation", energy.total_generation)?;
            check_finite("energy.total_consumption", energy.total_consumption)?;
            check_finite(
                "energy.distribution_losses_percent",
                energy.distribution_losses_percent,
            )?;
            check_non_negative("energy.total_generation", energy.total_generation)?;
            check_non_negative("energy.total_consumption", energy.total_consumption)?;

            for node in &energy.distribution_nodes {
                let field = |name: &str| format!("energy.distribution_nodes[{}].{name}", node.id);
                check_finite(&field("capacity"), node.capacity)?;
                check_finite(&field("current_load"), node.current_load)?;
                check_finite(&field("efficiency"), node.efficiency)?;
                check_non_negative(&field("capacity"), node.capacity)?;
                check_non_negative(&field("current_load"), node.current_load)?;
            }
        }

        if let Some(ref climate) = self.climate {
            check_finite("climate.global_temperature", climate.global_temperature)?;
            check_finite("climate.co2_concentration", climate.co2_concentration)?;
            check_finite(
                "climate.renewable_share_percent",
                climate.renewable_share_percent,
            )?;
            check_finite("climate.emissions.annual", climate.emissions.annual)?;
            check_finite("climate.emissions.target", climate.emissions.target)?;
            check_finite(
                "climate.emissions.reduction_percent",
                climate.emissions.reduction_percent,
            )?;
            check_non_negative("climate.emissions.annual", climate.emissions.annual)?;

            for region in &climate.regions {
                check_finite(
                    &format!("climate.regions[{}].vulnerability_index", region.id),
                    region.vulnerability_index,
                )?;
            }
        }

        Ok(())
    }
}

fn check_finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AssessError::non_finite(field))
    }
}

fn check_non_negative(field: &str, value: f64) -> Result<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(AssessError::negative(field, value))
    }
}
