//! Input data model for the assessment engine.
//!
//! Snapshots are immutable reads of upstream state, produced and owned by
//! the external data provider. The engine never mutates them; every
//! orchestration pass recomputes all published results from scratch.

mod snapshot;

pub use snapshot::{
    AssessmentSnapshot, ClimateSnapshot, DistributionNode, EmissionFigures, EnergySnapshot,
    RegionIndicator,
};
