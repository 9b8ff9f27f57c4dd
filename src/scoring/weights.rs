//! Fixed factor weight tables.
//!
//! Two aggregation styles coexist and must stay distinct per category:
//! weighted-sum categories carry a fixed ordered weight vector summing to
//! 1.0; simple-average categories treat every sub-factor as equally
//! important. Weight tables are compile-time constants, not tunables.

use indexmap::IndexMap;

/// Ordered (factor, weight) pairs for one weighted-sum category.
pub type WeightTable = &'static [(&'static str, f64)];

/// How a category combines its sub-factors.
#[derive(Debug, Clone, Copy)]
pub enum CategoryWeights {
    /// Fixed ordered weight vector; weights sum to 1.0
    Weighted(WeightTable),
    /// Equal importance; plain mean
    Average,
}

/// Infrastructure resilience sub-factors, in fixed order.
pub const INFRASTRUCTURE_WEIGHTS: WeightTable = &[
    ("capacity_margin", 0.30),
    ("node_efficiency", 0.25),
    ("loss_score", 0.25),
    ("generation_adequacy", 0.20),
];

/// Climate composite components, in fixed order.
pub const CLIMATE_WEIGHTS: WeightTable = &[
    ("renewable", 0.4),
    ("emissions", 0.4),
    ("temperature", 0.2),
];

/// Top-level resilience category weights, in fixed order.
pub const RESILIENCE_WEIGHTS: WeightTable = &[
    ("infrastructure", 0.30),
    ("community", 0.25),
    ("economic", 0.25),
    ("environmental", 0.20),
];

/// Weighted-sum tables used by the engine, for invariant checks.
pub const ALL_WEIGHT_TABLES: &[(&str, WeightTable)] = &[
    ("infrastructure", INFRASTRUCTURE_WEIGHTS),
    ("climate", CLIMATE_WEIGHTS),
    ("resilience", RESILIENCE_WEIGHTS),
];

/// The engine's factor hierarchy: category name to aggregation style, in
/// evaluation order.
#[must_use]
pub fn factor_hierarchy() -> IndexMap<&'static str, CategoryWeights> {
    IndexMap::from([
        (
            "infrastructure",
            CategoryWeights::Weighted(INFRASTRUCTURE_WEIGHTS),
        ),
        ("community_preparedness", CategoryWeights::Average),
        ("climate", CategoryWeights::Weighted(CLIMATE_WEIGHTS)),
        ("resilience", CategoryWeights::Weighted(RESILIENCE_WEIGHTS)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_tables_sum_to_one() {
        for (name, table) in ALL_WEIGHT_TABLES {
            let sum: f64 = table.iter().map(|(_, w)| w).sum();
            assert!(
                (sum - 1.0).abs() < 0.001,
                "{name} weights sum to {sum}, expected 1.0"
            );
        }
    }

    #[test]
    fn test_weight_tables_have_no_duplicate_factors() {
        for (name, table) in ALL_WEIGHT_TABLES {
            let mut seen = std::collections::HashSet::new();
            for (factor, _) in *table {
                assert!(seen.insert(factor), "{name} lists '{factor}' twice");
            }
        }
    }

    #[test]
    fn test_factor_hierarchy_preserves_order_and_styles() {
        let hierarchy = factor_hierarchy();
        let names: Vec<&str> = hierarchy.keys().copied().collect();
        assert_eq!(
            names,
            vec![
                "infrastructure",
                "community_preparedness",
                "climate",
                "resilience"
            ]
        );
        assert!(matches!(
            hierarchy["community_preparedness"],
            CategoryWeights::Average
        ));
        for (name, style) in &hierarchy {
            if let CategoryWeights::Weighted(table) = style {
                let sum: f64 = table.iter().map(|(_, w)| w).sum();
                assert!((sum - 1.0).abs() < 0.001, "{name} weights sum to {sum}");
            }
        }
    }

    #[test]
    fn test_infrastructure_weight_order() {
        // The weight vector is positional; a reorder silently rescores.
        let weights: Vec<f64> = INFRASTRUCTURE_WEIGHTS.iter().map(|(_, w)| *w).collect();
        assert_eq!(weights, vec![0.30, 0.25, 0.25, 0.20]);
    }
}
