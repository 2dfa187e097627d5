//! Overflow redistributor.
//!
//! Clamps every primary category's earned credit to its quota and routes the
//! aggregate surplus into the single era-specific catch-all category. The
//! operation preserves the credit sum and is idempotent on already-clamped
//! input.

use std::collections::BTreeMap;

use crate::model::{Category, CurriculumEra};

/// Result of one redistribution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redistribution {
    /// Per-category credits with primaries clamped and the catch-all
    /// increased by the moved total.
    pub adjusted: BTreeMap<Category, u32>,
    /// Aggregate surplus moved into the catch-all.
    pub moved_to_catch_all: u32,
}

/// Redistribute per-category surplus into the era catch-all.
pub fn redistribute(
    credits: &BTreeMap<Category, u32>,
    quotas: &BTreeMap<Category, u32>,
    era: CurriculumEra,
) -> Redistribution {
    let mut adjusted = credits.clone();
    let mut total_overflow = 0u32;

    for category in era.primary_categories() {
        let earned = credits.get(&category).copied().unwrap_or(0);
        let required = quotas.get(&category).copied().unwrap_or(0);
        let overflow = earned.saturating_sub(required);
        if overflow > 0 {
            tracing::debug!(category = %category, overflow, "clamping category surplus");
            total_overflow += overflow;
            adjusted.insert(category, required);
        }
    }

    if total_overflow > 0 {
        let destination = era.catch_all();
        *adjusted.entry(destination).or_insert(0) += total_overflow;
        tracing::debug!(
            destination = %destination,
            moved = total_overflow,
            "routed overflow to catch-all"
        );
    }

    Redistribution {
        adjusted,
        moved_to_catch_all: total_overflow,
    }
}
