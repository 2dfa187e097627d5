//! Credit aggregator.
//!
//! Sums transcript credits per declared category, then grants
//! substitution-unlocked credit for discontinued courses whose replacements
//! were taken. The substitution grant is additive: the replacement's own
//! credits stay in their declared category, and the discontinued course's
//! credits are added on top, in the category the classifier assigns to the
//! discontinued name. This generous policy is deliberate and is surfaced as
//! a warning entry per application so it can be audited.

use std::collections::{BTreeMap, HashMap};

use crate::classifier::classify;
use crate::model::{Category, RequirementCatalog, TakenCourse};
use crate::progress::EvalWarning;
use crate::resolver::{resolve, taken_names, taken_replacements, RuleIndex, Satisfaction};

/// Pre-redistribution credit totals plus the audit trail gathered while
/// computing them.
#[derive(Debug, Clone, Default)]
pub struct AggregatedCredits {
    pub by_category: BTreeMap<Category, u32>,
    pub warnings: Vec<EvalWarning>,
}

impl AggregatedCredits {
    /// Sum over all categories. This is the total that stays invariant under
    /// overflow redistribution.
    pub fn total(&self) -> u32 {
        self.by_category.values().sum()
    }
}

/// Aggregate transcript credits per category, including substitution credit.
pub fn aggregate(taken: &[TakenCourse], catalog: &RequirementCatalog) -> AggregatedCredits {
    let mut result = AggregatedCredits::default();

    // Base pass: every line counts toward its declared category. Duplicate
    // names are summed, not deduplicated, and flagged for audit.
    let mut occurrences: HashMap<&str, u32> = HashMap::new();
    for course in taken {
        *result.by_category.entry(course.category).or_insert(0) += course.credits;
        *occurrences.entry(course.name.as_str()).or_insert(0) += 1;
    }
    let mut duplicates: Vec<_> = occurrences
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .collect();
    duplicates.sort_unstable();
    for (name, count) in duplicates {
        result.warnings.push(EvalWarning::DuplicateTakenCourse {
            course: name.to_string(),
            occurrences: count,
        });
    }

    // Substitution pass: each discontinued course contributes at most once,
    // and only when it was not taken directly.
    let names = taken_names(taken);
    let index = RuleIndex::new(&catalog.replacement_rules);
    for rule in &catalog.replacement_rules {
        if names.contains(rule.discontinued.name.as_str()) {
            continue;
        }

        let Satisfaction::Replaced { via } = resolve(&rule.discontinued.name, &names, &index)
        else {
            continue;
        };

        let present = taken_replacements(rule, &names);
        if present.len() > 1 {
            result.warnings.push(EvalWarning::AmbiguousReplacement {
                discontinued: rule.discontinued.name.clone(),
                counted: via.clone(),
                ignored: present[1..].iter().map(|s| s.to_string()).collect(),
            });
        }

        let classification = classify(&rule.discontinued.name, catalog);
        if classification.fallback {
            result.warnings.push(EvalWarning::FallbackClassification {
                course: rule.discontinued.name.clone(),
                assigned: classification.category,
            });
        }

        tracing::debug!(
            discontinued = rule.discontinued.name.as_str(),
            via = via.as_str(),
            category = %classification.category,
            credits = rule.discontinued.credits,
            "granting substitution credit"
        );

        *result
            .by_category
            .entry(classification.category)
            .or_insert(0) += rule.discontinued.credits;
        result.warnings.push(EvalWarning::ReplacementCredited {
            discontinued: rule.discontinued.name.clone(),
            via,
            category: classification.category,
            credits: rule.discontinued.credits,
        });
    }

    result
}
