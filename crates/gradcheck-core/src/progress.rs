//! Derived, immutable evaluation result types.
//!
//! Everything here is produced by pure transformation of a catalog and a
//! transcript, is fully serializable, and is never mutated after
//! construction.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::model::Category;

/// Completion snapshot for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryProgress {
    pub earned: u32,
    pub required: u32,
    pub percentage: f32,
    pub remaining: u32,
    pub completed: bool,
}

impl CategoryProgress {
    pub fn new(earned: u32, required: u32) -> Self {
        let percentage = if required > 0 {
            earned as f32 / required as f32 * 100.0
        } else {
            0.0
        };
        Self {
            earned,
            required,
            percentage,
            remaining: required.saturating_sub(earned),
            completed: earned >= required,
        }
    }
}

/// Minimum-tag-diversity status over general-elective competency tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetencyProgress {
    /// Distinct tags earned, with the reserved tag already excluded.
    pub completed_tags: BTreeSet<String>,
    pub required_count: u32,
    pub remaining: u32,
    pub completed: bool,
}

impl CompetencyProgress {
    pub fn new(completed_tags: BTreeSet<String>, required_count: u32) -> Self {
        let earned = completed_tags.len() as u32;
        Self {
            completed_tags,
            required_count,
            remaining: required_count.saturating_sub(earned),
            completed: earned >= required_count,
        }
    }
}

/// Evaluation outcome for one one-of group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneOfGroupStatus {
    pub group_id: String,
    /// Label recomputed from course content by the naming heuristic.
    pub display_name: String,
    pub required_courses: Vec<String>,
    /// The actually-taken course that satisfied the group, which is the
    /// replacement's name when satisfied via substitution.
    pub taken_course: Option<String>,
    pub credits: u32,
    pub completed: bool,
}

/// Audit-trail entry for a condition that was resolved by a documented rule
/// rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EvalWarning {
    /// A course name matched no membership list; the baseline category was
    /// assigned.
    #[serde(rename_all = "camelCase")]
    FallbackClassification { course: String, assigned: Category },

    /// The same course name appeared more than once in the transcript;
    /// credits from every entry were summed.
    #[serde(rename_all = "camelCase")]
    DuplicateTakenCourse { course: String, occurrences: u32 },

    /// More than one replacement for a discontinued course was taken; the
    /// first listed one was counted and the rest kept their own categories.
    #[serde(rename_all = "camelCase")]
    AmbiguousReplacement {
        discontinued: String,
        counted: String,
        ignored: Vec<String>,
    },

    /// A discontinued course's credits were granted on top of the
    /// replacement's own credits.
    #[serde(rename_all = "camelCase")]
    ReplacementCredited {
        discontinued: String,
        via: String,
        category: Category,
        credits: u32,
    },
}

/// The full evaluation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraduationProgress {
    /// One snapshot per quota category, built from the post-redistribution
    /// credit map.
    pub categories: BTreeMap<Category, CategoryProgress>,
    pub competency: CompetencyProgress,
    pub one_of_groups: Vec<OneOfGroupStatus>,
    pub individual_required: BTreeMap<String, bool>,
    /// Sum of pre-redistribution per-category credits; invariant under how
    /// the surplus is routed.
    pub total_earned: u32,
    pub total_required: u32,
    /// Aggregate surplus moved into the era catch-all category.
    pub moved_to_catch_all: u32,
    pub warnings: Vec<EvalWarning>,
}

impl GraduationProgress {
    /// Overall completion percentage, guarded against a zero target.
    pub fn overall_percentage(&self) -> f32 {
        if self.total_required > 0 {
            self.total_earned as f32 / self.total_required as f32 * 100.0
        } else {
            0.0
        }
    }

    /// True when every tracked requirement is satisfied: total credits, all
    /// category quotas, every one-of group, every individual course, and the
    /// competency threshold.
    pub fn graduation_ready(&self) -> bool {
        self.total_earned >= self.total_required
            && self.categories.values().all(|c| c.completed)
            && self.one_of_groups.iter().all(|g| g.completed)
            && self.individual_required.values().all(|&taken| taken)
            && self.competency.completed
    }
}
