//! Competency tracker.
//!
//! Counts distinct competency tags earned through general-elective courses
//! and enforces the minimum-of-N diversity rule. The reserved tag marks a
//! course that satisfies a separate category and never counts here.

use std::collections::BTreeSet;

use crate::model::{Category, CompetencyRules, TakenCourse};
use crate::progress::CompetencyProgress;

/// Track competency-tag diversity over the transcript.
pub fn track(taken: &[TakenCourse], rules: &CompetencyRules) -> CompetencyProgress {
    let mut tags: BTreeSet<String> = taken
        .iter()
        .filter(|course| course.category == Category::GeneralElective)
        .filter_map(|course| course.competency_tag.clone())
        .collect();
    tags.remove(&rules.reserved_tag);

    CompetencyProgress::new(tags, rules.required_count)
}
