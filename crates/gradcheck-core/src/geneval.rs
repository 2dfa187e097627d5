//! General-education evaluator.
//!
//! Evaluates one-of groups and individually mandatory courses against the
//! transcript, substitution-aware, and derives a human-readable label for
//! each group from its course content.

use std::collections::BTreeMap;

use crate::model::{GeneralEducationRules, OneOfGroup, ReplacementRule, TakenCourse};
use crate::progress::OneOfGroupStatus;
use crate::resolver::{resolve, taken_names, RuleIndex, Satisfaction};

/// Credit value assumed for groups whose catalog entry omits one. Legacy
/// catalog data carries no group credit information.
pub const DEFAULT_GROUP_CREDITS: u32 = 3;

/// Outcome of the general-education evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralEducationOutcome {
    pub groups: Vec<OneOfGroupStatus>,
    pub individual: BTreeMap<String, bool>,
}

/// Evaluate the general-education rules against the transcript.
pub fn evaluate(
    taken: &[TakenCourse],
    rules: &[ReplacementRule],
    gen_ed: &GeneralEducationRules,
) -> GeneralEducationOutcome {
    let names = taken_names(taken);
    let index = RuleIndex::new(rules);

    let groups = gen_ed
        .one_of_groups
        .iter()
        .map(|group| {
            // First course in list order that is satisfied wins; when the
            // satisfaction came through a replacement, record the course the
            // student actually took.
            let taken_course = group.courses.iter().find_map(|course| {
                match resolve(course, &names, &index) {
                    Satisfaction::Direct => Some(course.clone()),
                    Satisfaction::Replaced { via } => Some(via),
                    Satisfaction::Unsatisfied => None,
                }
            });

            OneOfGroupStatus {
                group_id: group.group_id.clone(),
                display_name: display_name(group),
                required_courses: group.courses.clone(),
                completed: taken_course.is_some(),
                taken_course,
                credits: group.credits.unwrap_or(DEFAULT_GROUP_CREDITS),
            }
        })
        .collect();

    let individual = gen_ed
        .individual_required
        .iter()
        .map(|course| {
            let satisfied = resolve(course, &names, &index).is_satisfied();
            (course.clone(), satisfied)
        })
        .collect();

    GeneralEducationOutcome { groups, individual }
}

// Keyword tables for the group-naming heuristic, checked in order. The label
// is always recomputed from course content; the catalog's group id is kept
// for identity, not display.
const NAME_RULES: [(&[&str], &str); 6] = [
    (
        &["career", "life design", "vocation", "startup", "employment"],
        "Career & Life Design",
    ),
    (
        &["logic", "critical", "thinking", "writing"],
        "Thinking & Expression",
    ),
    (
        &["scripture", "bible", "christian", "faith", "theology"],
        "Faith & Community",
    ),
    (
        &["disability", "inclusion", "multicultural", "independent living"],
        "Disability Awareness",
    ),
    (&["english", "practical"], "English Language"),
    (
        &["computer", "information", "digital", "data"],
        "Digital Literacy",
    ),
];

/// Derive a display label for a one-of group from its course names.
pub fn display_name(group: &OneOfGroup) -> String {
    if group.courses.is_empty() {
        return group.group_id.clone();
    }

    for (keywords, label) in NAME_RULES {
        if contains_any_keyword(&group.courses, keywords) {
            return label.to_string();
        }
    }

    // Nothing matched: truncate the first course name. Char-based so a
    // multi-byte name cannot split a code point.
    let first = &group.courses[0];
    let prefix: String = first.chars().take(12).collect();
    if prefix.len() < first.len() {
        format!("{prefix}… group")
    } else {
        format!("{prefix} group")
    }
}

fn contains_any_keyword(courses: &[String], keywords: &[&str]) -> bool {
    courses.iter().any(|course| {
        let lower = course.to_lowercase();
        keywords.iter().any(|kw| lower.contains(kw))
    })
}
