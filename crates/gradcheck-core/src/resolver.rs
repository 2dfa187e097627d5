//! Replacement resolver.
//!
//! Decides whether a required course is satisfied by the transcript, either
//! directly or through a discontinued-course substitution. The ordered scan
//! of a rule's replacement list makes the winning replacement deterministic
//! even when several of them were taken.

use std::collections::{HashMap, HashSet};

use crate::model::{ReplacementRule, TakenCourse};

/// How a required course was satisfied, if at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Satisfaction {
    /// The course itself appears in the transcript.
    Direct,
    /// A listed replacement appears in the transcript.
    Replaced { via: String },
    /// Neither the course nor any replacement was taken.
    Unsatisfied,
}

impl Satisfaction {
    pub fn is_satisfied(&self) -> bool {
        !matches!(self, Satisfaction::Unsatisfied)
    }

    /// The actually-taken name behind this satisfaction, when known.
    pub fn taken_name<'a>(&'a self, required: &'a str) -> Option<&'a str> {
        match self {
            Satisfaction::Direct => Some(required),
            Satisfaction::Replaced { via } => Some(via),
            Satisfaction::Unsatisfied => None,
        }
    }
}

/// Replacement rules indexed by discontinued course name.
pub struct RuleIndex<'a> {
    by_discontinued: HashMap<&'a str, &'a ReplacementRule>,
}

impl<'a> RuleIndex<'a> {
    pub fn new(rules: &'a [ReplacementRule]) -> Self {
        let mut by_discontinued = HashMap::with_capacity(rules.len());
        for rule in rules {
            // First rule wins on a duplicate discontinued name.
            by_discontinued
                .entry(rule.discontinued.name.as_str())
                .or_insert(rule);
        }
        Self { by_discontinued }
    }

    pub fn get(&self, discontinued: &str) -> Option<&'a ReplacementRule> {
        self.by_discontinued.get(discontinued).copied()
    }
}

/// The set of course names present in a transcript.
pub fn taken_names(taken: &[TakenCourse]) -> HashSet<&str> {
    taken.iter().map(|c| c.name.as_str()).collect()
}

/// Resolve a required course against the transcript.
pub fn resolve(required: &str, taken: &HashSet<&str>, rules: &RuleIndex<'_>) -> Satisfaction {
    if taken.contains(required) {
        return Satisfaction::Direct;
    }

    if let Some(rule) = rules.get(required) {
        for replacement in &rule.replacements {
            if taken.contains(replacement.as_str()) {
                tracing::debug!(
                    required,
                    via = replacement.as_str(),
                    scope = ?rule.scope,
                    "required course satisfied via replacement"
                );
                return Satisfaction::Replaced {
                    via: replacement.clone(),
                };
            }
        }
    }

    Satisfaction::Unsatisfied
}

/// Every replacement of a rule present in the transcript, in list order.
///
/// Used to flag ambiguous (multi-replacement) situations; only the first
/// entry is ever counted.
pub fn taken_replacements<'a>(rule: &'a ReplacementRule, taken: &HashSet<&str>) -> Vec<&'a str> {
    rule.replacements
        .iter()
        .map(String::as_str)
        .filter(|name| taken.contains(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, DiscontinuedCourse, ReplacementScope};

    fn rule(discontinued: &str, replacements: &[&str]) -> ReplacementRule {
        ReplacementRule {
            discontinued: DiscontinuedCourse {
                name: discontinued.into(),
                category: Category::DepartmentCommon,
                credits: 3,
            },
            replacements: replacements.iter().map(|s| s.to_string()).collect(),
            scope: ReplacementScope::Document,
        }
    }

    fn names(names: &[&'static str]) -> HashSet<&'static str> {
        names.iter().copied().collect()
    }

    #[test]
    fn direct_match_wins_without_rules() {
        let rules = vec![];
        let index = RuleIndex::new(&rules);
        let taken = names(&["Intro A"]);
        assert_eq!(resolve("Intro A", &taken, &index), Satisfaction::Direct);
    }

    #[test]
    fn replacement_match_records_via() {
        let rules = vec![rule("Intro A", &["Intro B", "Intro C"])];
        let index = RuleIndex::new(&rules);
        let taken = names(&["Intro C"]);
        assert_eq!(
            resolve("Intro A", &taken, &index),
            Satisfaction::Replaced {
                via: "Intro C".into()
            }
        );
    }

    #[test]
    fn list_order_breaks_ties() {
        let rules = vec![rule("Intro A", &["Intro B", "Intro C"])];
        let index = RuleIndex::new(&rules);
        // Both replacements taken: first listed one wins.
        let taken = names(&["Intro C", "Intro B"]);
        assert_eq!(
            resolve("Intro A", &taken, &index),
            Satisfaction::Replaced {
                via: "Intro B".into()
            }
        );
    }

    #[test]
    fn direct_match_beats_replacement() {
        let rules = vec![rule("Intro A", &["Intro B"])];
        let index = RuleIndex::new(&rules);
        let taken = names(&["Intro A", "Intro B"]);
        assert_eq!(resolve("Intro A", &taken, &index), Satisfaction::Direct);
    }

    #[test]
    fn no_match_is_unsatisfied() {
        let rules = vec![rule("Intro A", &["Intro B"])];
        let index = RuleIndex::new(&rules);
        let taken = names(&["Linear Algebra"]);
        let satisfaction = resolve("Intro A", &taken, &index);
        assert_eq!(satisfaction, Satisfaction::Unsatisfied);
        assert!(!satisfaction.is_satisfied());
        assert_eq!(satisfaction.taken_name("Intro A"), None);
    }

    #[test]
    fn taken_replacements_preserves_list_order() {
        let r = rule("Intro A", &["Intro B", "Intro C", "Intro D"]);
        let taken = names(&["Intro D", "Intro B"]);
        assert_eq!(taken_replacements(&r, &taken), vec!["Intro B", "Intro D"]);
    }
}
