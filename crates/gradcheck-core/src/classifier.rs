//! Category classifier.
//!
//! Maps a course name to its requirement category using the catalog's
//! membership lists, searched in a fixed priority order. A miss in every
//! list yields the catalog's baseline category and a warning, never an
//! error.

use crate::model::{Category, RequirementCatalog};

/// Outcome of classifying one course name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    /// True when the name matched no membership list and the baseline
    /// category was assigned.
    pub fallback: bool,
}

// Membership search order: the era tier first, then required, elective, and
// finally whichever major tiers remain in the catalog.
fn search_order(catalog: &RequirementCatalog) -> [Category; 5] {
    [
        catalog.era.tier_category(),
        Category::MajorRequired,
        Category::MajorElective,
        Category::MajorAdvanced,
        Category::DepartmentCommon,
    ]
}

/// Classify a course name against the catalog's membership lists.
pub fn classify(name: &str, catalog: &RequirementCatalog) -> Classification {
    let mut checked = [None; 5];
    for (slot, category) in search_order(catalog).into_iter().enumerate() {
        if checked[..slot].contains(&Some(category)) {
            continue;
        }
        checked[slot] = Some(category);

        let listed = catalog
            .category_courses
            .get(&category)
            .is_some_and(|courses| courses.iter().any(|c| c.name == name));
        if listed {
            return Classification {
                category,
                fallback: false,
            };
        }
    }

    let baseline = catalog.baseline_category();
    tracing::warn!(
        course = name,
        assigned = %baseline,
        "course matched no category list, assigning baseline"
    );
    Classification {
        category: baseline,
        fallback: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CourseRef, CurriculumEra};
    use std::collections::BTreeMap;

    fn course(name: &str) -> CourseRef {
        CourseRef {
            name: name.into(),
            credits: 3,
            group_id: None,
        }
    }

    fn catalog(era: CurriculumEra) -> RequirementCatalog {
        let mut category_courses = BTreeMap::new();
        category_courses.insert(
            Category::DepartmentCommon,
            vec![course("IT Fundamentals"), course("Shared Seminar")],
        );
        category_courses.insert(
            Category::MajorRequired,
            vec![course("Data Structures"), course("Shared Seminar")],
        );
        category_courses.insert(Category::MajorElective, vec![course("Compilers")]);
        category_courses.insert(Category::MajorAdvanced, vec![course("Capstone Project")]);

        let mut credit_quota = BTreeMap::new();
        for cat in Category::ALL {
            credit_quota.insert(cat, 10);
        }

        RequirementCatalog {
            department: "Software".into(),
            track: "general".into(),
            cohort: 2021,
            era,
            total_credits: 120,
            credit_quota,
            category_courses,
            general_education: Default::default(),
            replacement_rules: vec![],
            competency: Default::default(),
        }
    }

    #[test]
    fn finds_course_in_each_tier() {
        let cat = catalog(CurriculumEra::Legacy);
        assert_eq!(
            classify("Data Structures", &cat).category,
            Category::MajorRequired
        );
        assert_eq!(classify("Compilers", &cat).category, Category::MajorElective);
        assert_eq!(
            classify("Capstone Project", &cat).category,
            Category::MajorAdvanced
        );
    }

    #[test]
    fn era_tier_searched_first() {
        // "Shared Seminar" is listed under both the department-common tier
        // and major-required; the legacy tier wins.
        let cat = catalog(CurriculumEra::Legacy);
        let c = classify("Shared Seminar", &cat);
        assert_eq!(c.category, Category::DepartmentCommon);
        assert!(!c.fallback);
    }

    #[test]
    fn revised_era_prefers_advanced_tier() {
        let mut cat = catalog(CurriculumEra::Revised);
        cat.category_courses
            .get_mut(&Category::MajorAdvanced)
            .unwrap()
            .push(course("Shared Seminar"));
        assert_eq!(
            classify("Shared Seminar", &cat).category,
            Category::MajorAdvanced
        );
    }

    #[test]
    fn miss_falls_back_to_baseline() {
        let legacy = catalog(CurriculumEra::Legacy);
        let c = classify("Underwater Basket Weaving", &legacy);
        assert_eq!(c.category, Category::DepartmentCommon);
        assert!(c.fallback);

        let revised = catalog(CurriculumEra::Revised);
        let c = classify("Underwater Basket Weaving", &revised);
        assert_eq!(c.category, Category::MajorAdvanced);
        assert!(c.fallback);
    }
}
