//! Evaluation engine orchestrator.
//!
//! Composes the aggregation pipeline into one immutable result: validate,
//! aggregate credits, redistribute overflow, evaluate general education,
//! track competencies, and assemble totals. One synchronous, side-effect-free
//! call per evaluation; concurrent callers need no coordination.

use std::collections::BTreeMap;

use crate::aggregate::aggregate;
use crate::competency::track;
use crate::error::EvalError;
use crate::geneval;
use crate::model::{validate_transcript, RequirementCatalog, TakenCourse};
use crate::overflow::redistribute;
use crate::progress::{CategoryProgress, GraduationProgress};

/// Evaluate a transcript against a requirement catalog.
///
/// Inputs must be fully materialized; the engine performs no I/O and never
/// computes on partial data. Returns an error only for catalog or transcript
/// integrity failures; every policy-resolved condition is carried in the
/// result's warning list instead.
pub fn evaluate(
    catalog: &RequirementCatalog,
    transcript: &[TakenCourse],
) -> Result<GraduationProgress, EvalError> {
    catalog.validate()?;
    validate_transcript(transcript)?;

    tracing::debug!(
        department = catalog.department.as_str(),
        track = catalog.track.as_str(),
        cohort = catalog.cohort,
        era = %catalog.era,
        courses = transcript.len(),
        "starting evaluation"
    );

    let aggregated = aggregate(transcript, catalog);
    // The presented total is the pre-redistribution sum, so it cannot depend
    // on how the surplus is routed.
    let total_earned = aggregated.total();

    let redistribution = redistribute(&aggregated.by_category, &catalog.credit_quota, catalog.era);

    let categories: BTreeMap<_, _> = catalog
        .credit_quota
        .iter()
        .map(|(&category, &required)| {
            let earned = redistribution
                .adjusted
                .get(&category)
                .copied()
                .unwrap_or(0);
            (category, CategoryProgress::new(earned, required))
        })
        .collect();

    let gen_ed = geneval::evaluate(
        transcript,
        &catalog.replacement_rules,
        &catalog.general_education,
    );
    let competency = track(transcript, &catalog.competency);

    let progress = GraduationProgress {
        categories,
        competency,
        one_of_groups: gen_ed.groups,
        individual_required: gen_ed.individual,
        total_earned,
        total_required: catalog.total_credits,
        moved_to_catch_all: redistribution.moved_to_catch_all,
        warnings: aggregated.warnings,
    };

    tracing::info!(
        total_earned,
        total_required = progress.total_required,
        moved = progress.moved_to_catch_all,
        warnings = progress.warnings.len(),
        ready = progress.graduation_ready(),
        "evaluation complete"
    );

    Ok(progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CatalogError, TranscriptError};
    use crate::model::{
        Category, CourseRef, CurriculumEra, DiscontinuedCourse, GeneralEducationRules, OneOfGroup,
        ReplacementRule, ReplacementScope,
    };

    fn taken(category: Category, name: &str, credits: u32) -> TakenCourse {
        TakenCourse {
            category,
            name: name.into(),
            credits,
            group_id: None,
            competency_tag: None,
        }
    }

    fn legacy_catalog() -> RequirementCatalog {
        let credit_quota: BTreeMap<Category, u32> = [
            (Category::MajorRequired, 9),
            (Category::MajorElective, 6),
            (Category::DepartmentCommon, 6),
            (Category::GeneralRequired, 8),
            (Category::GeneralElective, 6),
            (Category::LiberalArts, 4),
            (Category::GeneralSelection, 10),
        ]
        .into();

        let mut category_courses = BTreeMap::new();
        category_courses.insert(
            Category::DepartmentCommon,
            vec![CourseRef {
                name: "Intro A".into(),
                credits: 3,
                group_id: None,
            }],
        );

        RequirementCatalog {
            department: "Software".into(),
            track: "general".into(),
            cohort: 2021,
            era: CurriculumEra::Legacy,
            total_credits: 120,
            credit_quota,
            category_courses,
            general_education: GeneralEducationRules {
                one_of_groups: vec![OneOfGroup {
                    group_id: "ethics".into(),
                    courses: vec!["Ethics A".into(), "Ethics B".into()],
                    credits: None,
                }],
                individual_required: vec!["Chapel".into()],
            },
            replacement_rules: vec![ReplacementRule {
                discontinued: DiscontinuedCourse {
                    name: "Intro A".into(),
                    category: Category::DepartmentCommon,
                    credits: 3,
                },
                replacements: vec!["Intro B".into()],
                scope: ReplacementScope::Department,
            }],
            competency: Default::default(),
        }
    }

    #[test]
    fn exact_quota_is_complete() {
        // Three 3-credit courses against a 9-credit quota.
        let transcript = vec![
            taken(Category::MajorRequired, "Data Structures", 3),
            taken(Category::MajorRequired, "Operating Systems", 3),
            taken(Category::MajorRequired, "Databases", 3),
        ];
        let progress = evaluate(&legacy_catalog(), &transcript).unwrap();
        let major = &progress.categories[&Category::MajorRequired];
        assert_eq!(major.earned, 9);
        assert_eq!(major.remaining, 0);
        assert!(major.completed);
    }

    #[test]
    fn surplus_is_clamped_and_routed() {
        // 9 earned against a 6-credit elective quota.
        let transcript = vec![
            taken(Category::MajorElective, "Compilers", 3),
            taken(Category::MajorElective, "Graphics", 3),
            taken(Category::MajorElective, "Networks", 3),
        ];
        let progress = evaluate(&legacy_catalog(), &transcript).unwrap();
        assert_eq!(progress.categories[&Category::MajorElective].earned, 6);
        assert!(progress.categories[&Category::MajorElective].completed);
        assert_eq!(progress.categories[&Category::GeneralSelection].earned, 3);
        assert_eq!(progress.moved_to_catch_all, 3);
        // The presented total ignores the routing.
        assert_eq!(progress.total_earned, 9);
    }

    #[test]
    fn substitution_raises_total_by_both_credit_values() {
        // One 3-credit replacement unlocks 6 earned credits.
        let transcript = vec![taken(Category::MajorElective, "Intro B", 3)];
        let progress = evaluate(&legacy_catalog(), &transcript).unwrap();
        assert_eq!(progress.categories[&Category::MajorElective].earned, 3);
        assert_eq!(progress.categories[&Category::DepartmentCommon].earned, 3);
        assert_eq!(progress.total_earned, 6);
    }

    #[test]
    fn total_earned_is_redistribution_invariant() {
        let transcript = vec![
            taken(Category::MajorRequired, "Data Structures", 3),
            taken(Category::MajorRequired, "Operating Systems", 3),
            taken(Category::MajorRequired, "Databases", 3),
            taken(Category::MajorRequired, "Algorithms", 3),
        ];
        let progress = evaluate(&legacy_catalog(), &transcript).unwrap();
        assert_eq!(progress.total_earned, 12);
        assert_eq!(progress.moved_to_catch_all, 3);
        let presented: u32 = progress.categories.values().map(|c| c.earned).sum();
        assert_eq!(presented, 12);
    }

    #[test]
    fn gen_ed_and_competency_feed_the_result() {
        let mut chapel = taken(Category::GeneralRequired, "Chapel", 1);
        chapel.competency_tag = None;
        let mut art = taken(Category::GeneralElective, "Art History", 3);
        art.competency_tag = Some("1".into());
        let transcript = vec![taken(Category::GeneralRequired, "Ethics B", 2), chapel, art];

        let progress = evaluate(&legacy_catalog(), &transcript).unwrap();
        assert!(progress.one_of_groups[0].completed);
        assert_eq!(
            progress.one_of_groups[0].taken_course.as_deref(),
            Some("Ethics B")
        );
        assert_eq!(progress.individual_required["Chapel"], true);
        assert_eq!(progress.competency.completed_tags.len(), 1);
        assert!(!progress.competency.completed);
        assert!(!progress.graduation_ready());
    }

    #[test]
    fn invalid_catalog_rejects_before_math() {
        let mut catalog = legacy_catalog();
        catalog.credit_quota.remove(&Category::GeneralSelection);
        let err = evaluate(&catalog, &[]).unwrap_err();
        assert!(matches!(
            err,
            EvalError::Catalog(CatalogError::MissingCategory { .. })
        ));
    }

    #[test]
    fn invalid_transcript_rejects_before_math() {
        let transcript = vec![taken(Category::MajorRequired, "Databases", 0)];
        let err = evaluate(&legacy_catalog(), &transcript).unwrap_err();
        assert!(matches!(
            err,
            EvalError::Transcript(TranscriptError::ZeroCreditCourse { .. })
        ));
    }

    #[test]
    fn empty_transcript_yields_zero_progress() {
        let progress = evaluate(&legacy_catalog(), &[]).unwrap();
        assert_eq!(progress.total_earned, 0);
        assert_eq!(progress.overall_percentage(), 0.0);
        assert!(progress.categories.values().all(|c| c.earned == 0));
        assert!(!progress.graduation_ready());
    }

    #[test]
    fn result_is_serializable() {
        let transcript = vec![taken(Category::MajorRequired, "Databases", 3)];
        let progress = evaluate(&legacy_catalog(), &transcript).unwrap();
        let json = serde_json::to_string(&progress).unwrap();
        let back: GraduationProgress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, progress);
    }
}
