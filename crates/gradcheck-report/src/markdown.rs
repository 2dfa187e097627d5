//! Markdown report generator.
//!
//! Renders an evaluation report as a plain-text progress document: student
//! header, per-category status lines, general-education and competency
//! sections, and an optional per-category course listing with subtotals.

use anyhow::Result;
use std::path::Path;

use gradcheck_core::model::{Category, TakenCourse};
use gradcheck_core::progress::EvalWarning;
use gradcheck_core::report::EvaluationReport;

/// Generate a markdown progress document. Pass the transcript courses to get
/// the grouped course appendix; an empty slice omits it.
pub fn generate_markdown(report: &EvaluationReport, courses: &[TakenCourse]) -> String {
    let mut md = String::new();

    md.push_str("# Graduation Progress Report\n\n");
    md.push_str(&format!(
        "**{}** — {} track, cohort {}\n\n",
        report.student.department, report.student.track, report.student.cohort
    ));
    md.push_str(&format!(
        "Generated {} | Report `{}`\n\n",
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.id
    ));

    let progress = &report.progress;
    md.push_str(&format!(
        "**Total:** {} / {} credits ({:.1}%)",
        progress.total_earned,
        progress.total_required,
        progress.overall_percentage()
    ));
    if progress.moved_to_catch_all > 0 {
        md.push_str(&format!(
            " — {} surplus credits counted as free electives",
            progress.moved_to_catch_all
        ));
    }
    md.push_str("\n\n");

    if progress.graduation_ready() {
        md.push_str("**All graduation requirements are satisfied.**\n\n");
    }

    md.push_str("## Categories\n\n");
    for (category, cat) in &progress.categories {
        let mark = if cat.completed { "✓" } else { "○" };
        md.push_str(&format!(
            "- {} **{}**: {} / {} credits",
            mark,
            category.label(),
            cat.earned,
            cat.required
        ));
        if !cat.completed {
            md.push_str(&format!(" ({} remaining)", cat.remaining));
        }
        md.push('\n');
    }
    md.push('\n');

    if !progress.one_of_groups.is_empty() || !progress.individual_required.is_empty() {
        md.push_str("## General Education\n\n");
        for group in &progress.one_of_groups {
            let mark = if group.completed { "✓" } else { "○" };
            match &group.taken_course {
                Some(course) => md.push_str(&format!(
                    "- {} **{}**: satisfied by {}\n",
                    mark, group.display_name, course
                )),
                None => md.push_str(&format!(
                    "- {} **{}**: take one of {}\n",
                    mark,
                    group.display_name,
                    group.required_courses.join(", ")
                )),
            }
        }
        for (course, &taken) in &progress.individual_required {
            let mark = if taken { "✓" } else { "○" };
            md.push_str(&format!("- {mark} **{course}** (required)\n"));
        }
        md.push('\n');
    }

    md.push_str("## Competencies\n\n");
    let comp = &progress.competency;
    md.push_str(&format!(
        "{} of {} distinct competency areas",
        comp.completed_tags.len(),
        comp.required_count
    ));
    if !comp.completed_tags.is_empty() {
        md.push_str(&format!(
            " ({})",
            comp.completed_tags
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    if !comp.completed {
        md.push_str(&format!(" — {} more needed", comp.remaining));
    }
    md.push_str("\n\n");

    if !progress.warnings.is_empty() {
        md.push_str("## Notes\n\n");
        for warning in &progress.warnings {
            md.push_str(&format!("- {}\n", describe_warning(warning)));
        }
        md.push('\n');
    }

    if !courses.is_empty() {
        md.push_str(&course_appendix(courses));
    }

    md
}

/// Write a markdown report to a file.
pub fn write_markdown_report(
    report: &EvaluationReport,
    courses: &[TakenCourse],
    path: &Path,
) -> Result<()> {
    let md = generate_markdown(report, courses);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, md)?;
    Ok(())
}

fn describe_warning(warning: &EvalWarning) -> String {
    match warning {
        EvalWarning::FallbackClassification { course, assigned } => format!(
            "'{}' is in no course list; its credit was counted under {}",
            course,
            assigned.label()
        ),
        EvalWarning::DuplicateTakenCourse {
            course,
            occurrences,
        } => format!("'{course}' appears {occurrences} times in the transcript; all entries were counted"),
        EvalWarning::AmbiguousReplacement {
            discontinued,
            counted,
            ignored,
        } => format!(
            "several replacements for '{}' were taken; '{}' was counted ({} kept their own categories)",
            discontinued,
            counted,
            ignored.join(", ")
        ),
        EvalWarning::ReplacementCredited {
            discontinued,
            via,
            category,
            credits,
        } => format!(
            "'{}' ({} credits, {}) was credited through '{}'",
            discontinued,
            credits,
            category.label(),
            via
        ),
    }
}

fn course_appendix(courses: &[TakenCourse]) -> String {
    let mut md = String::from("## Courses Taken\n\n");

    for category in Category::ALL {
        let in_category: Vec<_> = courses.iter().filter(|c| c.category == category).collect();
        if in_category.is_empty() {
            continue;
        }
        let subtotal: u32 = in_category.iter().map(|c| c.credits).sum();
        md.push_str(&format!(
            "### {} ({} credits)\n\n",
            category.label(),
            subtotal
        ));
        for course in in_category {
            md.push_str(&format!("- {} ({} credits)\n", course.name, course.credits));
        }
        md.push('\n');
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradcheck_core::model::StudentRecord;
    use gradcheck_core::progress::{
        CategoryProgress, CompetencyProgress, GraduationProgress, OneOfGroupStatus,
    };
    use std::collections::{BTreeMap, BTreeSet};

    fn make_report() -> EvaluationReport {
        let mut categories = BTreeMap::new();
        categories.insert(Category::MajorRequired, CategoryProgress::new(6, 9));
        categories.insert(Category::GeneralRequired, CategoryProgress::new(8, 8));

        let tags: BTreeSet<String> = ["1".to_string(), "2".to_string()].into();
        let progress = GraduationProgress {
            categories,
            competency: CompetencyProgress::new(tags, 3),
            one_of_groups: vec![OneOfGroupStatus {
                group_id: "ethics".into(),
                display_name: "Faith & Community".into(),
                required_courses: vec!["Ethics A".into(), "Ethics B".into()],
                taken_course: Some("Ethics B".into()),
                credits: 2,
                completed: true,
            }],
            individual_required: [("Chapel".to_string(), false)].into(),
            total_earned: 14,
            total_required: 120,
            moved_to_catch_all: 0,
            warnings: vec![EvalWarning::DuplicateTakenCourse {
                course: "Databases".into(),
                occurrences: 2,
            }],
        };

        EvaluationReport::new(
            StudentRecord {
                department: "Software".into(),
                track: "general".into(),
                cohort: 2021,
            },
            progress,
        )
    }

    #[test]
    fn markdown_contains_required_sections() {
        let md = generate_markdown(&make_report(), &[]);

        assert!(md.contains("# Graduation Progress Report"));
        assert!(md.contains("**Software** — general track, cohort 2021"));
        assert!(md.contains("✓ **General Required**: 8 / 8"));
        assert!(md.contains("○ **Major Required**: 6 / 9 credits (3 remaining)"));
        assert!(md.contains("satisfied by Ethics B"));
        assert!(md.contains("○ **Chapel** (required)"));
        assert!(md.contains("2 of 3 distinct competency areas"));
        assert!(md.contains("appears 2 times"));
        assert!(!md.contains("## Courses Taken"));
    }

    #[test]
    fn course_appendix_groups_with_subtotals() {
        let courses = vec![
            TakenCourse {
                category: Category::MajorRequired,
                name: "Data Structures".into(),
                credits: 3,
                group_id: None,
                competency_tag: None,
            },
            TakenCourse {
                category: Category::MajorRequired,
                name: "Databases".into(),
                credits: 3,
                group_id: None,
                competency_tag: None,
            },
        ];
        let md = generate_markdown(&make_report(), &courses);
        assert!(md.contains("### Major Required (6 credits)"));
        assert!(md.contains("- Data Structures (3 credits)"));
    }

    #[test]
    fn markdown_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");

        write_markdown_report(&make_report(), &[], &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Graduation Progress Report"));
    }
}
