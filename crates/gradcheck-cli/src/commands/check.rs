//! The `gradcheck check` command.

use std::path::PathBuf;

use anyhow::Result;

use gradcheck_core::engine::evaluate;
use gradcheck_core::parser;
use gradcheck_core::progress::GraduationProgress;
use gradcheck_core::report::EvaluationReport;
use gradcheck_report::html::write_html_report;
use gradcheck_report::markdown::write_markdown_report;

pub fn execute(
    catalog_path: PathBuf,
    transcript_path: PathBuf,
    output: Option<PathBuf>,
    format: String,
) -> Result<()> {
    let catalog = parser::parse_catalog(&catalog_path)?;
    let transcript = parser::parse_transcript(&transcript_path)?;

    if transcript.student.department != catalog.department
        || transcript.student.cohort != catalog.cohort
    {
        tracing::warn!(
            catalog = %format!("{} / {}", catalog.department, catalog.cohort),
            student = %format!(
                "{} / {}",
                transcript.student.department, transcript.student.cohort
            ),
            "transcript and catalog identity differ"
        );
    }

    let progress = evaluate(&catalog, &transcript.courses)?;
    print_summary(&progress);

    let report = EvaluationReport::new(transcript.student.clone(), progress);

    if let Some(dir) = output {
        std::fs::create_dir_all(&dir)?;

        if matches!(format.as_str(), "json" | "all") {
            let path = dir.join("report.json");
            report.save_json(&path)?;
            println!("Wrote {}", path.display());
        }
        if matches!(format.as_str(), "markdown" | "md" | "all") {
            let path = dir.join("report.md");
            write_markdown_report(&report, &transcript.courses, &path)?;
            println!("Wrote {}", path.display());
        }
        if matches!(format.as_str(), "html" | "all") {
            let path = dir.join("report.html");
            write_html_report(&report, &path)?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}

fn print_summary(progress: &GraduationProgress) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Category", "Earned", "Required", "Remaining", "Status"]);

    for (category, cat) in &progress.categories {
        table.add_row(vec![
            Cell::new(category.label()),
            Cell::new(cat.earned),
            Cell::new(cat.required),
            Cell::new(cat.remaining),
            Cell::new(if cat.completed { "complete" } else { "incomplete" }),
        ]);
    }

    println!("{table}");

    println!(
        "\nTotal: {} / {} credits ({:.1}%)",
        progress.total_earned,
        progress.total_required,
        progress.overall_percentage()
    );
    if progress.moved_to_catch_all > 0 {
        println!(
            "{} surplus credits counted as free electives",
            progress.moved_to_catch_all
        );
    }

    for group in &progress.one_of_groups {
        let mark = if group.completed { "OK" } else { "--" };
        match &group.taken_course {
            Some(course) => println!("[{mark}] {} (via {course})", group.display_name),
            None => println!("[{mark}] {}", group.display_name),
        }
    }
    for (course, &taken) in &progress.individual_required {
        let mark = if taken { "OK" } else { "--" };
        println!("[{mark}] {course}");
    }

    println!(
        "Competencies: {} of {}",
        progress.competency.completed_tags.len(),
        progress.competency.required_count
    );

    if progress.graduation_ready() {
        println!("\nAll graduation requirements satisfied.");
    } else {
        println!("\nRequirements outstanding.");
    }

    if !progress.warnings.is_empty() {
        println!("{} note(s); see the JSON report for details.", progress.warnings.len());
    }
}
