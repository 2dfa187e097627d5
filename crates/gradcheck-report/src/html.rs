//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use gradcheck_core::progress::CategoryProgress;
use gradcheck_core::report::EvaluationReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML page from an evaluation report.
pub fn generate_html(report: &EvaluationReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>gradcheck report — {}</title>\n",
        html_escape(&report.student.department)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    let progress = &report.progress;
    html.push_str("<header>\n");
    html.push_str("<h1>Graduation progress</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} | {} track | cohort {} | {}</p>\n",
        html_escape(&report.student.department),
        html_escape(&report.student.track),
        report.student.cohort,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary dashboard
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    let ready_class = if progress.graduation_ready() {
        "pass"
    } else {
        "fail"
    };
    html.push_str(&format!(
        "<p class=\"banner {}\">{} / {} credits ({:.1}%) — {}</p>\n",
        ready_class,
        progress.total_earned,
        progress.total_required,
        progress.overall_percentage(),
        if progress.graduation_ready() {
            "requirements satisfied"
        } else {
            "requirements outstanding"
        }
    ));

    // Category table
    html.push_str("<table class=\"summary\">\n");
    html.push_str(
        "<thead><tr><th>Category</th><th>Earned</th><th>Required</th><th>Remaining</th><th>Status</th></tr></thead>\n",
    );
    html.push_str("<tbody>\n");
    for (category, cat) in &progress.categories {
        let (class, text) = if cat.completed {
            ("pass", "complete")
        } else {
            ("fail", "incomplete")
        };
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"{}\">{}</td></tr>\n",
            category.label(),
            cat.earned,
            cat.required,
            cat.remaining,
            class,
            text
        ));
    }
    html.push_str("</tbody></table>\n");

    if !progress.categories.is_empty() {
        html.push_str(&generate_bar_chart(&progress.categories));
    }

    html.push_str("</section>\n");

    // General education
    if !progress.one_of_groups.is_empty() || !progress.individual_required.is_empty() {
        html.push_str("<section class=\"gen-ed\">\n");
        html.push_str("<h2>General education</h2>\n<ul>\n");
        for group in &progress.one_of_groups {
            let class = if group.completed { "pass" } else { "fail" };
            let detail = match &group.taken_course {
                Some(course) => format!("satisfied by {}", html_escape(course)),
                None => format!(
                    "take one of: {}",
                    html_escape(&group.required_courses.join(", "))
                ),
            };
            html.push_str(&format!(
                "<li class=\"{}\"><strong>{}</strong> — {}</li>\n",
                class,
                html_escape(&group.display_name),
                detail
            ));
        }
        for (course, &taken) in &progress.individual_required {
            let (class, text) = if taken {
                ("pass", "taken")
            } else {
                ("fail", "not taken")
            };
            html.push_str(&format!(
                "<li class=\"{}\"><strong>{}</strong> — {}</li>\n",
                class,
                html_escape(course),
                text
            ));
        }
        html.push_str("</ul>\n</section>\n");
    }

    // Competencies
    html.push_str("<section class=\"competency\">\n");
    html.push_str("<h2>Competencies</h2>\n");
    let comp = &progress.competency;
    html.push_str(&format!(
        "<p>{} of {} distinct areas{}</p>\n",
        comp.completed_tags.len(),
        comp.required_count,
        if comp.completed {
            String::new()
        } else {
            format!(" ({} more needed)", comp.remaining)
        }
    ));
    html.push_str("</section>\n");

    // Warnings
    if !progress.warnings.is_empty() {
        html.push_str("<section class=\"warnings\">\n");
        html.push_str(&format!("<h2>Notes ({})</h2>\n", progress.warnings.len()));
        html.push_str("<pre><code>");
        html.push_str(
            &serde_json::to_string_pretty(&progress.warnings)
                .unwrap_or_default()
                .replace('<', "&lt;")
                .replace('>', "&gt;"),
        );
        html.push_str("</code></pre>\n");
        html.push_str("</section>\n");
    }

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &EvaluationReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn generate_bar_chart(
    categories: &std::collections::BTreeMap<gradcheck_core::model::Category, CategoryProgress>,
) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 200;

    let total_height = categories.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (category, cat)) in categories.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let ratio = (cat.percentage / 100.0).min(1.0);
        let width = (ratio * max_width as f32) as usize;

        let color = if cat.completed {
            "#22c55e"
        } else if ratio >= 0.5 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            category.label()
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{} / {}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            cat.earned,
            cat.required
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.banner { padding: 0.75rem 1rem; border-radius: 8px; font-weight: bold; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
ul { list-style: none; padding: 0; }
li { padding: 0.5rem 1rem; margin: 0.25rem 0; border-radius: 6px; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;
