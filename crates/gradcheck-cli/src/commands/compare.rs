//! The `gradcheck compare` command.

use std::path::PathBuf;

use anyhow::Result;

use gradcheck_core::report::EvaluationReport;

pub fn execute(earlier_path: PathBuf, current_path: PathBuf, format: String) -> Result<()> {
    let earlier = EvaluationReport::load_json(&earlier_path)?;
    let current = EvaluationReport::load_json(&current_path)?;

    if earlier.student != current.student {
        tracing::warn!("comparing reports for different students");
    }

    let delta = current.compare(&earlier);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", delta.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&delta)?);
        }
        _ => {
            // text format
            if delta.is_unchanged() {
                println!("No movement between the two reports.");
                return Ok(());
            }

            println!("Total: {:+} credits", delta.total_delta);
            for c in &delta.categories {
                println!(
                    "  {} {} -> {} ({:+})",
                    c.category.label(),
                    c.earlier_earned,
                    c.current_earned,
                    c.delta
                );
            }
            if !delta.newly_completed_groups.is_empty() {
                println!("\nNewly completed groups:");
                for name in &delta.newly_completed_groups {
                    println!("  {name}");
                }
            }
            if delta.became_ready {
                println!("\nGraduation requirements are now fully satisfied.");
            }
        }
    }

    Ok(())
}
