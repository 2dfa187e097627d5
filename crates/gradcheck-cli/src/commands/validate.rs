//! The `gradcheck validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(catalog_path: PathBuf) -> Result<()> {
    let catalog = gradcheck_core::parser::parse_catalog(&catalog_path)?;

    println!(
        "Catalog: {} / {} / cohort {} ({} era, {} categories)",
        catalog.department,
        catalog.track,
        catalog.cohort,
        catalog.era,
        catalog.credit_quota.len()
    );

    catalog.validate()?;

    let warnings = gradcheck_core::parser::lint_catalog(&catalog);
    for w in &warnings {
        let prefix = w
            .subject
            .as_ref()
            .map(|s| format!("  [{s}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Catalog valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
