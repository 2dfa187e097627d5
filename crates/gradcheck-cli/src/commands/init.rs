//! The `gradcheck init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create a starter catalog
    std::fs::create_dir_all("catalogs")?;
    let catalog_path = std::path::Path::new("catalogs/example.toml");
    if catalog_path.exists() {
        println!("catalogs/example.toml already exists, skipping.");
    } else {
        std::fs::write(catalog_path, SAMPLE_CATALOG)?;
        println!("Created catalogs/example.toml");
    }

    // Create a starter transcript
    let transcript_path = std::path::Path::new("transcript.toml");
    if transcript_path.exists() {
        println!("transcript.toml already exists, skipping.");
    } else {
        std::fs::write(transcript_path, SAMPLE_TRANSCRIPT)?;
        println!("Created transcript.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit catalogs/example.toml to match your department's rules");
    println!("  2. Run: gradcheck validate --catalog catalogs/example.toml");
    println!("  3. Run: gradcheck check --catalog catalogs/example.toml --transcript transcript.toml");

    Ok(())
}

const SAMPLE_CATALOG: &str = r#"# gradcheck requirement catalog

[catalog]
department = "Software Engineering"
track = "general"
cohort = 2021
era = "legacy"
total_credits = 130

[quota]
majorRequired = 27
majorElective = 24
departmentCommon = 12
generalRequired = 16
generalElective = 12
liberalArts = 8
generalSelection = 31

[[courses]]
category = "majorRequired"
name = "Data Structures"
credits = 3

[[courses]]
category = "majorRequired"
name = "Operating Systems"
credits = 3

[[courses]]
category = "departmentCommon"
name = "Introduction to Programming"
credits = 3

[[replacements]]
discontinued = "Introduction to Programming"
category = "departmentCommon"
credits = 3
replacements = ["Programming Fundamentals", "Computational Thinking"]
scope = "department"

[general_education]
individual_required = ["Chapel"]

[[general_education.one_of]]
group_id = "career"
courses = ["Career Planning", "Life Design Workshop"]
credits = 2

[competency]
required_count = 3
reserved_tag = "liberalArts"
"#;

const SAMPLE_TRANSCRIPT: &str = r#"# gradcheck transcript

[student]
department = "Software Engineering"
track = "general"
cohort = 2021

[[courses]]
category = "majorRequired"
name = "Data Structures"
credits = 3

[[courses]]
category = "majorElective"
name = "Programming Fundamentals"
credits = 3

[[courses]]
category = "generalRequired"
name = "Career Planning"
credits = 2

[[courses]]
category = "generalElective"
name = "Art History"
credits = 3
competency_tag = "1"
"#;
