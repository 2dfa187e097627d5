//! TOML catalog and transcript parser.
//!
//! Loads requirement catalogs and transcripts from TOML files, and lints
//! catalogs for soft issues that validation alone does not reject.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{
    Category, CompetencyRules, CourseRef, CurriculumEra, DiscontinuedCourse, GeneralEducationRules,
    OneOfGroup, ReplacementRule, ReplacementScope, RequirementCatalog, StudentRecord, TakenCourse,
    Transcript,
};

/// Intermediate TOML structure for parsing catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    catalog: TomlCatalogHeader,
    quota: BTreeMap<String, u32>,
    #[serde(default)]
    courses: Vec<TomlCatalogCourse>,
    #[serde(default)]
    replacements: Vec<TomlReplacement>,
    #[serde(default)]
    general_education: Option<TomlGeneralEducation>,
    #[serde(default)]
    competency: Option<TomlCompetency>,
}

#[derive(Debug, Deserialize)]
struct TomlCatalogHeader {
    department: String,
    #[serde(default = "default_track")]
    track: String,
    cohort: u16,
    era: String,
    total_credits: u32,
}

fn default_track() -> String {
    "general".to_string()
}

#[derive(Debug, Deserialize)]
struct TomlCatalogCourse {
    category: String,
    name: String,
    credits: u32,
    #[serde(default)]
    group_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlReplacement {
    discontinued: String,
    category: String,
    credits: u32,
    replacements: Vec<String>,
    #[serde(default)]
    scope: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlGeneralEducation {
    #[serde(default)]
    one_of: Vec<TomlOneOfGroup>,
    #[serde(default)]
    individual_required: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TomlOneOfGroup {
    group_id: String,
    courses: Vec<String>,
    #[serde(default)]
    credits: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct TomlCompetency {
    #[serde(default = "default_required_count")]
    required_count: u32,
    #[serde(default = "default_reserved_tag")]
    reserved_tag: String,
}

fn default_required_count() -> u32 {
    3
}

fn default_reserved_tag() -> String {
    "liberalArts".to_string()
}

/// Intermediate TOML structure for parsing transcript files.
#[derive(Debug, Deserialize)]
struct TomlTranscriptFile {
    student: TomlStudent,
    #[serde(default)]
    courses: Vec<TomlTakenCourse>,
}

#[derive(Debug, Deserialize)]
struct TomlStudent {
    department: String,
    #[serde(default = "default_track")]
    track: String,
    cohort: u16,
}

#[derive(Debug, Deserialize)]
struct TomlTakenCourse {
    category: String,
    name: String,
    credits: u32,
    #[serde(default)]
    group_id: Option<String>,
    #[serde(default)]
    competency_tag: Option<String>,
}

fn parse_category(raw: &str) -> Result<Category> {
    raw.parse().map_err(|e: String| anyhow::anyhow!("{}", e))
}

/// Parse a single TOML file into a `RequirementCatalog`.
pub fn parse_catalog(path: &Path) -> Result<RequirementCatalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a `RequirementCatalog` (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<RequirementCatalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let era: CurriculumEra = match parsed.catalog.era.as_str() {
        "legacy" => CurriculumEra::Legacy,
        "revised" => CurriculumEra::Revised,
        other => anyhow::bail!("unknown era: {other} (expected 'legacy' or 'revised')"),
    };

    let mut credit_quota = BTreeMap::new();
    for (raw, credits) in parsed.quota {
        credit_quota.insert(parse_category(&raw)?, credits);
    }

    let mut category_courses: BTreeMap<Category, Vec<CourseRef>> = BTreeMap::new();
    for course in parsed.courses {
        let category = parse_category(&course.category)
            .with_context(|| format!("course '{}'", course.name))?;
        category_courses.entry(category).or_default().push(CourseRef {
            name: course.name,
            credits: course.credits,
            group_id: course.group_id,
        });
    }

    let replacement_rules = parsed
        .replacements
        .into_iter()
        .map(|r| {
            let category = parse_category(&r.category)
                .with_context(|| format!("replacement rule for '{}'", r.discontinued))?;
            let scope = match r.scope.as_deref() {
                None | Some("document") => ReplacementScope::Document,
                Some("department") => ReplacementScope::Department,
                Some(other) => anyhow::bail!(
                    "unknown replacement scope: {other} (expected 'document' or 'department')"
                ),
            };
            Ok(ReplacementRule {
                discontinued: DiscontinuedCourse {
                    name: r.discontinued,
                    category,
                    credits: r.credits,
                },
                replacements: r.replacements,
                scope,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let general_education = match parsed.general_education {
        Some(gen_ed) => GeneralEducationRules {
            one_of_groups: gen_ed
                .one_of
                .into_iter()
                .map(|g| OneOfGroup {
                    group_id: g.group_id,
                    courses: g.courses,
                    credits: g.credits,
                })
                .collect(),
            individual_required: gen_ed.individual_required,
        },
        None => GeneralEducationRules::default(),
    };

    let competency = match parsed.competency {
        Some(c) => CompetencyRules {
            required_count: c.required_count,
            reserved_tag: c.reserved_tag,
        },
        None => CompetencyRules::default(),
    };

    Ok(RequirementCatalog {
        department: parsed.catalog.department,
        track: parsed.catalog.track,
        cohort: parsed.catalog.cohort,
        era,
        total_credits: parsed.catalog.total_credits,
        credit_quota,
        category_courses,
        general_education,
        replacement_rules,
        competency,
    })
}

/// Parse a single TOML file into a `Transcript`.
pub fn parse_transcript(path: &Path) -> Result<Transcript> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read transcript file: {}", path.display()))?;

    parse_transcript_str(&content, path)
}

/// Parse a TOML string into a `Transcript` (useful for testing).
pub fn parse_transcript_str(content: &str, source_path: &Path) -> Result<Transcript> {
    let parsed: TomlTranscriptFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let courses = parsed
        .courses
        .into_iter()
        .map(|c| {
            let category =
                parse_category(&c.category).with_context(|| format!("course '{}'", c.name))?;
            Ok(TakenCourse {
                category,
                name: c.name,
                credits: c.credits,
                group_id: c.group_id,
                competency_tag: c.competency_tag,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Transcript {
        student: StudentRecord {
            department: parsed.student.department,
            track: parsed.student.track,
            cohort: parsed.student.cohort,
        },
        courses,
    })
}

/// A warning from catalog linting.
#[derive(Debug, Clone)]
pub struct LintWarning {
    /// The catalog element the warning refers to (if applicable).
    pub subject: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Lint a catalog for soft issues that `validate` does not reject.
pub fn lint_catalog(catalog: &RequirementCatalog) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    // Quota sum drifting from the declared total usually means a category
    // was forgotten or the total is stale.
    let quota_sum: u32 = catalog.credit_quota.values().sum();
    if quota_sum != catalog.total_credits {
        warnings.push(LintWarning {
            subject: None,
            message: format!(
                "category quotas sum to {} but total_credits is {}",
                quota_sum, catalog.total_credits
            ),
        });
    }

    // A discontinued course listed in no category falls back to the era
    // baseline at evaluation time.
    for rule in &catalog.replacement_rules {
        let listed = catalog
            .category_courses
            .values()
            .flatten()
            .any(|c| c.name == rule.discontinued.name);
        if !listed {
            warnings.push(LintWarning {
                subject: Some(rule.discontinued.name.clone()),
                message: format!(
                    "discontinued course '{}' is in no course list; substitution credit will fall back to {}",
                    rule.discontinued.name,
                    catalog.baseline_category()
                ),
            });
        }
    }

    // Chained substitutions are not resolved; a replacement that is itself
    // discontinued will never satisfy anything.
    for rule in &catalog.replacement_rules {
        for replacement in &rule.replacements {
            if catalog
                .replacement_rules
                .iter()
                .any(|other| other.discontinued.name == *replacement)
            {
                warnings.push(LintWarning {
                    subject: Some(rule.discontinued.name.clone()),
                    message: format!(
                        "replacement '{}' is itself discontinued; chains are not resolved",
                        replacement
                    ),
                });
            }
        }
    }

    // A one-of group with a single member is just an individual requirement.
    for group in &catalog.general_education.one_of_groups {
        if group.courses.len() < 2 {
            warnings.push(LintWarning {
                subject: Some(group.group_id.clone()),
                message: format!(
                    "one-of group '{}' has {} course(s); expected at least 2",
                    group.group_id,
                    group.courses.len()
                ),
            });
        }
    }

    // Duplicate group ids make the per-group status ambiguous.
    let mut seen_ids = std::collections::HashSet::new();
    for group in &catalog.general_education.one_of_groups {
        if !seen_ids.insert(&group.group_id) {
            warnings.push(LintWarning {
                subject: Some(group.group_id.clone()),
                message: format!("duplicate one-of group id: {}", group.group_id),
            });
        }
    }

    warnings
}
