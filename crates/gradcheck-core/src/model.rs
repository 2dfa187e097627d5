//! Core data model types for gradcheck.
//!
//! These are the fundamental types the entire gradcheck system uses to
//! represent requirement catalogs, transcript lines, and replacement rules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{CatalogError, TranscriptError};

/// A requirement category: a named bucket of required credits.
///
/// The set of categories is closed. Which of them actually carry a quota in a
/// given catalog depends on its [`CurriculumEra`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// Mandatory major courses.
    MajorRequired,
    /// Elective major courses.
    MajorElective,
    /// Advanced major tier (revised-era catalogs).
    MajorAdvanced,
    /// Department-common tier (legacy-era catalogs).
    DepartmentCommon,
    /// Mandatory general-education courses.
    GeneralRequired,
    /// Elective general-education courses (competency-bearing).
    GeneralElective,
    /// Liberal-arts courses.
    LiberalArts,
    /// Free-elective catch-all that absorbs overflow in legacy catalogs.
    GeneralSelection,
    /// Residual-credit catch-all that absorbs overflow in revised catalogs.
    ResidualCredit,
}

impl Category {
    /// All categories, in presentation order.
    pub const ALL: [Category; 9] = [
        Category::MajorRequired,
        Category::MajorElective,
        Category::MajorAdvanced,
        Category::DepartmentCommon,
        Category::GeneralRequired,
        Category::GeneralElective,
        Category::LiberalArts,
        Category::GeneralSelection,
        Category::ResidualCredit,
    ];

    /// Human-readable label for report rendering.
    pub fn label(&self) -> &'static str {
        match self {
            Category::MajorRequired => "Major Required",
            Category::MajorElective => "Major Elective",
            Category::MajorAdvanced => "Major Advanced",
            Category::DepartmentCommon => "Department Common",
            Category::GeneralRequired => "General Required",
            Category::GeneralElective => "General Elective",
            Category::LiberalArts => "Liberal Arts",
            Category::GeneralSelection => "General Selection",
            Category::ResidualCredit => "Residual Credit",
        }
    }

    fn token(&self) -> &'static str {
        match self {
            Category::MajorRequired => "majorRequired",
            Category::MajorElective => "majorElective",
            Category::MajorAdvanced => "majorAdvanced",
            Category::DepartmentCommon => "departmentCommon",
            Category::GeneralRequired => "generalRequired",
            Category::GeneralElective => "generalElective",
            Category::LiberalArts => "liberalArts",
            Category::GeneralSelection => "generalSelection",
            Category::ResidualCredit => "residualCredit",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.token().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// The admission-cohort curriculum variant.
///
/// The era decides which major tier exists and which catch-all category
/// absorbs credit overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurriculumEra {
    /// Older cohorts: department-common tier, overflow routed to
    /// general selection.
    Legacy,
    /// Newer cohorts: advanced-major tier, overflow routed to
    /// residual credit.
    Revised,
}

impl CurriculumEra {
    /// The era-specific major tier category.
    ///
    /// This doubles as the baseline category for unclassifiable courses.
    pub fn tier_category(&self) -> Category {
        match self {
            CurriculumEra::Legacy => Category::DepartmentCommon,
            CurriculumEra::Revised => Category::MajorAdvanced,
        }
    }

    /// The catch-all category that receives the full overflow sum.
    pub fn catch_all(&self) -> Category {
        match self {
            CurriculumEra::Legacy => Category::GeneralSelection,
            CurriculumEra::Revised => Category::ResidualCredit,
        }
    }

    /// The primary categories whose surplus is redistributed.
    pub fn primary_categories(&self) -> [Category; 6] {
        [
            Category::MajorRequired,
            Category::MajorElective,
            Category::GeneralRequired,
            Category::GeneralElective,
            Category::LiberalArts,
            self.tier_category(),
        ]
    }
}

impl fmt::Display for CurriculumEra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurriculumEra::Legacy => write!(f, "legacy"),
            CurriculumEra::Revised => write!(f, "revised"),
        }
    }
}

/// One catalog course entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRef {
    /// Course name, unique within its category.
    pub name: String,
    /// Credit value, strictly positive.
    pub credits: u32,
    /// Mutual-exclusion tag shared by interchangeable courses.
    #[serde(default)]
    pub group_id: Option<String>,
}

/// One transcript line, as declared by the student record.
///
/// The declared category is authoritative for the base credit pass; it is
/// independent of how the catalog would classify the course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TakenCourse {
    /// Category the course was taken under.
    pub category: Category,
    /// Course name.
    pub name: String,
    /// Credit value, strictly positive.
    pub credits: u32,
    /// Mutual-exclusion tag, if any.
    #[serde(default)]
    pub group_id: Option<String>,
    /// Competency tag earned by this course, if any.
    #[serde(default)]
    pub competency_tag: Option<String>,
}

/// The discontinued side of a replacement rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscontinuedCourse {
    pub name: String,
    pub category: Category,
    pub credits: u32,
}

/// How widely a replacement rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplacementScope {
    /// Applies only to the catalog document carrying the rule.
    Document,
    /// Applies to every catalog of the same department.
    Department,
}

impl Default for ReplacementScope {
    fn default() -> Self {
        ReplacementScope::Document
    }
}

/// A substitution mapping from a discontinued course to the courses that may
/// be taken instead.
///
/// Replacement order defines the tie-break priority: when several
/// replacements appear in a transcript, the first listed one is the one
/// counted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacementRule {
    pub discontinued: DiscontinuedCourse,
    /// Ordered, non-empty list of acceptable replacement course names.
    pub replacements: Vec<String>,
    #[serde(default)]
    pub scope: ReplacementScope,
}

/// A mutually-substitutable required set: taking any single member satisfies
/// the whole group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneOfGroup {
    pub group_id: String,
    pub courses: Vec<String>,
    /// Credit value of the group; legacy catalog data omits it.
    #[serde(default)]
    pub credits: Option<u32>,
}

/// General-education requirements: one-of groups plus individually mandatory
/// courses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralEducationRules {
    #[serde(default)]
    pub one_of_groups: Vec<OneOfGroup>,
    #[serde(default)]
    pub individual_required: Vec<String>,
}

/// Minimum-competency-diversity configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetencyRules {
    /// How many distinct competency tags are required.
    #[serde(default = "default_required_count")]
    pub required_count: u32,
    /// Tag value reserved for courses that satisfy a separate category and
    /// never count toward the competency threshold.
    #[serde(default = "default_reserved_tag")]
    pub reserved_tag: String,
}

fn default_required_count() -> u32 {
    3
}

fn default_reserved_tag() -> String {
    "liberalArts".to_string()
}

impl Default for CompetencyRules {
    fn default() -> Self {
        Self {
            required_count: default_required_count(),
            reserved_tag: default_reserved_tag(),
        }
    }
}

/// Student identity carried by a transcript file, used to pick the matching
/// catalog and to head reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub department: String,
    pub track: String,
    pub cohort: u16,
}

/// A parsed transcript: who the student is plus every course they took.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub student: StudentRecord,
    pub courses: Vec<TakenCourse>,
}

/// The full requirement catalog for one (department, track, cohort).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirementCatalog {
    pub department: String,
    pub track: String,
    pub cohort: u16,
    pub era: CurriculumEra,
    /// Declared total-credit target for the degree.
    pub total_credits: u32,
    /// Credit quota per category. Every category referenced anywhere else in
    /// the catalog must appear here.
    pub credit_quota: BTreeMap<Category, u32>,
    /// Course membership lists per category.
    #[serde(default)]
    pub category_courses: BTreeMap<Category, Vec<CourseRef>>,
    #[serde(default)]
    pub general_education: GeneralEducationRules,
    #[serde(default)]
    pub replacement_rules: Vec<ReplacementRule>,
    #[serde(default)]
    pub competency: CompetencyRules,
}

impl RequirementCatalog {
    /// Quota for a category, zero when absent.
    pub fn quota(&self, category: Category) -> u32 {
        self.credit_quota.get(&category).copied().unwrap_or(0)
    }

    /// The documented fallback category for courses found in no membership
    /// list.
    pub fn baseline_category(&self) -> Category {
        self.era.tier_category()
    }

    /// Fail-fast integrity validation. Runs before any category math.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for category in self.category_courses.keys() {
            if !self.credit_quota.contains_key(category) {
                return Err(CatalogError::MissingCategory {
                    category: *category,
                    referenced_by: "category course list".into(),
                });
            }
        }

        for referenced in [self.era.tier_category(), self.era.catch_all()] {
            if !self.credit_quota.contains_key(&referenced) {
                return Err(CatalogError::MissingCategory {
                    category: referenced,
                    referenced_by: format!("{} era layout", self.era),
                });
            }
        }

        for (category, courses) in &self.category_courses {
            let mut seen = HashSet::new();
            for course in courses {
                if course.credits == 0 {
                    return Err(CatalogError::ZeroCreditCourse {
                        course: course.name.clone(),
                        category: *category,
                    });
                }
                if !seen.insert(course.name.as_str()) {
                    return Err(CatalogError::DuplicateCourse {
                        course: course.name.clone(),
                        category: *category,
                    });
                }
            }
        }

        for rule in &self.replacement_rules {
            if rule.replacements.is_empty() {
                return Err(CatalogError::EmptyReplacements {
                    discontinued: rule.discontinued.name.clone(),
                });
            }
            if rule.discontinued.credits == 0 {
                return Err(CatalogError::ZeroCreditCourse {
                    course: rule.discontinued.name.clone(),
                    category: rule.discontinued.category,
                });
            }
            if !self.credit_quota.contains_key(&rule.discontinued.category) {
                return Err(CatalogError::MissingCategory {
                    category: rule.discontinued.category,
                    referenced_by: format!("replacement rule for '{}'", rule.discontinued.name),
                });
            }
        }

        Ok(())
    }
}

/// Fail-fast transcript validation. Malformed lines reject the evaluation
/// call before any aggregation happens.
pub fn validate_transcript(taken: &[TakenCourse]) -> Result<(), TranscriptError> {
    for (index, course) in taken.iter().enumerate() {
        if course.name.trim().is_empty() {
            return Err(TranscriptError::EmptyCourseName { index });
        }
        if course.credits == 0 {
            return Err(TranscriptError::ZeroCreditCourse {
                course: course.name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_display_and_parse() {
        assert_eq!(Category::MajorRequired.to_string(), "majorRequired");
        assert_eq!(
            "departmentCommon".parse::<Category>().unwrap(),
            Category::DepartmentCommon
        );
        assert_eq!(
            "RESIDUALCREDIT".parse::<Category>().unwrap(),
            Category::ResidualCredit
        );
        assert!("homeroom".parse::<Category>().is_err());
    }

    #[test]
    fn era_layout() {
        assert_eq!(
            CurriculumEra::Legacy.tier_category(),
            Category::DepartmentCommon
        );
        assert_eq!(
            CurriculumEra::Legacy.catch_all(),
            Category::GeneralSelection
        );
        assert_eq!(
            CurriculumEra::Revised.tier_category(),
            Category::MajorAdvanced
        );
        assert_eq!(CurriculumEra::Revised.catch_all(), Category::ResidualCredit);
    }

    #[test]
    fn primary_categories_contain_era_tier() {
        assert!(CurriculumEra::Legacy
            .primary_categories()
            .contains(&Category::DepartmentCommon));
        assert!(CurriculumEra::Revised
            .primary_categories()
            .contains(&Category::MajorAdvanced));
    }

    #[test]
    fn taken_course_serde_roundtrip() {
        let course = TakenCourse {
            category: Category::GeneralElective,
            name: "Data and Society".into(),
            credits: 3,
            group_id: None,
            competency_tag: Some("2".into()),
        };
        let json = serde_json::to_string(&course).unwrap();
        assert!(json.contains("generalElective"));
        let back: TakenCourse = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "Data and Society");
        assert_eq!(back.competency_tag.as_deref(), Some("2"));
    }

    #[test]
    fn transcript_rejects_zero_credits() {
        let taken = vec![TakenCourse {
            category: Category::MajorRequired,
            name: "Databases".into(),
            credits: 0,
            group_id: None,
            competency_tag: None,
        }];
        assert!(matches!(
            validate_transcript(&taken),
            Err(TranscriptError::ZeroCreditCourse { .. })
        ));
    }

    #[test]
    fn transcript_rejects_blank_name() {
        let taken = vec![TakenCourse {
            category: Category::MajorRequired,
            name: "  ".into(),
            credits: 3,
            group_id: None,
            competency_tag: None,
        }];
        assert!(matches!(
            validate_transcript(&taken),
            Err(TranscriptError::EmptyCourseName { index: 0 })
        ));
    }
}
