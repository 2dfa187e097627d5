//! Evaluation report types with JSON persistence and progress comparison.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Category, StudentRecord};
use crate::progress::GraduationProgress;

/// A complete evaluation report: one student, one catalog, one point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Who was evaluated.
    pub student: StudentRecord,
    /// The evaluation result.
    pub progress: GraduationProgress,
}

impl EvaluationReport {
    pub fn new(student: StudentRecord, progress: GraduationProgress) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            student,
            progress,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: EvaluationReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare this report against an earlier one and summarize the movement
    /// per category.
    pub fn compare(&self, earlier: &EvaluationReport) -> ProgressDelta {
        let mut categories = Vec::new();

        for (&category, current) in &self.progress.categories {
            let earlier_earned = earlier
                .progress
                .categories
                .get(&category)
                .map(|c| c.earned)
                .unwrap_or(0);
            let delta = current.earned as i64 - earlier_earned as i64;
            if delta != 0 {
                categories.push(CategoryDelta {
                    category,
                    earlier_earned,
                    current_earned: current.earned,
                    delta,
                });
            }
        }

        let newly_completed_groups = self
            .progress
            .one_of_groups
            .iter()
            .filter(|g| {
                g.completed
                    && !earlier
                        .progress
                        .one_of_groups
                        .iter()
                        .any(|e| e.group_id == g.group_id && e.completed)
            })
            .map(|g| g.display_name.clone())
            .collect();

        ProgressDelta {
            categories,
            total_delta: self.progress.total_earned as i64 - earlier.progress.total_earned as i64,
            newly_completed_groups,
            became_ready: self.progress.graduation_ready()
                && !earlier.progress.graduation_ready(),
        }
    }
}

/// Result of comparing two reports for the same student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressDelta {
    /// Categories whose earned credit moved, in presentation order.
    pub categories: Vec<CategoryDelta>,
    /// Movement of the overall earned total.
    pub total_delta: i64,
    /// One-of groups completed since the earlier report.
    pub newly_completed_groups: Vec<String>,
    /// True when graduation readiness flipped on between the two reports.
    pub became_ready: bool,
}

/// Per-category earned-credit movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDelta {
    pub category: Category,
    pub earlier_earned: u32,
    pub current_earned: u32,
    pub delta: i64,
}

impl ProgressDelta {
    /// Format the delta as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} categories moved, total {:+} credits\n\n",
            self.categories.len(),
            self.total_delta
        ));

        if !self.categories.is_empty() {
            md.push_str("| Category | Earlier | Current | Delta |\n");
            md.push_str("|----------|---------|---------|-------|\n");
            for c in &self.categories {
                md.push_str(&format!(
                    "| {} | {} | {} | {:+} |\n",
                    c.category.label(),
                    c.earlier_earned,
                    c.current_earned,
                    c.delta
                ));
            }
            md.push('\n');
        }

        if !self.newly_completed_groups.is_empty() {
            md.push_str("### Newly completed groups\n\n");
            for name in &self.newly_completed_groups {
                md.push_str(&format!("- {name}\n"));
            }
            md.push('\n');
        }

        if self.became_ready {
            md.push_str("**Graduation requirements are now fully satisfied.**\n");
        }

        md
    }

    /// Returns true if nothing moved between the two reports.
    pub fn is_unchanged(&self) -> bool {
        self.categories.is_empty() && self.total_delta == 0 && !self.became_ready
    }
}
