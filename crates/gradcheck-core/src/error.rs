//! Engine error types.
//!
//! Hard failures only: anything listed here rejects the evaluation call
//! before category math runs. Recoverable conditions (fallback
//! classification, duplicate transcript entries, ambiguous replacements) are
//! not errors; they are resolved per documented rules and surfaced as
//! [`crate::progress::EvalWarning`] values for audit.

use thiserror::Error;

use crate::model::Category;

/// Catalog integrity failures. These are caller/data bugs, not recoverable
/// locally.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A category is referenced somewhere in the catalog but absent from the
    /// credit quota map.
    #[error("category '{category}' referenced by {referenced_by} is missing from the credit quota")]
    MissingCategory {
        category: Category,
        referenced_by: String,
    },

    /// A catalog course carries a zero credit value.
    #[error("course '{course}' in category '{category}' has zero credits")]
    ZeroCreditCourse { course: String, category: Category },

    /// The same course name appears twice within one category list.
    #[error("duplicate course '{course}' in category '{category}'")]
    DuplicateCourse { course: String, category: Category },

    /// A replacement rule lists no replacements.
    #[error("replacement rule for '{discontinued}' has an empty replacement list")]
    EmptyReplacements { discontinued: String },
}

/// Transcript validation failures.
#[derive(Debug, Error)]
pub enum TranscriptError {
    /// A transcript line carries a zero credit value.
    #[error("taken course '{course}' has zero credits")]
    ZeroCreditCourse { course: String },

    /// A transcript line has a blank course name.
    #[error("taken course at index {index} has an empty name")]
    EmptyCourseName { index: usize },
}

/// Any failure of a full evaluation call.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Transcript(#[from] TranscriptError),
}
