//! gradcheck-report — Markdown and HTML rendering for evaluation reports.

pub mod html;
pub mod markdown;
