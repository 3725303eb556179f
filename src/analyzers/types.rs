//! Data types produced by the analysis pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::stats::GradedStudent;

/// Top student of a single university.
#[derive(Debug, Clone, Serialize)]
pub struct UniversityTopper {
    pub university: String,
    pub topper: GradedStudent,
}

/// Result of analyzing one score sheet.
#[derive(Debug, Serialize)]
pub struct TopperReport {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub student_count: usize,
    pub rejected_rows: usize,
    /// `None` when the sheet has no students.
    pub overall: Option<GradedStudent>,
    /// Sorted by university name.
    pub per_university: Vec<UniversityTopper>,
}
