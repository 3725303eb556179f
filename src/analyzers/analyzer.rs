use chrono::Utc;
use std::path::Path;
use tracing::info;

use crate::analyzers::aggregate::{overall_topper, topper_per_university};
use crate::analyzers::types::{TopperReport, UniversityTopper};
use crate::parser::{LoadError, RowPolicy, load_students};
use crate::stats::{GradedStudent, grade_students};

/// Loads a score sheet, grades every student and finds the toppers.
#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn analyze(path: impl AsRef<Path>, policy: RowPolicy) -> Result<TopperReport, LoadError> {
    let path = path.as_ref();
    let roster = load_students(path, policy)?;
    let graded = grade_students(roster.students);

    let report = TopperReport::from_graded(
        path.display().to_string(),
        &graded,
        roster.rejected.len(),
    );

    info!(
        students = report.student_count,
        rejected = report.rejected_rows,
        universities = report.per_university.len(),
        "Score sheet analyzed"
    );

    Ok(report)
}

impl TopperReport {
    pub fn from_graded(source: String, graded: &[GradedStudent], rejected_rows: usize) -> Self {
        let mut per_university: Vec<UniversityTopper> = topper_per_university(graded)
            .into_iter()
            .map(|(university, topper)| UniversityTopper {
                university: university.to_string(),
                topper: topper.clone(),
            })
            .collect();
        per_university.sort_by(|a, b| a.university.cmp(&b.university));

        TopperReport {
            generated_at: Utc::now(),
            source,
            student_count: graded.len(),
            rejected_rows,
            overall: overall_topper(graded).cloned(),
            per_university,
        }
    }
}
