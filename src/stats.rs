//! Per-student records and the scores derived from them.

use serde::Serialize;
use std::fmt;

use crate::analyzers::grade::{Grade, grade};
use crate::analyzers::utility::mean;

/// One data row of the input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    pub first_name: String,
    pub last_name: String,
    pub university: String,
    pub test1_score: i32,
    pub test2_score: i32,
    pub test3_score: i32,
    pub test4_score: i32,
}

impl Student {
    pub fn scores(&self) -> [i32; 4] {
        [
            self.test1_score,
            self.test2_score,
            self.test3_score,
            self.test4_score,
        ]
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} from {} (Test Scores: {}, {}, {}, {})",
            self.first_name,
            self.last_name,
            self.university,
            self.test1_score,
            self.test2_score,
            self.test3_score,
            self.test4_score
        )
    }
}

/// A [`Student`] with its final score and letter grade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradedStudent {
    #[serde(flatten)]
    pub student: Student,
    pub final_score: f64,
    pub grade: Grade,
}

impl GradedStudent {
    pub fn from_student(student: Student) -> Self {
        let final_score = mean(&student.scores());
        GradedStudent {
            student,
            final_score,
            grade: grade(final_score),
        }
    }

    pub fn university(&self) -> &str {
        &self.student.university
    }
}

impl fmt::Display for GradedStudent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - Final Score: {:.2}, Grade: {}",
            self.student, self.final_score, self.grade
        )
    }
}

/// Grades every student, preserving input order.
pub fn grade_students(students: Vec<Student>) -> Vec<GradedStudent> {
    students
        .into_iter()
        .map(GradedStudent::from_student)
        .collect()
}

#[cfg(test)]
pub(crate) fn student(first: &str, last: &str, university: &str, scores: [i32; 4]) -> Student {
    Student {
        first_name: first.to_string(),
        last_name: last.to_string(),
        university: university.to_string(),
        test1_score: scores[0],
        test2_score: scores[1],
        test3_score: scores[2],
        test4_score: scores[3],
    }
}
