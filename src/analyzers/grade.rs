use serde::Serialize;
use std::fmt;

/// Letter grade assigned from a student's final score.
///
/// Variants are declared best first, so `Grade::A < Grade::F`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    F,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::F => "F",
        };
        f.write_str(letter)
    }
}

/// Converts a final score into a letter grade.
///
/// | Range   | Grade |
/// |---------|-------|
/// | >= 70   | A     |
/// | >= 50   | B     |
/// | >= 35   | C     |
/// | < 35    | F     |
pub fn grade(score: f64) -> Grade {
    match score {
        s if s >= 70.0 => Grade::A,
        s if s >= 50.0 => Grade::B,
        s if s >= 35.0 => Grade::C,
        _ => Grade::F,
    }
}
