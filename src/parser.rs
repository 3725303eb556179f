//! CSV loader for student score sheets.
//!
//! The first row is always treated as a header and discarded. Every following
//! row is mapped positionally onto a [`Student`]: first name, last name,
//! university, then four integer test scores.

use csv::{ByteRecord, ReaderBuilder};
use std::fs::File;
use std::io::{BufReader, Read};
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use std::str::Utf8Error;
use thiserror::Error;
use tracing::{debug, warn};

use crate::stats::Student;

/// Number of positional fields a data row must provide.
pub const FIELD_COUNT: usize = 7;

const SCORE_COLUMNS: [usize; 4] = [3, 4, 5, 6];

/// What to do with a data row that cannot be turned into a [`Student`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowPolicy {
    /// Abort the load on the first invalid row.
    #[default]
    Strict,
    /// Drop invalid rows and report them in [`Roster::rejected`].
    Skip,
}

/// A data row that failed validation. `line` is 1-based; the header is line 1.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("line {line}: expected at least {expected} fields, found {found}", expected = FIELD_COUNT)]
    TooFewFields { line: u64, found: usize },

    #[error("line {line}: column {column} is not an integer score: {value:?}")]
    InvalidScore {
        line: u64,
        column: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("line {line}: column {column} is not valid UTF-8")]
    InvalidText {
        line: u64,
        column: usize,
        #[source]
        source: Utf8Error,
    },
}

impl RowError {
    /// Source line of the rejected row.
    pub fn line(&self) -> u64 {
        match self {
            RowError::TooFewFields { line, .. }
            | RowError::InvalidScore { line, .. }
            | RowError::InvalidText { line, .. } => *line,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input has no header row")]
    MissingHeader,

    #[error("failed to read CSV input")]
    Csv(#[from] csv::Error),

    #[error("invalid row")]
    InvalidRow(#[source] RowError),
}

/// Students read from one source, in source order.
#[derive(Debug, Default)]
pub struct Roster {
    pub students: Vec<Student>,
    /// Rows dropped under [`RowPolicy::Skip`]. Always empty under `Strict`.
    pub rejected: Vec<RowError>,
}

/// Opens `path` and parses it with [`parse_students`].
///
/// # Errors
///
/// Returns [`LoadError::Open`] if the file cannot be opened, otherwise any
/// error from [`parse_students`].
#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_students(path: impl AsRef<Path>, policy: RowPolicy) -> Result<Roster, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    parse_students(BufReader::new(file), policy)
}

/// Parses CSV student rows from any reader.
///
/// # Errors
///
/// Fails with [`LoadError::MissingHeader`] on empty input, [`LoadError::Csv`]
/// if the CSV stream cannot be read, and [`LoadError::InvalidRow`] for the
/// first bad row when `policy` is [`RowPolicy::Strict`]. Fields are decoded
/// per row, so undecodable text is a row error rather than a read error.
pub fn parse_students<R: Read>(reader: R, policy: RowPolicy) -> Result<Roster, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.byte_headers()?;
    if headers.is_empty() {
        return Err(LoadError::MissingHeader);
    }
    debug!(columns = headers.len(), "Header skipped");

    let mut roster = Roster::default();

    for result in rdr.byte_records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());

        match parse_row(&record, line) {
            Ok(student) => roster.students.push(student),
            Err(e) => match policy {
                RowPolicy::Strict => return Err(LoadError::InvalidRow(e)),
                RowPolicy::Skip => {
                    warn!(line, error = %e, "Skipping invalid row");
                    roster.rejected.push(e);
                }
            },
        }
    }

    debug!(
        rows = roster.students.len(),
        rejected = roster.rejected.len(),
        "Student rows parsed"
    );
    Ok(roster)
}

fn field(record: &ByteRecord, column: usize, line: u64) -> Result<&str, RowError> {
    std::str::from_utf8(&record[column]).map_err(|source| RowError::InvalidText {
        line,
        column,
        source,
    })
}

fn parse_row(record: &ByteRecord, line: u64) -> Result<Student, RowError> {
    if record.len() < FIELD_COUNT {
        return Err(RowError::TooFewFields {
            line,
            found: record.len(),
        });
    }

    let mut scores = [0i32; 4];
    for (slot, column) in scores.iter_mut().zip(SCORE_COLUMNS) {
        let value = field(record, column, line)?;
        *slot = value.parse().map_err(|source| RowError::InvalidScore {
            line,
            column,
            value: value.to_string(),
            source,
        })?;
    }

    Ok(Student {
        first_name: field(record, 0, line)?.to_string(),
        last_name: field(record, 1, line)?.to_string(),
        university: field(record, 2, line)?.to_string(),
        test1_score: scores[0],
        test2_score: scores[1],
        test3_score: scores[2],
        test4_score: scores[3],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    const HEADER: &str = "first_name,last_name,university,test1,test2,test3,test4\n";

    fn parse(body: &str, policy: RowPolicy) -> Result<Roster, LoadError> {
        let input = format!("{HEADER}{body}");
        parse_students(input.as_bytes(), policy)
    }

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    #[test]
    fn test_parse_rows_in_order() {
        let roster = parse(
            "Ann,Lee,StateU,80,80,80,80\nBob,Roe,StateU,60,61,62,63\nCid,Fox,TechU,90,90,90,90\n",
            RowPolicy::Strict,
        )
        .unwrap();

        assert_eq!(roster.students.len(), 3);
        assert!(roster.rejected.is_empty());
        let names: Vec<_> = roster
            .students
            .iter()
            .map(|s| s.first_name.as_str())
            .collect();
        assert_eq!(names, vec!["Ann", "Bob", "Cid"]);

        let bob = &roster.students[1];
        assert_eq!(bob.last_name, "Roe");
        assert_eq!(bob.university, "StateU");
        assert_eq!(bob.scores(), [60, 61, 62, 63]);
    }

    #[test]
    fn test_header_is_discarded_even_if_numeric() {
        let input = "1,2,3,4,5,6,7\nAnn,Lee,StateU,80,80,80,80\n";
        let roster = parse_students(input.as_bytes(), RowPolicy::Strict).unwrap();
        assert_eq!(roster.students.len(), 1);
    }

    #[test]
    fn test_header_only_yields_no_students() {
        let roster = parse("", RowPolicy::Strict).unwrap();
        assert!(roster.students.is_empty());
    }

    #[test]
    fn test_empty_input_is_missing_header() {
        let result = parse_students("".as_bytes(), RowPolicy::Strict);
        assert!(matches!(result, Err(LoadError::MissingHeader)));
    }

    #[test]
    fn test_text_fields_are_verbatim() {
        let roster = parse(
            " Ann ,Lee,\"State U, North\",1,2,3,4\n",
            RowPolicy::Strict,
        )
        .unwrap();
        let s = &roster.students[0];
        assert_eq!(s.first_name, " Ann ");
        assert_eq!(s.university, "State U, North");
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let roster = parse("Ann,Lee,StateU,1,2,3,4,extra\n", RowPolicy::Strict).unwrap();
        assert_eq!(roster.students[0].scores(), [1, 2, 3, 4]);
    }

    #[test]
    fn test_strict_rejects_non_numeric_score() {
        let result = parse(
            "Ann,Lee,StateU,80,80,80,80\nBob,Roe,StateU,60,7O,60,60\n",
            RowPolicy::Strict,
        );

        match result {
            Err(LoadError::InvalidRow(RowError::InvalidScore {
                line,
                column,
                value,
                ..
            })) => {
                assert_eq!(line, 3);
                assert_eq!(column, 4);
                assert_eq!(value, "7O");
            }
            other => panic!("expected invalid score, got {other:?}"),
        }
    }

    #[test]
    fn test_strict_rejects_short_row() {
        let result = parse("Ann,Lee,StateU,80,80\n", RowPolicy::Strict);
        assert!(matches!(
            result,
            Err(LoadError::InvalidRow(RowError::TooFewFields { line: 2, found: 5 }))
        ));
    }

    #[test]
    fn test_strict_rejects_empty_score() {
        let result = parse("Ann,Lee,StateU,80,,80,80\n", RowPolicy::Strict);
        assert!(matches!(
            result,
            Err(LoadError::InvalidRow(RowError::InvalidScore { column: 4, .. }))
        ));
    }

    #[test]
    fn test_skip_collects_rejected_rows() {
        let roster = parse(
            "Ann,Lee,StateU,80,80,80,80\nBob,Roe,StateU,x,60,60,60\nShort,Row\nCid,Fox,TechU,90,90,90,90\n",
            RowPolicy::Skip,
        )
        .unwrap();

        let names: Vec<_> = roster
            .students
            .iter()
            .map(|s| s.first_name.as_str())
            .collect();
        assert_eq!(names, vec!["Ann", "Cid"]);

        let lines: Vec<_> = roster.rejected.iter().map(RowError::line).collect();
        assert_eq!(lines, vec![3, 4]);
        assert!(matches!(roster.rejected[0], RowError::InvalidScore { column: 3, .. }));
        assert!(matches!(roster.rejected[1], RowError::TooFewFields { found: 2, .. }));
    }

    #[test]
    fn test_non_utf8_header_is_discarded() {
        let input: &[u8] = b"first,last,Universit\xe4t,t1,t2,t3,t4\nAnn,Lee,StateU,80,80,80,80\n";
        let roster = parse_students(input, RowPolicy::Strict).unwrap();

        assert_eq!(roster.students.len(), 1);
        assert_eq!(roster.students[0].first_name, "Ann");
    }

    #[test]
    fn test_strict_rejects_non_utf8_name() {
        let input: &[u8] = b"h1,h2,h3,h4,h5,h6,h7\nJos\xe9,Lee,StateU,80,80,80,80\n";
        let result = parse_students(input, RowPolicy::Strict);

        assert!(matches!(
            result,
            Err(LoadError::InvalidRow(RowError::InvalidText { line: 2, column: 0, .. }))
        ));
    }

    #[test]
    fn test_skip_keeps_rows_around_non_utf8_row() {
        let input: &[u8] = b"h1,h2,h3,h4,h5,h6,h7\n\
            Ann,Lee,StateU,80,80,80,80\n\
            Jos\xe9,Ruiz,StateU,90,90,90,90\n\
            Cid,Fox,TechU,70,70,70,70\n";
        let roster = parse_students(input, RowPolicy::Skip).unwrap();

        let names: Vec<_> = roster
            .students
            .iter()
            .map(|s| s.first_name.as_str())
            .collect();
        assert_eq!(names, vec!["Ann", "Cid"]);
        assert_eq!(roster.rejected.len(), 1);
        assert!(matches!(
            roster.rejected[0],
            RowError::InvalidText { line: 3, column: 0, .. }
        ));
    }

    #[test]
    fn test_row_error_message() {
        let err = RowError::TooFewFields { line: 4, found: 2 };
        assert_eq!(err.to_string(), "line 4: expected at least 7 fields, found 2");
    }

    #[test]
    fn test_load_missing_file() {
        let path = temp_path("score_rater_test_does_not_exist.csv");
        let _ = fs::remove_file(&path);

        let result = load_students(&path, RowPolicy::Strict);
        assert!(matches!(result, Err(LoadError::Open { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_path("score_rater_test_load.csv");
        fs::write(&path, format!("{HEADER}Ann,Lee,StateU,80,80,80,80\n")).unwrap();

        let roster = load_students(&path, RowPolicy::Strict).unwrap();
        assert_eq!(roster.students.len(), 1);

        fs::remove_file(&path).unwrap();
    }
}
