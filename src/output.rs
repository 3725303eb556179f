//! Report rendering.
//!
//! Supports human-readable lines and pretty-printed JSON.

use anyhow::Result;
use std::io::Write;
use tracing::debug;

use crate::analyzers::types::TopperReport;
use crate::stats::GradedStudent;

/// Writes the report as plain text lines.
pub fn write_text<W: Write>(report: &TopperReport, mut out: W) -> Result<()> {
    match &report.overall {
        Some(top) => writeln!(out, "Overall topper: {top}")?,
        None => writeln!(out, "Overall topper: no students")?,
    }

    writeln!(out, "Topper per university:")?;
    for entry in &report.per_university {
        writeln!(out, "  {}: {}", entry.university, entry.topper)?;
    }

    if report.rejected_rows > 0 {
        writeln!(out, "Skipped {} invalid row(s)", report.rejected_rows)?;
    }

    out.flush()?;
    Ok(())
}

/// Writes the report as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write>(report: &TopperReport, mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, report)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Writes one line per graded student, in the given order.
pub fn write_grades<W: Write>(students: &[GradedStudent], mut out: W) -> Result<()> {
    debug!(count = students.len(), "Writing graded students");
    for s in students {
        writeln!(out, "{s}")?;
    }
    out.flush()?;
    Ok(())
}
