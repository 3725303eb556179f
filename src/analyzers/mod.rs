//! Grading and topper aggregation.
//!
//! This module turns parsed students into final scores and letter grades,
//! then picks the best student overall and per university.

pub mod aggregate;
pub mod analyzer;
pub mod grade;
pub mod types;
pub mod utility;
