//! Pearson chi-square test of independence for R x C contingency tables.
//!
//! Build a [`ContingencyTable`] from labelled counts and hand it to
//! [`run_test`], or to an [`IndependenceTest`] for more control over the run.

// Modules
pub mod config;
pub mod constants;
pub mod data;
pub mod distribution;
pub mod errors;
pub mod independence;
pub mod table;
pub mod utils;

// Individual classes, and functions
pub use config::{DegeneracyPolicy, JsonIO, TestConfig};
pub use distribution::{chi_square_upper_tail, critical_value};
pub use errors::{ChiSquareError, ValidationError};
pub use independence::{
    cramers_v, expected_values, residuals, row_impact, run_test, test_statistic, ChiSquareTestResult, ExpectedTable,
    IndependenceTest,
};
pub use table::ContingencyTable;
