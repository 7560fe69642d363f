//! Independence Test
//!
//! Pearson's chi-square test of independence between the row and column
//! categories of a [`ContingencyTable`].
use crate::config::{parse_nan, parse_nan_grid, parse_nan_vec, DegeneracyPolicy, JsonIO, TestConfig};
use crate::data::RowMajorMatrix;
use crate::distribution::{chi_square_upper_tail, critical_value};
use crate::errors::ChiSquareError;
use crate::table::ContingencyTable;
use crate::utils::fmt_vec_output;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell counts expected under independence, with the labels of the observed table.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedTable {
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    pub values: RowMajorMatrix<f64>,
}

impl ExpectedTable {
    pub fn get(&self, i: usize, j: usize) -> f64 {
        *self.values.get(i, j)
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.values.to_rows()
    }
}

/// Expected count of every cell, `row_total * column_total / total`.
///
/// A table without any observations gives NaN in every cell.
pub fn expected_values(table: &ContingencyTable) -> ExpectedTable {
    let row_totals = table.row_totals_by_index();
    let column_totals = table.column_totals_by_index();
    let total = table.total();

    ExpectedTable {
        row_labels: table.row_labels().to_vec(),
        column_labels: table.column_labels().to_vec(),
        values: table
            .counts()
            .map_indexed(|i, j, _| (row_totals[i] * column_totals[j]) / total),
    }
}

/// Pearson's statistic, the sum of `(observed - expected)^2 / expected` over all cells.
///
/// Not finite when any expected count is zero.
pub fn test_statistic(table: &ContingencyTable) -> f64 {
    statistic_from(table, &expected_values(table))
}

fn statistic_from(table: &ContingencyTable, expected: &ExpectedTable) -> f64 {
    table
        .counts()
        .iter_rows()
        .zip(expected.values.iter_rows())
        .map(|(observed, expected)| {
            observed
                .iter()
                .zip(expected)
                .map(|(o, e)| (o - e).powi(2) / e)
                .sum::<f64>()
        })
        .sum()
}

/// Standardized residual of every cell, `(observed - expected) / sqrt(expected)`.
pub fn residuals(table: &ContingencyTable) -> Vec<Vec<f64>> {
    residuals_from(table, &expected_values(table))
}

fn residuals_from(table: &ContingencyTable, expected: &ExpectedTable) -> Vec<Vec<f64>> {
    table
        .counts()
        .map_indexed(|i, j, o| (o - expected.get(i, j)) / expected.get(i, j).sqrt())
        .to_rows()
}

/// Sum of the absolute residuals of each row.
///
/// The row with the largest value deviates most from independence.
pub fn row_impact(table: &ContingencyTable) -> Vec<f64> {
    impact_from(&residuals(table))
}

fn impact_from(residuals: &[Vec<f64>]) -> Vec<f64> {
    residuals
        .iter()
        .map(|row| row.iter().map(|r| r.abs()).sum())
        .collect()
}

/// Cramér's V for a chi-square statistic of `table`.
///
/// Not finite for a table with a single row or column.
pub fn cramers_v(table: &ContingencyTable, chi_square_value: f64) -> f64 {
    let (rows, cols) = table.shape();
    let m = rows.min(cols) as f64;
    let n = table.total();
    (chi_square_value / (n * (m - 1.0))).sqrt()
}

/// Describe why no statistic is defined for `table`, if that is the case.
pub fn degeneracy(table: &ContingencyTable) -> Option<String> {
    let (rows, cols) = table.shape();
    if table.total() == 0.0 {
        return Some("the table holds no observations".to_string());
    }
    if let Some((label, _)) = table
        .row_labels()
        .iter()
        .zip(table.row_totals_by_index())
        .find(|(_, t)| *t == 0.0)
    {
        return Some(format!("row {:?} holds no observations", label));
    }
    if let Some((label, _)) = table
        .column_labels()
        .iter()
        .zip(table.column_totals_by_index())
        .find(|(_, t)| *t == 0.0)
    {
        return Some(format!("column {:?} holds no observations", label));
    }
    if rows.min(cols) == 1 {
        return Some("a single row or column has no effect size".to_string());
    }
    None
}

/// Outcome of a chi-square test of independence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChiSquareTestResult {
    /// The table the test ran on.
    pub observed: ContingencyTable,
    /// Chi-square statistic calculated from the data.
    #[serde(deserialize_with = "parse_nan")]
    pub calculated_chi_square_value: f64,
    /// Critical value for the significance level and degrees of freedom.
    #[serde(deserialize_with = "parse_nan")]
    pub critical_chi_square_value: f64,
    pub significance_level: f64,
    pub degrees_of_freedom: usize,
    /// Upper-tail probability of the calculated statistic.
    #[serde(deserialize_with = "parse_nan")]
    pub p_value: f64,
    #[serde(deserialize_with = "parse_nan")]
    pub cramers_v: f64,
    /// Standardized residual of each cell.
    #[serde(deserialize_with = "parse_nan_grid")]
    pub residuals: Vec<Vec<f64>>,
    /// Sum of absolute residuals of each row.
    #[serde(deserialize_with = "parse_nan_vec")]
    pub row_impact: Vec<f64>,
    /// True if independence can't be rejected,
    /// false if the statistic reaches the critical value.
    pub null_hypothesis: bool,
}

impl ChiSquareTestResult {
    /// Index and label of the row with the largest impact, NaN impacts are skipped.
    pub fn most_impactful_row(&self) -> Option<(usize, &str)> {
        self.row_impact
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_nan())
            .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
                Some((_, b)) if b >= v => best,
                _ => Some((i, v)),
            })
            .map(|(i, _)| (i, self.observed.row_labels()[i].as_str()))
    }
}

impl JsonIO for ChiSquareTestResult {}

impl fmt::Display for ChiSquareTestResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let decision = if self.null_hypothesis { "not rejected" } else { "rejected" };
        writeln!(f, "Chi-square test of independence")?;
        writeln!(
            f,
            "statistic: {:.4}, critical value: {:.4} (alpha {}, dof {})",
            self.calculated_chi_square_value,
            self.critical_chi_square_value,
            self.significance_level,
            self.degrees_of_freedom
        )?;
        writeln!(f, "p-value: {:.6}, Cramér's V: {:.4}", self.p_value, self.cramers_v)?;
        writeln!(f, "independence: {}", decision)?;
        write!(f, "row impact: {}", fmt_vec_output(&self.row_impact))
    }
}

/// Runs chi-square tests of independence with a fixed configuration.
#[derive(Clone, Debug, Default)]
pub struct IndependenceTest {
    pub cfg: TestConfig,
}

impl IndependenceTest {
    pub fn new(cfg: TestConfig) -> Self {
        IndependenceTest { cfg }
    }

    /// Set the significance level.
    /// * `significance_level` - Upper-tail probability of the critical value, in (0, 1].
    pub fn set_significance_level(mut self, significance_level: f64) -> Self {
        self.cfg.significance_level = significance_level;
        self
    }

    /// Set the degeneracy policy.
    /// * `degeneracy_policy` - Whether degenerate tables give non-finite results or an error.
    pub fn set_degeneracy_policy(mut self, degeneracy_policy: DegeneracyPolicy) -> Self {
        self.cfg.degeneracy_policy = degeneracy_policy;
        self
    }

    /// Run the test on `table`.
    ///
    /// Independence is kept when the statistic is strictly below the critical value.
    pub fn run(&self, table: &ContingencyTable) -> Result<ChiSquareTestResult, ChiSquareError> {
        self.cfg.validate()?;
        let alpha = self.cfg.significance_level;
        let dof = table.degrees_of_freedom();
        let critical = critical_value(alpha, dof as f64)?;

        if let Some(reason) = degeneracy(table) {
            match self.cfg.degeneracy_policy {
                DegeneracyPolicy::Strict => return Err(ChiSquareError::DegenerateTable(reason)),
                DegeneracyPolicy::Permissive => warn!("Degenerate table, results may not be finite: {}.", reason),
            }
        }

        let expected = expected_values(table);
        let statistic = statistic_from(table, &expected);
        let residuals = residuals_from(table, &expected);
        let null_hypothesis = statistic < critical;
        info!(
            "Chi-square statistic {:.4}, critical value {:.4}, independence {}.",
            statistic,
            critical,
            if null_hypothesis { "kept" } else { "rejected" }
        );

        Ok(ChiSquareTestResult {
            observed: table.clone(),
            calculated_chi_square_value: statistic,
            critical_chi_square_value: critical,
            significance_level: alpha,
            degrees_of_freedom: dof,
            p_value: chi_square_upper_tail(statistic, dof),
            cramers_v: cramers_v(table, statistic),
            row_impact: impact_from(&residuals),
            residuals,
            null_hypothesis,
        })
    }
}

/// Run a chi-square test of independence at significance level `alpha`.
///
/// ```
/// use chisquare::{run_test, ContingencyTable};
///
/// let table = ContingencyTable::new(
///     vec!["site1", "site2"],
///     vec!["good", "bad"],
///     vec![vec![90., 10.], vec![700., 200.]],
/// )
/// .unwrap();
/// let result = run_test(&table, 0.05).unwrap();
/// assert!(!result.null_hypothesis);
/// ```
pub fn run_test(table: &ContingencyTable, alpha: f64) -> Result<ChiSquareTestResult, ChiSquareError> {
    IndependenceTest::default().set_significance_level(alpha).run(table)
}
