use std::fmt::Display;

#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use eyre::{ensure, Result};
use itertools::Itertools;

/// A single motif position: probabilities of A, C, G and T (in this order).
pub type Column = [f64; 4];

/// Background distribution used as a neutral filler and as the log-odds reference.
pub const UNIFORM: Column = [0.25; 4];

/// Pseudo-count that replaces exact zeros before log-based metrics are applied.
pub const DEFAULT_PSEUDOCOUNT: f64 = 0.01;

/// Maximum allowed deviation of a column sum from 1.0.
pub const SUM_TOLERANCE: f64 = 0.01;

/// Position frequency matrix of a DNA motif.
///
/// Guarantees:
/// - at least one column;
/// - all values are finite and non-negative;
/// - every column sums to 1 (within [`SUM_TOLERANCE`]).
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, PartialEq, Debug)]
pub struct FrequencyMatrix {
    columns: Vec<Column>,
}

impl FrequencyMatrix {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        ensure!(
            !columns.is_empty(),
            "Frequency matrix must have at least one column"
        );
        for (ind, column) in columns.iter().enumerate() {
            ensure!(
                column.iter().all(|x| x.is_finite() && *x >= 0.0),
                "Column {ind} contains negative or non-finite values: {column:?}"
            );
            let total: f64 = column.iter().sum();
            ensure!(
                (total - 1.0).abs() <= SUM_TOLERANCE,
                "Column {ind} must sum to 1, got {total}"
            );
        }
        Ok(Self { columns })
    }

    /// Build a matrix from raw per-position counts (or any non-negative weights).
    /// Columns without any counts are treated as uniform.
    pub fn from_counts(counts: Vec<Column>) -> Result<Self> {
        let columns = counts
            .into_iter()
            .map(|column| {
                let total: f64 = column.iter().sum();
                if total > 0.0 {
                    column.map(|x| x / total)
                } else {
                    UNIFORM
                }
            })
            .collect();
        Self::new(columns)
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, ind: usize) -> Option<&Column> {
        self.columns.get(ind)
    }

    /// Matrix of the reverse-complement motif: column order is reversed, A<->T and C<->G swapped.
    pub fn reverse_complement(&self) -> Self {
        let columns = self
            .columns
            .iter()
            .rev()
            .map(|&[a, c, g, t]| [t, g, c, a])
            .collect();
        Self { columns }
    }

    /// Copy of the matrix with every exact zero replaced by the given pseudo-count.
    /// Columns are not renormalized.
    pub fn with_pseudocount(&self, pseudocount: f64) -> Result<Self> {
        ensure!(
            pseudocount.is_finite() && pseudocount > 0.0,
            "Pseudo-count must be a positive number, got {pseudocount}"
        );
        let columns = self
            .columns
            .iter()
            .map(|column| substitute_zeros(column, pseudocount))
            .collect();
        Ok(Self { columns })
    }

    /// Information content (bits) of each column relative to the uniform background.
    pub fn information_content(&self) -> Vec<f64> {
        self.columns
            .iter()
            .map(|column| {
                column
                    .iter()
                    .filter(|x| **x > 0.0)
                    .map(|x| x * (x / 0.25).log2())
                    .sum()
            })
            .collect()
    }
}

/// Replace exact zeros of a column with the pseudo-count.
#[inline(always)]
pub(crate) fn substitute_zeros(column: &Column, pseudocount: f64) -> Column {
    column.map(|x| if x == 0.0 { pseudocount } else { x })
}

impl Display for FrequencyMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (ind, base) in ['A', 'C', 'G', 'T'].iter().enumerate() {
            let row = self
                .columns
                .iter()
                .map(|column| format!("{:.3}", column[ind]))
                .join("\t");
            writeln!(f, "{base}\t{row}")?;
        }
        Ok(())
    }
}
