use super::Metric;
use crate::matrix::Column;

/// Pearson's chi-squared statistic of the 2x4 contingency table formed by two columns.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ChiSquared;

impl Metric for ChiSquared {
    fn name(&self) -> &'static str {
        "Chi-squared"
    }

    fn abbreviation(&self) -> &'static str {
        "Chi2"
    }

    fn is_distance(&self) -> bool {
        true
    }

    fn score(&self, a: &Column, b: &Column) -> f64 {
        let mut total = 0.0;
        for n in 0..4 {
            let expected = (a[n] + b[n]) / 2.0;
            // Both observations are zero, the cell carries no information
            if expected == 0.0 {
                continue;
            }
            total += (a[n] - expected).powi(2) / expected + (b[n] - expected).powi(2) / expected;
        }
        total
    }
}
