use super::Metric;
use crate::matrix::Column;

/// Pearson correlation coefficient between the four paired probabilities of two columns.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Pearson;

impl Metric for Pearson {
    fn name(&self) -> &'static str {
        "Pearson's correlation"
    }

    fn abbreviation(&self) -> &'static str {
        "PCC"
    }

    fn is_distance(&self) -> bool {
        false
    }

    fn score(&self, a: &Column, b: &Column) -> f64 {
        let mean_a = a.iter().sum::<f64>() / 4.0;
        let mean_b = b.iter().sum::<f64>() / 4.0;

        let (mut cov, mut var_a, mut var_b) = (0.0, 0.0, 0.0);
        for n in 0..4 {
            let (da, db) = (a[n] - mean_a, b[n] - mean_b);
            cov += da * db;
            var_a += da * da;
            var_b += db * db;
        }

        let denominator = (var_a * var_b).sqrt();
        if denominator == 0.0 {
            0.0
        } else {
            cov / denominator
        }
    }
}
