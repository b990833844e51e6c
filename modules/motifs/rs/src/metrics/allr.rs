use super::Metric;
use crate::matrix::Column;

/// Average log-likelihood ratio of two columns against the uniform background.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ALLR;

impl Metric for ALLR {
    fn name(&self) -> &'static str {
        "Average Log-Likelihood Ratio"
    }

    fn abbreviation(&self) -> &'static str {
        "ALLR"
    }

    fn is_distance(&self) -> bool {
        false
    }

    fn score(&self, a: &Column, b: &Column) -> f64 {
        let mut ab = 0.0;
        let mut ba = 0.0;
        for n in 0..4 {
            ab += b[n] * (a[n] / 0.25).ln();
            ba += a[n] * (b[n] / 0.25).ln();
        }
        0.5 * (ab + ba)
    }
}
