use super::Metric;
use crate::matrix::Column;

/// Sum of squared distances between two columns.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct SSD;

impl Metric for SSD {
    fn name(&self) -> &'static str {
        "Sum of Squared Distances"
    }

    fn abbreviation(&self) -> &'static str {
        "SSD"
    }

    fn is_distance(&self) -> bool {
        true
    }

    fn score(&self, a: &Column, b: &Column) -> f64 {
        a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
    }
}
