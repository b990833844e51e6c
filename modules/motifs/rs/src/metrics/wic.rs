use super::Metric;
use crate::matrix::Column;

/// Penalty applied to the information content difference.
const DIC_WEIGHT: f64 = 2.5;

/// Weighted information content: geometric mean of the columns' information contents
/// penalized by their per-base information difference.
///
/// The difference is signed (`DIC(a, b) = -DIC(b, a)`), so the metric is not symmetric.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct WIC;

#[inline(always)]
fn bits(p: f64) -> f64 {
    if p == 0.0 {
        0.0
    } else {
        p * (p / 0.25).log2()
    }
}

impl WIC {
    /// Information content of a column in bits.
    pub fn ic(column: &Column) -> f64 {
        column.iter().map(|p| bits(*p)).sum()
    }

    /// Signed sum of the per-base information content differences between two columns.
    pub fn dic(a: &Column, b: &Column) -> f64 {
        a.iter().zip(b).map(|(x, y)| bits(*x) - bits(*y)).sum()
    }
}

impl Metric for WIC {
    fn name(&self) -> &'static str {
        "Weighted Information Content"
    }

    fn abbreviation(&self) -> &'static str {
        "WIC"
    }

    fn is_distance(&self) -> bool {
        false
    }

    fn score(&self, a: &Column, b: &Column) -> f64 {
        (Self::ic(a) * Self::ic(b)).sqrt() - DIC_WEIGHT * Self::dic(a, b)
    }
}
