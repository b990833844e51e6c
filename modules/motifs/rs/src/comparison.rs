#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;

use motiflab_core_rs::loc::Strand;

use crate::metrics::{Metric, SENTINEL};

/// Best placement of one motif relative to another.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, Copy, PartialEq, Debug, Constructor, Dissolve, Getters)]
pub struct Hit {
    /// Total metric score summed over the aligned columns.
    score: f64,
    /// Orientation of the second motif: forward = as given, reverse = reverse-complemented.
    strand: Strand,
    /// Position of the second motif's first column relative to the first motif's first column.
    offset: isize,
}

/// Outcome of a motif-to-motif comparison.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Comparison {
    Aligned(Hit),
    /// The shorter motif is below the minimum overlap, so no placement can be scored.
    NoAlignment,
}

impl Comparison {
    pub fn hit(&self) -> Option<&Hit> {
        match self {
            Comparison::Aligned(hit) => Some(hit),
            Comparison::NoAlignment => None,
        }
    }

    pub fn is_aligned(&self) -> bool {
        matches!(self, Comparison::Aligned(_))
    }

    /// Score of the comparison where unalignable motifs get the worst sentinel score of the metric
    /// (-100000 for similarity metrics, +100000 for distance metrics).
    pub fn score_or_sentinel(&self, metric: &dyn Metric) -> f64 {
        match self {
            Comparison::Aligned(hit) => hit.score,
            Comparison::NoAlignment if metric.is_distance() => SENTINEL,
            Comparison::NoAlignment => -SENTINEL,
        }
    }

    /// Pick the better of two comparisons; aligned beats unaligned and `self` wins ties.
    pub fn best_of(self, other: Self, metric: &dyn Metric) -> Self {
        match (&self, &other) {
            (Comparison::Aligned(a), Comparison::Aligned(b)) => {
                if metric.better_than(b.score, a.score) {
                    other
                } else {
                    self
                }
            }
            (Comparison::NoAlignment, Comparison::Aligned(_)) => other,
            _ => self,
        }
    }
}

impl From<Hit> for Comparison {
    fn from(hit: Hit) -> Self {
        Comparison::Aligned(hit)
    }
}
