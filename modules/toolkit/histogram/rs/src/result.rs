use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;

/// Bookkeeping of a single histogram run.
#[derive(Clone, PartialEq, Debug, Default, Constructor, Dissolve, Getters)]
pub struct Summary {
    // Length of the alignment space covered by the bins
    span: i64,
    bin_width: f64,
    // Regions that passed all filters and were placed into bins
    regions: usize,
    // Sequences with at least one counted region
    sequences: usize,
}

impl Summary {
    /// Denominator used to normalize the bins.
    pub fn normalizer(&self, flatten: bool) -> usize {
        if flatten {
            self.sequences
        } else {
            self.regions
        }
    }
}
