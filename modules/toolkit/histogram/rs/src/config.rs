use ahash::AHashSet;
use derive_getters::{Dissolve, Getters};
use derive_more::{Constructor, Display};

/// Common origin used to stack sequences of different lengths on top of each other.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Display)]
pub enum Alignment {
    /// Upstream ends of all sequences are aligned.
    #[default]
    #[display("upstream")]
    Upstream,
    /// Downstream ends of all sequences are aligned.
    #[display("downstream")]
    Downstream,
    /// Sequence midpoints are aligned.
    #[display("center")]
    Center,
    /// Transcription start sites are aligned.
    #[display("TSS")]
    Tss,
    /// Transcription end sites are aligned.
    #[display("TES")]
    Tes,
}

impl Alignment {
    /// Whether the alignment relies on a TSS/TES annotation of every sequence.
    pub fn requires_annotation(&self) -> bool {
        matches!(self, Alignment::Tss | Alignment::Tes)
    }
}

/// Position of a region that is counted in the histogram.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Display)]
pub enum Anchor {
    /// Upstream end of the region.
    #[display("upstream")]
    Upstream,
    /// Downstream end of the region.
    #[display("downstream")]
    Downstream,
    /// Midpoint of the region.
    #[default]
    #[display("center")]
    Center,
    /// Every bin overlapped by the region.
    #[display("span")]
    Span,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Constructor, Dissolve, Getters)]
pub struct Config {
    alignment: Alignment,
    anchor: Anchor,
    /// Count each bin at most once per sequence and normalize by the number of sequences.
    flatten: bool,
}

/// Per-call selection of the sequences and regions that enter the histogram.
///
/// Unset filters accept everything. A region without a type is rejected by any type filter.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Filter {
    region_types: Option<AHashSet<String>>,
    sequences: Option<AHashSet<String>>,
    only_visible: bool,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region_types<T: Into<String>>(
        mut self,
        types: impl IntoIterator<Item = T>,
    ) -> Self {
        self.region_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_sequences<T: Into<String>>(mut self, names: impl IntoIterator<Item = T>) -> Self {
        self.sequences = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn only_visible(mut self, only_visible: bool) -> Self {
        self.only_visible = only_visible;
        self
    }

    pub fn is_only_visible(&self) -> bool {
        self.only_visible
    }

    pub fn accepts_sequence(&self, name: &str) -> bool {
        self.sequences
            .as_ref()
            .is_none_or(|names| names.contains(name))
    }

    pub fn accepts_region_type(&self, region_type: Option<&str>) -> bool {
        match (&self.region_types, region_type) {
            (None, _) => true,
            (Some(types), Some(region_type)) => types.contains(region_type),
            (Some(_), None) => false,
        }
    }
}
