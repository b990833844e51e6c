use std::fmt::Display;
use std::rc::Rc;
use std::sync::Arc;

use eyre::{ensure, Result};
use impl_tools::autoimpl;

use super::region::{AsRegion, Region};
use super::strand::Strand;

/// A genomic sequence (e.g. a promoter window) with its annotated regions.
///
/// `start` is the 0-based genomic coordinate of the first base in direct-strand orientation.
/// TSS and TES are absolute genomic coordinates and may lie outside the sequence.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Sequence {
    name: String,
    start: i64,
    size: i64,
    strand: Strand,
    tss: Option<i64>,
    tes: Option<i64>,
    regions: Vec<Region>,
}

/// Trait for types that can be viewed as a region-bearing genomic sequence.
#[autoimpl(for <T: trait + ?Sized> &T, Box<T>, Rc<T>, Arc<T>)]
pub trait AsSequence {
    type Region: AsRegion;

    fn name(&self) -> &str;

    /// Genomic coordinate of the first base (direct strand).
    fn start(&self) -> i64;

    /// Number of bases in the sequence, always positive.
    fn size(&self) -> i64;

    fn strand(&self) -> Strand;

    /// Transcription start site, absolute genomic coordinate.
    fn tss(&self) -> Option<i64>;

    /// Transcription end site, absolute genomic coordinate.
    fn tes(&self) -> Option<i64>;

    fn regions(&self) -> &[Self::Region];

    /// Translate an absolute genomic coordinate into a 0-based position in the sequence's own
    /// (strand-aware) frame, where 0 is always the upstream end.
    fn oriented(&self, genomic: i64) -> i64 {
        self.strand().orient(genomic - self.start(), self.size())
    }

    /// Region boundaries in the sequence's own frame as an ordered (upstream, downstream) pair.
    fn oriented_region(&self, region: &Self::Region) -> (i64, i64) {
        let (start, end) = (region.start(), region.end());
        match self.strand() {
            Strand::Forward => (start, end),
            Strand::Reverse => (
                self.strand().orient(end, self.size()),
                self.strand().orient(start, self.size()),
            ),
        }
    }
}

impl Sequence {
    pub fn new(name: impl Into<String>, start: i64, size: i64, strand: Strand) -> Result<Self> {
        let name = name.into();
        ensure!(!name.is_empty(), "Sequence name must not be an empty string");
        ensure!(size > 0, "Sequence '{name}' must have a positive size, got {size}");
        Ok(Self {
            name,
            start,
            size,
            strand,
            tss: None,
            tes: None,
            regions: Vec::new(),
        })
    }

    pub fn with_tss(mut self, tss: i64) -> Self {
        self.tss = Some(tss);
        self
    }

    pub fn with_tes(mut self, tes: i64) -> Self {
        self.tes = Some(tes);
        self
    }

    pub fn with_regions(mut self, regions: impl IntoIterator<Item = Region>) -> Self {
        self.regions.extend(regions);
        self
    }

    pub fn push_region(&mut self, region: Region) -> &mut Self {
        self.regions.push(region);
        self
    }

    /// Genomic coordinate of the last base (direct strand, inclusive).
    pub fn end(&self) -> i64 {
        self.start + self.size - 1
    }
}

impl AsSequence for Sequence {
    type Region = Region;

    fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    fn start(&self) -> i64 {
        self.start
    }

    #[inline(always)]
    fn size(&self) -> i64 {
        self.size
    }

    #[inline(always)]
    fn strand(&self) -> Strand {
        self.strand
    }

    fn tss(&self) -> Option<i64> {
        self.tss
    }

    fn tes(&self) -> Option<i64> {
        self.tes
    }

    fn regions(&self) -> &[Region] {
        &self.regions
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}-{}[{}]",
            self.name,
            self.start,
            self.end(),
            self.strand
        )
    }
}
