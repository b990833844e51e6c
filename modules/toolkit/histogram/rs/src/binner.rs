use std::iter::zip;

use derive_more::Constructor;
use eyre::{ensure, Result};
use rayon::prelude::*;
use rayon::ThreadPool;

use motiflab_core_rs::loc::{AsRegion, AsSequence};
use motiflab_core_rs::num::{count, Float};

use crate::builder::BinnerBuilder;
use crate::config::{Anchor, Config, Filter};
use crate::result::Summary;
use crate::span::{Frame, SpanError};
use crate::visibility::Visibility;

/// Aggregates region positions over many sequences into a normalized histogram.
///
/// Sequences are stacked in a shared coordinate system (see [`Alignment`](crate::Alignment)) that
/// is divided into equally sized bins. Each counted region adds one to the bin(s) holding its
/// anchor and the final counts are divided by the number of regions, or by the number of
/// contributing sequences when the histogram is flattened.
#[derive(Constructor)]
pub struct Binner {
    config: Config,
    visibility: Box<dyn Visibility>,
    thread_pool: Option<ThreadPool>,
}

impl Binner {
    pub fn builder(config: Config) -> BinnerBuilder {
        BinnerBuilder::new(config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fill `bins` with the normalized histogram of the filtered regions.
    ///
    /// Bins are overwritten on success. If the alignment span can't be computed (e.g. a sequence
    /// lacks the TSS/TES annotation), a [`SpanError`] is returned and `bins` are left untouched.
    pub fn count_regions<S, Cnts>(
        &self,
        sequences: &[S],
        bins: &mut [Cnts],
        filter: &Filter,
    ) -> Result<Summary>
    where
        S: AsSequence + Sync,
        Cnts: Float,
    {
        ensure!(!bins.is_empty(), "Histogram must have at least one bin");
        match &self.thread_pool {
            Some(pool) => pool.install(|| self._count_regions(sequences, bins, filter)),
            None => self._count_regions(sequences, bins, filter),
        }
    }

    fn _count_regions<S, Cnts>(
        &self,
        sequences: &[S],
        bins: &mut [Cnts],
        filter: &Filter,
    ) -> Result<Summary>
    where
        S: AsSequence + Sync,
        Cnts: Float,
    {
        let eligible: Vec<&S> = sequences
            .iter()
            .filter(|seq| self.is_eligible(*seq, filter))
            .collect();
        let frame = Frame::new(*self.config.alignment(), &eligible)?;

        bins.fill(count(0));
        if frame.span() <= 0 {
            log::warn!(
                "None of {} sequences passed the filters, the histogram is empty",
                sequences.len()
            );
            return Ok(Summary::default());
        }

        let layout = Layout::new(frame.span(), bins.len());
        let tally = eligible
            .par_iter()
            .try_fold(
                || Tally::new(layout.bins),
                |mut tally, seq| {
                    self.count_sequence(*seq, &frame, &layout, filter, &mut tally)?;
                    Ok::<_, SpanError>(tally)
                },
            )
            .try_reduce(|| Tally::new(layout.bins), |a, b| Ok(a.merge(b)))?;

        let summary = Summary::new(frame.span(), layout.width, tally.regions, tally.sequences);
        let total = summary.normalizer(*self.config.flatten());
        if total == 0 {
            log::warn!("No regions passed the filters, all bins are set to zero");
            return Ok(summary);
        }

        let total = count::<Cnts>(total);
        for (bin, cnt) in zip(bins.iter_mut(), tally.counts) {
            *bin = count::<Cnts>(cnt) / total;
        }

        log::debug!(
            "Binned {} regions from {} sequences (span: {}, bin width: {:.3})",
            summary.regions(),
            summary.sequences(),
            summary.span(),
            summary.bin_width()
        );
        Ok(summary)
    }

    fn is_eligible<S: AsSequence>(&self, seq: &S, filter: &Filter) -> bool {
        filter.accepts_sequence(seq.name())
            && (!filter.is_only_visible() || self.visibility.is_sequence_visible(seq.name()))
    }

    fn is_counted<R: AsRegion>(&self, region: &R, filter: &Filter) -> bool {
        let region_type = region.region_type();
        filter.accepts_region_type(region_type)
            && (!filter.is_only_visible() || self.visibility.is_region_type_visible(region_type))
    }

    fn count_sequence<S: AsSequence>(
        &self,
        seq: &S,
        frame: &Frame,
        layout: &Layout,
        filter: &Filter,
        tally: &mut Tally,
    ) -> Result<(), SpanError> {
        let offset = frame.offset(seq)?;
        let flatten = *self.config.flatten();

        let mut regions = 0;
        for region in seq.regions() {
            if !self.is_counted(region, filter) {
                continue;
            }
            regions += 1;

            let (start, end) = seq.oriented_region(region);
            let (first, last) = match self.config.anchor() {
                Anchor::Upstream => (start, start),
                Anchor::Downstream => (end, end),
                Anchor::Center => {
                    let mid = (start + end).div_euclid(2);
                    (mid, mid)
                }
                Anchor::Span => (start, end),
            };

            for bin in layout.bin(first + offset)..=layout.bin(last + offset) {
                match flatten {
                    true => tally.touched[bin] = true,
                    false => tally.counts[bin] += 1,
                }
            }
        }

        if regions > 0 {
            tally.regions += regions;
            tally.sequences += 1;
        }
        if flatten {
            for (cnt, touched) in zip(&mut tally.counts, &mut tally.touched) {
                if *touched {
                    *cnt += 1;
                    *touched = false;
                }
            }
        }
        Ok(())
    }
}

// Equal-width partition of the alignment span
struct Layout {
    width: f64,
    bins: usize,
}

impl Layout {
    fn new(span: i64, bins: usize) -> Self {
        Self {
            width: span as f64 / bins as f64,
            bins,
        }
    }

    // Positions outside of the span are clipped to the edge bins
    fn bin(&self, pos: i64) -> usize {
        let bin = (pos as f64 / self.width).floor();
        bin.clamp(0.0, (self.bins - 1) as f64) as usize
    }
}

// Raw counts accumulated by a single rayon job
struct Tally {
    counts: Vec<usize>,
    // Bins marked by the current sequence when flattening
    touched: Vec<bool>,
    regions: usize,
    sequences: usize,
}

impl Tally {
    fn new(bins: usize) -> Self {
        Self {
            counts: vec![0; bins],
            touched: vec![false; bins],
            regions: 0,
            sequences: 0,
        }
    }

    fn merge(mut self, other: Self) -> Self {
        for (cnt, other) in zip(&mut self.counts, other.counts) {
            *cnt += other;
        }
        self.regions += other.regions;
        self.sequences += other.sequences;
        self
    }
}
