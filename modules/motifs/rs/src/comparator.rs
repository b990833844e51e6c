use eyre::{ensure, Result};
use rayon::prelude::*;

use motiflab_core_rs::loc::{PerStrand, Strand};

use crate::comparison::{Comparison, Hit};
use crate::matrix::{substitute_zeros, Column, FrequencyMatrix, DEFAULT_PSEUDOCOUNT, UNIFORM};
use crate::metrics::Metric;

/// Minimum number of columns that must be shared by two motifs for a placement to be scored.
pub const DEFAULT_MIN_OVERLAP: usize = 3;

/// Ungapped motif-to-motif aligner.
///
/// The shorter motif is slid along the longer one; at each offset the column metric is summed over
/// every position touched by either motif, and positions covered by only one of them are scored
/// against the uniform background. The best offset (according to the metric's polarity) is
/// reported relative to the first motif.
#[derive(Clone)]
pub struct Comparator {
    metric: Box<dyn Metric>,
    pseudocount: f64,
    min_overlap: usize,
}

impl Comparator {
    pub fn new(metric: Box<dyn Metric>) -> Self {
        Self {
            metric,
            pseudocount: DEFAULT_PSEUDOCOUNT,
            min_overlap: DEFAULT_MIN_OVERLAP,
        }
    }

    pub fn with_pseudocount(mut self, pseudocount: f64) -> Result<Self> {
        ensure!(
            pseudocount.is_finite() && pseudocount > 0.0,
            "Pseudo-count must be a positive number, got {pseudocount}"
        );
        self.pseudocount = pseudocount;
        Ok(self)
    }

    pub fn with_min_overlap(mut self, min_overlap: usize) -> Result<Self> {
        ensure!(min_overlap > 0, "Minimum overlap must be at least one column");
        self.min_overlap = min_overlap;
        Ok(self)
    }

    pub fn metric(&self) -> &dyn Metric {
        self.metric.as_ref()
    }

    pub fn name(&self) -> &'static str {
        self.metric.name()
    }

    pub fn abbreviation(&self) -> &'static str {
        self.metric.abbreviation()
    }

    pub fn is_distance(&self) -> bool {
        self.metric.is_distance()
    }

    pub fn pseudocount(&self) -> f64 {
        self.pseudocount
    }

    pub fn min_overlap(&self) -> usize {
        self.min_overlap
    }

    fn prepare(&self, matrix: &FrequencyMatrix) -> Vec<Column> {
        let pseudocount = self.pseudocount;
        matrix
            .columns()
            .iter()
            .map(|column| substitute_zeros(column, pseudocount))
            .collect()
    }

    /// Best placement of `b` against `a` without reverse-complementing `b`.
    pub fn scan(&self, a: &FrequencyMatrix, b: &FrequencyMatrix) -> Comparison {
        self._scan(&self.prepare(a), &self.prepare(b), Strand::Forward)
    }

    /// Best placement of `b` against `a` on either strand. Ties are resolved in favor of the
    /// forward strand.
    pub fn compare(&self, a: &FrequencyMatrix, b: &FrequencyMatrix) -> Comparison {
        let both = self.compare_both_strands(a, b);
        both.forward.best_of(both.reverse, self.metric())
    }

    /// Best placement of `b` and of its reverse complement against `a`.
    pub fn compare_both_strands(
        &self,
        a: &FrequencyMatrix,
        b: &FrequencyMatrix,
    ) -> PerStrand<Comparison> {
        let a = self.prepare(a);
        let forward = self._scan(&a, &self.prepare(b), Strand::Forward);
        let reverse = self._scan(&a, &self.prepare(&b.reverse_complement()), Strand::Reverse);
        PerStrand::new(forward, reverse)
    }

    /// Compare a single motif against a collection, results follow the order of the collection.
    pub fn compare_to_many(
        &self,
        target: &FrequencyMatrix,
        motifs: &[FrequencyMatrix],
    ) -> Vec<Comparison> {
        let result: Vec<_> = motifs
            .par_iter()
            .map(|motif| self.compare(target, motif))
            .collect();
        report_unaligned(result.iter());
        result
    }

    /// All-against-all comparison: `result[i][j] = compare(motifs[i], motifs[j])`.
    pub fn pairwise(&self, motifs: &[FrequencyMatrix]) -> Vec<Vec<Comparison>> {
        let result: Vec<Vec<_>> = motifs
            .par_iter()
            .map(|a| motifs.iter().map(|b| self.compare(a, b)).collect())
            .collect();
        report_unaligned(result.iter().flatten());
        result
    }

    fn _scan(&self, a: &[Column], b: &[Column], strand: Strand) -> Comparison {
        // Slide the shorter matrix along the longer one and remember which of them moved
        let (large, small, b_is_large) = if a.len() >= b.len() {
            (a, b, false)
        } else {
            (b, a, true)
        };
        let (llen, slen) = (large.len() as isize, small.len() as isize);
        let min_overlap = self.min_overlap as isize;
        if slen < min_overlap {
            return Comparison::NoAlignment;
        }

        let mut best: Option<(f64, isize)> = None;
        for offset in (min_overlap - slen)..=(llen - min_overlap) {
            let mut score = 0.0;
            for pos in offset.min(0)..(offset + slen).max(llen) {
                let lcol = if (0..llen).contains(&pos) {
                    &large[pos as usize]
                } else {
                    &UNIFORM
                };
                let spos = pos - offset;
                let scol = if (0..slen).contains(&spos) {
                    &small[spos as usize]
                } else {
                    &UNIFORM
                };
                score += self.metric.score(lcol, scol);
            }

            match best {
                Some((bscore, _)) if !self.metric.better_than(score, bscore) => {}
                _ => best = Some((score, offset)),
            }
        }

        match best {
            Some((score, offset)) => {
                let offset = if b_is_large { -offset } else { offset };
                Hit::new(score, strand, offset).into()
            }
            None => Comparison::NoAlignment,
        }
    }
}

fn report_unaligned<'a>(comparisons: impl Iterator<Item = &'a Comparison>) {
    let (mut total, mut unaligned) = (0, 0);
    for comparison in comparisons {
        total += 1;
        unaligned += usize::from(!comparison.is_aligned());
    }
    if unaligned > 0 {
        log::warn!("{unaligned} of {total} motif pairs were too short to be aligned");
    }
}
