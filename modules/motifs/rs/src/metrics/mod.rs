//! Column-level similarity and distance metrics used to compare two motifs.
//!
//! Every metric receives two probability columns without exact zeros (the comparator substitutes
//! a pseudo-count beforehand) and scores them. The polarity of the score, i.e. whether lower or
//! higher is better, is a fixed property of each metric and is exposed via [`Metric::is_distance`].

use dyn_clone::DynClone;
use impl_tools::autoimpl;

use crate::matrix::Column;

pub use allr::ALLR;
pub use chi2::ChiSquared;
pub use pearson::Pearson;
pub use ssd::SSD;
pub use wic::WIC;

mod allr;
mod chi2;
mod pearson;
mod ssd;
mod wic;

/// Worst possible score magnitude reported for motifs that can't be aligned.
pub const SENTINEL: f64 = 100_000.0;

#[autoimpl(for <M: trait> Box<M> where Box<M>: Clone)]
pub trait Metric: DynClone + Send + Sync {
    /// Human-readable name of the metric.
    fn name(&self) -> &'static str;

    /// Short name of the metric, e.g. for table headers.
    fn abbreviation(&self) -> &'static str;

    /// Whether lower scores are better.
    fn is_distance(&self) -> bool;

    fn score(&self, a: &Column, b: &Column) -> f64;

    /// Returns true if score `a` is strictly better than score `b`.
    fn better_than(&self, a: f64, b: f64) -> bool {
        if self.is_distance() {
            a < b
        } else {
            a > b
        }
    }
}

dyn_clone::clone_trait_object!(Metric);

/// All built-in metrics.
pub fn all() -> Vec<Box<dyn Metric>> {
    vec![
        Box::new(ALLR),
        Box::new(ChiSquared),
        Box::new(Pearson),
        Box::new(SSD),
        Box::new(WIC),
    ]
}

/// Find a built-in metric by its abbreviation (case-insensitive).
pub fn by_abbreviation(abbreviation: &str) -> Option<Box<dyn Metric>> {
    all()
        .into_iter()
        .find(|m| m.abbreviation().eq_ignore_ascii_case(abbreviation))
}
