use std::fmt::Display;
use std::rc::Rc;
use std::sync::Arc;

use eyre::{ensure, Result};
use impl_tools::autoimpl;

/// A region (feature) annotated on a sequence.
///
/// Coordinates are 0-based offsets relative to the start of the parent sequence in direct-strand
/// orientation. The end is inclusive, so a single-base region has `start == end`. Regions are
/// allowed to stick out of the parent sequence on either side.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Region {
    start: i64,
    end: i64,
    region_type: Option<String>,
}

/// Trait for types that can be viewed as a region attached to a sequence.
#[autoimpl(for <T: trait + ?Sized> &T, Box<T>, Rc<T>, Arc<T>)]
#[allow(clippy::len_without_is_empty)]
pub trait AsRegion {
    /// Relative start of the region (inclusive).
    fn start(&self) -> i64;

    /// Relative end of the region (inclusive).
    fn end(&self) -> i64;

    /// Type tag of the region, e.g. a motif or a repeat family name.
    fn region_type(&self) -> Option<&str>;

    /// Number of bases covered by the region.
    fn len(&self) -> i64 {
        self.end() - self.start() + 1
    }
}

impl Region {
    pub fn new(start: i64, end: i64) -> Result<Self> {
        ensure!(
            start <= end,
            "Invalid region: start ({start}) is greater than end ({end})"
        );
        Ok(Self {
            start,
            end,
            region_type: None,
        })
    }

    pub fn with_type(mut self, region_type: impl Into<String>) -> Self {
        self.region_type = Some(region_type.into());
        self
    }
}

impl AsRegion for Region {
    #[inline(always)]
    fn start(&self) -> i64 {
        self.start
    }

    #[inline(always)]
    fn end(&self) -> i64 {
        self.end
    }

    fn region_type(&self) -> Option<&str> {
        self.region_type.as_deref()
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.region_type {
            Some(tag) => write!(f, "{}[{}..={}]", tag, self.start, self.end),
            None => write!(f, "[{}..={}]", self.start, self.end),
        }
    }
}
