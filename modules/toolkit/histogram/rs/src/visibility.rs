use std::sync::Arc;

use ahash::AHashSet;
use impl_tools::autoimpl;

/// Display state of sequences and region types, owned by the presentation layer.
///
/// Only consulted when the [`Filter`](crate::Filter) asks for visible items.
#[autoimpl(for <T: trait + ?Sized> &T, Box<T>, Arc<T>)]
pub trait Visibility: Send + Sync {
    fn is_sequence_visible(&self, name: &str) -> bool;

    fn is_region_type_visible(&self, region_type: Option<&str>) -> bool;
}

/// Everything is visible.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct AllVisible;

impl Visibility for AllVisible {
    fn is_sequence_visible(&self, _: &str) -> bool {
        true
    }

    fn is_region_type_visible(&self, _: Option<&str>) -> bool {
        true
    }
}

/// Explicit sets of hidden sequences and region types.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Hidden {
    sequences: AHashSet<String>,
    region_types: AHashSet<String>,
}

impl Hidden {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hide_sequence(mut self, name: impl Into<String>) -> Self {
        self.sequences.insert(name.into());
        self
    }

    pub fn hide_region_type(mut self, region_type: impl Into<String>) -> Self {
        self.region_types.insert(region_type.into());
        self
    }
}

impl Visibility for Hidden {
    fn is_sequence_visible(&self, name: &str) -> bool {
        !self.sequences.contains(name)
    }

    // Untyped regions can't be hidden by type
    fn is_region_type_visible(&self, region_type: Option<&str>) -> bool {
        region_type.is_none_or(|x| !self.region_types.contains(x))
    }
}
