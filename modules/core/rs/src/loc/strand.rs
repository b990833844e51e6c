use std::fmt::Display;

#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};

/// Strand of a sequence or a motif match.
///
/// Sequences stored on the reverse strand are read 3'->5' in genomic coordinates, so any position
/// reported "in the sequence's own orientation" must be mirrored first (see [`Strand::orient`]).
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub enum Strand {
    /// Direct strand, 5'->3' as stored.
    #[default]
    Forward,
    /// Reverse strand, reverse-complemented.
    Reverse,
}

impl Strand {
    pub fn symbol(&self) -> char {
        match self {
            Self::Forward => '+',
            Self::Reverse => '-',
        }
    }

    /// Map a 0-based position inside an object of the given size into the strand's frame.
    /// Forward positions are returned as is, reverse positions are mirrored (`size - 1 - pos`).
    pub fn orient(&self, pos: i64, size: i64) -> i64 {
        match self {
            Self::Forward => pos,
            Self::Reverse => size - 1 - pos,
        }
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
