pub use per_strand::PerStrand;
pub use region::{AsRegion, Region};
pub use sequence::{AsSequence, Sequence};
pub use strand::Strand;

mod per_strand;
mod region;
mod sequence;
mod strand;
