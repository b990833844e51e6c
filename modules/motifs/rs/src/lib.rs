pub use comparator::{Comparator, DEFAULT_MIN_OVERLAP};
pub use comparison::{Comparison, Hit};
pub use matrix::{Column, FrequencyMatrix, DEFAULT_PSEUDOCOUNT, UNIFORM};

mod comparator;
mod comparison;
mod matrix;
pub mod metrics;
