pub use binner::Binner;
pub use builder::BinnerBuilder;
pub use config::{Alignment, Anchor, Config, Filter};
pub use result::Summary;
pub use span::SpanError;
pub use visibility::{AllVisible, Hidden, Visibility};

mod binner;
mod builder;
mod config;
mod result;
mod span;
mod visibility;
