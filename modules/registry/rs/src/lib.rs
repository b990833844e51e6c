pub use registry::Registry;
pub use resource::{resource_key, Icon, Resource, ResourceClass, KEY_SEPARATOR};

mod registry;
mod resource;
