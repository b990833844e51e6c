use std::any::{type_name, Any, TypeId};
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use derive_more::{From, Into};

/// Separator between the type-name and the name in a composite registry key.
pub const KEY_SEPARATOR: char = '|';

/// Composite key of a resource: `type_name|name`, or the bare name when there is no type-name.
pub fn resource_key(name: &str, type_name: Option<&str>) -> String {
    match type_name {
        Some(type_name) if !type_name.is_empty() => format!("{type_name}{KEY_SEPARATOR}{name}"),
        _ => name.to_string(),
    }
}

/// Runtime identity of a resource instance type.
#[derive(Clone, Copy)]
pub struct ResourceClass {
    id: TypeId,
    name: &'static str,
}

impl ResourceClass {
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified Rust type name, for diagnostics only.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ResourceClass {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ResourceClass {}

impl Hash for ResourceClass {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Debug for ResourceClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceClass({})", self.name)
    }
}

impl Display for ResourceClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Location of an image shown next to the resource by a presentation layer.
#[derive(Clone, PartialEq, Eq, Hash, Debug, From, Into)]
pub struct Icon(PathBuf);

impl Icon {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// A named object registered at runtime, optionally namespaced by a type-name.
#[derive(Clone)]
pub struct Resource {
    name: String,
    type_name: Option<String>,
    instance: Arc<dyn Any + Send + Sync>,
    class: ResourceClass,
    // Additional classes the instance can be looked up by, e.g. `dyn Metric`
    interfaces: Vec<ResourceClass>,
    icon: Option<Icon>,
}

impl Resource {
    pub fn new<T: Any + Send + Sync>(name: impl Into<String>, instance: T) -> Self {
        Self::from_arc(name, Arc::new(instance))
    }

    /// Wrap an already shared instance. The registry keeps a handle to the same allocation,
    /// which makes it possible to deregister the resource by instance later on.
    pub fn from_arc<T: Any + Send + Sync>(name: impl Into<String>, instance: Arc<T>) -> Self {
        Self {
            name: name.into(),
            type_name: None,
            instance,
            class: ResourceClass::of::<T>(),
            interfaces: Vec::new(),
            icon: None,
        }
    }

    /// Namespace the resource. An empty type-name is the same as no type-name.
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        self.type_name = (!type_name.is_empty()).then_some(type_name);
        self
    }

    /// Declare that the instance also satisfies `I` (a trait object or any other class), so that
    /// class-based lookups for `I` find this resource.
    pub fn implements<I: Any + ?Sized>(mut self) -> Self {
        let class = ResourceClass::of::<I>();
        if !self.is_a(class) {
            self.interfaces.push(class);
        }
        self
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn instance(&self) -> &Arc<dyn Any + Send + Sync> {
        &self.instance
    }

    pub fn class(&self) -> ResourceClass {
        self.class
    }

    pub fn interfaces(&self) -> &[ResourceClass] {
        &self.interfaces
    }

    /// Whether the resource is assignable to the class: its own class or a declared interface.
    pub fn is_a(&self, class: ResourceClass) -> bool {
        self.class == class || self.interfaces.contains(&class)
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    pub fn key(&self) -> String {
        resource_key(&self.name, self.type_name())
    }

    /// Whether the instance is of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.instance.is::<T>()
    }

    /// Typed handle to the instance, `None` if it is not a `T`.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.instance.clone().downcast::<T>().ok()
    }

    pub(crate) fn same_instance<T: ?Sized>(&self, instance: &Arc<T>) -> bool {
        Arc::as_ptr(&self.instance) as *const () == Arc::as_ptr(instance) as *const ()
    }
}

impl Debug for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("class", &self.class)
            .field("interfaces", &self.interfaces)
            .field("icon", &self.icon)
            .finish_non_exhaustive()
    }
}
