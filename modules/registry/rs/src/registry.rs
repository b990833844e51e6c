use std::any::Any;
use std::sync::Arc;

use ahash::AHashMap;
use itertools::Itertools;

use crate::resource::{resource_key, Icon, Resource, ResourceClass};

/// Namespaced registry of runtime resources (comparators, motif collections, exporters, ...).
///
/// Each entry is stored under the composite key `type_name|name` (or the bare name when the
/// type-name is absent), so equally named resources of different kinds coexist. Registering
/// under an existing key replaces the previous entry.
///
/// The registry is a plain value owned by the application context. It is not synchronized;
/// wrap it in a `Mutex`/`RwLock` to share it between threads.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    // Allocated on the first registration and released when the last entry is removed
    resources: Option<AHashMap<String, Resource>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource. Returns `true` if it replaced an entry with the same key.
    pub fn register(&mut self, resource: Resource) -> bool {
        let key = resource.key();
        let replaced = self
            .resources
            .get_or_insert_with(AHashMap::new)
            .insert(key, resource);

        if let Some(previous) = &replaced {
            log::debug!(
                "Replaced resource '{}' ({} -> new instance)",
                previous.key(),
                previous.class()
            );
        }
        replaced.is_some()
    }

    /// Remove the resource registered under the given name and type-name.
    pub fn deregister(&mut self, name: &str, type_name: Option<&str>) -> Option<Resource> {
        let key = resource_key(name, type_name);
        let removed = self.resources.as_mut()?.remove(&key);
        self.release_if_empty();
        removed
    }

    /// Remove every resource that holds exactly this instance (pointer identity). The same instance
    /// may be registered under several keys; removed entries are returned in key order.
    pub fn deregister_instance<T: ?Sized>(&mut self, instance: &Arc<T>) -> Vec<Resource> {
        let Some(resources) = self.resources.as_mut() else {
            return Vec::new();
        };
        let keys = resources
            .iter()
            .filter(|(_, resource)| resource.same_instance(instance))
            .map(|(key, _)| key.clone())
            .sorted()
            .collect_vec();
        let removed = keys
            .iter()
            .filter_map(|key| resources.remove(key))
            .collect_vec();
        self.release_if_empty();
        removed
    }

    pub fn get(&self, name: &str, type_name: Option<&str>) -> Option<&Resource> {
        self.resources
            .as_ref()?
            .get(&resource_key(name, type_name))
    }

    pub fn class(&self, name: &str, type_name: Option<&str>) -> Option<ResourceClass> {
        self.get(name, type_name).map(Resource::class)
    }

    pub fn icon(&self, name: &str, type_name: Option<&str>) -> Option<&Icon> {
        self.get(name, type_name)?.icon()
    }

    pub fn instance(
        &self,
        name: &str,
        type_name: Option<&str>,
    ) -> Option<&Arc<dyn Any + Send + Sync>> {
        self.get(name, type_name).map(Resource::instance)
    }

    /// Typed instance lookup, `None` when absent or of a different type.
    pub fn instance_as<T: Any + Send + Sync>(
        &self,
        name: &str,
        type_name: Option<&str>,
    ) -> Option<Arc<T>> {
        self.get(name, type_name)?.downcast::<T>()
    }

    pub fn contains(&self, name: &str, type_name: Option<&str>) -> bool {
        self.get(name, type_name).is_some()
    }

    /// All registered resources in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter().flat_map(|resources| resources.values())
    }

    /// Resources assignable to `T`: the instance is a `T`, or the resource declared `T` through
    /// [`Resource::implements`], e.g. `Resource::new("SSD", SSD).implements::<dyn Metric>()`.
    /// Registered trait objects such as `Box<dyn Metric>` are found by their own class too.
    pub fn resources_by_class<T: Any + ?Sized>(&self) -> Vec<&Resource> {
        self.resources_of_class(ResourceClass::of::<T>())
    }

    pub fn resources_of_class(&self, class: ResourceClass) -> Vec<&Resource> {
        self.iter().filter(|x| x.is_a(class)).collect()
    }

    /// Resources registered with exactly this type-name. `None` matches nothing.
    pub fn resources_by_type_name(&self, type_name: Option<&str>) -> Vec<&Resource> {
        match type_name {
            Some(type_name) => self
                .iter()
                .filter(|x| x.type_name() == Some(type_name))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn names_by_class<T: Any + ?Sized>(&self) -> Vec<&str> {
        self.resources_by_class::<T>()
            .into_iter()
            .map(Resource::name)
            .collect_vec()
    }

    pub fn names_by_type_name(&self, type_name: Option<&str>) -> Vec<&str> {
        self.resources_by_type_name(type_name)
            .into_iter()
            .map(Resource::name)
            .collect_vec()
    }

    pub fn count(&self) -> usize {
        self.resources.as_ref().map_or(0, |x| x.len())
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn clear(&mut self) {
        self.resources = None;
    }

    fn release_if_empty(&mut self) {
        if self.resources.as_ref().is_some_and(|x| x.is_empty()) {
            self.resources = None;
        }
    }
}
