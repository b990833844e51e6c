use std::sync::Arc;

use eyre::Result;

use motiflab_motifs_rs::metrics::{self, Metric};
use motiflab_motifs_rs::{Comparator, FrequencyMatrix};
use motiflab_registry_rs::{Icon, Registry, Resource, ResourceClass};

const COMPARATOR: &str = "MotifComparator";
const COLLECTION: &str = "MotifCollection";

fn application_registry() -> Result<Registry> {
    let mut registry = Registry::new();
    for metric in metrics::all() {
        let name = metric.abbreviation();
        let resource = Resource::new(name, metric)
            .with_type_name(COMPARATOR)
            .with_icon(Icon::new(format!("icons/{name}.png")));
        assert!(!registry.register(resource));
    }

    let collection = vec![
        FrequencyMatrix::new(vec![[0.7, 0.1, 0.1, 0.1]; 4])?,
        FrequencyMatrix::from_counts(vec![[1.0, 2.0, 3.0, 4.0]; 5])?,
    ];
    registry.register(Resource::new("JASPAR", collection).with_type_name(COLLECTION));
    Ok(registry)
}

#[test]
fn plugins_are_discoverable_by_interface() -> Result<()> {
    let registry = application_registry()?;
    assert_eq!(registry.count(), 6);

    let mut names = registry.names_by_class::<Box<dyn Metric>>();
    names.sort();
    assert_eq!(names, ["ALLR", "Chi2", "PCC", "SSD", "WIC"]);

    let mut names = registry.names_by_type_name(Some(COMPARATOR));
    names.sort();
    assert_eq!(names, ["ALLR", "Chi2", "PCC", "SSD", "WIC"]);
    assert_eq!(registry.names_by_type_name(Some(COLLECTION)), ["JASPAR"]);
    Ok(())
}

#[test]
fn registered_plugins_are_usable() -> Result<()> {
    let registry = application_registry()?;

    let metric = registry
        .instance_as::<Box<dyn Metric>>("SSD", Some(COMPARATOR))
        .expect("SSD comparator must be registered");
    let motifs = registry
        .instance_as::<Vec<FrequencyMatrix>>("JASPAR", Some(COLLECTION))
        .expect("JASPAR collection must be registered");

    let comparator = Comparator::new((*metric).clone());
    let result = comparator.compare(&motifs[0], &motifs[0]);
    assert_eq!(*result.hit().unwrap().score(), 0.0);

    assert_eq!(
        registry.class("SSD", Some(COMPARATOR)),
        Some(ResourceClass::of::<Box<dyn Metric>>())
    );
    assert_eq!(
        registry.icon("WIC", Some(COMPARATOR)).unwrap().path().to_str(),
        Some("icons/WIC.png")
    );
    // Namespaced resources are invisible under the bare name
    assert!(registry.get("SSD", None).is_none());
    Ok(())
}

#[test]
fn same_name_different_namespaces() {
    let mut registry = Registry::new();
    assert!(!registry.register(Resource::new("A", 1u8)));
    assert!(!registry.register(Resource::new("A", 2u8).with_type_name("Q")));
    assert_eq!(registry.count(), 2);

    assert_eq!(registry.names_by_type_name(Some("Q")), ["A"]);
    assert!(registry.names_by_type_name(None).is_empty());

    assert_eq!(registry.instance_as::<u8>("A", None).as_deref(), Some(&1));
    assert_eq!(registry.instance_as::<u8>("A", Some("Q")).as_deref(), Some(&2));

    // Replacing keeps the count, deregistering an unknown key changes nothing
    assert!(registry.register(Resource::new("A", 3u8).with_type_name("Q")));
    assert_eq!(registry.count(), 2);
    assert!(registry.deregister("B", Some("Q")).is_none());
    assert_eq!(registry.count(), 2);
}

#[test]
fn deregister_shared_instance() {
    let mut registry = Registry::new();
    let comparator: Arc<Box<dyn Metric>> = Arc::new(Box::new(metrics::SSD));
    registry.register(Resource::from_arc("SSD", comparator.clone()).with_type_name(COMPARATOR));

    let removed = registry.deregister_instance(&comparator);
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].key(), "MotifComparator|SSD");
    assert!(registry.is_empty());
}

#[test]
fn concrete_plugins_are_found_by_interface() {
    let mut registry = Registry::new();
    registry.register(
        Resource::new("SSD", metrics::SSD)
            .with_type_name(COMPARATOR)
            .implements::<dyn Metric>(),
    );
    registry.register(Resource::new("WIC", metrics::WIC).with_type_name(COMPARATOR));

    assert_eq!(registry.names_by_class::<dyn Metric>(), ["SSD"]);
    assert_eq!(registry.names_by_class::<metrics::SSD>(), ["SSD"]);
    assert_eq!(registry.names_by_class::<metrics::WIC>(), ["WIC"]);
    assert_eq!(
        registry.class("SSD", Some(COMPARATOR)),
        Some(ResourceClass::of::<metrics::SSD>())
    );

    // The concrete instance stays usable through its own type
    let ssd = registry
        .instance_as::<metrics::SSD>("SSD", Some(COMPARATOR))
        .expect("SSD must be registered");
    let comparator = Comparator::new(Box::new(*ssd));
    assert!(comparator.is_distance());
}
