use crate::host::ExtensionHost;
use crate::registry::error::RegistryError;
use crate::registry::key::ExtensionKey;
use crate::registry::registry::Cardinality;

#[test]
fn add_and_access_typed_slots() {
    let mut host = ExtensionHost::new();
    host.add_slot::<String>("webmap.panel", Cardinality::Multi).unwrap();
    host.add_slot::<u32>("resource.count", Cardinality::Single).unwrap();

    host.slot_mut::<String>("webmap.panel")
        .unwrap()
        .register_value(ExtensionKey::new("webmap", "layers"), "layers".into())
        .unwrap();

    let panels = host.slot::<String>("webmap.panel").unwrap();
    assert_eq!(panels.len(), 1);

    assert_eq!(host.slot_names(), vec!["resource.count", "webmap.panel"]);
}

#[test]
fn duplicate_slot_is_rejected() {
    let mut host = ExtensionHost::new();
    host.add_slot::<String>("webmap.panel", Cardinality::Multi).unwrap();

    let err = host
        .add_slot::<String>("webmap.panel", Cardinality::Multi)
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateSlot { .. }));
}

#[test]
fn unknown_slot_is_none() {
    let host = ExtensionHost::new();
    assert!(host.slot::<String>("absent").is_none());
    assert!(!host.has_slot("absent"));
}

#[test]
fn wrong_entry_type_is_none() {
    let mut host = ExtensionHost::new();
    host.add_slot::<String>("webmap.panel", Cardinality::Multi).unwrap();
    assert!(host.slot::<u32>("webmap.panel").is_none());
}

#[test]
fn overview_counts_entries() {
    let mut host = ExtensionHost::new();
    let panels = host
        .add_slot::<String>("webmap.panel", Cardinality::Multi)
        .unwrap();
    panels
        .register_value(ExtensionKey::new("webmap", "layers"), "layers".into())
        .unwrap();
    panels
        .register_value(ExtensionKey::new("webmap", "search"), "search".into())
        .unwrap();
    host.add_slot::<u32>("resource.count", Cardinality::Single).unwrap();

    let overview = host.overview();
    assert_eq!(overview.len(), 2);
    assert_eq!(overview[0].name, "resource.count");
    assert_eq!(overview[0].entries, 0);
    assert_eq!(overview[1].name, "webmap.panel");
    assert_eq!(overview[1].entries, 2);
    assert_eq!(overview[1].cardinality, Cardinality::Multi);
}

#[test]
fn fresh_host_is_not_ready() {
    let host = ExtensionHost::new();
    assert!(!host.is_ready());
}
