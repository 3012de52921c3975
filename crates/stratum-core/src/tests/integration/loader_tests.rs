use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::fs;

use crate::loader::error::LoaderError;
use crate::loader::source::{JsonModuleSource, ModuleSource};
use crate::registry::entry::ExtensionEntry;
use crate::registry::key::ExtensionKey;
use crate::registry::registry::{Cardinality, ExtensionRegistry};
use crate::slots::EditorWidget;

fn deferred_widget_entry(
    source: Arc<JsonModuleSource>,
    module: &'static str,
    resolutions: Arc<AtomicUsize>,
) -> ExtensionEntry<EditorWidget> {
    ExtensionEntry::deferred(ExtensionKey::new("webmap", "display"), move || {
        let source = source.clone();
        let resolutions = resolutions.clone();
        async move {
            resolutions.fetch_add(1, Ordering::SeqCst);
            source.resolve(module).await
        }
    })
}

#[tokio::test]
async fn deferred_payload_resolves_from_disk_once() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("display.json"),
        r#"{ "caption": "Display", "module": "webmap/display" }"#,
    )
    .await
    .unwrap();

    let source = Arc::new(JsonModuleSource::new(dir.path()));
    let resolutions = Arc::new(AtomicUsize::new(0));

    let mut registry = ExtensionRegistry::new("resource.editor-widget", Cardinality::Single);
    registry
        .register(deferred_widget_entry(source, "display", resolutions.clone()))
        .unwrap();

    let first = registry.load(|_| true).await.unwrap().unwrap();
    let second = registry.load(|_| true).await.unwrap().unwrap();

    assert_eq!(first.caption, "Display");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(resolutions.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn invalidate_forces_a_fresh_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("display.json");
    fs::write(&path, r#"{ "caption": "Old", "module": "webmap/display" }"#)
        .await
        .unwrap();

    let source = Arc::new(JsonModuleSource::new(dir.path()));
    let resolutions = Arc::new(AtomicUsize::new(0));

    let mut registry = ExtensionRegistry::new("resource.editor-widget", Cardinality::Single);
    registry
        .register(deferred_widget_entry(source, "display", resolutions.clone()))
        .unwrap();

    let before = registry.load(|_| true).await.unwrap().unwrap();
    assert_eq!(before.caption, "Old");

    fs::write(&path, r#"{ "caption": "New", "module": "webmap/display" }"#)
        .await
        .unwrap();
    assert!(registry.invalidate(&ExtensionKey::new("webmap", "display")));

    let after = registry.load(|_| true).await.unwrap().unwrap();
    assert_eq!(after.caption, "New");
    assert_eq!(resolutions.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn failed_resolution_is_not_memoized() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("display.json");

    let source = Arc::new(JsonModuleSource::new(dir.path()));
    let resolutions = Arc::new(AtomicUsize::new(0));

    let mut registry = ExtensionRegistry::new("resource.editor-widget", Cardinality::Single);
    registry
        .register(deferred_widget_entry(source, "display", resolutions.clone()))
        .unwrap();

    // Nothing on disk yet: the load fails and must not poison the cache.
    let err = registry.load(|_| true).await.unwrap_err();
    assert!(matches!(
        err,
        crate::registry::error::RegistryError::Loader(LoaderError::NotFound { .. })
    ));

    fs::write(&path, r#"{ "caption": "Display", "module": "webmap/display" }"#)
        .await
        .unwrap();

    let value = registry.load(|_| true).await.unwrap().unwrap();
    assert_eq!(value.caption, "Display");
    assert_eq!(resolutions.load(Ordering::SeqCst), 2);
}
