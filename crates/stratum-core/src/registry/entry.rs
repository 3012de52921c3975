use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

use crate::loader::error::LoaderError;
use crate::registry::context::FactoryContext;
use crate::registry::key::ExtensionKey;

/// Deferred payload loader: invoked at most once per cache generation when
/// the entry is first resolved.
pub type DeferredLoader<V> =
    Arc<dyn Fn() -> BoxFuture<'static, Result<Arc<V>, LoaderError>> + Send + Sync>;

/// Synchronous per-query factory.
pub type EntryFactory<V> = Arc<dyn Fn(&FactoryContext) -> Outcome<V> + Send + Sync>;

/// Result of a factory payload call.
///
/// `Skip` means "not applicable here, try the next matching entry". It is
/// the typed replacement for the falsy-sentinel convention.
pub enum Outcome<V> {
    Produced(V),
    Skip,
}

impl<V> Outcome<V> {
    pub fn is_skip(&self) -> bool {
        matches!(self, Outcome::Skip)
    }

    pub fn produced(self) -> Option<V> {
        match self {
            Outcome::Produced(v) => Some(v),
            Outcome::Skip => None,
        }
    }
}

/// How an entry's value is obtained at use time.
pub enum Payload<V> {
    /// Eagerly supplied value, shared as-is.
    Value(Arc<V>),
    /// Lazily loaded value; resolved through the registry's loader cache.
    Deferred(DeferredLoader<V>),
    /// Evaluated per query with call-time arguments; may decline via
    /// [`Outcome::Skip`].
    Factory(EntryFactory<V>),
}

// Manual Clone: the payload is cloneable regardless of whether V is.
impl<V> Clone for Payload<V> {
    fn clone(&self) -> Self {
        match self {
            Payload::Value(v) => Payload::Value(v.clone()),
            Payload::Deferred(f) => Payload::Deferred(f.clone()),
            Payload::Factory(f) => Payload::Factory(f.clone()),
        }
    }
}

// Manual Debug: closures have nothing useful to show.
impl<V> fmt::Debug for Payload<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Value(_) => f.write_str("Payload::Value"),
            Payload::Deferred(_) => f.write_str("Payload::Deferred"),
            Payload::Factory(_) => f.write_str("Payload::Factory"),
        }
    }
}

/// One registered contribution: key, payload and query metadata.
pub struct ExtensionEntry<V> {
    key: ExtensionKey,
    payload: Payload<V>,
    order: i64,
    label: Option<String>,
    attributes: Vec<String>,
    // Registration sequence within the owning registry; breaks order ties.
    pub(crate) seq: u64,
}

impl<V> ExtensionEntry<V> {
    /// Entry around an already-resolved value.
    pub fn value(key: ExtensionKey, value: V) -> Self {
        Self::with_payload(key, Payload::Value(Arc::new(value)))
    }

    /// Entry whose payload loads lazily on first use.
    pub fn deferred<F, Fut>(key: ExtensionKey, loader: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<V>, LoaderError>> + Send + 'static,
    {
        Self::with_payload(
            key,
            Payload::Deferred(Arc::new(move || loader().boxed())),
        )
    }

    /// Entry whose payload is produced per query by a factory.
    pub fn factory<F>(key: ExtensionKey, factory: F) -> Self
    where
        F: Fn(&FactoryContext) -> Outcome<V> + Send + Sync + 'static,
    {
        Self::with_payload(key, Payload::Factory(Arc::new(factory)))
    }

    fn with_payload(key: ExtensionKey, payload: Payload<V>) -> Self {
        Self {
            key,
            payload,
            order: 0,
            label: None,
            attributes: Vec::new(),
            seq: 0,
        }
    }

    /// Set the numeric sort key (ascending; ties broken by registration order).
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    /// Set the human-readable label.
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// Add a declarative attribute (e.g. `permission:resource.delete`).
    /// Attributes are opaque to the registry and evaluated by consumers.
    pub fn with_attribute(mut self, attribute: &str) -> Self {
        self.attributes.push(attribute.to_string());
        self
    }

    pub fn key(&self) -> &ExtensionKey {
        &self.key
    }

    pub fn payload(&self) -> &Payload<V> {
        &self.payload
    }

    pub fn order(&self) -> i64 {
        self.order
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.attributes.iter().any(|a| a == attribute)
    }
}

impl<V> Clone for ExtensionEntry<V> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            payload: self.payload.clone(),
            order: self.order,
            label: self.label.clone(),
            attributes: self.attributes.clone(),
            seq: self.seq,
        }
    }
}

impl<V> fmt::Debug for ExtensionEntry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionEntry")
            .field("key", &self.key)
            .field("payload", &self.payload)
            .field("order", &self.order)
            .field("label", &self.label)
            .field("attributes", &self.attributes)
            .finish()
    }
}
