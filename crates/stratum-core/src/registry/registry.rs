use std::collections::HashMap;
use std::fmt;

use std::sync::Arc;

use crate::loader::cache::LoaderCache;
use crate::registry::context::FactoryContext;
use crate::registry::entry::{ExtensionEntry, Outcome, Payload};
use crate::registry::error::RegistryError;
use crate::registry::key::ExtensionKey;

/// How many entries an extension point accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// At most one entry per contributing component (e.g. a component's
    /// editor widget). Other components may still contribute their own.
    Single,
    /// Any number of entries (e.g. resource actions).
    Multi,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::Single => f.write_str("single"),
            Cardinality::Multi => f.write_str("multi"),
        }
    }
}

/// Registry for one extension point ("slot").
///
/// Grows monotonically during the plugin-loading phase and is read-mostly
/// afterwards. Registration is synchronous and takes `&mut self`; queries
/// take `&self` and return snapshots, so iteration can never observe a
/// concurrent mutation.
pub struct ExtensionRegistry<V: Send + Sync + 'static> {
    slot: String,
    cardinality: Cardinality,
    entries: HashMap<ExtensionKey, ExtensionEntry<V>>,
    next_seq: u64,
    /// Memoizes deferred payload resolution, keyed by the entry key string.
    cache: LoaderCache<V>,
}

impl<V: Send + Sync + 'static> ExtensionRegistry<V> {
    /// Create an empty registry for the named slot.
    pub fn new(slot: &str, cardinality: Cardinality) -> Self {
        Self {
            slot: slot.to_string(),
            cardinality,
            entries: HashMap::new(),
            next_seq: 0,
            cache: LoaderCache::new(),
        }
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    /// Register an entry.
    ///
    /// Conflicts fail fast: a second registration under an already-used key
    /// is an error, never a silent overwrite, and a single-valued slot
    /// rejects a second entry from a component that already has one.
    /// Malformed keys are also rejected here rather than surfacing at query
    /// time.
    pub fn register(&mut self, mut entry: ExtensionEntry<V>) -> Result<(), RegistryError> {
        let key = entry.key().clone();

        if key.component().is_empty() || key.identity().is_empty() {
            return Err(RegistryError::MalformedEntry {
                slot: self.slot.clone(),
                reason: "key component and identity must be non-empty".to_string(),
            });
        }

        if self.entries.contains_key(&key) {
            return Err(RegistryError::DuplicateEntry {
                slot: self.slot.clone(),
                key: key.to_string(),
            });
        }

        if self.cardinality == Cardinality::Single {
            let same_component = self
                .entries
                .keys()
                .find(|k| k.component() == key.component());
            if let Some(existing) = same_component {
                return Err(RegistryError::CardinalityViolation {
                    slot: self.slot.clone(),
                    key: key.to_string(),
                    existing: existing.to_string(),
                });
            }
        }

        entry.seq = self.next_seq;
        self.next_seq += 1;

        log::debug!("slot '{}': registered entry '{}'", self.slot, key);
        self.entries.insert(key, entry);
        Ok(())
    }

    /// Convenience wrapper for payloads that are already resolved.
    pub fn register_value(&mut self, key: ExtensionKey, value: V) -> Result<(), RegistryError> {
        self.register(ExtensionEntry::value(key, value))
    }

    /// Point lookup. `None` means "nothing registered here", which callers
    /// handle by omitting the corresponding affordance.
    pub fn get(&self, key: &ExtensionKey) -> Option<&ExtensionEntry<V>> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &ExtensionKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries matching `predicate`, as a snapshot ordered by ascending
    /// `order` and then registration order.
    pub fn query<P>(&self, predicate: P) -> Vec<ExtensionEntry<V>>
    where
        P: Fn(&ExtensionEntry<V>) -> bool,
    {
        let mut matched: Vec<ExtensionEntry<V>> = self
            .entries
            .values()
            .filter(|e| predicate(e))
            .cloned()
            .collect();
        matched.sort_by_key(|e| (e.order(), e.seq));
        matched
    }

    /// Snapshot of every entry, in query order.
    pub fn snapshot(&self) -> Vec<ExtensionEntry<V>> {
        self.query(|_| true)
    }

    /// Resolve the first matching entry's payload.
    ///
    /// Eager values resolve immediately; deferred payloads go through the
    /// registry's loader cache keyed by the entry key string, so repeated
    /// loads share one resolution. Factory entries are evaluated with an
    /// empty context, and a factory that skips passes the turn to the next
    /// match. `Ok(None)` means nothing matched (or everything skipped),
    /// which is a normal state, not an error.
    pub async fn load<P>(&self, predicate: P) -> Result<Option<Arc<V>>, RegistryError>
    where
        P: Fn(&ExtensionEntry<V>) -> bool,
    {
        for entry in self.query(predicate) {
            match entry.payload() {
                Payload::Value(v) => return Ok(Some(v.clone())),
                Payload::Deferred(loader) => {
                    let loader = loader.clone();
                    let value = self
                        .cache
                        .promise_for(&entry.key().to_string(), move || loader())
                        .await?;
                    return Ok(Some(value));
                }
                Payload::Factory(factory) => match factory(&FactoryContext::new()) {
                    Outcome::Produced(v) => return Ok(Some(Arc::new(v))),
                    Outcome::Skip => continue,
                },
            }
        }
        Ok(None)
    }

    /// Evaluate factory entries matching `predicate` with `ctx`; the first
    /// non-skip outcome wins. Non-factory entries are ignored here.
    pub fn produce<P>(&self, ctx: &FactoryContext, predicate: P) -> Option<V>
    where
        P: Fn(&ExtensionEntry<V>) -> bool,
    {
        for entry in self.query(predicate) {
            if let Payload::Factory(factory) = entry.payload() {
                match factory(ctx) {
                    Outcome::Produced(v) => return Some(v),
                    Outcome::Skip => continue,
                }
            }
        }
        None
    }

    /// Drop the memoized payload for `key` so the next load re-resolves it.
    pub fn invalidate(&self, key: &ExtensionKey) -> bool {
        self.cache.clean(&key.to_string())
    }
}

// Manual Debug: entry payloads may wrap closures.
impl<V: Send + Sync + 'static> fmt::Debug for ExtensionRegistry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.entries.keys().map(|k| k.to_string()).collect();
        f.debug_struct("ExtensionRegistry")
            .field("slot", &self.slot)
            .field("cardinality", &self.cardinality)
            .field("entries", &keys)
            .finish()
    }
}
