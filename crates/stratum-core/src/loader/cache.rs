use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};

use crate::loader::error::LoaderError;

type SharedLoad<V> = Shared<BoxFuture<'static, Result<Arc<V>, LoaderError>>>;

/// Memoizing cache for asynchronous module loads, keyed by logical name.
///
/// For any key there is at most one outstanding load at a time: the first
/// caller's loader function is invoked, and every concurrent caller awaits
/// the same shared future. Successful results stay memoized for the lifetime
/// of the cache (or until [`clean`](LoaderCache::clean) is called); failed
/// loads are evicted so a later call can retry from scratch.
pub struct LoaderCache<V: Send + Sync + 'static> {
    entries: Mutex<HashMap<String, SharedLoad<V>>>,
}

impl<V: Send + Sync + 'static> LoaderCache<V> {
    /// Create a new empty loader cache.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    // The lock is only held to mutate the map, never across an await point,
    // so a poisoned mutex cannot leave a half-applied update behind.
    fn entries(&self) -> MutexGuard<'_, HashMap<String, SharedLoad<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the memoized load for `key`, invoking `loader` only when no
    /// pending or resolved load exists yet.
    ///
    /// Every caller of the same in-flight load observes the same settled
    /// value, including rejections. A rejected load is removed from the
    /// cache once observed, so the next `promise_for` call for that key
    /// starts over with a fresh loader.
    pub async fn promise_for<F, Fut>(&self, key: &str, loader: F) -> Result<Arc<V>, LoaderError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Arc<V>, LoaderError>> + Send + 'static,
    {
        let shared = {
            let mut entries = self.entries();
            match entries.get(key) {
                Some(existing) => existing.clone(),
                None => {
                    log::debug!("loader cache: starting load for '{}'", key);
                    let fut = loader().boxed().shared();
                    entries.insert(key.to_string(), fut.clone());
                    fut
                }
            }
        };

        let result = shared.clone().await;

        if result.is_err() {
            let mut entries = self.entries();
            // Only evict our own failed future. A concurrent clean() plus
            // re-registration must not lose the newer entry.
            if let Some(current) = entries.get(key) {
                if current.ptr_eq(&shared) {
                    log::debug!("loader cache: evicting failed load for '{}'", key);
                    entries.remove(key);
                }
            }
        }

        result
    }

    /// Remove the cache entry for `key`, resolved or not.
    ///
    /// Callers already awaiting an in-flight load for `key` are unaffected;
    /// they still observe the original settlement. Only future
    /// [`promise_for`](LoaderCache::promise_for) calls see the eviction.
    pub fn clean(&self, key: &str) -> bool {
        self.entries().remove(key).is_some()
    }

    /// Remove every cache entry.
    pub fn clean_all(&self) {
        self.entries().clear();
    }

    /// Check whether a pending or resolved load exists for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries().contains_key(key)
    }

    /// Number of cached (pending or resolved) loads.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Check whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl<V: Send + Sync + 'static> Default for LoaderCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Send + Sync + 'static> fmt::Debug for LoaderCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.entries().keys().cloned().collect();
        f.debug_struct("LoaderCache").field("keys", &keys).finish()
    }
}
