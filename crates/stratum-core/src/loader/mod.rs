//! # Stratum Core Loader
//!
//! Memoized asynchronous module resolution. A [`LoaderCache`] maps a logical
//! module name to an in-flight or resolved load, so that concurrent requests
//! for the same name share a single resolution. [`ModuleSource`] abstracts
//! over the backends that actually produce module values (e.g. JSON payload
//! files resolved by [`JsonModuleSource`]).
//!
//! The cache never performs I/O itself; all I/O happens inside the loader
//! functions handed to [`LoaderCache::promise_for`].

pub mod cache;
pub mod error;
pub mod source;

pub use cache::LoaderCache;
pub use error::LoaderError;
pub use source::{JsonModuleSource, ModuleSource};
