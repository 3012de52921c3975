//! # Stratum Core Extension Registries
//!
//! Typed, per-slot association between registration keys and plugin
//! contributions. Each extension point of the host owns one
//! [`ExtensionRegistry`] instance, populated during the plugin-loading phase
//! and read-mostly afterwards.
//!
//! ## Key pieces
//!
//! - **[`ExtensionKey`]**: scoped registration key, `component/identity`.
//! - **[`ExtensionEntry`]**: a contribution with its payload, sort order and
//!   declarative attributes.
//! - **[`Payload`]**: eager value, deferred async loader, or per-query
//!   factory returning an [`Outcome`].
//! - **[`ExtensionRegistry`]**: registration, point lookup, ordered
//!   predicate queries and lazy payload resolution through the loader cache.
//!
//! Absence is never exceptional here: `get` on an unregistered key and a
//! `query` matching nothing are normal runtime states (the corresponding
//! feature simply is not installed). Only malformed or conflicting
//! registrations error, and they do so at registration time.

pub mod context;
pub mod entry;
pub mod error;
pub mod key;
#[allow(clippy::module_inception)]
pub mod registry;

pub use context::FactoryContext;
pub use entry::{ExtensionEntry, Outcome, Payload};
pub use error::RegistryError;
pub use key::ExtensionKey;
pub use registry::{Cardinality, ExtensionRegistry};
