//! # Stratum Core Plugin System
//!
//! The contract between the host and its feature plugins.
//!
//! A plugin module's sole job is to contribute entries to registries: the
//! [`Plugin`] trait exposes identity, version metadata and a synchronous
//! `register` hook that runs exactly once during bootstrap. Which plugins
//! run, and in what order, is decided by an explicit [`HostManifest`]
//! rather than by implicit discovery, so a registry can never be queried
//! before all of its contributors have registered.
//!
//! ## Submodules
//!
//! - **[`traits`]**: the [`Plugin`] trait itself.
//! - **[`manifest`]**: manifest structures and TOML/JSON/YAML parsing.
//! - **[`version`]**: host API versioning ([`ApiVersion`], [`VersionRange`]).
//! - **[`error`]**: [`PluginSystemError`](error::PluginSystemError) and friends.

pub mod error;
pub mod manifest;
pub mod traits;
pub mod version;

pub use error::PluginSystemError;
pub use manifest::{HostManifest, PluginManifest};
pub use traits::Plugin;
pub use version::{ApiVersion, VersionRange};
