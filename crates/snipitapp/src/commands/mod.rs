//! # Command Layer
//!
//! The operations that change state live here, one submodule per concern. They
//! take their collaborators ([`crate::settings::SettingsPort`],
//! [`crate::store::DataStore`]) as arguments and return plain data.
//!
//! Commands never print, prompt or decide exit codes. Presentation belongs to the
//! client (see the `snipit` binary); logging goes through `tracing`.
//!
//! ## Command Modules
//!
//! - [`collections`]: the collection registry kept in the settings document
//! - [`create`]: validating a [`create::SnippetDraft`] into a new snippet
//! - [`update`]: applying a draft to an existing snippet
//!
//! ## Testing Strategy
//!
//! Command tests run against `InMemorySettings` and `InMemoryStore`, so every
//! branch (duplicates, stale ids, collisions, write failures) is reachable without
//! touching the filesystem.

pub mod collections;
pub mod create;
pub mod update;

pub use create::SnippetDraft;
