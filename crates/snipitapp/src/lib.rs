//! # snipitapp
//!
//! The core of SnipIt, a personal code snippet manager. Snippets are plain JSON
//! files grouped into *collections* (directories), and a single settings document
//! records which collections exist.
//!
//! This crate is UI-agnostic. It never writes to stdout or stderr and never asks
//! the user anything; clients (the `snipit` CLI, or any other front end) take the
//! returned data and present it.
//!
//! ## Architecture
//!
//! ```text
//! client ──► api::SnipitApi ──► commands::{collections, create, update}
//!                 │                       │
//!                 ├──► view ──► filter, query, sort
//!                 │
//!                 ├──► settings::SettingsPort ──► DocumentBackend (fs | memory)
//!                 └──► store::DataStore ───────► RecordBackend   (fs | memory)
//! ```
//!
//! - [`model`]: `Snippet`, `Collection`, ids, tags and timestamps.
//! - [`settings`]: the settings document and the injectable [`settings::SettingsPort`].
//! - [`store`]: one JSON file per snippet in a collection directory.
//! - [`query`]: the `field:value` search language.
//! - [`filter`], [`sort`], [`view`]: the list pipeline.
//! - [`commands`]: operations that change state.
//! - [`metadata`]: the contract for metadata completion services.
//! - [`api`]: the facade clients talk to.
//! - [`init`]: first-run and per-launch startup.
//!
//! ## Failure Values
//!
//! Storage and settings operations report failure through plain values (`false`,
//! `None`, an empty list) after logging the cause with `tracing`. Operations that
//! validate input return [`error::Result`].

pub mod api;
pub mod commands;
pub mod error;
pub mod filter;
pub mod init;
pub mod metadata;
pub mod model;
pub mod query;
pub mod settings;
pub mod sort;
pub mod store;
pub mod view;
