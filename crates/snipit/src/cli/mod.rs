//! # CLI Behavior
//!
//! This is **one possible UI client** for snipit. It is the only place that knows
//! about terminal I/O, exit codes and output formatting.
//!
//! ## Naked Execution
//!
//! Running `snipit` with no command lists the selected collection, newest first.
//!
//! ## Choosing a Collection
//!
//! Snippet commands act on the selected collection (see `snipit collections
//! select`). `-c/--collection` picks another one by id or name for a single
//! invocation.
//!
//! ## Code Input
//!
//! `add` takes the code from `--code`, else from `--file`, else from piped stdin.
//!
//! ## Module Structure
//!
//! - `setup`: argument parsing via clap
//! - `commands`: per-command handlers that call the API
//! - `render`: output formatting (colors, widths, relative times)

mod commands;
mod render;
pub mod setup;

pub use commands::run;
