//! # docsmith
//!
//! Command-line front end for a documentation-site generator.
//!
//! The front end discovers candidate source files from a set of root paths,
//! applies glob and predicate exclusion rules, and hands the resulting sorted
//! file list to a rendering pipeline. Default CLI arguments can be stored in
//! an rc-file and are shell-tokenized and spliced into the argument list
//! before parsing.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docsmith::{Config, Pipeline};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::builder()
//!     .paths(["lib"])
//!     .exclude(["**/*.markdown"])
//!     .output("./docs")
//!     .build()?;
//!
//! let stats = Pipeline::new(config)?.run()?;
//! stats.print_summary();
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! 1. **rcfile**: injects stored default arguments before parsing
//! 2. **walker** + **exclude**: recursive discovery with rule-based exclusion
//! 3. **render**: registry dispatching the file list to a renderer
//!
//! Parsing and HTML generation are external collaborators; only the registry
//! seam for them lives here.

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic
)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod error;
mod pipeline;
mod render;

pub mod exclude;
pub mod rcfile;
pub mod shellwords;
pub mod walker;

pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use exclude::{EntryMeta, ExcludeRule, ExcludeSet};
pub use pipeline::{Pipeline, PipelineStats};
pub use render::{JsonRenderer, Registry, Renderer};
pub use walker::find_files;

/// Runs a complete build with the given configuration.
///
/// This is the main entry point for the library.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - A source root cannot be read
/// - An exclude pattern is malformed
/// - The configured renderer is unknown or fails
pub fn run(config: Config) -> Result<PipelineStats> {
    Pipeline::new(config)?.run()
}
