#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

//! Build-time path overrides for module-resolution pipelines.
//!
//! A project declares, in an `override.json` at its root, which dependency
//! files should resolve to local replacement files instead. This crate turns
//! each declared override point into a resolver plugin that intercepts the
//! host pipeline's file-existence check, rewrites matching paths by prefix
//! substitution when the replacement exists on disk, and records every
//! applied override into a report that is flushed once at build completion.
//!
//! The host pipeline is abstracted behind [`HostPipeline`] so the core stays
//! testable without a concrete build system.

pub mod config;
pub mod error;
pub mod install;
pub mod paths;
pub mod pipeline;
pub mod report;
pub mod resolver;

pub use config::{OverrideConfig, CONFIG_FILE_NAME};
pub use error::Error;
pub use install::install;
pub use pipeline::{
    BuildCompleteHandler, HostPipeline, ResolutionKind, ResolveOptions, ResolvePlugin,
    ResolveRequest, Rewrite,
};
pub use report::OverrideReport;
pub use resolver::{OverrideRule, PathOverridePlugin};
