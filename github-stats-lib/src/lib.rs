#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for github-stats
//!
//! This library collects popularity and usage metrics for GitHub repositories and
//! renders them as `repository_info` records for a metrics pipeline.
//!
//! # Module Organization
//!
//! - [`github`]: Identifier parsing, the REST client, and the collector
//! - [`metrics`]: Metric records, accumulators, and logging capabilities
//! - [`reports`]: Rendering of records as line protocol or JSON
//! - `commands`: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

mod commands;
pub mod github;
pub mod metrics;
pub mod reports;

pub use crate::commands::{Console, run};
