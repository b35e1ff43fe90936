//! Metric records and the capabilities a host provides to the collector
//!
//! The collector never talks to a concrete metrics agent. It produces [`MetricRecord`]s and
//! hands them, together with per-repository errors, to an [`Accumulator`]. Diagnostic output
//! goes through a [`Logger`]. [`RecordingAccumulator`] and [`FacadeLogger`] are the
//! implementations used by the command-line tool.

mod accumulator;
mod logger;
mod metric_record;

pub use accumulator::{Accumulator, RecordingAccumulator};
pub use logger::{COLLECTOR_LOG_TARGET, FacadeLogger, Logger};
pub use metric_record::{MEASUREMENT, MetricRecord, REPOSITORY_TAG};
