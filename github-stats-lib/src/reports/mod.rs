//! Rendering of collected metric records
//!
//! Two generators are provided, each accessed through a `generate` function taking the
//! records of one collection cycle and the cycle's timestamp:
//! - **Line protocol**: one InfluxDB line per record, ready to be piped into an agent
//! - **JSON**: machine-readable structured data

mod json;
mod line_protocol;

pub use json::generate as generate_json;
pub use line_protocol::generate as generate_line_protocol;
