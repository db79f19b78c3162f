// TraceTrail - core/mod.rs
//
// Core correlation logic layer.
// Must NOT depend on the report layer; renderers consume core types,
// never the other way around.

pub mod classifier;
pub mod correlate;
pub mod discovery;
pub mod error_scan;
pub mod extract;
pub mod merge;
pub mod model;
