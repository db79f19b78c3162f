// TraceTrail - report/mod.rs
//
// Presentation layer: text rendering and machine-readable export of core
// results. All display capping lives here — the core never truncates.

pub mod export;
pub mod narrative;
pub mod summary;
