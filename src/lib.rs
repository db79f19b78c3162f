// TraceTrail - lib.rs
//
// Library entry point, exposing the core and report layers for
// integration testing and programmatic use. The CLI surface lives in
// main.rs and is not part of the library.

pub mod core;
pub mod report;
pub mod util;
