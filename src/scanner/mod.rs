// file: src/scanner/mod.rs
// description: filing surface scanning module exports
// reference: internal module structure

pub mod surface;

pub use surface::{FilingSurfaceScanner, ScanOptions, SurfaceOutcome};
