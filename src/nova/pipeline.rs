//! Conversion pipeline
//!
//! The [`Transpiler`] decides between procedural and structural mode, runs
//! the matching path and returns the generated units. String-based
//! conversion is the core operation; [`loader`] adds file-based wrappers and
//! writing units to disk.

pub mod loader;
pub mod mode;
pub mod transpiler;

pub use loader::{emit_units, PipelineError};
pub use mode::Mode;
pub use transpiler::{Conversion, Transpiler};
