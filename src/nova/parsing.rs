//! Structural parsing
//!
//! Recovers classes, fields and methods from a pseudocode line sequence
//! without a grammar: every line is classified by ordered regex checks and
//! fed to a small state machine.
//!
//! - [`classification`]: what a single line looks like (header, field, ...)
//! - [`fields`]: field declarations
//! - [`signature`]: method and constructor headers
//! - [`structure`]: the scanner that builds the [`ClassModel`](crate::nova::model::ClassModel)

pub mod classification;
pub mod fields;
pub mod signature;
pub mod structure;

pub use signature::SignatureParser;
pub use structure::StructuralParser;
