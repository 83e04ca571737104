//! # nova
//!
//! A transpiler from a line-oriented pseudocode dialect to Java source.
//!
//! Input without `class`/`function` headers is converted line by line into a
//! single `Main` class. Input with headers goes through the structural parser,
//! which builds a class model that is rendered into one source unit per class.
//!
//! See [`nova::pipeline::Transpiler`] for the entry point.

pub mod nova;
