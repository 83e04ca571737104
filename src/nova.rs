//! Main module for nova library functionality

pub mod codegen;
pub mod config;
pub mod converting;
pub mod model;
pub mod parsing;
pub mod pipeline;
pub mod rules;
pub mod runner;
