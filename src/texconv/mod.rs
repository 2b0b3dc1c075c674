//! texconv invocation
//!
//! Builds the command line for Microsoft's texconv tool and runs it as a
//! blocking child process. The compression itself happens entirely inside
//! texconv.

mod command;
mod runner;

pub use command::{expected_output_path, TexconvCommand, OUTPUT_EXTENSION};
pub use runner::{ConversionOutcome, Texconv};
