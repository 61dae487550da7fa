//! dbwebform CLI library
//!
//! Command implementations behind the `dbwebform` binary.

#![allow(clippy::missing_errors_doc)]

pub mod commands;

pub use commands::{GenerateCommand, ServeCommand};
