//! CLI layer for docsplit.
//!
//! Provides the command-line interface using clap, with commands for
//! splitting documents and listing the available syntaxes and units.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
