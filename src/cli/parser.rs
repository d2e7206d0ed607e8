//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// docsplit: split structured documents into size-bounded blocks.
///
/// Analyzes a document's structure (headings, paragraphs, code blocks)
/// and splits it into blocks between a soft minimum and a hard maximum
/// size, each annotated with its enclosing section and block context.
#[derive(Parser, Debug)]
#[command(name = "docsplit")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a document into blocks.
    Split {
        /// Path to the document.
        file: PathBuf,

        /// Syntax handler to use; detected from the file suffix if omitted.
        #[arg(short, long)]
        syntax: Option<String>,

        /// Size unit (bytes, chars, words, lines, tokens).
        #[arg(short, long, default_value = "chars", env = "DOCSPLIT_UNIT")]
        unit: String,

        /// Minimum block size, a soft limit.
        ///
        /// Defaults to the unit's recommended minimum.
        #[arg(long)]
        min_size: Option<usize>,

        /// Maximum block size, a hard limit.
        ///
        /// Defaults to the unit's recommended maximum.
        #[arg(long)]
        max_size: Option<usize>,

        /// Write each block to a file in this directory instead of stdout.
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Filename prefix for written block files.
        #[arg(long, default_value = "block")]
        prefix: String,
    },

    /// List the available syntax handlers.
    Syntaxes,

    /// List the available size units.
    Units,
}
