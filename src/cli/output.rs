//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::core::Block;
use crate::error::Error;
use crate::sizing::{AVAILABLE_UNITS, create_size_calculator};
use crate::syntax::{AVAILABLE_SYNTAXES, create_handler};
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats the blocks produced by a split.
#[must_use]
pub fn format_blocks(blocks: &[Block], unit_name: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_blocks_text(blocks, unit_name),
        OutputFormat::Json => format_json(&blocks),
    }
}

fn format_blocks_text(blocks: &[Block], unit_name: &str) -> String {
    let mut output = String::new();
    for (index, block) in blocks.iter().enumerate() {
        let line = block
            .line_number
            .map_or_else(|| "-".to_string(), |n| n.to_string());
        let _ = writeln!(
            output,
            "---- block {} (line {}, {} {}) ----",
            index + 1,
            line,
            block.size,
            unit_name
        );
        for section in &block.context.sections {
            let _ = writeln!(output, "  section: {} [{}]", section.title, section.level);
        }
        for statement in &block.context.blocks {
            let _ = writeln!(output, "  block: {} [{}]", statement.statement, statement.level);
        }
        output.push_str(&block.text);
        if !block.text.ends_with('\n') {
            output.push('\n');
        }
    }
    let _ = writeln!(output, "{} blocks", blocks.len());
    output
}

/// Formats the result of writing blocks to files.
#[must_use]
pub fn format_written_files(paths: &[String], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            for path in paths {
                let _ = writeln!(output, "{path}");
            }
            let _ = writeln!(output, "{} files written", paths.len());
            output
        }
        OutputFormat::Json => format_json(&paths),
    }
}

/// Formats the list of available syntax handlers.
#[must_use]
pub fn format_syntax_list(format: OutputFormat) -> String {
    #[derive(Serialize)]
    struct SyntaxRow {
        name: &'static str,
        suffixes: Vec<&'static str>,
    }

    let rows: Vec<SyntaxRow> = AVAILABLE_SYNTAXES
        .iter()
        .filter_map(|name| create_handler(name).ok())
        .map(|handler| SyntaxRow {
            name: handler.name(),
            suffixes: handler.accepted_suffixes().to_vec(),
        })
        .collect();

    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            for row in &rows {
                let _ = writeln!(output, "{:<18} .{}", row.name, row.suffixes.join(" ."));
            }
            output
        }
        OutputFormat::Json => format_json(&rows),
    }
}

/// Formats the list of available size units.
#[must_use]
pub fn format_unit_list(format: OutputFormat) -> String {
    #[derive(Serialize)]
    struct UnitRow {
        name: &'static str,
        unit: &'static str,
        recommended_minimum: usize,
        recommended_maximum: usize,
    }

    let rows: Vec<UnitRow> = AVAILABLE_UNITS
        .iter()
        .filter_map(|name| create_size_calculator(name).ok())
        .map(|calculator| UnitRow {
            name: calculator.name(),
            unit: calculator.unit_name(),
            recommended_minimum: calculator.minimum_fragment_size_recommendation(),
            recommended_maximum: calculator.maximum_fragment_size_recommendation(),
        })
        .collect();

    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            for row in &rows {
                let _ = writeln!(
                    output,
                    "{:<8} {:<12} recommended {}..{}",
                    row.name, row.unit, row.recommended_minimum, row.recommended_maximum
                );
            }
            output
        }
        OutputFormat::Json => format_json(&rows),
    }
}

/// Formats an error for the chosen output format.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ErrorBody {
                error: String,
            }
            format_json(&ErrorBody {
                error: error.to_string(),
            })
        }
    }
}
