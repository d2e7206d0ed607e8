//! CLI command implementations.
//!
//! Contains the business logic for each CLI command.

use crate::cli::output::{
    OutputFormat, format_blocks, format_syntax_list, format_unit_list, format_written_files,
};
use crate::cli::parser::{Cli, Commands};
use crate::core::Block;
use crate::error::{Error, IoError, Result};
use crate::io::{FileLineSource, write_blocks};
use crate::sizing::create_size_calculator;
use crate::splitter::Splitter;
use crate::syntax::{create_handler, detect_syntax};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Bytes read from the start of a document for syntax detection.
const DETECTION_SAMPLE_SIZE: u64 = 4096;

/// Reads the beginning of a document as a sample for syntax detection.
fn read_detection_sample(path: &Path) -> Result<String> {
    let path_str = path.to_string_lossy().to_string();
    if !path.exists() {
        return Err(IoError::FileNotFound { path: path_str }.into());
    }
    let file = File::open(path).map_err(|e| IoError::OpenFailed {
        path: path_str,
        reason: e.to_string(),
    })?;
    let mut bytes = Vec::new();
    file.take(DETECTION_SAMPLE_SIZE).read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Executes the CLI command.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        Commands::Split {
            file,
            syntax,
            unit,
            min_size,
            max_size,
            out_dir,
            prefix,
        } => cmd_split(
            file,
            syntax.as_deref(),
            unit,
            *min_size,
            *max_size,
            out_dir.as_deref(),
            prefix,
            format,
        ),
        Commands::Syntaxes => Ok(format_syntax_list(format)),
        Commands::Units => Ok(format_unit_list(format)),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_split(
    file: &Path,
    syntax: Option<&str>,
    unit: &str,
    min_size: Option<usize>,
    max_size: Option<usize>,
    out_dir: Option<&Path>,
    prefix: &str,
    format: OutputFormat,
) -> Result<String> {
    let syntax_name = match syntax {
        Some(name) => name,
        None => {
            let sample = read_detection_sample(file)?;
            detect_syntax(&sample, file).ok_or_else(|| {
                Error::config(format!(
                    "cannot detect the syntax of '{}', use --syntax",
                    file.display()
                ))
            })?
        }
    };
    let mut handler = create_handler(syntax_name)?;
    let calculator = create_size_calculator(unit)?;
    let minimum = min_size.unwrap_or_else(|| calculator.minimum_fragment_size_recommendation());
    let maximum = max_size.unwrap_or_else(|| calculator.maximum_fragment_size_recommendation());

    let mut source = FileLineSource::open(file)?;
    let splitter = Splitter::new(
        &mut source,
        handler.as_mut(),
        calculator.as_ref(),
        minimum,
        maximum,
    )?;
    let blocks: Vec<Block> = splitter.collect::<Result<_>>()?;

    if let Some(out_dir) = out_dir {
        let iter = blocks
            .iter()
            .enumerate()
            .map(|(index, block)| (index, block.text.as_str()));
        let paths = write_blocks(out_dir, iter, prefix)?;
        return Ok(format_written_files(&paths, format));
    }
    Ok(format_blocks(&blocks, calculator.unit_name(), format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn markdown_file() -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
        writeln!(file, "# Title\n\nFirst paragraph.\n\nSecond paragraph.").unwrap();
        file.flush().unwrap();
        file
    }

    fn run(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(args).unwrap();
        execute(&cli)
    }

    #[test]
    fn test_split_detects_markdown() {
        let file = markdown_file();
        let path = file.path().to_string_lossy().to_string();
        let output = run(&["docsplit", "split", &path, "--max-size", "2000"]).unwrap();
        assert!(output.contains("block 1"));
        assert!(output.contains("First paragraph."));
    }

    #[test]
    fn test_split_json_output() {
        let file = markdown_file();
        let path = file.path().to_string_lossy().to_string();
        let output = run(&[
            "docsplit",
            "split",
            &path,
            "--format",
            "json",
            "--min-size",
            "0",
            "--max-size",
            "20",
        ])
        .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(parsed.as_array().unwrap().len() > 1);
    }

    #[test]
    fn test_split_unknown_suffix_needs_syntax() {
        let mut file = tempfile::Builder::new().suffix(".bin").tempfile().unwrap();
        writeln!(file, "data").unwrap();
        let path = file.path().to_string_lossy().to_string();
        let result = run(&["docsplit", "split", &path]);
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_split_with_explicit_syntax() {
        let mut file = tempfile::Builder::new().suffix(".bin").tempfile().unwrap();
        writeln!(file, "some text\nmore text").unwrap();
        file.flush().unwrap();
        let path = file.path().to_string_lossy().to_string();
        let output = run(&[
            "docsplit", "split", &path, "--syntax", "plain", "--max-size", "100",
        ])
        .unwrap();
        assert!(output.contains("some text"));
    }

    #[test]
    fn test_split_writes_files() {
        let file = markdown_file();
        let path = file.path().to_string_lossy().to_string();
        let dir = TempDir::new().unwrap();
        let out_dir = dir.path().join("out");
        let out_arg = out_dir.to_string_lossy().to_string();
        let output = run(&[
            "docsplit",
            "split",
            &path,
            "--min-size",
            "0",
            "--max-size",
            "20",
            "--out-dir",
            &out_arg,
        ])
        .unwrap();
        assert!(output.contains("files written"));
        assert!(out_dir.join("block_0000.txt").exists());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = run(&["docsplit", "split", "/nonexistent/file.md"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_syntaxes_and_units() {
        assert!(run(&["docsplit", "syntaxes"]).unwrap().contains("python"));
        assert!(run(&["docsplit", "units"]).unwrap().contains("bytes"));
    }
}
