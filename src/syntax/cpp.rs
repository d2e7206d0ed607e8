//! C and C++ code, split by blank-line grouping and bracket depth.

use crate::core::{AnalysisWindow, Line, SplitLevel};
use crate::error::Result;
use crate::syntax::SyntaxHandler;
use regex::Regex;
use std::sync::OnceLock;

/// Matches indented lines that end with an open bracket, allowing a
/// trailing line comment.
fn open_bracket_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\s+)\S.*\{(?:\s*//.*?)?$").expect("valid regex"))
}

/// A simplistic syntax handler for C and C++ code.
///
/// Expects well formatted code that groups its blocks with two and one
/// empty lines, plus lines that end with an opening bracket, rated by
/// their indentation depth. A leading comment header is also closed with
/// a split, as it is often joined with `#pragma once` or an `#include`.
/// Contexts are not supported, as this would require a token based parser.
#[derive(Debug, Default)]
pub struct CppHandler;

impl SyntaxHandler for CppHandler {
    fn name(&self) -> &'static str {
        "cpp"
    }

    fn accepted_suffixes(&self) -> &'static [&'static str] {
        &["h", "hpp", "hxx", "c", "cpp", "cxx"]
    }

    fn analyze_line(&mut self, window: &mut AnalysisWindow) -> Result<SplitLevel> {
        // Close an initial comment block at the first non-comment line.
        let at_file_start = window.get(-1).is_none()
            && window
                .current()
                .is_some_and(|line| line.text().starts_with("//"));
        if at_file_start {
            for offset in 1..=window.window_size() {
                let Ok(offset) = isize::try_from(offset) else {
                    break;
                };
                match window.get(offset) {
                    None => break,
                    Some(line) if line.text().starts_with("//") => {}
                    Some(_) => {
                        if let Some(line) = window.get_mut(offset) {
                            line.split_level = Some(SplitLevel::BLOCK_LEVEL_1);
                        }
                        break;
                    }
                }
            }
        }

        // Empty to non-empty transitions group blocks; an empty line at
        // the start of the file does not count.
        let after_empty = window.get(-1).is_some_and(Line::is_empty)
            && window.current().is_some_and(|line| !line.is_empty());
        if after_empty && let Some(before) = window.get(-2) {
            if before.is_empty() {
                // Two or more empty lines.
                return Ok(SplitLevel::BLOCK_LEVEL_1);
            }
            return Ok(SplitLevel::BLOCK_LEVEL_2);
        }

        // Lines that end in an open bracket, by indentation depth.
        if let Some(current) = window.current()
            && let Some(captures) = open_bracket_regex().captures(current.text())
        {
            let spaces = captures[1].replace('\t', "    ");
            let level = spaces.chars().count() / 4;
            // Require at least four spaces of indentation, up to five
            // levels, starting at block level 3.
            if (1..=5).contains(&level) {
                let depth = u16::try_from(level).unwrap_or(u16::MAX);
                return SplitLevel::block(depth + 2);
            }
        }

        Ok(SplitLevel::LINE)
    }
}
