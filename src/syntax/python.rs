//! Python code, split at block statements by indentation depth.

use crate::core::{AnalysisWindow, ContextSource, SplitLevel};
use crate::error::Result;
use crate::syntax::SyntaxHandler;
use regex::Regex;
use std::sync::OnceLock;

fn block_start_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\s*)(?:def|class|if|elif|else|for|while|try|except|with|match|case)\b")
            .expect("valid regex")
    })
}

/// A syntax handler for Python code.
///
/// Indentation is tracked with a stack of seen indent widths, so files
/// with irregular indentation still map onto a usable level hierarchy.
/// Block statements within the first six levels become split points and
/// contribute their statement as block context.
#[derive(Debug)]
pub struct PythonHandler {
    indent_space_counts: Vec<usize>,
}

impl Default for PythonHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl PythonHandler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            indent_space_counts: vec![0],
        }
    }

    fn first_non_space_index(text: &str) -> usize {
        for (index, character) in text.chars().enumerate() {
            if !character.is_whitespace() {
                return index;
            }
        }
        0
    }
}

impl SyntaxHandler for PythonHandler {
    fn name(&self) -> &'static str {
        "python"
    }

    fn accepted_suffixes(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn analyze_line(&mut self, window: &mut AnalysisWindow) -> Result<SplitLevel> {
        let Some(current) = window.current() else {
            return Ok(SplitLevel::LINE);
        };
        let stripped = current.text().trim();
        // Ignore comments and empty lines.
        if stripped.is_empty() || stripped.starts_with('#') {
            return Ok(SplitLevel::LINE);
        }
        let line = current.text().replace('\t', "    ");

        // Follow the indent levels.
        let indent_space_count = Self::first_non_space_index(&line);
        if indent_space_count == 0 {
            self.indent_space_counts = vec![0];
        } else if self
            .indent_space_counts
            .last()
            .is_some_and(|last| indent_space_count > *last)
        {
            self.indent_space_counts.push(indent_space_count);
        } else if self
            .indent_space_counts
            .last()
            .is_some_and(|last| indent_space_count < *last)
        {
            // Remove indent counts at or above the current one, then push
            // the current one. This also deals with irregular files.
            while self
                .indent_space_counts
                .last()
                .is_some_and(|last| *last >= indent_space_count)
            {
                self.indent_space_counts.pop();
            }
            self.indent_space_counts.push(indent_space_count);
        }
        let indent_level = self.indent_space_counts.len();

        // Detect block starts for the first six indent levels.
        if indent_level <= 6 && block_start_regex().is_match(&line) {
            if let Some(current) = window.get_mut(0) {
                current.meta.source = ContextSource::Block;
                current.meta.text = current.text().trim().to_string();
            }
            let depth = u16::try_from(indent_level).unwrap_or(u16::MAX);
            return SplitLevel::block(depth);
        }
        Ok(SplitLevel::LINE)
    }
}
