//! reStructuredText: adornment headings, directives and indentation.
//!
//! Heading adornment characters have no fixed depth in reStructuredText;
//! the handler assigns section levels in the order the adornment styles
//! first appear in the document. Overlined headings count as a separate
//! style from plain underlined ones with the same character.

use crate::core::{AnalysisWindow, ContextSource, Line, SplitLevel};
use crate::error::Result;
use crate::syntax::SyntaxHandler;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// The characters accepted as section adornments.
const VALID_SECTION_CHARACTERS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Directives whose body may contain arbitrary foreign formatting.
const IGNORED_DIRECTIVES: [&str; 4] = ["code-block", "sourcecode", "comment", "raw"];

fn directive_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([ \t]*)\.\. ([-_a-zA-Z0-9]+)::").expect("valid regex"))
}

fn indent_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([ \t]*)[^ \t]").expect("valid regex"))
}

/// A classified line in the adornment scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct AdornmentLine {
    is_header: bool,
    character: Option<char>,
    length: usize,
}

/// A syntax handler for reStructuredText.
#[derive(Debug, Default)]
pub struct ReStructuredTextHandler {
    /// Adornment style key to assigned section level, in first-seen order.
    header_map: HashMap<String, SplitLevel>,
    /// Line numbers of labels and index directives belonging to a
    /// following header.
    header_related_lines: Vec<usize>,
    /// Name of the unindented directive currently open, empty for none.
    in_directive: String,
    last_indent_size: usize,
    last_indent_level: usize,
}

impl ReStructuredTextHandler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            header_map: HashMap::new(),
            header_related_lines: Vec::new(),
            in_directive: String::new(),
            last_indent_size: 0,
            last_indent_level: 1,
        }
    }

    /// Tests if the line is a directive, returning its indentation depth
    /// and name.
    fn is_directive(text: &str) -> Option<(usize, String)> {
        let captures = directive_regex().captures(text)?;
        Some((captures[1].len(), captures[2].to_string()))
    }

    /// Classifies a line for the adornment scan.
    fn adornment_line(text: &str) -> AdornmentLine {
        let stripped = text.trim_end();
        let mut result = AdornmentLine {
            length: stripped.chars().count(),
            ..AdornmentLine::default()
        };
        let Some(first) = stripped.chars().next() else {
            return result;
        };
        if !VALID_SECTION_CHARACTERS.contains(first) {
            return result;
        }
        if stripped.chars().any(|c| c != first) {
            return result;
        }
        result.character = Some(first);
        result.is_header = true;
        result
    }

    /// Overlined heading: adornment, title, matching adornment.
    fn is_double_line(results: &[AdornmentLine]) -> bool {
        if results.len() < 3 {
            return false;
        }
        results[0].is_header
            && results[0] == results[2]
            && !results[1].is_header
            && results[1].length > 0
            && results[1].length <= results[0].length
    }

    /// Underlined heading: title with a following adornment of about the
    /// same length.
    fn is_single_line(results: &[AdornmentLine]) -> bool {
        results[1].is_header
            && !results[0].is_header
            && results[0].length > 3
            && results[0].length.abs_diff(results[1].length) <= 2
    }

    /// Tests if a heading starts at the current line.
    ///
    /// Returns the adornment style key and the section title. Heading
    /// lines below the current line are marked `KEEP_LINES` so they stay
    /// glued to the title.
    fn heading_start(window: &mut AnalysisWindow) -> Option<(String, String)> {
        let results: Vec<AdornmentLine> = window
            .leading_lines(3)
            .iter()
            .map(|line| Self::adornment_line(line.text()))
            .collect();
        if results.len() < 2 {
            return None;
        }

        if Self::is_double_line(&results) {
            let title = window.get(1).map(|line| line.text().trim().to_string())?;
            if let Some(line) = window.get_mut(1) {
                line.split_level = Some(SplitLevel::KEEP_LINES);
            }
            if let Some(line) = window.get_mut(2) {
                line.split_level = Some(SplitLevel::KEEP_LINES);
            }
            let character = results[0].character?;
            return Some((format!("{character}{character}"), title));
        }

        if Self::is_single_line(&results) {
            if let Some(line) = window.get_mut(1) {
                line.split_level = Some(SplitLevel::KEEP_LINES);
            }
            let title = window.current().map(|line| line.text().trim().to_string())?;
            let character = results[1].character?;
            return Some((character.to_string(), title));
        }

        None
    }

    /// The section level for an adornment style, assigning the next free
    /// level on first sight. After eight styles everything else becomes a
    /// paragraph.
    fn level_for_style(&mut self, key: &str) -> Result<SplitLevel> {
        if let Some(level) = self.header_map.get(key) {
            return Ok(*level);
        }
        if self.header_map.len() >= 8 {
            return Ok(SplitLevel::PARAGRAPH);
        }
        let depth = u16::try_from(self.header_map.len()).unwrap_or(u16::MAX);
        let level = SplitLevel::section(depth + 1)?;
        self.header_map.insert(key.to_string(), level);
        Ok(level)
    }

    fn shall_ignore_formatting(&self) -> bool {
        IGNORED_DIRECTIVES.contains(&self.in_directive.as_str())
    }

    /// Tracks the indentation level across non-empty lines.
    fn handle_indentation_levels(&mut self, window: &AnalysisWindow) {
        let Some(current) = window.current() else {
            return;
        };
        if current.is_empty() {
            return;
        }
        let Some(captures) = indent_regex().captures(current.text()) else {
            return;
        };
        let size = captures[1].len();
        if size == 0 {
            self.last_indent_size = 0;
            self.last_indent_level = 1;
            // Non-indented text ends any directive.
            self.in_directive.clear();
            return;
        }
        if self.shall_ignore_formatting() {
            // Ignore level changes in blocks that contain unknown formatting.
            return;
        }
        if size == self.last_indent_size {
            return;
        }
        if size < self.last_indent_size {
            self.last_indent_level = self.last_indent_level.saturating_sub(1);
        } else {
            self.last_indent_level += 1;
        }
        // Malformed text will confuse the levels, reset to 2.
        if self.last_indent_level < 2 {
            self.last_indent_level = 2;
        }
    }

    /// The run of empty lines directly before a heading near the start of
    /// the document, if nothing but emptiness precedes it.
    fn just_emptiness_before_current(window: &AnalysisWindow) -> Option<usize> {
        let current = window.current()?;
        if current.line_number() > 5 {
            return None;
        }
        let mut last_empty_line = None;
        for slot in window.previous_lines() {
            match slot {
                None => return last_empty_line,
                Some(line) if line.is_empty() => last_empty_line = Some(line.line_number()),
                Some(_) => return None,
            }
        }
        last_empty_line
    }

    fn paragraph_or_line(window: &AnalysisWindow) -> SplitLevel {
        let after_empty = window.get(-1).is_some_and(Line::is_empty)
            && window.current().is_some_and(|line| !line.is_empty());
        if after_empty {
            SplitLevel::PARAGRAPH
        } else {
            SplitLevel::LINE
        }
    }

    fn handle_directives(&mut self, window: &AnalysisWindow) -> Result<Option<SplitLevel>> {
        let Some(current) = window.current() else {
            return Ok(None);
        };
        let Some((indent, name)) = Self::is_directive(current.text()) else {
            return Ok(None);
        };

        if indent == 0 {
            if name.starts_with('_') || name == "index" {
                // Labels and indexes belong to a following header.
                self.header_related_lines.push(current.line_number());
            }
            self.in_directive = name;
            self.last_indent_size = 0;
            self.last_indent_level = 1;
            // Split above directives.
            return Ok(Some(SplitLevel::BLOCK_LEVEL_1));
        }

        if self.shall_ignore_formatting() {
            // Do not further process directives inside special blocks.
            return Ok(None);
        }

        // Nested directive: split at the current indentation level without
        // updating the outer directive.
        let depth = u16::try_from(self.last_indent_level).unwrap_or(u16::MAX);
        SplitLevel::block(depth).map(Some)
    }

    fn handle_in_directive(&self, window: &AnalysisWindow) -> Option<SplitLevel> {
        if self.in_directive.is_empty() {
            return None;
        }
        if self.shall_ignore_formatting() {
            return Some(Self::paragraph_or_line(window));
        }
        // Keep parameter lines of a directive together.
        let is_parameter = window
            .current()
            .is_some_and(|line| line.text().trim_start().starts_with(':'));
        if is_parameter {
            return Some(SplitLevel::KEEP_LINES);
        }
        Some(Self::paragraph_or_line(window))
    }

    fn handle_headers(&mut self, window: &mut AnalysisWindow) -> Result<Option<SplitLevel>> {
        let Some((key, title)) = Self::heading_start(window) else {
            return Ok(None);
        };
        let split_level = self.level_for_style(&key)?;

        // The split belongs to the earliest of: related label lines still
        // in the window, the empty run before the heading, or the heading
        // itself.
        let current_line = window.current().map_or(0, Line::line_number);
        let mut lines: Vec<usize> = self
            .header_related_lines
            .iter()
            .copied()
            .filter(|number| window.contains_line(*number))
            .collect();
        if let Some(number) = Self::just_emptiness_before_current(window) {
            lines.push(number);
        }
        lines.push(current_line);
        let chosen = lines.into_iter().min().unwrap_or(current_line);

        self.header_related_lines.clear();
        self.in_directive.clear();

        if let Some(line) = window.line_mut(chosen) {
            line.meta.text = title;
            line.meta.source = ContextSource::Section;
            if chosen == current_line {
                return Ok(Some(split_level));
            }
            line.split_level = Some(split_level);
        }
        Ok(Some(SplitLevel::PARAGRAPH))
    }
}

impl SyntaxHandler for ReStructuredTextHandler {
    fn name(&self) -> &'static str {
        "restructuredtext"
    }

    fn accepted_suffixes(&self) -> &'static [&'static str] {
        &["rst"]
    }

    fn analyze_line(&mut self, window: &mut AnalysisWindow) -> Result<SplitLevel> {
        self.handle_indentation_levels(window);
        if let Some(level) = self.handle_directives(window)? {
            return Ok(level);
        }
        if let Some(level) = self.handle_in_directive(window) {
            return Ok(level);
        }
        if let Some(level) = self.handle_headers(window)? {
            return Ok(level);
        }
        Ok(Self::paragraph_or_line(window))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_for(texts: &[&str]) -> AnalysisWindow {
        let mut location = 0;
        let lines = texts
            .iter()
            .enumerate()
            .map(|(index, text)| {
                let line = Line::new(index + 1, location, (*text).to_string());
                location += text.len() + 1;
                Some(line)
            })
            .collect();
        AnalysisWindow::new(5, lines).unwrap()
    }

    #[test]
    fn test_underlined_heading() {
        let mut handler = ReStructuredTextHandler::new();
        let mut window = window_for(&["Introduction", "============", "", "Text."]);
        let level = handler.analyze_line(&mut window).unwrap();
        assert_eq!(level, SplitLevel::SECTION_LEVEL_1);
        assert_eq!(window.current().unwrap().meta.text, "Introduction");
        assert_eq!(
            window.get(1).unwrap().split_level,
            Some(SplitLevel::KEEP_LINES)
        );
    }

    #[test]
    fn test_overlined_heading() {
        let mut handler = ReStructuredTextHandler::new();
        let mut window = window_for(&["=====", "Title", "=====", "", "Text."]);
        let level = handler.analyze_line(&mut window).unwrap();
        assert_eq!(level, SplitLevel::SECTION_LEVEL_1);
        // The heading belongs to the adornment line; title and closing
        // adornment stay glued to it.
        assert_eq!(window.current().unwrap().meta.text, "Title");
        assert_eq!(
            window.get(1).unwrap().split_level,
            Some(SplitLevel::KEEP_LINES)
        );
        assert_eq!(
            window.get(2).unwrap().split_level,
            Some(SplitLevel::KEEP_LINES)
        );
    }

    #[test]
    fn test_adornment_styles_rank_by_first_appearance() {
        let mut handler = ReStructuredTextHandler::new();
        let mut window = window_for(&["First", "-----", ""]);
        assert_eq!(
            handler.analyze_line(&mut window).unwrap(),
            SplitLevel::SECTION_LEVEL_1
        );
        // A different adornment style gets the next level.
        let mut window = window_for(&["Second heading", "~~~~~~~~~~~~~~", ""]);
        assert_eq!(
            handler.analyze_line(&mut window).unwrap(),
            SplitLevel::SECTION_LEVEL_2
        );
        // The first style keeps its level.
        let mut window = window_for(&["Third", "-----", ""]);
        assert_eq!(
            handler.analyze_line(&mut window).unwrap(),
            SplitLevel::SECTION_LEVEL_1
        );
    }

    #[test]
    fn test_overline_is_a_distinct_style() {
        let mut handler = ReStructuredTextHandler::new();
        let mut window = window_for(&["Plain", "=====", ""]);
        assert_eq!(
            handler.analyze_line(&mut window).unwrap(),
            SplitLevel::SECTION_LEVEL_1
        );
        let mut window = window_for(&["=======", "Covered", "=======", ""]);
        assert_eq!(
            handler.analyze_line(&mut window).unwrap(),
            SplitLevel::SECTION_LEVEL_2
        );
    }

    #[test]
    fn test_short_title_is_no_heading() {
        // Underlined titles must be longer than three characters.
        let mut handler = ReStructuredTextHandler::new();
        let mut window = window_for(&["Hi", "--", "", "Text."]);
        let level = handler.analyze_line(&mut window).unwrap();
        assert_eq!(level, SplitLevel::LINE);
    }

    #[test]
    fn test_mismatched_underline_length() {
        let mut handler = ReStructuredTextHandler::new();
        let mut window = window_for(&["A long title", "----", ""]);
        assert_eq!(handler.analyze_line(&mut window).unwrap(), SplitLevel::LINE);
    }

    #[test]
    fn test_directive_starts_block() {
        let mut handler = ReStructuredTextHandler::new();
        let mut window = window_for(&[".. note::", "", "   Be careful."]);
        let level = handler.analyze_line(&mut window).unwrap();
        assert_eq!(level, SplitLevel::BLOCK_LEVEL_1);
        assert_eq!(handler.in_directive, "note");
    }

    #[test]
    fn test_directive_parameters_keep_lines() {
        let mut handler = ReStructuredTextHandler::new();
        let mut window = window_for(&[".. image:: picture.png", "   :width: 200", ""]);
        handler.analyze_line(&mut window).unwrap();
        window.push_line(None);
        let level = handler.analyze_line(&mut window).unwrap();
        assert_eq!(level, SplitLevel::KEEP_LINES);
    }

    #[test]
    fn test_code_block_content_is_not_interpreted() {
        let mut handler = ReStructuredTextHandler::new();
        let mut window = window_for(&[
            ".. code-block:: text",
            "",
            "   =====",
            "   Not a heading",
            "   =====",
        ]);
        handler.analyze_line(&mut window).unwrap();
        window.push_line(None);
        // Inside the ignored directive, parameter and adornment handling
        // is switched off.
        let level = handler.analyze_line(&mut window).unwrap();
        assert_eq!(level, SplitLevel::LINE);
    }

    #[test]
    fn test_label_before_heading_moves_split_up() {
        let mut handler = ReStructuredTextHandler::new();
        let mut window = window_for(&[".. _target::", "", "Heading here", "------------", ""]);
        // The label line opens a block and is recorded.
        assert_eq!(
            handler.analyze_line(&mut window).unwrap(),
            SplitLevel::BLOCK_LEVEL_1
        );
        window.push_line(None);
        // The empty line.
        let level = handler.analyze_line(&mut window).unwrap();
        window.get_mut(0).unwrap().split_level = Some(level);
        window.push_line(None);
        // The heading line: the split moves to the label line, the heading
        // itself becomes a paragraph.
        let level = handler.analyze_line(&mut window).unwrap();
        assert_eq!(level, SplitLevel::PARAGRAPH);
        let label_line = window.get(-2).unwrap();
        assert_eq!(label_line.split_level, Some(SplitLevel::SECTION_LEVEL_1));
        assert_eq!(label_line.meta.text, "Heading here");
    }

    #[test]
    fn test_document_title_after_leading_blanks() {
        let mut handler = ReStructuredTextHandler::new();
        let mut window = window_for(&["", "Document Title", "==============", ""]);
        // The empty first line.
        let level = handler.analyze_line(&mut window).unwrap();
        window.get_mut(0).unwrap().split_level = Some(level);
        window.push_line(None);
        // The title: the split moves up to the empty line.
        let level = handler.analyze_line(&mut window).unwrap();
        assert_eq!(level, SplitLevel::PARAGRAPH);
        let empty_line = window.get(-1).unwrap();
        assert_eq!(empty_line.split_level, Some(SplitLevel::SECTION_LEVEL_1));
        assert_eq!(empty_line.meta.text, "Document Title");
    }

    #[test]
    fn test_paragraph_after_empty_line() {
        let mut handler = ReStructuredTextHandler::new();
        let mut window = window_for(&["First.", "", "Second."]);
        handler.analyze_line(&mut window).unwrap();
        window.push_line(None);
        handler.analyze_line(&mut window).unwrap();
        window.push_line(None);
        let level = handler.analyze_line(&mut window).unwrap();
        assert_eq!(level, SplitLevel::PARAGRAPH);
    }

    #[test]
    fn test_whitespace_only_line_is_no_adornment() {
        let result = ReStructuredTextHandler::adornment_line("   ");
        assert!(!result.is_header);
        assert_eq!(result.length, 0);
    }

    #[test]
    fn test_more_than_eight_styles_become_paragraphs() {
        let mut handler = ReStructuredTextHandler::new();
        for (index, c) in "=-~^\"'`#".chars().enumerate() {
            let key = c.to_string();
            let level = handler.level_for_style(&key).unwrap();
            assert_eq!(
                level,
                SplitLevel::section(u16::try_from(index).unwrap() + 1).unwrap()
            );
        }
        assert_eq!(
            handler.level_for_style("*").unwrap(),
            SplitLevel::PARAGRAPH
        );
    }
}
