//! Markdown: hash headings, setext underlines and paragraphs.

use crate::core::{AnalysisWindow, ContextSource, Line, SplitLevel};
use crate::error::Result;
use crate::syntax::SyntaxHandler;

/// A syntax handler for Markdown text.
#[derive(Debug, Default)]
pub struct MarkdownHandler;

impl MarkdownHandler {
    /// Tests if the line is an ATX heading, returning its section level.
    ///
    /// Up to 8 `#` characters are accepted; the heading needs text after
    /// the marker to count as a title.
    fn is_hash_header(line: &Line) -> Option<SplitLevel> {
        let text: Vec<char> = line.text().chars().collect();
        if text.first() != Some(&'#') {
            return None;
        }
        let mut found_level = None;
        for level in 1..9usize {
            if text.len() <= level {
                return None;
            }
            if text[level] == '#' {
                continue;
            }
            if text[level].is_whitespace() {
                found_level = Some(level);
                break;
            }
        }
        let level = found_level?;
        if text[level + 1..].iter().all(|c| c.is_whitespace()) {
            return None;
        }
        SplitLevel::section(u16::try_from(level).ok()?).ok()
    }

    /// Tests if the line is a setext title underline.
    ///
    /// A line of `=` characters marks a level-1 section, a line of `-`
    /// characters a level-2 section. Trailing whitespace is accepted.
    fn is_title_underline(line: &Line) -> Option<SplitLevel> {
        let text = line.text();
        let first = text.chars().next()?;
        if first != '-' && first != '=' {
            return None;
        }
        let trimmed = text.trim_end();
        if trimmed.chars().any(|c| c != first) {
            return None;
        }
        if first == '=' {
            Some(SplitLevel::SECTION_LEVEL_1)
        } else {
            Some(SplitLevel::SECTION_LEVEL_2)
        }
    }

    fn title_text(line: &Line) -> String {
        line.text().trim_matches([' ', '\t', '#']).to_string()
    }
}

impl SyntaxHandler for MarkdownHandler {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn accepted_suffixes(&self) -> &'static [&'static str] {
        &["md", "markdown"]
    }

    fn analyze_line(&mut self, window: &mut AnalysisWindow) -> Result<SplitLevel> {
        // Split at hash headings.
        let hash_level = window.current().and_then(Self::is_hash_header);
        if let Some(level) = hash_level {
            if let Some(current) = window.get_mut(0) {
                current.meta.text = Self::title_text(current);
                current.meta.source = ContextSource::Section;
            }
            return Ok(level);
        }

        // Split at setext headings: a title line followed by an underline.
        let underline_level = match window.current() {
            Some(current) if !current.is_empty() => {
                window.get(1).and_then(Self::is_title_underline)
            }
            _ => None,
        };
        if let Some(level) = underline_level {
            if let Some(current) = window.get_mut(0) {
                current.meta.text = Self::title_text(current);
                current.meta.source = ContextSource::Section;
            }
            // Make sure the title and its underline are never split.
            if let Some(next) = window.get_mut(1) {
                next.split_level = Some(SplitLevel::KEEP_LINES);
            }
            return Ok(level);
        }

        // Split at paragraphs.
        let after_empty_line = window
            .current()
            .is_some_and(|current| !current.is_indented())
            && window.get(-1).is_some_and(Line::is_empty);
        if after_empty_line {
            return Ok(SplitLevel::PARAGRAPH);
        }
        Ok(SplitLevel::LINE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn window_for(texts: &[&str]) -> AnalysisWindow {
        let lines = texts
            .iter()
            .enumerate()
            .map(|(index, text)| Some(Line::new(index + 1, index * 80, (*text).to_string())))
            .collect();
        AnalysisWindow::new(5, lines).unwrap()
    }

    fn analyze(texts: &[&str]) -> SplitLevel {
        let mut window = window_for(texts);
        MarkdownHandler.analyze_line(&mut window).unwrap()
    }

    /// Advances the window so that the line at `current` becomes offset 0.
    fn analyze_at(texts: &[&str], current: usize) -> SplitLevel {
        let lines: Vec<Option<Line>> = texts
            .iter()
            .enumerate()
            .map(|(index, text)| Some(Line::new(index + 1, index * 80, (*text).to_string())))
            .collect();
        let mut window = AnalysisWindow::new(5, lines.iter().take(6).cloned().collect()).unwrap();
        let mut feed = lines.into_iter().skip(6);
        for _ in 0..current {
            window.push_line(feed.next().flatten());
        }
        MarkdownHandler.analyze_line(&mut window).unwrap()
    }

    #[test_case("# Title", 1)]
    #[test_case("## Subtitle", 2)]
    #[test_case("###### Deep", 6)]
    #[test_case("######## Deepest", 8)]
    fn test_hash_headers(text: &str, depth: u16) {
        assert_eq!(analyze(&[text]), SplitLevel::section(depth).unwrap());
    }

    #[test_case("#NoSpaceAtAll"; "missing space after marker")]
    #[test_case("#"; "marker only")]
    #[test_case("##   "; "no title text")]
    #[test_case("######### Too deep"; "nine markers")]
    fn test_rejected_hash_headers(text: &str) {
        assert_eq!(analyze(&[text]), SplitLevel::LINE);
    }

    #[test]
    fn test_hash_header_scan_passes_over_other_characters() {
        // The marker scan only stops at whitespace, so a stray character
        // after the hashes shifts the detected depth instead of rejecting
        // the heading.
        assert_eq!(analyze(&["#x y"]), SplitLevel::SECTION_LEVEL_2);
    }

    #[test]
    fn test_hash_header_sets_title_context() {
        let mut window = window_for(&["##  Getting Started ##"]);
        MarkdownHandler.analyze_line(&mut window).unwrap();
        let meta = &window.current().unwrap().meta;
        assert_eq!(meta.text, "Getting Started");
        assert_eq!(meta.source, ContextSource::Section);
    }

    #[test]
    fn test_setext_heading_level_1() {
        let mut window = window_for(&["Title", "=====", "", "Text."]);
        let level = MarkdownHandler.analyze_line(&mut window).unwrap();
        assert_eq!(level, SplitLevel::SECTION_LEVEL_1);
        assert_eq!(window.current().unwrap().meta.text, "Title");
        // The underline stays glued to its title.
        assert_eq!(
            window.get(1).unwrap().split_level,
            Some(SplitLevel::KEEP_LINES)
        );
    }

    #[test]
    fn test_setext_heading_level_2() {
        assert_eq!(
            analyze(&["Subtitle", "---  ", "", "Text."]),
            SplitLevel::SECTION_LEVEL_2
        );
    }

    #[test_case(&["Title", "=-=-="]; "mixed underline characters")]
    #[test_case(&["", "====="]; "empty title line")]
    #[test_case(&["Title", "*****"]; "wrong underline character")]
    fn test_rejected_setext_headings(texts: &[&str]) {
        assert_ne!(analyze(texts), SplitLevel::SECTION_LEVEL_1);
        assert_ne!(analyze(texts), SplitLevel::SECTION_LEVEL_2);
    }

    #[test]
    fn test_paragraph_after_empty_line() {
        let level = analyze_at(&["First paragraph.", "", "Second paragraph."], 2);
        assert_eq!(level, SplitLevel::PARAGRAPH);
    }

    #[test]
    fn test_indented_line_is_no_paragraph() {
        let level = analyze_at(&["Text.", "", "    code block"], 2);
        assert_eq!(level, SplitLevel::LINE);
    }

    #[test]
    fn test_first_line_is_a_line() {
        assert_eq!(analyze(&["Just text."]), SplitLevel::LINE);
    }
}
