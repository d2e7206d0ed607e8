//! The syntax handler trait and its document-level driver.
//!
//! A syntax handler knows one document format. Its single required job is
//! [`analyze_line`](SyntaxHandler::analyze_line): rate the strength of the
//! boundary above the current line of an [`AnalysisWindow`]. The provided
//! driver methods turn that per-line rating into a list of split locations
//! and then into a fragment tree.

use crate::core::{AnalysisWindow, ContextInfo, Line, SplitLevel, SplitLocation};
use crate::error::Result;
use crate::io::LineSource;
use crate::tree::FragmentNode;
use std::collections::HashMap;
use std::path::Path;

/// Lines of lookbehind and lookahead passed to `analyze_line`.
pub const ANALYSIS_WINDOW_SIZE: usize = 20;

/// Converts a line leaving the analysis window into a split location.
fn split_location_for_line(line: Line) -> SplitLocation {
    let mut result = SplitLocation::new(
        line.location(),
        Some(line.line_number()),
        line.split_level.unwrap_or(SplitLevel::LINE),
    );
    if !line.meta.is_empty() {
        result.context = Some(line.meta);
    }
    result
}

/// A handler for one document syntax.
///
/// Implement [`name`](Self::name) and
/// [`accepted_suffixes`](Self::accepted_suffixes), then overwrite
/// [`analyze_line`](Self::analyze_line) for the format's structure. The
/// driver methods rarely need overwriting.
pub trait SyntaxHandler {
    /// The identifier of this syntax, as used on the command line.
    fn name(&self) -> &'static str;

    /// The file suffixes this syntax accepts, without the leading dot.
    fn accepted_suffixes(&self) -> &'static [&'static str];

    /// Tests if this handler matches the given document.
    ///
    /// The default implementation checks the file suffix against
    /// [`accepted_suffixes`](Self::accepted_suffixes) and does not inspect
    /// the contents. Overwrite this method to sniff the sample, which holds
    /// the beginning of the document.
    fn matches(&self, sample: &str, path: &Path) -> bool {
        let _ = sample;
        path.extension()
            .and_then(|suffix| suffix.to_str())
            .is_some_and(|suffix| {
                let suffix = suffix.to_ascii_lowercase();
                self.accepted_suffixes().contains(&suffix.as_str())
            })
    }

    /// Rates the boundary above the current line of the window.
    ///
    /// The handler may also assign `split_level` to other lines in the
    /// window; such lines are then skipped without calling this method. The
    /// current line is always overwritten with the returned level, so
    /// setting it inside this method has no effect.
    ///
    /// The default implementation splits at every line.
    ///
    /// # Errors
    ///
    /// Returns an error if the document nests deeper than the split-level
    /// hierarchy supports.
    fn analyze_line(&mut self, window: &mut AnalysisWindow) -> Result<SplitLevel> {
        let _ = window;
        Ok(SplitLevel::LINE)
    }

    /// Post-processes the collected split locations before the tree is
    /// built. Does nothing by default.
    fn optimize_split_locations(&mut self, split_locations: &mut Vec<SplitLocation>) {
        let _ = split_locations;
    }

    /// Parses a document line by line into split locations.
    ///
    /// Each line without an assigned split level is rated via
    /// [`analyze_line`](Self::analyze_line); a location is emitted for
    /// every line once it has left the analysis window.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or line analysis fails.
    fn parse_document(&mut self, source: &mut dyn LineSource) -> Result<Vec<SplitLocation>> {
        let mut window = source.create_initial_window(ANALYSIS_WINDOW_SIZE)?;
        let mut split_locations = Vec::new();
        while !window.is_at_end() {
            if window.current().is_some_and(|line| line.split_level.is_none()) {
                let level = self.analyze_line(&mut window)?;
                if let Some(current) = window.get_mut(0) {
                    current.split_level = Some(level);
                }
            }
            if let Some(line) = window.push_line(source.read_line()?) {
                split_locations.push(split_location_for_line(line));
            }
        }
        for line in window.pop_remaining_lines()? {
            split_locations.push(split_location_for_line(line));
        }
        Ok(split_locations)
    }

    /// Builds the fragment tree for a document.
    ///
    /// Algorithm steps:
    /// 1. Collect all split locations via [`parse_document`](Self::parse_document).
    /// 2. Map the distinct observed levels onto dense split indexes.
    /// 3. Create the initial skeleton and apply every split location.
    /// 4. Close all open fragments at the document size and propagate the
    ///    context down the tree.
    ///
    /// # Errors
    ///
    /// Returns an error if reading, analysis or tree construction fails.
    fn split_document_into_fragments(
        &mut self,
        source: &mut dyn LineSource,
    ) -> Result<FragmentNode> {
        let mut split_locations = self.parse_document(source)?;
        self.optimize_split_locations(&mut split_locations);

        let mut levels: Vec<SplitLevel> = split_locations
            .iter()
            .map(|location| location.split_level)
            .collect();
        levels.sort_unstable();
        levels.dedup();
        let split_level_map: HashMap<SplitLevel, usize> = levels
            .iter()
            .enumerate()
            .map(|(index, level)| (*level, index + 1))
            .collect();
        for location in &mut split_locations {
            location.split_index = split_level_map[&location.split_level];
        }
        // One extra level for the root node.
        let structure_levels = levels.len() + 1;

        let mut root = FragmentNode::create_skeleton(structure_levels, 0, Some(1));
        // The root node requires an empty context.
        root.context = Some(ContextInfo::new());
        for location in split_locations.iter().skip(1) {
            root.split_at_level(location, structure_levels)?;
        }
        root.set_end(source.document_size());

        // The first location marks the document start and is never split
        // on, but any context it carries belongs to the first fragment.
        if let Some(first) = split_locations.first()
            && let Some(context) = &first.context
            && !context.is_empty()
            && let Some(first_fragment) = root.node_at_mut(&[0])
        {
            first_fragment
                .context
                .get_or_insert_default()
                .merge_location_context(first.split_level, context);
        }
        root.push_context_to_sub_fragments();
        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::FileLineSource;
    use std::io::Write;
    use tempfile::NamedTempFile;

    struct EveryLine;

    impl SyntaxHandler for EveryLine {
        fn name(&self) -> &'static str {
            "every-line"
        }

        fn accepted_suffixes(&self) -> &'static [&'static str] {
            &["txt"]
        }
    }

    fn source_for(content: &str) -> FileLineSource {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        let source = FileLineSource::open(file.path()).unwrap();
        std::mem::forget(file);
        source
    }

    #[test]
    fn test_parse_document_emits_every_line() {
        let mut source = source_for("one\ntwo\nthree\n");
        let locations = EveryLine.parse_document(&mut source).unwrap();
        assert_eq!(locations.len(), 3);
        assert_eq!(locations[0].location, 0);
        assert_eq!(locations[0].line_number, Some(1));
        assert_eq!(locations[1].location, 4);
        assert_eq!(locations[2].location, 8);
        for location in &locations {
            assert_eq!(location.split_level, SplitLevel::LINE);
        }
    }

    #[test]
    fn test_parse_document_line_numbers_increase() {
        let content: String = (1..=50).map(|n| format!("line {n}\n")).collect();
        let mut source = source_for(&content);
        let locations = EveryLine.parse_document(&mut source).unwrap();
        assert_eq!(locations.len(), 50);
        for (index, location) in locations.iter().enumerate() {
            assert_eq!(location.line_number, Some(index + 1));
        }
    }

    #[test]
    fn test_fragment_tree_covers_document() {
        let mut source = source_for("one\ntwo\nthree\n");
        let size = source.document_size();
        let root = EveryLine.split_document_into_fragments(&mut source).unwrap();
        assert_eq!(root.begin(), 0);
        assert_eq!(root.end(), Some(size));
        // One line level plus the root.
        assert_eq!(root.sub_fragments().len(), 3);
        let mut expected_begin = 0;
        for child in root.sub_fragments() {
            assert_eq!(child.begin(), expected_begin);
            expected_begin = child.end().unwrap();
        }
        assert_eq!(expected_begin, size);
    }

    #[test]
    fn test_empty_document_builds_bare_root() {
        let mut source = source_for("");
        let root = EveryLine.split_document_into_fragments(&mut source).unwrap();
        assert_eq!(root.begin(), 0);
        assert_eq!(root.end(), Some(0));
        assert!(root.sub_fragments().is_empty());
    }

    #[test]
    fn test_suffix_matching() {
        let handler = EveryLine;
        assert!(handler.matches("", Path::new("notes.txt")));
        assert!(handler.matches("", Path::new("NOTES.TXT")));
        assert!(!handler.matches("", Path::new("notes.md")));
        assert!(!handler.matches("", Path::new("notes")));
    }

    #[test]
    fn test_matches_can_sniff_the_sample() {
        struct ShebangSniffer;

        impl SyntaxHandler for ShebangSniffer {
            fn name(&self) -> &'static str {
                "shebang"
            }

            fn accepted_suffixes(&self) -> &'static [&'static str] {
                &["sh"]
            }

            fn matches(&self, sample: &str, path: &Path) -> bool {
                sample.starts_with("#!/bin/sh")
                    || path
                        .extension()
                        .and_then(|suffix| suffix.to_str())
                        .is_some_and(|suffix| self.accepted_suffixes().contains(&suffix))
            }
        }

        let handler = ShebangSniffer;
        // A suffix-less script is recognized by its contents.
        assert!(handler.matches("#!/bin/sh\necho hi\n", Path::new("install")));
        assert!(handler.matches("", Path::new("install.sh")));
        assert!(!handler.matches("plain text\n", Path::new("install")));
    }
}
