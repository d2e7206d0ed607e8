//! A single line read from a document.

use crate::core::{LocationContext, SplitLevel};

/// One physical line with its start location, without the line terminator.
///
/// A line is created by the line source, analyzed (and possibly mutated)
/// while inside the analysis window, and discarded once it exits the window.
///
/// # Examples
///
/// ```
/// use docsplit::core::Line;
///
/// let line = Line::new(1, 0, "# Title".to_string());
/// assert!(!line.is_empty());
/// assert!(!line.is_indented());
/// ```
#[derive(Debug, Clone)]
pub struct Line {
    line_number: usize,
    location: usize,
    text: String,

    /// The split level of the boundary above this line, assigned while
    /// processing a document line by line.
    pub split_level: Option<SplitLevel>,

    /// Scratch context discovered while analyzing; becomes the split
    /// location's context when this line leaves the window.
    pub meta: LocationContext,
}

impl Line {
    /// Creates a new line.
    ///
    /// # Arguments
    ///
    /// * `line_number` - The 1-based line number.
    /// * `location` - The byte offset of the line start in the document.
    /// * `text` - The text of the line without newline characters.
    #[must_use]
    pub const fn new(line_number: usize, location: usize, text: String) -> Self {
        Self {
            line_number,
            location,
            text,
            split_level: None,
            meta: LocationContext {
                text: String::new(),
                source: crate::core::ContextSource::Section,
            },
        }
    }

    /// The 1-based line number.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.line_number
    }

    /// The byte offset of the line start in the document.
    #[must_use]
    pub const fn location(&self) -> usize {
        self.location
    }

    /// The text of the line.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Tests if this line is empty or whitespace-only.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Tests if the line starts with whitespace.
    #[must_use]
    pub fn is_indented(&self) -> bool {
        !self.is_empty() && self.text.starts_with(char::is_whitespace)
    }
}
