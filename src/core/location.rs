//! Split locations and their attached context.
//!
//! A split location is one boundary candidate found while analyzing a
//! document: its byte position, originating line, assigned split level and
//! optional short context text (a section title or block statement).

use crate::core::SplitLevel;
use serde::Serialize;

/// The origin of a piece of context text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextSource {
    /// A section in a document or book. The text is the plain title of the
    /// section.
    #[default]
    Section,
    /// A statement that groups further lines of text or code. The text is
    /// the simplified statement.
    Block,
}

impl ContextSource {
    /// The lower-case string form used in block context dictionaries.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Section => "section",
            Self::Block => "block",
        }
    }
}

/// Short context discovered at a split location.
///
/// Only attach context to high-level elements like sections and blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationContext {
    /// The text for the context.
    pub text: String,
    /// The source for the context text.
    pub source: ContextSource,
}

impl LocationContext {
    /// Tests if no context text has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A split location in a document.
#[derive(Debug, Clone)]
pub struct SplitLocation {
    /// The byte location in the read document.
    pub location: usize,
    /// The line number in the read document.
    pub line_number: Option<usize>,
    /// The split level of the boundary above the originating line.
    pub split_level: SplitLevel,
    /// Context discovered at this split location.
    pub context: Option<LocationContext>,
    /// The dense rank among the distinct levels observed in the document,
    /// assigned after a full pass. Zero means "not yet assigned".
    pub split_index: usize,
}

impl SplitLocation {
    /// Creates a new split location without context.
    #[must_use]
    pub const fn new(
        location: usize,
        line_number: Option<usize>,
        split_level: SplitLevel,
    ) -> Self {
        Self {
            location,
            line_number,
            split_level,
            context: None,
            split_index: 0,
        }
    }
}
