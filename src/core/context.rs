//! Context information attached to fragment tree nodes.
//!
//! Context entries are the multi-level breadcrumb applicable to a fragment:
//! the chain of enclosing section titles and block statements. Entries are
//! collected bottom-up during tree construction and then pushed top-down so
//! every node carries its full ancestry.

use crate::core::{ContextSource, LocationContext, SplitLevel};

/// One entry of a node's context breadcrumb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextEntry {
    /// The split level the context was discovered at.
    pub level: SplitLevel,
    /// The origin of the context text.
    pub source: ContextSource,
    /// The context text (section title or block statement).
    pub text: String,
}

/// The ordered context breadcrumb of a fragment tree node.
///
/// Entries are deduplicated by exact `(level, source, text)` match and kept
/// in root-to-leaf order: ancestor context always precedes a node's own
/// discovered context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextInfo {
    entries: Vec<ContextEntry>,
}

impl ContextInfo {
    /// Creates an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The entries in root-to-leaf order.
    #[must_use]
    pub fn entries(&self) -> &[ContextEntry] {
        &self.entries
    }

    /// Tests if this context has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn has_entry(&self, level: SplitLevel, source: ContextSource, text: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.level == level && entry.source == source && entry.text == text)
    }

    /// Appends the context found at a split location, unless the exact
    /// `(level, source, text)` triple is already present.
    pub fn merge_location_context(&mut self, split_level: SplitLevel, context: &LocationContext) {
        if context.is_empty() {
            return;
        }
        if !self.has_entry(split_level, context.source, &context.text) {
            self.entries.push(ContextEntry {
                level: split_level,
                source: context.source,
                text: context.text.clone(),
            });
        }
    }

    /// Prepends the entries of a parent context that are not already
    /// present, preserving the parent's relative order.
    pub fn merge_parent_context(&mut self, context: &Self) {
        for entry in context.entries.iter().rev() {
            if !self.has_entry(entry.level, entry.source, &entry.text) {
                self.entries.insert(0, entry.clone());
            }
        }
    }
}
