//! Plain text: no recognizable structure, every line is a boundary.

use crate::syntax::SyntaxHandler;

/// A syntax handler for plain text.
#[derive(Debug, Default)]
pub struct PlainTextHandler;

impl SyntaxHandler for PlainTextHandler {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn accepted_suffixes(&self) -> &'static [&'static str] {
        &["txt"]
    }
}
