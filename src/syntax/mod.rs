//! Syntax handlers: format-aware boundary detection.
//!
//! Each handler rates the boundary above every line of a document with a
//! [`SplitLevel`](crate::core::SplitLevel), which the shared driver turns
//! into a fragment tree. New formats implement [`SyntaxHandler`] and are
//! registered in [`create_handler`].

pub mod cpp;
pub mod handler;
pub mod markdown;
pub mod plain;
pub mod python;
pub mod restructuredtext;

pub use cpp::CppHandler;
pub use handler::{ANALYSIS_WINDOW_SIZE, SyntaxHandler};
pub use markdown::MarkdownHandler;
pub use plain::PlainTextHandler;
pub use python::PythonHandler;
pub use restructuredtext::ReStructuredTextHandler;

use crate::error::{Error, Result};
use std::path::Path;

/// The identifiers of all built-in syntax handlers.
pub const AVAILABLE_SYNTAXES: [&str; 5] = ["plain", "markdown", "restructuredtext", "cpp", "python"];

/// Creates the syntax handler with the given identifier.
///
/// # Errors
///
/// Returns [`Error::Config`] for unknown identifiers.
pub fn create_handler(name: &str) -> Result<Box<dyn SyntaxHandler>> {
    match name {
        "plain" => Ok(Box::new(PlainTextHandler)),
        "markdown" => Ok(Box::new(MarkdownHandler)),
        "restructuredtext" => Ok(Box::new(ReStructuredTextHandler::new())),
        "cpp" => Ok(Box::new(CppHandler)),
        "python" => Ok(Box::new(PythonHandler::new())),
        _ => Err(Error::config(format!("unknown syntax '{name}'"))),
    }
}

/// Detects the syntax for a document.
///
/// Every handler is offered the file path and a sample from the start of
/// the document. Returns the identifier of the first matching handler, or
/// `None` if no handler accepts the document.
#[must_use]
pub fn detect_syntax(sample: &str, path: &Path) -> Option<&'static str> {
    for name in AVAILABLE_SYNTAXES {
        if let Ok(handler) = create_handler(name)
            && handler.matches(sample, path)
        {
            return Some(name);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_all_handlers() {
        for name in AVAILABLE_SYNTAXES {
            let handler = create_handler(name).unwrap();
            assert_eq!(handler.name(), name);
        }
    }

    #[test]
    fn test_unknown_syntax_is_rejected() {
        assert!(create_handler("latex").is_err());
    }

    #[test]
    fn test_detect_syntax_by_suffix() {
        assert_eq!(detect_syntax("", Path::new("README.md")), Some("markdown"));
        assert_eq!(
            detect_syntax("", Path::new("index.rst")),
            Some("restructuredtext")
        );
        assert_eq!(detect_syntax("", Path::new("main.cpp")), Some("cpp"));
        assert_eq!(detect_syntax("", Path::new("tool.py")), Some("python"));
        assert_eq!(detect_syntax("", Path::new("notes.txt")), Some("plain"));
        assert_eq!(detect_syntax("", Path::new("archive.zip")), None);
    }

    #[test]
    fn test_detection_receives_the_document_sample() {
        // The built-in handlers only look at the suffix, so a sample alone
        // never changes their answer.
        assert_eq!(detect_syntax("# Title\n\nBody.\n", Path::new("notes")), None);
        assert_eq!(
            detect_syntax("# Title\n\nBody.\n", Path::new("notes.md")),
            Some("markdown")
        );
    }
}
