//! # docsplit
//!
//! Syntax-aware document splitting into size-bounded text blocks.
//!
//! docsplit reads a document line by line, analyzes its structure with a
//! format-specific syntax handler, builds a tree of nested text fragments
//! and then merges adjacent fragments into blocks between a soft minimum
//! and a hard maximum size. Each block carries a breadcrumb of the section
//! titles and block statements enclosing its first fragment.
//!
//! ## Features
//!
//! - **Streaming**: documents are never held in memory as a whole
//! - **Syntax aware**: Markdown, reStructuredText, Python, C/C++ and
//!   plain text handlers, extensible via the [`syntax::SyntaxHandler`] trait
//! - **Unit agnostic**: block sizes in bytes, characters, words, lines or
//!   approximate tokens, extensible via the [`sizing::SizeCalculator`] trait
//!
//! ## Example
//!
//! ```no_run
//! use docsplit::io::FileLineSource;
//! use docsplit::sizing::TokenSizeCalculator;
//! use docsplit::splitter::Splitter;
//! use docsplit::syntax::MarkdownHandler;
//!
//! fn main() -> docsplit::Result<()> {
//!     let mut source = FileLineSource::open("manual.md")?;
//!     let mut syntax = MarkdownHandler;
//!     let calculator = TokenSizeCalculator;
//!     let splitter = Splitter::new(&mut source, &mut syntax, &calculator, 200, 2000)?;
//!     for block in splitter {
//!         let block = block?;
//!         println!("{} tokens from line {:?}", block.size, block.line_number);
//!     }
//!     Ok(())
//! }
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod core;
pub mod error;
pub mod io;
pub mod sizing;
pub mod splitter;
pub mod syntax;
pub mod tree;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use crate::core::{Block, BlockContext, ContextInfo, Line, SplitLevel};

// Re-export the splitter and its collaborators
pub use io::{FileLineSource, LineSource};
pub use sizing::{SizeCalculator, create_size_calculator};
pub use splitter::Splitter;
pub use syntax::{SyntaxHandler, create_handler, detect_syntax};
pub use tree::FragmentNode;

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
