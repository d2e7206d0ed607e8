//! Core value types for the document splitter.
//!
//! This module contains the domain types shared by the line source, the
//! syntax handlers, the fragment tree and the splitter: lines, split levels,
//! split locations, context breadcrumbs, the analysis window and the final
//! output block.

pub mod block;
pub mod context;
pub mod level;
pub mod line;
pub mod location;
pub mod window;

pub use block::{Block, BlockContext, BlockStatement, SectionContext};
pub use context::{ContextEntry, ContextInfo};
pub use level::SplitLevel;
pub use line::Line;
pub use location::{ContextSource, LocationContext, SplitLocation};
pub use window::AnalysisWindow;
