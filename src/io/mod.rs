//! Document I/O: the line source abstraction, its file implementation and
//! block output.

pub mod reader;
pub mod writer;

pub use reader::{FileLineSource, LineSource, MAX_LINE_LENGTH};
pub use writer::write_blocks;
