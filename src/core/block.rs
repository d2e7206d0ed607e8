//! The block: the unit of output produced by the splitter.

use crate::core::{ContextInfo, ContextSource};
use serde::Serialize;

/// A section entry in a block's context dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionContext {
    /// The plain-text title of the section.
    pub title: String,
    /// The lower-case split level name, e.g. `section_level_1`.
    pub level: String,
}

/// A block statement entry in a block's context dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockStatement {
    /// The simplified statement that groups the following lines.
    pub statement: String,
    /// The lower-case split level name, e.g. `block_level_2`.
    pub level: String,
}

/// The context dictionary attached to an emitted block, split into the
/// enclosing sections and block statements in root-to-leaf order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlockContext {
    /// The chain of enclosing section titles.
    pub sections: Vec<SectionContext>,
    /// The chain of enclosing block statements.
    pub blocks: Vec<BlockStatement>,
}

impl BlockContext {
    /// Builds a block context from a tree node's context info.
    #[must_use]
    pub fn from_context_info(context: &ContextInfo) -> Self {
        let mut result = Self::default();
        for entry in context.entries() {
            match entry.source {
                ContextSource::Section => result.sections.push(SectionContext {
                    title: entry.text.clone(),
                    level: entry.level.name().to_string(),
                }),
                ContextSource::Block => result.blocks.push(BlockStatement {
                    statement: entry.text.clone(),
                    level: entry.level.name().to_string(),
                }),
            }
        }
        result
    }
}

/// A size-bounded block of text created by the splitter.
///
/// Blocks are built incrementally while walking the fragment tree and
/// emitted whenever accumulation cannot continue. The concatenation of all
/// block texts, in order, reproduces the document after newline
/// normalization.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Block {
    /// The text of the block.
    pub text: String,
    /// The size of the block in the size calculator's units.
    pub size: usize,
    /// The first line number covered by this block.
    pub line_number: Option<usize>,
    /// The collected context data for this block.
    pub context: BlockContext,
}
