//! The split-level hierarchy.
//!
//! Split levels rank the relative strength of a boundary between two lines,
//! from the coarsest `PART` down to the finest units. Syntax handlers only
//! use the levels their format actually supports; the only requirement is
//! that the relative order between used levels is monotonic with nesting
//! depth.

use crate::error::{Error, Result};

const SECTION_BASE: u16 = 300;
const BLOCK_BASE: u16 = 400;

/// The granularity rank of a split boundary.
///
/// Smaller ranks mean coarser granularity. `LINE` and `SENTENCE` share a
/// rank, as do `KEEP_LINES` and `WORD`: a handler must pick either the
/// line-oriented family (`LINE`, `KEEP_LINES`) or the prose-oriented family
/// (`SENTENCE`, `WORD`) and never mix them within one document.
///
/// # Examples
///
/// ```
/// use docsplit::core::SplitLevel;
///
/// assert!(SplitLevel::CHAPTER < SplitLevel::PARAGRAPH);
/// let section = SplitLevel::section(3).unwrap();
/// assert_eq!(section.name(), "section_level_3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SplitLevel(u16);

impl SplitLevel {
    /// The largest possible block of a document.
    pub const PART: Self = Self(101);

    /// A chapter.
    pub const CHAPTER: Self = Self(201);

    /// The coarsest section level. Deeper sections via [`Self::section`].
    pub const SECTION_LEVEL_1: Self = Self(SECTION_BASE + 1);

    /// The second section level.
    pub const SECTION_LEVEL_2: Self = Self(SECTION_BASE + 2);

    /// The coarsest block level. Deeper blocks via [`Self::block`].
    pub const BLOCK_LEVEL_1: Self = Self(BLOCK_BASE + 1);

    /// The second block level.
    pub const BLOCK_LEVEL_2: Self = Self(BLOCK_BASE + 2);

    /// A paragraph: a block of text consisting of one or more sentences.
    pub const PARAGRAPH: Self = Self(501);

    /// A line of text.
    pub const LINE: Self = Self(601);

    /// A single sentence in a paragraph. Shares the rank of [`Self::LINE`].
    pub const SENTENCE: Self = Self(601);

    /// A boundary between two lines that should be kept together.
    pub const KEEP_LINES: Self = Self(701);

    /// A single word. Shares the rank of [`Self::KEEP_LINES`].
    pub const WORD: Self = Self(701);

    /// Returns the section level at the given depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `depth` is outside `1..=8`.
    pub fn section(depth: u16) -> Result<Self> {
        if !(1..=8).contains(&depth) {
            return Err(Error::config(format!(
                "there is no section with level {depth}"
            )));
        }
        Ok(Self(SECTION_BASE + depth))
    }

    /// Returns the block level at the given depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `depth` is outside `1..=8`.
    pub fn block(depth: u16) -> Result<Self> {
        if !(1..=8).contains(&depth) {
            return Err(Error::config(format!(
                "there is no block with level {depth}"
            )));
        }
        Ok(Self(BLOCK_BASE + depth))
    }

    /// Returns the section depth if this is a section level.
    #[must_use]
    pub const fn section_depth(&self) -> Option<u16> {
        if self.0 > SECTION_BASE && self.0 <= SECTION_BASE + 8 {
            Some(self.0 - SECTION_BASE)
        } else {
            None
        }
    }

    /// Returns the block depth if this is a block level.
    #[must_use]
    pub const fn block_depth(&self) -> Option<u16> {
        if self.0 > BLOCK_BASE && self.0 <= BLOCK_BASE + 8 {
            Some(self.0 - BLOCK_BASE)
        } else {
            None
        }
    }

    /// The canonical lower-case name of this level.
    ///
    /// Aliased ranks resolve to the name of the primary family member:
    /// rank 601 is `line` and rank 701 is `keep_lines`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self.0 {
            101 => "part",
            201 => "chapter",
            301 => "section_level_1",
            302 => "section_level_2",
            303 => "section_level_3",
            304 => "section_level_4",
            305 => "section_level_5",
            306 => "section_level_6",
            307 => "section_level_7",
            308 => "section_level_8",
            401 => "block_level_1",
            402 => "block_level_2",
            403 => "block_level_3",
            404 => "block_level_4",
            405 => "block_level_5",
            406 => "block_level_6",
            407 => "block_level_7",
            408 => "block_level_8",
            501 => "paragraph",
            601 => "line",
            701 => "keep_lines",
            _ => "unknown",
        }
    }

    /// The raw numeric rank, for debugging and ordering inspection.
    #[must_use]
    pub const fn rank(&self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for SplitLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
