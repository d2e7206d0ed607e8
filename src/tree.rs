//! The fragment tree: nested byte ranges of a document.
//!
//! Each node represents a contiguous byte range `[begin, end)` at one
//! nesting depth. An initial skeleton of open (end-less) nodes is created
//! for a full pass; every split location closes the currently open node at
//! its split index and opens a fresh nested skeleton from that point. At
//! the end all dangling ends are closed at the document size and redundant
//! single-child nesting is folded away.
//!
//! ```text
//!                      [0, 1000]     <-- root spanning the entire document
//!                      |       |
//!               [0, 500]       [500, 1000]  <-- level 1 splits
//!              |      |          |      |
//!        [0, 200]  [200, 500] [500, 700] [700, 1000]  <-- level 2 splits
//! ```

use crate::core::{ContextInfo, SplitLocation};
use crate::error::{Error, Result};

/// A node of the fragment tree.
///
/// Children are ordered, contiguous and cover the same `[begin, end)` range
/// as their parent with no gaps or overlaps.
#[derive(Debug, Clone)]
pub struct FragmentNode {
    begin: usize,
    end: Option<usize>,
    sub_fragments: Vec<FragmentNode>,
    line_number: Option<usize>,

    /// Context info for this node, shared down the tree after propagation.
    pub context: Option<ContextInfo>,

    /// The calculated size of this fragment in the caller's units, set
    /// incrementally while the splitter walks the tree.
    pub size: Option<usize>,
}

impl FragmentNode {
    /// Creates a new open fragment starting at the given position.
    #[must_use]
    pub const fn new(begin: usize, line_number: Option<usize>) -> Self {
        Self {
            begin,
            end: None,
            sub_fragments: Vec::new(),
            line_number,
            context: None,
            size: None,
        }
    }

    /// Creates an initial structure of `levels` nested open fragments, all
    /// starting at `begin`.
    #[must_use]
    pub fn create_skeleton(levels: usize, begin: usize, line_number: Option<usize>) -> Self {
        let mut node = Self::new(begin, line_number);
        for _ in 1..levels {
            let mut parent = Self::new(begin, line_number);
            parent.sub_fragments.push(node);
            node = parent;
        }
        node
    }

    /// The beginning of this fragment, as a byte offset in the document.
    #[must_use]
    pub const fn begin(&self) -> usize {
        self.begin
    }

    /// The end of this fragment, `None` while the fragment is still open.
    #[must_use]
    pub const fn end(&self) -> Option<usize> {
        self.end
    }

    /// The ordered subfragments of this node.
    #[must_use]
    pub fn sub_fragments(&self) -> &[Self] {
        &self.sub_fragments
    }

    /// The first line number covered by this fragment.
    #[must_use]
    pub const fn line_number(&self) -> Option<usize> {
        self.line_number
    }

    /// The byte span of this fragment, once its end has been set.
    #[must_use]
    pub fn size_in_bytes(&self) -> Option<usize> {
        self.end.map(|end| end - self.begin)
    }

    /// Splits the structure at the location's split index, closing the open
    /// node chain at that depth and opening a fresh skeleton as the new
    /// last child.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if the split index is zero or not
    /// below `structure_levels`, if fewer than two structure levels exist,
    /// or if the tree is missing levels to descend through (which indicates
    /// an out-of-order location list).
    pub fn split_at_level(
        &mut self,
        split_location: &SplitLocation,
        structure_levels: usize,
    ) -> Result<()> {
        if structure_levels < 2 {
            return Err(Error::invalid_state(
                "there must be more than one structure level",
            ));
        }
        if split_location.split_index == 0 {
            return Err(Error::invalid_state("the split index must not be zero"));
        }
        if split_location.split_index >= structure_levels {
            return Err(Error::invalid_state(format!(
                "cannot split at index {} with {} structure levels",
                split_location.split_index, structure_levels
            )));
        }
        let mut parent: &mut Self = self;
        for _ in 0..split_location.split_index - 1 {
            parent = parent
                .sub_fragments
                .last_mut()
                .ok_or_else(|| Error::invalid_state("there are not enough levels for the split"))?;
        }
        let node = parent
            .sub_fragments
            .last_mut()
            .ok_or_else(|| Error::invalid_state("there are not enough levels for the split"))?;
        node.set_end(split_location.location);

        let levels_to_create = structure_levels - split_location.split_index;
        let mut new_node = Self::create_skeleton(
            levels_to_create,
            split_location.location,
            split_location.line_number,
        );
        if let Some(context) = &split_location.context
            && !context.is_empty()
        {
            new_node
                .context
                .get_or_insert_default()
                .merge_location_context(split_location.split_level, context);
        }
        parent.add_node(new_node);
        Ok(())
    }

    /// Sets the end position for this fragment and all open fragments on
    /// its last-child chain.
    pub fn set_end(&mut self, position: usize) {
        let mut node = self;
        loop {
            node.end = Some(position);
            match node.sub_fragments.last_mut() {
                Some(last) => node = last,
                None => break,
            }
        }
    }

    /// Adds a subfragment.
    ///
    /// The previous last child will never be touched again by the split
    /// algorithm, so it is folded on the way.
    pub fn add_node(&mut self, node: Self) {
        if let Some(last) = self.sub_fragments.last_mut() {
            last.fold();
        }
        self.sub_fragments.push(node);
    }

    /// Removes subfragments that have no function.
    ///
    /// A node with exactly one child is redundant nesting: the child is
    /// removed and its children take its place, with the removed node's
    /// context handed down so no context information is lost. Folding an
    /// already folded tree leaves it unchanged.
    pub fn fold(&mut self) {
        while self.sub_fragments.len() == 1 {
            let mut removed = self.sub_fragments.remove(0);
            if let Some(context) = removed.context.take() {
                for fragment in &mut removed.sub_fragments {
                    match &mut fragment.context {
                        None => fragment.context = Some(context.clone()),
                        Some(own) => own.merge_parent_context(&context),
                    }
                }
            }
            self.sub_fragments = removed.sub_fragments;
        }
        for sub_fragment in &mut self.sub_fragments {
            sub_fragment.fold();
        }
    }

    /// Pushes the context of this node down to every descendant, so each
    /// node carries its full context ancestry.
    ///
    /// Children without their own context receive the parent context as-is;
    /// children with their own context merge the parent context in front of
    /// it.
    pub fn push_context_to_sub_fragments(&mut self) {
        let parent_context = self.context.clone();
        for sub_fragment in &mut self.sub_fragments {
            if let Some(context) = &parent_context {
                match &mut sub_fragment.context {
                    None => sub_fragment.context = Some(context.clone()),
                    Some(own) => own.merge_parent_context(context),
                }
            }
            sub_fragment.push_context_to_sub_fragments();
        }
    }

    /// Flattens the tree into root-to-leaf order, for analysis and tests.
    #[must_use]
    pub fn iter_nodes(&self) -> Vec<&Self> {
        let mut result = Vec::new();
        self.collect_nodes(&mut result);
        result
    }

    fn collect_nodes<'a>(&'a self, result: &mut Vec<&'a Self>) {
        result.push(self);
        for sub_fragment in &self.sub_fragments {
            sub_fragment.collect_nodes(result);
        }
    }

    /// Mutable access to the node at a child-index path from this node.
    ///
    /// An empty path addresses this node itself.
    #[must_use]
    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut Self> {
        let mut node = self;
        for &index in path {
            node = node.sub_fragments.get_mut(index)?;
        }
        Some(node)
    }

    /// Access to the node at a child-index path from this node.
    #[must_use]
    pub fn node_at(&self, path: &[usize]) -> Option<&Self> {
        let mut node = self;
        for &index in path {
            node = node.sub_fragments.get(index)?;
        }
        Some(node)
    }
}
