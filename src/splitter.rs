//! The size-bounded merge engine.
//!
//! The splitter walks the fragment tree and greedily merges adjacent
//! fragments into blocks between a soft minimum and a hard maximum size.
//! Fragments larger than the read limit are never loaded whole; the walk
//! descends into their subfragments instead, so memory use stays bounded
//! by the read limit regardless of document size.

use crate::core::{Block, BlockContext, ContextInfo};
use crate::error::{Error, Result, SplitterError};
use crate::io::LineSource;
use crate::sizing::{MAX_READ_BLOCK_SIZE, SizeCalculator};
use crate::syntax::SyntaxHandler;
use crate::tree::FragmentNode;

/// Replaces Windows and old Mac newlines with `\n`.
fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// One pending step of the tree walk. Nodes are addressed by their
/// child-index path from the root, so the tree itself stays borrowable.
enum Frame {
    /// Look at a node, either reading its data or descending.
    Visit(Vec<usize>),
    /// A node whose data has been read; merge or descend.
    Read { path: Vec<usize>, data: Vec<u8> },
    /// A node revisited directly after a block was emitted for it.
    Retry {
        path: Vec<usize>,
        data: Vec<u8>,
        text: String,
        size: usize,
    },
}

/// The block being accumulated.
#[derive(Default)]
struct BlockBuilder {
    text: String,
    size: usize,
    line_number: Option<usize>,
    /// The context of the node that started this block.
    start_context: Option<ContextInfo>,
}

/// Splits a document into size-bounded blocks.
///
/// The splitter is an iterator over [`Block`] results. Iteration stops
/// after the first error.
///
/// # Examples
///
/// ```no_run
/// use docsplit::io::FileLineSource;
/// use docsplit::sizing::CharSizeCalculator;
/// use docsplit::splitter::Splitter;
/// use docsplit::syntax::MarkdownHandler;
///
/// let mut source = FileLineSource::open("document.md").unwrap();
/// let mut syntax = MarkdownHandler;
/// let calculator = CharSizeCalculator;
/// let splitter =
///     Splitter::new(&mut source, &mut syntax, &calculator, 100, 2000).unwrap();
/// for block in splitter {
///     let block = block.unwrap();
///     println!("line {:?}: {} characters", block.line_number, block.size);
/// }
/// ```
pub struct Splitter<'a> {
    source: &'a mut dyn LineSource,
    calculator: &'a dyn SizeCalculator,
    minimum_block_size: usize,
    maximum_block_size: usize,
    /// The maximum size of a data block that is read from the document.
    maximum_read_size: usize,
    root: FragmentNode,
    stack: Vec<Frame>,
    current: BlockBuilder,
    finished: bool,
}

impl<'a> Splitter<'a> {
    /// Creates a new splitter.
    ///
    /// The document is analyzed up front to build the fragment tree; the
    /// blocks themselves are produced lazily during iteration.
    ///
    /// # Arguments
    ///
    /// * `source` - The line source to supply the document.
    /// * `syntax` - The syntax handler for the document format.
    /// * `calculator` - The size calculator for the chosen unit.
    /// * `minimum_size` - The minimum size of a block (soft limit).
    /// * `maximum_size` - The maximum size of a block (hard limit).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `minimum_size > maximum_size`, or any
    /// error from reading and analyzing the document.
    pub fn new(
        source: &'a mut dyn LineSource,
        syntax: &mut dyn SyntaxHandler,
        calculator: &'a dyn SizeCalculator,
        minimum_size: usize,
        maximum_size: usize,
    ) -> Result<Self> {
        if minimum_size > maximum_size {
            return Err(Error::config(format!(
                "the minimum block size ({minimum_size}) must not exceed \
                 the maximum block size ({maximum_size})"
            )));
        }
        let mut root = syntax.split_document_into_fragments(source)?;
        // Remove any redundant nodes left.
        root.fold();
        let maximum_read_size = calculator.maximum_block_size().min(MAX_READ_BLOCK_SIZE);
        Ok(Self {
            source,
            calculator,
            minimum_block_size: minimum_size,
            maximum_block_size: maximum_size,
            maximum_read_size,
            root,
            stack: vec![Frame::Visit(Vec::new())],
            current: BlockBuilder::default(),
            finished: false,
        })
    }

    /// Finishes the accumulated block and resets the builder.
    fn take_block(&mut self) -> Block {
        let builder = std::mem::take(&mut self.current);
        let context = builder
            .start_context
            .map(|info| BlockContext::from_context_info(&info))
            .unwrap_or_default();
        Block {
            text: builder.text,
            size: builder.size,
            line_number: builder.line_number,
            context,
        }
    }

    /// Appends a fully measured node to the accumulated block.
    fn append(&mut self, path: &[usize], text: &str, size: usize) -> Result<()> {
        let node = self
            .root
            .node_at(path)
            .ok_or_else(|| Error::invalid_state("fragment path out of range"))?;
        if self.current.line_number.is_none() {
            self.current.line_number = node.line_number();
        }
        if self.current.start_context.is_none() {
            self.current.start_context = Some(node.context.clone().unwrap_or_default());
        }
        self.current.text.push_str(text);
        self.current.size += size;
        Ok(())
    }

    /// Reads a node's data or, if it exceeds the read limit, schedules its
    /// subfragments.
    fn visit(&mut self, path: Vec<usize>) -> Result<()> {
        let (begin, span, child_count) = {
            let node = self
                .root
                .node_at(&path)
                .ok_or_else(|| Error::invalid_state("fragment path out of range"))?;
            let span = node
                .size_in_bytes()
                .ok_or_else(|| Error::invalid_state("open fragment in a finished tree"))?;
            (node.begin(), span, node.sub_fragments().len())
        };
        if span > self.maximum_read_size {
            if child_count == 0 {
                return Err(SplitterError::FragmentTooLargeForRead {
                    size: span,
                    limit: self.maximum_read_size,
                }
                .into());
            }
            for index in (0..child_count).rev() {
                let mut child_path = path.clone();
                child_path.push(index);
                self.stack.push(Frame::Visit(child_path));
            }
            return Ok(());
        }
        let data = self.source.read_block(begin, span)?;
        self.stack.push(Frame::Read { path, data });
        Ok(())
    }

    /// Schedules the subfragments of a node whose data is already in
    /// memory, slicing the data by the children's byte ranges.
    fn descend(&mut self, path: &[usize], data: &[u8], size: usize) -> Result<()> {
        let node = self
            .root
            .node_at(path)
            .ok_or_else(|| Error::invalid_state("fragment path out of range"))?;
        if node.sub_fragments().is_empty() {
            return Err(SplitterError::FragmentTooLargeForBlock {
                size,
                maximum: self.maximum_block_size,
            }
            .into());
        }
        let begin = node.begin();
        let mut frames = Vec::with_capacity(node.sub_fragments().len());
        for (index, child) in node.sub_fragments().iter().enumerate() {
            let start = child.begin() - begin;
            let end = child
                .end()
                .ok_or_else(|| Error::invalid_state("open fragment in a finished tree"))?
                - begin;
            let mut child_path = path.to_vec();
            child_path.push(index);
            frames.push(Frame::Read {
                path: child_path,
                data: data[start..end].to_vec(),
            });
        }
        while let Some(frame) = frames.pop() {
            self.stack.push(frame);
        }
        Ok(())
    }

    /// Measures a node whose data is in memory, then merges it into the
    /// accumulated block, emits the block, or descends.
    fn read(&mut self, path: Vec<usize>, data: Vec<u8>) -> Result<Option<Block>> {
        let text = normalize_newlines(&String::from_utf8_lossy(&data));
        let size = self.calculator.size_for_text(&text);
        if let Some(node) = self.root.node_at_mut(&path) {
            node.size = Some(size);
        }
        if self.current.size + size <= self.maximum_block_size {
            // The whole node fits into the block.
            self.append(&path, &text, size)?;
            return Ok(None);
        }
        // Before descending into smaller fragments, check if the block is
        // already large enough. Without this check, blocks would span over
        // high-level split points.
        if self.current.size > 0 && self.current.size >= self.minimum_block_size {
            let block = self.take_block();
            self.stack.push(Frame::Retry {
                path,
                data,
                text,
                size,
            });
            return Ok(Some(block));
        }
        // The node does not fit, and the block is too small to emit. Split
        // the text into the next smaller unit.
        self.descend(&path, &data, size)?;
        Ok(None)
    }

    /// Handles a node directly after a block was emitted for it: into the
    /// now-empty block if it fits, otherwise descend.
    fn retry(
        &mut self,
        path: Vec<usize>,
        data: Vec<u8>,
        text: String,
        size: usize,
    ) -> Result<()> {
        if size <= self.maximum_block_size {
            self.append(&path, &text, size)?;
            return Ok(());
        }
        self.descend(&path, &data, size)
    }
}

impl Iterator for Splitter<'_> {
    type Item = Result<Block>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            let Some(frame) = self.stack.pop() else {
                self.finished = true;
                if self.current.size > 0 {
                    return Some(Ok(self.take_block()));
                }
                return None;
            };
            let produced = match frame {
                Frame::Visit(path) => self.visit(path).map(|()| None),
                Frame::Read { path, data } => self.read(path, data),
                Frame::Retry {
                    path,
                    data,
                    text,
                    size,
                } => self.retry(path, data, text, size).map(|()| None),
            };
            match produced {
                Ok(Some(block)) => return Some(Ok(block)),
                Ok(None) => {}
                Err(error) => {
                    self.finished = true;
                    return Some(Err(error));
                }
            }
        }
    }
}
