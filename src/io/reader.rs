//! Line-oriented document reading.
//!
//! A [`LineSource`] streams a document as positioned lines and additionally
//! supports random-access byte reads, so the splitter can re-read fragment
//! ranges without ever holding the whole document in memory.

use crate::core::{AnalysisWindow, Line};
use crate::error::{IoError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Maximum buffered length of a single line in bytes. Longer lines are
/// clipped and continue on the next read.
pub const MAX_LINE_LENGTH: usize = 100_000;

/// A source that reads a document line by line.
///
/// Sequential [`read_line`](Self::read_line) calls and random-access
/// [`read_block`](Self::read_block) calls share one cursor: after a block
/// read, line reading continues at the position after the block.
pub trait LineSource {
    /// Reads a single line from the document.
    ///
    /// Lines are returned without newline characters; undecodable bytes are
    /// replaced, never fatal. Returns `None` at the end of the document.
    fn read_line(&mut self) -> Result<Option<Line>>;

    /// Reads a block of data from the document.
    ///
    /// This moves the shared cursor: subsequent `read_line` calls continue
    /// after the read block.
    ///
    /// # Arguments
    ///
    /// * `position` - The start position in bytes.
    /// * `size` - The size to read in bytes.
    fn read_block(&mut self, position: usize, size: usize) -> Result<Vec<u8>>;

    /// The size of the document in bytes.
    ///
    /// This is the byte position after the last byte of the document and is
    /// used to close the final fragment.
    fn document_size(&self) -> usize;

    /// Creates the initial analysis window for the given window size.
    ///
    /// Reads `window_size + 1` lines to seed the window; short documents
    /// are padded with end-of-document markers.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the window size is invalid.
    fn create_initial_window(&mut self, window_size: usize) -> Result<AnalysisWindow> {
        let mut lines = Vec::with_capacity(window_size + 1);
        for _ in 0..=window_size {
            lines.push(self.read_line()?);
        }
        AnalysisWindow::new(window_size, lines)
    }
}

/// A [`LineSource`] reading from a file on disk.
///
/// # Examples
///
/// ```no_run
/// use docsplit::io::{FileLineSource, LineSource};
///
/// let mut source = FileLineSource::open("document.md").unwrap();
/// while let Some(line) = source.read_line().unwrap() {
///     println!("{}: {}", line.line_number(), line.text());
/// }
/// ```
#[derive(Debug)]
pub struct FileLineSource {
    reader: BufReader<File>,
    position: usize,
    line_number: usize,
    size: usize,
}

impl FileLineSource {
    /// Opens a file for line-oriented reading.
    ///
    /// # Errors
    ///
    /// Opening an unreadable or non-seekable file is fatal and returns an
    /// [`IoError`] immediately.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_string_lossy().to_string();

        if !path_ref.exists() {
            return Err(IoError::FileNotFound { path: path_str }.into());
        }
        let file = File::open(path_ref).map_err(|e| IoError::OpenFailed {
            path: path_str.clone(),
            reason: e.to_string(),
        })?;
        let metadata = file.metadata().map_err(|e| IoError::OpenFailed {
            path: path_str.clone(),
            reason: e.to_string(),
        })?;
        let size = usize::try_from(metadata.len()).map_err(|_| IoError::OpenFailed {
            path: path_str.clone(),
            reason: "file too large for this platform".to_string(),
        })?;

        let mut reader = BufReader::new(file);
        if reader.seek(SeekFrom::Current(0)).is_err() {
            return Err(IoError::NotSeekable { path: path_str }.into());
        }

        Ok(Self {
            reader,
            position: 0,
            line_number: 1,
            size,
        })
    }
}

impl LineSource for FileLineSource {
    fn read_line(&mut self) -> Result<Option<Line>> {
        let location = self.position;
        let mut buffer = Vec::new();
        let read = (&mut self.reader)
            .take(MAX_LINE_LENGTH as u64)
            .read_until(b'\n', &mut buffer)?;
        if read == 0 {
            return Ok(None);
        }
        self.position += read;
        let text = String::from_utf8_lossy(&buffer)
            .trim_matches(['\r', '\n'])
            .to_string();
        let line = Line::new(self.line_number, location, text);
        self.line_number += 1;
        Ok(Some(line))
    }

    fn read_block(&mut self, position: usize, size: usize) -> Result<Vec<u8>> {
        self.reader.seek(SeekFrom::Start(position as u64))?;
        let mut data = Vec::with_capacity(size);
        (&mut self.reader)
            .take(size as u64)
            .read_to_end(&mut data)?;
        self.position = position + data.len();
        Ok(data)
    }

    fn document_size(&self) -> usize {
        self.size
    }
}
