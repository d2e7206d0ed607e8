//! Writing split blocks to an output directory.

use crate::error::{IoError, Result};
use std::path::Path;

/// Writes block texts as numbered files into a directory.
///
/// The directory is created if it does not exist. Files are named
/// `{prefix}_{index:04}.txt` and returned in order.
///
/// # Errors
///
/// Returns an [`IoError`] if the directory cannot be created or a file
/// cannot be written.
pub fn write_blocks<'a, P, I>(out_dir: P, blocks: I, prefix: &str) -> Result<Vec<String>>
where
    P: AsRef<Path>,
    I: Iterator<Item = (usize, &'a str)>,
{
    let out_path = out_dir.as_ref();
    let out_str = out_path.to_string_lossy().to_string();

    if !out_path.exists() {
        std::fs::create_dir_all(out_path).map_err(|e| IoError::DirectoryFailed {
            path: out_str.clone(),
            reason: e.to_string(),
        })?;
    }

    let mut paths = Vec::new();
    for (index, content) in blocks {
        let filename = format!("{prefix}_{index:04}.txt");
        let file_path = out_path.join(&filename);
        let file_str = file_path.to_string_lossy().to_string();

        std::fs::write(&file_path, content).map_err(|e| IoError::WriteFailed {
            path: file_str.clone(),
            reason: e.to_string(),
        })?;
        paths.push(file_str);
    }
    Ok(paths)
}
