//! Read-only access to the parts of an office-document package.
//!
//! A `.docx` file is a zip archive whose entries ("parts") are XML documents.
//! Only two of them matter here: the main content part and the optional
//! comments part. Opening the archive is the only operation that can fail;
//! reading a part degrades to `None` so callers continue with empty results.

use std::{
    fs,
    io::{Cursor, Read},
    path::Path,
};

use anyhow::{Context, Result};
use zip::{ZipArchive, result::ZipError};

/// Main content part of a word-processing package.
pub const MAIN_DOCUMENT_PART: &str = "word/document.xml";

/// Reviewer comments part. Absent when the document has no comments.
pub const COMMENTS_PART: &str = "word/comments.xml";

/// An opened document package held in memory.
pub struct DocumentPackage {
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl DocumentPackage {
    /// Open a package from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a readable zip archive.
    pub fn open(bytes: Vec<u8>) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(bytes))
            .context("Failed to open document package (not a valid zip archive)")?;
        Ok(Self { archive })
    }

    /// Read a package from disk and open it.
    pub fn open_path(path: &Path) -> Result<Self> {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
        Self::open(bytes)
    }

    /// Names of all parts in archive order.
    pub fn part_names(&self) -> Vec<String> {
        self.archive.file_names().map(String::from).collect()
    }

    /// Read a named part as UTF-8 text.
    ///
    /// Returns `None` when the part is missing, cannot be decompressed, or
    /// is not valid UTF-8.
    pub fn read_part(&mut self, name: &str) -> Option<String> {
        let mut entry = match self.archive.by_name(name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => {
                tracing::debug!(part = name, "part not present in package");
                return None;
            }
            Err(err) => {
                tracing::warn!(part = name, error = %err, "failed to open part");
                return None;
            }
        };

        let mut buf = Vec::with_capacity(entry.size() as usize);
        if let Err(err) = entry.read_to_end(&mut buf) {
            tracing::warn!(part = name, error = %err, "failed to decompress part");
            return None;
        }

        match String::from_utf8(buf) {
            Ok(text) => Some(text),
            Err(err) => {
                tracing::warn!(part = name, error = %err, "part is not valid UTF-8");
                None
            }
        }
    }
}
