//! Uploaded documents and the chunks cut from them

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A single uploaded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Original filename, used in error messages
    pub filename: String,
    /// Raw file bytes
    pub data: Vec<u8>,
}

impl UploadedFile {
    /// Create a new uploaded file
    pub fn new(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }
}

/// Ordered collection of files uploaded for a turn
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSet {
    files: Vec<UploadedFile>,
}

impl DocumentSet {
    /// Create a document set from files, keeping their order
    pub fn new(files: Vec<UploadedFile>) -> Self {
        Self { files }
    }

    /// Files in upload order
    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn filenames(&self) -> Vec<String> {
        self.files.iter().map(|f| f.filename.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total size of all files in bytes
    pub fn total_bytes(&self) -> usize {
        self.files.iter().map(|f| f.data.len()).sum()
    }

    /// SHA-256 over every file's name and bytes, in order.
    ///
    /// Name and data are length-prefixed so that moving bytes between
    /// adjacent fields changes the digest.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for file in &self.files {
            hasher.update((file.filename.len() as u64).to_le_bytes());
            hasher.update(file.filename.as_bytes());
            hasher.update((file.data.len() as u64).to_le_bytes());
            hasher.update(&file.data);
        }
        hex::encode(hasher.finalize())
    }
}

impl FromIterator<UploadedFile> for DocumentSet {
    fn from_iter<I: IntoIterator<Item = UploadedFile>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A bounded-length segment of the concatenated document text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Position in the chunk sequence (0-indexed)
    pub index: usize,
    /// Chunk text
    pub content: String,
}

impl Chunk {
    pub fn new(index: usize, content: String) -> Self {
        Self { index, content }
    }

    /// Length in chars
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}
