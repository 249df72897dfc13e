//! Upload payloads.

use std::fmt;
use std::path::Path;

use crate::error::{BrowseError, Result};

/// A file selected for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// File name sent with the multipart part
    pub file_name: String,
    /// Media type, if known
    pub mime_type: Option<String>,
    /// File contents
    pub data: Vec<u8>,
}

impl UploadFile {
    /// Create a payload from bytes already in memory.
    pub fn from_bytes(file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: None,
            data: data.into(),
        }
    }

    /// Read a local file into a payload named after its final path component.
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| BrowseError::Custom(format!("Invalid file name: {}", path.display())))?
            .to_string();
        let data = tokio::fs::read(path).await?;
        Ok(Self::from_bytes(file_name, data))
    }

    /// Set the media type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// File contents are left out of debug output.
impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}
