//! Service error bodies and the shared error-message mapping.

use serde::{Deserialize, Serialize};

use crate::error::BrowseError;

/// JSON body the service attaches to failed responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Preferred human-readable description
    #[serde(default)]
    pub desc: Option<String>,
    /// Alternate description field
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Parse an error body, returning `None` for anything that isn't a JSON object.
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }

    /// Get the description, preferring `desc` over `message`.
    ///
    /// Blank values count as absent.
    pub fn description(&self) -> Option<&str> {
        [self.desc.as_deref(), self.message.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
    }
}

/// Operation a failure came from, each with its fallback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Path,
    Upload,
    CreateFolder,
    Delete,
    Download,
}

impl Operation {
    /// Fallback message shown when the operation fails.
    pub fn fallback(&self) -> &'static str {
        match self {
            Operation::List => "Failed to load items",
            Operation::Path => "Failed to load path",
            Operation::Upload => "Failed to upload file",
            Operation::CreateFolder => "Failed to create folder",
            Operation::Delete => "Failed to delete item",
            Operation::Download => "Failed to download file",
        }
    }
}

/// Map a failed request into the message shown to the user.
///
/// `fallback` alone, or `fallback` followed by the service description.
pub fn error_message(fallback: &str, err: &BrowseError) -> String {
    match err.description() {
        Some(desc) => format!("{} {}", fallback, desc),
        None => fallback.to_string(),
    }
}
