//! View model published to rendering.

use crate::fs::{BreadcrumbSegment, Entry, Location};

/// Listing load state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A listing fetch is outstanding
    Loading,
    /// The last applied listing succeeded
    Ready,
    /// The last applied listing failed
    Failed,
}

/// Upload state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UploadState {
    #[default]
    Idle,
    Uploading {
        file_name: String,
    },
}

/// Snapshot of everything the browser shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Folder currently browsed
    pub location: Location,
    /// Entries of the current folder, replaced wholesale per listing
    pub entries: Vec<Entry>,
    /// Path from the root to the current folder
    pub breadcrumb: Vec<BreadcrumbSegment>,
    pub listing: LoadState,
    pub upload: UploadState,
    /// Most recent error; newer errors replace older ones
    pub error: Option<String>,
    /// Name typed for the next folder to create
    pub folder_name: String,
    /// Name of the file selected for upload
    pub selected_file: Option<String>,
    /// Requests dispatched but not yet applied
    pub pending_requests: usize,
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        self.listing == LoadState::Loading
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.upload, UploadState::Uploading { .. })
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Check if no request is outstanding.
    pub fn is_settled(&self) -> bool {
        self.pending_requests == 0
    }

    /// Find a displayed entry by identifier.
    pub fn entry(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Find a displayed entry by name.
    pub fn entry_named(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Breadcrumb rendered as `Root / Docs / 2024`.
    pub fn breadcrumb_path(&self) -> String {
        self.breadcrumb
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(" / ")
    }
}
