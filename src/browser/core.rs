//! Browser state and the request/completion plumbing.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use super::download::SaveTarget;
use super::state::ViewState;
use crate::api::{error_message, Operation, RemoteApi};
use crate::config::{BrowserConfig, ResponsePolicy};
use crate::error::{BrowseError, Result};
use crate::fs::{BreadcrumbSegment, Entry, Location, UploadFile};

/// Outcome of a dispatched request, applied back on the browser's task.
#[derive(Debug)]
pub(crate) enum Completion {
    Listing {
        generation: u64,
        location: Location,
        result: Result<Vec<Entry>>,
    },
    Breadcrumb {
        generation: u64,
        result: Result<Vec<BreadcrumbSegment>>,
    },
    Uploaded(Result<Entry>),
    FolderCreated(Result<Entry>),
    Deleted {
        id: String,
        result: Result<()>,
    },
    Downloaded {
        name: String,
        result: Result<PathBuf>,
    },
}

/// Navigation and synchronization state machine.
///
/// Requests run on spawned tasks; their outcomes come back as [`Completion`]s
/// through the channel returned by [`Browser::new`] and must be fed to
/// [`Browser::apply`] on the task that owns the browser.
pub(crate) struct Browser {
    pub(super) api: Arc<dyn RemoteApi>,
    pub(super) target: Arc<dyn SaveTarget>,
    pub(super) config: BrowserConfig,
    pub(super) view: ViewState,
    pub(super) selected_file: Option<UploadFile>,
    /// Bumped by every navigation; tags listing and breadcrumb requests
    pub(super) generation: u64,
    completions: mpsc::UnboundedSender<Completion>,
}

impl Browser {
    pub(crate) fn new(
        api: Arc<dyn RemoteApi>,
        target: Arc<dyn SaveTarget>,
        config: BrowserConfig,
    ) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let browser = Self {
            api,
            target,
            config,
            view: ViewState::default(),
            selected_file: None,
            generation: 0,
            completions: tx,
        };
        (browser, rx)
    }

    pub(crate) fn snapshot(&self) -> ViewState {
        self.view.clone()
    }

    pub(crate) fn location(&self) -> &Location {
        &self.view.location
    }

    /// Run a request on its own task and route its outcome back.
    pub(super) fn dispatch<F>(&mut self, request: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        self.view.pending_requests += 1;
        let tx = self.completions.clone();
        tokio::spawn(async move {
            // The receiver only goes away when the browser itself is dropped.
            let _ = tx.send(request.await);
        });
    }

    /// Apply a finished request to the view.
    pub(crate) fn apply(&mut self, completion: Completion) {
        self.view.pending_requests = self.view.pending_requests.saturating_sub(1);

        match completion {
            Completion::Listing {
                generation,
                location,
                result,
            } => self.on_listing(generation, location, result),
            Completion::Breadcrumb { generation, result } => {
                self.on_breadcrumb(generation, result)
            }
            Completion::Uploaded(result) => self.on_uploaded(result),
            Completion::FolderCreated(result) => self.on_folder_created(result),
            Completion::Deleted { id, result } => self.on_deleted(&id, result),
            Completion::Downloaded { name, result } => self.on_downloaded(&name, result),
        }
    }

    /// Check whether a response tagged with `generation` may update the view.
    pub(super) fn is_current(&self, generation: u64) -> bool {
        match self.config.response_policy {
            ResponsePolicy::LatestRequest => generation == self.generation,
            ResponsePolicy::LastResponse => true,
        }
    }

    /// Put a failure into the error slot.
    pub(super) fn fail(&mut self, operation: Operation, err: &BrowseError) {
        warn!("{:?} failed: {}", operation, err);
        self.view.error = Some(error_message(operation.fallback(), err));
    }
}
