//! Actor that runs the browser on a single task.
//!
//! User commands and request completions are interleaved on one task, so the
//! view is never touched concurrently.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::debug;

use super::core::{Browser, Completion};
use super::download::{DirectoryTarget, SaveTarget};
use super::state::ViewState;
use crate::api::{ApiClient, RemoteApi};
use crate::config::{BrowserConfig, ClientConfig};
use crate::error::{BrowseError, Result};
use crate::fs::{BreadcrumbSegment, Entry, Location, UploadFile};

type Reply = oneshot::Sender<ViewState>;

/// Cloneable handle to a running browser.
///
/// Every command resolves once the browser has applied it, with the
/// resulting view. Requests it started may still be in flight; use
/// [`BrowserHandle::settled`] to wait for them.
#[derive(Clone)]
pub struct BrowserHandle {
    tx: mpsc::Sender<BrowserCommand>,
    state: watch::Receiver<ViewState>,
}

enum BrowserCommand {
    Navigate { location: Location, reply: Reply },
    Refresh { reply: Reply },
    Open { entry: Entry, reply: Reply },
    OpenSegment { segment: BreadcrumbSegment, reply: Reply },
    SelectFile { file: Option<UploadFile>, reply: Reply },
    SetFolderName { name: String, reply: Reply },
    Upload { reply: Reply },
    CreateFolder { reply: Reply },
    Delete { id: String, reply: Reply },
    Download { entry: Entry, reply: Reply },
    Shutdown { reply: Reply },
}

struct BrowserActor {
    browser: Browser,
    rx: mpsc::Receiver<BrowserCommand>,
    completions: mpsc::UnboundedReceiver<Completion>,
    state: watch::Sender<ViewState>,
}

impl BrowserHandle {
    /// Start a browser over any item service and open the root.
    ///
    /// Must be called within a tokio runtime.
    pub fn spawn(
        api: Arc<dyn RemoteApi>,
        target: Arc<dyn SaveTarget>,
        config: BrowserConfig,
    ) -> Self {
        let (browser, completions) = Browser::new(api, target, config);
        BrowserActor::spawn(browser, completions)
    }

    /// Connect to the REST service and save downloads into `download_dir`.
    pub fn connect<P: Into<PathBuf>>(config: ClientConfig, download_dir: P) -> Result<Self> {
        let api = ApiClient::with_config(config)?;
        Ok(Self::spawn(
            Arc::new(api),
            Arc::new(DirectoryTarget::new(download_dir)),
            BrowserConfig::default(),
        ))
    }

    async fn request(&self, build: impl FnOnce(Reply) -> BrowserCommand) -> Result<ViewState> {
        let (tx, rx) = oneshot::channel();
        self.tx
            .send(build(tx))
            .await
            .map_err(|_| BrowseError::Stopped)?;
        rx.await.map_err(|_| BrowseError::Stopped)
    }

    /// Current view.
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every view change.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.clone()
    }

    /// Wait until no request is in flight and return the view.
    pub async fn settled(&self) -> Result<ViewState> {
        let mut rx = self.state.clone();
        let state = rx
            .wait_for(ViewState::is_settled)
            .await
            .map_err(|_| BrowseError::Stopped)?;
        Ok(state.clone())
    }

    pub async fn navigate(&self, location: Location) -> Result<ViewState> {
        self.request(|reply| BrowserCommand::Navigate { location, reply })
            .await
    }

    pub async fn refresh(&self) -> Result<ViewState> {
        self.request(|reply| BrowserCommand::Refresh { reply }).await
    }

    /// Enter a folder or download a file.
    pub async fn open(&self, entry: &Entry) -> Result<ViewState> {
        self.request(|reply| BrowserCommand::Open {
            entry: entry.clone(),
            reply,
        })
        .await
    }

    pub async fn open_segment(&self, segment: &BreadcrumbSegment) -> Result<ViewState> {
        self.request(|reply| BrowserCommand::OpenSegment {
            segment: segment.clone(),
            reply,
        })
        .await
    }

    /// Select the file for the next upload, or clear the selection.
    pub async fn select_file(&self, file: Option<UploadFile>) -> Result<ViewState> {
        self.request(|reply| BrowserCommand::SelectFile { file, reply })
            .await
    }

    pub async fn set_folder_name(&self, name: &str) -> Result<ViewState> {
        self.request(|reply| BrowserCommand::SetFolderName {
            name: name.to_string(),
            reply,
        })
        .await
    }

    /// Upload the selected file into the current folder.
    pub async fn upload(&self) -> Result<ViewState> {
        self.request(|reply| BrowserCommand::Upload { reply }).await
    }

    /// Create a folder from the pending folder name.
    pub async fn create_folder(&self) -> Result<ViewState> {
        self.request(|reply| BrowserCommand::CreateFolder { reply })
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<ViewState> {
        self.request(|reply| BrowserCommand::Delete {
            id: id.to_string(),
            reply,
        })
        .await
    }

    pub async fn download(&self, entry: &Entry) -> Result<ViewState> {
        self.request(|reply| BrowserCommand::Download {
            entry: entry.clone(),
            reply,
        })
        .await
    }

    /// Stop the actor. Requests still in flight are abandoned.
    pub async fn shutdown(&self) -> Result<()> {
        self.request(|reply| BrowserCommand::Shutdown { reply })
            .await
            .map(|_| ())
    }
}

impl BrowserActor {
    fn spawn(
        mut browser: Browser,
        completions: mpsc::UnboundedReceiver<Completion>,
    ) -> BrowserHandle {
        browser.navigate(Location::Root);
        let (state_tx, state_rx) = watch::channel(browser.snapshot());
        let (tx, rx) = mpsc::channel(64);
        let actor = BrowserActor {
            browser,
            rx,
            completions,
            state: state_tx,
        };
        tokio::spawn(actor.run());
        BrowserHandle { tx, state: state_rx }
    }

    fn publish(&self) {
        self.state.send_replace(self.browser.snapshot());
    }

    async fn run(mut self) {
        loop {
            tokio::select! {
                cmd = self.rx.recv() => {
                    let Some(cmd) = cmd else { break; };
                    if self.handle_command(cmd) {
                        break;
                    }
                }
                Some(done) = self.completions.recv() => {
                    self.browser.apply(done);
                    self.publish();
                }
            }
        }
        debug!("browser actor stopped");
    }

    /// Apply a command, publish and reply. Returns true on shutdown.
    fn handle_command(&mut self, cmd: BrowserCommand) -> bool {
        let (reply, stop) = match cmd {
            BrowserCommand::Navigate { location, reply } => {
                self.browser.navigate(location);
                (reply, false)
            }
            BrowserCommand::Refresh { reply } => {
                self.browser.refresh();
                (reply, false)
            }
            BrowserCommand::Open { entry, reply } => {
                self.browser.open(&entry);
                (reply, false)
            }
            BrowserCommand::OpenSegment { segment, reply } => {
                self.browser.open_segment(&segment);
                (reply, false)
            }
            BrowserCommand::SelectFile { file, reply } => {
                self.browser.select_file(file);
                (reply, false)
            }
            BrowserCommand::SetFolderName { name, reply } => {
                self.browser.set_folder_name(name);
                (reply, false)
            }
            BrowserCommand::Upload { reply } => {
                self.browser.upload();
                (reply, false)
            }
            BrowserCommand::CreateFolder { reply } => {
                self.browser.create_folder();
                (reply, false)
            }
            BrowserCommand::Delete { id, reply } => {
                self.browser.delete(id);
                (reply, false)
            }
            BrowserCommand::Download { entry, reply } => {
                self.browser.download(&entry);
                (reply, false)
            }
            BrowserCommand::Shutdown { reply } => (reply, true),
        };

        self.publish();
        let _ = reply.send(self.browser.snapshot());
        stop
    }
}
