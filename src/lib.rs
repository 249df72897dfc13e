//! # browselib
//!
//! Client library for browsing a remote file/folder hierarchy served over a
//! small REST API.
//!
//! ## Features
//!
//! - **Navigation**: open folders, jump through the breadcrumb, refresh.
//! - **Listing sync**: every navigation fetches the folder's entries and its
//!   ancestor chain; stale responses from superseded navigations are dropped.
//! - **Mutations**: upload a file, create a folder or delete an entry in the
//!   current folder, followed by a refresh.
//! - **Downloads**: fetch file content into a temporary file and save it
//!   through a [`SaveTarget`].
//!
//! The browser runs as an actor; [`BrowserHandle`] sends it commands and
//! exposes the resulting [`ViewState`] snapshots.
//!
//! ## Example
//!
//! ```no_run
//! use browselib::{BrowserHandle, ClientConfig, format_size};
//!
//! # async fn example() -> browselib::Result<()> {
//! let browser = BrowserHandle::connect(ClientConfig::from_env()?, "downloads")?;
//!
//! let view = browser.settled().await?;
//! for entry in &view.entries {
//!     println!("{} {}", entry.name, format_size(entry.size));
//! }
//!
//! if let Some(docs) = view.entry_named("Docs") {
//!     browser.open(docs).await?;
//!     let view = browser.settled().await?;
//!     println!("{}", view.breadcrumb_path());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod browser;
pub mod config;
pub mod error;
pub mod fs;
pub mod http;

// Re-export commonly used types
pub use api::{ApiClient, RemoteApi};
pub use browser::{BrowserHandle, DirectoryTarget, LoadState, SaveTarget, UploadState, ViewState};
pub use config::{BrowserConfig, ClientConfig, ResponsePolicy};
pub use error::{BrowseError, Result};
pub use fs::{BreadcrumbSegment, Entry, Location, UploadFile, format_size};
