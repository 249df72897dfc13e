//! Hierarchy browser: navigation, listing sync, mutations and downloads.

pub mod actor;
mod core;
mod download;
mod mutations;
mod navigation;
mod state;
mod sync;

#[cfg(test)]
mod testing;

pub use actor::BrowserHandle;
pub use download::{DirectoryTarget, SaveTarget};
pub use state::{LoadState, UploadState, ViewState};
