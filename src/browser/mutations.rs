//! Upload, folder creation and deletion.

use tracing::{debug, info};

use super::core::{Browser, Completion};
use super::state::UploadState;
use crate::api::Operation;
use crate::error::Result;
use crate::fs::{Entry, UploadFile};

impl Browser {
    /// Select (or clear) the file the next upload sends.
    pub(crate) fn select_file(&mut self, file: Option<UploadFile>) {
        self.view.selected_file = file.as_ref().map(|f| f.file_name.clone());
        self.selected_file = file;
    }

    /// Set the name used by the next folder creation.
    pub(crate) fn set_folder_name(&mut self, name: String) {
        self.view.folder_name = name;
    }

    /// Upload the selected file into the current folder.
    ///
    /// Does nothing when no file is selected or an upload is in flight.
    pub(crate) fn upload(&mut self) {
        if self.view.is_uploading() {
            debug!("upload ignored: already uploading");
            return;
        }
        let Some(file) = self.selected_file.clone() else {
            debug!("upload ignored: no file selected");
            return;
        };

        self.view.error = None;
        self.view.upload = UploadState::Uploading {
            file_name: file.file_name.clone(),
        };

        let api = self.api.clone();
        let parent = self.location().parent_id().map(str::to_string);
        self.dispatch(async move {
            Completion::Uploaded(api.upload(file, parent.as_deref()).await)
        });
    }

    /// Create a folder named after the trimmed pending name.
    ///
    /// Does nothing when the name is blank.
    pub(crate) fn create_folder(&mut self) {
        let name = self.view.folder_name.trim().to_string();
        if name.is_empty() {
            debug!("create folder ignored: blank name");
            return;
        }

        self.view.error = None;
        let api = self.api.clone();
        let parent = self.location().parent_id().map(str::to_string);
        self.dispatch(async move {
            Completion::FolderCreated(api.create_folder(&name, parent.as_deref()).await)
        });
    }

    /// Delete an entry by identifier.
    pub(crate) fn delete(&mut self, id: String) {
        self.view.error = None;
        let api = self.api.clone();
        self.dispatch(async move {
            let result = api.delete(&id).await;
            Completion::Deleted { id, result }
        });
    }

    pub(super) fn on_uploaded(&mut self, result: Result<Entry>) {
        self.view.upload = UploadState::Idle;
        match result {
            Ok(entry) => {
                info!("uploaded {} ({})", entry.name, entry.id);
                self.select_file(None);
                self.refresh();
            }
            Err(err) => self.fail(Operation::Upload, &err),
        }
    }

    pub(super) fn on_folder_created(&mut self, result: Result<Entry>) {
        match result {
            Ok(entry) => {
                info!("created folder {} ({})", entry.name, entry.id);
                self.view.folder_name.clear();
                self.refresh();
            }
            Err(err) => self.fail(Operation::CreateFolder, &err),
        }
    }

    pub(super) fn on_deleted(&mut self, id: &str, result: Result<()>) {
        match result {
            Ok(()) => {
                info!("deleted {}", id);
                self.refresh();
            }
            Err(err) => self.fail(Operation::Delete, &err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::mpsc::UnboundedReceiver;

    use super::super::testing::{browser, entry, pump, FakeApi};
    use super::*;
    use crate::fs::Location;

    async fn in_folder(
        api: FakeApi,
        id: &str,
    ) -> (Browser, UnboundedReceiver<Completion>, Arc<FakeApi>) {
        let (mut b, mut rx, api) = browser(api);
        b.navigate(Location::Folder(id.to_string()));
        pump(&mut b, &mut rx).await;
        api.clear_calls();
        (b, rx, api)
    }

    #[tokio::test]
    async fn test_upload_without_file_is_noop() {
        let (mut b, mut rx, api) = in_folder(FakeApi::default(), "d1").await;
        b.view.error = Some("kept".to_string());

        b.upload();
        pump(&mut b, &mut rx).await;

        assert!(api.calls().is_empty());
        assert!(!b.view.is_uploading());
        assert_eq!(b.view.error.as_deref(), Some("kept"));
    }

    #[tokio::test]
    async fn test_upload_into_folder_refreshes() {
        let (mut b, mut rx, api) = in_folder(FakeApi::default(), "d1").await;
        b.select_file(Some(UploadFile::from_bytes("a.txt", b"abc".to_vec())));
        assert_eq!(b.view.selected_file.as_deref(), Some("a.txt"));

        b.upload();
        assert!(b.view.is_uploading());

        pump(&mut b, &mut rx).await;
        assert!(!b.view.is_uploading());
        assert_eq!(b.view.selected_file, None);
        assert!(b.selected_file.is_none());
        assert_eq!(api.calls(), vec!["upload:a.txt:d1", "list:d1", "path:d1"]);
    }

    #[tokio::test]
    async fn test_upload_ignored_while_uploading() {
        let (mut b, mut rx, api) = browser(FakeApi::default());
        b.select_file(Some(UploadFile::from_bytes("a.txt", b"abc".to_vec())));

        b.upload();
        b.upload();
        assert_eq!(b.view.pending_requests, 1);

        let done = rx.recv().await.unwrap();
        assert!(b.view.is_uploading());
        b.apply(done);
        assert!(!b.view.is_uploading());
        pump(&mut b, &mut rx).await;

        assert_eq!(api.count("upload:"), 1);
        assert_eq!(api.calls(), vec!["upload:a.txt:root", "list:root"]);
    }

    #[tokio::test]
    async fn test_upload_at_root_omits_parent() {
        let (mut b, mut rx, api) = browser(FakeApi::default());
        b.select_file(Some(UploadFile::from_bytes("a.txt", b"abc".to_vec())));
        b.upload();
        pump(&mut b, &mut rx).await;

        assert_eq!(api.calls(), vec!["upload:a.txt:root", "list:root"]);
    }

    #[tokio::test]
    async fn test_upload_failure_keeps_selection() {
        let api = FakeApi::default().failing("upload", Some("Quota exceeded"));
        let (mut b, mut rx, api) = in_folder(api, "d1").await;
        b.select_file(Some(UploadFile::from_bytes("a.txt", b"abc".to_vec())));

        b.upload();
        pump(&mut b, &mut rx).await;

        assert!(!b.view.is_uploading());
        assert_eq!(b.view.error.as_deref(), Some("Failed to upload file Quota exceeded"));
        assert_eq!(b.view.selected_file.as_deref(), Some("a.txt"));
        assert_eq!(api.calls(), vec!["upload:a.txt:d1"]);
    }

    #[tokio::test]
    async fn test_blank_folder_name_is_noop() {
        let (mut b, mut rx, api) = in_folder(FakeApi::default(), "d1").await;
        b.set_folder_name("   ".to_string());

        b.create_folder();
        pump(&mut b, &mut rx).await;

        assert!(api.calls().is_empty());
        assert_eq!(b.view.folder_name, "   ");
    }

    #[tokio::test]
    async fn test_create_folder_trims_and_refreshes() {
        let (mut b, mut rx, api) = in_folder(FakeApi::default(), "d1").await;
        b.set_folder_name("  Reports ".to_string());

        b.create_folder();
        pump(&mut b, &mut rx).await;

        assert_eq!(b.view.folder_name, "");
        assert_eq!(api.calls(), vec!["create:Reports:d1", "list:d1", "path:d1"]);
    }

    #[tokio::test]
    async fn test_create_folder_failure() {
        let api = FakeApi::default().failing("create", Some("Name already exists"));
        let (mut b, mut rx, api) = in_folder(api, "d1").await;
        b.set_folder_name("Docs".to_string());

        b.create_folder();
        pump(&mut b, &mut rx).await;

        assert_eq!(b.view.folder_name, "Docs");
        assert_eq!(
            b.view.error.as_deref(),
            Some("Failed to create folder Name already exists")
        );
        assert_eq!(api.calls(), vec!["create:Docs:d1"]);
    }

    #[tokio::test]
    async fn test_delete_refreshes_current_location_once() {
        let listing = vec![entry("f1", "a.txt", Some("d1")), entry("f2", "b.txt", Some("d1"))];
        let api = FakeApi::default().with_listing(Some("d1"), listing);
        let (mut b, mut rx, api) = in_folder(api, "d1").await;

        b.delete("f1".to_string());
        pump(&mut b, &mut rx).await;

        assert_eq!(api.calls(), vec!["delete:f1", "list:d1", "path:d1"]);
        assert_eq!(api.count("list:"), 1);
        assert_eq!(api.count("list:root"), 0);
        assert_eq!(b.view.location, Location::Folder("d1".to_string()));
    }

    #[tokio::test]
    async fn test_delete_failure_leaves_view() {
        let listing = vec![entry("f1", "a.txt", Some("d1"))];
        let api = FakeApi::default()
            .with_listing(Some("d1"), listing.clone())
            .failing("delete", None);
        let (mut b, mut rx, api) = in_folder(api, "d1").await;

        b.delete("f1".to_string());
        pump(&mut b, &mut rx).await;

        assert_eq!(b.view.entries, listing);
        assert_eq!(b.view.error.as_deref(), Some("Failed to delete item"));
        assert_eq!(api.calls(), vec!["delete:f1"]);
    }

    #[tokio::test]
    async fn test_mutation_clears_previous_error() {
        let (mut b, mut rx, _) = in_folder(FakeApi::default(), "d1").await;
        b.view.error = Some("old".to_string());

        b.delete("f1".to_string());
        assert_eq!(b.view.error, None);
        pump(&mut b, &mut rx).await;
    }
}
