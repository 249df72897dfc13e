//! Listing and breadcrumb synchronization.

use tracing::debug;

use super::core::{Browser, Completion};
use super::state::LoadState;
use crate::api::Operation;
use crate::error::Result;
use crate::fs::{BreadcrumbSegment, Entry, Location};

impl Browser {
    pub(super) fn on_listing(
        &mut self,
        generation: u64,
        location: Location,
        result: Result<Vec<Entry>>,
    ) {
        if !self.is_current(generation) {
            debug!("dropping stale listing for {}", location);
            return;
        }

        match result {
            Ok(entries) => {
                debug!("listed {} entries in {}", entries.len(), location);
                self.view.entries = entries;
                self.view.listing = LoadState::Ready;
                self.resolve_breadcrumb(generation, location);
            }
            Err(err) => {
                self.fail(Operation::List, &err);
                self.view.listing = LoadState::Failed;
            }
        }
    }

    /// Root resolves locally; folders ask the service for their ancestors.
    fn resolve_breadcrumb(&mut self, generation: u64, location: Location) {
        match location {
            Location::Root => self.view.breadcrumb = vec![BreadcrumbSegment::root()],
            Location::Folder(id) => {
                let api = self.api.clone();
                self.dispatch(async move {
                    let result = api.item_path(&id).await;
                    Completion::Breadcrumb { generation, result }
                });
            }
        }
    }

    pub(super) fn on_breadcrumb(
        &mut self,
        generation: u64,
        result: Result<Vec<BreadcrumbSegment>>,
    ) {
        if !self.is_current(generation) {
            debug!("dropping stale breadcrumb");
            return;
        }

        match result {
            Ok(segments) if segments.is_empty() => {
                self.view.breadcrumb = vec![BreadcrumbSegment::root()];
            }
            Ok(segments) => self.view.breadcrumb = segments,
            // The listing stays on screen.
            Err(err) => self.fail(Operation::Path, &err),
        }
    }
}
