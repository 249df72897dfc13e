//! Navigation entry points.

use tracing::debug;

use super::core::{Browser, Completion};
use super::state::LoadState;
use crate::fs::{BreadcrumbSegment, Entry, Location};

impl Browser {
    /// Move to `location` and fetch its listing.
    pub(crate) fn navigate(&mut self, location: Location) {
        debug!("navigate to {}", location);
        self.view.location = location.clone();
        self.view.error = None;
        self.view.listing = LoadState::Loading;

        self.generation += 1;
        let generation = self.generation;
        let api = self.api.clone();
        self.dispatch(async move {
            let result = api.list_items(location.parent_id()).await;
            Completion::Listing {
                generation,
                location,
                result,
            }
        });
    }

    /// Re-fetch the current location without moving.
    pub(crate) fn refresh(&mut self) {
        let location = self.location().clone();
        self.navigate(location);
    }

    /// Open an entry: folders are entered, files are downloaded.
    pub(crate) fn open(&mut self, entry: &Entry) {
        match entry.location() {
            Some(location) => self.navigate(location),
            None => self.download(entry),
        }
    }

    /// Jump to a breadcrumb segment.
    pub(crate) fn open_segment(&mut self, segment: &BreadcrumbSegment) {
        self.navigate(segment.location());
    }
}
