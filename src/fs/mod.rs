//! Hierarchy data model.

mod entry;
mod format;
mod upload;

pub use entry::{BreadcrumbSegment, Entry, Location, ROOT_LABEL, ROOT_SENTINEL};
pub use format::format_size;
pub use upload::UploadFile;
