//! Hierarchy types: entries, breadcrumb segments and locations.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Breadcrumb identifier standing for the top of the hierarchy.
pub const ROOT_SENTINEL: &str = "root";

/// Label of the root breadcrumb segment.
pub const ROOT_LABEL: &str = "Root";

/// A file or folder in the remote hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Unique identifier
    pub id: String,
    /// Parent folder identifier (`None` for entries at the root)
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Display name
    pub name: String,
    /// Folder flag
    #[serde(rename = "folder", alias = "isFolder", default)]
    pub is_folder: bool,
    /// Unreadable timestamps are treated as absent
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Storage path (files only)
    #[serde(default)]
    pub path: Option<String>,
    /// Media type (files only)
    #[serde(default, alias = "mediaType")]
    pub mime_type: Option<String>,
    /// Size in bytes (files only)
    #[serde(default)]
    pub size: Option<u64>,
}

impl Entry {
    /// Check if this entry is a folder.
    pub fn is_folder(&self) -> bool {
        self.is_folder
    }

    /// Check if this entry is a file.
    pub fn is_file(&self) -> bool {
        !self.is_folder
    }

    /// Location reached by opening this entry, if it is a folder.
    pub fn location(&self) -> Option<Location> {
        self.is_folder.then(|| Location::Folder(self.id.clone()))
    }
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_timestamp))
}

/// Accepts RFC 3339, zone-less ISO date-times (taken as UTC) and Unix
/// seconds or milliseconds.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(t) = DateTime::parse_from_rfc3339(s) {
                return Some(t.with_timezone(&Utc));
            }
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                .iter()
                .find_map(|pattern| NaiveDateTime::parse_from_str(s, pattern).ok())
                .map(|t| t.and_utc())
        }
        Value::Number(n) => {
            let n = n.as_i64()?;
            if n.abs() >= 100_000_000_000 {
                DateTime::from_timestamp_millis(n)
            } else {
                DateTime::from_timestamp(n, 0)
            }
        }
        _ => None,
    }
}

/// One step of the path from the root to the current location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbSegment {
    /// Missing, null or empty ids stand for the root
    #[serde(default = "root_id", deserialize_with = "segment_id")]
    pub id: String,
    pub name: String,
    #[serde(default = "default_true", alias = "isFolder")]
    pub folder: bool,
}

fn default_true() -> bool {
    true
}

fn root_id() -> String {
    ROOT_SENTINEL.to_string()
}

fn segment_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Option::<String>::deserialize(deserializer)?;
    Ok(id.filter(|id| !id.trim().is_empty()).unwrap_or_else(root_id))
}

impl BreadcrumbSegment {
    /// The root segment every breadcrumb starts with.
    pub fn root() -> Self {
        Self {
            id: ROOT_SENTINEL.to_string(),
            name: ROOT_LABEL.to_string(),
            folder: true,
        }
    }

    /// Check if this is the root segment.
    pub fn is_root(&self) -> bool {
        self.id == ROOT_SENTINEL
    }

    /// Location reached by clicking this segment.
    pub fn location(&self) -> Location {
        Location::from_id(&self.id)
    }
}

/// The folder currently being browsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Location {
    /// Top of the hierarchy
    #[default]
    Root,
    /// A specific folder
    Folder(String),
}

impl Location {
    /// Map an identifier to a location; the root sentinel and blank ids map to `Root`.
    pub fn from_id(id: &str) -> Self {
        if id == ROOT_SENTINEL || id.trim().is_empty() {
            Location::Root
        } else {
            Location::Folder(id.to_string())
        }
    }

    /// Parent identifier to send with requests (`None` at root).
    pub fn parent_id(&self) -> Option<&str> {
        match self {
            Location::Root => None,
            Location::Folder(id) => Some(id),
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Location::Root)
    }
}

impl From<Option<String>> for Location {
    fn from(id: Option<String>) -> Self {
        match id {
            Some(id) => Location::from_id(&id),
            None => Location::Root,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Root => f.write_str(ROOT_SENTINEL),
            Location::Folder(id) => f.write_str(id),
        }
    }
}
