//! Topic identity derived from archive entry paths.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Topic uuid: the name of the topic folder inside the BCF archive.
///
/// Kept as the raw folder name. Authoring tools disagree on casing and
/// braces, so no UUID normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicUuid(String);

impl TopicUuid {
    /// Creates a topic uuid from a folder name. Returns `None` when empty
    /// or when the name contains a path separator.
    pub fn new(folder: impl Into<String>) -> Option<Self> {
        let folder = folder.into();
        if folder.is_empty() || folder.contains('/') {
            return None;
        }
        Some(Self(folder))
    }

    /// Derives the topic from an entry path such as `"3f2e.../markup.bcf"`.
    ///
    /// The first path segment is the topic folder. Entries at the archive
    /// root have no topic.
    pub fn from_entry_path(path: &str) -> Option<Self> {
        let (folder, rest) = path.split_once('/')?;
        if rest.is_empty() {
            return None;
        }
        Self::new(folder)
    }

    /// Path of a sibling file inside this topic's folder.
    pub fn entry_path(&self, filename: &str) -> String {
        format!("{}/{}", self.0, filename)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
