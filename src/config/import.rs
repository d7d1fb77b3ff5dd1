//! Import behavior configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Settings that shape how topics are written into the target system
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ImportConfig {
    /// Work item type used when creating or updating work items
    #[serde(default = "default_work_item_type")]
    pub work_item_type: String,

    /// Note appended to the work item after every successful sync
    #[serde(default = "default_sync_note")]
    pub sync_note: String,

    /// Forwarded to the work item service on create/update
    #[serde(default)]
    pub send_notifications: bool,

    /// Name of the markup entry inside each topic folder
    #[serde(default = "default_markup_file_name")]
    pub markup_file_name: String,
}

impl ImportConfig {
    /// Whether an archive entry path is a topic markup entry
    pub fn is_markup_entry(&self, path: &str) -> bool {
        match path.rsplit_once('/') {
            Some((folder, name)) => !folder.is_empty() && name == self.markup_file_name,
            None => false,
        }
    }

    /// Validate import configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.work_item_type.trim().is_empty() {
            return Err(ValidationError::MissingRequired("IMPORT__WORK_ITEM_TYPE"));
        }
        if self.markup_file_name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("IMPORT__MARKUP_FILE_NAME"));
        }
        if self.markup_file_name.contains('/') {
            return Err(ValidationError::InvalidMarkupFileName);
        }
        Ok(())
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            work_item_type: default_work_item_type(),
            sync_note: default_sync_note(),
            send_notifications: false,
            markup_file_name: default_markup_file_name(),
        }
    }
}

fn default_work_item_type() -> String {
    "Issue".to_string()
}

fn default_sync_note() -> String {
    "(Updated in BCF import)".to_string()
}

fn default_markup_file_name() -> String {
    "markup.bcf".to_string()
}
