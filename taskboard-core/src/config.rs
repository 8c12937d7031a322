/// Configuration types shared by board front-ends.
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::board::ITEMS_KEY;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardConfig {
    /// Directory holding the store; front-ends pick a platform default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_storage_key() -> String {
    ITEMS_KEY.to_string()
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: default_storage_key(),
        }
    }
}
