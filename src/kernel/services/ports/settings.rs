use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_PROJECT_NAME: &str = "Untitled";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_dir: Option<PathBuf>,
    #[serde(default = "default_project_name")]
    pub default_project_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

fn default_project_name() -> String {
    DEFAULT_PROJECT_NAME.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_dir: None,
            preview_dir: None,
            default_project_name: default_project_name(),
            log_filter: None,
        }
    }
}
