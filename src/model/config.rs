use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::gesture::DragThreshold;
use crate::model::group::DEFAULT_GROUP_NAME;
use crate::model::task::DEFAULT_TASK_TEXT;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub drag: DragConfig,
    #[serde(default)]
    pub defaults: EntityDefaults,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Save file location. If absent, the per-user data directory is used.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

/// Minimum pointer travel before a press turns into a drag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragConfig {
    #[serde(default = "default_drag_distance")]
    pub min_horizontal: f64,
    #[serde(default = "default_drag_distance")]
    pub min_vertical: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        DragConfig {
            min_horizontal: default_drag_distance(),
            min_vertical: default_drag_distance(),
        }
    }
}

impl DragConfig {
    pub fn threshold(&self) -> DragThreshold {
        DragThreshold {
            min_horizontal: self.min_horizontal,
            min_vertical: self.min_vertical,
        }
    }
}

fn default_drag_distance() -> f64 {
    4.0
}

/// Field values for groups and tasks created by "add"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDefaults {
    #[serde(default = "default_group_name")]
    pub group_name: String,
    #[serde(default = "default_task_text")]
    pub task_text: String,
}

impl Default for EntityDefaults {
    fn default() -> Self {
        EntityDefaults {
            group_name: default_group_name(),
            task_text: default_task_text(),
        }
    }
}

fn default_group_name() -> String {
    DEFAULT_GROUP_NAME.to_string()
}

fn default_task_text() -> String {
    DEFAULT_TASK_TEXT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.defaults.group_name, "New Group");
        assert_eq!(config.defaults.task_text, "New Task");
        assert_eq!(config.drag.min_horizontal, 4.0);
        assert!(config.storage.data_file.is_none());
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
[drag]
min_vertical = 10.0

[defaults]
group_name = "Inbox"
"#,
        )
        .unwrap();
        assert_eq!(config.drag.min_horizontal, 4.0);
        assert_eq!(config.drag.min_vertical, 10.0);
        assert_eq!(config.defaults.group_name, "Inbox");
        assert_eq!(config.defaults.task_text, "New Task");
    }
}
