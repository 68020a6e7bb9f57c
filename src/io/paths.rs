use std::path::PathBuf;

/// Directory name used under the per-user data directory
pub const DATA_DIR_NAME: &str = "SimpleToDo";

/// Directory name used under the per-user config directory
pub const CONFIG_DIR_NAME: &str = "simpletodo";

/// Get the config file path, respecting XDG_CONFIG_HOME
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".config"));
    config_dir.join(CONFIG_DIR_NAME).join("config.toml")
}

/// Get the default save file path, respecting XDG_DATA_HOME
pub fn default_data_path() -> PathBuf {
    let data_dir = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".local").join("share"));
    data_dir.join(DATA_DIR_NAME).join("data.json")
}

/// Get the user's home directory
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}
