use std::path::PathBuf;

/// File the list is saved to and loaded from when no path is configured.
pub const DEFAULT_DATA_FILE: &str = "shopping_list.json";

/// Timestamp format written for `added_date`, `completed_date` and `saved_date`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Minute-precision format found in older list files. Accepted on read only.
pub const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub const CURRENCY_SYMBOL: &str = "¥";

/// Persistence behaviour of a [`ShoppingList`](crate::ShoppingList).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    /// Where to save after every successful mutation. `None` disables
    /// auto-persist.
    pub auto_persist_path: Option<PathBuf>,
    /// Loaded at construction if the file exists. `None` disables auto-load.
    pub auto_load_path: Option<PathBuf>,
}

impl StoreConfig {
    /// In-memory only: nothing is loaded or saved automatically.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Auto-load from and auto-persist to `path`.
    pub fn persistent(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            auto_persist_path: Some(path.clone()),
            auto_load_path: Some(path),
        }
    }
}

/// The default data file, relative to the working directory.
pub fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

/// Per-user data file under the platform data directory
/// (e.g. `~/.local/share/shopcalc/shopping_list.json` on Linux).
///
/// Falls back to [`default_data_file`] when no data directory is known.
pub fn user_data_file() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("shopcalc").join(DEFAULT_DATA_FILE)
    } else {
        default_data_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_data_file_keeps_default_name() {
        assert!(user_data_file().ends_with(DEFAULT_DATA_FILE));
    }

    #[test]
    fn persistent_sets_both_paths() {
        let config = StoreConfig::persistent("list.json");
        assert_eq!(config.auto_load_path, config.auto_persist_path);
        assert_eq!(config.auto_load_path.as_deref(), Some(std::path::Path::new("list.json")));
        assert_eq!(StoreConfig::in_memory(), StoreConfig::default());
    }
}
