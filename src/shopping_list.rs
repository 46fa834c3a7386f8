//! Two-bucket shopping list with JSON persistence.
//!
//! Items live in `pending` (display order) until completed, then move to
//! the append-only `completed` bucket. Index-based operations address the
//! pending bucket and are only valid against a fresh [`ShoppingList::items`]
//! snapshot: every mutation shifts later positions.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::StoreConfig;
use crate::error::{Result, ShopCalcError};
use crate::models::{timestamp, Item};
use crate::report;
use crate::storage::{self, ListDocument};

// ---------------------------------------------------------------------------
// ShoppingListBuilder
// ---------------------------------------------------------------------------

/// Builder for a [`ShoppingList`] with optional auto-load and auto-persist.
pub struct ShoppingListBuilder {
    data_file: Option<PathBuf>,
    auto_load: bool,
    auto_persist: bool,
}

impl Default for ShoppingListBuilder {
    fn default() -> Self {
        Self {
            data_file: None,
            auto_load: true,
            auto_persist: true,
        }
    }
}

impl ShoppingListBuilder {
    /// Set the data file used for auto-load and auto-persist.
    ///
    /// Without a data file the list lives in memory only.
    pub fn data_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable loading the data file at construction.
    /// Defaults to `true`.
    pub fn auto_load(mut self, enabled: bool) -> Self {
        self.auto_load = enabled;
        self
    }

    /// Enable or disable saving to the data file after every mutation.
    /// Defaults to `true`.
    pub fn auto_persist(mut self, enabled: bool) -> Self {
        self.auto_persist = enabled;
        self
    }

    /// Build the list. Never fails: an unreadable data file yields an
    /// empty list.
    pub fn build(self) -> ShoppingList {
        let Self {
            data_file,
            auto_load,
            auto_persist,
        } = self;
        let config = StoreConfig {
            auto_persist_path: data_file.clone().filter(|_| auto_persist),
            auto_load_path: data_file.filter(|_| auto_load),
        };
        ShoppingList::with_config(config)
    }
}

// ---------------------------------------------------------------------------
// ShoppingList
// ---------------------------------------------------------------------------

/// Shopping list of pending and completed [`Item`]s.
///
/// ```rust
/// use shopcalc::ShoppingList;
///
/// let mut list = ShoppingList::new();
/// list.add_item("りんご", 3, Some(298.0)).unwrap();
/// list.add_item("牛乳", 1, None).unwrap();
/// list.complete_item(0).unwrap();
///
/// assert_eq!(list.items()[0].name, "牛乳");
/// assert_eq!(list.completed_items()[0].name, "りんご");
/// assert_eq!(list.calculate_total(), 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShoppingList {
    pending: Vec<Item>,
    completed: Vec<Item>,
    config: StoreConfig,
}

impl ShoppingList {
    /// Empty in-memory list; nothing is loaded or saved automatically.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ShoppingListBuilder {
        ShoppingListBuilder::default()
    }

    /// Create a list, loading the configured data file when auto-load is on
    /// and the file exists.
    pub fn with_config(config: StoreConfig) -> Self {
        let mut list = Self {
            pending: Vec::new(),
            completed: Vec::new(),
            config,
        };
        list.auto_load();
        list
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The auto-persist target, if any.
    pub fn data_file(&self) -> Option<&Path> {
        self.config.auto_persist_path.as_deref()
    }

    // -- Mutations ---------------------------------------------------------

    /// Append a new pending item and return a confirmation message.
    ///
    /// Fails with [`ShopCalcError::InvalidArgument`] for a blank name, a zero
    /// quantity, or a negative or non-finite price.
    pub fn add_item(&mut self, name: &str, quantity: u32, price: Option<f64>) -> Result<String> {
        let item = Item::new(name.trim(), quantity, price);
        item.validate()?;
        let message = format!("Added '{}' to the list", item.name);
        self.pending.push(item);
        self.auto_persist();
        Ok(message)
    }

    /// Remove and return the pending item at `index`.
    pub fn remove_item(&mut self, index: usize) -> Result<Item> {
        self.check_index(index)?;
        let removed = self.pending.remove(index);
        self.auto_persist();
        Ok(removed)
    }

    /// Move the pending item at `index` to the completed bucket, stamping its
    /// completion time. Returns a copy of the completed item.
    pub fn complete_item(&mut self, index: usize) -> Result<Item> {
        self.check_index(index)?;
        let mut item = self.pending.remove(index);
        item.completed_at = Some(timestamp::now());
        self.completed.push(item.clone());
        self.auto_persist();
        Ok(item)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.pending.len() {
            Ok(())
        } else {
            Err(ShopCalcError::InvalidIndex {
                index,
                len: self.pending.len(),
            })
        }
    }

    // -- Queries -----------------------------------------------------------

    /// Snapshot of the pending items in display order.
    pub fn items(&self) -> Vec<Item> {
        self.pending.clone()
    }

    /// Snapshot of the completed items in completion order.
    pub fn completed_items(&self) -> Vec<Item> {
        self.completed.clone()
    }

    /// Number of pending items.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn completed_len(&self) -> usize {
        self.completed.len()
    }

    /// True when there is nothing pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Sum of `price * quantity` over pending items that have a price.
    pub fn calculate_total(&self) -> f64 {
        self.pending.iter().filter_map(Item::subtotal).sum()
    }

    // -- Persistence -------------------------------------------------------

    /// Save both buckets to `path` in the JSON list format.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let doc = ListDocument::new(self.pending.clone(), self.completed.clone());
        storage::write_document(path.as_ref(), &doc)
    }

    /// Replace the whole list with the contents of `path`.
    ///
    /// Fails with [`ShopCalcError::NotFound`] when the file does not exist
    /// and with [`ShopCalcError::InvalidArgument`] when an entry breaks the
    /// [`add_item`](Self::add_item) rules. On any failure the current
    /// contents are kept.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let doc = storage::read_document(path.as_ref())?;
        for item in doc.items.iter().chain(&doc.completed_items) {
            item.validate()?;
        }
        self.pending = doc.items;
        self.completed = doc.completed_items;
        Ok(())
    }

    /// Render the human-readable report (see [`export_to_text`](Self::export_to_text)).
    pub fn render_text(&self) -> String {
        report::render(
            &self.pending,
            &self.completed,
            self.calculate_total(),
            &timestamp::now(),
        )
    }

    /// Write the human-readable report to `path`. There is no way to load it
    /// back; use [`save_to_file`](Self::save_to_file) for that.
    pub fn export_to_text<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path.as_ref(), self.render_text())?;
        Ok(())
    }

    // -- Best-effort persistence ---------------------------------------------

    /// Save to the configured data file, discarding any error.
    fn auto_persist(&self) {
        let Some(path) = self.config.auto_persist_path.as_deref() else {
            return;
        };
        if let Err(e) = self.save_to_file(path) {
            log::debug!("Auto-save to {} failed: {}", path.display(), e);
        }
    }

    /// Load the configured data file if it exists, keeping an empty list on
    /// any error.
    fn auto_load(&mut self) {
        let Some(path) = self.config.auto_load_path.clone() else {
            return;
        };
        if !path.exists() {
            return;
        }
        if let Err(e) = self.load_from_file(&path) {
            log::debug!("Ignoring unreadable list file {}: {}", path.display(), e);
        }
    }
}

