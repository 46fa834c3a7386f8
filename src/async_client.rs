//! Async wrapper around [`ShoppingList`] for use from async runtimes (Tokio).
//!
//! Every call locks one shared [`Mutex`] and runs on the blocking thread
//! pool via [`tokio::task::spawn_blocking`], so mutations from concurrent
//! tasks are serialized and file I/O never stalls the event loop.
//! Index-based operations are still only valid against a snapshot taken
//! inside the same [`run()`](AsyncShoppingList::run) closure.
//!
//! # Example
//!
//! ```no_run
//! use shopcalc::AsyncShoppingList;
//!
//! #[tokio::main]
//! async fn main() {
//!     let list = AsyncShoppingList::open("shopping_list.json").await.unwrap();
//!     list.add_item("りんご", 3, Some(298.0)).await.unwrap();
//!
//!     // Complete the first priced item atomically
//!     let done = list.run(|l| {
//!         let index = l.items().iter().position(|i| i.price.is_some());
//!         index.map(|i| l.complete_item(i)).transpose()
//!     }).await.unwrap();
//!     println!("{done:?}");
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{Result, ShopCalcError};
use crate::models::Item;
use crate::shopping_list::ShoppingList;

// ---------------------------------------------------------------------------
// AsyncShoppingList
// ---------------------------------------------------------------------------

/// Async, cloneable handle to one [`ShoppingList`].
#[derive(Clone)]
pub struct AsyncShoppingList {
    inner: Arc<Mutex<ShoppingList>>,
}

impl AsyncShoppingList {
    /// Wrap an existing list.
    pub fn new(list: ShoppingList) -> Self {
        Self {
            inner: Arc::new(Mutex::new(list)),
        }
    }

    /// Open a list persisted at `path` (auto-load + auto-persist).
    ///
    /// Construction runs on the blocking thread pool since it may read the
    /// data file.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path: PathBuf = path.as_ref().to_path_buf();
        tokio::task::spawn_blocking(move || ShoppingList::builder().data_file(path).build())
            .await
            .map(Self::new)
            .map_err(|e| ShopCalcError::InvalidArgument(format!("Task join error: {e}")))
    }

    /// Run a sync list operation on the blocking thread pool while holding
    /// the lock.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut ShoppingList) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let list = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = list
                .lock()
                .map_err(|_| ShopCalcError::InvalidArgument("List lock poisoned".into()))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| ShopCalcError::InvalidArgument(format!("Task join error: {e}")))?
    }

    pub async fn add_item(&self, name: &str, quantity: u32, price: Option<f64>) -> Result<String> {
        let name = name.to_string();
        self.run(move |l| l.add_item(&name, quantity, price)).await
    }

    pub async fn remove_item(&self, index: usize) -> Result<Item> {
        self.run(move |l| l.remove_item(index)).await
    }

    pub async fn complete_item(&self, index: usize) -> Result<Item> {
        self.run(move |l| l.complete_item(index)).await
    }

    pub async fn items(&self) -> Result<Vec<Item>> {
        self.run(|l| Ok(l.items())).await
    }

    pub async fn completed_items(&self) -> Result<Vec<Item>> {
        self.run(|l| Ok(l.completed_items())).await
    }

    pub async fn calculate_total(&self) -> Result<f64> {
        self.run(|l| Ok(l.calculate_total())).await
    }

    /// Save the list to `path`.
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref().to_path_buf();
        self.run(move |l| l.save_to_file(&path)).await
    }

    /// Replace the list with the contents of `path`.
    pub async fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref().to_path_buf();
        self.run(move |l| l.load_from_file(&path)).await
    }
}
