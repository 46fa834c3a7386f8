//! Shopping list manager with a built-in arithmetic calculator.
//!
//! Provides a [`ShoppingList`] of pending and completed items that can be
//! saved to and loaded from a JSON file (optionally after every change), a
//! [`Calculator`] that keeps a history of its results, and a safe
//! arithmetic [`expr`] evaluator for inputs like `"298 * 1.08"`.
//!
//! # Quick start
//!
//! ```no_run
//! use shopcalc::ShopCalc;
//!
//! let mut app = ShopCalc::builder()
//!     .data_file("shopping_list.json")
//!     .build();
//!
//! app.list_mut().add_item("りんご", 3, Some(298.0)).unwrap();
//! let with_tax = app.calculator_mut().evaluate("298 * 3 * 1.08").unwrap();
//! println!("{with_tax}");
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod calculator;
pub mod config;
pub mod error;
pub mod expr;
pub mod models;
pub mod report;
pub mod shopping_list;
pub mod storage;

#[cfg(feature = "async")]
pub use async_client::AsyncShoppingList;
pub use calculator::{Calculator, Operator};
pub use config::StoreConfig;
pub use error::{Result, ShopCalcError};
pub use expr::ExprError;
pub use models::Item;
pub use shopping_list::{ShoppingList, ShoppingListBuilder};

use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ShopCalcBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`ShopCalc`] instance.
///
/// Use [`ShopCalc::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](ShopCalcBuilder::build).
pub struct ShopCalcBuilder {
    data_file: Option<PathBuf>,
    auto_save: bool,
    auto_load: bool,
}

impl Default for ShopCalcBuilder {
    fn default() -> Self {
        Self {
            data_file: None,
            auto_save: true,
            auto_load: true,
        }
    }
}

impl ShopCalcBuilder {
    /// Set the list data file.
    ///
    /// If not set, [`config::DEFAULT_DATA_FILE`] in the working directory is
    /// used.
    pub fn data_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable saving the list after every change. Defaults to `true`.
    pub fn auto_save(mut self, enabled: bool) -> Self {
        self.auto_save = enabled;
        self
    }

    /// Enable or disable loading the data file at startup. Defaults to `true`.
    pub fn auto_load(mut self, enabled: bool) -> Self {
        self.auto_load = enabled;
        self
    }

    /// Build the application state.
    ///
    /// Never fails: a missing or unreadable data file starts an empty list.
    pub fn build(self) -> ShopCalc {
        let data_file = self.data_file.unwrap_or_else(config::default_data_file);
        let list = ShoppingList::builder()
            .data_file(&data_file)
            .auto_load(self.auto_load)
            .auto_persist(self.auto_save)
            .build();
        ShopCalc {
            calculator: Calculator::new(),
            list,
            data_file,
        }
    }
}

// ---------------------------------------------------------------------------
// ShopCalc
// ---------------------------------------------------------------------------

/// A calculator and a shopping list sharing one data file.
///
/// Created via [`ShopCalc::builder()`].
pub struct ShopCalc {
    calculator: Calculator,
    list: ShoppingList,
    data_file: PathBuf,
}

impl ShopCalc {
    /// Create a new builder.
    pub fn builder() -> ShopCalcBuilder {
        ShopCalcBuilder::default()
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn calculator_mut(&mut self) -> &mut Calculator {
        &mut self.calculator
    }

    pub fn list(&self) -> &ShoppingList {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ShoppingList {
        &mut self.list
    }

    /// The configured data file, whether or not auto-save is on.
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }
}

impl fmt::Display for ShopCalc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ShopCalc(data_file={}, pending={}, completed={}, history={})",
            self.data_file.display(),
            self.list.len(),
            self.list.completed_len(),
            self.calculator.history().len()
        )
    }
}
