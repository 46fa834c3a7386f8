//! Shared test fixtures for the shopcalc integration tests.
//!
//! Provides a scratch-file helper and small pre-populated lists.

#![allow(dead_code)]

use shopcalc::{Item, ShoppingList};
use std::path::PathBuf;

/// Create a temporary directory and return it with a file path inside it.
///
/// The caller must keep the `TempDir` alive for the duration of the test so
/// the directory is not deleted prematurely.
pub fn scratch_file(name: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    (dir, path)
}

/// In-memory list with two priced items: Apple (3 x 298) then Banana (2 x 158).
pub fn apple_banana() -> ShoppingList {
    let mut list = ShoppingList::new();
    list.add_item("Apple", 3, Some(298.0)).unwrap();
    list.add_item("Banana", 2, Some(158.0)).unwrap();
    list
}

/// In-memory list with pending, unpriced and completed items.
///
/// Pending: りんご, 牛乳 (no price), パン. Completed: バナナ.
pub fn mixed_list() -> ShoppingList {
    let mut list = ShoppingList::new();
    list.add_item("りんご", 3, Some(298.0)).unwrap();
    list.add_item("バナナ", 2, Some(158.0)).unwrap();
    list.add_item("牛乳", 1, None).unwrap();
    list.add_item("パン", 2, Some(120.5)).unwrap();
    list.complete_item(1).unwrap();
    list
}

pub fn names(items: &[Item]) -> Vec<String> {
    items.iter().map(|i| i.name.clone()).collect()
}
