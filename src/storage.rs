//! JSON document persistence for shopping lists.
//!
//! Saves are atomic: the document is written to a temporary file in the
//! destination directory and renamed into place, so an interrupted save
//! never leaves a truncated list behind. An existing file keeps its
//! permissions across saves; a new file is created readable by its owner
//! only.

use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{Result, ShopCalcError};
use crate::models::{timestamp, Item};

// ---------------------------------------------------------------------------
// ListDocument — On-disk representation
// ---------------------------------------------------------------------------

/// The on-disk form of a shopping list.
///
/// `saved_date` is informational; loading ignores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDocument {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub completed_items: Vec<Item>,
    #[serde(default, with = "timestamp::option")]
    pub saved_date: Option<NaiveDateTime>,
}

impl ListDocument {
    /// Build a document from the two collections, stamped with the current time.
    pub fn new(items: Vec<Item>, completed_items: Vec<Item>) -> Self {
        Self {
            items,
            completed_items,
            saved_date: Some(timestamp::now()),
        }
    }
}

/// Write `doc` to `path` as pretty-printed UTF-8 JSON.
///
/// Missing parent directories are created.
pub fn write_document(path: &Path, doc: &ListDocument) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        serde_json::to_writer_pretty(&mut writer, doc)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    if let Ok(existing) = fs::metadata(path) {
        if let Err(e) = tmp.as_file().set_permissions(existing.permissions()) {
            log::debug!("Could not keep permissions of {}: {}", path.display(), e);
        }
    }
    // The temp file is removed on drop if persisting fails.
    tmp.persist(path).map_err(|e| ShopCalcError::Io(e.error))?;
    log::debug!(
        "Saved {} pending / {} completed items to {}",
        doc.items.len(),
        doc.completed_items.len(),
        path.display()
    );
    Ok(())
}

/// Read a document from `path`.
///
/// Fails with [`ShopCalcError::NotFound`] when the file does not exist.
pub fn read_document(path: &Path) -> Result<ListDocument> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ShopCalcError::NotFound(format!(
                "List file '{}' does not exist",
                path.display()
            )));
        }
        Err(e) => return Err(e.into()),
    };
    let doc: ListDocument = serde_json::from_str(&contents)?;
    log::debug!(
        "Loaded {} pending / {} completed items from {}",
        doc.items.len(),
        doc.completed_items.len(),
        path.display()
    );
    Ok(doc)
}
