//! # Flat-File Record Store
//!
//! A JSON pseudo-database. The backing file holds one object whose values
//! are arrays of flat records:
//!
//! ```json
//! {
//!   "articles": [
//!     { "id": 1, "title": "An Article", "author": "Fred Saberhagen" },
//!     { "id": 2, "title": "Another Article", "author": "Mark Twain" }
//!   ],
//!   "pages": [
//!     { "page_title": "Mini-CMS: Home", "page_heading": "The Homepage" }
//!   ]
//! }
//! ```
//!
//! The document is read once at `open` and rewritten in full after every
//! mutation. Queries are linear scans driven by a `Predicate`.
//!
//! ## Scan rules
//!
//! - A field holding `null` counts as absent everywhere.
//! - `select` and `select_one` stop scanning at the first record that lacks
//!   the predicate field, even if later records would match.
//! - `update_record`, `update_field` and `delete` act on the first match
//!   only; updated records move to the end of their collection.

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::json::{parse_document, to_json, to_json_pretty};
use crate::query::Predicate;
use crate::value::{Document, Record, Value};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// JSON flat-file record store
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    pretty: bool,
    data: Document,
}

impl JsonFileStore {
    /// Open the store backed by `path`, pretty-printing on save
    ///
    /// # Errors
    ///
    /// - `Error::DataFileMissing` if the file does not exist
    /// - `Error::DataFileNotWritable` if it cannot be opened for writing
    /// - `Error::MalformedDocument` if its content is not a valid document
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_config(&StoreConfig {
            data_file: path.as_ref().to_path_buf(),
            ..StoreConfig::default()
        })
    }

    /// Open the store described by `config`
    ///
    /// # Errors
    ///
    /// See [`JsonFileStore::open`].
    pub fn with_config(config: &StoreConfig) -> Result<Self> {
        if !config.data_file.is_file() {
            return Err(Error::DataFileMissing {
                path: config.data_file.clone(),
            });
        }
        // Saves replace the file at this path; a symlink must stay intact.
        let path = fs::canonicalize(&config.data_file)?;

        // Opening for write without truncating is the writability check.
        OpenOptions::new()
            .write(true)
            .open(&path)
            .map_err(|source| Error::DataFileNotWritable {
                path: path.clone(),
                source,
            })?;

        let mut bytes = fs::read(&path)?;
        let data = parse_document(&path, &mut bytes)?;

        info!(
            path = %path.display(),
            collections = data.len(),
            "Opened JSON record store"
        );

        Ok(Self {
            path,
            pretty: config.pretty,
            data,
        })
    }

    /// Path of the backing file, with symlinks resolved
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The in-memory document
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.data
    }

    /// Collection names, sorted
    pub fn collections(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// All records of a collection; empty if the collection is absent
    #[must_use]
    pub fn select_all(&self, collection: &str) -> &[Record] {
        self.data.get(collection).map_or(&[], Vec::as_slice)
    }

    /// Records matching `predicate`, at most `limit` of them
    ///
    /// The scan stops at the first record missing the predicate field.
    #[must_use]
    pub fn select(
        &self,
        collection: &str,
        predicate: &Predicate,
        limit: Option<usize>,
    ) -> Vec<&Record> {
        let limit = limit.unwrap_or(usize::MAX);
        let mut result = Vec::new();
        if limit == 0 {
            return result;
        }

        for record in self.select_all(collection) {
            match predicate.evaluate(record) {
                None => break,
                Some(true) => {
                    result.push(record);
                    if result.len() == limit {
                        break;
                    }
                }
                Some(false) => {}
            }
        }
        result
    }

    /// First record matching `predicate`
    ///
    /// Same truncation rule as [`JsonFileStore::select`].
    #[must_use]
    pub fn select_one(&self, collection: &str, predicate: &Predicate) -> Option<&Record> {
        self.select(collection, predicate, Some(1)).into_iter().next()
    }

    /// Check if a collection exists
    #[must_use]
    pub fn collection_exists(&self, collection: &str) -> bool {
        self.data.contains_key(collection)
    }

    /// Number of records in a collection; 0 if absent
    #[must_use]
    pub fn collection_count(&self, collection: &str) -> usize {
        self.select_all(collection).len()
    }

    /// Check if any record in the collection has a non-null `field`
    #[must_use]
    pub fn key_exists(&self, collection: &str, field: &str) -> bool {
        self.select_all(collection)
            .iter()
            .any(|record| record.get(field).is_some_and(|v| !v.is_null()))
    }

    /// Create (or silently reset) an empty collection and save
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be saved.
    pub fn create_collection(&mut self, collection: &str) -> Result<()> {
        self.data.insert(collection.to_string(), Vec::new());
        self.save()
    }

    /// Remove a collection and save
    ///
    /// Returns `false`, without saving, if the collection did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be saved.
    pub fn delete_collection(&mut self, collection: &str) -> Result<bool> {
        if self.data.remove(collection).is_none() {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Append a record, creating the collection if needed, and save
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be saved.
    pub fn create_record(&mut self, collection: &str, record: Record) -> Result<()> {
        self.data
            .entry(collection.to_string())
            .or_default()
            .push(record);
        self.save()
    }

    /// Replace the first record matching `predicate` with `record`
    ///
    /// The old record is removed from its position and the replacement is
    /// appended at the end of the collection. Records lacking the predicate
    /// field are skipped. Returns whether a match was found.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be saved.
    pub fn update_record(
        &mut self,
        collection: &str,
        record: Record,
        predicate: &Predicate,
    ) -> Result<bool> {
        let Some(records) = self.data.get_mut(collection) else {
            return Ok(false);
        };
        let Some(index) = records.iter().position(|r| predicate.matches(r)) else {
            return Ok(false);
        };

        records.remove(index);
        records.push(record);
        self.save()?;
        Ok(true)
    }

    /// Set `field` to `new_value` on the first record whose `field` is
    /// strictly equal to `old_value`, moving that record to the end
    ///
    /// Strict means same variant and same value: `Int(1)` does not equal
    /// `Float(1.0)` or `String("1")`. A `null` field never matches, not
    /// even `Value::Null`. Returns whether a match was found.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be saved.
    pub fn update_field(
        &mut self,
        collection: &str,
        field: &str,
        new_value: impl Into<Value>,
        old_value: &Value,
    ) -> Result<bool> {
        let Some(records) = self.data.get_mut(collection) else {
            return Ok(false);
        };
        let Some(index) = records
            .iter()
            .position(|r| r.get(field).is_some_and(|v| !v.is_null() && v == old_value))
        else {
            return Ok(false);
        };

        let mut record = records.remove(index);
        record.insert(field.to_string(), new_value.into());
        records.push(record);
        self.save()?;
        Ok(true)
    }

    /// Remove the first record matching `predicate`
    ///
    /// Records lacking the predicate field are skipped. Returns whether a
    /// match was found.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be saved.
    pub fn delete(&mut self, collection: &str, predicate: &Predicate) -> Result<bool> {
        let Some(records) = self.data.get_mut(collection) else {
            return Ok(false);
        };
        let Some(index) = records.iter().position(|r| predicate.matches(r)) else {
            return Ok(false);
        };

        records.remove(index);
        self.save()?;
        Ok(true)
    }

    /// Write the whole document to the backing file
    ///
    /// The document is written to a uniquely named temporary file in the
    /// same directory, given the backing file's permissions, and then
    /// renamed over the backing file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the write or the rename fails.
    /// The backing file is left untouched in every case.
    pub fn save(&self) -> Result<()> {
        let json = if self.pretty {
            to_json_pretty(&self.data)?
        } else {
            to_json(&self.data)?
        };

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        if let Ok(metadata) = fs::metadata(&self.path) {
            fs::set_permissions(tmp.path(), metadata.permissions())?;
        }

        if let Err(e) = tmp.persist(&self.path) {
            let tmp_path = e.file.path().to_path_buf();
            if let Err(cleanup) = e.file.close() {
                warn!(
                    path = %tmp_path.display(),
                    error = %cleanup,
                    "Failed to remove temporary data file"
                );
            }
            return Err(e.error.into());
        }

        debug!(
            path = %self.path.display(),
            bytes = json.len(),
            "Saved JSON record store"
        );
        Ok(())
    }
}
