// 📚 Cookbook Registry - the store of all entries
//
// Append-only: entries are validated on the way in, never updated, never
// deleted. Keys are canonical names, so "beef" and "BEEF!" collide.

use crate::entry::Entry;
use crate::error::{CookbookError, Result};
use crate::normalize::normalize;
use crate::payload::EntryHeader;
use crate::resolver::{self, Summary};
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Registry of all known entries, in insertion order.
///
/// Cloning is cheap and every clone sees the same entries, so one `Cookbook`
/// can be handed to each request handler.
#[derive(Debug, Clone, Default)]
pub struct Cookbook {
    entries: Arc<RwLock<IndexMap<String, Entry>>>,
}

impl Cookbook {
    /// Create an empty cookbook
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store an entry from a raw JSON request body.
    ///
    /// The duplicate check and the insert happen under one write lock: two
    /// concurrent inserts of the same name can't both succeed, and a rejected
    /// payload leaves nothing behind. Returns the canonical name.
    pub fn insert(&self, payload: &Value) -> Result<String> {
        let header = EntryHeader::from_value(payload)?;

        let mut entries = self.write();
        if entries.contains_key(&header.name) {
            return Err(CookbookError::DuplicateName(header.name));
        }

        let entry = header.into_entry()?;
        let name = entry.name().to_string();

        debug!(name = %name, kind = entry.kind().as_str(), "entry added");
        entries.insert(name.clone(), entry);

        Ok(name)
    }

    /// Store an already-built entry.
    ///
    /// Hand-built entries get the same checks as ones made through
    /// `Ingredient::new` / `Recipe::new`.
    pub fn register(&self, entry: Entry) -> Result<()> {
        entry.validate()?;

        let mut entries = self.write();
        if entries.contains_key(entry.name()) {
            return Err(CookbookError::DuplicateName(entry.name().to_string()));
        }

        debug!(name = entry.name(), kind = entry.kind().as_str(), "entry registered");
        entries.insert(entry.name().to_string(), entry);
        Ok(())
    }

    /// Look up an entry by raw or canonical name
    pub fn get(&self, name: &str) -> Option<Entry> {
        let key = normalize(name)?;
        self.read().get(&key).cloned()
    }

    /// All entries, oldest first
    pub fn entries(&self) -> Vec<Entry> {
        self.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Summarize the recipe called `name` (raw or canonical).
    ///
    /// Holds the read lock for the whole expansion so the summary reflects a
    /// single snapshot of the cookbook.
    pub fn summarize(&self, name: &str) -> Result<Summary> {
        let key = normalize(name).ok_or_else(|| CookbookError::MalformedName(name.to_string()))?;

        let entries = self.read();
        let summary = resolver::summarize(&entries, &key)?;

        debug!(
            name = %summary.name,
            cook_time = summary.cook_time,
            ingredients = summary.ingredients.len(),
            "recipe summarized"
        );
        Ok(summary)
    }

    // A panic while holding the lock can't leave a half-written entry (the
    // only mutation is a single map insert), so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, IndexMap<String, Entry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap<String, Entry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// TESTS
// ============================================================================
