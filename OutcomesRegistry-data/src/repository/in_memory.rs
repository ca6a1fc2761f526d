use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::errors::RepositoryError;

/// In-memory table used when no database pool is available.
///
/// Rows are keyed by their primary key. Clones share the same table.
#[derive(Debug)]
pub struct InMemoryStorage<T> {
    rows: Arc<Mutex<HashMap<String, T>>>,
}

impl<T> Clone for InMemoryStorage<T> {
    fn clone(&self) -> Self {
        Self { rows: Arc::clone(&self.rows) }
    }
}

impl<T: Clone> Default for InMemoryStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> InMemoryStorage<T> {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            rows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Insert or replace a row
    pub fn insert(&self, id: &str, row: T) -> Result<T, RepositoryError> {
        let mut rows = self.rows.lock()?;
        rows.insert(id.to_string(), row.clone());
        Ok(row)
    }

    /// Get a row by primary key
    pub fn get(&self, id: &str) -> Result<Option<T>, RepositoryError> {
        let rows = self.rows.lock()?;
        Ok(rows.get(id).cloned())
    }

    /// First row matching the predicate
    pub fn find<F>(&self, predicate: F) -> Result<Option<T>, RepositoryError>
    where
        F: Fn(&T) -> bool,
    {
        let rows = self.rows.lock()?;
        Ok(rows.values().find(|row| predicate(row)).cloned())
    }

    /// All rows matching the predicate, in no particular order
    pub fn filter<F>(&self, predicate: F) -> Result<Vec<T>, RepositoryError>
    where
        F: Fn(&T) -> bool,
    {
        let rows = self.rows.lock()?;
        Ok(rows.values().filter(|row| predicate(row)).cloned().collect())
    }

    /// Apply `update` to the row in place; `NotFound` when missing
    pub fn update<F>(&self, id: &str, update: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut T),
    {
        let mut rows = self.rows.lock()?;
        let row = rows
            .get_mut(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        update(row);
        Ok(row.clone())
    }
}
