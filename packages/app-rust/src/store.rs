//! In-memory [`DataSource`] implementation backed by [`DashMap`].
//!
//! Entries remember their insertion sequence so `fetch_collection` returns a
//! stable order; replacing an entity keeps its original position.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use crate::error::SourceError;
use crate::traits::{DataSource, Entity};

#[derive(Debug, Clone)]
struct Stored<T> {
    seq: u64,
    item: T,
}

/// In-memory collection of `T`.
pub struct InMemorySource<T> {
    entries: DashMap<String, Stored<T>>,
    next_seq: AtomicU64,
}

impl<T: Entity> InMemorySource<T> {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Creates a source holding `items` in the given order. Items without an id
    /// receive a fresh one.
    #[must_use]
    pub fn with_items(items: impl IntoIterator<Item = T>) -> Self {
        let source = Self::new();
        for item in items {
            source.insert(item);
        }
        source
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&self, mut item: T) -> T {
        if item.entity_id().is_empty() {
            item.assign_id(Uuid::new_v4().to_string());
        }
        let id = item.entity_id().to_string();
        // Existing entries keep their position.
        let seq = self
            .entries
            .get(&id)
            .map_or_else(|| self.next_seq.fetch_add(1, Ordering::Relaxed), |e| e.seq);
        self.entries.insert(
            id,
            Stored {
                seq,
                item: item.clone(),
            },
        );
        item
    }
}

impl<T: Entity> Default for InMemorySource<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> DataSource<T> for InMemorySource<T> {
    async fn fetch_collection(&self) -> Result<Vec<T>, SourceError> {
        let mut snapshot: Vec<(u64, T)> = self
            .entries
            .iter()
            .map(|entry| (entry.value().seq, entry.value().item.clone()))
            .collect();
        snapshot.sort_by_key(|(seq, _)| *seq);
        Ok(snapshot.into_iter().map(|(_, item)| item).collect())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<T>, SourceError> {
        Ok(self.entries.get(id).map(|e| e.item.clone()))
    }

    async fn persist(&self, item: T) -> Result<T, SourceError> {
        let stored = self.insert(item);
        debug!(kind = T::KIND, id = stored.entity_id(), "persisted");
        Ok(stored)
    }

    async fn remove(&self, id: &str) -> Result<Option<T>, SourceError> {
        let removed = self.entries.remove(id).map(|(_, e)| e.item);
        debug!(kind = T::KIND, id, found = removed.is_some(), "removed");
        Ok(removed)
    }
}
