use async_trait::async_trait;

use crate::error::SourceError;

/// An entity persisted by a [`DataSource`].
pub trait Entity: Clone + Send + Sync + 'static {
    /// Name used in error messages (`"movie"`, `"genre"`).
    const KIND: &'static str;

    /// Stable identifier. Empty for entities not yet persisted.
    fn entity_id(&self) -> &str;

    /// Sets the identifier assigned on first save.
    fn assign_id(&mut self, id: String);
}

/// Backing store for one entity collection.
/// Implementations: in-memory (seeded catalog, tests); remote services are
/// out of scope.
#[async_trait]
pub trait DataSource<T: Entity>: Send + Sync {
    /// Load the whole collection in a stable order.
    async fn fetch_collection(&self) -> Result<Vec<T>, SourceError>;

    /// Load a single entity, `None` if absent.
    async fn fetch_by_id(&self, id: &str) -> Result<Option<T>, SourceError>;

    /// Insert or replace an entity. Entities without an id receive a fresh one.
    /// Returns the stored entity.
    async fn persist(&self, item: T) -> Result<T, SourceError>;

    /// Delete an entity, returning it if it existed.
    async fn remove(&self, id: &str) -> Result<Option<T>, SourceError>;
}
