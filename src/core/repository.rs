//! Repository abstraction owning entity persistence

use crate::core::entity::Entity;
use crate::core::query::ListQuery;
use anyhow::Result;
use async_trait::async_trait;

/// Persistence seam for a single entity type
///
/// Implementations own the entity lifecycle (creation, persistence,
/// deletion) and their own transactional guarantees; controllers only map
/// outcomes to HTTP responses.
#[async_trait]
pub trait EntityRepository<E: Entity>: Send + Sync {
    /// List entities honoring the query's paging and filters
    async fn list(&self, query: &ListQuery) -> Result<Vec<E>>;

    /// Load a single entity by id
    async fn find_by_id(&self, id: i64) -> Result<Option<E>>;

    /// Persist a new or updated entity, assigning an id on first save
    async fn save(&self, entity: E) -> Result<E>;

    /// Delete an entity; `false` signals an unmet precondition
    async fn delete(&self, entity: E) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // The trait stays object-safe: controllers hold it as a trait object.
    #[allow(dead_code)]
    fn assert_object_safe<E: Entity>(_repo: &dyn EntityRepository<E>) {}

    #[allow(dead_code)]
    async fn generic_find<E, R>(repository: &R, id: i64) -> Result<Option<E>>
    where
        E: Entity,
        R: EntityRepository<E>,
    {
        repository.find_by_id(id).await
    }

    #[test]
    fn test_trait_usable_in_generic_contexts() {}
}
