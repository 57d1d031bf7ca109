//! In-memory repository for testing and development
//!
//! Ids are issued from a process-local sequence. Listing evaluates the
//! query's filters against each entity and pages over an id-ordered view
//! so repeated requests see a stable order.

use crate::core::entity::Entity;
use crate::core::query::ListQuery;
use crate::core::repository::EntityRepository;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory entity repository
#[derive(Clone)]
pub struct InMemoryRepository<E: Entity> {
    entities: Arc<RwLock<HashMap<i64, E>>>,
    next_id: Arc<AtomicI64>,
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            entities: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Number of stored entities
    pub fn len(&self) -> usize {
        self.entities.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> EntityRepository<E> for InMemoryRepository<E> {
    async fn list(&self, query: &ListQuery) -> Result<Vec<E>> {
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("failed to acquire read lock: {e}"))?;

        let mut matched: Vec<E> = entities
            .values()
            .filter(|entity| query.matches(*entity))
            .cloned()
            .collect();
        matched.sort_by_key(Entity::id);

        Ok(matched
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<E>> {
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("failed to acquire read lock: {e}"))?;

        Ok(entities.get(&id).cloned())
    }

    async fn save(&self, mut entity: E) -> Result<E> {
        let id = match entity.id() {
            Some(id) => id,
            None => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                entity.assign_id(id);
                id
            }
        };

        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("failed to acquire write lock: {e}"))?;
        entities.insert(id, entity.clone());

        Ok(entity)
    }

    async fn delete(&self, entity: E) -> Result<bool> {
        let Some(id) = entity.id() else {
            return Ok(false);
        };

        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("failed to acquire write lock: {e}"))?;

        Ok(entities.remove(&id).is_some())
    }
}
