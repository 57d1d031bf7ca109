//! Base CRUD controller requiring explicit initialization
//!
//! The controller is the bridge between request parameters and the
//! repository: it builds queries through the aspect schema, drives the
//! DTO mapping seams and projects outgoing JSON. Every operation fails
//! fast with 500 until `init` has provided a repository.

use crate::core::aspect::AspectSchema;
use crate::core::dto::Dto;
use crate::core::entity::Entity;
use crate::core::error::ControllerError;
use crate::core::query::{DEFAULT_MAX_LIMIT, ListParams, ListQuery};
use crate::core::repository::EntityRepository;
use serde_json::Value;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

pub type ControllerResult<T> = Result<T, ControllerError>;

/// Generic CRUD core for one entity type
pub struct BaseController<E: Entity, D: Dto<E>> {
    repository: Option<Arc<dyn EntityRepository<E>>>,
    schema: AspectSchema,
    max_limit: usize,
    _dto: PhantomData<fn() -> D>,
}

impl<E: Entity, D: Dto<E>> BaseController<E, D> {
    /// Create an uninitialized controller; call `init` before routing to it
    pub fn new(schema: AspectSchema) -> Self {
        Self {
            repository: None,
            schema,
            max_limit: DEFAULT_MAX_LIMIT,
            _dto: PhantomData,
        }
    }

    /// Cap client-supplied list limits
    pub fn with_max_limit(mut self, max_limit: usize) -> Self {
        self.max_limit = max_limit;
        self
    }

    /// Provide the repository; request handling is refused until this ran
    pub fn init(&mut self, repository: Arc<dyn EntityRepository<E>>) {
        self.repository = Some(repository);
    }

    pub fn is_initialized(&self) -> bool {
        self.repository.is_some()
    }

    pub fn schema(&self) -> &AspectSchema {
        &self.schema
    }

    fn repository(&self) -> ControllerResult<&Arc<dyn EntityRepository<E>>> {
        self.repository.as_ref().ok_or_else(|| {
            tracing::error!("uninitialized controller, call init before handling requests");
            ControllerError::Uninitialized
        })
    }

    /// List entities as a projected JSON array
    pub async fn list(
        &self,
        params: &ListParams,
        raw_params: &HashMap<String, String>,
    ) -> ControllerResult<Value> {
        let repository = self.repository()?;
        let query = ListQuery::from_params(params, raw_params, &self.schema, self.max_limit);
        tracing::trace!(
            limit = query.limit,
            offset = query.offset,
            filters = query.filters.len(),
            "listing {}",
            E::resource_name()
        );

        let entities = repository.list(&query).await?;
        let items = entities
            .iter()
            .map(|entity| self.export(&D::from_entity(entity)))
            .collect::<ControllerResult<Vec<Value>>>()?;
        Ok(Value::Array(items))
    }

    /// Load one entity as a projected JSON object
    pub async fn get(&self, id: i64) -> ControllerResult<Value> {
        let entity = self.load_by_id(id).await?;
        self.export(&D::from_entity(&entity))
    }

    /// Create a new entity from an inbound DTO
    pub async fn create(&self, dto: &D) -> ControllerResult<Value> {
        let repository = self.repository()?;
        let entity = repository.save(dto.to_new_entity()).await?;
        tracing::debug!(
            id = entity.id(),
            "created {}",
            E::resource_name_singular()
        );
        self.export(&D::from_entity(&entity))
    }

    /// Apply an inbound DTO onto an existing entity and persist it
    pub async fn update(&self, id: i64, dto: &D) -> ControllerResult<Value> {
        let repository = self.repository()?;
        let mut entity = self.load_by_id(id).await?;
        dto.apply_to(&mut entity, &self.schema);
        let entity = repository.save(entity).await?;
        tracing::debug!(id, "updated {}", E::resource_name_singular());
        self.export(&D::from_entity(&entity))
    }

    /// Delete an entity; an unmet repository precondition surfaces as 412
    pub async fn delete(&self, id: i64) -> ControllerResult<()> {
        let repository = self.repository()?;
        let entity = self.load_by_id(id).await?;
        tracing::debug!(id, "deleting {}", E::resource_name_singular());
        if repository.delete(entity).await? {
            Ok(())
        } else {
            Err(ControllerError::DeletePrecondition {
                resource: E::resource_name_singular(),
                id,
            })
        }
    }

    /// Load an entity by id, mapping absence to 404
    pub async fn load_by_id(&self, id: i64) -> ControllerResult<E> {
        let repository = self.repository()?;
        repository
            .find_by_id(id)
            .await?
            .ok_or(ControllerError::NotFound {
                resource: E::resource_name_singular(),
                id,
            })
    }

    fn export(&self, dto: &D) -> ControllerResult<Value> {
        Ok(self.schema.project(serde_json::to_value(dto)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aspect::Aspect;
    use crate::core::field::FieldValue;
    use anyhow::Result;
    use async_trait::async_trait;
    use serde::{Deserialize, Serialize};
    use std::sync::RwLock;

    #[derive(Clone, Debug, Serialize)]
    struct Gadget {
        id: Option<i64>,
        name: String,
        secret: String,
    }

    impl Entity for Gadget {
        fn resource_name() -> &'static str {
            "gadgets"
        }

        fn resource_name_singular() -> &'static str {
            "gadget"
        }

        fn id(&self) -> Option<i64> {
            self.id
        }

        fn assign_id(&mut self, id: i64) {
            self.id = Some(id);
        }

        fn field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "name" => Some(self.name.as_str().into()),
                _ => None,
            }
        }
    }

    #[derive(Clone, Debug, Serialize, Deserialize, Default)]
    struct GadgetDto {
        id: Option<i64>,
        name: Option<String>,
        secret: Option<String>,
    }

    impl Dto<Gadget> for GadgetDto {
        fn from_entity(entity: &Gadget) -> Self {
            Self {
                id: entity.id(),
                name: Some(entity.name.clone()),
                secret: Some(entity.secret.clone()),
            }
        }

        fn to_new_entity(&self) -> Gadget {
            Gadget {
                id: None,
                name: self.name.clone().unwrap_or_default(),
                secret: self.secret.clone().unwrap_or_default(),
            }
        }

        fn apply_to(&self, entity: &mut Gadget, schema: &AspectSchema) {
            if schema.is_modifiable("name") {
                if let Some(name) = &self.name {
                    entity.name = name.clone();
                }
            }
            if schema.is_modifiable("secret") {
                if let Some(secret) = &self.secret {
                    entity.secret = secret.clone();
                }
            }
        }

        fn id(&self) -> Option<i64> {
            self.id
        }
    }

    /// Fixed-content repository; delete outcome is scripted
    struct ScriptedRepository {
        gadgets: RwLock<Vec<Gadget>>,
        delete_outcome: bool,
    }

    impl ScriptedRepository {
        fn with_gadgets(gadgets: Vec<Gadget>) -> Self {
            Self {
                gadgets: RwLock::new(gadgets),
                delete_outcome: true,
            }
        }

        fn refusing_deletes(mut self) -> Self {
            self.delete_outcome = false;
            self
        }
    }

    #[async_trait]
    impl EntityRepository<Gadget> for ScriptedRepository {
        async fn list(&self, query: &ListQuery) -> Result<Vec<Gadget>> {
            let gadgets = self.gadgets.read().unwrap();
            Ok(gadgets
                .iter()
                .filter(|gadget| query.matches(*gadget))
                .skip(query.offset)
                .take(query.limit)
                .cloned()
                .collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Gadget>> {
            let gadgets = self.gadgets.read().unwrap();
            Ok(gadgets.iter().find(|g| g.id == Some(id)).cloned())
        }

        async fn save(&self, mut entity: Gadget) -> Result<Gadget> {
            let mut gadgets = self.gadgets.write().unwrap();
            if entity.id.is_none() {
                entity.assign_id(gadgets.len() as i64 + 1);
            }
            gadgets.retain(|g| g.id != entity.id);
            gadgets.push(entity.clone());
            Ok(entity)
        }

        async fn delete(&self, entity: Gadget) -> Result<bool> {
            let mut gadgets = self.gadgets.write().unwrap();
            gadgets.retain(|g| g.id != entity.id);
            Ok(self.delete_outcome)
        }
    }

    fn gadget(id: i64, name: &str) -> Gadget {
        Gadget {
            id: Some(id),
            name: name.to_string(),
            secret: "hidden".to_string(),
        }
    }

    fn schema() -> AspectSchema {
        AspectSchema::new().with_field("secret", Aspect::new().exported(false).modifiable(false))
    }

    fn initialized(repository: ScriptedRepository) -> BaseController<Gadget, GadgetDto> {
        let mut controller = BaseController::new(schema());
        controller.init(Arc::new(repository));
        controller
    }

    #[tokio::test]
    async fn test_uninitialized_controller_refuses_every_operation() {
        let controller: BaseController<Gadget, GadgetDto> = BaseController::new(schema());
        assert!(!controller.is_initialized());

        let listed = controller
            .list(&ListParams::default(), &HashMap::new())
            .await;
        assert!(matches!(listed, Err(ControllerError::Uninitialized)));
        assert!(matches!(
            controller.get(1).await,
            Err(ControllerError::Uninitialized)
        ));
        assert!(matches!(
            controller.create(&GadgetDto::default()).await,
            Err(ControllerError::Uninitialized)
        ));
        assert!(matches!(
            controller.update(1, &GadgetDto::default()).await,
            Err(ControllerError::Uninitialized)
        ));
        assert!(matches!(
            controller.delete(1).await,
            Err(ControllerError::Uninitialized)
        ));
    }

    #[tokio::test]
    async fn test_list_projects_every_item() {
        let controller = initialized(ScriptedRepository::with_gadgets(vec![
            gadget(1, "anvil"),
            gadget(2, "bolt"),
        ]));

        let listed = controller
            .list(&ListParams::default(), &HashMap::new())
            .await
            .unwrap();
        let items = listed.as_array().unwrap();
        assert_eq!(items.len(), 2);
        for item in items {
            assert!(item.get("secret").is_none());
            assert!(item.get("name").is_some());
        }
    }

    #[tokio::test]
    async fn test_get_maps_absence_to_not_found() {
        let controller = initialized(ScriptedRepository::with_gadgets(vec![gadget(1, "anvil")]));

        let found = controller.get(1).await.unwrap();
        assert_eq!(found["id"], 1);
        assert_eq!(found["name"], "anvil");

        assert!(matches!(
            controller.get(99).await,
            Err(ControllerError::NotFound { id: 99, .. })
        ));
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let controller = initialized(ScriptedRepository::with_gadgets(vec![]));
        let dto = GadgetDto {
            id: None,
            name: Some("crank".to_string()),
            secret: Some("s".to_string()),
        };

        let created = controller.create(&dto).await.unwrap();
        assert_eq!(created["id"], 1);
        assert_eq!(created["name"], "crank");
        assert!(created.get("secret").is_none());
    }

    #[tokio::test]
    async fn test_update_respects_modifiable_flags() {
        let controller = initialized(ScriptedRepository::with_gadgets(vec![gadget(1, "anvil")]));
        let dto = GadgetDto {
            id: Some(1),
            name: Some("anvil mk2".to_string()),
            secret: Some("overwritten".to_string()),
        };

        controller.update(1, &dto).await.unwrap();

        let entity = controller.load_by_id(1).await.unwrap();
        assert_eq!(entity.name, "anvil mk2");
        assert_eq!(entity.secret, "hidden");
    }

    #[tokio::test]
    async fn test_delete_maps_repository_outcome() {
        let controller = initialized(ScriptedRepository::with_gadgets(vec![gadget(1, "anvil")]));
        controller.delete(1).await.unwrap();

        let refusing = initialized(
            ScriptedRepository::with_gadgets(vec![gadget(1, "anvil")]).refusing_deletes(),
        );
        assert!(matches!(
            refusing.delete(1).await,
            Err(ControllerError::DeletePrecondition { id: 1, .. })
        ));

        let empty = initialized(ScriptedRepository::with_gadgets(vec![]));
        assert!(matches!(
            empty.delete(5).await,
            Err(ControllerError::NotFound { id: 5, .. })
        ));
    }
}
