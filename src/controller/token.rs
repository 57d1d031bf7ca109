//! Token-guarded controller wrapping the base CRUD core
//!
//! Each request runs through ordered precondition gates before reaching the
//! repository; every gate is independent and the first failure wins. GET
//! verbs gate on init then token. Mutating verbs gate on init, then the
//! readonly flag, then the token. The internal delete operation re-runs the
//! full gate sequence before loading the entity, so the token check fires
//! twice on the delete path.

use crate::controller::base::{BaseController, ControllerResult};
use crate::core::aspect::AspectSchema;
use crate::core::dto::Dto;
use crate::core::entity::Entity;
use crate::core::error::ControllerError;
use crate::core::query::{ListParams, TokenParams};
use crate::core::repository::EntityRepository;
use crate::core::token::TokenCheck;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Token-validating CRUD controller for one entity type
///
/// Starts uninitialized and readonly. `init` keeps the controller readonly;
/// `init_with_mode` can enable the mutating verbs. Configuration is set
/// once at init and only read afterwards, so an initialized controller can
/// be shared behind an `Arc` across request handlers.
pub struct TokenController<E: Entity, D: Dto<E>> {
    base: BaseController<E, D>,
    token_check: Option<Arc<dyn TokenCheck>>,
    readonly: bool,
}

impl<E: Entity, D: Dto<E>> TokenController<E, D> {
    pub fn new(schema: AspectSchema) -> Self {
        Self {
            base: BaseController::new(schema),
            token_check: None,
            readonly: true,
        }
    }

    /// Cap client-supplied list limits
    pub fn with_max_limit(mut self, max_limit: usize) -> Self {
        self.base = self.base.with_max_limit(max_limit);
        self
    }

    /// Initialize as a readonly controller
    pub fn init(
        &mut self,
        repository: Arc<dyn EntityRepository<E>>,
        token_check: Arc<dyn TokenCheck>,
    ) {
        self.init_with_mode(repository, token_check, true);
    }

    /// Initialize, choosing whether mutating verbs stay disabled
    pub fn init_with_mode(
        &mut self,
        repository: Arc<dyn EntityRepository<E>>,
        token_check: Arc<dyn TokenCheck>,
        readonly: bool,
    ) {
        self.base.init(repository);
        self.token_check = Some(token_check);
        self.readonly = readonly;
    }

    pub fn is_initialized(&self) -> bool {
        self.base.is_initialized() && self.token_check.is_some()
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    pub fn schema(&self) -> &AspectSchema {
        self.base.schema()
    }

    fn guard_initialized(&self) -> ControllerResult<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            tracing::error!("uninitialized controller, call init before handling requests");
            Err(ControllerError::Uninitialized)
        }
    }

    fn guard_writable(&self) -> ControllerResult<()> {
        if self.readonly {
            Err(ControllerError::WriteDisabled)
        } else {
            Ok(())
        }
    }

    fn guard_token(&self, token: Option<&str>, reset_expiration: bool) -> ControllerResult<()> {
        let Some(check) = &self.token_check else {
            return Err(ControllerError::Uninitialized);
        };
        tracing::debug!(reset_expiration, "checking token validity");
        check
            .status_for(token, reset_expiration)
            .map_err(ControllerError::TokenRejected)
    }

    /// GET list: init gate, token gate, then the base list operation
    pub async fn list(
        &self,
        params: &ListParams,
        raw_params: &HashMap<String, String>,
    ) -> ControllerResult<Value> {
        self.guard_initialized()?;
        tracing::trace!(
            limit = params.limit,
            offset = params.offset,
            reset_token = params.reset_token,
            "GET list of {}",
            E::resource_name()
        );
        self.guard_token(params.token.as_deref(), params.reset_token)?;
        self.base.list(params, raw_params).await
    }

    /// GET by id: init gate, token gate, then the base get operation
    pub async fn get(&self, id: i64, params: &TokenParams) -> ControllerResult<Value> {
        self.guard_initialized()?;
        tracing::trace!(id, reset_token = params.reset_token, "GET by id");
        self.guard_token(params.token.as_deref(), params.reset_token)?;
        self.base.get(id).await
    }

    /// PUT: init gate, readonly gate, token gate, then create
    pub async fn create(&self, dto: &D, params: &TokenParams) -> ControllerResult<Value> {
        self.guard_initialized()?;
        self.guard_writable()?;
        self.guard_token(params.token.as_deref(), params.reset_token)?;
        self.base.create(dto).await
    }

    /// POST by id: init gate, readonly gate, token gate, then update
    pub async fn update(&self, id: i64, dto: &D, params: &TokenParams) -> ControllerResult<Value> {
        self.guard_initialized()?;
        tracing::trace!(id, reset_token = params.reset_token, "POST by id");
        self.guard_writable()?;
        self.guard_token(params.token.as_deref(), params.reset_token)?;
        self.base.update(id, dto).await
    }

    /// DELETE by id: init gate, readonly gate, token gate, then the
    /// internal delete, which repeats all three gates
    pub async fn delete(&self, id: i64, params: &TokenParams) -> ControllerResult<()> {
        self.guard_initialized()?;
        self.guard_writable()?;
        self.guard_token(params.token.as_deref(), params.reset_token)?;
        self.delete_checked(id, params).await
    }

    async fn delete_checked(&self, id: i64, params: &TokenParams) -> ControllerResult<()> {
        self.guard_initialized()?;
        self.guard_writable()?;
        self.guard_token(params.token.as_deref(), params.reset_token)?;
        self.base.delete(id).await
    }
}
