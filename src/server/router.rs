//! Axum routing for token-guarded CRUD controllers
//!
//! The controller itself is transport-agnostic; this module binds it to
//! the HTTP surface: one router per entity, mounted under the entity's
//! plural resource name.

use crate::controller::token::TokenController;
use crate::core::dto::Dto;
use crate::core::entity::Entity;
use crate::core::error::ControllerError;
use crate::core::query::{ListParams, TokenParams};
use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Build the CRUD routes for one entity
///
/// | Verb | Path | Operation |
/// |---|---|---|
/// | GET | `/{resource}` | list |
/// | PUT | `/{resource}` | create |
/// | GET | `/{resource}/{id}` | get |
/// | POST | `/{resource}/{id}` | update |
/// | DELETE | `/{resource}/{id}` | delete |
pub fn controller_routes<E: Entity, D: Dto<E>>(
    controller: Arc<TokenController<E, D>>,
) -> Router {
    let collection = format!("/{}", E::resource_name());
    let item = format!("/{}/{{id}}", E::resource_name());

    Router::new()
        .route(
            &collection,
            get(list_handler::<E, D>).put(create_handler::<E, D>),
        )
        .route(
            &item,
            get(get_handler::<E, D>)
                .post(update_handler::<E, D>)
                .delete(delete_handler::<E, D>),
        )
        .with_state(controller)
}

async fn list_handler<E: Entity, D: Dto<E>>(
    State(controller): State<Arc<TokenController<E, D>>>,
    Query(params): Query<ListParams>,
    Query(raw_params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ControllerError> {
    controller.list(&params, &raw_params).await.map(Json)
}

async fn get_handler<E: Entity, D: Dto<E>>(
    State(controller): State<Arc<TokenController<E, D>>>,
    Path(id): Path<i64>,
    Query(params): Query<TokenParams>,
) -> Result<Json<Value>, ControllerError> {
    controller.get(id, &params).await.map(Json)
}

async fn create_handler<E: Entity, D: Dto<E>>(
    State(controller): State<Arc<TokenController<E, D>>>,
    Query(params): Query<TokenParams>,
    Form(dto): Form<D>,
) -> Result<Json<Value>, ControllerError> {
    controller.create(&dto, &params).await.map(Json)
}

async fn update_handler<E: Entity, D: Dto<E>>(
    State(controller): State<Arc<TokenController<E, D>>>,
    Path(id): Path<i64>,
    Query(params): Query<TokenParams>,
    Form(dto): Form<D>,
) -> Result<Json<Value>, ControllerError> {
    controller.update(id, &dto, &params).await.map(Json)
}

async fn delete_handler<E: Entity, D: Dto<E>>(
    State(controller): State<Arc<TokenController<E, D>>>,
    Path(id): Path<i64>,
    Query(params): Query<TokenParams>,
) -> Result<StatusCode, ControllerError> {
    controller.delete(id, &params).await?;
    Ok(StatusCode::OK)
}
