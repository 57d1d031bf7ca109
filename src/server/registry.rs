//! Registry collecting per-entity routers into one application router

use crate::controller::token::TokenController;
use crate::core::dto::Dto;
use crate::core::entity::Entity;
use crate::server::router::controller_routes;
use axum::routing::get;
use axum::{Json, Router};
use indexmap::IndexMap;
use serde_json::{Value, json};
use std::sync::Arc;

/// Describes how to mount one entity's routes
pub trait ControllerDescriptor: Send + Sync {
    /// The singular resource name (e.g. "widget")
    fn resource(&self) -> &str;

    /// The plural resource name the routes live under (e.g. "widgets")
    fn resource_plural(&self) -> &str;

    /// Build the CRUD routes for this entity
    fn build_routes(&self) -> Router;
}

/// Descriptor binding a token-guarded controller to its entity's routes
pub struct RoutedController<E: Entity, D: Dto<E>> {
    controller: Arc<TokenController<E, D>>,
}

impl<E: Entity, D: Dto<E>> RoutedController<E, D> {
    pub fn new(controller: Arc<TokenController<E, D>>) -> Self {
        Self { controller }
    }
}

impl<E: Entity, D: Dto<E>> ControllerDescriptor for RoutedController<E, D> {
    fn resource(&self) -> &str {
        E::resource_name_singular()
    }

    fn resource_plural(&self) -> &str {
        E::resource_name()
    }

    fn build_routes(&self) -> Router {
        controller_routes(self.controller.clone())
    }
}

/// Registry for all controllers in the application
///
/// Collects descriptors and produces a single router with every entity's
/// CRUD routes plus the health endpoints.
#[derive(Default)]
pub struct ControllerRegistry {
    descriptors: IndexMap<String, Box<dyn ControllerDescriptor>>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self {
            descriptors: IndexMap::new(),
        }
    }

    /// Register a descriptor; the singular resource name is the key
    pub fn register(&mut self, descriptor: Box<dyn ControllerDescriptor>) {
        let resource = descriptor.resource().to_string();
        self.descriptors.insert(resource, descriptor);
    }

    /// Build the application router: health routes plus all entity routes
    pub fn build_routes(&self) -> Router {
        let mut router = health_routes();
        for descriptor in self.descriptors.values() {
            router = router.merge(descriptor.build_routes());
        }
        router
    }

    /// All registered singular resource names, in registration order
    pub fn resources(&self) -> Vec<&str> {
        self.descriptors.keys().map(String::as_str).collect()
    }
}

fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDescriptor {
        resource: String,
        plural: String,
    }

    impl MockDescriptor {
        fn new(resource: &str, plural: &str) -> Self {
            Self {
                resource: resource.to_string(),
                plural: plural.to_string(),
            }
        }
    }

    impl ControllerDescriptor for MockDescriptor {
        fn resource(&self) -> &str {
            &self.resource
        }

        fn resource_plural(&self) -> &str {
            &self.plural
        }

        fn build_routes(&self) -> Router {
            Router::new()
        }
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = ControllerRegistry::new();
        assert!(registry.resources().is_empty());
    }

    #[test]
    fn test_register_keeps_registration_order() {
        let mut registry = ControllerRegistry::new();
        registry.register(Box::new(MockDescriptor::new("widget", "widgets")));
        registry.register(Box::new(MockDescriptor::new("account", "accounts")));
        assert_eq!(registry.resources(), vec!["widget", "account"]);
    }

    #[test]
    fn test_register_duplicate_replaces() {
        let mut registry = ControllerRegistry::new();
        registry.register(Box::new(MockDescriptor::new("widget", "widgets")));
        registry.register(Box::new(MockDescriptor::new("widget", "gadgets")));
        assert_eq!(registry.resources().len(), 1);
    }

    #[test]
    fn test_build_routes_does_not_panic() {
        let mut registry = ControllerRegistry::new();
        registry.register(Box::new(MockDescriptor::new("widget", "widgets")));
        let _router = registry.build_routes();
    }
}
