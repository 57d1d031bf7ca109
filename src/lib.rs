//! # Chassis
//!
//! Scaffolding for building token-guarded REST CRUD controllers in Rust.
//!
//! Applications bring three things: an entity type, its DTO, and a
//! repository. Chassis wires them into a fully guarded CRUD surface:
//!
//! - **Explicit initialization**: controllers refuse every request with
//!   500 until `init` has run.
//! - **Readonly gating**: PUT/POST/DELETE answer 400 unless the controller
//!   was initialized writable.
//! - **Token validation**: an external [`TokenCheck`] collaborator admits
//!   or rejects each request, and its status code is returned verbatim.
//! - **Aspect schemas**: declarative per-field metadata drives query
//!   filters, response projection and update gating, with no reflection.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chassis::prelude::*;
//!
//! let schema = AspectSchema::new()
//!     .with_field("serial", Aspect::new().strict(true))
//!     .with_field("cost", Aspect::new().exported(false).modifiable(false));
//!
//! let mut controller = TokenController::<Widget, WidgetDto>::new(schema);
//! controller.init_with_mode(
//!     Arc::new(InMemoryRepository::new()),
//!     Arc::new(StaticTokenCheck::new(["secret-token"])),
//!     /* readonly */ false,
//! );
//!
//! let app = controller_routes(Arc::new(controller));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! ```
//!
//! [`TokenCheck`]: crate::core::token::TokenCheck

pub mod config;
pub mod controller;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        aspect::{Aspect, AspectSchema},
        dto::{BaseDto, Dto},
        entity::Entity,
        error::ControllerError,
        field::FieldValue,
        query::{FieldFilter, ListParams, ListQuery, TokenParams},
        repository::EntityRepository,
        token::{AllowAllTokenCheck, StaticTokenCheck, TokenCheck},
    };

    // === Controllers ===
    pub use crate::controller::{BaseController, ControllerResult, TokenController};

    // === Server ===
    pub use crate::server::{
        ControllerDescriptor, ControllerRegistry, RoutedController, controller_routes,
    };

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryRepository;

    // === Config ===
    pub use crate::config::ControllerConfig;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};

    // === Axum ===
    pub use axum::{
        Router,
        extract::{Form, Path, Query, State},
        http::StatusCode,
    };
}
