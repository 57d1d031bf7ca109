//! Core abstractions: entities, DTOs, aspects, repository and token seams

pub mod aspect;
pub mod dto;
pub mod entity;
pub mod error;
pub mod field;
pub mod query;
pub mod repository;
pub mod token;

pub use aspect::{Aspect, AspectSchema};
pub use dto::{BaseDto, Dto};
pub use entity::Entity;
pub use error::ControllerError;
pub use field::FieldValue;
pub use query::{DEFAULT_LIMIT, DEFAULT_MAX_LIMIT, FieldFilter, ListParams, ListQuery, TokenParams};
pub use repository::EntityRepository;
pub use token::{AllowAllTokenCheck, StaticTokenCheck, TokenCheck};
