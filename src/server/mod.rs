//! HTTP surface: per-entity routing and the application-level registry

pub mod registry;
pub mod router;

pub use registry::{ControllerDescriptor, ControllerRegistry, RoutedController};
pub use router::controller_routes;
