//! CRUD controllers: the explicit-init base core and the token-guarded wrapper

pub mod base;
pub mod token;

pub use base::{BaseController, ControllerResult};
pub use token::TokenController;
