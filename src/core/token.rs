//! Token validation collaborator

use axum::http::StatusCode;
use std::collections::HashSet;

/// Per-request validation of an opaque credential
///
/// `Ok(())` admits the request; `Err(status)` short-circuits it with that
/// exact status. `reset_expiration` asks the validator to extend the
/// token's lifetime as a side effect of a successful check. Token storage
/// and expiration bookkeeping live entirely behind this trait.
pub trait TokenCheck: Send + Sync {
    fn status_for(&self, token: Option<&str>, reset_expiration: bool) -> Result<(), StatusCode>;
}

/// Development validator admitting every request
pub struct AllowAllTokenCheck;

impl TokenCheck for AllowAllTokenCheck {
    fn status_for(&self, _token: Option<&str>, _reset_expiration: bool) -> Result<(), StatusCode> {
        Ok(())
    }
}

/// Validator accepting a fixed set of tokens, rejecting the rest with 401
///
/// Useful for tests and single-tenant deployments with pre-shared tokens.
pub struct StaticTokenCheck {
    tokens: HashSet<String>,
}

impl StaticTokenCheck {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }
}

impl TokenCheck for StaticTokenCheck {
    fn status_for(&self, token: Option<&str>, _reset_expiration: bool) -> Result<(), StatusCode> {
        match token {
            Some(token) if self.tokens.contains(token) => Ok(()),
            _ => Err(StatusCode::UNAUTHORIZED),
        }
    }
}
