//! Entity trait defining the persisted-object abstraction

use crate::core::field::FieldValue;
use serde::Serialize;

/// A persisted domain object with a numeric identity
///
/// The identifier is issued by the repository at first save; until then it
/// is `None`. Controllers treat the id as the sole correlation key between
/// a DTO and its entity.
pub trait Entity: Clone + Serialize + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g. "widgets")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g. "widget")
    fn resource_name_singular() -> &'static str;

    /// Numeric identifier, `None` until first persisted
    fn id(&self) -> Option<i64>;

    /// Take on the repository-issued identifier
    fn assign_id(&mut self, id: i64);

    /// Attribute lookup for filter evaluation
    ///
    /// Return `None` for attributes the entity does not expose; filters on
    /// such attributes never match.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Check whether the entity has been persisted yet
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}
