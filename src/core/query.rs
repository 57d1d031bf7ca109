//! List request parameters and repository-side filters

use crate::core::aspect::AspectSchema;
use crate::core::entity::Entity;
use crate::core::field::FieldValue;
use regex::RegexBuilder;
use serde::Deserialize;
use std::collections::HashMap;

/// Page size applied when a list request carries no limit
pub const DEFAULT_LIMIT: usize = 50;

/// Upper bound for client-supplied limits unless configured otherwise
pub const DEFAULT_MAX_LIMIT: usize = 1000;

/// Query parameters of a list request
///
/// ```text
/// GET /widgets?limit=10&offset=20&token=abc&name=Fr%25
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListParams {
    /// Page size, defaults to 50
    pub limit: usize,
    /// Number of entities to skip, defaults to 0
    pub offset: usize,
    /// Ask the token validator to extend the token's lifetime
    pub reset_token: bool,
    /// Opaque credential, validated externally
    pub token: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            reset_token: true,
            token: None,
        }
    }
}

/// Query parameters shared by the single-entity verbs
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TokenParams {
    pub reset_token: bool,
    pub token: Option<String>,
}

impl Default for TokenParams {
    fn default() -> Self {
        Self {
            reset_token: true,
            token: None,
        }
    }
}

/// A single filter derived from a query parameter
///
/// Strict filters compare exactly; non-strict filters match
/// case-insensitively and honor `%` wildcards, as in a SQL LIKE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: String,
    pub value: String,
    pub strict: bool,
}

impl FieldFilter {
    pub fn matches(&self, value: Option<FieldValue>) -> bool {
        let Some(text) = value.and_then(|v| v.to_query_string()) else {
            return false;
        };
        if self.strict {
            text == self.value
        } else {
            like_match(&self.value, &text)
        }
    }
}

/// Case-insensitive match supporting `%` wildcards
fn like_match(pattern: &str, text: &str) -> bool {
    let escaped: Vec<String> = pattern.split('%').map(|part| regex::escape(part)).collect();
    let pattern = format!("^{}$", escaped.join(".*"));
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map(|re| re.is_match(text))
        .unwrap_or(false)
}

/// Repository-facing list request: clamped paging plus schema-derived filters
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub limit: usize,
    pub offset: usize,
    pub filters: Vec<FieldFilter>,
}

/// Query parameter names that never become filters
const RESERVED_PARAMS: [&str; 4] = ["limit", "offset", "token", "reset_token"];

impl ListQuery {
    /// Build the repository query from raw request parameters
    ///
    /// Paging is clamped to `1..=max_limit`; leftover parameters become
    /// filters for filterable attributes, everything else is dropped.
    pub fn from_params(
        params: &ListParams,
        raw: &HashMap<String, String>,
        schema: &AspectSchema,
        max_limit: usize,
    ) -> Self {
        let filters = raw
            .iter()
            .filter(|(name, _)| !RESERVED_PARAMS.contains(&name.as_str()))
            .filter(|(name, _)| schema.is_filterable(name))
            .map(|(name, value)| FieldFilter {
                field: name.clone(),
                value: value.clone(),
                strict: schema.is_strict(name),
            })
            .collect();

        Self {
            limit: params.limit.clamp(1, max_limit.max(1)),
            offset: params.offset,
            filters,
        }
    }

    /// Evaluate all filters against an entity; every filter must match
    pub fn matches<E: Entity>(&self, entity: &E) -> bool {
        self.filters
            .iter()
            .all(|filter| filter.matches(entity.field(&filter.field)))
    }
}
