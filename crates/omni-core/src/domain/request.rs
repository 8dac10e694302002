//! Request shapes reused by service handlers.

use serde::{Deserialize, Serialize};

/// Soft-delete request carrying the acting user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub id: u64,
    pub logged_user_id: u64,
    pub logged_user: String,
}

/// Lookup by primary key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindByIdRequest {
    pub id: u64,
}

/// Free-text search with paging and sorting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub text_search: String,
    #[serde(default)]
    pub start: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub sort_by: String,
    #[serde(default)]
    pub sort: String,
}

impl SearchRequest {
    /// Returns the search text as a `LIKE` pattern.
    #[must_use]
    pub fn like_pattern(&self) -> String {
        format!("%{}%", self.text_search.trim())
    }
}

/// Caller session resolved from request headers by the HTTP layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRequest {
    #[serde(default)]
    pub user_id: u64,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub access_token: String,
}
