//! Pagination and validation response bodies.

use serde::{Deserialize, Serialize};

/// Page metadata returned alongside list results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationResponse {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub number: u32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub size: u32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub total_elements: u32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub total_pages: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sort: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sort_by: String,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl PaginationResponse {
    /// Builds page metadata for page `number` (0-indexed) of `size` items.
    #[must_use]
    pub fn new(number: u32, size: u32, total_elements: u32) -> Self {
        let total_pages = if size > 0 { total_elements.div_ceil(size) } else { 0 };
        Self {
            number,
            size,
            total_elements,
            total_pages,
            ..Self::default()
        }
    }

    /// Attaches the sort column and direction.
    #[must_use]
    pub fn with_sort(mut self, sort_by: impl Into<String>, sort: impl Into<String>) -> Self {
        self.sort_by = sort_by.into();
        self.sort = sort.into();
        self
    }
}

/// Outcome of a validation-style endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub result: bool,
}
