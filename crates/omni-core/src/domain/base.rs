//! Audit columns carried by persisted entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Soft-delete flag and audit trail common to every table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BaseEntity {
    pub is_deleted: bool,
    pub created_by: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
    pub updated_date: Option<DateTime<Utc>>,
}

impl BaseEntity {
    /// Stamps creation by `user` at the current time.
    #[must_use]
    pub fn created(user: impl Into<String>) -> Self {
        Self {
            created_by: Some(user.into()),
            created_date: Some(Utc::now()),
            ..Self::default()
        }
    }

    /// Stamps an update by `user` at the current time.
    pub fn touch(&mut self, user: impl Into<String>) {
        self.updated_by = Some(user.into());
        self.updated_date = Some(Utc::now());
    }

    /// Marks the entity as soft-deleted by `user`.
    pub fn soft_delete(&mut self, user: impl Into<String>) {
        self.is_deleted = true;
        self.touch(user);
    }
}
