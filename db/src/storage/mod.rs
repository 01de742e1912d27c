use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{DbUlid, DbUser};

pub mod mongodb;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Query Error: {0}")]
    MongoDB(#[from] ::mongodb::error::Error),

    #[error(transparent)]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Which fields of a user record to overwrite. Absent fields are left
/// untouched by the update.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub profile_picture: Option<String>,
    pub password_hash: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.profile_picture.is_none()
            && self.password_hash.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// One offset-based page of the user collection, ordered by creation
/// time. Offsets shift under concurrent writes; callers accept that.
#[derive(Debug, Clone, Copy)]
pub struct UserPage {
    pub skip: u64,
    pub limit: i64,
    pub sort: SortOrder,
}

#[async_trait]
pub trait UserStore {
    async fn get(&self, id: &DbUlid) -> Result<Option<DbUser>, StoreError>;

    /// Apply a partial update and return the post-update record, or
    /// `None` when no record matches `id`.
    async fn update(&self, id: &DbUlid, patch: UserPatch) -> Result<Option<DbUser>, StoreError>;

    /// Delete by id. Deleting an id with no record is not an error.
    async fn delete(&self, id: &DbUlid) -> Result<(), StoreError>;

    async fn list(&self, page: UserPage) -> Result<Vec<DbUser>, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;

    /// Count records created at or after `since`.
    async fn count_created_since(&self, since: DateTime<Utc>) -> Result<u64, StoreError>;
}

#[async_trait]
pub trait Storage: UserStore + Send + Sync + 'static {
    async fn ping(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_patch_is_empty() {
        assert!(UserPatch::default().is_empty());
    }

    #[test]
    fn patch_with_any_field_is_not_empty() {
        let patch = UserPatch {
            email: Some("someuser@example.com".into()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
