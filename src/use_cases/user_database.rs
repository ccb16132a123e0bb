use mockall::automock;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    query::{Page, Pagination, UserFilter},
    user::{UpdateUserParams, User},
};

pub type UserDatabaseResult<T> = Result<T, UserDatabaseError>;

#[automock]
pub trait UserDatabase: Send + Sync {
    async fn create_user(&self, user: User) -> UserDatabaseResult<User>;

    async fn get_user_by_id(&self, user_id: Uuid) -> UserDatabaseResult<User>;

    async fn get_user_by_email(&self, email: String) -> UserDatabaseResult<User>;

    /// `NotFound` when the requested page is empty.
    async fn get_users(
        &self,
        filter: UserFilter,
        pagination: Pagination,
    ) -> UserDatabaseResult<Page<User>>;

    /// Returns the number of matched rows.
    async fn update_user(&self, user_id: Uuid, update: UpdateUserParams)
    -> UserDatabaseResult<u64>;

    /// Returns the number of deleted rows.
    async fn delete_user(&self, user_id: Uuid) -> UserDatabaseResult<u64>;
}

#[derive(Debug, Error)]
pub enum UserDatabaseError {
    #[error("user not found")]
    NotFound,

    #[error("user already exists: {0}")]
    Conflict(String),

    #[error("Internal DB error: {0}")]
    InternalDBError(String),
}
