use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    domain::{
        FieldErrors,
        query::{Page, Pagination, UserFilter},
        user::{Actor, UpdateUserParams, User},
    },
    use_cases::user_database::{UserDatabase, UserDatabaseError},
};

type UserResult<T> = Result<T, UserError>;

pub async fn get_user_by_id_use(db: Arc<impl UserDatabase>, user_id: Uuid) -> UserResult<User> {
    db.get_user_by_id(user_id)
        .await
        .map_err(|err| map_lookup_error(err, user_id))
}

pub async fn list_users(
    db: Arc<impl UserDatabase>,
    filter: UserFilter,
    pagination: Pagination,
) -> UserResult<Page<User>> {
    db.get_users(filter, pagination)
        .await
        .map_err(|err| match err {
            UserDatabaseError::NotFound => UserError::NoUsers,
            err => UserError::DatabaseError(err.to_string()),
        })
}

/// Only first and last name can be changed, by the user or an admin.
pub async fn update_user(
    db: Arc<impl UserDatabase>,
    actor: Actor,
    user_id: Uuid,
    params: UpdateUserParams,
) -> UserResult<()> {
    if !actor.can_access(user_id) {
        warn!(%user_id, actor = %actor.user_id, "forbidden user update");
        return Err(UserError::Forbidden);
    }

    let mut errors = params.field_errors();
    if params.is_empty() {
        errors.insert("body".to_string(), "nothing to update".to_string());
    }
    if !errors.is_empty() {
        return Err(UserError::Validation(errors));
    }

    let matched = db
        .update_user(user_id, params)
        .await
        .map_err(|err| map_lookup_error(err, user_id))?;

    if matched == 0 {
        return Err(UserError::UserNotFound(user_id));
    }

    info!(%user_id, "user updated");

    Ok(())
}

pub async fn delete_user(db: Arc<impl UserDatabase>, actor: Actor, user_id: Uuid) -> UserResult<()> {
    if !actor.can_access(user_id) {
        warn!(%user_id, actor = %actor.user_id, "forbidden user deletion");
        return Err(UserError::Forbidden);
    }

    let deleted = db
        .delete_user(user_id)
        .await
        .map_err(|err| map_lookup_error(err, user_id))?;

    if deleted == 0 {
        return Err(UserError::UserNotFound(user_id));
    }

    info!(%user_id, "user deleted");

    Ok(())
}

fn map_lookup_error(err: UserDatabaseError, user_id: Uuid) -> UserError {
    match err {
        UserDatabaseError::NotFound => UserError::UserNotFound(user_id),
        err => UserError::DatabaseError(err.to_string()),
    }
}

#[derive(Error, Debug)]
pub enum UserError {
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("user {0} not found")]
    UserNotFound(Uuid),
    #[error("no users found")]
    NoUsers,
    #[error("access forbidden")]
    Forbidden,
    #[error("database error: {0}")]
    DatabaseError(String),
}
