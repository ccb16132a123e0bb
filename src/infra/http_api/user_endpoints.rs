use axum::{
    Extension,
    extract::{
        Json, Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};

use crate::{
    domain::{
        dto::{AuthParams, AuthResponse, DeletedResponse, UpdatedResponse},
        query::{Page, Pagination, UserFilter},
        user::{Actor, CreateUserParams, UpdateUserParams, User},
    },
    infra::http_api::{AppState, error::ApiError, parse_id},
    use_cases::{
        auth_service::{login, register},
        user_service::{delete_user, get_user_by_id_use, list_users, update_user},
    },
};

pub async fn login_end(
    State(state): State<AppState>,
    payload: Result<Json<AuthParams>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(params) = payload?;

    let response = login(state.db, &state.tokens, params.email, params.password).await?;

    Ok(Json(response))
}

pub async fn register_end(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserParams>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let Json(params) = payload?;

    let user = register(state.db, params, state.bcrypt_cost).await?;

    Ok(Json(user))
}

pub async fn list_users_end(
    State(state): State<AppState>,
    filter: Result<Query<UserFilter>, QueryRejection>,
    pagination: Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<Page<User>>, ApiError> {
    let Query(filter) = filter?;
    let Query(pagination) = pagination?;

    Ok(Json(list_users(state.db, filter, pagination).await?))
}

pub async fn get_user_end(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user_id = parse_id(&id)?;

    Ok(Json(get_user_by_id_use(state.db, user_id).await?))
}

pub async fn update_user_end(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserParams>, JsonRejection>,
) -> Result<Json<UpdatedResponse>, ApiError> {
    let user_id = parse_id(&id)?;
    let Json(params) = payload?;

    update_user(state.db, actor, user_id, params).await?;

    Ok(Json(UpdatedResponse { updated: user_id }))
}

pub async fn delete_user_end(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let user_id = parse_id(&id)?;

    delete_user(state.db, actor, user_id).await?;

    Ok(Json(DeletedResponse { deleted: user_id }))
}
