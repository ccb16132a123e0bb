use axum::{
    Extension,
    extract::{
        Json, Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use chrono::Utc;

use crate::{
    domain::{
        booking::{BookRoomParams, Booking},
        query::{Page, Pagination, RoomFilter},
        room::{CreateRoomParams, Room},
        user::Actor,
    },
    infra::http_api::{AppState, error::ApiError, parse_id},
    use_cases::{
        booking_service::create_booking,
        room_service::{create_room, list_rooms},
    },
};

pub async fn list_rooms_end(
    State(state): State<AppState>,
    filter: Result<Query<RoomFilter>, QueryRejection>,
    pagination: Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<Page<Room>>, ApiError> {
    let Query(filter) = filter?;
    let Query(pagination) = pagination?;

    Ok(Json(list_rooms(state.db, filter, pagination).await?))
}

pub async fn create_room_end(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CreateRoomParams>, JsonRejection>,
) -> Result<Json<Room>, ApiError> {
    let hotel_id = parse_id(&id)?;
    let Json(params) = payload?;

    Ok(Json(create_room(state.db, hotel_id, params).await?))
}

pub async fn book_room_end(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    payload: Result<Json<BookRoomParams>, JsonRejection>,
) -> Result<Json<Booking>, ApiError> {
    let room_id = parse_id(&id)?;
    let Json(params) = payload?;

    let booking = create_booking(state.db, actor, room_id, params, Utc::now()).await?;

    Ok(Json(booking))
}
