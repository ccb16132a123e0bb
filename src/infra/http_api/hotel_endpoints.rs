use axum::extract::{
    Json, Path, Query, State,
    rejection::{JsonRejection, QueryRejection},
};

use crate::{
    domain::{
        hotel::{CreateHotelParams, Hotel},
        query::{HotelFilter, Page, Pagination},
        room::Room,
    },
    infra::http_api::{AppState, error::ApiError, parse_id},
    use_cases::{
        hotel_service::{create_hotel, get_hotel, list_hotels},
        room_service::get_hotel_rooms,
    },
};

pub async fn list_hotels_end(
    State(state): State<AppState>,
    filter: Result<Query<HotelFilter>, QueryRejection>,
    pagination: Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<Page<Hotel>>, ApiError> {
    let Query(filter) = filter?;
    let Query(pagination) = pagination?;

    Ok(Json(list_hotels(state.db, filter, pagination).await?))
}

pub async fn get_hotel_end(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Hotel>, ApiError> {
    let hotel_id = parse_id(&id)?;

    Ok(Json(get_hotel(state.db, hotel_id).await?))
}

pub async fn get_hotel_rooms_end(
    State(state): State<AppState>,
    Path(id): Path<String>,
    pagination: Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<Page<Room>>, ApiError> {
    let hotel_id = parse_id(&id)?;
    let Query(pagination) = pagination?;

    Ok(Json(get_hotel_rooms(state.db, hotel_id, pagination).await?))
}

pub async fn create_hotel_end(
    State(state): State<AppState>,
    payload: Result<Json<CreateHotelParams>, JsonRejection>,
) -> Result<Json<Hotel>, ApiError> {
    let Json(params) = payload?;

    Ok(Json(create_hotel(state.db, params).await?))
}
