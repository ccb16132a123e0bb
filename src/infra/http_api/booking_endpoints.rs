use axum::{
    Extension,
    extract::{Json, Path, Query, State, rejection::QueryRejection},
};

use crate::{
    domain::{
        booking::Booking,
        query::{BookingFilter, Page, Pagination},
        user::Actor,
    },
    infra::http_api::{AppState, error::ApiError, parse_id},
    use_cases::booking_service::{cancel_booking, get_booking, list_bookings},
};

pub async fn get_booking_end(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, ApiError> {
    let booking_id = parse_id(&id)?;

    Ok(Json(get_booking(state.db, booking_id, actor).await?))
}

pub async fn cancel_booking_end(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, ApiError> {
    let booking_id = parse_id(&id)?;

    Ok(Json(cancel_booking(state.db, booking_id, actor).await?))
}

pub async fn list_bookings_end(
    State(state): State<AppState>,
    filter: Result<Query<BookingFilter>, QueryRejection>,
    pagination: Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<Page<Booking>>, ApiError> {
    let Query(filter) = filter?;
    let Query(pagination) = pagination?;

    Ok(Json(list_bookings(state.db, filter, pagination).await?))
}
