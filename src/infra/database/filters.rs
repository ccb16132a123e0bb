//! Translation of listing filters into SQL predicates.
//!
//! Every builder starts from `... WHERE TRUE` so each present filter field
//! appends one `AND` clause, values are always bound.

use sqlx::{Postgres, QueryBuilder};

use crate::domain::query::{BookingFilter, HotelFilter, PageWindow, RoomFilter, UserFilter};

pub(crate) type Query = QueryBuilder<'static, Postgres>;

pub(crate) fn push_user_filter(query: &mut Query, filter: &UserFilter) {
    if let Some(first_name) = &filter.first_name {
        query.push(" AND first_name = ").push_bind(first_name.clone());
    }
    if let Some(last_name) = &filter.last_name {
        query.push(" AND last_name = ").push_bind(last_name.clone());
    }
    if let Some(email) = &filter.email {
        query.push(" AND email = ").push_bind(email.clone());
    }
    if let Some(is_admin) = filter.is_admin {
        query.push(" AND is_admin = ").push_bind(is_admin);
    }
}

pub(crate) fn push_hotel_filter(query: &mut Query, filter: &HotelFilter) {
    if let Some(name) = &filter.name {
        query.push(" AND name = ").push_bind(name.clone());
    }
    if let Some(location) = &filter.location {
        query.push(" AND location = ").push_bind(location.clone());
    }
    if let Some(rating) = filter.rating {
        query.push(" AND rating = ").push_bind(rating);
    }
}

pub(crate) fn push_room_filter(query: &mut Query, filter: &RoomFilter) {
    if let Some(size) = filter.size {
        query.push(" AND size = ").push_bind(size);
    }
    if let Some(seaside) = filter.seaside {
        query.push(" AND seaside = ").push_bind(seaside);
    }
    if let Some(from_price) = filter.from_price {
        query.push(" AND price >= ").push_bind(from_price);
    }
    if let Some(to_price) = filter.to_price {
        query.push(" AND price <= ").push_bind(to_price);
    }
    if let Some(hotel_id) = filter.hotel_id {
        query.push(" AND hotel_id = ").push_bind(hotel_id);
    }
}

pub(crate) fn push_booking_filter(query: &mut Query, filter: &BookingFilter) {
    if let Some(user_id) = filter.user_id {
        query.push(" AND user_id = ").push_bind(user_id);
    }
    if let Some(room_id) = filter.room_id {
        query.push(" AND room_id = ").push_bind(room_id);
    }
    if let Some(num_persons) = filter.num_persons {
        query.push(" AND num_persons = ").push_bind(num_persons);
    }

    match (filter.from_date, filter.till_date) {
        // Inclusive overlap, see `DateRange::overlaps`.
        (Some(from), Some(till)) => {
            query
                .push(" AND from_date <= ")
                .push_bind(till)
                .push(" AND till_date >= ")
                .push_bind(from);
        }
        (Some(from), None) => {
            query.push(" AND from_date >= ").push_bind(from);
        }
        (None, Some(till)) => {
            query.push(" AND till_date <= ").push_bind(till);
        }
        (None, None) => {}
    }

    if let Some(canceled) = filter.canceled {
        query.push(" AND canceled = ").push_bind(canceled);
    }
}

/// Stable insertion order, then the page slice.
pub(crate) fn push_window(query: &mut Query, window: &PageWindow) {
    query
        .push(" ORDER BY created_at, id LIMIT ")
        .push_bind(i64::from(window.limit))
        .push(" OFFSET ")
        .push_bind(window.offset());
}
