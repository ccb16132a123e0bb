//! Listing filters and pagination.
//!
//! Every filter field is optional and only narrows the result when it is
//! present, so a legitimate zero (price 0, `canceled = false`) is never
//! mistaken for "not given".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{booking::DateRange, room::RoomSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationDefaults {
    pub page: u32,
    pub limit: u32,
    /// Upper bound for a client supplied `limit`.
    pub max_limit: u32,
}

impl Default for PaginationDefaults {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            max_limit: 100,
        }
    }
}

/// Page cursor as sent by the client, zero or missing means "use the default".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Pagination {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// A resolved pagination window, `page` and `limit` are both at least 1
/// and `limit` never exceeds the configured maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub limit: u32,
}

impl Pagination {
    pub fn resolve(&self, defaults: &PaginationDefaults) -> PageWindow {
        let page = self
            .page
            .filter(|page| *page > 0)
            .unwrap_or(defaults.page.max(1));
        let max_limit = defaults.max_limit.max(1);
        let limit = self
            .limit
            .filter(|limit| *limit > 0)
            .unwrap_or(defaults.limit.max(1))
            .min(max_limit);

        PageWindow { page, limit }
    }
}

impl PageWindow {
    /// Saturates instead of overflowing, a page far past the end is simply empty.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1).saturating_mul(i64::from(self.limit))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    /// Size of the whole filtered set, not just this page.
    pub total: i64,
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub is_admin: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelFilter {
    pub name: Option<String>,
    pub location: Option<String>,
    pub rating: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomFilter {
    pub size: Option<RoomSize>,
    pub seaside: Option<bool>,
    pub from_price: Option<f64>,
    pub to_price: Option<f64>,
    #[serde(rename = "hotelID")]
    pub hotel_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFilter {
    #[serde(rename = "userID")]
    pub user_id: Option<Uuid>,
    #[serde(rename = "roomID")]
    pub room_id: Option<Uuid>,
    pub num_persons: Option<i32>,
    /// Alone: bookings starting at or after this instant. Together with
    /// `till_date`: bookings overlapping the range.
    pub from_date: Option<DateTime<Utc>>,
    /// Alone: bookings ending at or before this instant.
    pub till_date: Option<DateTime<Utc>>,
    pub canceled: Option<bool>,
}

impl BookingFilter {
    /// Active bookings of `room_id` that overlap `range`.
    pub fn conflicts_with(room_id: Uuid, range: DateRange) -> Self {
        BookingFilter {
            room_id: Some(room_id),
            from_date: Some(range.from),
            till_date: Some(range.till),
            canceled: Some(false),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_and_missing_fall_back_to_defaults() {
        let defaults = PaginationDefaults::default();

        let window = Pagination::default().resolve(&defaults);
        assert_eq!(window, PageWindow { page: 1, limit: 10 });
        assert_eq!(window.offset(), 0);

        let window = Pagination {
            page: Some(0),
            limit: Some(0),
        }
        .resolve(&defaults);
        assert_eq!(window, PageWindow { page: 1, limit: 10 });
    }

    #[test]
    fn offset_skips_previous_pages() {
        let window = Pagination {
            page: Some(3),
            limit: Some(25),
        }
        .resolve(&PaginationDefaults::default());

        assert_eq!(window.offset(), 50);
        assert_eq!(window.limit, 25);
    }

    #[test]
    fn configured_defaults_are_used() {
        let defaults = PaginationDefaults {
            page: 2,
            limit: 50,
            max_limit: 100,
        };
        let window = Pagination::default().resolve(&defaults);
        assert_eq!(window, PageWindow { page: 2, limit: 50 });
    }

    #[test]
    fn oversized_limit_is_clamped() {
        let window = Pagination {
            page: Some(1),
            limit: Some(4_000_000_000),
        }
        .resolve(&PaginationDefaults::default());

        assert_eq!(window.limit, 100);
    }

    #[test]
    fn extreme_page_and_limit_do_not_overflow() {
        let window = Pagination {
            page: Some(u32::MAX),
            limit: Some(u32::MAX),
        };

        let clamped = window.resolve(&PaginationDefaults::default());
        assert_eq!(clamped.offset(), (i64::from(u32::MAX) - 1) * 100);

        let unbounded = window.resolve(&PaginationDefaults {
            page: 1,
            limit: 10,
            max_limit: u32::MAX,
        });
        assert_eq!(unbounded.offset(), i64::MAX);
    }

    #[test]
    fn conflict_filter_excludes_canceled_bookings() {
        let room_id = Uuid::new_v4();
        let range = DateRange {
            from: Utc::now(),
            till: Utc::now() + chrono::Duration::days(2),
        };

        let filter = BookingFilter::conflicts_with(room_id, range);
        assert_eq!(filter.room_id, Some(room_id));
        assert_eq!(filter.canceled, Some(false));
        assert_eq!(filter.from_date, Some(range.from));
        assert_eq!(filter.till_date, Some(range.till));
        assert_eq!(filter.user_id, None);
        assert_eq!(filter.num_persons, None);
    }
}
