use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    #[serde(rename = "userID")]
    pub user_id: Uuid,
    #[serde(rename = "roomID")]
    pub room_id: Uuid,
    pub num_persons: i32,
    pub from_date: DateTime<Utc>,
    pub till_date: DateTime<Utc>,
    pub canceled: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingState {
    Active,
    /// Terminal, there is no way back to `Active`.
    Canceled,
}

impl Booking {
    pub fn state(&self) -> BookingState {
        if self.canceled {
            BookingState::Canceled
        } else {
            BookingState::Active
        }
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            from: self.from_date,
            till: self.till_date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub till: DateTime<Utc>,
}

impl DateRange {
    /// Inclusive on both ends: ranges sharing a single instant overlap.
    /// Must stay in sync with the booking filter SQL and the
    /// `bookings_no_overlap` exclusion constraint.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.from <= other.till && self.till >= other.from
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRoomParams {
    pub from_date: DateTime<Utc>,
    pub till_date: DateTime<Utc>,
    pub num_persons: i32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidBookingParams {
    #[error("from date cannot be after till date")]
    FromAfterTill,
    #[error("from date and till date cannot be equal")]
    EmptyRange,
    #[error("cannot book a room in the past")]
    InThePast,
    #[error("number of persons should be at least 1")]
    NoPersons,
}

impl BookRoomParams {
    pub fn validate(&self, now: DateTime<Utc>) -> Result<DateRange, InvalidBookingParams> {
        if self.from_date > self.till_date {
            return Err(InvalidBookingParams::FromAfterTill);
        }
        if self.from_date == self.till_date {
            return Err(InvalidBookingParams::EmptyRange);
        }
        if now > self.from_date {
            return Err(InvalidBookingParams::InThePast);
        }
        if self.num_persons < 1 {
            return Err(InvalidBookingParams::NoPersons);
        }

        Ok(DateRange {
            from: self.from_date,
            till: self.till_date,
        })
    }
}

#[cfg(test)]
mod test {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap() + Duration::days(n)
    }

    fn range(from: i64, till: i64) -> DateRange {
        DateRange {
            from: day(from),
            till: day(till),
        }
    }

    #[test]
    fn overlap_is_symmetric() {
        let ranges = [
            range(1, 8),
            range(8, 15),
            range(3, 5),
            range(0, 1),
            range(9, 10),
            range(0, 20),
        ];

        for a in &ranges {
            for b in &ranges {
                assert_eq!(a.overlaps(b), b.overlaps(a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn touching_ranges_conflict_on_both_sides() {
        let existing = range(1, 8);

        assert!(range(8, 15).overlaps(&existing));
        assert!(range(0, 1).overlaps(&existing));
    }

    #[test]
    fn disjoint_and_nested_ranges() {
        let existing = range(1, 8);

        assert!(!range(9, 12).overlaps(&existing));
        assert!(!range(-5, 0).overlaps(&existing));
        assert!(range(3, 5).overlaps(&existing));
        assert!(range(0, 20).overlaps(&existing));
    }

    #[test]
    fn params_validation() {
        let now = day(0);
        let params = |from, till, persons| BookRoomParams {
            from_date: day(from),
            till_date: day(till),
            num_persons: persons,
        };

        assert_eq!(params(1, 8, 2).validate(now), Ok(range(1, 8)));
        assert_eq!(
            params(8, 1, 2).validate(now),
            Err(InvalidBookingParams::FromAfterTill)
        );
        assert_eq!(
            params(3, 3, 2).validate(now),
            Err(InvalidBookingParams::EmptyRange)
        );
        assert_eq!(
            params(-1, 3, 2).validate(now),
            Err(InvalidBookingParams::InThePast)
        );
        assert_eq!(
            params(1, 3, 0).validate(now),
            Err(InvalidBookingParams::NoPersons)
        );
    }

    #[test]
    fn booking_state_follows_canceled_flag() {
        let mut booking = Booking {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            room_id: Uuid::new_v4(),
            num_persons: 2,
            from_date: day(1),
            till_date: day(8),
            canceled: false,
            created_at: day(0),
        };
        assert_eq!(booking.state(), BookingState::Active);
        assert_eq!(booking.range(), range(1, 8));

        booking.canceled = true;
        assert_eq!(booking.state(), BookingState::Canceled);
    }

    #[test]
    fn booking_json_uses_id_suffixes() {
        let booking = Booking {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            room_id: Uuid::new_v4(),
            num_persons: 2,
            from_date: day(1),
            till_date: day(8),
            canceled: false,
            created_at: day(0),
        };

        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(json["userID"], booking.user_id.to_string());
        assert_eq!(json["roomID"], booking.room_id.to_string());
        assert_eq!(json["numPersons"], 2);
    }
}
