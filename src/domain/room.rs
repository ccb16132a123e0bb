use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{FieldErrors, field_messages};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "room_size", rename_all = "lowercase")]
pub enum RoomSize {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    pub size: RoomSize,
    pub seaside: bool,
    pub price: f64,
    #[serde(rename = "hotelID")]
    pub hotel_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomParams {
    pub size: RoomSize,
    pub seaside: bool,
    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: f64,
}

impl CreateRoomParams {
    pub fn field_errors(&self) -> FieldErrors {
        match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => field_messages(&errors),
        }
    }
}
