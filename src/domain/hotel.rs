use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{FieldErrors, field_messages};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub rating: i32,
    /// Room ids in creation order, only ever appended to.
    pub rooms: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateHotelParams {
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "location cannot be empty"))]
    pub location: String,
    #[validate(range(min = 1, max = 5, message = "rating should be between 1 and 5"))]
    pub rating: i32,
}

impl CreateHotelParams {
    pub fn field_errors(&self) -> FieldErrors {
        match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => field_messages(&errors),
        }
    }
}

#[cfg(test)]
mod test {
    use super::CreateHotelParams;

    #[test]
    fn rating_outside_one_to_five_is_rejected() {
        for rating in [0, 6, -1] {
            let params = CreateHotelParams {
                name: "Bellucia".into(),
                location: "France".into(),
                rating,
            };
            assert!(params.field_errors().contains_key("rating"));
        }

        let params = CreateHotelParams {
            name: "".into(),
            location: "France".into(),
            rating: 5,
        };
        let errors = params.field_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["name"], "name cannot be empty");
    }
}
