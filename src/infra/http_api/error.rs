use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::{
    domain::FieldErrors,
    use_cases::{
        auth_service::AuthError, booking_service::BookingError, hotel_service::HotelError,
        room_service::RoomError, user_service::UserError,
    },
};

/// Error returned by every handler, rendered as
/// `{ "code", "kind", "message", "fields"? }`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
    fields: Option<FieldErrors>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: u16,
    kind: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a FieldErrors>,
}

impl ApiError {
    fn new(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Self {
        ApiError {
            status,
            kind,
            message: message.into(),
            fields: None,
        }
    }

    pub fn validation(fields: FieldErrors) -> Self {
        ApiError {
            fields: Some(fields),
            ..Self::new(StatusCode::BAD_REQUEST, "validation", "validation failed")
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "validation", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "forbidden", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "conflict", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = if self.status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self.message, "request failed");
            "internal server error"
        } else {
            self.message.as_str()
        };

        let body = ErrorBody {
            code: self.status.as_u16(),
            kind: self.kind,
            message,
            fields: self.fields.as_ref(),
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(fields) => ApiError::validation(fields),
            AuthError::InvalidCredentials | AuthError::InvalidToken | AuthError::TokenExpired => {
                ApiError::unauthorized(err.to_string())
            }
            AuthError::EmailTaken => ApiError::conflict(err.to_string()),
            AuthError::PasswordHashingFailed(_)
            | AuthError::DatabaseError(_)
            | AuthError::ErrorVerifying(_)
            | AuthError::EncodingTokenError => ApiError::internal(err.to_string()),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(fields) => ApiError::validation(fields),
            UserError::UserNotFound(_) | UserError::NoUsers => ApiError::not_found(err.to_string()),
            UserError::Forbidden => ApiError::forbidden(err.to_string()),
            UserError::DatabaseError(_) => ApiError::internal(err.to_string()),
        }
    }
}

impl From<HotelError> for ApiError {
    fn from(err: HotelError) -> Self {
        match err {
            HotelError::Validation(fields) => ApiError::validation(fields),
            HotelError::HotelNotFound(_) | HotelError::NoHotels => {
                ApiError::not_found(err.to_string())
            }
            HotelError::DatabaseError(_) => ApiError::internal(err.to_string()),
        }
    }
}

impl From<RoomError> for ApiError {
    fn from(err: RoomError) -> Self {
        match err {
            RoomError::Validation(fields) => ApiError::validation(fields),
            RoomError::HotelNotFound(_) | RoomError::NoRooms => ApiError::not_found(err.to_string()),
            RoomError::DatabaseError(_) => ApiError::internal(err.to_string()),
        }
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::InvalidParams(message) => ApiError::invalid(message),
            BookingError::RoomAlreadyBooked(_) => ApiError::conflict(err.to_string()),
            BookingError::RoomNotFound(_)
            | BookingError::BookingNotFound(_)
            | BookingError::NoBookings => ApiError::not_found(err.to_string()),
            BookingError::Forbidden => ApiError::forbidden(err.to_string()),
            BookingError::DatabaseError(_) => ApiError::internal(err.to_string()),
        }
    }
}
