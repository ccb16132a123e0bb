mod booking_endpoints;
pub mod error;
mod hotel_endpoints;
mod middleware_auth;
mod room_endpoints;
mod user_endpoints;

use std::{str::FromStr, sync::Arc};

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    infra::{
        database::PostgresDatabase,
        http_api::{
            booking_endpoints::{cancel_booking_end, get_booking_end, list_bookings_end},
            error::ApiError,
            hotel_endpoints::{create_hotel_end, get_hotel_end, get_hotel_rooms_end, list_hotels_end},
            middleware_auth::{require_admin, require_auth},
            room_endpoints::{book_room_end, create_room_end, list_rooms_end},
            user_endpoints::{
                delete_user_end, get_user_end, list_users_end, login_end, register_end,
                update_user_end,
            },
        },
    },
    use_cases::auth_service::TokenIssuer,
};

#[derive(Clone)]
pub struct AppState {
    db: Arc<PostgresDatabase>,
    tokens: Arc<TokenIssuer>,
    bcrypt_cost: u32,
}

impl AppState {
    pub fn new(db: Arc<PostgresDatabase>, tokens: Arc<TokenIssuer>, bcrypt_cost: u32) -> Self {
        AppState {
            db,
            tokens,
            bcrypt_cost,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/booking", get(list_bookings_end))
        .route("/hotel", post(create_hotel_end))
        .route("/hotel/{id}/room", post(create_room_end))
        .route_layer(middleware::from_fn(require_admin));

    let v1 = Router::new()
        .route("/user", get(list_users_end))
        .route(
            "/user/{id}",
            get(get_user_end).put(update_user_end).delete(delete_user_end),
        )
        .route("/hotel", get(list_hotels_end))
        .route("/hotel/{id}", get(get_hotel_end))
        .route("/hotel/{id}/rooms", get(get_hotel_rooms_end))
        .route("/room", get(list_rooms_end))
        .route("/room/{id}/book", post(book_room_end))
        .route("/booking/{id}", get(get_booking_end))
        .route("/booking/{id}/cancel", get(cancel_booking_end))
        .nest("/admin", admin)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/", get(health_check))
        .route("/api/auth", post(login_end))
        .route("/api/register", post(register_end))
        .nest("/api/v1", v1)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_http_api(addr: &str, state: AppState) -> std::io::Result<()> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "http api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            error!(error = %err, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

pub async fn health_check() -> &'static str {
    "ok"
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::from_str(raw).map_err(|_| ApiError::bad_request(format!("invalid id: {raw}")))
}
