//! Process configuration, read from the environment (and `.env` through
//! `dotenvy` in `main`).
//!
//! Only `DATABASE_URL` and `JWT_SECRET` are required.

use std::fmt;

use chrono::Duration;
use serde::Deserialize;

use crate::{domain::query::PaginationDefaults, use_cases::auth_service::TokenIssuer};

#[derive(Clone, Deserialize)]
pub struct AppConfig {
    /// Env: `DATABASE_URL`
    pub database_url: String,

    /// HS256 signing secret. Env: `JWT_SECRET`
    pub jwt_secret: String,

    /// Env: `LISTEN_ADDR`, default `0.0.0.0:3000`
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Env: `TOKEN_TTL_HOURS`, default 4
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,

    /// Env: `BCRYPT_COST`, default `bcrypt::DEFAULT_COST`
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    #[serde(default = "default_page")]
    pub default_page: u32,

    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Env: `MAX_PAGE_LIMIT`, default 100
    #[serde(default = "default_max_page_limit")]
    pub max_page_limit: u32,

    #[serde(default = "default_max_db_connections")]
    pub max_db_connections: u32,
}

fn default_listen_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_token_ttl_hours() -> i64 {
    4
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

fn default_page() -> u32 {
    PaginationDefaults::default().page
}

fn default_limit() -> u32 {
    PaginationDefaults::default().limit
}

fn default_max_page_limit() -> u32 {
    PaginationDefaults::default().max_limit
}

fn default_max_db_connections() -> u32 {
    10
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env::<AppConfig>()
    }

    pub fn pagination_defaults(&self) -> PaginationDefaults {
        let fallback = PaginationDefaults::default();

        PaginationDefaults {
            page: if self.default_page == 0 { fallback.page } else { self.default_page },
            limit: if self.default_limit == 0 { fallback.limit } else { self.default_limit },
            max_limit: if self.max_page_limit == 0 {
                fallback.max_limit
            } else {
                self.max_page_limit
            },
        }
    }

    pub fn token_issuer(&self) -> TokenIssuer {
        TokenIssuer::new(&self.jwt_secret, Duration::hours(self.token_ttl_hours))
    }
}

// Keeps the secret and the connection string out of the logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("listen_addr", &self.listen_addr)
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("default_page", &self.default_page)
            .field("default_limit", &self.default_limit)
            .field("max_page_limit", &self.max_page_limit)
            .field("max_db_connections", &self.max_db_connections)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod test {
    use super::AppConfig;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_only_required_vars_are_set() {
        let config = envy::from_iter::<_, AppConfig>(vars(&[
            ("DATABASE_URL", "postgres://localhost/hotel"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.token_ttl_hours, 4);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);

        let pagination = config.pagination_defaults();
        assert_eq!((pagination.page, pagination.limit), (1, 10));
        assert_eq!(pagination.max_limit, 100);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = envy::from_iter::<_, AppConfig>(vars(&[
            ("DATABASE_URL", "postgres://localhost/hotel"),
            ("JWT_SECRET", "secret"),
            ("DEFAULT_LIMIT", "25"),
            ("MAX_PAGE_LIMIT", "50"),
            ("DEFAULT_PAGE", "0"),
            ("BCRYPT_COST", "4"),
        ]))
        .unwrap();

        let pagination = config.pagination_defaults();
        assert_eq!((pagination.page, pagination.limit), (1, 25));
        assert_eq!(pagination.max_limit, 50);
        assert_eq!(config.bcrypt_cost, 4);
    }

    #[test]
    fn missing_secret_is_an_error() {
        let result = envy::from_iter::<_, AppConfig>(vars(&[(
            "DATABASE_URL",
            "postgres://localhost/hotel",
        )]));

        assert!(result.is_err());
    }

    #[test]
    fn debug_output_hides_the_secret() {
        let config = envy::from_iter::<_, AppConfig>(vars(&[
            ("DATABASE_URL", "postgres://user:pw@localhost/hotel"),
            ("JWT_SECRET", "super-secret"),
        ]))
        .unwrap();

        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret"));
        assert!(!printed.contains("pw@"));
    }
}
