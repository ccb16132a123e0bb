use sqlx::{
    FromRow, PgPool, QueryBuilder,
    migrate::MigrateError,
    postgres::{PgPoolOptions, PgRow},
};
use tracing::{error, info};

use crate::domain::query::{Page, Pagination, PaginationDefaults};

mod booking_store;
pub(crate) mod filters;
mod hotel_store;
mod room_store;
mod user_store;

use filters::{Query, push_window};

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    pagination: PaginationDefaults,
}

impl PostgresDatabase {
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        pagination: PaginationDefaults,
    ) -> Result<PostgresDatabase, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        info!(max_connections, "connected to postgres");

        Ok(Self::from_pool(pool, pagination))
    }

    pub fn from_pool(pool: PgPool, pagination: PaginationDefaults) -> PostgresDatabase {
        PostgresDatabase { pool, pagination }
    }

    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("database migrations applied");
        Ok(())
    }

    /// Runs a filtered, counted and paginated select over `table`.
    /// An empty page comes back as `RowNotFound`.
    async fn fetch_page<T, F>(
        &self,
        table: &str,
        pagination: &Pagination,
        push_filter: F,
    ) -> Result<Page<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
        F: Fn(&mut Query) + Send + Sync,
    {
        let window = pagination.resolve(&self.pagination);

        let mut count: Query = QueryBuilder::new(format!("SELECT COUNT(*) FROM {table} WHERE TRUE"));
        push_filter(&mut count);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut select: Query = QueryBuilder::new(format!("SELECT * FROM {table} WHERE TRUE"));
        push_filter(&mut select);
        push_window(&mut select, &window);
        let data: Vec<T> = select.build_query_as().fetch_all(&self.pool).await?;

        if data.is_empty() {
            return Err(sqlx::Error::RowNotFound);
        }

        Ok(Page {
            data,
            total,
            page: window.page,
            limit: window.limit,
        })
    }
}

/// Coarse classification of driver errors shared by every store.
#[derive(Debug)]
pub(crate) enum StoreFailure {
    NotFound,
    Conflict(String),
    Internal(String),
}

const UNIQUE_VIOLATION: &str = "23505";
const EXCLUSION_VIOLATION: &str = "23P01";
const FOREIGN_KEY_VIOLATION: &str = "23503";

impl From<sqlx::Error> for StoreFailure {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = err {
            return StoreFailure::NotFound;
        }

        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or_default().to_string();

            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) | Some(EXCLUSION_VIOLATION) => {
                    return StoreFailure::Conflict(constraint);
                }
                Some(FOREIGN_KEY_VIOLATION) => return StoreFailure::NotFound,
                _ => {}
            }
        }

        error!(error = %err, "database error");
        StoreFailure::Internal(err.to_string())
    }
}
