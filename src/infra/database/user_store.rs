use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::{
    domain::{
        query::{Page, Pagination, UserFilter},
        user::{UpdateUserParams, User},
    },
    infra::database::{
        PostgresDatabase, StoreFailure,
        filters::{Query, push_user_filter},
    },
    use_cases::user_database::{UserDatabase, UserDatabaseError, UserDatabaseResult},
};

impl From<sqlx::Error> for UserDatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match StoreFailure::from(err) {
            StoreFailure::NotFound => UserDatabaseError::NotFound,
            StoreFailure::Conflict(constraint) => UserDatabaseError::Conflict(constraint),
            StoreFailure::Internal(message) => UserDatabaseError::InternalDBError(message),
        }
    }
}

impl UserDatabase for PostgresDatabase {
    async fn create_user(&self, user: User) -> UserDatabaseResult<User> {
        let created = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, first_name, last_name, email, encrypted_password, is_admin, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.encrypted_password)
        .bind(user.is_admin)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_user_by_id(&self, user_id: Uuid) -> UserDatabaseResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(UserDatabaseError::NotFound)
    }

    async fn get_user_by_email(&self, email: String) -> UserDatabaseResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(UserDatabaseError::NotFound)
    }

    async fn get_users(
        &self,
        filter: UserFilter,
        pagination: Pagination,
    ) -> UserDatabaseResult<Page<User>> {
        let page = self
            .fetch_page("users", &pagination, |query| push_user_filter(query, &filter))
            .await?;

        Ok(page)
    }

    async fn update_user(
        &self,
        user_id: Uuid,
        update: UpdateUserParams,
    ) -> UserDatabaseResult<u64> {
        if update.is_empty() {
            return Err(UserDatabaseError::InternalDBError(
                "update without fields".to_string(),
            ));
        }

        let mut query: Query = QueryBuilder::new("UPDATE users SET ");
        let mut fields = query.separated(", ");
        if let Some(first_name) = update.first_name {
            fields.push("first_name = ").push_bind_unseparated(first_name);
        }
        if let Some(last_name) = update.last_name {
            fields.push("last_name = ").push_bind_unseparated(last_name);
        }
        query.push(" WHERE id = ").push_bind(user_id);

        let result = query.build().execute(&self.pool).await?;

        Ok(result.rows_affected())
    }

    async fn delete_user(&self, user_id: Uuid) -> UserDatabaseResult<u64> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
