use std::{str::FromStr, sync::Arc};

use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    domain::{
        FieldErrors,
        dto::AuthResponse,
        user::{Actor, CreateUserParams, User},
    },
    use_cases::user_database::{UserDatabase, UserDatabaseError},
};

type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize,
    pub sub: String,
}

/// Issues and validates HS256 bearer tokens carrying the user id.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        TokenIssuer {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            ttl,
        }
    }

    pub fn issue(&self, user_id: Uuid) -> AuthResult<String> {
        let claims = Claims {
            exp: (Utc::now() + self.ttl).timestamp().max(0) as usize,
            sub: user_id.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AuthError::EncodingTokenError)
    }

    pub fn validate(&self, token: &str) -> AuthResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })
    }
}

pub async fn login(
    database: Arc<impl UserDatabase>,
    tokens: &TokenIssuer,
    email: String,
    password: String,
) -> AuthResult<AuthResponse> {
    let user = match database.get_user_by_email(email).await {
        Ok(user) => user,
        Err(UserDatabaseError::NotFound) => return Err(AuthError::InvalidCredentials),
        Err(err) => return Err(AuthError::DatabaseError(err.to_string())),
    };

    let succesful = verify(password, &user.encrypted_password)
        .map_err(|err| AuthError::ErrorVerifying(err.to_string()))?;

    if !succesful {
        warn!(user_id = %user.id, "failed login attempt");
        return Err(AuthError::InvalidCredentials);
    }

    let token = tokens.issue(user.id)?;
    info!(user_id = %user.id, "user logged in");

    Ok(AuthResponse { user, token })
}

pub async fn register(
    database: Arc<impl UserDatabase>,
    params: CreateUserParams,
    bcrypt_cost: u32,
) -> AuthResult<User> {
    let errors = params.field_errors();
    if !errors.is_empty() {
        return Err(AuthError::Validation(errors));
    }

    let encrypted_password = hash(params.password, bcrypt_cost)
        .map_err(|err| AuthError::PasswordHashingFailed(err.to_string()))?;

    let user = User {
        id: Uuid::new_v4(),
        first_name: params.first_name,
        last_name: params.last_name,
        email: params.email,
        encrypted_password,
        is_admin: false,
        created_at: Utc::now(),
    };

    let user = database.create_user(user).await.map_err(|err| match err {
        UserDatabaseError::Conflict(_) => AuthError::EmailTaken,
        err => AuthError::DatabaseError(err.to_string()),
    })?;

    info!(user_id = %user.id, "user registered");

    Ok(user)
}

/// Resolves a bearer token to the acting user. The user is loaded so that
/// admin rights and deletions take effect on live tokens.
pub async fn authenticate(
    database: Arc<impl UserDatabase>,
    tokens: &TokenIssuer,
    token: &str,
) -> AuthResult<Actor> {
    let claims = tokens.validate(token)?;

    let user_id = Uuid::from_str(&claims.sub).map_err(|_| AuthError::InvalidToken)?;

    let user = database
        .get_user_by_id(user_id)
        .await
        .map_err(|err| match err {
            UserDatabaseError::NotFound => AuthError::InvalidToken,
            err => AuthError::DatabaseError(err.to_string()),
        })?;

    Ok(Actor::from(&user))
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("Failed password hashing: {0}")]
    PasswordHashingFailed(String),
    #[error("database error: {0}")]
    DatabaseError(String),
    #[error("error verifying")]
    ErrorVerifying(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("email is already registered")]
    EmailTaken,
    #[error("encode token Error")]
    EncodingTokenError,
    #[error("invalid token")]
    InvalidToken,
    #[error("token is expired")]
    TokenExpired,
}
