use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{
    decode_jwt, generate_jwt, hash_password, validate_username_format, verify_password, Claims,
    TOKEN_TYPE_REFRESH,
};
use crate::database::manager::DatabaseManager;
use crate::database::repositories::UserRepository;
use crate::error::ApiError;

use super::parse_body;

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenRefreshRequest {
    pub refresh: String,
}

/// POST /register/ - Create an account
///
/// Expected input: `{"username": "...", "password": "..."}`. Returns 201
/// with the public user fields; duplicate usernames are a 409.
pub async fn register(Json(payload): Json<Value>) -> Result<impl IntoResponse, ApiError> {
    let body: RegisterRequest = parse_body(payload)?;

    validate_username_format(&body.username).map_err(ApiError::bad_request)?;
    if body.password.len() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::bad_request(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    let users = UserRepository::new(DatabaseManager::pool().await?);
    let user = users
        .insert(&body.username, &hash_password(&body.password))
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /token/ - Authenticate and receive an access/refresh token pair
pub async fn token_obtain(Json(payload): Json<Value>) -> Result<impl IntoResponse, ApiError> {
    let body: TokenRequest = parse_body(payload)?;

    let users = UserRepository::new(DatabaseManager::pool().await?);
    let user = match users.find_by_username(&body.username).await? {
        Some(user) if verify_password(&body.password, &user.password_hash) => user,
        // Same answer for unknown user and wrong password
        _ => {
            return Err(ApiError::unauthorized(
                "No active account found with the given credentials",
            ))
        }
    };

    let access = generate_jwt(&Claims::access(&user))?;
    let refresh = generate_jwt(&Claims::refresh(&user))?;

    Ok(Json(json!({ "access": access, "refresh": refresh })))
}

/// POST /token/refresh/ - Exchange a refresh token for a new access token
pub async fn token_refresh(Json(payload): Json<Value>) -> Result<impl IntoResponse, ApiError> {
    let body: TokenRefreshRequest = parse_body(payload)?;

    let claims = decode_jwt(&body.refresh).map_err(|e| ApiError::unauthorized(e.to_string()))?;
    if claims.token_type != TOKEN_TYPE_REFRESH {
        return Err(ApiError::unauthorized("Token is not a refresh token"));
    }

    // The account must still exist; a deleted user's refresh token is dead
    let users = UserRepository::new(DatabaseManager::pool().await?);
    let user = users
        .find_by_id(claims.sub)
        .await?
        .ok_or_else(|| ApiError::unauthorized("No active account found for this token"))?;

    let access = generate_jwt(&Claims::access(&user))?;

    Ok(Json(json!({ "access": access })))
}
