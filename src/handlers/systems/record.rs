use std::collections::HashMap;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde_json::Value;
use uuid::Uuid;

use crate::config;
use crate::database::manager::DatabaseManager;
use crate::database::repositories::{MeasurementRepository, SystemRepository};
use crate::error::ApiError;
use crate::handlers::parse_body;
use crate::middleware::AuthUser;

use super::{SystemPatch, SystemPut};

fn not_found() -> ApiError {
    ApiError::not_found("Hydroponic system not found")
}

/// GET /hydroponic/:id/ - System detail with its most recent measurements
///
/// Embeds the newest measurements under `last_measurements`; the count
/// comes from `num_measurements` (configured default when absent).
pub async fn get(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let num_measurements = parse_num_measurements(&query)?;

    let pool = DatabaseManager::pool().await?;
    let system = SystemRepository::new(pool.clone())
        .get_owned(user.user_id, id)
        .await?
        .ok_or_else(not_found)?;

    let measurements = MeasurementRepository::new(pool)
        .recent_for_system(system.id, num_measurements)
        .await?;

    let mut data = to_response_value(&system)?;
    data["last_measurements"] = to_response_value(&measurements)?;

    Ok(Json(data))
}

/// PUT /hydroponic/:id/ - Full update
pub async fn put(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let body: SystemPut = parse_body(payload)?;

    let repo = SystemRepository::new(DatabaseManager::pool().await?);
    let system = repo
        .update_owned(
            user.user_id,
            id,
            &body.name,
            body.label.as_deref(),
            body.description.as_deref(),
        )
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(system))
}

/// PATCH /hydroponic/:id/ - Partial update
pub async fn patch(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let body: SystemPatch = parse_body(payload)?;

    let repo = SystemRepository::new(DatabaseManager::pool().await?);
    let system = repo
        .patch_owned(
            user.user_id,
            id,
            body.name.as_deref(),
            body.label.as_ref().map(|o| o.as_deref()),
            body.description.as_ref().map(|o| o.as_deref()),
        )
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(system))
}

/// DELETE /hydroponic/:id/ - Delete a system and, by cascade, its
/// measurements
pub async fn delete(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = SystemRepository::new(DatabaseManager::pool().await?);
    if repo.delete_owned(user.user_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}

fn parse_num_measurements(query: &HashMap<String, String>) -> Result<i64, ApiError> {
    match query.get("num_measurements") {
        None => Ok(config::config().api.default_recent_measurements as i64),
        Some(raw) => raw
            .parse::<u32>()
            .map(i64::from)
            .map_err(|_| ApiError::bad_request("num_measurements must be an integer")),
    }
}

fn to_response_value<T: serde::Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| {
        tracing::error!("Failed to serialize response data: {}", e);
        ApiError::internal_server_error("Failed to format response")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_measurements_defaults_and_parses() {
        let mut query = HashMap::new();
        assert_eq!(parse_num_measurements(&query).unwrap(), 10);

        query.insert("num_measurements".to_string(), "5".to_string());
        assert_eq!(parse_num_measurements(&query).unwrap(), 5);
    }

    #[test]
    fn num_measurements_rejects_non_integers() {
        for bad in ["abc", "1.5", "-3", ""] {
            let mut query = HashMap::new();
            query.insert("num_measurements".to_string(), bad.to_string());
            let err = parse_num_measurements(&query).unwrap_err();
            assert_eq!(err.status_code(), 400);
            assert!(err.message().contains("integer"));
        }
    }
}
