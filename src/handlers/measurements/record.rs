use axum::{extract::Path, http::StatusCode, response::IntoResponse, Extension, Json};
use serde_json::Value;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::repositories::MeasurementRepository;
use crate::error::ApiError;
use crate::handlers::parse_body;
use crate::middleware::AuthUser;
use crate::validation::validate_measurement;

use super::{MeasurementPatch, MeasurementPut};

fn not_found() -> ApiError {
    ApiError::not_found("Measurement not found")
}

/// GET /measurement/:id/ - Measurement detail
pub async fn get(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = MeasurementRepository::new(DatabaseManager::pool().await?);
    let measurement = repo
        .get_owned(user.user_id, id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(measurement))
}

/// PUT /measurement/:id/ - Full update of the measured values
pub async fn put(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let body: MeasurementPut = parse_body(payload)?;

    validate_measurement(Some(body.ph), Some(body.water_temperature), Some(body.tds))?;

    let repo = MeasurementRepository::new(DatabaseManager::pool().await?);
    let measurement = repo
        .update_owned(user.user_id, id, body.ph, body.water_temperature, body.tds)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(measurement))
}

/// PATCH /measurement/:id/ - Partial update; only supplied values are
/// validated and written
pub async fn patch(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let body: MeasurementPatch = parse_body(payload)?;

    validate_measurement(body.ph, body.water_temperature, body.tds)?;

    let repo = MeasurementRepository::new(DatabaseManager::pool().await?);
    let measurement = repo
        .patch_owned(user.user_id, id, body.ph, body.water_temperature, body.tds)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(measurement))
}

/// DELETE /measurement/:id/
pub async fn delete(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = MeasurementRepository::new(DatabaseManager::pool().await?);
    if repo.delete_owned(user.user_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}
