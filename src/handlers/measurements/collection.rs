use std::collections::HashMap;

use axum::{
    extract::{OriginalUri, Query},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde_json::Value;

use crate::api::pagination::{PageParams, Paginated};
use crate::database::manager::DatabaseManager;
use crate::database::repositories::{MeasurementRepository, SystemRepository};
use crate::error::ApiError;
use crate::filter::Filter;
use crate::handlers::parse_body;
use crate::middleware::AuthUser;
use crate::validation::validate_measurement;

use super::{MeasurementCreate, DEFAULT_ORDER, FILTER_FIELDS, ORDERING_FIELDS};

/// GET /measurement/ - List measurements of the caller's systems
///
/// An explicit `system` filter is intersected with the ownership scope:
/// filtering by a foreign system yields an empty page, never foreign rows.
pub async fn list(
    Extension(user): Extension<AuthUser>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = Filter::from_query(&query, FILTER_FIELDS, ORDERING_FIELDS, DEFAULT_ORDER, 1)?;
    let page = PageParams::from_query(&query)?;

    let repo = MeasurementRepository::new(DatabaseManager::pool().await?);
    let count = repo.count_owned(user.user_id, &filter).await?;
    let results = repo.list_owned(user.user_id, &filter, &page).await?;

    Ok(Json(Paginated::new(results, count, &page, &uri)))
}

/// POST /measurement/ - Record a measurement for an owned system
///
/// The body names the target system; naming a system the caller does not
/// own is a 403, the one place foreign ownership is distinguishable from
/// nonexistence.
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let body: MeasurementCreate = parse_body(payload)?;

    let pool = DatabaseManager::pool().await?;
    let systems = SystemRepository::new(pool.clone());
    if systems.get_owned(user.user_id, body.system).await?.is_none() {
        return Err(ApiError::forbidden(
            "You do not have permission to create measurements for this system.",
        ));
    }

    validate_measurement(Some(body.ph), Some(body.water_temperature), Some(body.tds))?;

    let measurement = MeasurementRepository::new(pool)
        .insert(body.system, body.ph, body.water_temperature, body.tds)
        .await?;

    Ok((StatusCode::CREATED, Json(measurement)))
}
