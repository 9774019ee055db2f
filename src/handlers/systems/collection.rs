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
use crate::database::repositories::SystemRepository;
use crate::error::ApiError;
use crate::filter::Filter;
use crate::handlers::parse_body;
use crate::middleware::AuthUser;

use super::{SystemCreate, DEFAULT_ORDER, FILTER_FIELDS, ORDERING_FIELDS};

/// GET /hydroponic/ - List the caller's systems
///
/// Supports exact/icontains filters on name, label and description,
/// exact/range filters on created_at and updated_at, and `ordering` by
/// either timestamp. Paginated.
pub async fn list(
    Extension(user): Extension<AuthUser>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = Filter::from_query(&query, FILTER_FIELDS, ORDERING_FIELDS, DEFAULT_ORDER, 1)?;
    let page = PageParams::from_query(&query)?;

    let repo = SystemRepository::new(DatabaseManager::pool().await?);
    let count = repo.count_owned(user.user_id, &filter).await?;
    let results = repo.list_owned(user.user_id, &filter, &page).await?;

    Ok(Json(Paginated::new(results, count, &page, &uri)))
}

/// POST /hydroponic/ - Create a system owned by the caller
///
/// The owner is always the authenticated caller; any owner value in the
/// request body is ignored.
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let body: SystemCreate = parse_body(payload)?;

    let repo = SystemRepository::new(DatabaseManager::pool().await?);
    let system = repo
        .insert(
            user.user_id,
            &body.name,
            body.label.as_deref(),
            body.description.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(system)))
}
