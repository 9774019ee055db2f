pub mod auth;
pub mod measurements;
pub mod systems;

use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Deserialize a request body that already parsed as JSON into its typed
/// form, reporting missing/mistyped fields as a 400 rather than a rejection.
pub(crate) fn parse_body<T: DeserializeOwned>(payload: serde_json::Value) -> Result<T, ApiError> {
    serde_json::from_value(payload).map_err(ApiError::from)
}
