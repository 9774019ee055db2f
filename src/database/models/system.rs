use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A hydroponic setup owned by one user; parent of its measurements.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HydroponicSystem {
    pub id: Uuid,
    #[serde(rename = "owner")]
    pub owner_id: Uuid,
    pub name: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
