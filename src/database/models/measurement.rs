use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A timestamped water-quality reading. Wire names keep the original
/// capitalization (pH, TDS); columns are lowercase.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Measurement {
    pub id: Uuid,
    #[serde(rename = "system")]
    pub system_id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "pH")]
    pub ph: Decimal,
    pub water_temperature: Decimal,
    #[serde(rename = "TDS")]
    pub tds: Decimal,
}
