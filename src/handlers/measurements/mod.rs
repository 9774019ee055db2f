pub mod collection;
pub mod record;

use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::filter::{
    FieldKind, FilterField, OrderField, SortDirection, COMPARABLE_OPS, EXACT_OPS,
};

/// Filterable columns. Wire names keep their original capitalization, so
/// `pH__gte=6.9` filters the `ph` column.
pub const FILTER_FIELDS: &[FilterField] = &[
    FilterField {
        param: "system",
        column: "system_id",
        kind: FieldKind::Uuid,
        ops: EXACT_OPS,
    },
    FilterField {
        param: "created_at",
        column: "created_at",
        kind: FieldKind::Timestamp,
        ops: COMPARABLE_OPS,
    },
    FilterField {
        param: "pH",
        column: "ph",
        kind: FieldKind::Decimal,
        ops: COMPARABLE_OPS,
    },
    FilterField {
        param: "water_temperature",
        column: "water_temperature",
        kind: FieldKind::Decimal,
        ops: COMPARABLE_OPS,
    },
    FilterField {
        param: "TDS",
        column: "tds",
        kind: FieldKind::Decimal,
        ops: COMPARABLE_OPS,
    },
];

pub const ORDERING_FIELDS: &[OrderField] = &[
    OrderField {
        param: "created_at",
        column: "created_at",
    },
    OrderField {
        param: "pH",
        column: "ph",
    },
    OrderField {
        param: "water_temperature",
        column: "water_temperature",
    },
    OrderField {
        param: "TDS",
        column: "tds",
    },
];

/// Newest readings first when the caller doesn't order explicitly.
pub const DEFAULT_ORDER: &[(&str, SortDirection)] = &[("created_at", SortDirection::Desc)];

#[derive(Debug, Deserialize)]
pub struct MeasurementCreate {
    pub system: Uuid,
    #[serde(rename = "pH")]
    pub ph: Decimal,
    pub water_temperature: Decimal,
    #[serde(rename = "TDS")]
    pub tds: Decimal,
}

/// Full update. The owning system is immutable after creation, so it is
/// not a writable field here.
#[derive(Debug, Deserialize)]
pub struct MeasurementPut {
    #[serde(rename = "pH")]
    pub ph: Decimal,
    pub water_temperature: Decimal,
    #[serde(rename = "TDS")]
    pub tds: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct MeasurementPatch {
    #[serde(rename = "pH", default)]
    pub ph: Option<Decimal>,
    #[serde(default)]
    pub water_temperature: Option<Decimal>,
    #[serde(rename = "TDS", default)]
    pub tds: Option<Decimal>,
}
