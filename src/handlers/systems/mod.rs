pub mod collection;
pub mod record;

use serde::Deserialize;

use crate::filter::{
    FieldKind, FilterField, OrderField, SortDirection, COMPARABLE_OPS, TEXT_OPS,
};

/// Filterable columns, mirroring the query params the list endpoint accepts.
pub const FILTER_FIELDS: &[FilterField] = &[
    FilterField {
        param: "name",
        column: "name",
        kind: FieldKind::Text,
        ops: TEXT_OPS,
    },
    FilterField {
        param: "label",
        column: "label",
        kind: FieldKind::Text,
        ops: TEXT_OPS,
    },
    FilterField {
        param: "description",
        column: "description",
        kind: FieldKind::Text,
        ops: TEXT_OPS,
    },
    FilterField {
        param: "created_at",
        column: "created_at",
        kind: FieldKind::Timestamp,
        ops: COMPARABLE_OPS,
    },
    FilterField {
        param: "updated_at",
        column: "updated_at",
        kind: FieldKind::Timestamp,
        ops: COMPARABLE_OPS,
    },
];

pub const ORDERING_FIELDS: &[OrderField] = &[
    OrderField {
        param: "created_at",
        column: "created_at",
    },
    OrderField {
        param: "updated_at",
        column: "updated_at",
    },
];

/// Most recently touched first when the caller doesn't order explicitly.
pub const DEFAULT_ORDER: &[(&str, SortDirection)] = &[("updated_at", SortDirection::Desc)];

#[derive(Debug, Deserialize)]
pub struct SystemCreate {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Full update: name is required, omitted optionals reset to NULL.
#[derive(Debug, Deserialize)]
pub struct SystemPut {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update: absent fields stay untouched, explicit nulls clear.
#[derive(Debug, Deserialize)]
pub struct SystemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub label: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
}

/// Keep `"field": null` distinguishable from an absent field.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}
