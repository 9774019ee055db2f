use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::FilterError;

/// Comparison operators accepted as `field__op` query-param suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Lt,
    Lte,
    Gt,
    Gte,
    IContains,
}

impl FilterOp {
    /// Parse the lookup suffix of a query key. No suffix and `exact` both
    /// mean equality, mirroring the lookup names the API accepts.
    pub fn from_suffix(suffix: Option<&str>) -> Option<Self> {
        match suffix {
            None | Some("exact") => Some(FilterOp::Eq),
            Some("lt") => Some(FilterOp::Lt),
            Some("lte") => Some(FilterOp::Lte),
            Some("gt") => Some(FilterOp::Gt),
            Some("gte") => Some(FilterOp::Gte),
            Some("icontains") => Some(FilterOp::IContains),
            Some(_) => None,
        }
    }

    pub fn to_sql(&self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Lt => "<",
            FilterOp::Lte => "<=",
            FilterOp::Gt => ">",
            FilterOp::Gte => ">=",
            FilterOp::IContains => "ILIKE",
        }
    }
}

/// Equality plus range comparisons (timestamps and measurement values).
pub const COMPARABLE_OPS: &[FilterOp] = &[
    FilterOp::Eq,
    FilterOp::Lt,
    FilterOp::Lte,
    FilterOp::Gt,
    FilterOp::Gte,
];

/// Equality plus case-insensitive substring match (text columns).
pub const TEXT_OPS: &[FilterOp] = &[FilterOp::Eq, FilterOp::IContains];

/// Equality only (foreign-key columns).
pub const EXACT_OPS: &[FilterOp] = &[FilterOp::Eq];

/// How a filterable column's raw query-param value is parsed and bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Timestamp,
    Decimal,
    Uuid,
}

impl FieldKind {
    pub fn parse(&self, param: &str, raw: &str) -> Result<SqlParam, FilterError> {
        let invalid = || FilterError::InvalidValue {
            param: param.to_string(),
            value: raw.to_string(),
        };
        match self {
            FieldKind::Text => Ok(SqlParam::Text(raw.to_string())),
            FieldKind::Timestamp => raw
                .parse::<DateTime<Utc>>()
                .map(SqlParam::Timestamp)
                .map_err(|_| invalid()),
            FieldKind::Decimal => raw
                .parse::<Decimal>()
                .map(SqlParam::Decimal)
                .map_err(|_| invalid()),
            FieldKind::Uuid => raw.parse::<Uuid>().map(SqlParam::Uuid).map_err(|_| invalid()),
        }
    }
}

/// A column exposed for filtering: its query-param name, the SQL column it
/// maps onto, how its values parse, and which lookups it accepts.
#[derive(Debug, Clone, Copy)]
pub struct FilterField {
    pub param: &'static str,
    pub column: &'static str,
    pub kind: FieldKind,
    pub ops: &'static [FilterOp],
}

/// A column exposed for `ordering=`.
#[derive(Debug, Clone, Copy)]
pub struct OrderField {
    pub param: &'static str,
    pub column: &'static str,
}

/// Typed positional parameter for a generated SQL fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Timestamp(DateTime<Utc>),
    Decimal(Decimal),
    Uuid(Uuid),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterOrderInfo {
    pub column: String,
    pub sort: SortDirection,
}
