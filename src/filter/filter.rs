use std::collections::HashMap;

use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{FilterField, OrderField, SortDirection, SqlParam};

/// Filter and ordering state for one list request, resolved from query
/// params against a resource's allowlists. Repositories prepend their own
/// ownership predicate, so condition placeholders start after the caller's
/// positional parameters.
pub struct Filter {
    conditions: Vec<String>,
    params: Vec<SqlParam>,
    order_sql: String,
}

impl Filter {
    pub fn from_query(
        query: &HashMap<String, String>,
        fields: &[FilterField],
        ordering_fields: &[OrderField],
        default_order: &[(&'static str, SortDirection)],
        starting_param_index: usize,
    ) -> Result<Self, FilterError> {
        let (conditions, params) = FilterWhere::generate(query, fields, starting_param_index)?;
        let order_infos = FilterOrder::resolve(
            query.get("ordering").map(String::as_str),
            ordering_fields,
            default_order,
        );
        Ok(Self {
            conditions,
            params,
            order_sql: FilterOrder::generate(&order_infos),
        })
    }

    /// Extra conditions to AND onto the ownership predicate; empty string
    /// when no filter params were given.
    pub fn and_where_sql(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" AND {}", self.conditions.join(" AND "))
        }
    }

    pub fn order_sql(&self) -> &str {
        &self.order_sql
    }

    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::types::{FieldKind, COMPARABLE_OPS, TEXT_OPS};

    const FIELDS: &[FilterField] = &[
        FilterField {
            param: "name",
            column: "name",
            kind: FieldKind::Text,
            ops: TEXT_OPS,
        },
        FilterField {
            param: "updated_at",
            column: "updated_at",
            kind: FieldKind::Timestamp,
            ops: COMPARABLE_OPS,
        },
    ];

    const ORDERING: &[OrderField] = &[
        OrderField {
            param: "created_at",
            column: "created_at",
        },
        OrderField {
            param: "updated_at",
            column: "updated_at",
        },
    ];

    const DEFAULT: &[(&str, SortDirection)] = &[("updated_at", SortDirection::Desc)];

    #[test]
    fn empty_query_yields_default_ordering_and_no_conditions() {
        let filter =
            Filter::from_query(&HashMap::new(), FIELDS, ORDERING, DEFAULT, 1).unwrap();
        assert_eq!(filter.and_where_sql(), "");
        assert_eq!(filter.order_sql(), r#"ORDER BY "updated_at" DESC"#);
        assert!(filter.params().is_empty());
    }

    #[test]
    fn conditions_continue_after_starting_index() {
        let mut query = HashMap::new();
        query.insert("name__icontains".to_string(), "basil".to_string());
        query.insert("ordering".to_string(), "created_at".to_string());

        let filter = Filter::from_query(&query, FIELDS, ORDERING, DEFAULT, 1).unwrap();
        assert_eq!(filter.and_where_sql(), r#" AND "name" ILIKE $2"#);
        assert_eq!(filter.order_sql(), r#"ORDER BY "created_at" ASC"#);
        assert_eq!(filter.params().len(), 1);
    }

    #[test]
    fn timestamp_values_must_parse() {
        let mut query = HashMap::new();
        query.insert("updated_at__gte".to_string(), "yesterday".to_string());
        assert!(Filter::from_query(&query, FIELDS, ORDERING, DEFAULT, 1).is_err());

        query.insert(
            "updated_at__gte".to_string(),
            "2024-06-02T12:00:00Z".to_string(),
        );
        assert!(Filter::from_query(&query, FIELDS, ORDERING, DEFAULT, 1).is_ok());
    }
}
