use std::collections::HashMap;

use super::error::FilterError;
use super::types::{FilterField, FilterOp, SqlParam};

pub struct FilterWhere {
    param_values: Vec<SqlParam>,
    param_index: usize,
    conditions: Vec<String>,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
            conditions: vec![],
        }
    }

    /// Translate `field__op=value` query params into SQL conditions against
    /// the allowlist. Query keys that don't resolve to an allowed
    /// (field, lookup) pair are ignored; a registered key with an unparsable
    /// value is an error.
    pub fn generate(
        query: &HashMap<String, String>,
        fields: &[FilterField],
        starting_param_index: usize,
    ) -> Result<(Vec<String>, Vec<SqlParam>), FilterError> {
        let mut filter_where = Self::new(starting_param_index);
        for field in fields {
            filter_where.collect_field(query, field)?;
        }
        Ok((filter_where.conditions, filter_where.param_values))
    }

    fn collect_field(
        &mut self,
        query: &HashMap<String, String>,
        field: &FilterField,
    ) -> Result<(), FilterError> {
        for (key, raw) in query {
            let (base, suffix) = match key.split_once("__") {
                Some((base, suffix)) => (base, Some(suffix)),
                None => (key.as_str(), None),
            };
            if base != field.param {
                continue;
            }
            let Some(op) = FilterOp::from_suffix(suffix) else {
                continue;
            };
            if !field.ops.contains(&op) {
                continue;
            }
            self.push_condition(field, op, raw)?;
        }
        Ok(())
    }

    fn push_condition(
        &mut self,
        field: &FilterField,
        op: FilterOp,
        raw: &str,
    ) -> Result<(), FilterError> {
        let value = match op {
            FilterOp::IContains => {
                SqlParam::Text(format!("%{}%", escape_like_pattern(raw)))
            }
            _ => field.kind.parse(field.param, raw)?,
        };
        self.param_index += 1;
        self.param_values.push(value);
        self.conditions.push(format!(
            "\"{}\" {} ${}",
            field.column,
            op.to_sql(),
            self.param_index
        ));
        Ok(())
    }
}

/// Escape LIKE metacharacters so a substring filter matches them literally.
fn escape_like_pattern(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}
