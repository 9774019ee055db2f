use super::types::{FilterOrderInfo, OrderField, SortDirection};

pub struct FilterOrder;

impl FilterOrder {
    /// Resolve the `ordering` query param (single field, optional leading
    /// `-` for descending) against the allowlist. Absent or unrecognized
    /// values fall back to the resource default.
    pub fn resolve(
        ordering: Option<&str>,
        allowed: &[OrderField],
        default: &[(&'static str, SortDirection)],
    ) -> Vec<FilterOrderInfo> {
        if let Some(raw) = ordering {
            let trimmed = raw.trim();
            let (name, sort) = match trimmed.strip_prefix('-') {
                Some(rest) => (rest, SortDirection::Desc),
                None => (trimmed, SortDirection::Asc),
            };
            if let Some(field) = allowed.iter().find(|f| f.param == name) {
                return vec![FilterOrderInfo {
                    column: field.column.to_string(),
                    sort,
                }];
            }
        }
        default
            .iter()
            .map(|(column, sort)| FilterOrderInfo {
                column: column.to_string(),
                sort: sort.clone(),
            })
            .collect()
    }

    pub fn generate(infos: &[FilterOrderInfo]) -> String {
        if infos.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = infos
            .iter()
            .map(|i| format!("\"{}\" {}", i.column, i.sort.to_sql()))
            .collect();
        format!("ORDER BY {}", parts.join(", "))
    }
}
