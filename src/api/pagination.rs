use std::collections::HashMap;

use axum::http::Uri;
use serde::Serialize;

use crate::config;
use crate::error::ApiError;

/// Read window for a list request: 1-based `page` query param, page size
/// from configuration.
#[derive(Debug, Clone)]
pub struct PageParams {
    pub number: i64,
    pub size: i64,
}

impl PageParams {
    pub fn from_query(query: &HashMap<String, String>) -> Result<Self, ApiError> {
        let size = config::config().api.page_size;
        let number = match query.get("page") {
            None => 1,
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or_else(|| ApiError::bad_request("page must be a positive integer"))?,
        };
        Ok(Self { number, size })
    }

    pub fn limit(&self) -> i64 {
        self.size
    }

    pub fn offset(&self) -> i64 {
        (self.number - 1) * self.size
    }
}

/// List response envelope: total row count, relative next/previous page
/// links, and the page itself under `results`.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T: Serialize> Paginated<T> {
    pub fn new(results: Vec<T>, count: i64, page: &PageParams, uri: &Uri) -> Self {
        let next = if page.offset() + page.size < count {
            Some(page_url(uri, page.number + 1))
        } else {
            None
        };
        let previous = if page.number > 1 {
            Some(page_url(uri, page.number - 1))
        } else {
            None
        };
        Self {
            count,
            next,
            previous,
            results,
        }
    }
}

/// Rebuild the request target with `page` swapped out, preserving every
/// other query pair as sent.
fn page_url(uri: &Uri, page: i64) -> String {
    let mut pairs: Vec<String> = uri
        .query()
        .unwrap_or("")
        .split('&')
        .filter(|pair| !pair.is_empty() && !pair.starts_with("page="))
        .map(str::to_string)
        .collect();
    pairs.push(format!("page={}", page));
    format!("{}?{}", uri.path(), pairs.join("&"))
}
