//! Paged list responses

use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Query parameters for a list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number.
    pub page: u32,
    /// Items per page.
    pub limit: u32,
}

impl ListQuery {
    /// Creates a query, raising zero values to one.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Returns the query as `page` / `limit` URL parameters.
    pub fn to_params(&self) -> [(&'static str, String); 2] {
        [("page", self.page.to_string()), ("limit", self.limit.to_string())]
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(1, 10)
    }
}

/// Pagination facts reported alongside every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

/// One page of a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maps the items, keeping the pagination.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

impl<T: DeserializeOwned> Page<T> {
    /// Parses a list response of the shape
    /// `{<collection_key>: [...], pagination: {currentPage, totalPages, totalItems}}`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Parse`] if either member is missing or malformed.
    pub fn from_json(body: serde_json::Value, collection_key: &str) -> Result<Self, ApiError> {
        let raw = body.to_string();
        let serde_json::Value::Object(mut map) = body else {
            return Err(ApiError::parse_with_body("list response is not an object", raw));
        };

        let items = map.remove(collection_key).ok_or_else(|| {
            ApiError::parse_with_body(format!("missing `{}` in list response", collection_key), &raw)
        })?;
        let pagination = map
            .remove("pagination")
            .ok_or_else(|| ApiError::parse_with_body("missing `pagination` in list response", &raw))?;

        let items: Vec<T> = serde_json::from_value(items)
            .map_err(|e| ApiError::parse_with_body(format!("`{}`: {}", collection_key, e), &raw))?;
        let pagination: Pagination = serde_json::from_value(pagination)
            .map_err(|e| ApiError::parse_with_body(format!("`pagination`: {}", e), &raw))?;

        Ok(Self { items, pagination })
    }
}
