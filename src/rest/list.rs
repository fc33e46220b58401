//! List parameters and paginated list responses.
//!
//! List endpoints take `page` and `perpage` query parameters plus optional
//! `filter[...]` parameters, and answer with a page envelope:
//!
//! ```json
//! {"object": "list", "has_more": true, "total_item_count": 250,
//!  "items_per_page": 100, "current_page": 1, "last_page": 3, "data": [...]}
//! ```
//!
//! Facades fetch exactly one page. Walking pages is up to the caller:
//!
//! ```rust,ignore
//! let mut params = ListParams::new().perpage(100);
//! loop {
//!     let page = client.transactions().list(params.clone()).await?;
//!     for transaction in page.iter() {
//!         println!("{}", transaction.uid);
//!     }
//!     match page.next_params(&params) {
//!         Some(next) => params = next,
//!         None => break,
//!     }
//! }
//! ```

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

/// Largest page size the API serves.
pub const MAX_PER_PAGE: u32 = 100;

/// Query parameters for list operations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListParams {
    page: Option<u32>,
    perpage: Option<u32>,
    filters: Vec<(String, String)>,
}

impl ListParams {
    /// Creates empty parameters (server defaults apply).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the 1-based page number.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size, clamped to `1..=100`.
    #[must_use]
    pub fn perpage(mut self, perpage: u32) -> Self {
        self.perpage = Some(perpage.clamp(1, MAX_PER_PAGE));
        self
    }

    /// Adds a `filter[name]=value` parameter.
    #[must_use]
    pub fn filter(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.filters
            .push((format!("filter[{}]", name.as_ref()), value.into()));
        self
    }

    /// Adds an arbitrary query parameter (e.g. `order`, `expand[]`).
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Returns the requested page, if set.
    #[must_use]
    pub const fn current_page(&self) -> Option<u32> {
        self.page
    }

    /// Returns the requested page size, if set.
    #[must_use]
    pub const fn per_page(&self) -> Option<u32> {
        self.perpage
    }

    /// Returns the query pairs in the order they are sent.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::with_capacity(self.filters.len() + 2);
        if let Some(page) = self.page {
            query.push(("page".to_string(), page.to_string()));
        }
        if let Some(perpage) = self.perpage {
            query.push(("perpage".to_string(), perpage.to_string()));
        }
        query.extend(self.filters.iter().cloned());
        query
    }
}

/// One page of a list response.
///
/// Derefs to the page's items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Whether more pages follow.
    pub has_more: bool,
    /// The items on this page.
    pub data: Vec<T>,
    /// Total number of items across all pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_item_count: Option<u64>,
    /// Page size used by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<u32>,
    /// The page number of this page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,
    /// The last page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_page: Option<u32>,
}

impl<T> ListResponse<T> {
    /// Parameters for the following page, or `None` on the last page.
    ///
    /// Page size and filters are carried over from `params`.
    #[must_use]
    pub fn next_params(&self, params: &ListParams) -> Option<ListParams> {
        if !self.has_more {
            return None;
        }
        let current = self.current_page.or(params.page).unwrap_or(1);
        let mut next = params.clone();
        next.page = Some(current.saturating_add(1));
        Some(next)
    }

    /// Consumes the response and returns the items.
    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.data
    }
}

impl<T> Deref for ListResponse<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> DerefMut for ListResponse<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_query_orders_page_then_filters() {
        let params = ListParams::new()
            .filter("status", "completed")
            .perpage(25)
            .page(2)
            .param("order", "-created");

        assert_eq!(
            params.to_query(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("perpage".to_string(), "25".to_string()),
                ("filter[status]".to_string(), "completed".to_string()),
                ("order".to_string(), "-created".to_string()),
            ]
        );
    }

    #[test]
    fn test_perpage_is_clamped() {
        assert_eq!(ListParams::new().perpage(500).per_page(), Some(100));
        assert_eq!(ListParams::new().perpage(0).per_page(), Some(1));
    }

    #[test]
    fn test_empty_params_send_nothing() {
        assert!(ListParams::new().to_query().is_empty());
    }

    #[test]
    fn test_list_response_deserializes_envelope() {
        let body = json!({
            "object": "list",
            "url": "/v1/merchants",
            "has_more": true,
            "total_item_count": 3,
            "items_per_page": 2,
            "current_page": 1,
            "last_page": 2,
            "data": [{"uid": "a"}, {"uid": "b"}]
        });
        let page: ListResponse<serde_json::Value> = serde_json::from_value(body).unwrap();

        assert!(page.has_more);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0]["uid"], "a");
        assert_eq!(page.last_page, Some(2));
    }

    #[test]
    fn test_list_response_requires_data() {
        let result = serde_json::from_value::<ListResponse<serde_json::Value>>(json!({
            "has_more": false
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_next_params_advances_page_and_keeps_filters() {
        let page: ListResponse<u8> = ListResponse {
            has_more: true,
            data: vec![],
            total_item_count: None,
            items_per_page: None,
            current_page: Some(3),
            last_page: None,
        };
        let params = ListParams::new().perpage(10).filter("status", "paid");
        let next = page.next_params(&params).unwrap();

        assert_eq!(next.current_page(), Some(4));
        assert_eq!(next.per_page(), Some(10));
        assert!(next
            .to_query()
            .contains(&("filter[status]".to_string(), "paid".to_string())));
    }

    #[test]
    fn test_next_params_stops_on_last_page() {
        let page: ListResponse<u8> = ListResponse {
            has_more: false,
            data: vec![1],
            total_item_count: Some(1),
            items_per_page: Some(10),
            current_page: Some(1),
            last_page: Some(1),
        };
        assert!(page.next_params(&ListParams::new()).is_none());
    }
}
