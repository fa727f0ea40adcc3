//! Pagination
//!
//! Query parameters and the response envelope shared by every list endpoint.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 20;
pub const MAX_PER_PAGE: u32 = 100;

/// `?page=&perPage=` query parameters
///
/// Missing values fall back to defaults; out-of-range values are clamped
/// rather than rejected.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageParams {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    /// 1-based page number
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE).max(1)
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE)
    }

    /// SQL `LIMIT`
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page())
    }

    /// SQL `OFFSET`
    pub fn offset(&self) -> i64 {
        i64::from(self.page() - 1) * i64::from(self.per_page())
    }
}

/// One page of results
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, params: &PageParams, total: i64) -> Self {
        Self {
            items,
            page: params.page(),
            per_page: params.per_page(),
            total,
        }
    }

    /// Convert items while keeping paging metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
        }
    }
}

/// Apply `params` to an in-memory slice. Used by test fakes.
pub fn paginate<T: Clone>(all: &[T], params: &PageParams) -> Page<T> {
    let items = all
        .iter()
        .skip(params.offset() as usize)
        .take(params.per_page() as usize)
        .cloned()
        .collect();
    Page::new(items, params, all.len() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PageParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), 20);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_clamping() {
        assert_eq!(PageParams::new(0, 0).page(), 1);
        assert_eq!(PageParams::new(0, 0).per_page(), 1);
        assert_eq!(PageParams::new(3, 500).per_page(), 100);
        assert_eq!(PageParams::new(3, 10).offset(), 20);
    }

    #[test]
    fn test_query_deserialization() {
        let params: PageParams = serde_json::from_str(r#"{"page":2,"perPage":5}"#).unwrap();
        assert_eq!(params.page(), 2);
        assert_eq!(params.limit(), 5);
    }

    #[test]
    fn test_paginate_slice() {
        let all: Vec<u32> = (1..=45).collect();
        let page = paginate(&all, &PageParams::new(3, 20));
        assert_eq!(page.items, vec![41, 42, 43, 44, 45]);
        assert_eq!(page.total, 45);

        let doubled = page.map(|n| n * 2);
        assert_eq!(doubled.items[0], 82);
    }
}
