use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::perfume::{Perfume, PerfumeId};

pub const DEFAULT_PAGE_SIZE: usize = 12;
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
    #[error("catalog snapshot could not be decoded: {0}")]
    Decode(String),
}

/// Supplies the full perfume catalog, with aroma tags and notes populated.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> Result<Vec<Perfume>, CatalogError>;
}

/// Read-only view over an already materialized catalog.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    perfumes: Vec<Perfume>,
}

impl Catalog {
    pub fn new(perfumes: Vec<Perfume>) -> Self {
        Self { perfumes }
    }

    pub fn len(&self) -> usize {
        self.perfumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.perfumes.is_empty()
    }

    pub fn perfumes(&self) -> &[Perfume] {
        &self.perfumes
    }

    pub fn find(&self, perfume_id: PerfumeId) -> Option<&Perfume> {
        self.perfumes.iter().find(|perfume| perfume.id == perfume_id)
    }

    pub fn query(&self, query: &CatalogQuery) -> CatalogPage {
        let matching: Vec<&Perfume> =
            self.perfumes.iter().filter(|perfume| query.matches(perfume)).collect();

        let per_page = query.normalized_limit();
        let current_page = query.normalized_page();
        let total_items = matching.len();
        let total_pages = total_items.div_ceil(per_page);

        let items = matching
            .into_iter()
            .skip((current_page - 1).saturating_mul(per_page))
            .take(per_page)
            .cloned()
            .collect();

        CatalogPage {
            items,
            pagination: Pagination {
                current_page,
                total_pages,
                total_items,
                per_page,
                has_next: current_page < total_pages,
                has_prev: current_page > 1,
            },
        }
    }
}

#[async_trait]
impl CatalogSource for Catalog {
    async fn fetch_catalog(&self) -> Result<Vec<Perfume>, CatalogError> {
        Ok(self.perfumes.clone())
    }
}

/// Filters for a paginated catalog listing. Zero or out-of-range paging values are normalized.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogQuery {
    pub page: usize,
    pub limit: usize,
    pub search: Option<String>,
    pub brand: Option<String>,
    pub aroma: Option<String>,
}

impl CatalogQuery {
    pub fn normalized_page(&self) -> usize {
        self.page.max(1)
    }

    pub fn normalized_limit(&self) -> usize {
        if (1..=MAX_PAGE_SIZE).contains(&self.limit) {
            self.limit
        } else {
            DEFAULT_PAGE_SIZE
        }
    }

    fn matches(&self, perfume: &Perfume) -> bool {
        if let Some(search) = self.search.as_deref().filter(|value| !value.is_empty()) {
            let needle = search.to_lowercase();
            if !perfume.name.to_lowercase().contains(&needle)
                && !perfume.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(brand) = self.brand.as_deref().filter(|value| !value.is_empty()) {
            if perfume.brand != brand {
                return false;
            }
        }
        if let Some(aroma) = self.aroma.as_deref().filter(|value| !value.is_empty()) {
            if !perfume.has_aroma_slug(aroma) {
                return false;
            }
        }
        true
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub per_page: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub items: Vec<Perfume>,
    pub pagination: Pagination,
}
