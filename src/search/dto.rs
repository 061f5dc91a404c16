use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::{blank_to_none, Schema};

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

/// Directory search filters, sent as query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SearchFilters {
    #[validate(length(max = 100, message = "La recherche ne doit pas dépasser 100 caractères"))]
    #[serde(default)]
    pub q: Option<String>,
    #[validate(length(max = 100, message = "La ville ne doit pas dépasser 100 caractères"))]
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub category: Option<Uuid>,
    #[serde(default)]
    pub sub_category: Option<Uuid>,
    #[validate(range(min = 1, message = "La page doit être supérieure ou égale à 1"))]
    #[serde(default = "default_page")]
    pub page: u32,
    #[validate(range(min = 1, max = 100, message = "La taille de page doit être comprise entre 1 et 100"))]
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            q: None,
            city: None,
            category: None,
            sub_category: None,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl SearchFilters {
    /// Query pairs in a stable order; absent filters are left out.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(q) = &self.q {
            pairs.push(("q".to_string(), q.clone()));
        }
        if let Some(city) = &self.city {
            pairs.push(("city".to_string(), city.clone()));
        }
        if let Some(category) = self.category {
            pairs.push(("category".to_string(), category.to_string()));
        }
        if let Some(sub) = self.sub_category {
            pairs.push(("sub_category".to_string(), sub.to_string()));
        }
        pairs.push(("page".to_string(), self.page.to_string()));
        pairs.push(("page_size".to_string(), self.page_size.to_string()));
        pairs
    }

    pub fn next_page(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            ..self.clone()
        }
    }
}

impl Schema for SearchFilters {
    fn sanitize(&mut self) {
        blank_to_none(&mut self.q);
        blank_to_none(&mut self.city);
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.page_size))
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_query() {
        let filters: SearchFilters = serde_json::from_str("{}").unwrap();
        assert_eq!(filters, SearchFilters::default());
        assert!(filters.parse().is_ok());
    }

    #[test]
    fn test_pagination_bounds() {
        let f = SearchFilters { page: 0, ..SearchFilters::default() };
        assert_eq!(f.parse().unwrap_err().fields(), vec!["page"]);

        for size in [0, 101] {
            let f = SearchFilters { page_size: size, ..SearchFilters::default() };
            assert_eq!(f.parse().unwrap_err().fields(), vec!["page_size"]);
        }
        for size in [1, 100] {
            let f = SearchFilters { page_size: size, ..SearchFilters::default() };
            assert!(f.parse().is_ok());
        }
    }

    #[test]
    fn test_query_pairs() {
        let f = SearchFilters {
            q: Some("  ".into()),
            city: Some(" Nantes ".into()),
            ..SearchFilters::default()
        }
        .parse()
        .unwrap();
        assert_eq!(
            f.to_query(),
            vec![
                ("city".to_string(), "Nantes".to_string()),
                ("page".to_string(), "1".to_string()),
                ("page_size".to_string(), "20".to_string()),
            ]
        );
        assert_eq!(f.next_page().page, 2);
    }

    #[test]
    fn test_page_math() {
        let page = Page::<u8> { items: vec![], total: 41, page: 2, page_size: 20 };
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
        let last = Page::<u8> { page: 3, ..page };
        assert!(!last.has_next());
    }
}
