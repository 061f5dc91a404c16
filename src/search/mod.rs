//! Public directory search: filters and paged results.

pub mod dto;

pub use dto::{Page, SearchFilters};
