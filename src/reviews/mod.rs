//! Reviews collected for a company and its visibility figures.

pub mod dto;
pub mod services;

pub use dto::{Review, ReviewSource, ReviewSummary, VisibilityStats};
