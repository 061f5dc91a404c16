//! Company (entreprise) profile: creation, editing and public search.

pub mod dto;
pub mod services;

pub use dto::{Category, Company, CompanyForm, CompanyPatch, SubCategory};
