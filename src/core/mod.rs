//! Core module - fundamental types and utilities

pub mod catalog;
pub mod config;
pub mod record;

pub use catalog::{CatalogError, Region, RegionCatalog};
pub use config::Config;
pub use record::{
    Address, BusinessProfile, Category, GstRecord, PanRecord, RegistrationRecord, COUNTRY,
};
