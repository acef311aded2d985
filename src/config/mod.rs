// src/config/mod.rs

//! Configuration loading and validation for orgcrawl.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate basic invariants like account ids and limits (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, parse_str};
pub use model::{
    AccountEntry, ConfigFile, CrawlerSection, DEFAULT_ACCESS_ROLE, OrganizationSection,
    RawConfigFile,
};
