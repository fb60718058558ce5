//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for RON/TOML data files:
//! - Skill catalogs (data-driven via RON)
//! - Game configuration (data-driven via TOML)
//!
//! A builtin catalog and configuration are embedded at compile time so hosts
//! and tests can run without a data directory.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{Content, ContentFactory, ConfigLoader, SkillCatalog, SkillLoader};
