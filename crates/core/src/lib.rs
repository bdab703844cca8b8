#![warn(clippy::all, missing_docs)]

//! Core domain logic for the hideout upgrade tracker.
//!
//! This crate hosts the catalog and project models, the requirement
//! aggregation, snapshot persistence, configuration and seed catalog
//! handling used by the terminal UI and any future frontends.

pub mod catalog;
pub mod config;
pub mod manifest;
pub mod models;
pub mod save;
pub mod seed;
pub mod totals;
pub mod tracker;

pub use catalog::Catalog;
pub use config::AppConfig;
pub use manifest::SeedMetadata;
pub use models::{
    ActiveProject, Category, Item, MaterialInput, MaterialProgress, Module, ModuleLevel,
    Requirement, RequirementTotal,
};
pub use save::{JsonFileStore, SaveData, SaveStore, StoreError};
pub use seed::{SeedEvent, SeedLoader, SeedSync};
pub use tracker::{Outcome, ProjectTracker, Skip, SyncStatus};
