//! Seed catalog sourcing.

/// Conversion of upstream hideout data into a catalog.
pub mod generate;
/// Bundled and cached seed loading.
pub mod loader;
/// Background refresh of the cached seed.
pub mod sync;

pub use generate::{build_catalog, module_id_for};
pub use loader::{bundled_catalog, seed_path, SeedLoader};
pub use sync::{SeedEvent, SeedSync};
