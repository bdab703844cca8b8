use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::{
    catalog::Catalog,
    models::{Category, Item, Module, ModuleLevel, Requirement},
};

/// Entry of the upstream item table, keyed by item id.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamItem {
    /// Display name.
    pub name: String,
    /// Abbreviated name, unused by the catalog.
    #[serde(default, rename = "shortName")]
    pub short_name: Option<String>,
}

/// Upstream hideout document.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamHideout {
    /// One entry per module level.
    #[serde(default)]
    pub modules: Vec<UpstreamModule>,
}

/// One level of one hideout module.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamModule {
    /// Module display name.
    pub module: String,
    /// Level this entry describes.
    pub level: u32,
    /// Requirements of every kind.
    #[serde(default)]
    pub require: Vec<UpstreamRequirement>,
}

/// A requirement of any kind; only `item` requirements are kept.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamRequirement {
    /// Requirement kind: `item`, `module`, `trader` or `skill`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Item id for item requirements; other kinds use other shapes.
    #[serde(default)]
    pub name: Value,
    /// Required count, if the kind has one.
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// Stable module id derived from its display name.
pub fn module_id_for(name: &str) -> String {
    static NON_SLUG: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"[^a-z0-9]").expect("invalid slug regex"));
    format!("module-{}", NON_SLUG.replace_all(&name.to_lowercase(), "-"))
}

/// Convert upstream data into a seed catalog.
///
/// Module, trader and skill requirements are dropped. Item requirements
/// naming an id absent from `items` are skipped so that every requirement
/// points at a catalog item.
pub fn build_catalog(items: &HashMap<String, UpstreamItem>, hideout: &UpstreamHideout) -> Catalog {
    let mut catalog = Catalog::default();

    for entry in &hideout.modules {
        let module_id = module_id_for(&entry.module);
        let mut requirements = Vec::new();

        for requirement in entry.require.iter().filter(|r| r.kind == "item") {
            let Some(item_id) = requirement.name.as_str() else {
                warn!(module = %entry.module, "Item requirement without an id");
                continue;
            };
            let quantity = requirement.quantity.unwrap_or(0);
            if quantity == 0 {
                continue;
            }
            if catalog.item(item_id).is_none() {
                let Some(info) = items.get(item_id) else {
                    warn!(module = %entry.module, item_id, "Item not found upstream");
                    continue;
                };
                catalog.insert_item(Item {
                    id: item_id.to_string(),
                    name: info.name.clone(),
                    image_path: None,
                    category: Category::Other,
                });
            }
            requirements.push(Requirement {
                item_id: item_id.to_string(),
                quantity,
            });
        }

        let mut module = catalog
            .module(&module_id)
            .cloned()
            .unwrap_or_else(|| Module::new(module_id.clone(), entry.module.clone()));
        module.levels.insert(
            entry.level,
            ModuleLevel {
                level: entry.level,
                requirements,
            },
        );
        catalog.insert_module(module);
    }

    catalog
}
