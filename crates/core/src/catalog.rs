//! Catalog of known items and modules.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::models::{Category, Item, MaterialInput, Module, ModuleLevel, Requirement};

/// Items and modules known to the tracker.
///
/// A lower-cased name index is kept next to the id-keyed item map so that
/// material names resolve without scanning every item. The index is rebuilt
/// whenever the catalog is deserialized or merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "CatalogRecord", into = "CatalogRecord")]
pub struct Catalog {
    items: BTreeMap<String, Item>,
    modules: BTreeMap<String, Module>,
    names: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogRecord {
    #[serde(default)]
    items: BTreeMap<String, Item>,
    #[serde(default)]
    modules: BTreeMap<String, Module>,
}

impl From<CatalogRecord> for Catalog {
    fn from(record: CatalogRecord) -> Self {
        Catalog::from_parts(record.items, record.modules)
    }
}

impl From<Catalog> for CatalogRecord {
    fn from(catalog: Catalog) -> Self {
        Self {
            items: catalog.items,
            modules: catalog.modules,
        }
    }
}

impl PartialEq for Catalog {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items && self.modules == other.modules
    }
}

impl Catalog {
    /// Build a catalog from raw maps, indexing item names.
    pub fn from_parts(items: BTreeMap<String, Item>, modules: BTreeMap<String, Module>) -> Self {
        let mut catalog = Self {
            items,
            modules,
            names: HashMap::new(),
        };
        catalog.reindex();
        catalog
    }

    /// All items keyed by id.
    pub fn items(&self) -> &BTreeMap<String, Item> {
        &self.items
    }

    /// All modules keyed by id.
    pub fn modules(&self) -> &BTreeMap<String, Module> {
        &self.modules
    }

    /// Look up an item by id.
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// Look up a module by id.
    pub fn module(&self, id: &str) -> Option<&Module> {
        self.modules.get(id)
    }

    /// Case-insensitive item lookup by name.
    pub fn item_by_name(&self, name: &str) -> Option<&Item> {
        self.names
            .get(&name_key(name))
            .and_then(|id| self.items.get(id))
    }

    /// Exact, case-sensitive module lookup by name.
    pub fn module_by_name(&self, name: &str) -> Option<&Module> {
        self.modules.values().find(|module| module.name == name)
    }

    /// Items sorted by name for pickers.
    pub fn items_by_name(&self) -> Vec<&Item> {
        let mut items: Vec<&Item> = self.items.values().collect();
        items.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
        items
    }

    /// Insert or replace an item.
    pub fn insert_item(&mut self, item: Item) {
        let key = name_key(&item.name);
        let id = item.id.clone();
        if self.items.insert(id.clone(), item).is_some() {
            self.reindex();
        } else {
            self.names.entry(key).or_insert(id);
        }
    }

    /// Insert or replace a module.
    pub fn insert_module(&mut self, module: Module) {
        self.modules.insert(module.id.clone(), module);
    }

    /// Return the id of the item named `name`, creating it when unknown.
    ///
    /// New items get a random id, no image and `category` (default
    /// [`Category::Other`]). An existing item keeps its own category.
    pub fn resolve_or_create_item(&mut self, name: &str, category: Option<Category>) -> String {
        if let Some(id) = self.names.get(&name_key(name)) {
            return id.clone();
        }

        let id = Uuid::new_v4().to_string();
        let item = Item {
            id: id.clone(),
            name: name.to_string(),
            image_path: None,
            category: category.unwrap_or_default(),
        };
        debug!(item_id = %id, name = %item.name, category = %item.category, "Created item");
        self.insert_item(item);
        id
    }

    /// Return `existing_id` if it names a module, otherwise create an empty one.
    pub fn ensure_module(&mut self, existing_id: Option<&str>, name: &str) -> String {
        if let Some(id) = existing_id {
            if self.modules.contains_key(id) {
                return id.to_string();
            }
        }

        let id = Uuid::new_v4().to_string();
        debug!(module_id = %id, name, "Created module");
        self.modules.insert(id.clone(), Module::new(id.clone(), name));
        id
    }

    /// Define `level` on `module_id` from `materials` unless it already exists.
    ///
    /// Existing definitions always win. Returns `true` when a level was
    /// installed. Blank names and zero quantities are dropped; a material
    /// naming the same item twice is summed into one requirement.
    pub fn define_level_if_absent(
        &mut self,
        module_id: &str,
        level: u32,
        materials: &[MaterialInput],
    ) -> bool {
        match self.modules.get(module_id) {
            Some(module) if module.levels.contains_key(&level) => return false,
            Some(_) => {}
            None => return false,
        }

        let mut requirements: Vec<Requirement> = Vec::with_capacity(materials.len());
        for material in materials {
            let name = material.name.trim();
            if name.is_empty() || material.quantity == 0 {
                continue;
            }
            let item_id = self.resolve_or_create_item(name, material.category);
            match requirements.iter_mut().find(|req| req.item_id == item_id) {
                Some(existing) => existing.quantity += material.quantity,
                None => requirements.push(Requirement {
                    item_id,
                    quantity: material.quantity,
                }),
            }
        }

        if let Some(module) = self.modules.get_mut(module_id) {
            module.levels.insert(
                level,
                ModuleLevel {
                    level,
                    requirements,
                },
            );
        }
        true
    }

    /// Overlay `self` on top of `base`: entries in `self` win on id collision,
    /// entries only in `base` are kept.
    pub fn overlaid_on(self, base: &Catalog) -> Catalog {
        let mut items = base.items.clone();
        items.extend(self.items);
        let mut modules = base.modules.clone();
        modules.extend(self.modules);
        Catalog::from_parts(items, modules)
    }

    /// Whether every id of `other` is also present here.
    pub fn contains_all(&self, other: &Catalog) -> bool {
        other.items.keys().all(|id| self.items.contains_key(id))
            && other.modules.keys().all(|id| self.modules.contains_key(id))
    }

    fn reindex(&mut self) {
        self.names.clear();
        for (id, item) in &self.items {
            self.names
                .entry(name_key(&item.name))
                .or_insert_with(|| id.clone());
        }
    }
}

fn name_key(name: &str) -> String {
    name.to_lowercase()
}
