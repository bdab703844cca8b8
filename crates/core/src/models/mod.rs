//! Shared domain models.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Grouping used when presenting materials.
///
/// Unrecognised labels read from disk collapse into [`Category::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Category {
    /// Construction materials.
    Building,
    /// Electronics and technical parts.
    Tech,
    /// Food and drink.
    Food,
    /// Medical supplies.
    Health,
    /// Tools.
    Tools,
    /// Valuables and barter goods.
    Valuables,
    /// Anything else.
    Other,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 7] = [
        Category::Building,
        Category::Tech,
        Category::Food,
        Category::Health,
        Category::Tools,
        Category::Valuables,
        Category::Other,
    ];

    /// Parse a label case-insensitively, falling back to [`Category::Other`].
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "building" => Category::Building,
            "tech" => Category::Tech,
            "food" => Category::Food,
            "health" => Category::Health,
            "tools" => Category::Tools,
            "valuables" => Category::Valuables,
            _ => Category::Other,
        }
    }

    /// Lower-case label as stored on disk.
    pub fn label(self) -> &'static str {
        match self {
            Category::Building => "building",
            Category::Tech => "tech",
            Category::Food => "food",
            Category::Health => "health",
            Category::Tools => "tools",
            Category::Valuables => "valuables",
            Category::Other => "other",
        }
    }

    /// Capitalised label for headings.
    pub fn title(self) -> &'static str {
        match self {
            Category::Building => "Building",
            Category::Tech => "Tech",
            Category::Food => "Food",
            Category::Health => "Health",
            Category::Tools => "Tools",
            Category::Valuables => "Valuables",
            Category::Other => "Other",
        }
    }

    /// Step through [`Category::ALL`], wrapping at either end.
    pub fn cycle(self, delta: isize) -> Self {
        let len = Self::ALL.len() as isize;
        let index = Self::ALL.iter().position(|c| *c == self).unwrap_or(0) as isize;
        Self::ALL[(index + delta).rem_euclid(len) as usize]
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::from_label(&value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A material that can be required by a module level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identifier.
    pub id: String,
    /// User-facing label.
    pub name: String,
    /// Optional icon path.
    #[serde(default)]
    pub image_path: Option<String>,
    /// Display grouping.
    #[serde(default)]
    pub category: Category,
}

impl Item {
    /// Placeholder used when a requirement points at an id missing from the catalog.
    pub fn unknown(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: "Unknown Item".to_string(),
            image_path: None,
            category: Category::Other,
        }
    }
}

/// Demand for one item at one module level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Referenced catalog item.
    pub item_id: String,
    /// Positive quantity.
    pub quantity: u32,
}

/// The cost of reaching one level of a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleLevel {
    /// Level number, starting at 1.
    pub level: u32,
    /// Materials needed for this level.
    #[serde(default)]
    pub requirements: Vec<Requirement>,
}

/// An upgradeable facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Stable identifier.
    pub id: String,
    /// Display name, matched case-sensitively against user input.
    pub name: String,
    /// Known levels; gaps are allowed.
    #[serde(default)]
    pub levels: BTreeMap<u32, ModuleLevel>,
}

impl Module {
    /// Build an empty module with no levels.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            levels: BTreeMap::new(),
        }
    }

    /// Definition for `level`, if one exists.
    pub fn level(&self, level: u32) -> Option<&ModuleLevel> {
        self.levels.get(&level)
    }
}

/// A module the user is working towards, with collected material counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveProject {
    /// Module being upgraded. Unique across active projects.
    pub module_id: String,
    /// Level currently being worked toward.
    pub level: u32,
    /// Collected counts keyed by item id; a missing key means zero.
    #[serde(default)]
    pub owned_materials: BTreeMap<String, u32>,
}

impl ActiveProject {
    /// Start a project with nothing collected.
    pub fn new(module_id: impl Into<String>, level: u32) -> Self {
        Self {
            module_id: module_id.into(),
            level,
            owned_materials: BTreeMap::new(),
        }
    }

    /// Collected count for `item_id`.
    pub fn owned(&self, item_id: &str) -> u32 {
        self.owned_materials.get(item_id).copied().unwrap_or(0)
    }
}

/// A material as entered by the user: resolved to a catalog item by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialInput {
    /// Item name, matched case-insensitively.
    pub name: String,
    /// Required quantity.
    pub quantity: u32,
    /// Category applied only when the item has to be created.
    #[serde(default)]
    pub category: Option<Category>,
}

impl MaterialInput {
    /// Material referring to an item by name only.
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
            category: None,
        }
    }

    /// Attach a category used if the item is new.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }
}

/// Outstanding quantity of one item summed across projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementTotal {
    /// Resolved item record.
    pub item: Item,
    /// Quantity still to collect.
    pub quantity: u32,
}

/// Progress on one requirement of a project's current level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterialProgress {
    /// Resolved item record.
    pub item: Item,
    /// Collected so far; may exceed `required`.
    pub owned: u32,
    /// Quantity the level asks for.
    pub required: u32,
}

impl MaterialProgress {
    /// Quantity still missing, floored at zero.
    pub fn outstanding(&self) -> u32 {
        self.required.saturating_sub(self.owned)
    }

    /// Whether nothing more is needed.
    pub fn is_complete(&self) -> bool {
        self.outstanding() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_categories_fall_back_to_other() {
        let item: Item =
            serde_json::from_str(r#"{"id":"a","name":"A","image_path":null,"category":"weapons"}"#)
                .expect("item should parse");
        assert_eq!(item.category, Category::Other);

        let item: Item = serde_json::from_str(r#"{"id":"b","name":"B","category":"Tech"}"#)
            .expect("item should parse");
        assert_eq!(item.category, Category::Tech);
        assert_eq!(item.image_path, None);
    }

    #[test]
    fn category_serializes_lowercase() {
        let value = serde_json::to_value(Category::Valuables).expect("serialize category");
        assert_eq!(value, serde_json::json!("valuables"));
    }

    #[test]
    fn category_cycle_wraps() {
        assert_eq!(Category::Building.cycle(-1), Category::Other);
        assert_eq!(Category::Other.cycle(1), Category::Building);
        assert_eq!(Category::Tech.cycle(2), Category::Health);
    }

    #[test]
    fn level_keys_round_trip_as_strings() {
        let mut module = Module::new("m", "Workbench");
        module.levels.insert(
            2,
            ModuleLevel {
                level: 2,
                requirements: vec![Requirement {
                    item_id: "bolts".to_string(),
                    quantity: 3,
                }],
            },
        );
        let json = serde_json::to_value(&module).expect("serialize module");
        assert!(json["levels"].get("2").is_some());
        let back: Module = serde_json::from_value(json).expect("deserialize module");
        assert_eq!(back, module);
    }
}
