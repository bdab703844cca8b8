//! Roll project requirements into a single shopping list.

use std::collections::BTreeMap;

use crate::{
    catalog::Catalog,
    models::{ActiveProject, Category, Item, MaterialProgress, RequirementTotal},
};

/// Outstanding quantity per item across all `projects`.
///
/// Projects whose module or current level is not defined contribute
/// nothing. Items nobody still needs are left out. Entries are ordered by
/// item id; presentation sorts separately.
pub fn calculate_totals(projects: &[ActiveProject], catalog: &Catalog) -> Vec<RequirementTotal> {
    let mut totals: BTreeMap<&str, u32> = BTreeMap::new();

    for project in projects {
        let Some(level) = catalog
            .module(&project.module_id)
            .and_then(|module| module.level(project.level))
        else {
            continue;
        };
        for requirement in &level.requirements {
            let outstanding = requirement
                .quantity
                .saturating_sub(project.owned(&requirement.item_id));
            if outstanding > 0 {
                let total = totals.entry(requirement.item_id.as_str()).or_insert(0u32);
                *total = total.saturating_add(outstanding);
            }
        }
    }

    totals
        .into_iter()
        .map(|(id, quantity)| RequirementTotal {
            item: resolve_item(catalog, id),
            quantity,
        })
        .collect()
}

/// Group totals by category in [`Category::ALL`] order, sorting each group
/// by item name. Empty groups are omitted.
pub fn group_by_category(totals: &[RequirementTotal]) -> Vec<(Category, Vec<RequirementTotal>)> {
    Category::ALL
        .iter()
        .filter_map(|category| {
            let mut group: Vec<RequirementTotal> = totals
                .iter()
                .filter(|total| total.item.category == *category)
                .cloned()
                .collect();
            if group.is_empty() {
                return None;
            }
            group.sort_by(|a, b| a.item.name.to_lowercase().cmp(&b.item.name.to_lowercase()));
            Some((*category, group))
        })
        .collect()
}

/// Owned versus required counts for each requirement of the project's current level.
pub fn project_progress(project: &ActiveProject, catalog: &Catalog) -> Vec<MaterialProgress> {
    catalog
        .module(&project.module_id)
        .and_then(|module| module.level(project.level))
        .map(|level| {
            level
                .requirements
                .iter()
                .map(|requirement| MaterialProgress {
                    item: resolve_item(catalog, &requirement.item_id),
                    owned: project.owned(&requirement.item_id),
                    required: requirement.quantity,
                })
                .collect()
        })
        .unwrap_or_default()
}

fn resolve_item(catalog: &Catalog, id: &str) -> Item {
    catalog
        .item(id)
        .cloned()
        .unwrap_or_else(|| Item::unknown(id))
}
