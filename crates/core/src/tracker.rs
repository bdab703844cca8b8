//! Active project tracking.

use std::fmt;

use tracing::{debug, info, warn};

use crate::{
    catalog::Catalog,
    models::{ActiveProject, MaterialInput, MaterialProgress, RequirementTotal},
    save::{SaveData, SaveStore, StoreError},
    totals,
};

/// Why a request left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// The module name was blank.
    EmptyName,
    /// Levels start at 1.
    InvalidLevel,
    /// The module already has an active project.
    AlreadyActive,
    /// No active project matches the module id.
    UnknownProject,
    /// The item is not a requirement of the project's current level.
    UnknownItem,
    /// The project is already at the highest representable level.
    LevelLimit,
    /// The owned count is already zero.
    NothingOwned,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Skip::EmptyName => "module name is empty",
            Skip::InvalidLevel => "level must be at least 1",
            Skip::AlreadyActive => "project is already active",
            Skip::UnknownProject => "no such project",
            Skip::UnknownItem => "item is not required at this level",
            Skip::LevelLimit => "no higher level exists",
            Skip::NothingOwned => "nothing owned to remove",
        };
        f.write_str(message)
    }
}

/// Result of writing the snapshot after a change.
#[derive(Debug)]
pub enum SyncStatus {
    /// Snapshot written.
    Saved,
    /// Snapshot could not be written; the in-memory change stands.
    Failed(StoreError),
}

/// Result of a mutating tracker operation.
#[derive(Debug)]
pub enum Outcome {
    /// Nothing changed and nothing was written.
    Unchanged(Skip),
    /// State changed and a save was attempted.
    Applied(SyncStatus),
}

impl Outcome {
    /// Whether the in-memory state changed.
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    /// The save error, if the change could not be persisted.
    pub fn sync_error(&self) -> Option<&StoreError> {
        match self {
            Outcome::Applied(SyncStatus::Failed(err)) => Some(err),
            _ => None,
        }
    }
}

/// Session object owning the catalog, the active projects and the save slot.
pub struct ProjectTracker<S> {
    seed: Catalog,
    catalog: Catalog,
    projects: Vec<ActiveProject>,
    store: S,
    key: String,
}

impl<S: SaveStore> ProjectTracker<S> {
    /// Start a session from `seed`, persisting to `key` in `store`.
    pub fn new(seed: Catalog, store: S, key: impl Into<String>) -> Self {
        Self {
            catalog: seed.clone(),
            seed,
            projects: Vec::new(),
            store,
            key: key.into(),
        }
    }

    /// Restore the saved snapshot, overlaying its catalog on the seed.
    ///
    /// Returns `Ok(false)` when the slot is empty. On error the session
    /// keeps its current state.
    pub fn load(&mut self) -> Result<bool, StoreError> {
        match self.store.read(&self.key) {
            Ok(Some(data)) => {
                self.catalog = data.database.overlaid_on(&self.seed);
                self.projects = dedup_projects(data.active_projects);
                info!(
                    projects = self.projects.len(),
                    items = self.catalog.items().len(),
                    modules = self.catalog.modules().len(),
                    "Save restored"
                );
                Ok(true)
            }
            Ok(None) => {
                debug!(key = %self.key, "No save found; starting from seed");
                Ok(false)
            }
            Err(err) => {
                warn!(key = %self.key, %err, "Failed to read save");
                Err(err)
            }
        }
    }

    /// Merge a newer seed under the live catalog; live entries win.
    pub fn merge_seed(&mut self, seed: Catalog) {
        let current = std::mem::take(&mut self.catalog);
        self.catalog = current.overlaid_on(&seed);
        self.seed = seed;
        info!(
            items = self.catalog.items().len(),
            modules = self.catalog.modules().len(),
            "Seed merged"
        );
    }

    /// Copy of the full state.
    pub fn snapshot(&self) -> SaveData {
        SaveData {
            database: self.catalog.clone(),
            active_projects: self.projects.clone(),
        }
    }

    /// Current catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Active projects in insertion order.
    pub fn projects(&self) -> &[ActiveProject] {
        &self.projects
    }

    /// Active project for `module_id`.
    pub fn project(&self, module_id: &str) -> Option<&ActiveProject> {
        self.projects.iter().find(|p| p.module_id == module_id)
    }

    /// Id of the module whose name equals `name` exactly.
    pub fn find_module_by_name(&self, name: &str) -> Option<&str> {
        self.catalog.module_by_name(name).map(|m| m.id.as_str())
    }

    /// Outstanding materials across all active projects.
    pub fn calculate_totals(&self) -> Vec<RequirementTotal> {
        totals::calculate_totals(&self.projects, &self.catalog)
    }

    /// Material progress for the project on `module_id`.
    pub fn project_progress(&self, module_id: &str) -> Vec<MaterialProgress> {
        self.project(module_id)
            .map(|project| totals::project_progress(project, &self.catalog))
            .unwrap_or_default()
    }

    /// Start working on `module_name` at `level`.
    ///
    /// `existing_module_id` selects a known module; otherwise a new module
    /// is created. The level is defined from `materials` only if the module
    /// does not define it yet.
    pub fn add_project(
        &mut self,
        module_name: &str,
        level: u32,
        materials: &[MaterialInput],
        existing_module_id: Option<&str>,
    ) -> Outcome {
        let name = module_name.trim();
        if name.is_empty() {
            return self.skip("add", module_name, Skip::EmptyName);
        }
        if level == 0 {
            return self.skip("add", name, Skip::InvalidLevel);
        }
        if let Some(id) = existing_module_id {
            if self.catalog.module(id).is_some() && self.project(id).is_some() {
                return self.skip("add", id, Skip::AlreadyActive);
            }
        }

        let module_id = self.catalog.ensure_module(existing_module_id, name);
        if !self
            .catalog
            .define_level_if_absent(&module_id, level, materials)
        {
            debug!(module_id = %module_id, level, "Using existing level definition");
        }

        self.projects.push(ActiveProject::new(module_id.clone(), level));
        info!(module_id = %module_id, name, level, "Project added");
        self.sync()
    }

    /// Advance the project on `module_id` to its next level.
    ///
    /// A next level already defined on the module takes precedence and
    /// `materials` are ignored. Otherwise non-empty `materials` define it.
    /// With neither, the project advances to a level with nothing to track.
    pub fn level_up(&mut self, module_id: &str, materials: &[MaterialInput]) -> Outcome {
        let Some(index) = self.position(module_id) else {
            return self.skip("level up", module_id, Skip::UnknownProject);
        };
        let Some(new_level) = self.projects[index].level.checked_add(1) else {
            return self.skip("level up", module_id, Skip::LevelLimit);
        };

        let predefined = self
            .catalog
            .module(module_id)
            .map(|module| module.level(new_level).is_some())
            .unwrap_or(false);
        if predefined {
            if !materials.is_empty() {
                debug!(module_id, level = new_level, "Ignoring materials for predefined level");
            }
        } else if !materials.is_empty() {
            self.catalog.define_level_if_absent(module_id, new_level, materials);
        }

        let project = &mut self.projects[index];
        project.level = new_level;
        project.owned_materials.clear();
        info!(module_id, level = new_level, predefined, "Project levelled up");
        self.sync()
    }

    /// Stop tracking the project on `module_id`.
    pub fn delete_project(&mut self, module_id: &str) -> Outcome {
        let before = self.projects.len();
        self.projects.retain(|p| p.module_id != module_id);
        if self.projects.len() == before {
            return self.skip("delete", module_id, Skip::UnknownProject);
        }
        info!(module_id, "Project deleted");
        self.sync()
    }

    /// Record one more collected `item_id`. Counts may exceed the requirement.
    ///
    /// Only items required by the project's current level are tracked.
    pub fn increment_owned(&mut self, module_id: &str, item_id: &str) -> Outcome {
        let Some(index) = self.position(module_id) else {
            return self.skip("increment", module_id, Skip::UnknownProject);
        };
        if !self.requires(index, item_id) {
            return self.skip("increment", item_id, Skip::UnknownItem);
        }
        let count = self.projects[index]
            .owned_materials
            .entry(item_id.to_string())
            .or_insert(0);
        *count = count.saturating_add(1);
        debug!(module_id, item_id, owned = *count, "Material incremented");
        self.sync()
    }

    /// Record one fewer collected `item_id`, never going below zero.
    pub fn decrement_owned(&mut self, module_id: &str, item_id: &str) -> Outcome {
        let Some(index) = self.position(module_id) else {
            return self.skip("decrement", module_id, Skip::UnknownProject);
        };
        if !self.requires(index, item_id) {
            return self.skip("decrement", item_id, Skip::UnknownItem);
        }
        let project = &mut self.projects[index];
        let owned = project.owned(item_id);
        if owned == 0 {
            return self.skip("decrement", item_id, Skip::NothingOwned);
        }
        project.owned_materials.insert(item_id.to_string(), owned - 1);
        debug!(module_id, item_id, owned = owned - 1, "Material decremented");
        self.sync()
    }

    fn position(&self, module_id: &str) -> Option<usize> {
        self.projects.iter().position(|p| p.module_id == module_id)
    }

    fn requires(&self, index: usize, item_id: &str) -> bool {
        let project = &self.projects[index];
        self.catalog
            .module(&project.module_id)
            .and_then(|module| module.level(project.level))
            .map(|level| level.requirements.iter().any(|r| r.item_id == item_id))
            .unwrap_or(false)
    }

    fn skip(&self, operation: &str, target: &str, reason: Skip) -> Outcome {
        debug!(operation, target, %reason, "Request ignored");
        Outcome::Unchanged(reason)
    }

    fn sync(&self) -> Outcome {
        let result = self
            .snapshot()
            .to_json()
            .and_then(|json| self.store.write(&self.key, &json));
        match result {
            Ok(()) => Outcome::Applied(SyncStatus::Saved),
            Err(err) => {
                warn!(key = %self.key, %err, "Failed to save snapshot");
                Outcome::Applied(SyncStatus::Failed(err))
            }
        }
    }
}

fn dedup_projects(projects: Vec<ActiveProject>) -> Vec<ActiveProject> {
    let mut unique: Vec<ActiveProject> = Vec::with_capacity(projects.len());
    for project in projects {
        if project.level == 0 {
            warn!(module_id = %project.module_id, "Dropping level 0 project from save");
            continue;
        }
        if unique.iter().any(|p| p.module_id == project.module_id) {
            warn!(module_id = %project.module_id, "Dropping duplicate project from save");
            continue;
        }
        unique.push(project);
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{Category, Item, Module, ModuleLevel, Requirement},
        save::{JsonFileStore, DEFAULT_SAVE_KEY},
    };
    use anyhow::Result;
    use std::cell::{Cell, RefCell};
    use tempfile::tempdir;

    #[derive(Default)]
    struct MemoryStore {
        slot: RefCell<Option<String>>,
        writes: Cell<usize>,
        fail: bool,
    }

    impl MemoryStore {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }
    }

    impl SaveStore for MemoryStore {
        fn read(&self, _key: &str) -> Result<Option<SaveData>, StoreError> {
            match self.slot.borrow().as_deref() {
                Some(json) => serde_json::from_str(json)
                    .map(Some)
                    .map_err(|err| StoreError::Backend(err.to_string())),
                None => Ok(None),
            }
        }

        fn write(&self, _key: &str, snapshot: &str) -> Result<(), StoreError> {
            if self.fail {
                return Err(StoreError::Backend("disk full".to_string()));
            }
            self.writes.set(self.writes.get() + 1);
            *self.slot.borrow_mut() = Some(snapshot.to_string());
            Ok(())
        }
    }

    fn seed() -> Catalog {
        let mut catalog = Catalog::default();
        catalog.insert_item(Item {
            id: "bolts".to_string(),
            name: "Bolts".to_string(),
            image_path: None,
            category: Category::Building,
        });
        let mut workbench = Module::new("module-workbench", "Workbench");
        for (level, quantity) in [(1, 2), (2, 6)] {
            workbench.levels.insert(
                level,
                ModuleLevel {
                    level,
                    requirements: vec![Requirement {
                        item_id: "bolts".to_string(),
                        quantity,
                    }],
                },
            );
        }
        catalog.insert_module(workbench);
        catalog
    }

    fn tracker(store: &MemoryStore) -> ProjectTracker<&MemoryStore> {
        ProjectTracker::new(seed(), store, DEFAULT_SAVE_KEY)
    }

    #[test]
    fn adding_a_new_module_creates_items_module_and_project() {
        let store = MemoryStore::default();
        let mut tracker = tracker(&store);

        let outcome = tracker.add_project("Shed", 1, &[MaterialInput::new("Nails", 5)], None);
        assert!(matches!(outcome, Outcome::Applied(SyncStatus::Saved)));

        assert_eq!(tracker.projects().len(), 1);
        let project = &tracker.projects()[0];
        assert_eq!(project.level, 1);
        assert!(project.owned_materials.is_empty());

        let nails = tracker
            .catalog()
            .item_by_name("Nails")
            .expect("nails created")
            .clone();
        let module = tracker
            .catalog()
            .module(&project.module_id)
            .expect("module created");
        assert_eq!(module.name, "Shed");
        assert_eq!(
            module.level(1).map(|l| l.requirements.clone()),
            Some(vec![Requirement {
                item_id: nails.id,
                quantity: 5
            }])
        );
        assert_eq!(tracker.catalog().items().len(), 2);
        assert_eq!(store.writes.get(), 1);
    }

    #[test]
    fn blank_names_and_level_zero_are_rejected() {
        let store = MemoryStore::default();
        let mut tracker = tracker(&store);
        assert!(matches!(
            tracker.add_project("   ", 1, &[], None),
            Outcome::Unchanged(Skip::EmptyName)
        ));
        assert!(matches!(
            tracker.add_project("Shed", 0, &[], None),
            Outcome::Unchanged(Skip::InvalidLevel)
        ));
        assert!(tracker.projects().is_empty());
        assert_eq!(tracker.catalog(), &seed());
        assert_eq!(store.writes.get(), 0);
    }

    #[test]
    fn preloaded_levels_ignore_supplied_materials() {
        let store = MemoryStore::default();
        let mut tracker = tracker(&store);
        let id = tracker
            .find_module_by_name("Workbench")
            .map(str::to_string)
            .expect("preloaded module");

        let glue = [MaterialInput::new("Glue", 1)];
        let outcome = tracker.add_project("Workbench", 1, &glue, Some(&id));
        assert!(outcome.is_applied());
        assert!(tracker.catalog().item_by_name("glue").is_none());
        assert_eq!(tracker.project(&id).map(|p| p.level), Some(1));
    }

    #[test]
    fn adding_an_active_module_again_changes_nothing() {
        let store = MemoryStore::default();
        let mut tracker = tracker(&store);
        tracker.add_project("Workbench", 1, &[], Some("module-workbench"));
        let catalog_before = tracker.catalog().clone();

        let outcome = tracker.add_project(
            "Workbench",
            3,
            &[MaterialInput::new("Screws", 3)],
            Some("module-workbench"),
        );
        assert!(matches!(outcome, Outcome::Unchanged(Skip::AlreadyActive)));
        assert_eq!(tracker.projects().len(), 1);
        assert_eq!(tracker.catalog(), &catalog_before);
        assert_eq!(store.writes.get(), 1);
    }

    #[test]
    fn owned_counts_never_go_negative() {
        let store = MemoryStore::default();
        let mut tracker = tracker(&store);
        tracker.add_project("Workbench", 1, &[], Some("module-workbench"));
        let id = "module-workbench";

        assert!(matches!(
            tracker.decrement_owned(id, "bolts"),
            Outcome::Unchanged(Skip::NothingOwned)
        ));
        assert_eq!(tracker.project(id).map(|p| p.owned("bolts")), Some(0));

        let script = [
            (true, 1),
            (true, 2),
            (false, 1),
            (false, 0),
            (false, 0),
            (true, 1),
            (false, 0),
        ];
        for (step, (increment, expected)) in script.into_iter().enumerate() {
            if increment {
                tracker.increment_owned(id, "bolts");
            } else {
                tracker.decrement_owned(id, "bolts");
            }
            let owned = tracker.project(id).map(|p| p.owned("bolts"));
            assert_eq!(owned, Some(expected), "step {step}");
        }
        assert_eq!(tracker.project(id).map(|p| p.owned("bolts")), Some(0));
    }

    #[test]
    fn over_collecting_is_allowed_and_totals_floor_at_zero() {
        let store = MemoryStore::default();
        let mut tracker = tracker(&store);
        tracker.add_project("Workbench", 1, &[], Some("module-workbench"));
        for _ in 0..5 {
            tracker.increment_owned("module-workbench", "bolts");
        }
        assert_eq!(
            tracker.project("module-workbench").map(|p| p.owned("bolts")),
            Some(5)
        );
        assert!(tracker.calculate_totals().is_empty());

        let progress = tracker.project_progress("module-workbench");
        assert_eq!(progress[0].outstanding(), 0);
    }

    #[test]
    fn untracked_items_are_ignored() {
        let store = MemoryStore::default();
        let mut tracker = tracker(&store);
        tracker.add_project("Shed", 1, &[], None);
        tracker.add_project("Workbench", 1, &[], Some("module-workbench"));
        let shed = tracker.projects()[0].module_id.clone();
        let writes = store.writes.get();

        for (module_id, item_id) in [
            (shed.as_str(), "no-such-item"),
            (shed.as_str(), "bolts"),
            ("module-workbench", "no-such-item"),
        ] {
            assert!(matches!(
                tracker.increment_owned(module_id, item_id),
                Outcome::Unchanged(Skip::UnknownItem)
            ));
            assert!(matches!(
                tracker.decrement_owned(module_id, item_id),
                Outcome::Unchanged(Skip::UnknownItem)
            ));
        }
        assert!(tracker.projects().iter().all(|p| p.owned_materials.is_empty()));
        assert_eq!(store.writes.get(), writes);
    }

    #[test]
    fn level_up_stops_at_the_highest_level() -> Result<()> {
        let store = MemoryStore::default();
        let mut data = SaveData::default();
        data.active_projects.push(ActiveProject::new("module-workbench", u32::MAX));
        *store.slot.borrow_mut() = Some(data.to_json()?);

        let mut tracker = tracker(&store);
        tracker.load()?;
        assert!(matches!(
            tracker.level_up("module-workbench", &[]),
            Outcome::Unchanged(Skip::LevelLimit)
        ));
        assert_eq!(tracker.project("module-workbench").map(|p| p.level), Some(u32::MAX));
        assert_eq!(store.writes.get(), 0);
        Ok(())
    }

    #[test]
    fn level_zero_projects_are_dropped_on_load() -> Result<()> {
        let store = MemoryStore::default();
        let mut data = SaveData::default();
        data.active_projects.push(ActiveProject::new("module-workbench", 0));
        data.active_projects.push(ActiveProject::new("module-stash", 1));
        *store.slot.borrow_mut() = Some(data.to_json()?);

        let mut tracker = tracker(&store);
        tracker.load()?;
        assert_eq!(tracker.projects().len(), 1);
        assert_eq!(tracker.projects()[0].module_id, "module-stash");
        Ok(())
    }

    #[test]
    fn unknown_projects_are_ignored() {
        let store = MemoryStore::default();
        let mut tracker = tracker(&store);
        for outcome in [
            tracker.delete_project("nope"),
            tracker.increment_owned("nope", "bolts"),
            tracker.decrement_owned("nope", "bolts"),
            tracker.level_up("nope", &[]),
        ] {
            assert!(matches!(outcome, Outcome::Unchanged(Skip::UnknownProject)));
        }
        assert!(tracker.projects().is_empty());
        assert_eq!(store.writes.get(), 0);
    }

    #[test]
    fn level_up_into_predefined_level_drops_materials_and_resets_progress() {
        let store = MemoryStore::default();
        let mut tracker = tracker(&store);
        tracker.add_project("Workbench", 1, &[], Some("module-workbench"));
        tracker.increment_owned("module-workbench", "bolts");

        let outcome = tracker.level_up("module-workbench", &[MaterialInput::new("Screws", 3)]);
        assert!(outcome.is_applied());
        let project = tracker.project("module-workbench").expect("still active");
        assert_eq!(project.level, 2);
        assert!(project.owned_materials.is_empty());
        assert!(tracker.catalog().item_by_name("Screws").is_none());
        let level = tracker
            .catalog()
            .module("module-workbench")
            .and_then(|m| m.level(2))
            .expect("level 2");
        assert_eq!(level.requirements[0].quantity, 6);
    }

    #[test]
    fn level_up_defines_missing_level_from_materials() {
        let store = MemoryStore::default();
        let mut tracker = tracker(&store);
        tracker.add_project("Shed", 1, &[MaterialInput::new("Nails", 5)], None);
        let id = tracker.projects()[0].module_id.clone();
        let nails = tracker
            .catalog()
            .item_by_name("nails")
            .expect("nails created")
            .id
            .clone();
        assert!(tracker.increment_owned(&id, &nails).is_applied());

        tracker.level_up(&id, &[MaterialInput::new("Screws", 3)]);
        let project = tracker.project(&id).expect("active");
        assert_eq!(project.level, 2);
        assert!(project.owned_materials.is_empty());

        let screws = tracker
            .catalog()
            .item_by_name("screws")
            .expect("screws created")
            .id
            .clone();
        let level = tracker
            .catalog()
            .module(&id)
            .and_then(|m| m.level(2))
            .expect("level 2 defined");
        assert_eq!(
            level.requirements,
            vec![Requirement {
                item_id: screws,
                quantity: 3
            }]
        );
    }

    #[test]
    fn level_up_without_materials_tracks_nothing() {
        let store = MemoryStore::default();
        let mut tracker = tracker(&store);
        tracker.add_project("Shed", 1, &[MaterialInput::new("Nails", 5)], None);
        let id = tracker.projects()[0].module_id.clone();

        assert!(tracker.level_up(&id, &[]).is_applied());
        assert_eq!(tracker.project(&id).map(|p| p.level), Some(2));
        assert!(tracker
            .catalog()
            .module(&id)
            .and_then(|m| m.level(2))
            .is_none());
        assert!(tracker.calculate_totals().is_empty());
    }

    #[test]
    fn totals_combine_projects_needing_the_same_item() {
        let store = MemoryStore::default();
        let mut tracker = tracker(&store);
        tracker.add_project("Shed", 1, &[MaterialInput::new("Nails", 5)], None);
        tracker.add_project("Coop", 1, &[MaterialInput::new("nails", 5)], None);
        let ids: Vec<String> = tracker
            .projects()
            .iter()
            .map(|p| p.module_id.clone())
            .collect();
        let nails = tracker
            .catalog()
            .item_by_name("Nails")
            .expect("nails")
            .id
            .clone();

        tracker.increment_owned(&ids[0], &nails);
        tracker.increment_owned(&ids[0], &nails);
        tracker.increment_owned(&ids[1], &nails);

        let totals = tracker.calculate_totals();
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].item.name, "Nails");
        assert_eq!(totals[0].quantity, 7);
    }

    #[test]
    fn deleting_removes_the_project() {
        let store = MemoryStore::default();
        let mut tracker = tracker(&store);
        tracker.add_project("Workbench", 1, &[], Some("module-workbench"));
        assert!(tracker.delete_project("module-workbench").is_applied());
        assert!(tracker.projects().is_empty());
        assert!(tracker.catalog().module("module-workbench").is_some());
    }

    #[test]
    fn failed_saves_are_reported_without_rollback() {
        let store = MemoryStore::failing();
        let mut tracker = tracker(&store);
        let outcome = tracker.add_project("Workbench", 1, &[], Some("module-workbench"));
        assert!(matches!(outcome.sync_error(), Some(StoreError::Backend(_))));
        assert_eq!(tracker.projects().len(), 1);
    }

    #[test]
    fn reload_restores_projects_and_keeps_seed_content() -> Result<()> {
        let dir = tempdir()?;
        let store = JsonFileStore::new(dir.path());
        let mut first = ProjectTracker::new(seed(), store.clone(), DEFAULT_SAVE_KEY);
        first.add_project("Workbench", 1, &[], Some("module-workbench"));
        first.increment_owned("module-workbench", "bolts");
        first.add_project("Shed", 2, &[MaterialInput::new("Nails", 5)], None);
        let saved = first.snapshot();

        let mut richer_seed = seed();
        richer_seed.insert_module(Module::new("module-stash", "Stash"));
        let mut second = ProjectTracker::new(richer_seed.clone(), store, DEFAULT_SAVE_KEY);
        assert!(second.load()?);

        assert_eq!(second.projects(), saved.active_projects.as_slice());
        assert!(second.catalog().contains_all(&saved.database));
        assert!(second.catalog().contains_all(&richer_seed));
        Ok(())
    }

    #[test]
    fn empty_slot_keeps_seed_state() -> Result<()> {
        let store = MemoryStore::default();
        let mut tracker = tracker(&store);
        assert!(!tracker.load()?);
        assert_eq!(tracker.snapshot().database, seed());
        Ok(())
    }

    #[test]
    fn duplicate_projects_in_a_save_are_collapsed() -> Result<()> {
        let store = MemoryStore::default();
        let mut data = SaveData::default();
        data.active_projects.push(ActiveProject::new("module-workbench", 1));
        data.active_projects.push(ActiveProject::new("module-workbench", 2));
        *store.slot.borrow_mut() = Some(data.to_json()?);

        let mut tracker = tracker(&store);
        tracker.load()?;
        assert_eq!(tracker.projects().len(), 1);
        assert_eq!(tracker.projects()[0].level, 1);
        Ok(())
    }

    #[test]
    fn merged_seed_does_not_override_live_entries() {
        let store = MemoryStore::default();
        let mut tracker = tracker(&store);
        tracker.add_project("Shed", 1, &[MaterialInput::new("Nails", 5)], None);

        let mut update = Catalog::default();
        update.insert_item(Item {
            id: "bolts".to_string(),
            name: "Renamed bolts".to_string(),
            image_path: None,
            category: Category::Other,
        });
        update.insert_module(Module::new("module-lavatory", "Lavatory"));
        tracker.merge_seed(update);

        assert_eq!(
            tracker.catalog().item("bolts").map(|i| i.name.as_str()),
            Some("Bolts")
        );
        assert!(tracker.find_module_by_name("Lavatory").is_some());
        assert!(tracker.catalog().item_by_name("nails").is_some());
    }
}
