use crate::engine::{AllocationEngine, Conflict, EngineError, EngineOptions};
use crate::model::{Assignment, Roster, Slot, WorkerId};
use crate::period::Period;
use crate::reconcile::{self, OrphanReport};
use crate::store::AssignmentStore;
use crate::template::{TemplateError, TemplateManager, WeekTemplate};
use serde::{Deserialize, Serialize};

/// Version courante du document persisté.
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Document échangé avec le stockage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleState {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub options: EngineOptions,
    #[serde(default)]
    pub workers: Roster,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub templates: TemplateManager,
}

impl Default for ScheduleState {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            options: EngineOptions::default(),
            workers: Roster::default(),
            assignments: Vec::new(),
            templates: TemplateManager::default(),
        }
    }
}

/// État de travail explicite : roster, affectations et modèles.
/// Rien n'est persisté implicitement ; l'appelant sauvegarde `snapshot()`.
#[derive(Debug, Default, Clone)]
pub struct Workspace {
    roster: Roster,
    store: AssignmentStore,
    templates: TemplateManager,
    engine: AllocationEngine,
}

impl Workspace {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            roster: Roster::default(),
            store: AssignmentStore::new().with_dedupe(options.dedupe_worker_ids),
            templates: TemplateManager::new(),
            engine: AllocationEngine::new(options),
        }
    }

    pub fn from_state(state: ScheduleState) -> Self {
        let options = state.options;
        Self {
            roster: state.workers,
            store: AssignmentStore::from_assignments(state.assignments, options.dedupe_worker_ids),
            templates: state.templates,
            engine: AllocationEngine::new(options),
        }
    }

    pub fn snapshot(&self) -> ScheduleState {
        ScheduleState {
            schema_version: SCHEMA_VERSION,
            options: self.engine.options(),
            workers: self.roster.clone(),
            assignments: self.store.to_vec(),
            templates: self.templates.clone(),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }
    pub fn store(&self) -> &AssignmentStore {
        &self.store
    }
    pub fn templates(&self) -> &TemplateManager {
        &self.templates
    }
    pub fn engine(&self) -> &AllocationEngine {
        &self.engine
    }

    /// Les nouvelles options ne réécrivent pas les affectations existantes.
    pub fn set_options(&mut self, options: EngineOptions) {
        self.store.set_dedupe(options.dedupe_worker_ids);
        self.engine = AllocationEngine::new(options);
    }

    pub fn set_workers(&mut self, slot: Slot, worker_ids: Vec<WorkerId>) {
        self.store.set_workers(slot, worker_ids);
    }

    pub fn move_worker(
        &mut self,
        source: Slot,
        source_index: usize,
        dest: Slot,
        dest_index: usize,
    ) -> Result<(), EngineError> {
        self.engine
            .move_worker(&mut self.store, source, source_index, dest, dest_index)
    }

    pub fn suggest(&self, period: &Period) -> Vec<Assignment> {
        self.engine.suggest_for(period, &self.store, &self.roster)
    }

    /// Calcule puis fusionne les suggestions ; retourne le nombre de créneaux remplis.
    pub fn apply_suggestions(&mut self, period: &Period) -> usize {
        let suggestions = self.suggest(period);
        self.store.merge(suggestions)
    }

    pub fn conflicts(&self, period: &Period) -> Vec<Conflict> {
        self.engine.detect_conflicts(&self.store, period)
    }

    /// Capture la semaine `week` sous `name`.
    pub fn capture_template(&mut self, name: &str, week: &Period) -> Result<&WeekTemplate, TemplateError> {
        self.templates
            .capture(name, week.first_day(), self.store.assignments_in(week))
    }

    /// Remplace le contenu de `week` par le modèle `name`.
    /// `None` si le modèle est inconnu (aucune modification).
    pub fn apply_template(&mut self, name: &str, week: &Period) -> Option<usize> {
        let assignments = self.templates.apply(name, week.first_day())?;
        Some(self.store.replace_period(week, assignments))
    }

    /// Réconciliation explicite après des suppressions dans le roster.
    pub fn prune_orphans(&mut self) -> OrphanReport {
        reconcile::prune_orphans(&mut self.store, &self.roster)
    }

    pub fn remove_template(&mut self, name: &str) -> Option<WeekTemplate> {
        self.templates.remove(name)
    }
}
