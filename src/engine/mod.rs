mod conflicts;
mod load;
mod moves;
mod suggest;
mod types;

pub use conflicts::detect_conflicts;
pub use load::{compute_load, workload, WorkloadRow};
pub use types::{Conflict, EngineError, EngineOptions};

use crate::model::{Assignment, Roster, Slot};
use chrono::NaiveDate;
use crate::period::{Period, PeriodError};
use crate::store::AssignmentStore;

/// Moteur d'allocation : suggestions équilibrées et déplacements manuels.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllocationEngine {
    options: EngineOptions,
}

impl AllocationEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Semaine contenant `date`, selon le premier jour configuré.
    pub fn week_of(&self, date: NaiveDate) -> Result<Period, PeriodError> {
        Period::week_containing(date, self.options.week_start)
    }

    /// Suggestions pour les créneaux libres de `period`, la charge étant
    /// calculée sur `current`. Rien n'est écrit : l'appelant fusionne.
    pub fn suggest<'a, I>(&self, period: &Period, current: I, roster: &Roster) -> Vec<Assignment>
    where
        I: IntoIterator<Item = &'a Assignment>,
    {
        suggest::suggest(period, current, roster)
    }

    /// Comme `suggest`, avec la charge prise sur les affectations du store
    /// comprises dans la période.
    pub fn suggest_for(&self, period: &Period, store: &AssignmentStore, roster: &Roster) -> Vec<Assignment> {
        suggest::suggest(period, store.assignments_in(period), roster)
    }

    pub fn move_worker(
        &self,
        store: &mut AssignmentStore,
        source: Slot,
        source_index: usize,
        dest: Slot,
        dest_index: usize,
    ) -> Result<(), EngineError> {
        moves::move_worker(store, source, source_index, dest, dest_index)
    }

    pub fn detect_conflicts(&self, store: &AssignmentStore, period: &Period) -> Vec<Conflict> {
        conflicts::detect_conflicts(store.assignments_in(period))
    }
}
