use crate::model::{Assignment, ShiftType, Slot, WorkerId};
use crate::period::Period;
use std::collections::BTreeMap;

/// Table créneau → affectation. Au plus une affectation par créneau,
/// jamais d'affectation vide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentStore {
    by_slot: BTreeMap<Slot, Assignment>,
    dedupe_worker_ids: bool,
}

impl AssignmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active la suppression des doublons dans `set_workers` (désactivée par défaut).
    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe_worker_ids = dedupe;
        self
    }

    pub fn set_dedupe(&mut self, dedupe: bool) {
        self.dedupe_worker_ids = dedupe;
    }

    /// Reconstruit un store depuis des enregistrements persistés.
    /// Les listes vides sont ignorées ; pour un créneau vu deux fois, le dernier gagne.
    pub fn from_assignments<I>(assignments: I, dedupe: bool) -> Self
    where
        I: IntoIterator<Item = Assignment>,
    {
        let mut store = Self::new().with_dedupe(dedupe);
        for assignment in assignments {
            if assignment.worker_ids.is_empty() {
                continue;
            }
            if let Some(prev) = store.by_slot.insert(assignment.slot, assignment) {
                tracing::warn!(slot = %prev.slot, dropped = prev.id.as_str(), "duplicate slot record overwritten");
            }
        }
        store
    }

    pub fn get(&self, slot: &Slot) -> Option<&Assignment> {
        self.by_slot.get(slot)
    }

    /// Remplace la liste complète d'un créneau. Une liste vide supprime
    /// l'affectation ; sinon l'affectation existante garde son identifiant.
    pub fn set_workers(&mut self, slot: Slot, worker_ids: Vec<WorkerId>) {
        let worker_ids = if self.dedupe_worker_ids {
            dedupe(worker_ids)
        } else {
            worker_ids
        };

        if worker_ids.is_empty() {
            if self.by_slot.remove(&slot).is_some() {
                tracing::debug!(%slot, "assignment removed");
            }
            return;
        }

        match self.by_slot.get_mut(&slot) {
            Some(existing) => {
                existing.worker_ids = worker_ids;
                tracing::debug!(%slot, id = existing.id.as_str(), "assignment updated");
            }
            None => {
                let assignment = Assignment::new(slot, worker_ids);
                tracing::debug!(%slot, id = assignment.id.as_str(), "assignment created");
                self.by_slot.insert(slot, assignment);
            }
        }
    }

    pub fn remove(&mut self, slot: &Slot) -> Option<Assignment> {
        self.by_slot.remove(slot)
    }

    /// Chaque créneau de la période, avec son affectation éventuelle.
    pub fn list_for_period<'a>(
        &'a self,
        period: &Period,
    ) -> impl Iterator<Item = (Slot, Option<&'a Assignment>)> + 'a {
        period.slots().map(move |slot| (slot, self.by_slot.get(&slot)))
    }

    /// Affectations existantes de la période, dans l'ordre des créneaux.
    pub fn assignments_in<'a>(&'a self, period: &Period) -> impl Iterator<Item = &'a Assignment> + 'a {
        let first = Slot::new(period.first_day(), ShiftType::Early);
        let last = Slot::new(period.last_day(), ShiftType::Late);
        self.by_slot.range(first..=last).map(|(_, a)| a)
    }

    /// Union : n'installe que les affectations dont le créneau est libre.
    /// Retourne le nombre d'affectations ajoutées.
    pub fn merge<I>(&mut self, assignments: I) -> usize
    where
        I: IntoIterator<Item = Assignment>,
    {
        let mut added = 0;
        for assignment in assignments {
            if assignment.worker_ids.is_empty() || self.by_slot.contains_key(&assignment.slot) {
                continue;
            }
            self.by_slot.insert(assignment.slot, assignment);
            added += 1;
        }
        tracing::debug!(added, "assignments merged");
        added
    }

    /// Remplace tout le contenu de la période par `assignments`.
    /// Les affectations hors période sont ignorées.
    pub fn replace_period<I>(&mut self, period: &Period, assignments: I) -> usize
    where
        I: IntoIterator<Item = Assignment>,
    {
        self.by_slot.retain(|slot, _| !period.contains(slot.date));
        let mut installed = 0;
        for assignment in assignments {
            if assignment.worker_ids.is_empty() {
                continue;
            }
            if !period.contains(assignment.slot.date) {
                tracing::warn!(slot = %assignment.slot, %period, "assignment outside period skipped");
                continue;
            }
            self.by_slot.insert(assignment.slot, assignment);
            installed += 1;
        }
        tracing::debug!(%period, installed, "period replaced");
        installed
    }

    /// Nombre total de couples (créneau, membre).
    pub fn memberships(&self) -> usize {
        self.by_slot.values().map(|a| a.worker_ids.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.by_slot.values()
    }

    pub fn len(&self) -> usize {
        self.by_slot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_slot.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Assignment> {
        self.by_slot.values().cloned().collect()
    }

    pub(crate) fn entry_mut(&mut self, slot: &Slot) -> Option<&mut Assignment> {
        self.by_slot.get_mut(slot)
    }

    pub(crate) fn insert(&mut self, assignment: Assignment) {
        self.by_slot.insert(assignment.slot, assignment);
    }

    pub(crate) fn retain_workers<F>(&mut self, mut keep: F) -> Vec<(Slot, WorkerId)>
    where
        F: FnMut(&WorkerId) -> bool,
    {
        let mut removed = Vec::new();
        for (slot, assignment) in self.by_slot.iter_mut() {
            assignment.worker_ids.retain(|id| {
                let k = keep(id);
                if !k {
                    removed.push((*slot, id.clone()));
                }
                k
            });
        }
        self.by_slot.retain(|_, a| !a.worker_ids.is_empty());
        removed
    }
}

fn dedupe(worker_ids: Vec<WorkerId>) -> Vec<WorkerId> {
    let mut out: Vec<WorkerId> = Vec::with_capacity(worker_ids.len());
    for id in worker_ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}
