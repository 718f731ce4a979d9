//! Passe de réconciliation optionnelle entre le roster et les affectations.
//!
//! Supprimer un membre du roster ne touche pas aux affectations ; cette
//! passe retire explicitement les identifiants devenus orphelins.

use crate::model::{Roster, Slot, WorkerId};
use crate::store::AssignmentStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrphanReport {
    pub removed: Vec<(Slot, WorkerId)>,
}

impl OrphanReport {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }
}

/// Retire les orphelins ; les affectations vidées disparaissent.
pub fn prune_orphans(store: &mut AssignmentStore, roster: &Roster) -> OrphanReport {
    let removed = store.retain_workers(|id| roster.contains(id));
    if !removed.is_empty() {
        tracing::info!(count = removed.len(), "orphaned worker ids pruned");
    }
    OrphanReport { removed }
}
