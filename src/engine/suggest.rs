use super::load;
use crate::model::{Assignment, AssignmentId, Roster, WorkerId};
use crate::period::Period;
use std::collections::HashMap;

/// Équilibrage glouton : chaque créneau libre de la période reçoit le membre
/// le moins chargé à cet instant (départage par ordre du roster).
pub(super) fn suggest<'a, I>(period: &Period, current: I, roster: &Roster) -> Vec<Assignment>
where
    I: IntoIterator<Item = &'a Assignment>,
{
    let current: Vec<&Assignment> = current.into_iter().collect();
    if roster.is_empty() {
        return Vec::new();
    }

    let mut load: HashMap<WorkerId, usize> = load::compute_load(current.iter().copied());
    let occupied: HashMap<_, &Assignment> = current.iter().map(|a| (a.slot, *a)).collect();
    let mut suggestions = Vec::new();

    for slot in period.slots() {
        if occupied.get(&slot).is_some_and(|a| !a.worker_ids.is_empty()) {
            continue;
        }

        // min_by_key garde le premier minimum rencontré
        let chosen = roster
            .iter()
            .min_by_key(|w| load.get(&w.id).copied().unwrap_or(0));

        let Some(worker) = chosen else {
            continue;
        };

        *load.entry(worker.id.clone()).or_default() += 1;
        tracing::debug!(%slot, worker = %worker.id, "slot suggested");
        suggestions.push(Assignment {
            id: AssignmentId::for_slot(&slot),
            slot,
            worker_ids: vec![worker.id.clone()],
        });
    }

    suggestions
}
