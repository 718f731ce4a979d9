use crate::model::{Assignment, Roster, WorkerId};
use std::collections::HashMap;

/// Charge d'un membre : nombre de créneaux qu'il occupe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadRow {
    pub worker: WorkerId,
    pub slots: usize,
    pub in_roster: bool,
}

/// Compte les créneaux par membre. Un membre listé deux fois dans le même
/// créneau ne compte qu'une fois.
pub fn compute_load<'a, I>(assignments: I) -> HashMap<WorkerId, usize>
where
    I: IntoIterator<Item = &'a Assignment>,
{
    let mut load: HashMap<WorkerId, usize> = HashMap::new();
    for assignment in assignments {
        for (idx, id) in assignment.worker_ids.iter().enumerate() {
            if assignment.worker_ids[..idx].contains(id) {
                continue;
            }
            *load.entry(id.clone()).or_default() += 1;
        }
    }
    load
}

/// Une ligne par membre du roster (ordre du roster), puis les identifiants
/// orphelins triés.
pub fn workload<'a, I>(assignments: I, roster: &Roster) -> Vec<WorkloadRow>
where
    I: IntoIterator<Item = &'a Assignment>,
{
    let mut load = compute_load(assignments);
    let mut rows: Vec<WorkloadRow> = roster
        .iter()
        .map(|w| WorkloadRow {
            worker: w.id.clone(),
            slots: load.remove(&w.id).unwrap_or(0),
            in_roster: true,
        })
        .collect();

    let mut orphans: Vec<(WorkerId, usize)> = load.into_iter().collect();
    orphans.sort();
    rows.extend(orphans.into_iter().map(|(worker, slots)| WorkloadRow {
        worker,
        slots,
        in_roster: false,
    }));
    rows
}
