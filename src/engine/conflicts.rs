use super::Conflict;
use crate::model::{Assignment, ShiftType, WorkerId};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Détecte les membres présents dans plusieurs affectations le même jour.
/// Une entrée par (date, membre), dans l'ordre d'énumération des créneaux ;
/// `shift_types` reprend le poste de chaque affectation concernée, donc deux
/// enregistrements du même créneau y figurent deux fois. Un membre répété
/// dans une seule affectation n'est pas un conflit.
pub fn detect_conflicts<'a, I>(assignments: I) -> Vec<Conflict>
where
    I: IntoIterator<Item = &'a Assignment>,
{
    let mut sorted: Vec<&Assignment> = assignments.into_iter().collect();
    sorted.sort_by_key(|a| a.slot);

    let mut by_day: BTreeMap<NaiveDate, Vec<(WorkerId, Vec<ShiftType>)>> = BTreeMap::new();
    for assignment in sorted {
        let day = by_day.entry(assignment.slot.date).or_default();
        for (i, worker) in assignment.worker_ids.iter().enumerate() {
            if assignment.worker_ids[..i].contains(worker) {
                continue;
            }
            match day.iter_mut().find(|(w, _)| w == worker) {
                Some((_, shifts)) => shifts.push(assignment.slot.shift_type),
                None => day.push((worker.clone(), vec![assignment.slot.shift_type])),
            }
        }
    }

    by_day
        .into_iter()
        .flat_map(|(date, workers)| {
            workers
                .into_iter()
                .filter(|(_, shifts)| shifts.len() > 1)
                .map(move |(worker, shift_types)| Conflict {
                    worker,
                    date,
                    shift_types,
                })
        })
        .collect()
}
