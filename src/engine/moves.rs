use super::EngineError;
use crate::model::{Assignment, Slot};
use crate::store::AssignmentStore;

/// Déplace le membre `source[source_index]` vers `dest` à `dest_index`
/// (inséré, borné à la longueur de la liste). Échec sans effet si la
/// source ne référence aucun membre.
pub(super) fn move_worker(
    store: &mut AssignmentStore,
    source: Slot,
    source_index: usize,
    dest: Slot,
    dest_index: usize,
) -> Result<(), EngineError> {
    let invalid = EngineError::InvalidMove {
        slot: source,
        index: source_index,
    };
    let Some(src) = store.get(&source) else {
        return Err(invalid);
    };
    if source_index >= src.worker_ids.len() {
        return Err(invalid);
    }

    if source == dest {
        let Some(entry) = store.entry_mut(&source) else {
            return Err(invalid);
        };
        let worker = entry.worker_ids.remove(source_index);
        let at = dest_index.min(entry.worker_ids.len());
        entry.worker_ids.insert(at, worker);
        tracing::debug!(slot = %source, from = source_index, to = at, "worker reordered");
        return Ok(());
    }

    // les deux créneaux sont calculés avant toute écriture
    let mut src_ids = src.worker_ids.clone();
    let worker = src_ids.remove(source_index);

    let dest_entry = match store.get(&dest) {
        Some(existing) => {
            let mut ids = existing.worker_ids.clone();
            let at = dest_index.min(ids.len());
            ids.insert(at, worker.clone());
            Assignment {
                id: existing.id.clone(),
                slot: dest,
                worker_ids: ids,
            }
        }
        None => Assignment::new(dest, vec![worker.clone()]),
    };

    if src_ids.is_empty() {
        store.remove(&source);
    } else if let Some(entry) = store.entry_mut(&source) {
        entry.worker_ids = src_ids;
    }
    store.insert(dest_entry);

    tracing::debug!(%worker, from = %source, to = %dest, "worker moved");
    Ok(())
}
