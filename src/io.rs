use crate::model::{Roster, Worker, WorkerId};
use crate::period::Period;
use crate::store::AssignmentStore;
use crate::workspace::ScheduleState;
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import de membres depuis CSV: header `display_name,work_id[,id]`
pub fn import_workers_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Worker>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let display = rec.get(0).context("missing display_name")?.trim();
        let work_id = rec.get(1).unwrap_or("").trim();
        if display.is_empty() {
            bail!("invalid worker row (empty display_name)");
        }
        let worker = match rec.get(2).map(str::trim).filter(|s| !s.is_empty()) {
            Some(id) => Worker::with_id(WorkerId::new(id), display, work_id),
            None => Worker::new(display, work_id),
        };
        out.push(worker);
    }
    Ok(out)
}

/// Export CSV d'une période: header `date,shift,worker_ids,worker_names`.
/// Les créneaux libres apparaissent avec des colonnes vides.
pub fn export_period_csv<P: AsRef<Path>>(
    path: P,
    period: &Period,
    store: &AssignmentStore,
    roster: &Roster,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["date", "shift", "worker_ids", "worker_names"])?;
    for (slot, assignment) in store.list_for_period(period) {
        let (ids, names) = match assignment {
            Some(a) => (
                a.worker_ids.iter().map(WorkerId::as_str).collect::<Vec<_>>().join(";"),
                a.worker_ids
                    .iter()
                    .map(|id| roster.display_name_of(id))
                    .collect::<Vec<_>>()
                    .join(";"),
            ),
            None => (String::new(), String::new()),
        };
        let date = slot.date.to_string();
        w.write_record([date.as_str(), slot.shift_type.as_str(), ids.as_str(), names.as_str()])?;
    }
    w.flush()?;
    Ok(())
}

/// Export JSON de l'état (jolie mise en forme)
pub fn export_state_json<P: AsRef<Path>>(path: P, state: &ScheduleState) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(state)?;
    fs::write(path, s)?;
    Ok(())
}
