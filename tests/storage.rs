#![forbid(unsafe_code)]
use chrono::NaiveDate;
use roulement::{
    io, EngineOptions, JsonStorage, MemoryStorage, Period, ScheduleState, ShiftType, Slot,
    Storage, WeekStart, Worker, WorkerId, Workspace, SCHEMA_VERSION,
};
use tempfile::tempdir;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn sample() -> Workspace {
    let mut ws = Workspace::new(EngineOptions {
        week_start: WeekStart::Monday,
        dedupe_worker_ids: true,
    });
    ws.roster_mut()
        .add(Worker::with_id(WorkerId::new("a"), "Alice", "001"))
        .unwrap();
    ws.set_workers(Slot::new(d(2024, 5, 1), ShiftType::Early), vec![WorkerId::new("a")]);
    ws.capture_template("std", &Period::week(d(2024, 4, 29))).unwrap();
    ws
}

#[test]
fn json_storage_roundtrip() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("planning.json")).unwrap();
    let ws = sample();

    storage.save(&ws.snapshot()).unwrap();
    let loaded = Workspace::from_state(storage.load().unwrap());

    assert_eq!(loaded.snapshot(), ws.snapshot());
    assert_eq!(loaded.engine().options().week_start, WeekStart::Monday);
}

#[test]
fn persisted_document_uses_camel_case_fields() {
    let storage = MemoryStorage::new();
    storage.save(&sample().snapshot()).unwrap();
    let raw: serde_json::Value = serde_json::from_str(&storage.raw().unwrap()).unwrap();

    assert_eq!(raw["schemaVersion"], SCHEMA_VERSION);
    assert_eq!(raw["workers"][0]["displayName"], "Alice");
    assert_eq!(raw["workers"][0]["workId"], "001");
    assert_eq!(raw["assignments"][0]["slot"]["date"], "2024-05-01");
    assert_eq!(raw["assignments"][0]["slot"]["shiftType"], "early");
    assert_eq!(raw["assignments"][0]["workerIds"][0], "a");
    // mercredi, compté depuis le dimanche
    assert_eq!(raw["templates"]["std"]["assignments"][0]["offset"], 3);
}

#[test]
fn missing_file_loads_empty_state() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("absent.json")).unwrap();
    let state = storage.load_or_default().unwrap();
    assert_eq!(state, ScheduleState::default());
    assert!(storage.load().is_err());
}

#[test]
fn newer_schema_is_rejected() {
    let storage = MemoryStorage::new();
    let state = ScheduleState {
        schema_version: SCHEMA_VERSION + 1,
        ..ScheduleState::default()
    };
    storage.save(&state).unwrap();
    let err = storage.load().unwrap_err();
    assert!(err.to_string().contains("unsupported schema version"));
}

#[test]
fn document_without_version_defaults_to_current() {
    let state: ScheduleState = serde_json::from_str(r#"{"workers": []}"#).unwrap();
    assert_eq!(state.schema_version, SCHEMA_VERSION);
    assert!(state.assignments.is_empty());
}

#[test]
fn removing_worker_keeps_assignments_until_pruned() {
    let mut ws = sample();
    let slot = Slot::new(d(2024, 5, 1), ShiftType::Early);
    ws.roster_mut().remove(&WorkerId::new("a")).unwrap();
    assert!(ws.store().get(&slot).is_some());

    let report = ws.prune_orphans();
    assert_eq!(report.removed, vec![(slot, WorkerId::new("a"))]);
    assert!(ws.store().get(&slot).is_none());
}

#[test]
fn csv_import_and_export() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("workers.csv");
    std::fs::write(&input, "display_name,work_id,id\nAlice,001,a\nBruno,002,\n").unwrap();

    let workers = io::import_workers_csv(&input).unwrap();
    assert_eq!(workers.len(), 2);
    assert_eq!(workers[0].id, WorkerId::new("a"));
    assert_eq!(workers[1].display_name, "Bruno");
    assert!(!workers[1].id.as_str().is_empty());

    let ws = sample();
    let out = dir.path().join("week.csv");
    let week = Period::week(d(2024, 4, 29));
    io::export_period_csv(&out, &week, ws.store(), ws.roster()).unwrap();
    let text = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1 + 21);
    assert_eq!(lines[0], "date,shift,worker_ids,worker_names");
    assert_eq!(lines[7], "2024-05-01,early,a,Alice");
    assert_eq!(lines[1], "2024-04-29,early,,");
}
