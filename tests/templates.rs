#![forbid(unsafe_code)]
use chrono::NaiveDate;
use roulement::{
    EngineOptions, Period, ShiftType, Slot, TemplateError, TemplateManager, Worker, WorkerId,
    Workspace,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn wid(s: &str) -> WorkerId {
    WorkerId::new(s)
}

fn sample_workspace() -> Workspace {
    let mut ws = Workspace::new(EngineOptions::default());
    for (id, name) in [("a", "Alice"), ("b", "Bruno")] {
        ws.roster_mut()
            .add(Worker::with_id(wid(id), name, format!("W-{id}")))
            .unwrap();
    }
    // semaine du dimanche 2024-04-28
    ws.set_workers(Slot::new(d(2024, 4, 28), ShiftType::Early), vec![wid("a")]);
    ws.set_workers(Slot::new(d(2024, 5, 1), ShiftType::Mid), vec![wid("b"), wid("a")]);
    ws.set_workers(Slot::new(d(2024, 5, 4), ShiftType::Late), vec![wid("b")]);
    ws
}

fn contents(ws: &Workspace, week: &Period) -> Vec<(Slot, Vec<WorkerId>)> {
    ws.store()
        .assignments_in(week)
        .map(|a| (a.slot, a.worker_ids.clone()))
        .collect()
}

#[test]
fn capture_rewrites_dates_as_offsets() {
    let ws = sample_workspace();
    let week = Period::week(d(2024, 4, 28));
    let mut templates = TemplateManager::new();

    let template = templates
        .capture("standard", week.first_day(), ws.store().assignments_in(&week))
        .unwrap();
    let offsets: Vec<(u8, ShiftType)> = template
        .assignments
        .iter()
        .map(|e| (e.offset, e.shift_type))
        .collect();
    assert_eq!(
        offsets,
        vec![(0, ShiftType::Early), (3, ShiftType::Mid), (6, ShiftType::Late)]
    );
}

#[test]
fn capture_then_apply_same_week_round_trips() {
    let mut ws = sample_workspace();
    let week = Period::week(d(2024, 4, 28));
    let before = contents(&ws, &week);

    let ids_before: Vec<_> = ws.store().assignments_in(&week).map(|a| a.id.clone()).collect();

    ws.capture_template("standard", &week).unwrap();
    assert_eq!(ws.apply_template("standard", &week), Some(3));
    assert_eq!(contents(&ws, &week), before);

    // mêmes créneaux et mêmes listes, mais de nouvelles affectations
    let ids_after: Vec<_> = ws.store().assignments_in(&week).map(|a| a.id.clone()).collect();
    assert!(ids_after.iter().all(|id| !ids_before.contains(id)));
}

#[test]
fn offsets_are_weekdays_whatever_the_week_start() {
    use chrono::{Datelike, Weekday};
    use roulement::WeekStart;

    let mut ws = sample_workspace();
    let sunday_week = ws.engine().week_of(d(2024, 5, 1)).unwrap();
    ws.capture_template("standard", &sunday_week).unwrap();

    ws.set_options(EngineOptions {
        week_start: WeekStart::Monday,
        ..EngineOptions::default()
    });
    let monday_week = ws.engine().week_of(d(2024, 5, 8)).unwrap();
    assert_eq!(monday_week.first_day(), d(2024, 5, 6));
    assert_eq!(ws.apply_template("standard", &monday_week), Some(3));

    let applied: Vec<(Weekday, ShiftType)> = contents(&ws, &monday_week)
        .iter()
        .map(|(slot, _)| (slot.date.weekday(), slot.shift_type))
        .collect();
    assert_eq!(
        applied,
        vec![
            (Weekday::Wed, ShiftType::Mid),
            (Weekday::Sat, ShiftType::Late),
            (Weekday::Sun, ShiftType::Early),
        ]
    );
    // le dimanche d'une semaine lundi-dimanche est son dernier jour
    assert!(contents(&ws, &monday_week)
        .iter()
        .any(|(slot, _)| *slot == Slot::new(d(2024, 5, 12), ShiftType::Early)));

    // capture sous lundi : mêmes décalages qu'en semaine dimanche
    let recaptured = ws.capture_template("lundi", &monday_week).unwrap();
    let offsets: Vec<u8> = recaptured.assignments.iter().map(|e| e.offset).collect();
    assert_eq!(offsets, vec![3, 6, 0]);
}

#[test]
fn template_names_are_trimmed_everywhere() {
    let mut ws = sample_workspace();
    let week = Period::week(d(2024, 4, 28));
    ws.capture_template(" standard ", &week).unwrap();

    assert!(ws.templates().get("standard").is_some());
    assert!(ws.templates().get(" standard").is_some());
    assert_eq!(ws.apply_template("standard  ", &week), Some(3));
    assert!(ws.remove_template(" standard").is_some());
    assert!(ws.templates().is_empty());
}

#[test]
fn apply_replaces_target_week() {
    let mut ws = sample_workspace();
    let source = Period::week(d(2024, 4, 28));
    let target = Period::week(d(2024, 5, 5));
    ws.capture_template("standard", &source).unwrap();

    // contenu préexistant de la semaine cible, écrasé
    ws.set_workers(Slot::new(d(2024, 5, 6), ShiftType::Early), vec![wid("b")]);

    assert_eq!(ws.apply_template("standard", &target), Some(3));
    let applied = contents(&ws, &target);
    assert_eq!(
        applied,
        vec![
            (Slot::new(d(2024, 5, 5), ShiftType::Early), vec![wid("a")]),
            (Slot::new(d(2024, 5, 8), ShiftType::Mid), vec![wid("b"), wid("a")]),
            (Slot::new(d(2024, 5, 11), ShiftType::Late), vec![wid("b")]),
        ]
    );
    // la semaine source est intacte
    assert_eq!(contents(&ws, &source).len(), 3);
}

#[test]
fn unknown_template_is_absent_and_changes_nothing() {
    let mut ws = sample_workspace();
    let week = Period::week(d(2024, 4, 28));
    let before = contents(&ws, &week);

    assert_eq!(ws.apply_template("inconnu", &week), None);
    assert!(ws.templates().apply("inconnu", week.first_day()).is_none());
    assert_eq!(contents(&ws, &week), before);
}

#[test]
fn capture_upserts_by_name_and_rejects_empty_name() {
    let mut ws = sample_workspace();
    let week = Period::week(d(2024, 4, 28));
    ws.capture_template("standard", &week).unwrap();

    ws.set_workers(Slot::new(d(2024, 4, 28), ShiftType::Early), Vec::new());
    let updated = ws.capture_template("standard", &week).unwrap();
    assert_eq!(updated.assignments.len(), 2);
    assert_eq!(ws.templates().len(), 1);

    assert_eq!(
        ws.capture_template("   ", &week).unwrap_err(),
        TemplateError::EmptyName
    );
}

#[test]
fn capture_ignores_assignments_outside_the_week() {
    let ws = sample_workspace();
    let mut templates = TemplateManager::new();
    // tout le store, dont rien hors semaine ici, plus un décalage forcé
    let shifted = Period::week(d(2024, 4, 29));
    let template = templates
        .capture("decale", shifted.first_day(), ws.store().iter())
        .unwrap();
    // 2024-04-28 précède la semaine, il est ignoré
    assert_eq!(template.assignments.len(), 2);
}
