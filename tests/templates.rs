#![forbid(unsafe_code)]
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use shiftboard::{
    accounts, admin, io, load_pattern_from_file,
    model::{Board, ScheduleId},
    pattern::export_pattern_json,
    storage::{JsonStorage, Storage},
    AutoScheduler, PatternSlot, ShiftFilter, WeeklyPattern,
};
use std::fs;
use tempfile::tempdir;

#[test]
fn expand_weekend_pattern() {
    let pattern = weekend_pattern();
    let start = NaiveDate::from_ymd_opt(2025, 10, 24).unwrap(); // vendredi
    let end = NaiveDate::from_ymd_opt(2025, 10, 28).unwrap(); // mardi

    let shifts = pattern.expand(&ScheduleId::new("wk"), start, end).unwrap();
    // samedi + dimanche, deux slots chacun
    assert_eq!(shifts.len(), 4);
    assert!(shifts.iter().all(|s| s.is_template()));

    // 18:00 -> 09:00 bascule au lendemain
    let first = shifts
        .iter()
        .find(|s| s.start == Utc.with_ymd_and_hms(2025, 10, 25, 18, 0, 0).unwrap())
        .unwrap();
    assert_eq!(first.end, Utc.with_ymd_and_hms(2025, 10, 26, 9, 0, 0).unwrap());

    for window in shifts.windows(2) {
        if let [a, b] = window {
            assert!(a.start <= b.start);
        }
    }
}

#[test]
fn invalid_patterns_are_rejected() {
    let mut pattern = weekend_pattern();
    pattern.slots[0].days = vec![8];
    assert!(pattern.validate().is_err());

    let mut pattern = weekend_pattern();
    pattern.slots.clear();
    assert!(pattern
        .expand(
            &ScheduleId::new("wk"),
            NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 10, 2).unwrap()
        )
        .is_err());

    let pattern = weekend_pattern();
    assert!(pattern
        .expand(
            &ScheduleId::new("wk"),
            NaiveDate::from_ymd_opt(2025, 10, 2).unwrap(),
            NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
        )
        .is_err());
}

#[test]
fn pattern_file_roundtrip_then_seed_and_assign() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("weekend.json");
    export_pattern_json(&path, &weekend_pattern()).unwrap();
    let pattern = load_pattern_from_file(&path).unwrap();
    assert_eq!(pattern.slots.len(), 2);

    let mut board = Board::default();
    let bob = accounts::create_user(&mut board, "bob", "admin").unwrap();
    accounts::create_user(&mut board, "jane", "staff").unwrap();
    accounts::create_user(&mut board, "alice", "staff").unwrap();
    let schedule = admin::create_schedule(
        &mut board,
        &bob,
        "Week-end",
        Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap(),
    )
    .unwrap();

    let seeded = admin::seed_from_pattern(
        &mut board,
        &bob,
        &schedule,
        &pattern,
        NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 10, 14).unwrap(),
    )
    .unwrap();
    assert_eq!(seeded, 8);

    let views = AutoScheduler::new(&mut board).run(&schedule, "balanced").unwrap();
    assert_eq!(views.len(), 8);
    let jane = views.iter().filter(|v| v.staff_name.as_deref() == Some("jane")).count();
    assert_eq!(jane, 4);
}

#[test]
fn storage_roundtrip_and_missing_file() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("board.json")).unwrap();
    assert!(storage.load().is_err());
    assert!(storage.load_or_default().unwrap().accounts.is_empty());

    let mut board = Board::default();
    let bob = accounts::create_user(&mut board, "bob", "admin").unwrap();
    let schedule = admin::create_schedule(
        &mut board,
        &bob,
        "S",
        Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap(),
    )
    .unwrap();
    admin::add_template(
        &mut board,
        &bob,
        &schedule,
        Utc.with_ymd_and_hms(2025, 10, 2, 8, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2025, 10, 2, 16, 0, 0).unwrap(),
    )
    .unwrap();
    storage.save(&board).unwrap();

    let loaded = storage.load().unwrap();
    assert_eq!(loaded.accounts, board.accounts);
    assert_eq!(loaded.schedules, board.schedules);
    assert_eq!(loaded.shifts, board.shifts);
}

#[test]
fn corrupt_board_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("board.json");
    fs::write(&path, "{ not json").unwrap();
    let storage = JsonStorage::open(&path).unwrap();
    assert!(storage.load_or_default().is_err());
}

#[test]
fn csv_imports() {
    let dir = tempdir().unwrap();
    let people = dir.path().join("people.csv");
    fs::write(&people, "username,role\njane,staff\nbob,Admin\nalice,\n").unwrap();
    let accounts = io::import_accounts_csv(&people).unwrap();
    assert_eq!(accounts.len(), 3);
    assert!(accounts[0].is_staff());
    assert!(accounts[1].is_admin());
    assert!(accounts[2].is_staff());

    let short = dir.path().join("short.csv");
    fs::write(&short, "username,role\njane,staff\nalice\n").unwrap();
    let accounts = io::import_accounts_csv(&short).unwrap();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[1].username, "alice");
    assert!(accounts[1].is_staff());

    let bad = dir.path().join("bad.csv");
    fs::write(&bad, "username,role\njane,manager\n").unwrap();
    assert!(io::import_accounts_csv(&bad).is_err());

    let templates = dir.path().join("templates.csv");
    fs::write(
        &templates,
        "start,end\n2025-10-01T08:00:00Z,2025-10-01T16:00:00Z\n2025-10-02 08:00:00,2025-10-02 16:00:00\n",
    )
    .unwrap();
    let ranges = io::import_templates_csv(&templates).unwrap();
    assert_eq!(ranges.len(), 2);
    assert_eq!(ranges[1].0, Utc.with_ymd_and_hms(2025, 10, 2, 8, 0, 0).unwrap());
    assert!(io::parse_timestamp("yesterday").is_err());
}

#[test]
fn report_csv_carries_staff_id_and_name() {
    let dir = tempdir().unwrap();
    let mut board = Board::default();
    let bob = accounts::create_user(&mut board, "bob", "admin").unwrap();
    let jane = accounts::create_user(&mut board, "jane", "staff").unwrap();
    let schedule = admin::create_schedule(
        &mut board,
        &bob,
        "S",
        Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap(),
    )
    .unwrap();
    admin::schedule_shift(
        &mut board,
        &bob,
        &jane,
        &schedule,
        Utc.with_ymd_and_hms(2025, 10, 2, 8, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2025, 10, 2, 16, 0, 0).unwrap(),
    )
    .unwrap();
    admin::add_template(
        &mut board,
        &bob,
        &schedule,
        Utc.with_ymd_and_hms(2025, 10, 3, 8, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2025, 10, 3, 16, 0, 0).unwrap(),
    )
    .unwrap();

    let report = admin::shift_report(&board, &bob, &ShiftFilter::default()).unwrap();
    let path = dir.path().join("report.csv");
    io::export_report_csv(&path, &report).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("id,staff_id,staff_name,schedule_id,start,end,clock_in,clock_out")
    );
    let assigned: Vec<&str> = lines.next().unwrap().split(',').collect();
    assert_eq!(assigned[1], jane.as_str());
    assert_eq!(assigned[2], "jane");
    let template: Vec<&str> = lines.next().unwrap().split(',').collect();
    assert_eq!(template[1], "");
    assert_eq!(template[2], "");
}

fn weekend_pattern() -> WeeklyPattern {
    WeeklyPattern {
        name: "Week-end 2 personnes".into(),
        description: Some("Astreinte week-end".into()),
        slots: vec![
            PatternSlot {
                label: "oncall".into(),
                start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                days: vec![6, 7],
            },
            PatternSlot {
                label: "backup".into(),
                start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                days: vec![6, 7],
            },
        ],
    }
}
