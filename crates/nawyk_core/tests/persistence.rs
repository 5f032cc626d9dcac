use std::fs;

use nawyk_core::habit::Habit;
use nawyk_core::store::HabitStore;
use nawyk_core::HabitTracker;
use tempfile::tempdir;

#[test]
fn tracker_add_toggle_delete_round_trip() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("habits.json");

    let mut tracker = HabitTracker::open(&path);
    assert!(tracker.is_empty());

    assert!(tracker
        .add_habit("Read", "2024-01-10")
        .expect("add habit"));
    assert!(tracker
        .add_habit("  Run  ", "2024-01-10")
        .expect("add habit"));
    assert_eq!(tracker.habits()[1].name, "Run", "names are trimmed");

    // Empty and whitespace-only names are rejected without error.
    assert!(!tracker.add_habit("   ", "2024-01-10").expect("add habit"));
    assert_eq!(tracker.len(), 2);

    tracker.toggle_done(0, "2024-01-10").expect("toggle");
    assert!(tracker.habits()[0].is_done("2024-01-10"));

    // Mutations persist immediately: a fresh tracker sees the same state.
    let reloaded = HabitTracker::open(&path);
    assert_eq!(reloaded.habits(), tracker.habits());

    tracker.remove_habit(0).expect("remove");
    assert_eq!(tracker.len(), 1);
    assert_eq!(tracker.habits()[0].name, "Run");

    assert!(tracker.toggle_done(5, "2024-01-10").is_err());
    assert!(tracker.remove_habit(5).is_err());
}

#[test]
fn legacy_records_backfill_created_at_on_load() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("habits.json");
    fs::write(
        &path,
        r#"[
            {"name":"Read","doneDates":{"2024-01-03":true,"2024-01-01":true}},
            {"name":"Stretch","doneDates":{}}
        ]"#,
    )
    .expect("write fixture");

    let store = HabitStore::new(&path);
    let outcome = store.load("2024-02-01");
    assert!(outcome.migrated);
    assert_eq!(outcome.habits.len(), 2);
    assert_eq!(
        outcome.habits[0].created_at, "2024-01-01",
        "earliest done day becomes the creation date"
    );
    assert_eq!(
        outcome.habits[1].created_at, "2024-02-01",
        "records with no done days fall back to today"
    );

    // The migration lives in memory until the next save.
    let raw = fs::read_to_string(&path).expect("read store");
    assert!(!raw.contains("createdAt"));

    store.save(&outcome.habits).expect("save");
    let raw = fs::read_to_string(&path).expect("read store");
    assert!(raw.contains("createdAt"));

    let reloaded = store.load("2024-02-02");
    assert!(!reloaded.migrated);
    assert_eq!(reloaded.habits, outcome.habits);
}

#[test]
fn unreadable_store_is_discarded_and_cleared() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("habits.json");
    fs::write(&path, "{not json").expect("write fixture");

    let store = HabitStore::new(&path);
    let outcome = store.load("2024-02-01");
    assert!(outcome.habits.is_empty());
    assert!(!outcome.migrated);
    assert!(!path.exists(), "invalid entry is cleared");
}

#[test]
fn save_and_load_preserve_collection_order() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("nested").join("habits.json");

    let mut first = Habit::new("Read", "2024-01-01");
    first.toggle("2024-01-02");
    let second = Habit::new("Run", "2024-01-05");
    let habits = vec![first, second];

    let store = HabitStore::new(&path);
    store.save(&habits).expect("save creates parent dirs");

    let outcome = store.load("2024-01-10");
    assert_eq!(outcome.habits, habits);
    let names: Vec<&str> = outcome
        .habits
        .iter()
        .map(|habit| habit.name.as_str())
        .collect();
    assert_eq!(names, vec!["Read", "Run"]);
}

#[test]
fn false_flags_in_done_dates_are_not_done() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("habits.json");
    fs::write(
        &path,
        r#"[{"name":"Read","createdAt":"2024-01-01","doneDates":{"2024-01-02":true,"2024-01-03":false}}]"#,
    )
    .expect("write fixture");

    let outcome = HabitStore::new(&path).load("2024-01-10");
    assert!(outcome.habits[0].is_done("2024-01-02"));
    assert!(!outcome.habits[0].is_done("2024-01-03"));
}
