// Drives FocusTracker through whole sessions with simulated time and checks what ends up
// on disk. No window is opened.

use std::fs;
use std::time::{Duration, Instant};

use focus_mode::period::Period;
use focus_mode::stopwatch::TimerState;
use focus_mode::storage::{DocumentStore, FOCUS_HOURS, FocusHours, GOALS};
use focus_mode::tracker::FocusTracker;
use serde_json::json;
use tempfile::tempdir;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn run_session(tracker: &mut FocusTracker, start: Instant, seconds: u64) {
    assert!(tracker.start(start));
    for s in 1..=seconds {
        tracker.tick(start + Duration::from_secs(s));
    }
}

#[test]
fn session_of_125_seconds_is_recorded_and_accrued() {
    let dir = tempdir().unwrap();
    let store = DocumentStore::new(dir.path().to_path_buf()).unwrap();
    let mut tracker = FocusTracker::load(store.clone()).unwrap();

    let t0 = Instant::now();
    run_session(&mut tracker, t0, 125);
    let record = tracker.stop().unwrap().expect("running stopwatch should record");

    assert_eq!(tracker.display(), "00:02:05");
    assert_eq!(record.formatted, "00:02:05");
    assert_eq!(tracker.highscores(), ["00:02:05"]);
    assert_eq!(store.load_highscores().unwrap(), vec!["00:02:05".to_string()]);

    let expected = 125.0 / 3600.0;
    for period in Period::ALL {
        assert!(close(tracker.focus_hours().get(period), expected));
    }
    let on_disk = store.load_focus_hours().unwrap();
    assert!(close(on_disk.week, expected));
    assert!(close(on_disk.month, expected));
    assert!(close(on_disk.year, expected));
}

#[test]
fn start_while_running_does_not_disturb_the_session() {
    let dir = tempdir().unwrap();
    let store = DocumentStore::new(dir.path().to_path_buf()).unwrap();
    let mut tracker = FocusTracker::load(store).unwrap();

    let t0 = Instant::now();
    tracker.start(t0);
    tracker.tick(t0 + Duration::from_millis(2500));
    assert!(!tracker.start(t0 + Duration::from_millis(2600)));
    tracker.tick(t0 + Duration::from_secs(3));
    assert_eq!(tracker.stop().unwrap().map(|r| r.elapsed_seconds), Some(3));
}

#[test]
fn accrual_builds_on_existing_totals() {
    let dir = tempdir().unwrap();
    let store = DocumentStore::new(dir.path().to_path_buf()).unwrap();
    store
        .save_focus_hours(&FocusHours { week: 1.0, month: 10.0, year: 100.0 })
        .unwrap();
    store.save_highscores(&["01:00:00".to_string()]).unwrap();

    let mut tracker = FocusTracker::load(store.clone()).unwrap();
    run_session(&mut tracker, Instant::now(), 1800);
    tracker.stop().unwrap();

    assert_eq!(tracker.highscores(), ["01:00:00", "00:30:00"]);
    let hours = store.load_focus_hours().unwrap();
    assert!(close(hours.week, 1.5));
    assert!(close(hours.month, 10.5));
    assert!(close(hours.year, 100.5));
    assert!(close(tracker.progress(Period::Year).value, 100.5));
}

#[test]
fn stopping_twice_records_once() {
    let dir = tempdir().unwrap();
    let store = DocumentStore::new(dir.path().to_path_buf()).unwrap();
    let mut tracker = FocusTracker::load(store).unwrap();

    run_session(&mut tracker, Instant::now(), 7);
    assert!(tracker.stop().unwrap().is_some());
    assert!(tracker.stop().unwrap().is_none());
    assert_eq!(tracker.highscores().len(), 1);
    assert_eq!(tracker.state(), TimerState::Idle);
}

#[test]
fn resuming_after_stop_records_cumulative_time() {
    let dir = tempdir().unwrap();
    let store = DocumentStore::new(dir.path().to_path_buf()).unwrap();
    let mut tracker = FocusTracker::load(store).unwrap();

    let t0 = Instant::now();
    run_session(&mut tracker, t0, 60);
    tracker.stop().unwrap();
    run_session(&mut tracker, t0 + Duration::from_secs(120), 30);
    tracker.stop().unwrap();

    assert_eq!(tracker.highscores(), ["00:01:00", "00:01:30"]);
    assert!(close(tracker.focus_hours().week, 150.0 / 3600.0));
}

#[test]
fn saving_goals_leaves_progress_maximums_alone() {
    let dir = tempdir().unwrap();
    let store = DocumentStore::new(dir.path().to_path_buf()).unwrap();
    let mut tracker = FocusTracker::load(store.clone()).unwrap();

    tracker.set_goal_input(Period::Week, 5);
    tracker.set_goal_input(Period::Month, 20);
    tracker.set_goal_input(Period::Year, 100);
    tracker.save_goals().unwrap();

    let raw = fs::read_to_string(store.path_of(GOALS)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value, json!({"week": 5, "month": 20, "year": 100}));

    for period in Period::ALL {
        assert_eq!(tracker.progress(period).maximum, 0.0);
    }
}

#[test]
fn goals_are_not_read_back_on_load() {
    let dir = tempdir().unwrap();
    let store = DocumentStore::new(dir.path().to_path_buf()).unwrap();
    fs::write(store.path_of(GOALS), r#"{"week": 8, "month": 30, "year": 365}"#).unwrap();

    let tracker = FocusTracker::load(store).unwrap();
    for period in Period::ALL {
        assert_eq!(tracker.goal_input(period), 0);
        assert_eq!(tracker.progress(period).maximum, 0.0);
    }
}

#[test]
fn malformed_focus_hours_fails_load() {
    let dir = tempdir().unwrap();
    let store = DocumentStore::new(dir.path().to_path_buf()).unwrap();
    fs::write(store.path_of(FOCUS_HOURS), "{\"week\": ").unwrap();
    assert!(FocusTracker::load(store).is_err());
}
