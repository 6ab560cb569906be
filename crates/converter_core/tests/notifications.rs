use std::path::PathBuf;
use std::time::{Duration, Instant};

use converter_core::{
    update_at, AppState, FileCandidate, Msg, NotificationKind, NotificationQueue,
    NOTIFICATION_LIFETIME,
};

fn bad_file() -> Msg {
    Msg::FileDropped(FileCandidate {
        name: "notes.txt".to_string(),
        mime: "text/plain".to_string(),
        byte_size: 1,
        source: PathBuf::from("notes.txt"),
    })
}

#[test]
fn pushed_notification_is_visible_until_lifetime_elapses() {
    let start = Instant::now();
    let mut queue = NotificationQueue::new();
    let id = queue.push(NotificationKind::Success, "done", start);

    let ids: Vec<_> = queue.active(start).map(|n| n.id).collect();
    assert_eq!(ids, vec![id]);
    assert_eq!(
        queue
            .active(start + NOTIFICATION_LIFETIME - Duration::from_millis(1))
            .count(),
        1
    );
    assert_eq!(
        queue
            .active(start + NOTIFICATION_LIFETIME + Duration::from_millis(1))
            .count(),
        0
    );
}

#[test]
fn notifications_expire_independently() {
    let start = Instant::now();
    let mut queue = NotificationQueue::new();
    queue.push(NotificationKind::Error, "first", start);
    queue.push(
        NotificationKind::Error,
        "second",
        start + Duration::from_secs(3),
    );

    let at = |secs: u64| -> Vec<String> {
        queue
            .active(start + Duration::from_secs(secs) + Duration::from_millis(1))
            .map(|n| n.text.clone())
            .collect()
    };
    assert_eq!(at(4), vec!["first", "second"]);
    assert_eq!(at(5), vec!["second"]);
    assert_eq!(at(8), Vec::<String>::new());
}

#[test]
fn identical_texts_are_not_deduplicated() {
    let start = Instant::now();
    let mut queue = NotificationQueue::new();
    let a = queue.push(NotificationKind::Error, "same", start);
    let b = queue.push(
        NotificationKind::Error,
        "same",
        start + Duration::from_secs(2),
    );
    assert_ne!(a, b);

    let ids: Vec<_> = queue
        .active(start + Duration::from_secs(2))
        .map(|n| n.id)
        .collect();
    assert_eq!(ids, vec![a, b]);
    let ids: Vec<_> = queue
        .active(start + Duration::from_secs(6))
        .map(|n| n.id)
        .collect();
    assert_eq!(ids, vec![b]);
}

#[test]
fn burst_of_notifications_all_expire() {
    let start = Instant::now();
    let mut queue = NotificationQueue::new();
    for i in 0..10 {
        queue.push(
            NotificationKind::Error,
            format!("n{i}"),
            start + Duration::from_millis(i),
        );
    }
    assert_eq!(queue.active(start + Duration::from_millis(9)).count(), 10);
    assert_eq!(queue.active(start + Duration::from_secs(6)).count(), 0);
    assert_eq!(queue.prune(start + Duration::from_secs(6)), 10);
    assert!(queue.is_empty());
}

#[test]
fn view_hides_expired_notifications_before_any_tick() {
    let start = Instant::now();
    let (state, _) = update_at(AppState::new(), bad_file(), start);

    assert_eq!(state.view_at(start).notifications.len(), 1);
    assert!(state
        .view_at(start + Duration::from_secs(6))
        .notifications
        .is_empty());
    assert_eq!(state.notifications().len(), 1);
}

#[test]
fn tick_prunes_and_marks_dirty_only_on_change() {
    let start = Instant::now();
    let (mut state, _) = update_at(AppState::new(), bad_file(), start);
    assert!(state.consume_dirty());

    let (mut state, _) = update_at(state, Msg::Tick, start + Duration::from_secs(1));
    assert!(!state.consume_dirty());
    assert_eq!(state.notifications().len(), 1);

    let (mut state, effects) = update_at(state, Msg::Tick, start + Duration::from_secs(6));
    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    assert!(state.notifications().is_empty());
}

#[test]
fn view_lists_notifications_in_insertion_order() {
    let start = Instant::now();
    let (state, _) = update_at(AppState::new(), bad_file(), start);
    let (state, _) = update_at(state, Msg::ConvertClicked, start + Duration::from_secs(1));

    let texts: Vec<_> = state
        .view_at(start + Duration::from_secs(1))
        .notifications
        .into_iter()
        .map(|n| n.text)
        .collect();
    assert_eq!(
        texts,
        vec!["Please upload a CSV file.", "Please select a CSV file first."]
    );
}
