// ABOUTME: Tests for the notification center read/write contract used by consumer views
// Covers unread counting, head-first ordering and no-op handling of unknown ids

use campus_notify::models::{NewNotification, NotificationCategory, NotificationType};
use campus_notify::{CenterEvent, NotificationCenter};
use pretty_assertions::assert_eq;
use uuid::Uuid;

fn titles(center: &NotificationCenter) -> Vec<String> {
    center.notifications().into_iter().map(|n| n.title).collect()
}

#[tokio::test]
async fn test_unread_count_tracks_every_add() {
    // BEHAVIOR: after each add the unread count equals the unread entries
    let center = NotificationCenter::default();
    for i in 0..10 {
        let entry = NewNotification::new(format!("n{i}"), "");
        let entry = if i % 3 == 0 { entry.read() } else { entry };
        center.add(entry);

        let expected = center.notifications().iter().filter(|n| !n.is_read).count();
        assert_eq!(center.unread_count(), expected);
    }
    assert_eq!(center.unread_count(), 6);
}

#[tokio::test]
async fn test_mark_all_read_from_any_state() {
    let center = NotificationCenter::default();
    let a = center.add(NewNotification::new("A", ""));
    center.add(NewNotification::new("B", "").read());
    center.add(NewNotification::new("C", ""));
    center.mark_unread(a.id);

    center.mark_all_read();
    assert_eq!(center.unread_count(), 0);

    // Empty center too
    let empty = NotificationCenter::default();
    empty.mark_all_read();
    assert_eq!(empty.unread_count(), 0);
}

#[tokio::test]
async fn test_remove_leaves_others_untouched() {
    let center = NotificationCenter::default();
    let a = center.add(NewNotification::new("A", "alpha"));
    let b = center.add(NewNotification::new("B", "beta"));
    let c = center.add(NewNotification::new("C", "gamma"));

    let removed = center.remove(b.id).expect("B should be removed");
    assert_eq!(removed.title, "B");
    assert!(center.notification(b.id).is_none());
    assert_eq!(center.notifications(), vec![c, a]);

    assert!(center.remove(b.id).is_none());
    assert_eq!(titles(&center), vec!["C", "A"]);
}

#[tokio::test]
async fn test_scenario_read_first_of_two() {
    let center = NotificationCenter::default();
    let a = center.add(NewNotification::new("A", ""));
    center.add(NewNotification::new("B", ""));

    center.mark_read(a.id);

    assert_eq!(center.unread_count(), 1);
    assert_eq!(titles(&center), vec!["B", "A"]);
}

#[tokio::test]
async fn test_unknown_ids_are_noops() {
    let center = NotificationCenter::default();
    center.add(NewNotification::new("A", ""));
    let mut events = center.subscribe();

    assert!(!center.mark_read(Uuid::new_v4()));
    assert!(!center.mark_unread(Uuid::new_v4()));
    assert!(center.remove(Uuid::new_v4()).is_none());
    assert!(!center.dismiss(Uuid::new_v4()));

    assert_eq!(center.unread_count(), 1);
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_timestamps_kept_per_entry() {
    let center = NotificationCenter::default();
    let first = center.add(NewNotification::new("first", ""));
    let second = center.add(NewNotification::new("second", ""));

    center.mark_read(first.id);
    let stored = center.notification(first.id).unwrap();
    assert_eq!(stored.timestamp, first.timestamp);
    assert!(second.timestamp >= first.timestamp);
}

#[tokio::test]
async fn test_clear_and_category_badges() {
    let center = NotificationCenter::default();
    center.add(
        NewNotification::new("Essay due", "")
            .with_type(NotificationType::Warning)
            .with_category(NotificationCategory::Reminder),
    );
    center.add(NewNotification::new("Quiz graded", "").with_category(NotificationCategory::Grade));

    let badges: Vec<usize> = NotificationCategory::ALL
        .iter()
        .map(|c| center.with_store(|s| s.unread_count_for(*c)))
        .collect();
    assert_eq!(badges, vec![0, 1, 0, 0, 1]);

    let mut events = center.subscribe();
    center.clear();
    assert!(center.notifications().is_empty());
    assert_eq!(events.recv().await.unwrap(), CenterEvent::Cleared);
}
