mod common;

use std::sync::Arc;

use moodtunes_client::migrate::MigrationCount;
use moodtunes_client::storage::LocalStorage;
use moodtunes_types::models::Mood;

#[tokio::test]
async fn legacy_comments_move_to_the_cloud() {
    let url = common::spawn_server().await;
    let storage = Arc::new(LocalStorage::in_memory());
    storage
        .set_item("comments:sad", r#"["old string", {"id": "9", "text": "old object", "createdAt": 1}]"#)
        .unwrap();
    let app = common::app_with_storage(&url, storage.clone());
    let migration = app.migration();

    let status = migration.status().await;
    assert_eq!(status[&Mood::Sad], MigrationCount { local: 2, cloud: 0 });
    assert_eq!(status[&Mood::Dance], MigrationCount::default());

    assert_eq!(migration.migrate_mood(Mood::Sad).await.unwrap(), 2);

    let mut texts: Vec<_> = app
        .comments
        .load(Mood::Sad)
        .await
        .unwrap()
        .into_iter()
        .map(|c| {
            assert!(c.user_id.is_none());
            c.text
        })
        .collect();
    texts.sort();
    assert_eq!(texts, ["old object", "old string"]);

    // the legacy copy is left in place
    assert_eq!(migration.status().await[&Mood::Sad], MigrationCount { local: 2, cloud: 2 });
}

#[tokio::test]
async fn migrate_all_covers_every_mood() {
    let url = common::spawn_server().await;
    let storage = Arc::new(LocalStorage::in_memory());
    storage.set_item("comments:family", r#"["a"]"#).unwrap();
    storage.set_item("comments:country", r#"[]"#).unwrap();
    let app = common::app_with_storage(&url, storage);

    let migrated = app.migration().migrate_all().await;
    assert_eq!(migrated.len(), Mood::ALL.len());
    assert_eq!(migrated[&Mood::Family], 1);
    assert_eq!(migrated[&Mood::Country], 0);
    assert_eq!(app.comments.load(Mood::Family).await.unwrap().len(), 1);
}

#[tokio::test]
async fn status_is_zero_when_cloud_is_down() {
    let storage = Arc::new(LocalStorage::in_memory());
    storage.set_item("comments:sad", r#"["x"]"#).unwrap();
    let app = common::app_with_storage(&common::dead_url().await, storage);
    let migration = app.migration();

    let status = migration.status().await;
    assert!(status.values().all(|c| *c == MigrationCount::default()));

    // uploads fail one by one but the mood still counts as processed
    assert_eq!(migration.migrate_mood(Mood::Sad).await.unwrap(), 1);
}

#[tokio::test]
async fn unreadable_legacy_entries_are_skipped() {
    let url = common::spawn_server().await;
    let storage = Arc::new(LocalStorage::in_memory());
    storage
        .set_item("comments:sad", r#"["kept", {"id": "no-text"}, 42, {"text": "also kept"}]"#)
        .unwrap();
    storage.set_item("comments:dance", r#"{"text": "not a list"}"#).unwrap();
    let app = common::app_with_storage(&url, storage);
    let migration = app.migration();

    assert_eq!(migration.migrate_mood(Mood::Sad).await.unwrap(), 2);
    let mut texts: Vec<_> = app.comments.load(Mood::Sad).await.unwrap().into_iter().map(|c| c.text).collect();
    texts.sort();
    assert_eq!(texts, ["also kept", "kept"]);

    assert_eq!(migration.migrate_mood(Mood::Dance).await.unwrap(), 0);
    assert_eq!(migration.status().await[&Mood::Dance], MigrationCount::default());
}
