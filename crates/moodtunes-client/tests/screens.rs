mod common;

use std::sync::Arc;

use moodtunes_client::auth::Session;
use moodtunes_client::screens::{Alert, LoadState, RECENT_COMMENTS};
use moodtunes_client::storage::LocalStorage;
use moodtunes_types::models::Mood;

// -- CommentBoard --

#[tokio::test]
async fn comment_board_crud() {
    let url = common::spawn_server().await;
    let app = common::signed_in(&url, "carol@example.com").await;
    let mut board = app.comment_board(Mood::Inspiration);

    assert_eq!(board.load().await, None);
    assert_eq!(board.state, LoadState::Loaded);
    assert!(board.comments.is_empty());

    board.open_create();
    board.set_draft_text("  keep going  ");
    assert_eq!(board.save_draft().await, None);
    assert!(board.draft.is_none());
    assert_eq!(board.comments[0].text, "keep going");
    assert_eq!(board.comments[0].user_email.as_deref(), Some("carol@example.com"));

    board.open_create();
    board.set_draft_text("second");
    board.save_draft().await;
    assert_eq!(board.comments[0].text, "second");

    let id = board.comments[1].id.clone();
    assert!(board.open_edit(&id));
    assert_eq!(board.draft.as_ref().unwrap().text, "keep going");
    board.set_draft_text("keep going!");
    assert_eq!(board.save_draft().await, None);
    let edited = board.comments.iter().find(|c| c.id == id).unwrap();
    assert_eq!(edited.text, "keep going!");
    assert!(edited.updated_at.is_some());

    // the board state matches what a fresh load returns
    let mut fresh = app.comment_board(Mood::Inspiration);
    fresh.load().await;
    assert_eq!(fresh.comments.len(), 2);
    assert_eq!(fresh.comments.iter().find(|c| c.id == id).unwrap().text, "keep going!");

    assert_eq!(board.delete_one(&id).await, None);
    assert_eq!(board.comments.len(), 1);
    assert_eq!(board.clear_all().await, None);
    assert!(board.comments.is_empty());
    fresh.load().await;
    assert!(fresh.comments.is_empty());
}

#[tokio::test]
async fn empty_draft_closes_without_saving() {
    let url = common::spawn_server().await;
    let app = common::app(&url);
    let mut board = app.comment_board(Mood::Sad);

    board.open_create();
    board.set_draft_text("   ");
    assert_eq!(board.save_draft().await, None);
    assert!(board.draft.is_none());
    assert!(app.comments.load(Mood::Sad).await.unwrap().is_empty());

    // nothing open: nothing to do
    assert_eq!(board.save_draft().await, None);
    assert!(!board.open_edit("missing"));
}

#[tokio::test]
async fn comment_board_falls_back_to_offline_store() {
    let app = common::app(&common::dead_url().await);
    app.offline.add(Mood::Meditation, "breathe", None, None).unwrap();

    let mut board = app.comment_board(Mood::Meditation);
    assert_eq!(board.load().await, None);
    assert_eq!(board.state, LoadState::Loaded);
    assert_eq!(board.comments.len(), 1);
    assert_eq!(board.comments[0].text, "breathe");
}

#[tokio::test]
async fn stale_session_still_reads_open_boards() {
    let url = common::spawn_server().await;
    common::app(&url).comments.add(Mood::Sad, "left anonymously").await.unwrap();

    let storage = Arc::new(LocalStorage::in_memory());
    let stale = Session {
        user_id: "00000000-0000-0000-0000-000000000000".into(),
        email: "gone@example.com".into(),
        token: "expired.token.value".into(),
    };
    storage.set_json("auth:session", &stale).unwrap();
    let app = common::app_with_storage(&url, storage);

    let mut board = app.comment_board(Mood::Sad);
    assert_eq!(board.load().await, None);
    assert_eq!(board.state, LoadState::Loaded);
    assert_eq!(board.comments.len(), 1);

    board.open_create();
    board.set_draft_text("posted with an old session");
    assert_eq!(board.save_draft().await, None);
    assert_eq!(board.comments.len(), 2);

    let mut grid = app.mood_grid();
    assert_eq!(grid.recent_comments().await[&Mood::Sad].len(), 2);
}

#[tokio::test]
async fn comment_board_failures_alert() {
    let app = common::app(&common::dead_url().await);
    let mut board = app.comment_board(Mood::Sad);

    board.open_create();
    board.set_draft_text("hello");
    assert_eq!(board.save_draft().await, Some(Alert::error("Failed to save comment.")));
    assert!(board.draft.is_none());
    assert!(board.comments.is_empty());

    assert_eq!(board.delete_one("x").await, Some(Alert::error("Failed to delete comment.")));
    assert_eq!(board.clear_all().await, Some(Alert::error("Failed to clear comments.")));
}

#[tokio::test]
async fn unexpected_load_failure_alerts() {
    let url = common::spawn_server().await;
    // every route under this prefix is a plain 404
    let app = common::app(&format!("{}/missing-prefix", url));
    let mut board = app.comment_board(Mood::Sad);

    assert_eq!(board.load().await, Some(Alert::error("Failed to load comments.")));
    assert_eq!(board.state, LoadState::Error);
}

// -- SavedBoard --

#[tokio::test]
async fn anonymous_saved_board_is_local() {
    let storage = Arc::new(LocalStorage::in_memory());
    storage
        .set_item("savedItems", r#"["plain", {"id": "kept", "text": "object", "createdAt": 7}]"#)
        .unwrap();
    let app = common::app_with_storage(&common::dead_url().await, storage.clone());
    let mut board = app.saved_board();

    assert_eq!(board.load().await, None);
    assert_eq!(board.items.len(), 2);
    assert_eq!(board.items[0].id, "local-0");
    assert_eq!(board.items[0].text, "plain");
    assert_eq!(board.items[1].id, "kept");
    assert_eq!(board.items[1].created_at, 7);
    assert!(board.items.iter().all(|i| i.user_id == "anonymous"));

    board.input = "new one".into();
    assert_eq!(board.save().await, None);
    assert!(board.input.is_empty());
    assert!(board.items[2].id.starts_with("temp-"));

    assert!(board.start_edit("local-0"));
    board.input = "plain, edited".into();
    board.save().await;
    assert_eq!(board.items[0].text, "plain, edited");
    assert!(board.items[0].updated_at.is_some());

    board.delete("kept").await;
    assert_eq!(
        storage.get_item("savedItems").unwrap().as_deref(),
        Some(r#"["plain, edited","new one"]"#)
    );
}

#[tokio::test]
async fn quick_local_adds_keep_separate_ids() {
    let app = common::app(&common::dead_url().await);
    let mut board = app.saved_board();
    board.load().await;

    for text in ["one", "two"] {
        board.input = text.into();
        board.save().await;
    }
    assert_ne!(board.items[0].id, board.items[1].id);

    let first = board.items[0].id.clone();
    board.delete(&first).await;
    assert_eq!(board.items.len(), 1);
    assert_eq!(board.items[0].text, "two");
}

#[tokio::test]
async fn blank_input_is_ignored() {
    let app = common::app(&common::dead_url().await);
    let mut board = app.saved_board();
    board.load().await;

    board.input = "   ".into();
    assert_eq!(board.save().await, None);
    assert!(board.items.is_empty());
    assert_eq!(app.storage.get_item("savedItems").unwrap(), None);
}

#[tokio::test]
async fn corrupt_local_items_alert() {
    let storage = Arc::new(LocalStorage::in_memory());
    storage.set_item("savedItems", "{broken").unwrap();
    let app = common::app_with_storage(&common::dead_url().await, storage);
    let mut board = app.saved_board();

    assert_eq!(board.load().await, Some(Alert::error("Failed to load saved items")));
    assert_eq!(board.state, LoadState::Error);
}

#[tokio::test]
async fn signed_in_saved_board_syncs_with_cloud() {
    let url = common::spawn_server().await;
    let app = common::signed_in(&url, "dave@example.com").await;
    let user_id = app.session().unwrap().user_id;
    let mut board = app.saved_board();
    board.load().await;

    board.input = "Hello - Adele".into();
    board.save().await;
    let id = board.items[0].id.clone();
    assert!(!id.starts_with("temp-"));
    assert_eq!(board.items[0].user_id, user_id);

    let cloud = app.saved.load(&user_id).await.unwrap();
    assert_eq!(cloud.len(), 1);
    assert_eq!(cloud[0].id, id);

    board.start_edit(&id);
    board.input = "Hello (live)".into();
    board.save().await;
    assert_eq!(app.saved.load(&user_id).await.unwrap()[0].text, "Hello (live)");

    board.delete(&id).await;
    assert!(board.items.is_empty());
    assert!(app.saved.load(&user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn signed_in_saved_board_falls_back_when_offline() {
    let url = common::spawn_server().await;
    let online = common::signed_in(&url, "erin@example.com").await;
    let session = online.session().unwrap();

    // same stored session, but the server is gone
    let storage = Arc::new(LocalStorage::in_memory());
    storage.set_json("auth:session", &session).unwrap();
    storage.set_item("savedItems", r#"["offline copy"]"#).unwrap();
    let app = common::app_with_storage(&common::dead_url().await, storage);

    let mut board = app.saved_board();
    assert_eq!(board.load().await, None);
    assert_eq!(board.items.len(), 1);
    assert_eq!(board.items[0].id, "local-0");
    assert_eq!(board.items[0].user_id, session.user_id);

    board.input = "added offline".into();
    assert_eq!(board.save().await, None);
    assert!(board.items[1].id.starts_with("temp-"));
    assert_eq!(board.delete("local-0").await, None);
    assert_eq!(board.items.len(), 1);
}

// -- MoodGrid --

#[tokio::test]
async fn mood_grid_shows_latest_five() {
    let url = common::spawn_server().await;
    let app = common::app(&url);
    for i in 0..7 {
        app.comments.add(Mood::Sad, &format!("sad {}", i)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }
    app.comments.add(Mood::Dance, "dance").await.unwrap();

    let mut grid = app.mood_grid();
    let recent = grid.recent_comments().await;
    assert_eq!(recent.len(), Mood::ALL.len());
    assert_eq!(recent[&Mood::Sad].len(), RECENT_COMMENTS);
    assert_eq!(recent[&Mood::Sad][0].text, "sad 6");
    assert_eq!(recent[&Mood::Dance].len(), 1);
    assert!(recent[&Mood::Country].is_empty());

    assert_eq!(grid.save_comment(Mood::Country, None, "yeehaw").await, None);
    assert_eq!(grid.recent[&Mood::Country][0].text, "yeehaw");
    let id = grid.recent[&Mood::Country][0].id.clone();
    assert_eq!(grid.delete_comment(Mood::Country, &id).await, None);
    assert!(grid.recent[&Mood::Country].is_empty());
}

#[tokio::test]
async fn mood_grid_offline_is_empty() {
    let app = common::app(&common::dead_url().await);
    let mut grid = app.mood_grid();
    let recent = grid.recent_comments().await;
    assert!(recent.values().all(Vec::is_empty));
}

#[tokio::test]
async fn mood_search() {
    let app = common::app(&common::dead_url().await);
    let grid = app.mood_grid();

    assert_eq!(grid.search("  DANCE "), Ok(Some(Mood::Dance)));
    assert_eq!(grid.search("friend"), Ok(Some(Mood::Friendship)));
    assert_eq!(grid.search(""), Ok(None));
    assert_eq!(grid.search("polka"), Err(Alert::new("No results", "Try another keyword.")));
}
