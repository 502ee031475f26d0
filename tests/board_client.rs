//! End-to-end tests: a real server on a loopback port driven by the board client.

use std::sync::Arc;

use taskboard::api::task_store::InMemoryTaskStore;
use taskboard::api::{router, AppState};
use taskboard::client::{Board, BoardClient, EditForm};
use taskboard::task::{Column, TaskPatch};
use taskboard::Config;

/// Start the server on `127.0.0.1:0` and return its base URL and state.
async fn start_server() -> (String, Arc<AppState>) {
    let config = Config::new("127.0.0.1", 0, "public");
    let state = Arc::new(AppState::new(config, Arc::new(InMemoryTaskStore::new())));
    let app = router(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    (format!("http://{}", addr), state)
}

#[tokio::test]
async fn test_add_edit_and_list_round_trip() {
    let (url, state) = start_server().await;
    let mut board = Board::load(BoardClient::new(&url)).await;

    let id = board.add_task("  Buy milk ").await.expect("task created");
    let form = EditForm {
        text: "Buy oat milk".to_string(),
        labels: "errand, urgent".to_string(),
        ..EditForm::from_card(board.card(id).unwrap())
    };
    assert!(board.save_edit(id, &form).await);

    let card = board.card(id).unwrap();
    assert_eq!(card.text, "Buy oat milk");
    assert_eq!(card.labels, vec!["errand", "urgent"]);

    let tasks = state.tasks.list().await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, id);
    assert_eq!(tasks[0].text, "Buy oat milk");
    assert_eq!(tasks[0].column, Column::Todo);
    assert_eq!(tasks[0].labels.len(), 2);
}

#[tokio::test]
async fn test_drop_reports_position_among_new_siblings() {
    let (url, state) = start_server().await;
    let mut board = Board::load(BoardClient::new(&url)).await;
    let a = board.add_task("a").await.unwrap();
    let b = board.add_task("b").await.unwrap();
    let c = board.add_task("c").await.unwrap();

    assert_eq!(board.drop_card(a, Column::Doing, 0).await, Some(1));
    assert_eq!(board.drop_card(b, Column::Doing, 0).await, Some(1));
    // Only the dropped card is reported; `a` keeps its stored order.
    assert_eq!(state.tasks.get(a).await.unwrap().order, 1);
    assert_eq!(state.tasks.get(b).await.unwrap().column, Column::Doing);

    assert_eq!(board.drop_card(c, Column::Doing, 2).await, Some(3));
    let stored = state.tasks.get(c).await.unwrap();
    assert_eq!((stored.column, stored.order), (Column::Doing, 3));
}

#[tokio::test]
async fn test_reload_reflects_server_order() {
    let (url, state) = start_server().await;
    let client = BoardClient::new(&url);
    let first = client.create_task("first").await.unwrap();
    let second = client.create_task("second").await.unwrap();
    state
        .tasks
        .update(
            first.id,
            TaskPatch {
                order: Some(10),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let board = Board::load(client).await;

    let ids: Vec<u64> = board.column(Column::Todo).iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[tokio::test]
async fn test_remove_deletes_on_server() {
    let (url, state) = start_server().await;
    let mut board = Board::load(BoardClient::new(&url)).await;
    let id = board.add_task("temporary").await.unwrap();

    assert!(board.remove(id).await);

    assert!(board.card(id).is_none());
    assert!(state.tasks.list().await.is_empty());
}

#[tokio::test]
async fn test_client_surfaces_server_errors() {
    let (url, _state) = start_server().await;
    let client = BoardClient::new(&url);

    let err = client.create_task("").await.unwrap_err();
    assert!(err.to_string().contains("No text provided"), "{:#}", err);

    let err = client
        .update_task(1, &TaskPatch::moving(Column::Done, 1))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Task not found"), "{:#}", err);

    client.delete_task(1).await.expect("delete of absent id succeeds");
}
