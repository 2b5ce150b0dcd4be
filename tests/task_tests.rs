//! Tests for a single download task and its rate-limited progress wiring.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tranche::download::{DownloadTask, Item, Status};
use tranche::fetch::{Fetcher, HttpFetcher};
use tranche::progress::ProgressStore;

mod common;
use common::helpers::*;

const INTERVAL: Duration = Duration::from_millis(500);

fn task_with(
    fetcher: Arc<dyn Fetcher>,
    renderer: &RecordingRenderer,
    item: Item,
) -> (DownloadTask, Arc<ProgressStore>) {
    let store = Arc::new(ProgressStore::new(1, Box::new(renderer.clone())));
    let destination = PathBuf::from("unused").join(&item.name);
    let task = DownloadTask::new(item, destination, Arc::clone(&store), fetcher, INTERVAL);
    (task, store)
}

#[tokio::test(start_paused = true)]
async fn test_chatty_fetcher_is_rate_limited() {
    let renderer = RecordingRenderer::default();
    let (task, store) = task_with(Arc::new(ChattyFetcher), &renderer, Item::new("clip", "x"));

    let status = task.run().await;
    assert_eq!(status, Status::Completed);
    assert_eq!(store.get("clip"), Some(Status::Completed));

    let statuses = renderer.statuses_of("clip");
    let in_progress = statuses
        .iter()
        .filter(|status| matches!(status, Status::InProgress { .. }))
        .count();
    // Two seconds of events at 10ms with a 500ms interval.
    assert!(in_progress <= 5, "{} progress updates forwarded", in_progress);
    assert!(in_progress >= 2);
    assert_eq!(statuses.last(), Some(&Status::Completed));
}

#[tokio::test(start_paused = true)]
async fn test_final_status_forwarded_right_after_progress() {
    let renderer = RecordingRenderer::default();
    let fetcher = FakeFetcher::new(Duration::from_millis(20));
    let (task, _store) = task_with(Arc::new(fetcher), &renderer, Item::new("clip", "x"));

    task.run().await;

    // The 50% event arrives 10ms after the start marker and is dropped, the
    // final status is not.
    assert_eq!(
        renderer.statuses_of("clip"),
        vec![
            Status::InProgress {
                percent: "  0.0%".into(),
                rate: "N/A".into()
            },
            Status::Completed
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_failure_message_preserved() {
    let renderer = RecordingRenderer::default();
    let fetcher = FakeFetcher::new(Duration::ZERO).failing("x", "quota exceeded");
    let (task, store) = task_with(Arc::new(fetcher), &renderer, Item::new("clip", "x"));

    let status = task.run().await;
    assert_eq!(status, Status::Failed("quota exceeded".into()));
    assert_eq!(store.get("clip"), Some(Status::Failed("quota exceeded".into())));
}

#[tokio::test]
async fn test_invalid_locator_fails_item() {
    let renderer = RecordingRenderer::default();
    let fetcher = HttpFetcher::with_config(Default::default()).unwrap();
    let (task, store) = task_with(
        Arc::new(fetcher),
        &renderer,
        Item::new("clip", "definitely not a url"),
    );

    let status = task.run().await;
    match status {
        Status::Failed(msg) => assert!(msg.contains("definitely not a url"), "{}", msg),
        other => panic!("Expected a failure, got {:?}", other),
    }
    assert!(store.get("clip").unwrap().is_terminal());
}

#[test]
fn test_task_getters() {
    let renderer = RecordingRenderer::default();
    let (task, _store) = task_with(
        Arc::new(FakeFetcher::default()),
        &renderer,
        Item::new("clip", "x"),
    );
    assert_eq!(task.item().name, "clip");
    assert_eq!(task.destination(), PathBuf::from("unused/clip"));
}
