//! Backend event loop driven the way the UI drives it.

use std::sync::atomic::Ordering;
use std::time::Duration;

use textgrab_types::{AppEvent, Point, ShortcutBinding, TriggerSource, normalize};
use tokio::time::timeout;

use super::support::Backend;

const NO_DELAY: Duration = Duration::ZERO;

fn drag() -> AppEvent {
    AppEvent::RegionSelected(normalize(
        Point::new(100.0, 100.0),
        Point::new(300.0, 250.0),
    ))
}

fn shortcut() -> AppEvent {
    AppEvent::TriggerCapture {
        source: TriggerSource::Shortcut,
    }
}

/// Collect UI events until one matches
async fn wait_for_ui(
    backend: &Backend,
    seen: &mut Vec<AppEvent>,
    matches: impl Fn(&AppEvent) -> bool,
) {
    timeout(Duration::from_secs(2), async {
        loop {
            let batch = backend.ui_events();
            let found = batch.iter().any(&matches);
            seen.extend(batch);
            if found {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("expected UI event never arrived");
}

#[tokio::test]
async fn test_shortcut_drag_recognize_deliver() {
    let backend = Backend::new(Some("Hello World"), NO_DELAY);
    let _tasks = backend.controller.spawn_tasks();
    let tx = backend.controller.ui_sender();
    let mut seen = Vec::new();

    tx.send(shortcut()).await.unwrap();
    wait_for_ui(&backend, &mut seen, |e| *e == AppEvent::OpenSurface).await;

    tx.send(drag()).await.unwrap();
    backend.settle().await;
    wait_for_ui(&backend, &mut seen, |e| {
        matches!(e, AppEvent::CaptureStatusUpdate { capturing: false, .. })
    })
    .await;

    assert_eq!(backend.clipboard_text().as_deref(), Some("Hello World"));
    assert_eq!(
        backend.state.coordinator.history().get(0).as_deref(),
        Some("Hello World")
    );
    assert!(!backend.state.coordinator.is_capture_in_flight());
    assert!(seen.contains(&AppEvent::CloseSurface));
    assert!(seen.contains(&AppEvent::RecentsChanged(vec!["Hello World".to_string()])));
}

#[tokio::test]
async fn test_triggers_during_capture_are_dropped() {
    let backend = Backend::new(Some("slow"), Duration::from_millis(200));
    let _tasks = backend.controller.spawn_tasks();
    let tx = backend.controller.ui_sender();
    let mut seen = Vec::new();

    tx.send(shortcut()).await.unwrap();
    wait_for_ui(&backend, &mut seen, |e| *e == AppEvent::OpenSurface).await;

    tx.send(drag()).await.unwrap();
    tx.send(shortcut()).await.unwrap();
    tx.send(AppEvent::TriggerCapture {
        source: TriggerSource::Menu,
    })
    .await
    .unwrap();

    backend.settle().await;
    seen.extend(backend.ui_events());

    let opens = seen.iter().filter(|e| **e == AppEvent::OpenSurface).count();
    assert_eq!(opens, 1);
    assert_eq!(backend.recognizer.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_loop_stays_responsive_during_capture() {
    let backend = Backend::new(Some("slow"), Duration::from_millis(300));
    let _tasks = backend.controller.spawn_tasks();
    let tx = backend.controller.ui_sender();
    let mut seen = Vec::new();

    tx.send(shortcut()).await.unwrap();
    wait_for_ui(&backend, &mut seen, |e| *e == AppEvent::OpenSurface).await;
    tx.send(drag()).await.unwrap();
    tx.send(AppEvent::ToggleVocalization).await.unwrap();

    wait_for_ui(&backend, &mut seen, |e| *e == AppEvent::VocalizationChanged(true)).await;
    assert!(backend.state.coordinator.is_capture_in_flight());

    backend.settle().await;
}

#[tokio::test]
async fn test_click_without_drag_resets() {
    let backend = Backend::new(Some("unused"), NO_DELAY);
    let _tasks = backend.controller.spawn_tasks();
    let tx = backend.controller.ui_sender();
    let mut seen = Vec::new();

    tx.send(shortcut()).await.unwrap();
    wait_for_ui(&backend, &mut seen, |e| *e == AppEvent::OpenSurface).await;

    tx.send(AppEvent::SelectionDismissed).await.unwrap();
    backend.settle().await;

    assert_eq!(backend.clipboard_text(), None);
    assert!(backend.state.coordinator.history().is_empty());
    assert_eq!(backend.recognizer.calls.load(Ordering::SeqCst), 0);

    // the next trigger opens the surface again
    tx.send(shortcut()).await.unwrap();
    let mut again = Vec::new();
    wait_for_ui(&backend, &mut again, |e| *e == AppEvent::OpenSurface).await;
}

#[tokio::test]
async fn test_no_text_no_delivery() {
    let backend = Backend::new(None, NO_DELAY);
    let _tasks = backend.controller.spawn_tasks();
    let tx = backend.controller.ui_sender();
    let mut seen = Vec::new();

    tx.send(shortcut()).await.unwrap();
    wait_for_ui(&backend, &mut seen, |e| *e == AppEvent::OpenSurface).await;
    tx.send(drag()).await.unwrap();
    backend.settle().await;

    assert_eq!(backend.clipboard.writes.load(Ordering::SeqCst), 0);
    assert!(backend.state.coordinator.history().is_empty());
}

#[tokio::test]
async fn test_menu_actions() {
    let backend = Backend::new(Some("menu text"), NO_DELAY);
    let _tasks = backend.controller.spawn_tasks();
    let tx = backend.controller.ui_sender();
    let mut seen = Vec::new();

    tx.send(AppEvent::ToggleVocalization).await.unwrap();
    tx.send(AppEvent::SelectShortcut(7)).await.unwrap();
    wait_for_ui(&backend, &mut seen, |e| {
        *e == AppEvent::ShortcutChanged(ShortcutBinding::Seven)
    })
    .await;

    tx.send(AppEvent::TriggerCapture {
        source: TriggerSource::Menu,
    })
    .await
    .unwrap();
    wait_for_ui(&backend, &mut seen, |e| *e == AppEvent::OpenSurface).await;
    tx.send(drag()).await.unwrap();
    backend.settle().await;
    assert_eq!(*backend.speaker.spoken.lock().unwrap(), vec!["menu text"]);

    *backend.clipboard.contents.lock().unwrap() = None;
    tx.send(AppEvent::CopyRecent(0)).await.unwrap();
    tx.send(AppEvent::ClearRecents).await.unwrap();
    wait_for_ui(&backend, &mut seen, |e| *e == AppEvent::RecentsChanged(vec![])).await;

    assert_eq!(backend.clipboard_text().as_deref(), Some("menu text"));
    assert!(backend.state.coordinator.history().is_empty());
}

#[tokio::test]
async fn test_quit_ends_the_loop() {
    let backend = Backend::new(None, NO_DELAY);
    let mut tasks = backend.controller.spawn_tasks();

    backend
        .controller
        .ui_sender()
        .send(AppEvent::Quit)
        .await
        .unwrap();

    let finished = timeout(Duration::from_secs(2), tasks.join_next())
        .await
        .expect("event loop did not stop");
    assert!(matches!(finished, Some(Ok(Ok(())))));
}

#[tokio::test]
async fn test_shutdown_cancels_the_loop() {
    let backend = Backend::new(None, NO_DELAY);
    let mut tasks = backend.controller.spawn_tasks();

    backend.controller.shutdown();

    let finished = timeout(Duration::from_secs(2), tasks.join_next())
        .await
        .expect("event loop ignored cancellation");
    assert!(matches!(finished, Some(Ok(Ok(())))));
}
