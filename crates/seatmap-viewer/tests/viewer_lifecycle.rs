//! Integration tests: load, fallback and teardown of the seat-map viewer.
//!
//! Drives `SeatMapViewer` over a `MemorySurface` with a static fetcher, so
//! every lifecycle transition can be observed without a browser.

mod common;

use common::*;
use pretty_assertions::assert_eq;
use seatmap_core::SectionRecord;
use seatmap_viewer::*;

// ─── Successful load ────────────────────────────────────────────────────

#[tokio::test]
async fn load_fetches_venue_url_and_mounts() {
    init_logging();
    let fetcher = StaticFetcher::stadium_a();
    let (notifier, _) = recording_notifier();
    let mut v = viewer("stadium-a", sections(), notifier);
    assert_eq!(v.state(), LoadState::Idle);

    let outcome = v.load_and_render(&fetcher).await.unwrap();
    assert_eq!(outcome, LoadOutcome::Rendered);
    assert_eq!(v.state(), LoadState::Ready);
    assert_eq!(
        *fetcher.requested.borrow(),
        vec!["/static/events/stadiums/svg/stadium-a.svg".to_string()]
    );

    let surface = v.surface().unwrap();
    assert_eq!(surface.mount_count, 1);
    let markup = surface.markup().unwrap();
    assert!(markup.contains(r#"data-section-id="A1""#));
    assert!(markup.contains("Pitch &amp; Tunnel"));
}

#[tokio::test]
async fn every_interactive_shape_gets_listeners() {
    let (v, _) = loaded().await;
    // a1-west, a1-east, b2 and the unmapped kiosk; the pitch is outside #shapes.
    assert_eq!(v.interactive_shapes().len(), 4);
    assert_eq!(v.listener_count(), 4);
    assert_eq!(v.surface().unwrap().live_listeners(), 4);
    for id in ["a1-west", "a1-east", "b2", "kiosk"] {
        assert_eq!(style(&v, id, "cursor").as_deref(), Some("pointer"));
        assert_eq!(style(&v, id, "transition").as_deref(), Some("all 0.2s ease"));
    }
    assert_eq!(style(&v, "pitch", "cursor"), None);
}

#[tokio::test]
async fn shapes_of_a_section_share_its_fill() {
    let (v, _) = loaded().await;
    let a1 = seatmap_core::SectionId::intern("A1");
    assert_eq!(v.bindings().shapes_of(a1).len(), 2);
    assert_eq!(style(&v, "a1-west", "fill").as_deref(), Some("#FF000099"));
    assert_eq!(style(&v, "a1-east", "fill").as_deref(), Some("#FF000099"));
    assert_eq!(style(&v, "b2", "fill").as_deref(), Some("#00008099"));
    assert_eq!(style(&v, "b2", "stroke").as_deref(), Some("#333"));
    assert_eq!(style(&v, "kiosk", "fill"), None);
}

#[tokio::test]
async fn tooltip_created_hidden_after_load() {
    let (v, _) = loaded().await;
    let tip = v.surface().unwrap().tooltip.as_ref().unwrap();
    assert_eq!(tip.id, "svg-stadium-tooltip");
    assert!(!tip.visible);
    assert!(v.tooltip().is_created());
}

#[tokio::test]
async fn section_without_matching_shape_is_harmless() {
    init_logging();
    let (notifier, calls) = recording_notifier();
    let mut v = viewer(
        "stadium-a",
        vec![SectionRecord::new("ZZ", "Block ZZ", "#00FF00", "blockZZ")],
        notifier,
    );
    let outcome = v.load_and_render(&StaticFetcher::stadium_a()).await.unwrap();
    assert_eq!(outcome, LoadOutcome::Rendered);
    assert_eq!(v.listener_count(), 4);
    assert!(v.bindings().is_empty());
    assert!(!v.surface().unwrap().markup().unwrap().contains("#00FF00"));

    let west = shape(&v, "a1-west");
    assert!(!v.handle_click(west));
    assert!(calls.borrow().is_empty());
}

#[test]
fn nothing_renders_until_load() {
    init_logging();
    let fetcher = StaticFetcher::stadium_a();
    let v = viewer("stadium-a", sections(), SelectionNotifier::default());
    assert_eq!(v.state(), LoadState::Idle);
    assert!(fetcher.requested.borrow().is_empty());
    let surface = v.surface().unwrap();
    assert_eq!(surface.content, Content::Empty);
    assert_eq!(surface.mount_count, 0);
    assert!(surface.tooltip.is_none());
    assert_eq!(v.listener_count(), 0);
}

// ─── Failure paths ──────────────────────────────────────────────────────

#[tokio::test]
async fn missing_map_shows_fallback() {
    init_logging();
    let (notifier, calls) = recording_notifier();
    let mut v = viewer("stadium-missing", sections(), notifier);
    let outcome = v.load_and_render(&StaticFetcher::stadium_a()).await.unwrap();

    let LoadOutcome::Fallback { reason } = outcome else {
        panic!("expected fallback, got {outcome:?}");
    };
    assert!(reason.contains("404"), "reason: {reason}");
    assert_eq!(v.state(), LoadState::Failed);

    let surface = v.surface().unwrap();
    assert_eq!(
        surface.content,
        Content::Fallback("Interactive stadium map not available".to_string())
    );
    assert_eq!(surface.live_listeners(), 0);
    assert!(surface.tooltip.is_none());
    assert_eq!(v.listener_count(), 0);
    assert!(calls.borrow().is_empty());
}

#[tokio::test]
async fn unparseable_map_shows_fallback() {
    init_logging();
    let fetcher = StaticFetcher::new(
        "/static/events/stadiums/svg/broken.svg",
        "<html><body>Server error</body></html>",
    );
    let mut v = viewer("broken", sections(), SelectionNotifier::default());
    let outcome = v.load_and_render(&fetcher).await.unwrap();
    assert!(matches!(outcome, LoadOutcome::Fallback { .. }));
    assert!(matches!(v.surface().unwrap().content, Content::Fallback(_)));
}

#[tokio::test]
async fn host_mount_failure_shows_fallback() {
    init_logging();
    let (notifier, calls) = recording_notifier();
    let mut v = SeatMapViewer::new(
        Some(RefusingSurface::default()),
        "map",
        "stadium-a",
        sections(),
        notifier,
        ViewerConfig::default(),
    );
    let outcome = v.load_and_render(&StaticFetcher::stadium_a()).await.unwrap();

    let LoadOutcome::Fallback { reason } = outcome else {
        panic!("expected fallback, got {outcome:?}");
    };
    assert!(reason.contains("failed to mount"), "reason: {reason}");
    assert_eq!(v.state(), LoadState::Failed);
    assert_eq!(v.listener_count(), 0);

    let surface = v.surface().unwrap();
    assert_eq!(
        surface.fallback.as_deref(),
        Some("Interactive stadium map not available")
    );
    assert_eq!(surface.listened, 0);
    assert!(!surface.tooltip_created);

    // Nothing is interactive afterwards.
    let stray = seatmap_core::NodeIndex::new(1);
    assert!(!v.handle_click(stray));
    assert!(calls.borrow().is_empty());
}

#[tokio::test]
async fn second_load_fails_fast() {
    let (mut v, _) = loaded().await;
    let fetcher = StaticFetcher::stadium_a();
    let err = v.load_and_render(&fetcher).await.unwrap_err();
    assert_eq!(err, ViewerError::AlreadyLoaded(LoadState::Ready));
    assert!(fetcher.requested.borrow().is_empty());
    assert_eq!(v.surface().unwrap().mount_count, 1);
}

#[tokio::test]
async fn failed_viewer_stays_failed() {
    init_logging();
    let mut v = viewer("stadium-missing", sections(), SelectionNotifier::default());
    let fetcher = StaticFetcher::stadium_a();
    v.load_and_render(&fetcher).await.unwrap();
    assert_eq!(
        v.begin_load().unwrap_err(),
        ViewerError::AlreadyLoaded(LoadState::Failed)
    );
}

#[test]
fn missing_container_makes_viewer_inert() {
    init_logging();
    let mut v: SeatMapViewer<MemorySurface> = SeatMapViewer::new(
        None,
        "nowhere",
        "stadium-a",
        sections(),
        SelectionNotifier::default(),
        ViewerConfig::default(),
    );
    assert_eq!(v.state(), LoadState::Inert);
    assert_eq!(
        v.begin_load().unwrap_err(),
        ViewerError::Inert("nowhere".to_string())
    );
    v.clear_selection();
    v.teardown();
    assert_eq!(v.state(), LoadState::TornDown);
}

// ─── Teardown ───────────────────────────────────────────────────────────

#[test]
fn teardown_during_fetch_drops_late_response() {
    init_logging();
    let mut v = viewer("stadium-a", sections(), SelectionNotifier::default());
    let request = v.begin_load().unwrap();
    assert_eq!(v.state(), LoadState::Loading);
    assert_eq!(request.url, "/static/events/stadiums/svg/stadium-a.svg");

    v.teardown();
    assert!(request.token.is_cancelled());

    let outcome = v
        .finish_load(&request.token, Ok(STADIUM_A.to_string()))
        .unwrap();
    assert_eq!(outcome, LoadOutcome::Cancelled);
    assert_eq!(v.state(), LoadState::TornDown);
    let surface = v.surface().unwrap();
    assert_eq!(surface.content, Content::Empty);
    assert_eq!(surface.live_listeners(), 0);
}

#[test]
fn finish_without_begin_is_rejected() {
    let mut v = viewer("stadium-a", sections(), SelectionNotifier::default());
    let stray = CancellationToken::new();
    assert_eq!(
        v.finish_load(&stray, Ok(STADIUM_A.to_string())).unwrap_err(),
        ViewerError::NotLoading(LoadState::Idle)
    );
}

#[tokio::test]
async fn teardown_releases_listeners_and_tooltip() {
    let (mut v, _) = loaded().await;
    let west = shape(&v, "a1-west");
    v.handle_enter(west, 5.0, 5.0);

    v.teardown();
    assert_eq!(v.state(), LoadState::TornDown);
    assert_eq!(v.listener_count(), 0);
    let surface = v.surface().unwrap();
    assert_eq!(surface.live_listeners(), 0);
    assert!(surface.tooltip.is_none());
    // The rendered map itself stays in the container.
    assert!(surface.markup().is_some());

    assert!(!v.handle_click(west));
    assert_eq!(v.begin_load().unwrap_err(), ViewerError::TornDown);
}

#[tokio::test]
async fn dropping_viewer_releases_listeners() {
    let (v, _) = loaded().await;
    let counter = v.surface().unwrap().listener_counter();
    assert_eq!(counter.get(), 4);
    drop(v);
    assert_eq!(counter.get(), 0);
}
