#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

use std::time::Duration;

fn app() -> AppCore {
    AppCore::new(1000.0, 800.0)
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

// --- wiring ---

#[test]
fn fresh_engine_has_a_valid_empty_tree() {
    let app = app();
    let tree = app.get_state(None).unwrap();
    assert!(StateStore::is_state_shape_valid(&tree));
    assert_eq!(tree["viewport"]["scale"], json!(1.0));
    assert_eq!(tree["board"]["focused"], Value::Null);
    assert!(app.store().history().is_empty());
}

#[test]
fn set_state_and_get_state_round_trip_through_the_facade() {
    let mut app = app();
    let status = app
        .set_state(Locator::VIEWPORT, json!({ "x": 10.0, "y": 10.0, "scale": 1.0 }), OpSettings::default())
        .unwrap();
    assert!(matches!(status, UpdateStatus::Updated(_)));
    let viewport = app.get_state(Some(&Locator::VIEWPORT)).unwrap();
    assert_eq!(viewport["x"], json!(10.0));
}

#[test]
fn memo_surgery_and_entity_reads() {
    let mut app = app();
    let id = app.add_memo(MemoState::new(5.0, 6.0, 70.0, 80.0));
    assert_eq!(app.memo_ids(), vec![id]);
    let memo = app.get_state(Some(&Locator::memo(id))).unwrap();
    assert_eq!(memo["height"], json!(80.0));
    assert_eq!(app.remove_memo(&id).map(|m| m.width), Some(70.0));
    assert!(app.memo_ids().is_empty());
}

#[test]
fn with_viewport_adopts_the_prepared_controller() {
    let mut controller = ViewportController::new(640.0, 480.0);
    controller.set_scale(2.0);
    let mut app = AppCore::with_viewport(controller);
    app.attach_slide_controls();

    assert_eq!(app.viewport().screen_width(), 640.0);
    let world = app.viewport().screen_to_world(crate::camera::ScreenPoint::new(320.0, 240.0));
    assert_eq!(world.wx, 160.0);
    assert_eq!(world.wy, 120.0);

    let t0 = Instant::now();
    app.on_moved(t0);
    assert_eq!(app.viewport().slide_phase(), crate::slide::SlidePhase::Active);
}

#[test]
fn resize_reports_change_once() {
    let mut app = app();
    assert!(app.resize(1200.0, 900.0));
    assert!(!app.resize(1200.0, 900.0));
    assert_eq!(app.viewport().screen_width(), 1200.0);
}

// --- slide settle pipeline ---

#[test]
fn slide_settle_amends_the_camera_into_the_tree() {
    let mut app = app();
    app.attach_slide_controls();
    let t0 = Instant::now();

    app.on_drag_start(t0);
    app.viewport_mut().set_x(-120.0);
    app.viewport_mut().set_y(35.0);
    app.on_moved(t0);
    app.on_drag_end(t0 + ms(50));

    assert!(app.advance(t0 + ms(299)).is_empty());
    let events = app.advance(t0 + ms(300));

    let AdvanceEvent::SlideSettled { state } = &events[0] else {
        panic!("expected a slide settle, got {events:?}");
    };
    assert_eq!(state.x, -120.0);
    assert_eq!(state.y, 35.0);
    assert_eq!(app.store().viewport_state().x, -120.0);
    assert_eq!(app.store().history().len(), 1);
    assert!(!app.viewport().is_sliding());
    assert!(!app.viewport().was_sliding(), "clear window elapsed during the quiet period");
}

#[test]
fn first_settle_at_rest_commits_only_the_projections() {
    let mut app = app();
    app.attach_slide_controls();
    let t0 = Instant::now();
    app.on_moved(t0);
    let events = app.advance(t0 + ms(300));
    assert_eq!(events.len(), 1);
    // The transform never moved, but the boot-state projections still
    // catch up with the derived focal point on the first amend.
    let newest = app.store().history().newest().unwrap();
    let fields: Vec<&str> = newest.applied.keys().map(String::as_str).collect();
    assert_eq!(fields, vec!["wX", "wY"]);
    assert_eq!(app.store().viewport_state().wx, 500.0);

    app.on_moved(t0 + ms(400));
    let events = app.advance(t0 + ms(700));
    assert_eq!(events.len(), 1, "settle still reported");
    assert_eq!(app.store().history().len(), 1, "an idle amend commits nothing");
}

#[test]
fn wheel_zoom_settles_like_any_movement() {
    let mut app = app();
    app.attach_slide_controls();
    let t0 = Instant::now();
    app.viewport_mut().set_scale(1.3);
    app.on_wheel(t0);
    app.advance(t0 + ms(300));
    assert_eq!(app.store().viewport_state().scale, 1.3);
    assert_eq!(app.zoom_percent(), "130");
}

#[test]
fn detached_controls_never_settle() {
    let mut app = app();
    app.attach_slide_controls();
    let t0 = Instant::now();
    app.on_moved(t0);
    app.detach_slide_controls();
    assert!(app.advance(t0 + ms(1000)).is_empty());
    assert!(app.store().history().is_empty());
}

// --- animation pipeline ---

#[test]
fn animated_zoom_commits_exactly_once_on_landing() {
    let mut app = app();
    let id = app.zoom_in(0).unwrap();
    let t0 = Instant::now();

    app.advance(t0);
    assert!(app.advance(t0 + ms(250)).is_empty(), "mid-flight ticks commit nothing");
    assert!(app.store().history().is_empty());

    let events = app.advance(t0 + ms(500));
    assert_eq!(
        events,
        vec![AdvanceEvent::CameraAnimationSettled { id, state: app.store().viewport_state() }]
    );
    assert_eq!(app.store().viewport_state().scale, 2.0);
    assert_eq!(app.store().history().len(), 1);
    assert_eq!(app.operations().in_flight(), 0);

    assert!(app.advance(t0 + ms(600)).is_empty(), "a landed flight stays landed");
    assert_eq!(app.store().history().len(), 1);
}

#[test]
fn gestures_are_blocked_mid_flight_and_restored_after() {
    let mut app = app();
    app.attach_slide_controls();
    app.zoom_in(0).unwrap();
    let t0 = Instant::now();
    app.advance(t0);

    app.on_moved(t0 + ms(100));
    assert!(!app.viewport().is_sliding(), "flights suspend gesture handling");

    app.advance(t0 + ms(500));
    app.on_moved(t0 + ms(600));
    assert!(app.viewport().is_sliding());
}

#[test]
fn superseding_flight_drops_the_stale_focus() {
    let mut app = app();
    let memo = app.add_memo(MemoState::new(0.0, 0.0, 200.0, 100.0));
    let first = app.focus_memo(memo).unwrap();
    let second = app.zoom_in(0).unwrap();
    assert_ne!(first, second);
    assert_eq!(app.operations().in_flight(), 1);

    let t0 = Instant::now();
    app.advance(t0);
    let events = app.advance(t0 + ms(500));
    assert_eq!(events.len(), 1);
    let AdvanceEvent::CameraAnimationSettled { id, .. } = &events[0] else {
        panic!("expected a camera settle, got {events:?}");
    };
    assert_eq!(*id, second);
    assert_eq!(app.store().board().focused, None, "the awaited flight never landed");
}

#[test]
fn removing_the_memo_cancels_its_deferred_focus() {
    let mut app = app();
    let memo = app.add_memo(MemoState::new(0.0, 0.0, 200.0, 100.0));
    app.focus_memo(memo).unwrap();
    app.remove_memo(&memo);

    let t0 = Instant::now();
    app.advance(t0);
    app.advance(t0 + ms(500));
    assert_eq!(app.store().board().focused, None);
    assert_eq!(app.store().history().len(), 1, "only the settle commit remains");
}

#[test]
fn manual_animated_settle_matches_the_pump() {
    let mut app = app();
    let pending = app
        .set_state(Locator::VIEWPORT, json!({ "scale": 4.0 }), OpSettings::animation())
        .unwrap();
    let UpdateStatus::Pending(id) = pending else {
        panic!("expected Pending, got {pending:?}");
    };
    let target = app.operations().target_of(id).unwrap();
    let status = app
        .set_state(Locator::VIEWPORT, target.snapshot(), OpSettings::animated(id))
        .unwrap();
    assert!(matches!(status, UpdateStatus::Updated(_)));
    assert_eq!(app.viewport().flight_id(), None);
    assert_eq!(app.store().viewport_state().scale, 4.0);
}
