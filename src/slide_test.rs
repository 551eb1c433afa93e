#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn attached_tracker() -> (SlideTracker, Instant) {
    let mut tracker = SlideTracker::new();
    tracker.attach();
    (tracker, Instant::now())
}

// --- attach / detach ---

#[test]
fn starts_detached_and_idle() {
    let tracker = SlideTracker::new();
    assert!(!tracker.attached());
    assert_eq!(tracker.phase(), SlidePhase::Idle);
    assert!(!tracker.is_sliding());
    assert!(!tracker.was_sliding());
}

#[test]
fn attach_returns_gesture_configuration() {
    let mut tracker = SlideTracker::new();
    let config = tracker.attach();
    assert!(tracker.attached());
    assert_eq!(config.friction, 0.95);
    assert_eq!(config.bounce, 0.8);
    assert_eq!(config.min_speed, 0.05);
    assert_eq!(config.clamp_min_scale, 0.031_25);
    assert_eq!(config.clamp_max_scale, 32.0);
}

#[test]
fn events_are_ignored_while_detached() {
    let mut tracker = SlideTracker::new();
    let t0 = Instant::now();
    tracker.on_gesture_start(t0);
    tracker.on_moved(t0);
    assert!(!tracker.is_sliding());
    assert!(!tracker.was_sliding());
    assert!(!tracker.advance(t0 + ms(1000)));
}

#[test]
fn detach_drops_pending_deadlines() {
    let (mut tracker, t0) = attached_tracker();
    tracker.on_gesture_start(t0);
    tracker.on_moved(t0);
    tracker.on_gesture_end(t0 + ms(10));
    tracker.detach();
    assert!(!tracker.is_sliding());
    assert!(!tracker.was_sliding());
    assert!(!tracker.advance(t0 + ms(1000)));
}

// --- settle debounce ---

#[test]
fn movement_enters_active() {
    let (mut tracker, t0) = attached_tracker();
    tracker.on_moved(t0);
    assert_eq!(tracker.phase(), SlidePhase::Active);
    assert!(tracker.is_sliding());
}

#[test]
fn no_settle_before_the_quiet_period() {
    let (mut tracker, t0) = attached_tracker();
    tracker.on_moved(t0);
    assert!(!tracker.advance(t0 + ms(299)));
    assert!(tracker.is_sliding());
}

#[test]
fn settle_fires_once_after_the_quiet_period() {
    let (mut tracker, t0) = attached_tracker();
    tracker.on_moved(t0);
    assert!(tracker.advance(t0 + ms(300)));
    assert_eq!(tracker.phase(), SlidePhase::Idle);
    assert!(!tracker.advance(t0 + ms(400)));
}

#[test]
fn movement_re_arms_the_quiet_deadline() {
    let (mut tracker, t0) = attached_tracker();
    tracker.on_moved(t0);
    tracker.on_moved(t0 + ms(250));
    assert!(!tracker.advance(t0 + ms(300)));
    assert!(tracker.advance(t0 + ms(550)));
}

#[test]
fn gesture_end_moves_active_to_settling() {
    let (mut tracker, t0) = attached_tracker();
    tracker.on_gesture_start(t0);
    tracker.on_moved(t0 + ms(50));
    tracker.on_gesture_end(t0 + ms(100));
    assert_eq!(tracker.phase(), SlidePhase::Settling);
    assert!(tracker.is_sliding());
    // Deceleration after release keeps the deadline moving.
    tracker.on_moved(t0 + ms(150));
    assert_eq!(tracker.phase(), SlidePhase::Active);
    assert!(tracker.advance(t0 + ms(450)));
}

#[test]
fn gesture_end_without_movement_never_settles() {
    let (mut tracker, t0) = attached_tracker();
    tracker.on_gesture_start(t0);
    tracker.on_gesture_end(t0 + ms(10));
    assert_eq!(tracker.phase(), SlidePhase::Idle);
    assert!(!tracker.advance(t0 + ms(1000)));
}

// --- was-sliding window ---

#[test]
fn was_sliding_raised_on_gesture_start() {
    let (mut tracker, t0) = attached_tracker();
    tracker.on_gesture_start(t0);
    assert!(tracker.was_sliding());
}

#[test]
fn was_sliding_lingers_through_the_clear_window() {
    let (mut tracker, t0) = attached_tracker();
    tracker.on_gesture_start(t0);
    tracker.on_gesture_end(t0 + ms(100));
    tracker.advance(t0 + ms(100 + 219));
    assert!(tracker.was_sliding());
    tracker.advance(t0 + ms(100 + 220));
    assert!(!tracker.was_sliding());
}

#[test]
fn new_gesture_cancels_a_pending_clear() {
    let (mut tracker, t0) = attached_tracker();
    tracker.on_gesture_start(t0);
    tracker.on_gesture_end(t0 + ms(10));
    tracker.on_gesture_start(t0 + ms(100));
    tracker.advance(t0 + ms(500));
    assert!(tracker.was_sliding(), "clear pending from the old gesture must not fire");
}

#[test]
fn repeated_gesture_ends_re_arm_the_clear_window() {
    let (mut tracker, t0) = attached_tracker();
    tracker.on_gesture_start(t0);
    tracker.on_gesture_end(t0 + ms(10));
    tracker.on_gesture_start(t0 + ms(50));
    tracker.on_gesture_end(t0 + ms(60));
    tracker.advance(t0 + ms(10 + 220));
    assert!(tracker.was_sliding());
    tracker.advance(t0 + ms(60 + 220));
    assert!(!tracker.was_sliding());
}

// --- custom windows ---

#[test]
fn custom_windows_are_honored() {
    let mut tracker = SlideTracker::with_windows(ms(100), ms(50));
    tracker.attach();
    let t0 = Instant::now();
    tracker.on_moved(t0);
    assert!(!tracker.advance(t0 + ms(99)));
    assert!(tracker.advance(t0 + ms(100)));
    tracker.on_gesture_start(t0 + ms(200));
    tracker.on_gesture_end(t0 + ms(200));
    tracker.advance(t0 + ms(250));
    assert!(!tracker.was_sliding());
}
