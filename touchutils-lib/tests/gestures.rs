use std::sync::atomic::{AtomicBool, Ordering};

use touchutils_lib::{GestureSnapshot, Tap, TouchFrame, TouchTracker};

fn run(tracker: &TouchTracker, frames: impl IntoIterator<Item = TouchFrame>) {
    for frame in frames {
        tracker.update(&frame);
    }
}

fn assert_consistent(snapshot: &GestureSnapshot, frame: &TouchFrame) {
    assert!(
        snapshot.pinch.is_none() || snapshot.pan.is_none(),
        "pinch and pan at once on frame {}",
        snapshot.frame
    );
    if let Some(pinch) = snapshot.pinch {
        assert_ne!(pinch.id1, pinch.id2);
        assert!(frame.contains(pinch.id1) && frame.contains(pinch.id2));
    }
    if let Some(pan) = snapshot.pan {
        assert_ne!(pan.id1, pan.id2);
        assert!(frame.contains(pan.id1) && frame.contains(pan.id2));
    }
}

#[test]
fn converging_fingers_pinch_inward() {
    let tracker = TouchTracker::new();
    run(
        &tracker,
        [
            TouchFrame::new().pressed(0, 100, 100).pressed(1, 200, 100),
            TouchFrame::new().held(0, 150, 100).held(1, 150, 100),
        ],
    );

    let pinch = tracker.pinch().expect("pinch");
    assert_eq!(pinch.origin_distance, 100.0);
    assert_eq!(pinch.distance, 0.0);
    assert!(pinch.is_inward());
    assert!(!pinch.is_outward());
    assert_eq!((pinch.center_x, pinch.center_y), (150, 100));
    assert_eq!(tracker.two_finger_pan(), None);
}

#[test]
fn diverging_fingers_pinch_outward() {
    let tracker = TouchTracker::new();
    run(
        &tracker,
        [
            TouchFrame::new().pressed(0, 100, 100).pressed(1, 120, 100),
            TouchFrame::new().held(0, 60, 100).held(1, 160, 100),
        ],
    );
    assert!(tracker.pinch().is_some_and(|p| p.is_outward()));
}

#[test]
fn quick_release_taps_once() {
    let tracker = TouchTracker::new();
    run(
        &tracker,
        [
            TouchFrame::new().pressed(3, 50, 50),
            TouchFrame::new(),
        ],
    );

    assert_eq!(tracker.tapped_one(), Some(Tap { x: 50, y: 50 }));
    assert_eq!(tracker.tapped_two(), None);
    assert_eq!(tracker.tapped_three(), None);
    assert_eq!(tracker.pinch(), None);
    assert_eq!(tracker.two_finger_pan(), None);
}

#[test]
fn one_finger_moving_vertically_pans() {
    let tracker = TouchTracker::new();
    run(
        &tracker,
        [
            TouchFrame::new().pressed(0, 10, 10).pressed(1, 100, 10),
            TouchFrame::new().held(0, 10, 40).held(1, 100, 10),
        ],
    );

    assert_eq!(tracker.pinch(), None);
    let pan = tracker.two_finger_pan().expect("pan");
    assert!(pan.is_vertical());
    assert!(!pan.is_horizontal());
    assert_eq!((pan.origin_x, pan.origin_y), (10, 10));
    assert_eq!((pan.last_x, pan.last_y), (10, 40));
}

#[test]
fn three_fingers_never_pinch_or_pan() {
    let tracker = TouchTracker::new();
    run(
        &tracker,
        [
            TouchFrame::new()
                .pressed(0, 0, 0)
                .pressed(1, 100, 0)
                .pressed(2, 200, 0),
            TouchFrame::new().held(0, 90, 0).held(1, 100, 90).held(2, 110, 0),
            TouchFrame::new().held(0, 95, 50).held(1, 100, 200).held(2, 300, 0),
        ],
    );

    assert!(tracker.is_touching_three());
    assert!(!tracker.is_touching_two());
    assert!(!tracker.is_touching_one());
    assert!(tracker.is_touching());
    assert_eq!(tracker.pinch(), None);
    assert_eq!(tracker.two_finger_pan(), None);
}

#[test]
fn tap_arity_must_match() {
    let tracker = TouchTracker::new();
    run(
        &tracker,
        [
            TouchFrame::new().pressed(0, 1, 1).pressed(1, 40, 1),
            TouchFrame::new(),
        ],
    );
    assert_eq!(tracker.tapped_one(), None);
    assert_eq!(
        tracker.tapped_two(),
        Some((Tap { x: 1, y: 1 }, Tap { x: 40, y: 1 }))
    );
    assert_eq!(tracker.tapped_three(), None);

    run(
        &tracker,
        [
            TouchFrame::new()
                .pressed(5, 1, 1)
                .pressed(6, 40, 1)
                .pressed(7, 80, 1),
            TouchFrame::new(),
        ],
    );
    assert_eq!(tracker.tapped_two(), None);
    assert_eq!(
        tracker.tapped_three(),
        Some((Tap { x: 1, y: 1 }, Tap { x: 40, y: 1 }, Tap { x: 80, y: 1 }))
    );
}

#[test]
fn releasing_a_participant_tears_down_in_the_same_frame() {
    let tracker = TouchTracker::new();
    run(
        &tracker,
        [
            TouchFrame::new().pressed(0, 100, 100).pressed(1, 200, 100),
            TouchFrame::new().held(0, 150, 100).held(1, 160, 100),
        ],
    );
    assert!(tracker.pinch().is_some());

    tracker.update(&TouchFrame::new().held(1, 160, 100));
    assert_eq!(tracker.pinch(), None);
    assert!(tracker.taps().is_empty());
    assert!(tracker.is_touching_one());
}

#[test]
fn queries_are_repeatable_within_a_frame() {
    let tracker = TouchTracker::new();
    run(
        &tracker,
        [
            TouchFrame::new().pressed(0, 10, 10).pressed(1, 100, 10),
            TouchFrame::new().held(0, 30, 10).held(1, 120, 10),
            TouchFrame::new().held(1, 125, 10),
        ],
    );
    let first = tracker.snapshot();
    let second = tracker.snapshot();
    assert_eq!(first, second);
    assert_eq!(tracker.tapped_one(), tracker.tapped_one());
    assert_eq!(tracker.first_touch_position(), tracker.first_touch_position());
    assert_eq!(tracker.two_finger_pan(), tracker.two_finger_pan());
}

#[test]
fn invariants_hold_over_a_long_session() {
    let tracker = TouchTracker::new();
    let mut frames = Vec::new();
    for i in 0..200i32 {
        let mut frame = TouchFrame::new();
        // Finger 0 stays down throughout, the others come and go.
        frame = frame.held(0, i % 37, (i * 3) % 41);
        if i % 50 < 30 {
            frame = frame.held(1, 200 - (i % 50) * 4, 100);
        }
        if i % 70 > 55 {
            frame = frame.held(2, 300, 300 + i % 13);
        }
        frames.push(frame);
    }

    for frame in &frames {
        tracker.update(frame);
        let snapshot = tracker.snapshot();
        assert_consistent(&snapshot, frame);
        assert_eq!(snapshot.touch_count, frame.len());
    }
}

#[test]
fn concurrent_readers_see_consistent_frames() {
    let tracker = TouchTracker::new();
    let done = AtomicBool::new(false);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                while !done.load(Ordering::Acquire) {
                    let snapshot = tracker.snapshot();
                    assert!(snapshot.pinch.is_none() || snapshot.pan.is_none());
                    assert!(snapshot.touch_count <= 2);
                    if snapshot.pinch.is_some() || snapshot.pan.is_some() {
                        assert_eq!(snapshot.touch_count, 2);
                    }
                }
            });
        }

        for round in 0..500 {
            let spread = round % 40;
            tracker.update(&TouchFrame::new().pressed(0, 100, 100).pressed(1, 200, 100));
            tracker.update(&TouchFrame::new().held(0, 100 + spread, 100).held(1, 200, 100));
            tracker.update(
                &TouchFrame::new()
                    .held(0, 100 + spread, 100 + spread)
                    .held(1, 200, 100 + spread),
            );
            tracker.update(&TouchFrame::new());
        }
        done.store(true, Ordering::Release);
    });

    assert_eq!(tracker.frame(), 2000);
    assert!(!tracker.is_touching());
}
