use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard};

use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::config::{PinchCenter, TrackerConfig};
use crate::gesture::{distance, distance2d, midpoint, Pinch, Tap, TouchId, TwoFingerPan};
use crate::source::{TouchFrame, TouchSource};
use crate::utils::RecoverPoison;

#[derive(Debug, Clone, Copy)]
struct TouchPoint {
    origin: (i32, i32),
    current: (i32, i32),
    duration: u32,
    pressed_at: u64,
    pinch: bool,
    pan: bool,
}

impl TouchPoint {
    fn new(position: (i32, i32), pressed_at: u64) -> Self {
        Self {
            origin: position,
            current: position,
            duration: 0,
            pressed_at,
            pinch: false,
            pan: false,
        }
    }

    fn travel(&self) -> f64 {
        distance2d(self.origin, self.current)
    }

    // (|dx|, |dy|) from the press position
    fn axis_travel(&self) -> (f64, f64) {
        (
            distance(self.origin.0, self.current.0),
            distance(self.origin.1, self.current.1),
        )
    }
}

// oldest press first, lower id on the same frame
fn press_order(id: TouchId, touch: &TouchPoint) -> (u64, TouchId) {
    (touch.pressed_at, id)
}

#[derive(Debug, Default)]
struct TrackerState {
    frame: u64,
    // active ids in host order
    touch_ids: Vec<TouchId>,
    touches: HashMap<TouchId, TouchPoint, ahash::RandomState>,
    pinch: Option<Pinch>,
    pan: Option<TwoFingerPan>,
    taps: Vec<Tap>,
}

impl TrackerState {
    fn step(&mut self, frame: &TouchFrame, config: &TrackerConfig) {
        self.frame += 1;
        self.taps.clear();

        // Released this frame: gone from the frame, or pressed again under the same id.
        let mut released: Vec<(TouchId, TouchPoint)> = self
            .touches
            .iter()
            .filter(|(id, _)| frame.get(**id).map_or(true, |t| t.just_pressed))
            .map(|(id, touch)| (*id, *touch))
            .collect();
        released.sort_by_key(|(id, touch)| press_order(*id, touch));
        for (id, touch) in released {
            self.release(id, &touch, config);
        }

        self.touch_ids.clear();
        for active in frame.touches() {
            let pressed_at = self.frame;
            let touch = self.touches.entry(active.id).or_insert_with(|| {
                trace!(id = active.id, x = active.x, y = active.y, "Touch pressed");
                TouchPoint::new(active.position(), pressed_at)
            });
            let counted = touch.duration.saturating_add(1);
            touch.duration = active.press_duration.unwrap_or(counted);
            touch.current = active.position();
            self.touch_ids.push(active.id);
        }

        // Pinch and pan are only recognized with exactly two fingers down.
        if self.touch_ids.len() == 2 {
            self.infer(config);
        }
    }

    fn release(&mut self, id: TouchId, touch: &TouchPoint, config: &TrackerConfig) {
        self.touches.remove(&id);

        if self.pinch.is_some_and(|p| p.involves(id)) {
            debug!(id, "Pinch ended");
            self.pinch = None;
        }
        if self.pan.is_some_and(|p| p.involves(id)) {
            debug!(id, "Pan ended");
            self.pan = None;
        }

        let tap = &config.tap;
        if !touch.pinch
            && !touch.pan
            && (touch.duration <= tap.max_frames || touch.travel() < tap.max_travel)
        {
            let (x, y) = touch.current;
            debug!(id, x, y, duration = touch.duration, "Tap");
            self.taps.push(Tap { x, y });
        } else {
            trace!(id, duration = touch.duration, "Touch released");
        }
    }

    fn designated_pair(&self) -> Option<(TouchId, TouchId)> {
        let [a, b] = self.touch_ids[..] else {
            return None;
        };
        let (ta, tb) = (self.touches.get(&a)?, self.touches.get(&b)?);
        if press_order(a, ta) <= press_order(b, tb) {
            Some((a, b))
        } else {
            Some((b, a))
        }
    }

    fn mark(&mut self, ids: [TouchId; 2], apply: impl Fn(&mut TouchPoint)) {
        for id in ids {
            if let Some(touch) = self.touches.get_mut(&id) {
                apply(touch);
            }
        }
    }

    fn infer(&mut self, config: &TrackerConfig) {
        let Some((id1, id2)) = self.designated_pair() else {
            return;
        };
        let (Some(t1), Some(t2)) = (
            self.touches.get(&id1).copied(),
            self.touches.get(&id2).copied(),
        ) else {
            return;
        };

        let origin_distance = distance2d(t1.origin, t2.origin);
        let curr_distance = distance2d(t1.current, t2.current);
        let spread_changed = (origin_distance - curr_distance).abs() > config.pinch.threshold;
        if let Some(pinch) = self.pinch.as_mut() {
            // Distance only moves while the spread differs from the press spread.
            if spread_changed {
                pinch.distance = curr_distance;
            }
            if config.pinch.center == PinchCenter::Follow {
                (pinch.center_x, pinch.center_y) = midpoint(t1.current, t2.current);
            }
        } else if self.pan.is_none() && spread_changed {
            self.mark([id1, id2], |t| t.pinch = true);
            let (center_x, center_y) = midpoint(t1.current, t2.current);
            debug!(id1, id2, origin_distance, curr_distance, "Pinch started");
            self.pinch = Some(Pinch {
                id1,
                id2,
                origin_distance,
                distance: curr_distance,
                center_x,
                center_y,
            });
        }

        if self.pinch.is_some() {
            return;
        }

        if let Some(pan) = self.pan.as_mut() {
            if let Some(reference) = self.touches.get(&pan.id1) {
                if pan.horizontal {
                    pan.last_x = reference.current.0;
                } else {
                    pan.last_y = reference.current.1;
                }
            }
            return;
        }

        // The finger that moved furthest along one axis leads the pan.
        let (d1, d2) = (t1.axis_travel(), t2.axis_travel());
        let (reference, partner, lead, (diff_x, diff_y)) = if d2.0.max(d2.1) > d1.0.max(d1.1) {
            (id2, id1, t2, d2)
        } else {
            (id1, id2, t1, d1)
        };
        let threshold = config.pan.threshold;
        if diff_x > threshold || diff_y > threshold {
            self.mark([reference, partner], |t| t.pan = true);
            let horizontal = diff_x > threshold;
            debug!(reference, partner, horizontal, "Pan started");
            self.pan = Some(TwoFingerPan {
                id1: reference,
                id2: partner,
                origin_x: lead.origin.0,
                origin_y: lead.origin.1,
                last_x: lead.current.0,
                last_y: lead.current.1,
                horizontal,
            });
        }
    }

    fn first_touch_position(&self) -> Option<(i32, i32)> {
        let id = self.touch_ids.first()?;
        self.touches.get(id).map(|t| t.current)
    }
}

fn taps_of<const N: usize>(taps: &[Tap]) -> Option<[Tap; N]> {
    <[Tap; N]>::try_from(taps).ok()
}

/// Every query result for one frame, read under a single lock acquisition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GestureSnapshot {
    pub frame: u64,
    pub touch_count: usize,
    pub first_touch: Option<(i32, i32)>,
    pub taps: Vec<Tap>,
    pub pinch: Option<Pinch>,
    pub pan: Option<TwoFingerPan>,
}

impl GestureSnapshot {
    pub fn tapped_one(&self) -> Option<Tap> {
        taps_of::<1>(&self.taps).map(|[a]| a)
    }

    pub fn tapped_two(&self) -> Option<(Tap, Tap)> {
        taps_of::<2>(&self.taps).map(|[a, b]| (a, b))
    }

    pub fn tapped_three(&self) -> Option<(Tap, Tap, Tap)> {
        taps_of::<3>(&self.taps).map(|[a, b, c]| (a, b, c))
    }
}

/// Frame-stepped gesture recognizer.
///
/// One caller drives [`update`](Self::update) once per host frame. Any number of threads may
/// query concurrently: queries share a read lock and never see a half-applied frame.
#[derive(Debug, Default)]
pub struct TouchTracker {
    config: TrackerConfig,
    state: RwLock<TrackerState>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TrackerConfig) -> Self {
        Self {
            config,
            state: RwLock::default(),
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Steps the tracker by one frame. Must be called exactly once per host frame, before
    /// that frame's queries.
    #[instrument(skip_all, fields(touches = frame.len()))]
    pub fn update(&self, frame: &TouchFrame) {
        let mut state = self.state.write().recover();
        state.step(frame, &self.config);
    }

    pub fn update_from<S: TouchSource + ?Sized>(&self, source: &S) {
        self.update(&source.capture());
    }

    fn read(&self) -> RwLockReadGuard<'_, TrackerState> {
        self.state.read().recover()
    }

    /// Number of `update` calls so far.
    pub fn frame(&self) -> u64 {
        self.read().frame
    }

    pub fn touch_count(&self) -> usize {
        self.read().touch_ids.len()
    }

    /// Returns if the screen is being touched at all.
    pub fn is_touching(&self) -> bool {
        self.touch_count() > 0
    }

    /// Returns if the screen is being touched with exactly one finger.
    pub fn is_touching_one(&self) -> bool {
        self.touch_count() == 1
    }

    /// Returns if the screen is being touched with exactly two fingers.
    pub fn is_touching_two(&self) -> bool {
        self.touch_count() == 2
    }

    /// Returns if the screen is being touched with exactly three fingers.
    pub fn is_touching_three(&self) -> bool {
        self.touch_count() == 3
    }

    /// All taps released on the last frame, oldest press first.
    pub fn taps(&self) -> Vec<Tap> {
        self.read().taps.clone()
    }

    /// Returns the tap if exactly one was released on the last frame.
    pub fn tapped_one(&self) -> Option<Tap> {
        taps_of::<1>(&self.read().taps).map(|[a]| a)
    }

    /// Returns both taps if exactly two were released on the last frame.
    pub fn tapped_two(&self) -> Option<(Tap, Tap)> {
        taps_of::<2>(&self.read().taps).map(|[a, b]| (a, b))
    }

    /// Returns all three taps if exactly three were released on the last frame.
    pub fn tapped_three(&self) -> Option<(Tap, Tap, Tap)> {
        taps_of::<3>(&self.read().taps).map(|[a, b, c]| (a, b, c))
    }

    /// The pinch in progress, if any. Its distance is refreshed every frame.
    pub fn pinch(&self) -> Option<Pinch> {
        self.read().pinch
    }

    /// The two-finger pan in progress, if any. Its last position is refreshed every frame.
    pub fn two_finger_pan(&self) -> Option<TwoFingerPan> {
        self.read().pan
    }

    /// Current position of the first touch in host order.
    pub fn first_touch_position(&self) -> Option<(i32, i32)> {
        self.read().first_touch_position()
    }

    pub fn snapshot(&self) -> GestureSnapshot {
        let state = self.read();
        GestureSnapshot {
            frame: state.frame,
            touch_count: state.touch_ids.len(),
            first_touch: state.first_touch_position(),
            taps: state.taps.clone(),
            pinch: state.pinch,
            pan: state.pan,
        }
    }
}
