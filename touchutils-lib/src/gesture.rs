use serde::Serialize;

/// Stable identifier of one finger from press to release.
pub type TouchId = u32;

/// Release position of a short, low-movement touch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Tap {
    pub x: i32,
    pub y: i32,
}

/// Two fingers moving closer together or farther apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pinch {
    pub id1: TouchId,
    pub id2: TouchId,
    /// Distance between the two touches' press positions.
    pub origin_distance: f64,
    /// Distance between the two touches this frame.
    pub distance: f64,
    pub center_x: i32,
    pub center_y: i32,
}

impl Pinch {
    pub fn is_inward(&self) -> bool {
        self.origin_distance > self.distance
    }

    pub fn is_outward(&self) -> bool {
        self.origin_distance < self.distance
    }

    /// Ratio of the current distance to the press distance.
    pub fn scale(&self) -> f64 {
        if self.origin_distance == 0.0 {
            1.0
        } else {
            self.distance / self.origin_distance
        }
    }

    pub fn involves(&self, id: TouchId) -> bool {
        self.id1 == id || self.id2 == id
    }
}

/// Two fingers moving together along one axis.
///
/// `id1` is the reference touch: origin and last positions are its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TwoFingerPan {
    pub id1: TouchId,
    pub id2: TouchId,
    pub origin_x: i32,
    pub origin_y: i32,
    pub last_x: i32,
    pub last_y: i32,
    pub(crate) horizontal: bool,
}

impl TwoFingerPan {
    pub fn is_horizontal(&self) -> bool {
        self.horizontal
    }

    pub fn is_vertical(&self) -> bool {
        !self.horizontal
    }

    /// Signed travel of the reference touch along the pan axis.
    pub fn offset(&self) -> i32 {
        if self.horizontal {
            self.last_x - self.origin_x
        } else {
            self.last_y - self.origin_y
        }
    }

    pub fn involves(&self, id: TouchId) -> bool {
        self.id1 == id || self.id2 == id
    }
}

/// Distance between points a and b in 1d space.
pub(crate) fn distance(a: i32, b: i32) -> f64 {
    (f64::from(a) - f64::from(b)).abs()
}

/// Distance between points a and b in 2d space.
pub(crate) fn distance2d(a: (i32, i32), b: (i32, i32)) -> f64 {
    let x = distance(a.0, b.0);
    let y = distance(a.1, b.1);
    (x * x + y * y).sqrt()
}

pub(crate) fn midpoint(a: (i32, i32), b: (i32, i32)) -> (i32, i32) {
    let mid = |a: i32, b: i32| ((i64::from(a) + i64::from(b)) / 2) as i32;
    (mid(a.0, b.0), mid(a.1, b.1))
}
