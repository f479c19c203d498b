use serde::{Deserialize, Serialize};

use crate::gesture::TouchId;

/// One pressed touch as reported by the host for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTouch {
    pub id: TouchId,
    pub x: i32,
    pub y: i32,
    // set on the frame the finger went down
    #[serde(default)]
    pub just_pressed: bool,
    // frames since press, if the host counts them itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub press_duration: Option<u32>,
}

impl ActiveTouch {
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

/// All touches pressed during one frame, in host order. Ids are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchFrame {
    #[serde(default)]
    touches: Vec<ActiveTouch>,
}

impl TouchFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a touch, replacing any entry with the same id in place.
    pub fn push(&mut self, touch: ActiveTouch) {
        if let Some(existing) = self.touches.iter_mut().find(|t| t.id == touch.id) {
            *existing = touch;
        } else {
            self.touches.push(touch);
        }
    }

    /// A finger that went down this frame.
    pub fn pressed(mut self, id: TouchId, x: i32, y: i32) -> Self {
        self.push(ActiveTouch {
            id,
            x,
            y,
            just_pressed: true,
            press_duration: None,
        });
        self
    }

    /// A finger that was already down.
    pub fn held(mut self, id: TouchId, x: i32, y: i32) -> Self {
        self.push(ActiveTouch {
            id,
            x,
            y,
            just_pressed: false,
            press_duration: None,
        });
        self
    }

    pub fn get(&self, id: TouchId) -> Option<&ActiveTouch> {
        self.touches.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TouchId) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = TouchId> + '_ {
        self.touches.iter().map(|t| t.id)
    }

    pub fn touches(&self) -> &[ActiveTouch] {
        &self.touches
    }

    pub fn len(&self) -> usize {
        self.touches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.touches.is_empty()
    }

    /// Repairs a frame read from an external source, keeping the last entry for a duplicated id.
    pub(crate) fn dedup(self) -> Self {
        let mut frame = Self::new();
        for touch in self.touches {
            frame.push(touch);
        }
        frame
    }
}

impl FromIterator<ActiveTouch> for TouchFrame {
    fn from_iter<I: IntoIterator<Item = ActiveTouch>>(iter: I) -> Self {
        let mut frame = Self::new();
        for touch in iter {
            frame.push(touch);
        }
        frame
    }
}

// TouchSource trait.
// Note: implementors report what is pressed right now; releases are derived by the tracker.
pub trait TouchSource {
    // Returns every touch pressed this frame, in a stable host order.
    fn capture(&self) -> TouchFrame;
}

impl TouchSource for TouchFrame {
    fn capture(&self) -> TouchFrame {
        self.clone()
    }
}
