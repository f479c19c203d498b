use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::source::TouchFrame;
use crate::tracker::{GestureSnapshot, TouchTracker};

/// A recorded sequence of frames, stored as JSON:
///
/// ```json
/// { "frames": [ { "touches": [ { "id": 0, "x": 100, "y": 100, "just_pressed": true } ] } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchTrace {
    #[serde(default)]
    pub frames: Vec<TouchFrame>,
}

impl TouchTrace {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading touch trace from {}", path.display());
        let raw = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let trace: Self = serde_json::from_str(raw)?;
        let frames: Vec<TouchFrame> = trace.frames.into_iter().map(TouchFrame::dedup).collect();
        debug!("Loaded {} frames", frames.len());
        Ok(Self { frames })
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn push(&mut self, frame: TouchFrame) {
        self.frames.push(frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Feeds every frame to `tracker`, yielding the gesture state after each one.
    pub fn replay<'a>(
        &'a self,
        tracker: &'a TouchTracker,
    ) -> impl Iterator<Item = GestureSnapshot> + 'a {
        self.frames.iter().map(move |frame| {
            tracker.update(frame);
            tracker.snapshot()
        })
    }
}
