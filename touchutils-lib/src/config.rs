use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Where a pinch reports its center while the gesture is in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinchCenter {
    /// Midpoint of the two touches on the frame the pinch was recognized.
    #[default]
    Fixed,
    /// Midpoint of the two touches on the current frame.
    Follow,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TapConfig {
    pub max_frames: u32,
    pub max_travel: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PinchConfig {
    pub threshold: f64,
    pub center: PinchCenter,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanConfig {
    pub threshold: f64,
}

/// Thresholds used by [`TouchTracker`](crate::TouchTracker).
///
/// Durations are counted in frames, so `tap.max_frames` has to be scaled with the host's
/// update rate: 30 frames is roughly half a second at 60 updates per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    pub tap: TapConfig,
    pub pinch: PinchConfig,
    pub pan: PanConfig,
}

impl TapConfig {
    pub const fn default() -> Self {
        Self {
            max_frames: 30,
            max_travel: 2.0,
        }
    }
}

impl PinchConfig {
    pub const fn default() -> Self {
        Self {
            threshold: 10.0,
            center: PinchCenter::Fixed,
        }
    }
}

impl PanConfig {
    pub const fn default() -> Self {
        Self { threshold: 10.0 }
    }
}

impl TrackerConfig {
    pub const fn default() -> Self {
        Self {
            tap: TapConfig::default(),
            pinch: PinchConfig::default(),
            pan: PanConfig::default(),
        }
    }

    pub fn load(filename: impl AsRef<Path>) -> Result<Self> {
        let path = filename.as_ref();
        debug!("Reading tracker config from {}", path.display());
        let raw = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        debug!("Using tracker config: {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=3600).contains(&self.tap.max_frames) {
            return Err(Error::InvalidConfig {
                key: "tap.max_frames",
                reason: format!("{} is outside 1..=3600", self.tap.max_frames),
            });
        }
        check_distance("tap.max_travel", self.tap.max_travel)?;
        check_distance("pinch.threshold", self.pinch.threshold)?;
        check_distance("pan.threshold", self.pan.threshold)?;
        Ok(())
    }
}

fn check_distance(key: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig {
            key,
            reason: format!("{value} is not a finite, non-negative distance"),
        })
    }
}

impl Default for TapConfig {
    fn default() -> Self {
        Self::default()
    }
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self::default()
    }
}

impl Default for PanConfig {
    fn default() -> Self {
        Self::default()
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::default()
    }
}
