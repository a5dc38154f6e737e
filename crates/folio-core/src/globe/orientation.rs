use std::f64::consts::FRAC_PI_2;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::scene::GeoPoint;

/// Longitude that faces the camera at zero yaw.
pub const REFERENCE_MERIDIAN_DEG: f64 = 10.0;

/// Latitude is halved so the camera never pitches all the way to a pole.
pub const PITCH_DAMPING: f64 = 0.5;

/// Pitch is kept within a quarter turn either way.
pub const PITCH_LIMIT: f64 = FRAC_PI_2;

/// Rotation of the globe in radians. Yaw turns around the vertical axis,
/// pitch tilts toward or away from the viewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub yaw: f64,
    pub pitch: f64,
}

impl Orientation {
    pub const ZERO: Orientation = Orientation { yaw: 0.0, pitch: 0.0 };

    pub fn new(yaw: f64, pitch: f64) -> Self {
        Self { yaw, pitch }
    }

    /// Orientation that brings `point` to the front of the globe.
    pub fn facing(point: GeoPoint) -> Self {
        Self {
            yaw: (REFERENCE_MERIDIAN_DEG - point.lng).to_radians(),
            pitch: point.lat.to_radians() * PITCH_DAMPING,
        }
    }

    pub fn with_clamped_pitch(self) -> Self {
        Self {
            yaw: self.yaw,
            pitch: self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
        }
    }

    pub(crate) fn as_vec(self) -> DVec2 {
        DVec2::new(self.yaw, self.pitch)
    }

    pub(crate) fn from_vec(v: DVec2) -> Self {
        Self { yaw: v.x, pitch: v.y }
    }
}
