use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Drawable extent in surface units. The origin is the top-left corner and Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Builds a viewport, rejecting negative or non-finite extents.
    pub fn checked(width: f64, height: f64) -> Result<Self> {
        let viewport = Self::new(width, height);
        if viewport.is_valid() {
            Ok(viewport)
        } else {
            Err(SimError::InvalidViewport { width, height })
        }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }

    /// Y coordinate a particle of `radius` rests at on the floor.
    pub fn floor(&self, radius: f64) -> f64 {
        self.height - radius
    }

    /// Largest X coordinate a particle of `radius` may occupy.
    pub fn right_wall(&self, radius: f64) -> f64 {
        self.width - radius
    }
}
