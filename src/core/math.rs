// Screen-space geometry helpers

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen pixels
///
/// The covered area is half-open: `[x, x + width) × [y, y + height)`.
/// Non-positive sizes are allowed and simply cover nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check whether a point lies inside the rectangle
    pub fn contains(&self, point: IVec2) -> bool {
        // i64 so that x + width cannot overflow near i32::MAX
        let (px, py) = (i64::from(point.x), i64::from(point.y));
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        px >= x
            && px < x + i64::from(self.width)
            && py >= y
            && py < y + i64::from(self.height)
    }
}

/// Width of the filled part of a progress bar after `stage` of `total` stages
///
/// Rounds down, and clamps `stage` to `total`.
pub fn filled_width(max_width: u32, stage: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let stage = stage.min(total);
    (u64::from(max_width) * u64::from(stage) / u64::from(total)) as u32
}
