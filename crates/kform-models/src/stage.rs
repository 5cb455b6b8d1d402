//! Stage geometry used by the formation editor.
//!
//! Formation coordinates are unclamped percentages. The editor clamps them
//! differently depending on the input method: dragging keeps icons inside a
//! visible margin, numeric input allows the full stage.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A point on the stage in percentage coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct StagePoint {
    pub x: f64,
    pub y: f64,
}

impl StagePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Inclusive clamp range applied to both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageBounds {
    pub min: f64,
    pub max: f64,
}

impl StageBounds {
    /// Bounds for drag handles, keeping icons on screen.
    pub const DRAG: StageBounds = StageBounds { min: 5.0, max: 95.0 };

    /// Bounds for numeric coordinate input.
    pub const INPUT: StageBounds = StageBounds { min: 0.0, max: 100.0 };

    pub fn clamp_value(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn clamp(&self, point: StagePoint) -> StagePoint {
        StagePoint::new(self.clamp_value(point.x), self.clamp_value(point.y))
    }
}

/// Pixel rectangle of the rendered stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Convert a pointer position in pixels to a drag-clamped stage point.
///
/// Returns `None` for a zero-sized stage.
pub fn pointer_to_stage(pointer_x: f64, pointer_y: f64, rect: StageRect) -> Option<StagePoint> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let x = (pointer_x - rect.left) / rect.width * 100.0;
    let y = (pointer_y - rect.top) / rect.height * 100.0;
    Some(StageBounds::DRAG.clamp(StagePoint::new(x, y)))
}

/// Step a coordinate by `delta` from its rounded value, clamped to the input range.
pub fn nudge(value: f64, delta: f64) -> f64 {
    StageBounds::INPUT.clamp_value(value.round() + delta)
}

/// Default spot for the member at `index` in a freshly added formation.
pub fn default_formation_slot(index: usize) -> StagePoint {
    StagePoint::new(50.0, 30.0 + index as f64 * 15.0)
}

/// Spot given to a member added after formations already exist.
pub const NEW_MEMBER_SLOT: StagePoint = StagePoint { x: 50.0, y: 50.0 };

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_bounds() {
        let p = StageBounds::DRAG.clamp(StagePoint::new(-10.0, 99.0));
        assert_eq!(p, StagePoint::new(5.0, 95.0));
    }

    #[test]
    fn test_pointer_to_stage() {
        let rect = StageRect { left: 100.0, top: 50.0, width: 400.0, height: 200.0 };
        assert_eq!(pointer_to_stage(300.0, 150.0, rect), Some(StagePoint::new(50.0, 50.0)));
        assert_eq!(pointer_to_stage(0.0, 400.0, rect), Some(StagePoint::new(5.0, 95.0)));
        let empty = StageRect { width: 0.0, ..rect };
        assert_eq!(pointer_to_stage(10.0, 10.0, empty), None);
    }

    #[test]
    fn test_nudge() {
        assert_eq!(nudge(49.6, 1.0), 51.0);
        assert_eq!(nudge(99.0, 10.0), 100.0);
        assert_eq!(nudge(2.0, -10.0), 0.0);
    }

    #[test]
    fn test_default_slots() {
        assert_eq!(default_formation_slot(0), StagePoint::new(50.0, 30.0));
        assert_eq!(default_formation_slot(2), StagePoint::new(50.0, 60.0));
    }
}
