//! Disc selector geometry.
//!
//! The selector handle is positioned by its top-left corner (`left`, `top`)
//! inside a square widget. With radius `r`, the handle at `(r, r)` is the
//! centre of the disc and maps to the answer `0,0`.
//!
//! Two quirks are kept on purpose:
//!
//! - the drag clamp fixes `x` first and then limits `|y|` to the circle at
//!   that `x`. Points outside the disc are pulled vertically onto the rim,
//!   not to the nearest rim point.
//! - click-to-jump accepts presses within `disc_hit_radius` (135) of the
//!   widget centre and does not clamp, so a click near the rim can store a
//!   component slightly beyond 1.

use serde::{Deserialize, Serialize};

use crate::answer::{AnswerValue, DiscPoint};
use crate::config::WidgetConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandlePosition {
    pub left: f64,
    pub top: f64,
}

impl HandlePosition {
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscSelector {
    radius: f64,
    hit_radius: f64,
    handle_offset: f64,
}

impl DiscSelector {
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            radius: config.disc_radius,
            hit_radius: config.disc_hit_radius,
            handle_offset: config.handle_center_offset,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Local coordinates of a handle position, y pointing up.
    fn to_local(&self, pos: HandlePosition) -> (f64, f64) {
        (pos.left - self.radius, -(pos.top - self.radius))
    }

    /// Applied on every drag step.
    pub fn constrain(&self, pos: HandlePosition) -> HandlePosition {
        let r = self.radius;
        let (x, y) = self.to_local(pos);

        let x = x.clamp(-r, r);
        let limit = (r * r - x * x).max(0.0).sqrt();
        let y = y.abs().min(limit).copysign(if y < 0.0 { -1.0 } else { 1.0 });

        HandlePosition {
            left: x + r,
            top: -y + r,
        }
    }

    pub fn point_at(&self, pos: HandlePosition) -> DiscPoint {
        let (x, y) = self.to_local(pos);
        DiscPoint::new(x / self.radius, y / self.radius)
    }

    pub fn answer_at(&self, pos: HandlePosition) -> AnswerValue {
        AnswerValue::Point(self.point_at(pos))
    }

    /// Handle position for a press at widget offset `(offset_x, offset_y)`,
    /// or `None` when the press falls outside the hit circle.
    pub fn jump_to(&self, offset_x: f64, offset_y: f64) -> Option<HandlePosition> {
        let centre = self.radius + self.handle_offset;
        let dx = offset_x - centre;
        let dy = -(offset_y - centre);
        if (dx * dx + dy * dy).sqrt() >= self.hit_radius {
            return None;
        }
        Some(HandlePosition {
            left: offset_x - self.handle_offset,
            top: offset_y - self.handle_offset,
        })
    }

    /// Inverse of [`point_at`](Self::point_at).
    pub fn position_for(&self, point: DiscPoint) -> HandlePosition {
        HandlePosition {
            left: point.x * self.radius + self.radius,
            top: -point.y * self.radius + self.radius,
        }
    }
}

impl Default for DiscSelector {
    fn default() -> Self {
        Self::new(&WidgetConfig::default())
    }
}
