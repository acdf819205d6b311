//! Rescue container wall geometry
//!
//! Walls are immutable value objects in physics space. Moving the container
//! produces a fresh layout rather than editing endpoints in place.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{WALL_ELASTICITY, WALL_FRICTION, WALL_THICKNESS};

/// A static line segment with a collision radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    /// First endpoint (physics units)
    pub a: Vec2,
    /// Second endpoint (physics units)
    pub b: Vec2,
    /// Collision radius around the segment
    pub thickness: f32,
    pub friction: f32,
    pub elasticity: f32,
}

impl WallSegment {
    /// Segment with the rescue container's material
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            a,
            b,
            thickness: WALL_THICKNESS,
            friction: WALL_FRICTION,
            elasticity: WALL_ELASTICITY,
        }
    }
}

/// Which side of the open-top box a wall forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallSide {
    Left,
    Right,
    Bottom,
}

/// The three walls of an open-top box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallLayout {
    pub left: WallSegment,
    pub right: WallSegment,
    pub bottom: WallSegment,
}

impl WallLayout {
    /// Build the box around `center` with the given half extents (physics units)
    pub fn around(center: Vec2, half_extents: Vec2) -> Self {
        let (hw, hh) = (half_extents.x, half_extents.y);
        let bottom_left = Vec2::new(center.x - hw, center.y - hh);
        let top_left = Vec2::new(center.x - hw, center.y + hh);
        let bottom_right = Vec2::new(center.x + hw, center.y - hh);
        let top_right = Vec2::new(center.x + hw, center.y + hh);

        Self {
            left: WallSegment::new(bottom_left, top_left),
            right: WallSegment::new(bottom_right, top_right),
            bottom: WallSegment::new(bottom_left, bottom_right),
        }
    }

    pub fn get(&self, side: WallSide) -> &WallSegment {
        match side {
            WallSide::Left => &self.left,
            WallSide::Right => &self.right,
            WallSide::Bottom => &self.bottom,
        }
    }

    /// Center of the box, read back from the wall endpoints
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left.a.x + self.right.a.x) / 2.0,
            (self.left.a.y + self.left.b.y) / 2.0,
        )
    }

    /// Interior bounding box spanned by the walls
    pub fn bounds(&self) -> ContainerBounds {
        ContainerBounds {
            left: self.left.a.x,
            right: self.right.a.x,
            bottom: self.bottom.a.y,
            top: self.left.b.y,
        }
    }
}

/// Axis-aligned interior of the container (physics units, Y up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl ContainerBounds {
    /// Inclusive containment test on all four sides
    pub fn contains(&self, p: Vec2) -> bool {
        self.left <= p.x && p.x <= self.right && self.bottom <= p.y && p.y <= self.top
    }

    /// Snap a point onto the nearest edge of any bound it crosses
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        let mut out = p;
        if out.x < self.left {
            out.x = self.left;
        } else if out.x > self.right {
            out.x = self.right;
        }
        if out.y > self.top {
            out.y = self.top;
        } else if out.y < self.bottom {
            out.y = self.bottom;
        }
        out
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) / 2.0,
            (self.bottom + self.top) / 2.0,
        )
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.right - self.left, self.top - self.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> WallLayout {
        WallLayout::around(Vec2::new(5.0, 5.0), Vec2::new(1.0, 2.0))
    }

    #[test]
    fn test_layout_endpoints() {
        let layout = unit_box();
        assert_eq!(layout.left.a, Vec2::new(4.0, 3.0));
        assert_eq!(layout.left.b, Vec2::new(4.0, 7.0));
        assert_eq!(layout.right.a, Vec2::new(6.0, 3.0));
        assert_eq!(layout.bottom.b, Vec2::new(6.0, 3.0));
        assert_eq!(layout.bottom.thickness, WALL_THICKNESS);
        assert_eq!(layout.left.friction, 0.5);
        assert_eq!(layout.right.elasticity, 0.5);
    }

    #[test]
    fn test_layout_center_matches_input() {
        let layout = unit_box();
        assert_eq!(layout.center(), Vec2::new(5.0, 5.0));
        assert_eq!(layout.bounds().center(), Vec2::new(5.0, 5.0));
        assert_eq!(layout.bounds().size(), Vec2::new(2.0, 4.0));
    }

    #[test]
    fn test_bounds_inclusive_edges() {
        let bounds = unit_box().bounds();
        assert!(bounds.contains(Vec2::new(4.0, 3.0)));
        assert!(bounds.contains(Vec2::new(6.0, 7.0)));
        assert!(!bounds.contains(Vec2::new(6.01, 5.0)));
        assert!(!bounds.contains(Vec2::new(5.0, 2.99)));
    }

    #[test]
    fn test_clamp_snaps_to_edges() {
        let bounds = unit_box().bounds();
        assert_eq!(bounds.clamp(Vec2::new(0.0, 10.0)), Vec2::new(4.0, 7.0));
        assert_eq!(bounds.clamp(Vec2::new(9.0, -1.0)), Vec2::new(6.0, 3.0));
        let inside = Vec2::new(5.5, 4.0);
        assert_eq!(bounds.clamp(inside), inside);
    }
}
