//! Geometry policy for free-form windows.
//!
//! Everything here is a pure function over small `Copy` value types: clamping
//! a window's origin into the viewport, flooring its size at the policy
//! minimum, and computing the maximize/restore transition. Inputs are never
//! rejected; out-of-range values are corrected.

use std::ops::{Add, Sub};

use crate::constants::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, RESERVED_BOTTOM};
use crate::window::WindowRecord;

/// Top-left corner of a window, in viewport pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Signed distance between two positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

impl Sub for Position {
    type Output = Offset;

    fn sub(self, rhs: Position) -> Offset {
        Offset {
            dx: self.x.saturating_sub(rhs.x),
            dy: self.y.saturating_sub(rhs.y),
        }
    }
}

impl Sub<Offset> for Position {
    type Output = Position;

    fn sub(self, rhs: Offset) -> Position {
        Position {
            x: self.x.saturating_sub(rhs.dx),
            y: self.y.saturating_sub(rhs.dy),
        }
    }
}

/// Window dimensions in pixels. Signed so that raw resize arithmetic can go
/// negative before it is clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl Add<Offset> for Size {
    type Output = Size;

    fn add(self, rhs: Offset) -> Size {
        Size {
            width: self.width.saturating_add(rhs.dx),
            height: self.height.saturating_add(rhs.dy),
        }
    }
}

/// The visible surface windows live in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Area left for windows once the bottom bar is carved out.
    pub fn work_area(&self, reserved_bottom: i32) -> Size {
        Size {
            width: self.width.max(0),
            height: self.height.saturating_sub(reserved_bottom.max(0)).max(0),
        }
    }
}

/// Position plus size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Geometry {
    pub position: Position,
    pub size: Size,
}

impl Geometry {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            position: Position::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.position.x
            && point.y >= self.position.y
            && point.x < self.position.x.saturating_add(self.size.width)
            && point.y < self.position.y.saturating_add(self.size.height)
    }
}

/// Tunable policy constants. The free functions in this module use
/// [`GeometryPolicy::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryPolicy {
    pub min_size: Size,
    pub reserved_bottom: i32,
}

impl Default for GeometryPolicy {
    fn default() -> Self {
        Self {
            min_size: Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT),
            reserved_bottom: RESERVED_BOTTOM,
        }
    }
}

impl GeometryPolicy {
    pub fn clamp_size(&self, size: Size) -> Size {
        Size {
            width: size.width.max(self.min_size.width),
            height: size.height.max(self.min_size.height),
        }
    }

    pub fn maximized_geometry(&self, viewport: Viewport) -> Geometry {
        maximized_geometry(viewport, self.reserved_bottom)
    }

    /// Geometry a window is laid out with: the maximized frame when
    /// maximized, its own free-form geometry otherwise.
    pub fn layout_geometry(&self, record: &WindowRecord, viewport: Viewport) -> Geometry {
        if record.is_maximized {
            self.maximized_geometry(viewport)
        } else {
            record.geometry()
        }
    }
}

/// Clamp a window origin so the window's top-left stays inside
/// `[0, viewport.width - size.width] x [0, viewport.height - size.height]`.
///
/// When the window is larger than the viewport on an axis, that axis pins to
/// zero.
pub fn clamp_position(pos: Position, size: Size, viewport: Viewport) -> Position {
    let max_x = viewport.width.saturating_sub(size.width).max(0);
    let max_y = viewport.height.saturating_sub(size.height).max(0);
    Position {
        x: pos.x.clamp(0, max_x),
        y: pos.y.clamp(0, max_y),
    }
}

pub fn clamp_size(size: Size) -> Size {
    GeometryPolicy::default().clamp_size(size)
}

/// Full viewport minus the bottom reservation, anchored at the origin.
pub fn maximized_geometry(viewport: Viewport, reserved_bottom: i32) -> Geometry {
    let area = viewport.work_area(reserved_bottom);
    Geometry::new(0, 0, area.width, area.height)
}

/// Flip a record between free-form and maximized.
///
/// Entering saves the current free-form geometry; leaving restores exactly
/// that snapshot and clears it, so toggling twice returns the original
/// record.
pub fn toggle_maximize(record: &WindowRecord) -> WindowRecord {
    let mut next = record.clone();
    if record.is_maximized {
        if let Some(saved) = record.pre_maximize_geometry {
            next.position = saved.position;
            next.size = saved.size;
        }
        next.pre_maximize_geometry = None;
        next.is_maximized = false;
    } else {
        next.pre_maximize_geometry = Some(record.geometry());
        next.is_maximized = true;
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowId;

    fn record_at(x: i32, y: i32, width: i32, height: i32) -> WindowRecord {
        let mut record = WindowRecord::new(WindowId(1), "Test", "app");
        record.position = Position::new(x, y);
        record.size = Size::new(width, height);
        record
    }

    #[test]
    fn clamp_position_pins_to_bounds() {
        let viewport = Viewport::new(1280, 800);
        let size = Size::new(400, 300);
        assert_eq!(
            clamp_position(Position::new(850, 700), size, viewport),
            Position::new(850, 500)
        );
        assert_eq!(
            clamp_position(Position::new(-20, -5), size, viewport),
            Position::new(0, 0)
        );
        assert_eq!(
            clamp_position(Position::new(2000, 10), size, viewport),
            Position::new(880, 10)
        );
    }

    #[test]
    fn clamp_position_window_larger_than_viewport() {
        let viewport = Viewport::new(300, 200);
        let pos = clamp_position(Position::new(50, 50), Size::new(400, 300), viewport);
        assert_eq!(pos, Position::new(0, 0));
    }

    #[test]
    fn clamp_size_floors_negative_and_small() {
        assert_eq!(clamp_size(Size::new(-50, -50)), Size::new(320, 240));
        assert_eq!(clamp_size(Size::new(500, 100)), Size::new(500, 240));
        assert_eq!(clamp_size(Size::new(900, 700)), Size::new(900, 700));
    }

    #[test]
    fn maximized_geometry_leaves_bottom_bar() {
        let geometry = maximized_geometry(Viewport::new(1280, 800), 64);
        assert_eq!(geometry, Geometry::new(0, 0, 1280, 736));
    }

    #[test]
    fn maximized_geometry_never_negative() {
        let geometry = maximized_geometry(Viewport::new(100, 40), 64);
        assert_eq!(geometry.size, Size::new(100, 0));
    }

    #[test]
    fn toggle_maximize_saves_and_restores() {
        let record = record_at(850, 500, 320, 240);
        let maximized = toggle_maximize(&record);
        assert!(maximized.is_maximized);
        assert_eq!(
            maximized.pre_maximize_geometry,
            Some(Geometry::new(850, 500, 320, 240))
        );
        let restored = toggle_maximize(&maximized);
        assert!(!restored.is_maximized);
        assert_eq!(restored.geometry(), Geometry::new(850, 500, 320, 240));
        assert_eq!(restored, record);
    }

    #[test]
    fn leaving_maximize_without_snapshot_keeps_geometry() {
        let mut record = record_at(10, 20, 400, 300);
        record.is_maximized = true;
        let restored = toggle_maximize(&record);
        assert!(!restored.is_maximized);
        assert_eq!(restored.geometry(), Geometry::new(10, 20, 400, 300));
    }

    #[test]
    fn layout_geometry_uses_maximized_frame() {
        let policy = GeometryPolicy::default();
        let viewport = Viewport::new(1280, 800);
        let record = record_at(100, 100, 400, 300);
        assert_eq!(policy.layout_geometry(&record, viewport), record.geometry());
        let maximized = toggle_maximize(&record);
        assert_eq!(
            policy.layout_geometry(&maximized, viewport),
            Geometry::new(0, 0, 1280, 736)
        );
    }

    #[test]
    fn geometry_contains_is_half_open() {
        let g = Geometry::new(10, 10, 5, 5);
        assert!(g.contains(Position::new(10, 10)));
        assert!(g.contains(Position::new(14, 14)));
        assert!(!g.contains(Position::new(15, 14)));
        assert!(!g.contains(Position::new(9, 12)));
    }
}
