use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Strict overlap: touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Like `intersects`, but a shared edge counts as contact. A player
    /// standing exactly on a platform touches its top edge.
    pub fn touches(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }

    pub fn translated(&self, offset: Vec2) -> Rect {
        Rect::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }

    /// Bounding box of a `w`x`h` box that moved vertically from `y0` to `y1`
    /// at horizontal position `x`.
    pub fn swept_vertical(x: f32, y0: f32, y1: f32, w: f32, h: f32) -> Rect {
        let top = y0.min(y1);
        let bottom = y0.max(y1) + h;
        Rect::new(x, top, w, bottom - top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_and_center() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn shared_edge_touches_but_does_not_intersect() {
        let player = Rect::new(0.0, 0.0, 30.0, 30.0);
        let floor = Rect::new(-100.0, 30.0, 400.0, 50.0);
        assert!(!player.intersects(&floor));
        assert!(player.touches(&floor));
    }

    #[test]
    fn swept_rect_covers_both_positions() {
        let swept = Rect::swept_vertical(5.0, 100.0, 40.0, 30.0, 30.0);
        assert_eq!(swept.top(), 40.0);
        assert_eq!(swept.bottom(), 130.0);
        assert_eq!(swept.x, 5.0);
    }
}
