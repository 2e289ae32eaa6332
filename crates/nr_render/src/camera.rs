use glam::Vec2;
use nr_core::Rect;

/// Fixed viewport over a world that scrolls itself leftward. The camera never
/// moves; scrolling is applied to world objects by the simulation, and the
/// camera only contributes a transient draw offset (screen shake).
#[derive(Debug, Clone, Copy)]
pub struct Camera2D {
    pub viewport: (u32, u32),
    pub offset: Vec2,
}

impl Camera2D {
    pub fn new(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            viewport: (viewport_width, viewport_height),
            offset: Vec2::ZERO,
        }
    }

    pub fn left(&self) -> f32 {
        0.0
    }

    pub fn right(&self) -> f32 {
        self.viewport.0 as f32
    }

    pub fn bottom(&self) -> f32 {
        self.viewport.1 as f32
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.right(), self.bottom())
    }

    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        p + self.offset
    }

    /// Cheap reject for draw culling, with a slack border.
    pub fn is_visible(&self, rect: &Rect, slack: f32) -> bool {
        rect.right() >= -slack
            && rect.left() <= self.right() + slack
            && rect.bottom() >= -slack
            && rect.top() <= self.bottom() + slack
    }
}
