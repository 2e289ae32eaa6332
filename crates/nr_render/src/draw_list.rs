use crate::color::Rgba;
use crate::target::RenderTarget;
use glam::Vec2;
use nr_core::Rect;

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear(Rgba),
    FillRect {
        rect: Rect,
        color: Rgba,
    },
    StrokeRect {
        rect: Rect,
        color: Rgba,
        width: f32,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        color: Rgba,
        width: f32,
    },
    Polyline {
        points: Vec<Vec2>,
        color: Rgba,
        width: f32,
    },
    FillPolygon {
        points: Vec<Vec2>,
        color: Rgba,
    },
    Layer {
        offset: Vec2,
        alpha: f32,
        commands: Vec<DrawCmd>,
    },
}

impl DrawCmd {
    pub fn color(&self) -> Option<Rgba> {
        match self {
            DrawCmd::Clear(color)
            | DrawCmd::FillRect { color, .. }
            | DrawCmd::StrokeRect { color, .. }
            | DrawCmd::FillCircle { color, .. }
            | DrawCmd::StrokeCircle { color, .. }
            | DrawCmd::Polyline { color, .. }
            | DrawCmd::FillPolygon { color, .. } => Some(*color),
            DrawCmd::Layer { .. } => None,
        }
    }
}

/// Render target that records commands instead of producing pixels. Used for
/// headless runs and for asserting on draw output in tests.
#[derive(Debug, Clone)]
pub struct DrawList {
    width: u32,
    height: u32,
    commands: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All commands with nested layers flattened, in paint order.
    pub fn flattened(&self) -> Vec<&DrawCmd> {
        fn walk<'a>(cmds: &'a [DrawCmd], out: &mut Vec<&'a DrawCmd>) {
            for cmd in cmds {
                match cmd {
                    DrawCmd::Layer { commands, .. } => walk(commands, out),
                    other => out.push(other),
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.commands, &mut out);
        out
    }
}

impl RenderTarget for DrawList {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Rgba) {
        // Everything before a clear is invisible.
        self.commands.clear();
        self.commands.push(DrawCmd::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCmd::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba, width: f32) {
        self.commands.push(DrawCmd::StrokeRect { rect, color, width });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCmd::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba, width: f32) {
        self.commands.push(DrawCmd::StrokeCircle {
            center,
            radius,
            color,
            width,
        });
    }

    fn polyline(&mut self, points: &[Vec2], color: Rgba, width: f32) {
        self.commands.push(DrawCmd::Polyline {
            points: points.to_vec(),
            color,
            width,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        self.commands.push(DrawCmd::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn transparent_layer(&self) -> Self {
        DrawList::new(self.width, self.height)
    }

    fn blit(&mut self, layer: &Self, offset: Vec2, alpha: f32) {
        if layer.is_empty() {
            return;
        }
        self.commands.push(DrawCmd::Layer {
            offset,
            alpha,
            commands: layer.commands.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_discards_earlier_commands() {
        let mut list = DrawList::new(100, 100);
        list.fill_circle(Vec2::ZERO, 4.0, Rgba::WHITE);
        list.clear(Rgba::BLACK);
        assert_eq!(list.commands(), &[DrawCmd::Clear(Rgba::BLACK)]);
    }

    #[test]
    fn blit_nests_layer_and_flatten_unwraps_it() {
        let mut base = DrawList::new(100, 100);
        let mut layer = base.transparent_layer();
        layer.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), Rgba::WHITE);
        base.blit(&layer, Vec2::new(3.0, -2.0), 1.0);

        assert!(matches!(
            base.commands()[0],
            DrawCmd::Layer { offset, .. } if offset == Vec2::new(3.0, -2.0)
        ));
        assert_eq!(base.flattened().len(), 1);
    }

    #[test]
    fn empty_layer_blit_records_nothing() {
        let mut base = DrawList::new(10, 10);
        let layer = base.transparent_layer();
        base.blit(&layer, Vec2::ZERO, 1.0);
        assert!(base.is_empty());
    }
}
