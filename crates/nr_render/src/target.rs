//! The drawing surface seen by everything above this crate.
//!
//! Coordinates are screen pixels, y down. Effects and the avatar draw through
//! `&mut dyn RenderTarget`; only the compositor needs the concrete type to
//! allocate and blit layers.

use crate::color::Rgba;
use glam::Vec2;
use nr_core::Rect;

pub trait RenderTarget {
    fn size(&self) -> (u32, u32);

    fn clear(&mut self, color: Rgba);

    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    fn stroke_rect(&mut self, rect: Rect, color: Rgba, width: f32);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba, width: f32);

    fn polyline(&mut self, points: &[Vec2], color: Rgba, width: f32);

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba);

    fn line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.polyline(&[from, to], color, width);
    }

    /// A cleared, fully transparent surface of the same size.
    fn transparent_layer(&self) -> Self
    where
        Self: Sized;

    /// Composites `layer` over this surface, shifted by `offset`, with its
    /// alpha multiplied by `alpha`.
    fn blit(&mut self, layer: &Self, offset: Vec2, alpha: f32)
    where
        Self: Sized;
}
