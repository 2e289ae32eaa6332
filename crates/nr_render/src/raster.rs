//! CPU rasterizer over an `image::RgbaImage`.
//!
//! Shapes are filled by scanning their bounding box and testing pixel centers,
//! which is plenty for a few hundred primitives per frame and keeps the code
//! free of edge-case-heavy span logic. Blending is straight-alpha "over".

use crate::color::Rgba;
use crate::target::RenderTarget;
use glam::Vec2;
use image::{ImageBuffer, Rgba as Pixel, RgbaImage};
use nr_core::Rect;
use std::path::Path;

pub struct RasterTarget {
    image: RgbaImage,
}

impl RasterTarget {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: ImageBuffer::from_pixel(width, height, Pixel([0, 0, 0, 0])),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.image.width() || y >= self.image.height() {
            return None;
        }
        let [r, g, b, a] = self.image.get_pixel(x, y).0;
        Some(Rgba::new(r, g, b, a))
    }

    pub fn save_png(&self, path: &Path) -> Result<(), String> {
        self.image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
        log::debug!(
            "Saved {}x{} frame to {}",
            self.image.width(),
            self.image.height(),
            path.display()
        );
        Ok(())
    }

    fn blend(&mut self, x: i64, y: i64, color: Rgba) {
        if color.a == 0
            || x < 0
            || y < 0
            || x >= self.image.width() as i64
            || y >= self.image.height() as i64
        {
            return;
        }
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        dst.0 = over(color.to_array(), dst.0);
    }

    /// Pixel-center scan of a clipped box, blending wherever `inside` holds.
    fn scan<F>(&mut self, min: Vec2, max: Vec2, color: Rgba, inside: F)
    where
        F: Fn(Vec2) -> bool,
    {
        let (w, h) = (self.image.width() as f32, self.image.height() as f32);
        let x0 = min.x.floor().max(0.0) as i64;
        let y0 = min.y.floor().max(0.0) as i64;
        let x1 = max.x.ceil().min(w) as i64;
        let y1 = max.y.ceil().min(h) as i64;
        for y in y0..y1 {
            for x in x0..x1 {
                if inside(Vec2::new(x as f32 + 0.5, y as f32 + 0.5)) {
                    self.blend(x, y, color);
                }
            }
        }
    }
}

fn over(src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }
    let mix = |s: u8, d: u8| {
        let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    [
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ]
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

fn point_in_polygon(p: Vec2, points: &[Vec2]) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (pi, pj) = (points[i], points[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = pi.x + (p.y - pi.y) * (pj.x - pi.x) / (pj.y - pi.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

impl RenderTarget for RasterTarget {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn clear(&mut self, color: Rgba) {
        let px = Pixel(color.to_array());
        for p in self.image.pixels_mut() {
            *p = px;
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        if rect.w <= 0.0 || rect.h <= 0.0 {
            return;
        }
        let min = Vec2::new(rect.left(), rect.top());
        let max = Vec2::new(rect.right(), rect.bottom());
        self.scan(min, max, color, |_| true);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba, width: f32) {
        let w = width.max(1.0).min(rect.w.min(rect.h) * 0.5);
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, w), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - w, rect.w, w), color);
        self.fill_rect(Rect::new(rect.x, rect.y + w, w, rect.h - 2.0 * w), color);
        self.fill_rect(
            Rect::new(rect.right() - w, rect.y + w, w, rect.h - 2.0 * w),
            color,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let r_sq = radius * radius;
        self.scan(
            center - Vec2::splat(radius),
            center + Vec2::splat(radius),
            color,
            |p| p.distance_squared(center) <= r_sq,
        );
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba, width: f32) {
        if radius <= 0.0 {
            return;
        }
        let half = width.max(1.0) * 0.5;
        let outer = radius + half;
        self.scan(
            center - Vec2::splat(outer),
            center + Vec2::splat(outer),
            color,
            |p| (p.distance(center) - radius).abs() <= half,
        );
    }

    fn polyline(&mut self, points: &[Vec2], color: Rgba, width: f32) {
        let half = width.max(1.0) * 0.5;
        for seg in points.windows(2) {
            let (a, b) = (seg[0], seg[1]);
            self.scan(
                a.min(b) - Vec2::splat(half),
                a.max(b) + Vec2::splat(half),
                color,
                |p| distance_to_segment(p, a, b) <= half,
            );
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        if points.len() < 3 {
            return;
        }
        let (min, max) = points
            .iter()
            .fold((points[0], points[0]), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        self.scan(min, max, color, |p| point_in_polygon(p, points));
    }

    fn transparent_layer(&self) -> Self {
        RasterTarget::new(self.image.width(), self.image.height())
    }

    fn blit(&mut self, layer: &Self, offset: Vec2, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let (ox, oy) = (offset.x.round() as i64, offset.y.round() as i64);
        for (x, y, px) in layer.image.enumerate_pixels() {
            if px.0[3] == 0 {
                continue;
            }
            let color = Rgba::new(px.0[0], px.0[1], px.0[2], px.0[3]).fade(alpha);
            self.blend(x as i64 + ox, y as i64 + oy, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rect_writes_opaque_pixels_inside_only() {
        let mut target = RasterTarget::new(8, 8);
        target.fill_rect(Rect::new(2.0, 2.0, 3.0, 3.0), Rgba::WHITE);
        assert_eq!(target.pixel(3, 3), Some(Rgba::WHITE));
        assert_eq!(target.pixel(6, 6), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn half_alpha_over_black_gives_mid_grey() {
        let mut target = RasterTarget::new(2, 2);
        target.clear(Rgba::BLACK);
        target.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), Rgba::WHITE.with_alpha(128.0));
        let px = target.pixel(0, 0).unwrap_or_default();
        assert!((127..=129).contains(&px.r));
        assert_eq!(px.a, 255);
    }

    #[test]
    fn shapes_outside_surface_are_clipped() {
        let mut target = RasterTarget::new(4, 4);
        target.fill_circle(Vec2::new(-50.0, -50.0), 10.0, Rgba::WHITE);
        target.polyline(&[Vec2::new(100.0, 0.0), Vec2::new(200.0, 0.0)], Rgba::WHITE, 3.0);
        assert!(target.image().pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn blit_applies_offset() {
        let mut base = RasterTarget::new(8, 8);
        let mut layer = base.transparent_layer();
        layer.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Rgba::WHITE);
        base.blit(&layer, Vec2::new(3.0, 2.0), 1.0);
        assert_eq!(base.pixel(3, 2), Some(Rgba::WHITE));
        assert_eq!(base.pixel(0, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn polygon_fill_covers_interior() {
        let mut target = RasterTarget::new(10, 10);
        let tri = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)];
        target.fill_polygon(&tri, Rgba::WHITE);
        assert_eq!(target.pixel(1, 1), Some(Rgba::WHITE));
        assert_eq!(target.pixel(9, 9), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn saved_png_reads_back_with_same_pixels() {
        let mut target = RasterTarget::new(4, 3);
        target.clear(Rgba::BLACK);
        target.fill_rect(Rect::new(1.0, 1.0, 1.0, 1.0), Rgba::WHITE);
        let path = std::env::temp_dir().join(format!("nr_render_save_{}.png", std::process::id()));
        target.save_png(&path).expect("png should save");
        let back = image::open(&path).expect("png should load").to_rgba8();
        let _ = std::fs::remove_file(&path);
        assert_eq!(back.dimensions(), (4, 3));
        assert_eq!(back.get_pixel(1, 1).0, [255, 255, 255, 255]);
        assert_eq!(back.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn save_into_missing_directory_reports_path() {
        let target = RasterTarget::new(2, 2);
        let path = std::env::temp_dir().join("nr_render_missing_dir").join("frame.png");
        let err = target.save_png(&path).expect_err("missing directory");
        assert!(err.starts_with("Failed to write"));
    }
}
