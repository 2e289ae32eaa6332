use super::AnimationParams;
use glam::Vec2;
use nr_render::{RenderTarget, Rgba};
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, TAU};

const OUTLINE: Rgba = Rgba::WHITE;
const DETAIL: Rgba = Rgba::rgb(255, 255, 200);
const ELLIPSE_SEGMENTS: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerShape {
    #[default]
    Circle,
    Square,
    Triangle,
    Hexagon,
}

impl PlayerShape {
    pub const ALL: [PlayerShape; 4] = [
        PlayerShape::Circle,
        PlayerShape::Square,
        PlayerShape::Triangle,
        PlayerShape::Hexagon,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PlayerShape::Circle => "circle",
            PlayerShape::Square => "square",
            PlayerShape::Triangle => "triangle",
            PlayerShape::Hexagon => "hexagon",
        }
    }
}

/// Paints the player body at `center` with the given animation pose.
///
/// `size` is the rest half-extent. Params are sanitized first, so a
/// degenerate pose still draws something at least two pixels across.
pub fn draw_avatar(
    target: &mut dyn RenderTarget,
    shape: PlayerShape,
    center: Vec2,
    size: f32,
    color: Rgba,
    params: &AnimationParams,
) {
    let p = params.sanitized();
    let anim_size = (size.max(1.0) * p.draw_scale()).max(1.0);
    let width = (anim_size * 2.0 * p.squash).max(2.0);
    let height = (anim_size * 2.0 * p.stretch).max(2.0);
    let rotation = if p.rotation.is_finite() { p.rotation } else { 0.0 };
    let detail = p.frame_index % 4;

    match shape {
        PlayerShape::Circle => {
            let radii = Vec2::new((width / 2.0).max(1.0), (height / 2.0).max(1.0));
            let outline = ellipse(center, radii);
            target.fill_polygon(&outline, color);
            match detail {
                0 => target.fill_circle(center, (anim_size * 0.3).max(1.0), OUTLINE),
                1 => target.line(
                    center - Vec2::new(radii.x / 2.0, 0.0),
                    center + Vec2::new(radii.x / 2.0, 0.0),
                    OUTLINE,
                    2.0,
                ),
                2 => target.line(
                    center - Vec2::new(0.0, radii.y / 2.0),
                    center + Vec2::new(0.0, radii.y / 2.0),
                    OUTLINE,
                    2.0,
                ),
                _ => {}
            }
            target.polyline(&closed(outline), OUTLINE, 2.0);
        }
        PlayerShape::Square => {
            let half = Vec2::new(width / 2.0, height / 2.0);
            let corners = [
                Vec2::new(-half.x, -half.y),
                Vec2::new(half.x, -half.y),
                Vec2::new(half.x, half.y),
                Vec2::new(-half.x, half.y),
            ];
            let spin = Vec2::from_angle(rotation);
            let outline: Vec<Vec2> = corners.iter().map(|c| center + spin.rotate(*c)).collect();
            target.fill_polygon(&outline, color);
            if detail == 0 {
                let top = center + spin.rotate(Vec2::new(0.0, -half.y + 2.0));
                let bottom = center + spin.rotate(Vec2::new(0.0, half.y - 2.0));
                target.line(top, bottom, DETAIL, 2.0);
            }
            target.polyline(&closed(outline), OUTLINE, 2.0);
        }
        PlayerShape::Triangle | PlayerShape::Hexagon => {
            let sides = if shape == PlayerShape::Triangle { 3 } else { 6 };
            let variation = 0.1 * (p.frame_index as f32 * 0.5).sin();
            let stretch = Vec2::new(p.squash, p.stretch);
            let outline: Vec<Vec2> = (0..sides)
                .map(|i| {
                    let angle = rotation + TAU * i as f32 / sides as f32 - FRAC_PI_2;
                    let wobble = (1.0 + variation * (i as f32 * 1.5).sin()).max(0.5);
                    center + Vec2::from_angle(angle) * anim_size * wobble * stretch
                })
                .collect();
            target.fill_polygon(&outline, color);
            if sides == 3 {
                let inner: Vec<Vec2> = (0..3)
                    .map(|i| {
                        let angle = rotation + TAU * i as f32 / 3.0 - FRAC_PI_2;
                        center + Vec2::from_angle(angle) * anim_size * 0.5 * stretch
                    })
                    .collect();
                target.fill_polygon(&inner, DETAIL);
            } else {
                target.fill_circle(center, (anim_size * 0.3).max(1.0), DETAIL);
            }
            target.polyline(&closed(outline), OUTLINE, 2.0);
        }
    }
}

fn ellipse(center: Vec2, radii: Vec2) -> Vec<Vec2> {
    (0..ELLIPSE_SEGMENTS)
        .map(|i| {
            let angle = TAU * i as f32 / ELLIPSE_SEGMENTS as f32;
            center + Vec2::from_angle(angle) * radii
        })
        .collect()
}

fn closed(mut points: Vec<Vec2>) -> Vec<Vec2> {
    if let Some(first) = points.first().copied() {
        points.push(first);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use nr_render::{DrawCmd, DrawList};

    fn polygon_extent(list: &DrawList) -> Vec2 {
        let body = list
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCmd::FillPolygon { points, .. } => Some(points.clone()),
                _ => None,
            })
            .unwrap_or_default();
        let (min, max) = body.iter().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(lo, hi), p| (lo.min(*p), hi.max(*p)),
        );
        max - min
    }

    #[test]
    fn every_shape_draws_body_and_outline() {
        for shape in PlayerShape::ALL {
            let mut list = DrawList::new(200, 200);
            draw_avatar(
                &mut list,
                shape,
                Vec2::splat(100.0),
                20.0,
                Rgba::rgb(0, 255, 255),
                &AnimationParams::REST,
            );
            let cmds = list.commands();
            assert!(
                matches!(cmds.first(), Some(DrawCmd::FillPolygon { .. })),
                "{}",
                shape.as_str()
            );
            assert!(
                matches!(cmds.last(), Some(DrawCmd::Polyline { .. })),
                "{}",
                shape.as_str()
            );
        }
    }

    #[test]
    fn square_extent_follows_squash_and_stretch() {
        let params = AnimationParams {
            squash: 0.5,
            stretch: 1.5,
            ..AnimationParams::REST
        };
        let mut list = DrawList::new(200, 200);
        draw_avatar(
            &mut list,
            PlayerShape::Square,
            Vec2::splat(100.0),
            20.0,
            Rgba::WHITE,
            &params,
        );
        let extent = polygon_extent(&list);
        assert!((extent.x - 20.0).abs() < 1e-3);
        assert!((extent.y - 60.0).abs() < 1e-3);
    }

    #[test]
    fn degenerate_pose_still_has_minimum_size() {
        let params = AnimationParams {
            squash: -3.0,
            stretch: f32::NAN,
            scale: 0.0,
            ..AnimationParams::REST
        };
        let mut list = DrawList::new(200, 200);
        draw_avatar(
            &mut list,
            PlayerShape::Square,
            Vec2::splat(100.0),
            20.0,
            Rgba::WHITE,
            &params,
        );
        let extent = polygon_extent(&list);
        assert!(extent.x >= 2.0 - 1e-3 && extent.y >= 2.0 - 1e-3);
        assert!(extent.is_finite());
    }

    #[test]
    fn circle_detail_cycles_with_frame_index() {
        let mut with_dot = DrawList::new(200, 200);
        draw_avatar(
            &mut with_dot,
            PlayerShape::Circle,
            Vec2::splat(100.0),
            20.0,
            Rgba::WHITE,
            &AnimationParams::REST,
        );
        assert!(with_dot
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCmd::FillCircle { .. })));

        let plain = AnimationParams {
            frame_index: 3,
            ..AnimationParams::REST
        };
        let mut without = DrawList::new(200, 200);
        draw_avatar(
            &mut without,
            PlayerShape::Circle,
            Vec2::splat(100.0),
            20.0,
            Rgba::WHITE,
            &plain,
        );
        assert_eq!(without.len(), 2);
    }

    #[test]
    fn shape_names_round_trip_through_json() {
        let json = serde_json::to_string(&PlayerShape::Hexagon).unwrap();
        assert_eq!(json, "\"hexagon\"");
        let back: PlayerShape = serde_json::from_str("\"triangle\"").unwrap();
        assert_eq!(back, PlayerShape::Triangle);
    }
}
