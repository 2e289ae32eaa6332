//! Draws one frame of a session, back to front: background and stars,
//! platforms and enemies, the shaken effects layer, then the character.

use crate::session::{GamePhase, GameSession};
use crate::theme::{ENEMY_BODY, ENEMY_EDGE, SLAM_COLOR, STAR_COLOR};
use glam::Vec2;
use nr_core::Rect;
use nr_render::{RenderTarget, Rgba};
use nr_vfx::animation::draw_avatar;
use nr_vfx::AnimationParams;

/// Rest half-extent of the character sprite.
const AVATAR_SIZE: f32 = 15.0;
const PLATFORM_BORDER: f32 = 2.0;
const PLATFORM_TOP_EDGE: f32 = 3.0;
const VISIBILITY_SLACK: f32 = 50.0;

pub fn draw_frame<T: RenderTarget>(session: &GameSession, target: &mut T) {
    let theme = session.theme();
    let camera = session.camera();
    target.clear(theme.background);

    for star in session.world().starfield().stars() {
        target.fill_circle(star.pos, 1.0, Rgba::WHITE);
        target.stroke_circle(star.pos, star.size, STAR_COLOR, 1.0);
    }

    for platform in session.world().platforms() {
        let rect = platform.rect;
        if !camera.is_visible(&rect, VISIBILITY_SLACK) {
            continue;
        }
        target.fill_rect(rect, theme.platform);
        target.stroke_rect(rect, theme.border, PLATFORM_BORDER);
        let top = Rect::new(rect.x, rect.y, rect.w, PLATFORM_TOP_EDGE);
        target.fill_rect(top, theme.border.brighten(60.0));
    }

    for enemy in session.world().enemies() {
        let rect = enemy.rect();
        if !camera.is_visible(&rect, VISIBILITY_SLACK) {
            continue;
        }
        target.fill_rect(rect, ENEMY_BODY);
        target.stroke_rect(rect, ENEMY_EDGE, PLATFORM_BORDER);
    }

    let alive = session.phase() != GamePhase::GameOver;
    let player = session.player();

    let mut layer = target.transparent_layer();
    session.effects().draw(&mut layer);
    if alive {
        session
            .director()
            .side_channel()
            .draw(&mut layer, player.center());
    }
    target.blit(&layer, camera.offset, 1.0);

    if !alive {
        return;
    }
    let director = session.director();
    let base = if player.is_dashing() {
        theme.border
    } else if player.is_slamming() {
        SLAM_COLOR
    } else {
        theme.player
    };
    let center = camera.world_to_screen(player.center());
    let params = director.params();
    if params.glow_intensity > 0.0 {
        target.fill_circle(center, glow_radius(params), director.glow_color(base));
    }
    draw_avatar(
        target,
        session.shape(),
        center,
        AVATAR_SIZE,
        director.modified_color(base),
        params,
    );
}

/// Glow halo radius; degenerate scales are clamped first.
fn glow_radius(params: &AnimationParams) -> f32 {
    AVATAR_SIZE * params.sanitized().draw_scale() * 1.6
}

/// Screen-space center of the character for this frame.
pub fn avatar_center(session: &GameSession) -> Vec2 {
    session.camera().world_to_screen(session.player().center())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use crate::config::GameConfig;
    use nr_core::{Action, InputSnapshot};
    use nr_render::{DrawCmd, DrawList, RasterTarget};

    fn started(seed: u64) -> GameSession {
        let mut session = GameSession::new(GameConfig::default(), seed);
        session.tick(&InputSnapshot::new().pressing(Action::Confirm), 1.0, &mut NullAudio);
        session
    }

    fn white_outlines(cmds: &[DrawCmd]) -> usize {
        cmds.iter()
            .filter(|c| matches!(c, DrawCmd::Polyline { color, .. } if *color == Rgba::WHITE))
            .count()
    }

    #[test]
    fn frame_order_is_background_world_effects_character() {
        let mut session = started(1);
        session.tick(&InputSnapshot::new().pressing(Action::Jump), 1.0, &mut NullAudio);
        let mut list = DrawList::new(1920, 1080);
        draw_frame(&session, &mut list);
        let cmds = list.commands();

        assert_eq!(cmds[0], DrawCmd::Clear(session.theme().background));
        let layer = cmds
            .iter()
            .position(|c| matches!(c, DrawCmd::Layer { .. }))
            .expect("effects layer");
        let first_platform = cmds
            .iter()
            .position(|c| {
                matches!(c, DrawCmd::FillRect { color, .. } if *color == session.theme().platform)
            })
            .expect("platform fill");
        assert!(first_platform < layer);
        assert!(white_outlines(&cmds[layer + 1..]) >= 1);
        assert!(matches!(
            cmds.last(),
            Some(DrawCmd::Polyline { color, .. }) if *color == Rgba::WHITE
        ));
    }

    #[test]
    fn offscreen_platforms_are_culled() {
        let mut session = started(2);
        session.world_mut().set_platforms(&[
            Rect::new(100.0, 1030.0, 300.0, 50.0),
            Rect::new(2500.0, 850.0, 200.0, 50.0),
            Rect::new(-900.0, 850.0, 200.0, 50.0),
        ]);
        let mut list = DrawList::new(1920, 1080);
        draw_frame(&session, &mut list);
        let drawn: Vec<Rect> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCmd::FillRect { rect, color } if *color == session.theme().platform => {
                    Some(*rect)
                }
                _ => None,
            })
            .collect();
        assert_eq!(drawn, vec![Rect::new(100.0, 1030.0, 300.0, 50.0)]);
    }

    #[test]
    fn no_character_after_game_over() {
        let mut session = started(3);
        let mut audio = NullAudio;
        let mut ticks = 0;
        while session.phase() == GamePhase::Playing {
            session.tick(&InputSnapshot::new().holding(Action::MoveLeft), 1.0, &mut audio);
            ticks += 1;
            assert!(ticks < 2000);
        }
        let mut list = DrawList::new(1920, 1080);
        draw_frame(&session, &mut list);
        assert_eq!(white_outlines(list.commands()), 0);
    }

    #[test]
    fn glow_radius_stays_positive_for_degenerate_scales() {
        let raw = AnimationParams {
            squash: -2.0,
            scale: -1.0,
            pulse: f32::NAN,
            glow_intensity: 1.0,
            ..AnimationParams::REST
        };
        let radius = glow_radius(&raw);
        assert!(radius.is_finite() && radius > 0.0);
        assert_eq!(radius, glow_radius(&raw.sanitized()));
        assert_eq!(glow_radius(&AnimationParams::REST), AVATAR_SIZE * 1.6);
    }

    #[test]
    fn raster_frame_paints_the_character() {
        let session = started(4);
        let mut target = RasterTarget::new(1920, 1080);
        draw_frame(&session, &mut target);
        let center = avatar_center(&session);
        let pixel = target
            .pixel(center.x as u32, center.y as u32)
            .expect("center on screen");
        assert_ne!(pixel, session.theme().background);
        assert_eq!(pixel.a, 255);
    }
}
