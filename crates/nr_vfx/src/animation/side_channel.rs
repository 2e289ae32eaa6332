//! State-scoped cosmetic emissions owned by the animation director.
//!
//! Positions are relative to the player's center, so these follow the player
//! instead of scrolling with the world. Lives are in seconds; `update` takes
//! the usual frame multiplier and converts.

use crate::effects::decay;
use glam::Vec2;
use nr_core::rng;
use nr_core::{SimRng, REFERENCE_HZ};
use nr_render::{RenderTarget, Rgba};
use rand::Rng;

fn seconds(dt: f32) -> f32 {
    dt / REFERENCE_HZ as f32
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashLine {
    pub offset: Vec2,
    pub angle: f32,
    pub length: f32,
    pub width: f32,
    pub life: f32,
}

impl DashLine {
    pub const LIFE: f32 = 0.3;
    const COLOR: Rgba = Rgba::new(200, 240, 255, 180);

    fn draw(&self, target: &mut dyn RenderTarget, center: Vec2) {
        let from = center + self.offset;
        let to = from + Vec2::from_angle(self.angle) * self.length;
        let fade = (self.life / Self::LIFE).clamp(0.0, 1.0);
        target.line(from, to, Self::COLOR.fade(fade), self.width.max(1.0));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrailMote {
    pub offset: Vec2,
    pub size: f32,
    pub life: f32,
}

impl TrailMote {
    pub const LIFE: f32 = 0.8;
    const COLOR: Rgba = Rgba::rgb(100, 200, 255);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Afterimage {
    pub scale: f32,
    pub rotation: f32,
    pub life: f32,
}

impl Afterimage {
    pub const LIFE: f32 = 0.2;
    const COLOR: Rgba = Rgba::new(100, 180, 255, 100);
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElectricArc {
    pub offset: Vec2,
    pub points: Vec<Vec2>,
    pub size: f32,
    pub life: f32,
    pub max_life: f32,
}

impl ElectricArc {
    const COLOR: Rgba = Rgba::rgb(150, 220, 255);

    fn spawn(rng: &mut SimRng) -> Self {
        let life = rng::range(rng, 0.5, 1.5);
        let count = rng.gen_range(3..=6);
        let points = (0..count)
            .map(|_| Vec2::new(rng::range(rng, -10.0, 10.0), rng::range(rng, -10.0, 10.0)))
            .collect();
        Self {
            offset: Vec2::new(rng::range(rng, -25.0, 25.0), rng::range(rng, -25.0, 25.0)),
            points,
            size: rng::range(rng, 2.0, 6.0),
            life,
            max_life: life,
        }
    }

    fn draw(&self, target: &mut dyn RenderTarget, center: Vec2) {
        let origin = center + self.offset;
        let mut path = Vec::with_capacity(self.points.len() + 1);
        path.push(origin);
        path.extend(self.points.iter().map(|p| origin + *p));
        let alpha = 255.0 * (self.life / self.max_life).clamp(0.0, 1.0);
        for i in 0..3 {
            let i = i as f32;
            let width = self.size * (1.0 - i * 0.3);
            if width >= 1.0 {
                target.polyline(&path, Self::COLOR.with_alpha(alpha * (0.8 - i * 0.2)), width);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct WaveMote {
    pos: Vec2,
    vel: Vec2,
    size: f32,
    life: f32,
}

/// Expanding shock ring scheduled by the slam animation.
#[derive(Debug, Clone, PartialEq)]
pub struct SideWave {
    pub color: Rgba,
    pub radius: f32,
    pub max_radius: f32,
    pub thickness: f32,
    pub life: f32,
    pub speed: f32,
    motes: Vec<WaveMote>,
}

impl SideWave {
    pub fn new(color: Rgba, speed_multiplier: f32) -> Self {
        Self {
            color,
            radius: 10.0,
            max_radius: 250.0,
            thickness: 15.0,
            life: 1.0,
            speed: 35.0 * speed_multiplier,
            motes: Vec::new(),
        }
    }

    fn update(&mut self, dt: f32, rng: &mut SimRng) {
        let secs = seconds(dt);
        self.life -= secs * 0.8;
        self.radius += self.speed * secs * 10.0;
        self.thickness = (self.thickness * decay(0.92, dt)).max(1.0);

        if self.radius < self.max_radius * 0.8 && rng::chance_per_tick(rng, 0.5, dt) {
            let angle = rng::angle(rng);
            let dir = Vec2::from_angle(angle);
            let speed = rng::range(rng, 2.0, 6.0);
            self.motes.push(WaveMote {
                pos: dir * self.radius,
                vel: dir * speed,
                size: rng::range(rng, 3.0, 8.0),
                life: rng::range(rng, 0.5, 1.0),
            });
        }
        let shrink = decay(0.95, dt);
        for m in &mut self.motes {
            m.life -= secs;
            m.pos += m.vel * dt;
            m.size *= shrink;
        }
        self.motes.retain(|m| m.life > 0.0);
    }

    fn is_done(&self) -> bool {
        self.life <= 0.0 || self.radius > self.max_radius * 1.5
    }

    fn draw(&self, target: &mut dyn RenderTarget, center: Vec2) {
        if self.life <= 0.0 {
            return;
        }
        let color = self.color.with_alpha(200.0 * self.life);
        target.stroke_circle(center, self.radius, color, self.thickness);
        if self.radius > 20.0 {
            target.stroke_circle(center, self.radius - 20.0, color, self.thickness * 0.5);
        }
        for m in &self.motes {
            target.fill_circle(center + m.pos, m.size, Rgba::WHITE.with_alpha(255.0 * m.life));
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImpactParticle {
    pub offset: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub life: f32,
    pub color: Rgba,
}

const IMPACT_GRAVITY: f32 = 0.5;

/// Everything the director emits on its own, grouped by what clears it.
#[derive(Debug, Clone, Default)]
pub struct SideChannel {
    pub dash_lines: Vec<DashLine>,
    pub trail_motes: Vec<TrailMote>,
    pub afterimages: Vec<Afterimage>,
    pub electric_arcs: Vec<ElectricArc>,
    pub waves: Vec<SideWave>,
    pub impact_particles: Vec<ImpactParticle>,
    mote_budget: f32,
}

impl SideChannel {
    pub fn emit_dash(&mut self, dt: f32, scale: f32, rotation: f32, rng: &mut SimRng) {
        if rng::chance_per_tick(rng, 0.8, dt) {
            let angle = if rng.gen_bool(0.5) {
                rng::range(rng, -0.2, 0.2)
            } else {
                std::f32::consts::PI + rng::range(rng, -0.2, 0.2)
            };
            self.dash_lines.push(DashLine {
                offset: Vec2::new(rng::range(rng, -40.0, 40.0), rng::range(rng, -30.0, 30.0)),
                angle,
                length: rng::range(rng, 60.0, 150.0),
                width: rng::range(rng, 2.0, 5.0),
                life: DashLine::LIFE,
            });
        }

        // Two motes per reference tick, carried across fractional steps.
        self.mote_budget += 2.0 * dt;
        while self.mote_budget >= 1.0 {
            self.mote_budget -= 1.0;
            self.trail_motes.push(TrailMote {
                offset: Vec2::new(rng::range(rng, -20.0, 20.0), rng::range(rng, -20.0, 20.0)),
                size: rng::range(rng, 2.0, 5.0),
                life: TrailMote::LIFE,
            });
        }

        if rng::chance_per_tick(rng, 0.7, dt) {
            self.afterimages.push(Afterimage {
                scale,
                rotation,
                life: Afterimage::LIFE,
            });
        }

        if rng::chance_per_tick(rng, 0.3, dt) {
            self.electric_arcs.push(ElectricArc::spawn(rng));
        }
    }

    pub fn emit_impact(&mut self, dt: f32, rng: &mut SimRng) {
        if !rng::chance_per_tick(rng, 0.8, dt) {
            return;
        }
        let angle = rng::range(rng, std::f32::consts::PI, std::f32::consts::TAU);
        let speed = rng::range(rng, 10.0, 25.0);
        let green = rng.gen_range(100..=200);
        self.impact_particles.push(ImpactParticle {
            offset: Vec2::new(rng::range(rng, -20.0, 20.0), 10.0),
            vel: Vec2::from_angle(angle) * speed,
            size: rng::range(rng, 2.0, 6.0),
            life: rng::range(rng, 0.5, 1.5),
            color: Rgba::rgb(255, green, 50),
        });
    }

    pub fn push_wave(&mut self, wave: SideWave) {
        self.waves.push(wave);
    }

    pub fn update(&mut self, dt: f32, rng: &mut SimRng) {
        let secs = seconds(dt);

        let thin = decay(0.9, dt);
        for line in &mut self.dash_lines {
            line.life -= secs;
            line.width *= thin;
        }
        self.dash_lines.retain(|l| l.life > 0.0);

        let shrink = decay(0.95, dt);
        for mote in &mut self.trail_motes {
            mote.life -= secs;
            mote.size *= shrink;
        }
        self.trail_motes.retain(|m| m.life > 0.0);

        for image in &mut self.afterimages {
            image.life -= secs;
        }
        self.afterimages.retain(|a| a.life > 0.0);

        for arc in &mut self.electric_arcs {
            arc.life -= secs;
            arc.size *= shrink;
        }
        self.electric_arcs.retain(|a| a.life > 0.0);

        for wave in &mut self.waves {
            wave.update(dt, rng);
        }
        self.waves.retain(|w| !w.is_done());

        let impact_shrink = decay(0.93, dt);
        for p in &mut self.impact_particles {
            p.life -= secs;
            p.offset += p.vel * dt;
            p.vel.y += IMPACT_GRAVITY * dt;
            p.size *= impact_shrink;
        }
        self.impact_particles.retain(|p| p.life > 0.0);
    }

    pub fn clear_dash(&mut self) {
        self.dash_lines.clear();
        self.afterimages.clear();
        self.electric_arcs.clear();
    }

    pub fn clear_slam(&mut self) {
        self.waves.clear();
        self.impact_particles.clear();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn len(&self) -> usize {
        self.dash_lines.len()
            + self.trail_motes.len()
            + self.afterimages.len()
            + self.electric_arcs.len()
            + self.waves.len()
            + self.impact_particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Paints the side channel around `center`.
    pub fn draw(&self, target: &mut dyn RenderTarget, center: Vec2) {
        for image in &self.afterimages {
            let radius = (8.0 * image.scale * image.life.max(0.2)).max(2.0);
            target.fill_circle(center, radius, Afterimage::COLOR);
        }
        for mote in &self.trail_motes {
            let fade = (mote.life / TrailMote::LIFE).clamp(0.0, 1.0);
            target.fill_circle(
                center + mote.offset,
                mote.size.max(1.0),
                TrailMote::COLOR.with_alpha(200.0 * fade),
            );
        }
        for arc in &self.electric_arcs {
            arc.draw(target, center);
        }
        for wave in &self.waves {
            wave.draw(target, center);
        }
        for p in &self.impact_particles {
            let alpha = 255.0 * p.life.clamp(0.0, 1.0);
            target.fill_circle(center + p.offset, p.size.max(1.0), p.color.with_alpha(alpha));
        }
        for line in &self.dash_lines {
            line.draw(target, center);
        }
    }
}
