use serde::{Deserialize, Serialize};

/// 8-bit straight-alpha color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Replaces alpha with a 0..=255 float, clamped.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: channel(alpha),
            ..self
        }
    }

    /// Multiplies the current alpha by `factor` in [0, 1].
    pub fn fade(self, factor: f32) -> Self {
        self.with_alpha(self.a as f32 * factor.clamp(0.0, 1.0))
    }

    /// Multiplies RGB by `factor`, clamped to the channel range.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            r: channel(self.r as f32 * factor),
            g: channel(self.g as f32 * factor),
            b: channel(self.b as f32 * factor),
            a: self.a,
        }
    }

    /// Adds a flat amount to each RGB channel.
    pub fn brighten(self, amount: f32) -> Self {
        Self {
            r: channel(self.r as f32 + amount),
            g: channel(self.g as f32 + amount),
            b: channel(self.b as f32 + amount),
            a: self.a,
        }
    }

    pub fn lerp(self, other: Rgba, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| channel(a as f32 + (b as f32 - a as f32) * t);
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

fn channel(v: f32) -> u8 {
    if v.is_nan() {
        0
    } else {
        v.round().clamp(0.0, 255.0) as u8
    }
}
