use nr_core::SimRng;
use nr_render::Rgba;
use rand::seq::SliceRandom;
use serde::Serialize;

/// Player color while slamming, in every theme.
pub const SLAM_COLOR: Rgba = Rgba::rgb(255, 0, 0);
/// Slam shockwave rings.
pub const SLAM_RING_COLOR: Rgba = Rgba::rgb(255, 180, 80);
pub const STAR_COLOR: Rgba = Rgba::rgb(200, 200, 200);
pub const ENEMY_BODY: Rgba = Rgba::rgb(120, 0, 120);
pub const ENEMY_EDGE: Rgba = Rgba::rgb(200, 0, 0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgba,
    pub platform: Rgba,
    pub border: Rgba,
    pub player: Rgba,
}

impl Theme {
    pub const NEON_NIGHTS: Theme = Theme {
        name: "Neon Nights",
        background: Rgba::rgb(10, 10, 50),
        platform: Rgba::rgb(0, 0, 0),
        border: Rgba::rgb(50, 255, 50),
        player: Rgba::rgb(0, 255, 255),
    };

    pub const CRIMSON_FURY: Theme = Theme {
        name: "Crimson Fury",
        background: Rgba::rgb(40, 5, 5),
        platform: Rgba::rgb(20, 0, 0),
        border: Rgba::rgb(255, 50, 0),
        player: Rgba::rgb(255, 200, 0),
    };

    pub const MONOCHROME: Theme = Theme {
        name: "Monochrome",
        background: Rgba::rgb(10, 10, 10),
        platform: Rgba::rgb(255, 255, 255),
        border: Rgba::rgb(100, 100, 100),
        player: Rgba::rgb(0, 0, 0),
    };

    pub const TOXIC_WASTE: Theme = Theme {
        name: "Toxic Waste",
        background: Rgba::rgb(10, 30, 10),
        platform: Rgba::rgb(0, 20, 0),
        border: Rgba::rgb(180, 0, 255),
        player: Rgba::rgb(50, 255, 50),
    };

    pub const ALL: [Theme; 4] = [
        Theme::NEON_NIGHTS,
        Theme::CRIMSON_FURY,
        Theme::MONOCHROME,
        Theme::TOXIC_WASTE,
    ];

    pub fn random(rng: &mut SimRng) -> Theme {
        *Self::ALL.choose(rng).unwrap_or(&Theme::NEON_NIGHTS)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::NEON_NIGHTS
    }
}
