use crate::game::geometry::Point;
use crate::game::properties::{Rgb, BLUE, PINK, PURPLE, RED};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::f64::consts::TAU;

const PARTICLES_PER_NEBULA: usize = 40;
const NEBULA_ALPHA: u8 = 20;
const TWINKLE_AMPLITUDE: f64 = 20.0;

#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundStar {
    pub pos: Point,
    pub size: u32,
    pub brightness: u8,
    pub twinkle_offset: f64,
}

impl BackgroundStar {
    /// Grey level at `now_ms`, oscillating around the base brightness.
    pub fn brightness_at(&self, now_ms: u64) -> u8 {
        let t = now_ms as f64 / 1000.0;
        let variation = (t * 2.0 + self.twinkle_offset).sin() * TWINKLE_AMPLITUDE;
        (self.brightness as f64 + variation).clamp(0.0, 255.0) as u8
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NebulaParticle {
    pub pos: Point,
    pub size: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Nebula {
    pub center: Point,
    pub radius: u32,
    /// RGBA; low alpha so overlapping particles build up density.
    pub color: [u8; 4],
    pub particles: Vec<NebulaParticle>,
}

/// Decorative star field and nebulae. Nebulae are only shown in galaxy view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Background {
    pub stars: Vec<BackgroundStar>,
    pub nebulae: Vec<Nebula>,
}

fn nebula_palette() -> [[u8; 4]; 4] {
    let tint = |c: Rgb| [c[0], 0, c[2], NEBULA_ALPHA];
    [
        tint(RED),
        [0, 0, BLUE[2], NEBULA_ALPHA],
        tint(PURPLE),
        [PINK[0], PINK[1], PINK[2], NEBULA_ALPHA],
    ]
}

impl Background {
    pub fn generate(
        rng: &mut ChaCha8Rng,
        width: u32,
        height: u32,
        star_count: usize,
        nebula_count: usize,
    ) -> Self {
        let stars = (0..star_count)
            .map(|_| BackgroundStar {
                pos: Point::new(
                    rng.gen_range(0..=width) as f64,
                    rng.gen_range(0..=height) as f64,
                ),
                size: rng.gen_range(1..=2),
                brightness: rng.gen_range(100..=180),
                twinkle_offset: rng.gen_range(0.0..TAU),
            })
            .collect();

        let palette = nebula_palette();
        let nebulae = (0..nebula_count)
            .map(|_| {
                let center = Point::new(
                    rng.gen_range(0..=width) as f64,
                    rng.gen_range(0..=height) as f64,
                );
                let radius = rng.gen_range(100..=200);
                let color = palette[rng.gen_range(0..palette.len())];
                let particles = (0..PARTICLES_PER_NEBULA)
                    .map(|_| {
                        let angle = rng.gen_range(0.0..TAU);
                        let distance = rng.gen_range(0.0..=radius as f64);
                        NebulaParticle {
                            pos: Point::new(
                                center.x + distance * angle.cos(),
                                center.y + distance * angle.sin(),
                            ),
                            size: rng.gen_range(20..=35),
                        }
                    })
                    .collect();
                Nebula {
                    center,
                    radius,
                    color,
                    particles,
                }
            })
            .collect();

        Self { stars, nebulae }
    }
}
