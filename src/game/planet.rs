use crate::game::enums::{PlanetType, ResourceType};
use crate::game::geometry::Point;
use crate::game::naming::planet_name;
use crate::game::properties::{generate_resources, planet_profile, random_planet_type, Rgb};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_4, TAU};
use std::ops::RangeInclusive;

pub const ORBIT_SPEED_RANGE: RangeInclusive<f64> = 0.2..=0.5;
/// Size drawn for a loaded planet that has none recorded.
pub const FALLBACK_SIZE_RANGE: RangeInclusive<u32> = 10..=30;
pub const ORBIT_BASE_RADIUS: f64 = 100.0;
pub const ORBIT_SPACING: f64 = 60.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Planet {
    pub name: String,
    pub kind: PlanetType,
    pub size: u32,
    /// 1-based index among the system's planets.
    pub orbit_number: u32,
    pub angle: f64,
    // Persisted but not animated.
    pub orbit_speed: f64,
    pub resources: BTreeMap<ResourceType, u32>,
    /// Screen position in system view; computed once and then cached.
    pub position: Option<Point>,
}

impl Planet {
    pub fn generate(rng: &mut ChaCha8Rng, system_name: &str, orbit_number: u32) -> Self {
        let kind = random_planet_type(rng);
        let profile = planet_profile(kind);
        let size = rng.gen_range(profile.size);
        let resources = generate_resources(rng, kind);

        Self {
            name: planet_name(system_name, orbit_number),
            kind,
            size,
            orbit_number,
            angle: random_angle(rng),
            orbit_speed: random_orbit_speed(rng),
            resources,
            position: None,
        }
    }

    pub fn color(&self) -> Rgb {
        planet_profile(self.kind).color
    }

    pub fn orbit_radius(&self) -> f64 {
        orbit_radius(self.orbit_number)
    }

    pub fn resource(&self, kind: ResourceType) -> u32 {
        self.resources.get(&kind).copied().unwrap_or(0)
    }
}

pub fn orbit_radius(orbit_number: u32) -> f64 {
    ORBIT_BASE_RADIUS + ORBIT_SPACING * orbit_number as f64
}

pub fn random_angle(rng: &mut ChaCha8Rng) -> f64 {
    rng.gen_range(0.0..TAU)
}

pub fn random_orbit_speed(rng: &mut ChaCha8Rng) -> f64 {
    rng.gen_range(ORBIT_SPEED_RANGE)
}

/// Places every planet without a cached position on its orbit ring.
///
/// Siblings are spread evenly starting at 45 degrees; cached positions are
/// left untouched so the layout stays stable between frames.
pub fn layout_planets(planets: &mut [Planet], center: Point) {
    let count = planets.len();
    for (i, planet) in planets.iter_mut().enumerate() {
        if planet.position.is_some() {
            continue;
        }
        let radius = planet.orbit_radius();
        let theta = i as f64 * TAU / count as f64 + FRAC_PI_4;
        planet.position = Some(Point::new(
            center.x + radius * theta.cos(),
            center.y + radius * theta.sin(),
        ));
    }
}
