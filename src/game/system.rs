use crate::game::enums::StarType;
use crate::game::geometry::{circle_contains, Point, Rect};
use crate::game::naming::claim_system_name;
use crate::game::planet::Planet;
use crate::game::properties::{random_star_type, star_profile, Rgb};
use log::{debug, info, warn};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt::Write;

/// Multiplier on the combined star sizes giving the minimum centre distance.
pub const SPACING_FACTOR: f64 = 3.0;

#[derive(Clone, Debug, PartialEq)]
pub struct StarSystem {
    pub x: i32,
    pub y: i32,
    pub name: String,
    pub star_type: StarType,
    pub size: u32,
    pub color: Rgb,
    pub planets: Vec<Planet>,
}

impl StarSystem {
    /// Builds a system at `(x, y)`, drawing the star type (weighted) and planets.
    pub fn generate(
        rng: &mut ChaCha8Rng,
        x: i32,
        y: i32,
        name: String,
        star_type: Option<StarType>,
    ) -> Self {
        let star_type = star_type.unwrap_or_else(|| random_star_type(rng));
        let profile = star_profile(star_type);
        let size = rng.gen_range(profile.size.clone());
        let planet_count = rng.gen_range(profile.planets.clone());
        let planets = (1..=planet_count as u32)
            .map(|orbit| Planet::generate(rng, &name, orbit))
            .collect();

        Self {
            x,
            y,
            name,
            star_type,
            size,
            color: profile.color,
            planets,
        }
    }

    pub fn center(&self) -> Point {
        Point::from((self.x, self.y))
    }

    /// Square hit box of side `2 * size` centred on the star.
    pub fn bounds(&self) -> Rect {
        Rect::around(self.center(), self.size as f64)
    }

    pub fn contains_point(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    pub fn circle_contains(&self, p: Point) -> bool {
        circle_contains(self.center(), self.size as f64, p)
    }

    pub fn min_distance(&self, other: &StarSystem) -> f64 {
        SPACING_FACTOR * (self.size + other.size) as f64
    }

    pub fn collides_with(&self, other: &StarSystem) -> bool {
        self.center().distance(other.center()) < self.min_distance(other)
    }
}

#[derive(Clone, Debug)]
pub struct GalaxyConfig {
    pub systems: usize,
    /// Region systems may be placed in, before the margin is applied.
    pub area: Rect,
    pub margin: i32,
    /// Placement attempts shared by the whole galaxy, not per system.
    pub max_attempts: usize,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            systems: 10,
            area: Rect::new(0.0, 0.0, 900.0, 800.0),
            margin: 100,
            max_attempts: 1000,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Galaxy {
    pub systems: Vec<StarSystem>,
    pub attempts: usize,
}

impl Galaxy {
    pub fn is_well_spaced(&self) -> bool {
        self.systems.iter().enumerate().all(|(i, a)| {
            self.systems[i + 1..]
                .iter()
                .all(|b| !a.collides_with(b))
        })
    }
}

pub struct GalaxyGenerator<'a> {
    rng: &'a mut ChaCha8Rng,
    used_names: HashSet<String>,
    config: GalaxyConfig,
}

impl<'a> GalaxyGenerator<'a> {
    pub fn new(rng: &'a mut ChaCha8Rng) -> Self {
        Self::with_config(rng, GalaxyConfig::default())
    }

    pub fn with_config(rng: &'a mut ChaCha8Rng, config: GalaxyConfig) -> Self {
        Self {
            rng,
            used_names: HashSet::new(),
            config,
        }
    }

    /// Best-effort placement: stops early once the attempt budget is spent.
    pub fn generate(&mut self) -> Galaxy {
        let target = self.config.systems;
        info!("Generating {} star systems", target);

        let area = self.config.area;
        let margin = self.config.margin;
        let min_x = area.x as i32 + margin;
        let max_x = area.right() as i32 - margin;
        let min_y = area.y as i32 + margin;
        let max_y = area.bottom() as i32 - margin;
        if min_x > max_x || min_y > max_y {
            warn!(
                "Galaxy area {}x{} leaves no room inside a {} px margin",
                area.width, area.height, margin
            );
            return Galaxy::default();
        }

        let mut systems: Vec<StarSystem> = Vec::with_capacity(target);
        let mut attempts = 0;
        while systems.len() < target && attempts < self.config.max_attempts {
            attempts += 1;
            let x = self.rng.gen_range(min_x..=max_x);
            let y = self.rng.gen_range(min_y..=max_y);
            let (candidate, fresh_name) = self.make_system(x, y);

            if systems.iter().any(|existing| candidate.collides_with(existing)) {
                // A name this candidate claimed goes back into the pool; a
                // duplicate still belongs to the system that claimed it first.
                if fresh_name {
                    self.used_names.remove(&candidate.name);
                }
                continue;
            }
            debug!("Created star system: {} at ({}, {})", candidate.name, x, y);
            systems.push(candidate);
        }

        if systems.len() < target {
            warn!(
                "Placed only {} of {} star systems after {} attempts",
                systems.len(),
                target,
                attempts
            );
        } else {
            info!(
                "Generated {} star systems in {} attempts",
                systems.len(),
                attempts
            );
        }

        Galaxy { systems, attempts }
    }

    fn make_system(&mut self, x: i32, y: i32) -> (StarSystem, bool) {
        let (name, fresh) = claim_system_name(self.rng, &mut self.used_names);
        (StarSystem::generate(self.rng, x, y, name, None), fresh)
    }
}

pub fn galaxy_report(galaxy: &Galaxy) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "Galaxy with {} star systems ({} placement attempts)",
        galaxy.systems.len(),
        galaxy.attempts
    );

    for system in &galaxy.systems {
        let _ = writeln!(
            output,
            "System {} [{}] at ({}, {}) size={}",
            system.name,
            system.star_type.label(),
            system.x,
            system.y,
            system.size
        );
        for planet in &system.planets {
            write_planet(&mut output, planet, 2);
        }
    }

    output
}

fn write_planet(buf: &mut String, planet: &Planet, indent: usize) {
    let pad = " ".repeat(indent);
    let resources = if planet.resources.is_empty() {
        "none".to_string()
    } else {
        planet
            .resources
            .iter()
            .map(|(kind, amount)| format!("{} {}", kind.label(), amount))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let _ = writeln!(
        buf,
        "{}- {} [{}] orbit={} size={} resources={}",
        pad,
        planet.name,
        planet.kind.label(),
        planet.orbit_number,
        planet.size,
        resources
    );
}

pub fn galaxy_json(galaxy: &Galaxy) -> String {
    let view = GalaxyView::from(galaxy);
    serde_json::to_string(&view).unwrap_or_else(|_| "{}".to_string())
}

#[derive(Serialize)]
struct PlanetView {
    name: String,
    kind: &'static str,
    size: u32,
    orbit: u32,
    resources: BTreeMap<&'static str, u32>,
}

#[derive(Serialize)]
struct SystemView {
    name: String,
    star_type: &'static str,
    x: i32,
    y: i32,
    size: u32,
    planets: Vec<PlanetView>,
}

#[derive(Serialize)]
struct GalaxyView {
    systems: Vec<SystemView>,
}

impl From<&Planet> for PlanetView {
    fn from(planet: &Planet) -> Self {
        Self {
            name: planet.name.clone(),
            kind: planet.kind.name(),
            size: planet.size,
            orbit: planet.orbit_number,
            resources: planet
                .resources
                .iter()
                .map(|(kind, amount)| (kind.name(), *amount))
                .collect(),
        }
    }
}

impl From<&Galaxy> for GalaxyView {
    fn from(galaxy: &Galaxy) -> Self {
        let systems = galaxy
            .systems
            .iter()
            .map(|s| SystemView {
                name: s.name.clone(),
                star_type: s.star_type.name(),
                x: s.x,
                y: s.y,
                size: s.size,
                planets: s.planets.iter().map(PlanetView::from).collect(),
            })
            .collect();
        GalaxyView { systems }
    }
}
