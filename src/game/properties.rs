use crate::game::enums::{PlanetType, ResourceType, StarType};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Beta, Distribution};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

pub type Rgb = [u8; 3];

pub const WHITE: Rgb = [255, 255, 255];
pub const BLACK: Rgb = [0, 0, 0];
pub const YELLOW: Rgb = [255, 255, 0];
pub const BLUE: Rgb = [100, 150, 255];
pub const RED: Rgb = [255, 100, 100];
pub const GREEN: Rgb = [0, 255, 0];
pub const ORANGE: Rgb = [255, 165, 0];
pub const LIGHT_BLUE: Rgb = [173, 216, 230];
pub const GRAY: Rgb = [128, 128, 128];
pub const PURPLE: Rgb = [147, 112, 219];
pub const PINK: Rgb = [255, 192, 203];
pub const ORBIT_GRAY: Rgb = [50, 50, 50];

#[derive(Clone, Debug)]
pub struct StarProfile {
    pub color: Rgb,
    pub size: RangeInclusive<u32>,
    pub planets: RangeInclusive<usize>,
    /// Relative weight out of 10.
    pub weight: u32,
}

pub fn star_profile(kind: StarType) -> StarProfile {
    match kind {
        StarType::MainSequence => StarProfile {
            color: YELLOW,
            size: 4..=6,
            planets: 2..=5,
            weight: 4,
        },
        StarType::RedGiant => StarProfile {
            color: RED,
            size: 8..=12,
            planets: 1..=3,
            weight: 3,
        },
        StarType::WhiteDwarf => StarProfile {
            color: LIGHT_BLUE,
            size: 2..=4,
            planets: 0..=2,
            weight: 2,
        },
        StarType::BlueGiant => StarProfile {
            color: BLUE,
            size: 6..=10,
            planets: 3..=6,
            weight: 1,
        },
    }
}

/// Weighted draw over the star table.
pub fn random_star_type(rng: &mut ChaCha8Rng) -> StarType {
    let total_weight: u32 = StarType::ALL.iter().map(|s| star_profile(*s).weight).sum();
    let mut roll = rng.gen_range(0..total_weight);
    for kind in StarType::ALL {
        let weight = star_profile(*kind).weight;
        if roll < weight {
            return *kind;
        }
        roll -= weight;
    }
    StarType::MainSequence
}

#[derive(Clone, Debug)]
pub struct PlanetProfile {
    pub color: Rgb,
    pub size: RangeInclusive<u32>,
    pub possible_resources: &'static [(ResourceType, f64)],
}

pub fn planet_profile(kind: PlanetType) -> PlanetProfile {
    use ResourceType::*;
    match kind {
        PlanetType::Terrestrial => PlanetProfile {
            color: GREEN,
            size: 8..=12,
            possible_resources: &[
                (Minerals, 0.8),
                (Water, 0.6),
                (Organic, 0.4),
                (RareElements, 0.2),
            ],
        },
        PlanetType::GasGiant => PlanetProfile {
            color: ORANGE,
            size: 14..=20,
            possible_resources: &[(Gases, 0.9), (Energy, 0.4), (RareElements, 0.1)],
        },
        PlanetType::IceWorld => PlanetProfile {
            color: LIGHT_BLUE,
            size: 6..=10,
            possible_resources: &[(Water, 0.9), (Minerals, 0.3), (Gases, 0.2)],
        },
        PlanetType::Desert => PlanetProfile {
            color: YELLOW,
            size: 8..=12,
            possible_resources: &[(Minerals, 0.7), (RareElements, 0.3), (Energy, 0.2)],
        },
        PlanetType::Volcanic => PlanetProfile {
            color: RED,
            size: 8..=14,
            possible_resources: &[(Minerals, 0.8), (Energy, 0.6), (RareElements, 0.4)],
        },
        PlanetType::Oceanic => PlanetProfile {
            color: BLUE,
            size: 10..=16,
            possible_resources: &[(Water, 1.0), (Organic, 0.7), (Gases, 0.3)],
        },
    }
}

/// Planet types are drawn uniformly.
pub fn random_planet_type(rng: &mut ChaCha8Rng) -> PlanetType {
    PlanetType::ALL[rng.gen_range(0..PlanetType::ALL.len())]
}

const COMMON_MEAN: f64 = 0.5;
const RARE_MEAN: f64 = 0.1;
const ABUNDANCE_VARIANCE: f64 = 0.02;
const COMMON_THRESHOLD: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Abundance {
    Common,
    Rare,
}

impl Abundance {
    pub fn mean(self) -> f64 {
        match self {
            Abundance::Common => COMMON_MEAN,
            Abundance::Rare => RARE_MEAN,
        }
    }

    /// Beta shape parameters matching this abundance's mean and the shared variance.
    pub fn beta_params(self) -> (f64, f64) {
        let mean = self.mean();
        let k = mean * (1.0 - mean) / ABUNDANCE_VARIANCE - 1.0;
        (mean * k, (1.0 - mean) * k)
    }
}

pub fn abundance(kind: PlanetType, resource: ResourceType) -> Abundance {
    let listed = planet_profile(kind)
        .possible_resources
        .iter()
        .find(|(r, _)| *r == resource)
        .map(|(_, p)| *p)
        .unwrap_or(0.0);
    if listed >= COMMON_THRESHOLD {
        Abundance::Common
    } else {
        Abundance::Rare
    }
}

/// Samples an amount in 0..=100 for every resource type; zero amounts are left out.
pub fn generate_resources(
    rng: &mut ChaCha8Rng,
    kind: PlanetType,
) -> BTreeMap<ResourceType, u32> {
    let mut resources = BTreeMap::new();
    for resource in ResourceType::ALL {
        let (alpha, beta) = abundance(kind, *resource).beta_params();
        let Ok(dist) = Beta::new(alpha, beta) else {
            continue;
        };
        let amount = (dist.sample(rng) * 100.0).round().clamp(0.0, 100.0) as u32;
        if amount > 0 {
            resources.insert(*resource, amount);
        }
    }
    resources
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn star_weights_sum_to_ten() {
        let total: u32 = StarType::ALL.iter().map(|s| star_profile(*s).weight).sum();
        assert_eq!(total, 10);
    }

    #[test]
    fn weighted_star_draw_favours_main_sequence() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut main = 0;
        let mut blue = 0;
        for _ in 0..2000 {
            match random_star_type(&mut rng) {
                StarType::MainSequence => main += 1,
                StarType::BlueGiant => blue += 1,
                _ => {}
            }
        }
        assert!(main > blue * 2, "main={main} blue={blue}");
    }

    #[test]
    fn beta_params_reproduce_mean() {
        for abundance in [Abundance::Common, Abundance::Rare] {
            let (a, b) = abundance.beta_params();
            assert!(a > 0.0 && b > 0.0);
            let mean = a / (a + b);
            assert!((mean - abundance.mean()).abs() < 1e-12);
            let variance = a * b / ((a + b).powi(2) * (a + b + 1.0));
            assert!((variance - ABUNDANCE_VARIANCE).abs() < 1e-12);
        }
    }

    #[test]
    fn listed_resources_above_threshold_are_common() {
        assert_eq!(
            abundance(PlanetType::Oceanic, ResourceType::Water),
            Abundance::Common
        );
        assert_eq!(
            abundance(PlanetType::Oceanic, ResourceType::Gases),
            Abundance::Rare
        );
        assert_eq!(
            abundance(PlanetType::GasGiant, ResourceType::Crystals),
            Abundance::Rare
        );
    }

    #[test]
    fn generated_amounts_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for kind in PlanetType::ALL {
            for _ in 0..50 {
                let resources = generate_resources(&mut rng, *kind);
                assert!(resources.values().all(|amount| (1..=100).contains(amount)));
            }
        }
    }

    #[test]
    fn common_resources_average_higher_than_rare() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let (mut water, mut crystals) = (0u32, 0u32);
        for _ in 0..500 {
            let resources = generate_resources(&mut rng, PlanetType::Oceanic);
            water += resources.get(&ResourceType::Water).copied().unwrap_or(0);
            crystals += resources.get(&ResourceType::Crystals).copied().unwrap_or(0);
        }
        assert!(water > crystals * 2, "water={water} crystals={crystals}");
    }
}
