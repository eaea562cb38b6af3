use galaxy_conquest::game::enums::{PlanetType, StarType};
use galaxy_conquest::game::geometry::Rect;
use galaxy_conquest::game::persistence::{PlanetRecord, ResourceRecords, SaveFile};
use galaxy_conquest::game::planet::FALLBACK_SIZE_RANGE;
use galaxy_conquest::game::properties::{generate_resources, star_profile, YELLOW};
use galaxy_conquest::game::system::{GalaxyConfig, GalaxyGenerator, StarSystem, SPACING_FACTOR};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use std::f64::consts::TAU;

fn system(x: i32, y: i32, size: u32) -> StarSystem {
    StarSystem {
        x,
        y,
        name: format!("P{x}:{y}"),
        star_type: StarType::MainSequence,
        size,
        color: YELLOW,
        planets: Vec::new(),
    }
}

fn star_type() -> impl Strategy<Value = StarType> {
    prop::sample::select(StarType::ALL.to_vec())
}

fn planet_type() -> impl Strategy<Value = PlanetType> {
    prop::sample::select(PlanetType::ALL.to_vec())
}

proptest! {
    /// Property: collision is symmetric for any pair of systems
    #[test]
    fn collision_is_symmetric(
        ax in -2000i32..2000, ay in -2000i32..2000, asize in 1u32..40,
        bx in -2000i32..2000, by in -2000i32..2000, bsize in 1u32..40,
    ) {
        let a = system(ax, ay, asize);
        let b = system(bx, by, bsize);
        prop_assert_eq!(a.collides_with(&b), b.collides_with(&a));
    }

    /// Property: exactly the spacing distance apart is allowed, one pixel closer is not
    #[test]
    fn collision_threshold_is_exact(asize in 1u32..40, bsize in 1u32..40, vertical in any::<bool>()) {
        let gap = (SPACING_FACTOR * (asize + bsize) as f64) as i32;
        let a = system(0, 0, asize);
        let (at, closer) = if vertical {
            (system(0, gap, bsize), system(0, gap - 1, bsize))
        } else {
            (system(gap, 0, bsize), system(gap - 1, 0, bsize))
        };
        prop_assert!(!a.collides_with(&at));
        prop_assert!(a.collides_with(&closer));
    }

    /// Property: never more systems than requested, and every pair is spaced
    #[test]
    fn generation_respects_count_and_spacing(seed in any::<u64>(), count in 0usize..25) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let config = GalaxyConfig { systems: count, ..GalaxyConfig::default() };
        let galaxy = GalaxyGenerator::with_config(&mut rng, config).generate();
        prop_assert!(galaxy.systems.len() <= count);
        prop_assert!(galaxy.attempts <= 1000);
        prop_assert!(galaxy.is_well_spaced());
    }

    /// Property: placement stays inside the margin for any area
    #[test]
    fn generation_stays_inside_margin(seed in any::<u64>(), w in 0.0f64..1500.0, h in 0.0f64..1500.0) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let config = GalaxyConfig {
            area: Rect::new(0.0, 0.0, w, h),
            ..GalaxyConfig::default()
        };
        let galaxy = GalaxyGenerator::with_config(&mut rng, config).generate();
        for s in &galaxy.systems {
            prop_assert!(s.x >= 100 && s.x as f64 <= w - 100.0);
            prop_assert!(s.y >= 100 && s.y as f64 <= h - 100.0);
        }
    }

    /// Property: planet count stays within the star type's range
    #[test]
    fn planet_count_matches_star_type(seed in any::<u64>(), kind in star_type()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let s = StarSystem::generate(&mut rng, 0, 0, "Prop Nexus".to_string(), Some(kind));
        prop_assert!(star_profile(kind).planets.contains(&s.planets.len()));
    }

    /// Property: every generated resource amount is within 0..=100
    #[test]
    fn resource_amounts_are_bounded(seed in any::<u64>(), kind in planet_type()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for amount in generate_resources(&mut rng, kind).values() {
            prop_assert!(*amount <= 100);
            prop_assert!(*amount > 0);
        }
    }

    /// Property: saving and loading a generated galaxy preserves every field
    #[test]
    fn save_load_round_trip(seed in any::<u64>(), count in 1usize..12) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let config = GalaxyConfig { systems: count, ..GalaxyConfig::default() };
        let galaxy = GalaxyGenerator::with_config(&mut rng, config).generate();
        let selected = galaxy.systems.last();

        let json = SaveFile::capture(&galaxy.systems, selected, "2024-05-01T00:00:00Z".into())
            .to_json()
            .unwrap();
        let loaded = SaveFile::from_json(&json).unwrap().restore(&mut rng).unwrap();

        prop_assert_eq!(&loaded.systems, &galaxy.systems);
        prop_assert_eq!(loaded.selected_system, galaxy.systems.len().checked_sub(1));
    }

    /// Property: planets missing orbit data load with in-range defaults
    #[test]
    fn missing_planet_fields_are_backfilled(seed in any::<u64>(), planets in 1usize..8) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let records = (0..planets)
            .map(|i| PlanetRecord {
                name: format!("Old {}", i + 1),
                kind: "OCEANIC".to_string(),
                size: None,
                orbit_number: None,
                angle: None,
                orbit_speed: None,
                resources: ResourceRecords::Map(BTreeMap::from([("WATER".to_string(), 90)])),
                x: None,
                y: None,
            })
            .collect::<Vec<_>>();
        let json = serde_json::json!({
            "star_systems": [{
                "x": 300, "y": 300, "name": "Old", "star_type": "RED_GIANT",
                "size": 10, "color": [255, 100, 100], "planets": records,
            }],
            "selected_system": null,
            "timestamp": "2023-01-01T00:00:00Z",
        })
        .to_string();

        let loaded = SaveFile::from_json(&json).unwrap().restore(&mut rng).unwrap();
        for (i, planet) in loaded.systems[0].planets.iter().enumerate() {
            prop_assert_eq!(planet.orbit_number as usize, i + 1);
            prop_assert!(FALLBACK_SIZE_RANGE.contains(&planet.size));
            prop_assert!((0.0..TAU).contains(&planet.angle));
            prop_assert!((0.2..=0.5).contains(&planet.orbit_speed));
            prop_assert_eq!(planet.resources.len(), 1);
        }
    }
}
