use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

const PREFIXES: &[&str] = &[
    "Alpha",
    "Beta",
    "Gamma",
    "Delta",
    "Nova",
    "Proxima",
    "Sirius",
    "Vega",
    "Rigel",
    "Antares",
    "Polaris",
    "Centauri",
    "Cygnus",
    "Lyra",
    "Orion",
    "Andromeda",
    "Cassiopeia",
    "Perseus",
];
const SUFFIXES: &[&str] = &[
    "Prime", "Minor", "Major", "Core", "Binary", "Nexus", "Gateway", "Hub", "Cluster", "Network",
    "System", "Complex", "Station",
];
const NUMERALS: &[&str] = &["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X"];

const NUMERAL_CHANCE: f64 = 0.3;
const UNIQUE_ATTEMPTS: usize = 64;

fn pick<'a>(rng: &mut ChaCha8Rng, options: &'a [&str]) -> &'a str {
    let idx = rng.gen_range(0..options.len());
    options[idx]
}

fn build_system_name_candidate(rng: &mut ChaCha8Rng) -> String {
    if rng.gen::<f64>() < NUMERAL_CHANCE {
        format!("{} {}", pick(rng, PREFIXES), pick(rng, NUMERALS))
    } else {
        format!("{} {}", pick(rng, PREFIXES), pick(rng, SUFFIXES))
    }
}

/// Draws a system name, retrying a bounded number of times to avoid names in `used`.
///
/// Once the attempts run out the last candidate is returned even if it
/// repeats; names are unique by convention only.
pub fn generate_system_name(rng: &mut ChaCha8Rng, used: &mut HashSet<String>) -> String {
    claim_system_name(rng, used).0
}

/// Like [`generate_system_name`], also reporting whether the name was newly
/// added to `used` (false when a duplicate had to be accepted).
pub fn claim_system_name(rng: &mut ChaCha8Rng, used: &mut HashSet<String>) -> (String, bool) {
    let mut candidate = build_system_name_candidate(rng);
    for _ in 0..UNIQUE_ATTEMPTS {
        if !used.contains(&candidate) {
            break;
        }
        candidate = build_system_name_candidate(rng);
    }
    let fresh = used.insert(candidate.clone());
    (candidate, fresh)
}

/// Every name the word lists can produce.
#[cfg(test)]
pub(crate) fn all_system_names() -> HashSet<String> {
    PREFIXES
        .iter()
        .flat_map(|p| {
            SUFFIXES
                .iter()
                .chain(NUMERALS)
                .map(move |s| format!("{} {}", p, s))
        })
        .collect()
}

pub fn planet_name(system_name: &str, orbit_number: u32) -> String {
    format!("{} {}", system_name, orbit_number)
}

/// Number of distinct names the word lists can produce.
pub fn name_space() -> usize {
    PREFIXES.len() * (SUFFIXES.len() + NUMERALS.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn names_are_deterministic_for_a_seed() {
        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        let mut used_a = HashSet::new();
        let mut used_b = HashSet::new();
        for _ in 0..10 {
            assert_eq!(
                generate_system_name(&mut a, &mut used_a),
                generate_system_name(&mut b, &mut used_b)
            );
        }
    }

    #[test]
    fn names_use_known_words() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut used = HashSet::new();
        for _ in 0..40 {
            let name = generate_system_name(&mut rng, &mut used);
            let (prefix, rest) = name.split_once(' ').expect("two words");
            assert!(PREFIXES.contains(&prefix), "{name}");
            assert!(SUFFIXES.contains(&rest) || NUMERALS.contains(&rest), "{name}");
        }
    }

    #[test]
    fn small_galaxies_get_unique_names() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut used = HashSet::new();
        for _ in 0..20 {
            generate_system_name(&mut rng, &mut used);
        }
        assert_eq!(used.len(), 20);
    }

    #[test]
    fn exhausted_name_space_does_not_panic() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut used = HashSet::new();
        for _ in 0..name_space() + 10 {
            generate_system_name(&mut rng, &mut used);
        }
        assert!(used.len() <= name_space());
    }

    #[test]
    fn duplicate_names_are_not_reported_fresh() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let mut used = all_system_names();
        assert_eq!(used.len(), name_space());
        let (name, fresh) = claim_system_name(&mut rng, &mut used);
        assert!(!fresh);
        assert!(used.contains(&name));
        assert_eq!(used.len(), name_space());

        let mut empty = HashSet::new();
        assert!(claim_system_name(&mut rng, &mut empty).1);
    }

    #[test]
    fn planet_names_follow_orbit_index() {
        assert_eq!(planet_name("Vega Prime", 3), "Vega Prime 3");
    }
}
