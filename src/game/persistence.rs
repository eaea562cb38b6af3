//! JSON save files.
//!
//! Enum values are written by symbolic name and resolved through each
//! enum's lookup table on load. Older saves may omit per-planet orbit data
//! or store resources as a `type -> amount` map; both are normalised here.

use crate::game::enums::{PlanetType, ResourceType, StarType};
use crate::game::error::SaveError;
use crate::game::geometry::Point;
use crate::game::planet::{random_angle, random_orbit_speed, Planet, FALLBACK_SIZE_RANGE};
use crate::game::properties::{star_profile, Rgb};
use crate::game::system::StarSystem;
use log::{debug, info};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DEFAULT_SAVE_DIR: &str = "saves";
pub const DEFAULT_SAVE_FILE: &str = "autosave.json";
pub const MAX_RESOURCE_AMOUNT: u32 = 100;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    pub star_systems: Vec<SystemRecord>,
    #[serde(default)]
    pub selected_system: Option<String>,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemRecord {
    pub x: i32,
    pub y: i32,
    pub name: String,
    pub star_type: String,
    pub size: u32,
    #[serde(default)]
    pub color: Option<Rgb>,
    pub planets: Vec<PlanetRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanetRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub orbit_number: Option<u32>,
    #[serde(default)]
    pub angle: Option<f64>,
    #[serde(default)]
    pub orbit_speed: Option<f64>,
    #[serde(default)]
    pub resources: ResourceRecords,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: u32,
}

/// Both resource layouts seen in save files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceRecords {
    List(Vec<ResourceRecord>),
    Map(BTreeMap<String, u32>),
}

impl Default for ResourceRecords {
    fn default() -> Self {
        ResourceRecords::List(Vec::new())
    }
}

impl ResourceRecords {
    pub fn from_resources(resources: &BTreeMap<ResourceType, u32>) -> Self {
        ResourceRecords::List(
            resources
                .iter()
                .map(|(kind, amount)| ResourceRecord {
                    kind: kind.name().to_string(),
                    amount: *amount,
                })
                .collect(),
        )
    }

    /// Resolves names and rejects any amount above [`MAX_RESOURCE_AMOUNT`].
    pub fn to_resources(&self) -> Result<BTreeMap<ResourceType, u32>, SaveError> {
        let entries: Vec<(&str, u32)> = match self {
            ResourceRecords::List(records) => records
                .iter()
                .map(|r| (r.kind.as_str(), r.amount))
                .collect(),
            ResourceRecords::Map(map) => map.iter().map(|(k, v)| (k.as_str(), *v)).collect(),
        };
        let mut resources = BTreeMap::new();
        for (name, amount) in entries {
            let kind = ResourceType::from_name(name)?;
            if amount > MAX_RESOURCE_AMOUNT {
                return Err(SaveError::OutOfRange {
                    field: "resource amount",
                    value: amount,
                    max: MAX_RESOURCE_AMOUNT,
                });
            }
            resources.insert(kind, amount);
        }
        Ok(resources)
    }
}

impl PlanetRecord {
    pub fn from_planet(planet: &Planet) -> Self {
        Self {
            name: planet.name.clone(),
            kind: planet.kind.name().to_string(),
            size: Some(planet.size),
            orbit_number: Some(planet.orbit_number),
            angle: Some(planet.angle),
            orbit_speed: Some(planet.orbit_speed),
            resources: ResourceRecords::from_resources(&planet.resources),
            x: planet.position.map(|p| p.x),
            y: planet.position.map(|p| p.y),
        }
    }

    /// Builds a planet, drawing fresh values for any orbit field the record lacks.
    pub fn to_planet(&self, index: usize, rng: &mut ChaCha8Rng) -> Result<Planet, SaveError> {
        let position = match (self.x, self.y) {
            (Some(x), Some(y)) => Some(Point::new(x, y)),
            _ => None,
        };
        Ok(Planet {
            name: self.name.clone(),
            kind: PlanetType::from_name(&self.kind)?,
            size: self
                .size
                .unwrap_or_else(|| rng.gen_range(FALLBACK_SIZE_RANGE)),
            orbit_number: self.orbit_number.unwrap_or(index as u32 + 1),
            angle: self.angle.unwrap_or_else(|| random_angle(rng)),
            orbit_speed: self.orbit_speed.unwrap_or_else(|| random_orbit_speed(rng)),
            resources: self.resources.to_resources()?,
            position,
        })
    }
}

impl SystemRecord {
    pub fn from_system(system: &StarSystem) -> Self {
        Self {
            x: system.x,
            y: system.y,
            name: system.name.clone(),
            star_type: system.star_type.name().to_string(),
            size: system.size,
            color: Some(system.color),
            planets: system.planets.iter().map(PlanetRecord::from_planet).collect(),
        }
    }

    pub fn to_system(&self, rng: &mut ChaCha8Rng) -> Result<StarSystem, SaveError> {
        let star_type = StarType::from_name(&self.star_type)?;
        let planets = self
            .planets
            .iter()
            .enumerate()
            .map(|(i, record)| record.to_planet(i, rng))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StarSystem {
            x: self.x,
            y: self.y,
            name: self.name.clone(),
            star_type,
            size: self.size,
            color: self.color.unwrap_or(star_profile(star_type).color),
            planets,
        })
    }
}

/// A fully resolved save: systems plus the index of the selected one.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedGame {
    pub systems: Vec<StarSystem>,
    pub selected_system: Option<usize>,
}

impl SaveFile {
    pub fn capture(
        systems: &[StarSystem],
        selected: Option<&StarSystem>,
        timestamp: String,
    ) -> Self {
        Self {
            star_systems: systems.iter().map(SystemRecord::from_system).collect(),
            selected_system: selected.map(|s| s.name.clone()),
            timestamp,
        }
    }

    /// Resolves every record; any unknown enum name fails the whole load.
    pub fn restore(&self, rng: &mut ChaCha8Rng) -> Result<LoadedGame, SaveError> {
        let systems = self
            .star_systems
            .iter()
            .map(|record| record.to_system(rng))
            .collect::<Result<Vec<_>, _>>()?;
        let selected_system = self
            .selected_system
            .as_ref()
            .and_then(|name| systems.iter().position(|s| &s.name == name));
        Ok(LoadedGame {
            systems,
            selected_system,
        })
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(data: &str) -> Result<Self, SaveError> {
        Ok(serde_json::from_str(data)?)
    }
}

/// Location of a single save file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveStore {
    dir: PathBuf,
    filename: String,
}

impl Default for SaveStore {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_DIR, DEFAULT_SAVE_FILE)
    }
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            filename: filename.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.filename)
    }

    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    pub fn save(&self, save: &SaveFile) -> Result<PathBuf, SaveError> {
        let path = self.path();
        let data = save.to_json()?;
        atomic_write(&path, data.as_bytes())?;
        info!(
            "Saved {} star systems to {}",
            save.star_systems.len(),
            path.display()
        );
        Ok(path)
    }

    pub fn load(&self) -> Result<SaveFile, SaveError> {
        let path = self.path();
        debug!("Reading save file {}", path.display());
        let data = fs::read_to_string(&path)?;
        SaveFile::from_json(&data)
    }
}

/// Writes `data` next to `path` as `<path>.tmp`, syncs it, then renames it over `path`.
///
/// A crash before the rename leaves any existing file at `path` intact.
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let result = write_synced(&tmp_path, data).and_then(|()| fs::rename(&tmp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}

#[cfg(not(target_arch = "wasm32"))]
fn unix_seconds() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Date, js_name = now)]
    fn date_now() -> f64;
}

#[cfg(target_arch = "wasm32")]
fn unix_seconds() -> u64 {
    (date_now() / 1000.0) as u64
}

pub fn timestamp_now() -> String {
    format_timestamp(unix_seconds())
}

/// ISO-8601 UTC rendering of a Unix timestamp, e.g. `2024-02-29T13:05:09Z`.
pub fn format_timestamp(secs: u64) -> String {
    let days = (secs / 86_400) as i64;
    let rem = secs % 86_400;
    let (hour, minute, second) = (rem / 3600, rem % 3600 / 60, rem % 60);

    // Days since 1970-01-01 to a proleptic Gregorian date.
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        year, month, day, hour, minute, second
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::properties::RED;
    use rand::SeedableRng;

    fn sample_system() -> StarSystem {
        let mut resources = BTreeMap::new();
        resources.insert(ResourceType::Minerals, 72);
        resources.insert(ResourceType::RareElements, 8);
        StarSystem {
            x: 240,
            y: 310,
            name: "Rigel Nexus".to_string(),
            star_type: StarType::RedGiant,
            size: 9,
            color: RED,
            planets: vec![Planet {
                name: "Rigel Nexus 1".to_string(),
                kind: PlanetType::Volcanic,
                size: 11,
                orbit_number: 1,
                angle: 1.25,
                orbit_speed: 0.33,
                resources,
                position: None,
            }],
        }
    }

    #[test]
    fn capture_writes_symbolic_names_and_resource_list() {
        let system = sample_system();
        let save = SaveFile::capture(
            std::slice::from_ref(&system),
            Some(&system),
            "2024-01-01T00:00:00Z".to_string(),
        );
        let value: serde_json::Value =
            serde_json::from_str(&save.to_json().unwrap()).unwrap();

        let sys = &value["star_systems"][0];
        assert_eq!(sys["star_type"], "RED_GIANT");
        assert_eq!(sys["color"], serde_json::json!([255, 100, 100]));
        let planet = &sys["planets"][0];
        assert_eq!(planet["type"], "VOLCANIC");
        assert_eq!(
            planet["resources"],
            serde_json::json!([
                {"type": "MINERALS", "amount": 72},
                {"type": "RARE_ELEMENTS", "amount": 8}
            ])
        );
        assert!(planet.get("x").is_none());
        assert_eq!(value["selected_system"], "Rigel Nexus");
    }

    #[test]
    fn restore_round_trips_captured_systems() {
        let mut system = sample_system();
        system.planets[0].position = Some(Point::new(512.5, 300.25));
        let save = SaveFile::capture(std::slice::from_ref(&system), None, String::new());
        let reparsed = SaveFile::from_json(&save.to_json().unwrap()).unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let loaded = reparsed.restore(&mut rng).unwrap();
        assert_eq!(loaded.systems, vec![system]);
        assert_eq!(loaded.selected_system, None);
    }

    #[test]
    fn map_and_list_resources_normalise_identically() {
        let list: ResourceRecords = serde_json::from_str(
            r#"[{"type": "WATER", "amount": 90}, {"type": "GASES", "amount": 12}]"#,
        )
        .unwrap();
        let map: ResourceRecords =
            serde_json::from_str(r#"{"WATER": 90, "GASES": 12}"#).unwrap();
        assert!(matches!(list, ResourceRecords::List(_)));
        assert!(matches!(map, ResourceRecords::Map(_)));
        assert_eq!(list.to_resources().unwrap(), map.to_resources().unwrap());
    }

    #[test]
    fn legacy_planet_fields_are_backfilled() {
        let json = r#"{
            "star_systems": [{
                "x": 100, "y": 120, "name": "Lyra II", "star_type": "BLUE_GIANT",
                "size": 7,
                "planets": [
                    {"name": "Lyra II 1", "type": "OCEANIC", "resources": []},
                    {"name": "Lyra II 2", "type": "DESERT"}
                ]
            }],
            "selected_system": "Lyra II"
        }"#;
        let save = SaveFile::from_json(json).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let loaded = save.restore(&mut rng).unwrap();

        let system = &loaded.systems[0];
        assert_eq!(system.color, star_profile(StarType::BlueGiant).color);
        assert_eq!(loaded.selected_system, Some(0));
        for (i, planet) in system.planets.iter().enumerate() {
            assert_eq!(planet.orbit_number as usize, i + 1);
            assert!(FALLBACK_SIZE_RANGE.contains(&planet.size));
            assert!((0.0..std::f64::consts::TAU).contains(&planet.angle));
            assert!((0.2..=0.5).contains(&planet.orbit_speed));
            assert!(planet.resources.is_empty());
        }
    }

    #[test]
    fn unknown_names_fail_the_load() {
        let mut save = SaveFile::capture(&[sample_system()], None, String::new());
        save.star_systems[0].star_type = "NONEXISTENT".to_string();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = save.restore(&mut rng).unwrap_err();
        assert!(matches!(err, SaveError::UnknownName(ref e) if e.kind == "star type"));

        let mut save = SaveFile::capture(&[sample_system()], None, String::new());
        save.star_systems[0].planets[0].resources = ResourceRecords::List(vec![ResourceRecord {
            kind: "UNOBTAINIUM".to_string(),
            amount: 5,
        }]);
        let err = save.restore(&mut rng).unwrap_err();
        assert!(matches!(err, SaveError::UnknownName(ref e) if e.kind == "resource type"));
    }

    #[test]
    fn resource_amounts_above_one_hundred_fail_the_load() {
        let json = r#"{
            "star_systems": [{
                "x": 100, "y": 100, "name": "Orion Hub", "star_type": "RED_GIANT",
                "size": 9, "planets": [{
                    "name": "Orion Hub 1", "type": "DESERT",
                    "resources": [{"type": "MINERALS", "amount": 250}]
                }]
            }]
        }"#;
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = SaveFile::from_json(json)
            .unwrap()
            .restore(&mut rng)
            .unwrap_err();
        assert!(matches!(err, SaveError::OutOfRange { value: 250, max: 100, .. }));

        let map: ResourceRecords = serde_json::from_str(r#"{"WATER": 101}"#).unwrap();
        assert!(map.to_resources().is_err());
        let edge: ResourceRecords = serde_json::from_str(r#"{"WATER": 100, "GASES": 0}"#).unwrap();
        assert_eq!(edge.to_resources().unwrap().len(), 2);
    }

    #[test]
    fn missing_required_keys_are_json_errors() {
        let err = SaveFile::from_json(r#"{"selected_system": null}"#).unwrap_err();
        assert!(matches!(err, SaveError::Json(_)));
        let err = SaveFile::from_json("not json").unwrap_err();
        assert!(matches!(err, SaveError::Json(_)));
    }

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("galaxy_conquest_persistence_{}", name));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn store_creates_directory_and_leaves_no_temp_file() {
        let dir = test_dir("store_creates");
        let store = SaveStore::new(dir.join("nested"), "slot.json");
        assert!(!store.exists());

        let save = SaveFile::capture(&[sample_system()], None, timestamp_now());
        let path = store.save(&save).unwrap();
        assert!(store.exists());
        assert!(!dir.join("nested/slot.json.tmp").exists());
        assert_eq!(path, dir.join("nested/slot.json"));
        assert_eq!(store.load().unwrap(), save);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn atomic_write_replaces_existing_file() {
        let dir = test_dir("atomic_replace");
        let path = dir.join("save.json");
        atomic_write(&path, b"first").unwrap();
        fs::write(dir.join("save.json.tmp"), b"leftover").unwrap();
        atomic_write(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");
        assert!(!dir.join("save.json.tmp").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = test_dir("failed_rename");
        // A non-empty directory where the save should go makes the rename fail.
        let path = dir.join("save.json");
        fs::create_dir_all(path.join("occupied")).unwrap();

        assert!(atomic_write(&path, b"data").is_err());
        assert!(!dir.join("save.json.tmp").exists());
        assert!(path.join("occupied").is_dir());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn loading_a_missing_file_is_an_io_error() {
        let dir = test_dir("missing");
        let err = SaveStore::new(&dir, "nope.json").load().unwrap_err();
        assert!(matches!(err, SaveError::Io(_)));
    }

    #[test]
    fn timestamps_format_as_utc() {
        assert_eq!(format_timestamp(0), "1970-01-01T00:00:00Z");
        assert_eq!(format_timestamp(951_782_400), "2000-02-29T00:00:00Z");
        assert_eq!(format_timestamp(1_709_211_909), "2024-02-29T13:05:09Z");
    }
}
