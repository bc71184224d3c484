//! Persisted, versioned settings and their migration.
//!
//! The settings live in a small JSON document with one section per [`BradleyVariant`].
//! On load, a document whose `Version` sorts before [`SETTINGS_VERSION`] (plain string
//! comparison) is replaced wholesale by [`Settings::default`]. Sections with negative or
//! inverted bounds, or a maximum above [`crate::range::SCIENTIST_LIMIT`], are replaced by
//! the default range. The cleaned document is written back so the file on disk always
//! reflects what is in effect.
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::range::{
    RangeConfig, SpawnRanges, DEFAULT_MAXIMUM_SCIENTISTS, DEFAULT_MINIMUM_SCIENTISTS,
};
use crate::spawn::BradleyVariant;

/// Version written into freshly created or migrated settings.
pub const SETTINGS_VERSION: &str = "1.1.0";

/// Versions that introduced incompatible layouts. Documents older than a step are reset.
const MIGRATION_STEPS: [&str; 2] = ["1.0.0", "1.1.0"];

/// Scientist count bounds for one APC variant, as stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSection {
    #[serde(rename = "Minimum Number Of Scientists To Spawn")]
    pub minimum: i64,
    #[serde(rename = "Maximum Number Of Scientists To Spawn")]
    pub maximum: i64,
}

impl Default for RangeSection {
    fn default() -> Self {
        Self {
            minimum: DEFAULT_MINIMUM_SCIENTISTS as i64,
            maximum: DEFAULT_MAXIMUM_SCIENTISTS as i64,
        }
    }
}

impl TryFrom<RangeSection> for RangeConfig {
    type Error = Error;

    fn try_from(section: RangeSection) -> Result<Self> {
        let minimum = u32::try_from(section.minimum).map_err(|_| {
            Error::InvalidConfig(format!(
                "minimum must be a non-negative count, got {}",
                section.minimum
            ))
        })?;
        let maximum = u32::try_from(section.maximum).map_err(|_| {
            Error::InvalidConfig(format!(
                "maximum must be a non-negative count, got {}",
                section.maximum
            ))
        })?;
        RangeConfig::new(minimum, maximum)
    }
}

impl From<RangeConfig> for RangeSection {
    fn from(range: RangeConfig) -> Self {
        Self {
            minimum: range.minimum() as i64,
            maximum: range.maximum() as i64,
        }
    }
}

/// The settings document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// A missing version reads as the empty string, which predates every release.
    #[serde(rename = "Version", default)]
    pub version: String,

    #[serde(rename = "Road Bradley", default)]
    pub road: RangeSection,

    #[serde(rename = "Launch Site Bradley", default)]
    pub launch_site: RangeSection,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION.to_owned(),
            road: RangeSection::default(),
            launch_site: RangeSection::default(),
        }
    }
}

impl Settings {
    /// Parses a document without migrating or validating it.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pretty-printed JSON for this document.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses, migrates and validates a document.
    pub fn load_from_json(json: &str) -> Result<Self> {
        let mut settings = Self::from_json(json)?;
        settings.migrate();
        settings.sanitize();
        Ok(settings)
    }

    /// Whether this document predates [`SETTINGS_VERSION`].
    pub fn is_outdated(&self) -> bool {
        self.version.as_str() < SETTINGS_VERSION
    }

    /// Brings an outdated document up to [`SETTINGS_VERSION`].
    ///
    /// Every migration step resets the whole document to defaults; earlier customization
    /// does not survive. Returns whether anything changed.
    pub fn migrate(&mut self) -> bool {
        if !self.is_outdated() {
            return false;
        }

        warn!("Settings changes detected! Updating...");
        let previous = self.version.clone();

        for step in MIGRATION_STEPS {
            if self.version.as_str() < step {
                *self = Settings {
                    version: previous.clone(),
                    ..Settings::default()
                };
            }
        }

        info!(
            "Settings update complete! Updated from version {} to {}",
            previous, SETTINGS_VERSION
        );
        self.version = SETTINGS_VERSION.to_owned();
        true
    }

    /// Replaces invalid sections with the default range, returning how many were replaced.
    pub fn sanitize(&mut self) -> usize {
        let mut replaced = 0;
        for (variant, section) in [
            (BradleyVariant::Road, &mut self.road),
            (BradleyVariant::LaunchSite, &mut self.launch_site),
        ] {
            if let Err(err) = RangeConfig::try_from(*section) {
                warn!(
                    "{} section rejected ({}); using defaults",
                    section_name(variant),
                    err
                );
                *section = RangeSection::default();
                replaced += 1;
            }
        }
        replaced
    }

    pub fn section(&self, variant: BradleyVariant) -> RangeSection {
        match variant {
            BradleyVariant::Road => self.road,
            BradleyVariant::LaunchSite => self.launch_site,
        }
    }

    /// The validated ranges. Any section that is still invalid yields the default range.
    pub fn ranges(&self) -> SpawnRanges {
        let range = |variant| RangeConfig::try_from(self.section(variant)).unwrap_or_default();
        SpawnRanges::new(
            range(BradleyVariant::Road),
            range(BradleyVariant::LaunchSite),
        )
    }
}

/// Key of a variant's section in the settings document.
pub fn section_name(variant: BradleyVariant) -> &'static str {
    match variant {
        BradleyVariant::Road => "Road Bradley",
        BradleyVariant::LaunchSite => "Launch Site Bradley",
    }
}

/// File-backed settings.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads, migrates and validates the settings, then writes them back.
    ///
    /// A missing file is created with defaults.
    pub fn load(&self) -> Result<Settings> {
        let settings = if self.path.exists() {
            let json = fs::read_to_string(&self.path)?;
            Settings::load_from_json(&json)?
        } else {
            info!("Creating default settings at {}", self.path.display());
            Settings::default()
        };

        self.save(&settings)?;
        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, settings.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUSTOM_CURRENT: &str = r#"{
        "Version": "1.1.0",
        "Road Bradley": {
            "Minimum Number Of Scientists To Spawn": 1,
            "Maximum Number Of Scientists To Spawn": 2
        },
        "Launch Site Bradley": {
            "Minimum Number Of Scientists To Spawn": 8,
            "Maximum Number Of Scientists To Spawn": 12
        }
    }"#;

    fn custom_with_version(version: &str) -> String {
        CUSTOM_CURRENT.replace("\"1.1.0\"", &format!("\"{version}\""))
    }

    #[test]
    fn default_document_matches_on_disk_layout() {
        let json = Settings::default().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["Version"], "1.1.0");
        assert_eq!(
            value["Road Bradley"]["Minimum Number Of Scientists To Spawn"],
            4
        );
        assert_eq!(
            value["Launch Site Bradley"]["Maximum Number Of Scientists To Spawn"],
            6
        );
    }

    #[test]
    fn current_version_keeps_customization() {
        let settings = Settings::load_from_json(CUSTOM_CURRENT).unwrap();
        assert_eq!(settings.version, SETTINGS_VERSION);
        assert_eq!(
            settings.ranges(),
            SpawnRanges::new(
                RangeConfig::new(1, 2).unwrap(),
                RangeConfig::new(8, 12).unwrap()
            )
        );
    }

    #[test]
    fn older_version_is_replaced_by_defaults() {
        let settings = Settings::load_from_json(&custom_with_version("0.9.0")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn version_between_steps_is_replaced_by_defaults() {
        let settings = Settings::load_from_json(&custom_with_version("1.0.5")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn version_compare_is_lexicographic() {
        // "1.10.0" < "1.1.0" would be false semantically, but as strings it sorts after.
        let newer = Settings::load_from_json(&custom_with_version("1.10.0")).unwrap();
        assert_eq!(newer.version, "1.10.0");
        assert_eq!(newer.road.maximum, 2);

        // "1.1" is a prefix of "1.1.0" and therefore older.
        let prefix = Settings::load_from_json(&custom_with_version("1.1")).unwrap();
        assert_eq!(prefix, Settings::default());
    }

    #[test]
    fn missing_version_counts_as_oldest() {
        let json = r#"{ "Road Bradley": {
            "Minimum Number Of Scientists To Spawn": 0,
            "Maximum Number Of Scientists To Spawn": 1 } }"#;
        let mut settings = Settings::from_json(json).unwrap();
        assert!(settings.is_outdated());
        assert!(settings.migrate());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn missing_sections_take_defaults() {
        let settings = Settings::load_from_json(r#"{ "Version": "1.1.0" }"#).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn invalid_sections_fall_back_to_defaults() {
        let json = r#"{
            "Version": "1.1.0",
            "Road Bradley": {
                "Minimum Number Of Scientists To Spawn": 9,
                "Maximum Number Of Scientists To Spawn": 3
            },
            "Launch Site Bradley": {
                "Minimum Number Of Scientists To Spawn": -1,
                "Maximum Number Of Scientists To Spawn": 5
            }
        }"#;
        let mut settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.sanitize(), 2);
        assert_eq!(settings.road, RangeSection::default());
        assert_eq!(settings.launch_site, RangeSection::default());
        assert_eq!(settings.sanitize(), 0);
    }

    #[test]
    fn oversized_maximum_falls_back_to_defaults() {
        let json = r#"{
            "Version": "1.1.0",
            "Road Bradley": {
                "Minimum Number Of Scientists To Spawn": 0,
                "Maximum Number Of Scientists To Spawn": 4294967295
            },
            "Launch Site Bradley": {
                "Minimum Number Of Scientists To Spawn": 2,
                "Maximum Number Of Scientists To Spawn": 1000
            }
        }"#;
        let settings = Settings::load_from_json(json).unwrap();
        assert_eq!(settings.road, RangeSection::default());
        assert_eq!(settings.ranges().road, RangeConfig::default());
        assert_eq!(settings.ranges().launch_site.maximum(), 1000);
    }

    #[test]
    fn ranges_never_expose_invalid_bounds() {
        let settings = Settings {
            road: RangeSection {
                minimum: 5,
                maximum: 1,
            },
            ..Settings::default()
        };
        assert_eq!(settings.ranges().road, RangeConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Settings::load_from_json("{ not json"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn store_creates_missing_file_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("config").join("bradley.json"));

        let settings = store.load().unwrap();
        assert_eq!(settings, Settings::default());

        let written = fs::read_to_string(store.path()).unwrap();
        assert_eq!(Settings::from_json(&written).unwrap(), Settings::default());
    }

    #[test]
    fn store_rewrites_migrated_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("bradley.json"));
        fs::write(store.path(), custom_with_version("0.9.0")).unwrap();

        let settings = store.load().unwrap();
        assert_eq!(settings, Settings::default());

        let written = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            Settings::from_json(&written).unwrap().version,
            SETTINGS_VERSION
        );
    }

    #[test]
    fn store_keeps_current_customization_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("bradley.json"));
        fs::write(store.path(), CUSTOM_CURRENT).unwrap();

        let settings = store.load().unwrap();
        assert_eq!(settings.launch_site.maximum, 12);
        assert_eq!(store.load().unwrap(), settings);
    }
}
