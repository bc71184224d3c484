use bradley_spawns::prelude::*;
use bradley_spawns_examples::init_tracing;
use tracing::info;

/// A document written by an old release, with customized counts.
const OLD_DOCUMENT: &str = r#"{
  "Version": "0.9.0",
  "Road Bradley": {
    "Minimum Number Of Scientists To Spawn": 10,
    "Maximum Number Of Scientists To Spawn": 12
  },
  "Launch Site Bradley": {
    "Minimum Number Of Scientists To Spawn": 1,
    "Maximum Number Of Scientists To Spawn": 2
  }
}"#;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let dir = std::env::temp_dir().join("bradley_spawns_migration_demo");
    std::fs::create_dir_all(&dir)?;
    let store = SettingsStore::new(dir.join("NotEnoughBradleyScientists.json"));
    std::fs::write(store.path(), OLD_DOCUMENT)?;

    // Loading an outdated document resets it to the defaults of the current version.
    let settings = store.load()?;
    info!(
        "Version {} -> {} (current {})",
        "0.9.0", settings.version, SETTINGS_VERSION
    );

    let ranges = settings.ranges();
    for variant in [BradleyVariant::Road, BradleyVariant::LaunchSite] {
        let range = ranges.get(variant);
        info!(
            "{:?}: {}..={} scientists",
            variant,
            range.minimum(),
            range.maximum()
        );
    }

    info!("Rewritten file:\n{}", std::fs::read_to_string(store.path())?);
    Ok(())
}
