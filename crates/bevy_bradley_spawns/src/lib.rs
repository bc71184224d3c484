//! Bevy plugin for bradley_spawns: resizes scientist deployments of Bradley APC entities.
#![forbid(unsafe_code)]

use std::path::PathBuf;

use bevy::prelude::*;
use bradley_spawns::prelude::{
    handle_deployment, BradleyApc, Deployment, Settings, SettingsStore, SpawnRanges,
};
pub use events::{BradleySpawnMessage, MessageSink, ReloadBradleySettings};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

mod events;

/// Convenient re-exports for common types. Import with `use bevy_bradley_spawns::prelude::*;`.
pub mod prelude {
    pub use bradley_spawns::prelude::*;

    pub use crate::events::{BradleySpawnMessage, MessageSink, ReloadBradleySettings};
    pub use crate::{
        Bradley, BradleySettingsFile, BradleySpawnSettings, BradleySpawnsPlugin,
        ScientistDeployment, ScientistPrefab, ScientistsDeploying, SpawnRng,
    };
}

/// Where the plugin takes its settings from.
#[derive(Debug, Clone)]
enum SettingsSource {
    File(PathBuf),
    Inline(Settings),
}

/// Bevy plugin that resizes scientist deployments according to the configured ranges.
pub struct BradleySpawnsPlugin {
    source: SettingsSource,
    seed: Option<u64>,
}

impl BradleySpawnsPlugin {
    /// Loads (and creates or migrates) the settings file at `path` when the plugin is built.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: SettingsSource::File(path.into()),
            seed: None,
        }
    }

    /// Uses in-memory settings; nothing is read from or written to disk.
    pub fn from_settings(settings: Settings) -> Self {
        Self {
            source: SettingsSource::Inline(settings),
            seed: None,
        }
    }

    /// Seeds the count draws for reproducible deployments.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for BradleySpawnsPlugin {
    fn default() -> Self {
        Self::from_settings(Settings::default())
    }
}

/// Settings currently in effect.
#[derive(Resource, Debug, Clone, Default)]
pub struct BradleySpawnSettings {
    pub settings: Settings,
    pub ranges: SpawnRanges,
}

impl From<Settings> for BradleySpawnSettings {
    fn from(settings: Settings) -> Self {
        let ranges = settings.ranges();
        Self { settings, ranges }
    }
}

/// Settings file backing [`BradleySpawnSettings`], if any.
#[derive(Resource, Debug, Clone, Default)]
pub struct BradleySettingsFile(pub Option<SettingsStore>);

/// RNG used to draw scientist counts.
#[derive(Resource)]
pub struct SpawnRng(pub StdRng);

/// Marks a Bradley APC entity.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Bradley {
    /// Set for APCs patrolling roads, clear for the launch site APC.
    pub road_spawned: bool,
}

impl Bradley {
    pub fn road() -> Self {
        Self { road_spawned: true }
    }

    pub fn launch_site() -> Self {
        Self {
            road_spawned: false,
        }
    }
}

/// Reference to the prefab a scientist is instantiated from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScientistPrefab(pub String);

impl ScientistPrefab {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }
}

/// Scientists an APC is about to deploy, as produced by the host.
///
/// `positions` and `prefabs` are parallel lists.
#[derive(Component, Debug, Clone, Default)]
pub struct ScientistDeployment {
    pub positions: Vec<Vec3>,
    pub prefabs: Vec<ScientistPrefab>,
    pub attacker: Option<Entity>,
}

impl ScientistDeployment {
    pub fn new(positions: Vec<Vec3>, prefabs: Vec<ScientistPrefab>) -> Self {
        Self {
            positions,
            prefabs,
            attacker: None,
        }
    }

    pub fn with_attacker(mut self, attacker: Entity) -> Self {
        self.attacker = Some(attacker);
        self
    }
}

/// [`EntityEvent`] the host triggers on an APC once its [`ScientistDeployment`] is filled in.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct ScientistsDeploying {
    /// The APC entity.
    pub entity: Entity,
}

impl ScientistsDeploying {
    pub fn new(entity: Entity) -> Self {
        Self { entity }
    }
}

impl Plugin for BradleySpawnsPlugin {
    fn build(&self, app: &mut App) {
        let (settings, file) = match &self.source {
            SettingsSource::Inline(settings) => {
                let mut settings = settings.clone();
                settings.migrate();
                settings.sanitize();
                (settings, None)
            }
            SettingsSource::File(path) => {
                let store = SettingsStore::new(path.clone());
                let settings = store.load().unwrap_or_else(|err| {
                    error!(
                        "Failed to load Bradley settings from {}: {}; using defaults",
                        path.display(),
                        err
                    );
                    Settings::default()
                });
                (settings, Some(store))
            }
        };

        let seed = self.seed.unwrap_or_else(|| rand::rng().random());

        app.add_message::<BradleySpawnMessage>()
            .add_message::<ReloadBradleySettings>()
            .insert_resource(BradleySpawnSettings::from(settings))
            .insert_resource(BradleySettingsFile(file))
            .insert_resource(SpawnRng(StdRng::seed_from_u64(seed)))
            .add_systems(Update, reload_settings)
            .add_observer(resize_deployment);
    }
}

fn resize_deployment(
    deploying: On<ScientistsDeploying>,
    mut apcs: Query<(&Bradley, &mut ScientistDeployment)>,
    settings: Res<BradleySpawnSettings>,
    mut rng: ResMut<SpawnRng>,
    mut messages: ResMut<Messages<BradleySpawnMessage>>,
) {
    let entity = deploying.entity;
    let Ok((bradley, mut deployment)) = apcs.get_mut(entity) else {
        return;
    };

    let apc = BradleyApc::new(entity.to_bits(), bradley.road_spawned);
    let deployment = &mut *deployment;
    let mut payload = Deployment {
        apc: Some(&apc),
        attacker: deployment.attacker.map(Entity::to_bits),
        kinds: Some(&mut deployment.prefabs),
        positions: Some(&mut deployment.positions),
    };
    let mut sink = MessageSink {
        apc: entity,
        messages: &mut *messages,
    };

    handle_deployment(&mut payload, &settings.ranges, &mut rng.0, &mut sink);
}

fn reload_settings(
    mut requests: MessageReader<ReloadBradleySettings>,
    file: Res<BradleySettingsFile>,
    mut settings: ResMut<BradleySpawnSettings>,
) {
    if requests.read().count() == 0 {
        return;
    }

    let Some(store) = &file.0 else {
        warn!("Bradley settings reload requested, but the plugin has no settings file");
        return;
    };

    match store.load() {
        Ok(loaded) => {
            *settings = BradleySpawnSettings::from(loaded);
            info!("Reloaded Bradley settings from {}", store.path().display());
        }
        Err(err) => {
            error!(
                "Failed to reload Bradley settings from {}: {}",
                store.path().display(),
                err
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use bradley_spawns::prelude::{RangeConfig, RangeSection};

    use super::*;

    fn settings(road: i64, launch_site: i64) -> Settings {
        Settings {
            road: RangeSection {
                minimum: road,
                maximum: road,
            },
            launch_site: RangeSection {
                minimum: launch_site,
                maximum: launch_site,
            },
            ..Settings::default()
        }
    }

    fn deployment() -> ScientistDeployment {
        ScientistDeployment::new(
            vec![Vec3::X, Vec3::Y, Vec3::Z],
            vec![
                ScientistPrefab::new("scientist_heavy"),
                ScientistPrefab::new("scientist"),
                ScientistPrefab::new("scientist"),
            ],
        )
    }

    fn setup_app(settings: Settings) -> App {
        let mut app = App::new();
        app.add_plugins(BradleySpawnsPlugin::from_settings(settings).with_seed(7));
        app
    }

    #[test]
    fn road_apc_deployment_is_resized() {
        let mut app = setup_app(settings(5, 1));
        let apc = app.world_mut().spawn((Bradley::road(), deployment())).id();

        app.world_mut().trigger(ScientistsDeploying::new(apc));

        let deployed = app.world().get::<ScientistDeployment>(apc).unwrap();
        assert_eq!(
            deployed.positions,
            vec![Vec3::X, Vec3::Y, Vec3::Z, Vec3::X, Vec3::Y]
        );
        assert_eq!(deployed.prefabs.len(), 5);
        assert_eq!(
            deployed.prefabs[3],
            ScientistPrefab::new("scientist_heavy")
        );

        let messages = app.world().resource::<Messages<BradleySpawnMessage>>();
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn launch_site_apc_uses_its_own_range() {
        let mut app = setup_app(settings(5, 1));
        let apc = app
            .world_mut()
            .spawn((Bradley::launch_site(), deployment()))
            .id();

        app.world_mut().trigger(ScientistsDeploying::new(apc));

        let deployed = app.world().get::<ScientistDeployment>(apc).unwrap();
        assert_eq!(deployed.positions, vec![Vec3::X]);
        assert_eq!(
            deployed.prefabs,
            vec![ScientistPrefab::new("scientist_heavy")]
        );
    }

    #[test]
    fn entities_without_deployment_are_ignored() {
        let mut app = setup_app(settings(5, 5));
        let apc = app.world_mut().spawn(Bradley::road()).id();

        app.world_mut().trigger(ScientistsDeploying::new(apc));

        assert!(app.world().get::<ScientistDeployment>(apc).is_none());
        let messages = app.world().resource::<Messages<BradleySpawnMessage>>();
        assert_eq!(messages.len(), 0);
    }

    #[test]
    fn empty_deployment_is_left_alone() {
        let mut app = setup_app(settings(5, 5));
        let apc = app
            .world_mut()
            .spawn((Bradley::road(), ScientistDeployment::default()))
            .id();

        app.world_mut().trigger(ScientistsDeploying::new(apc));

        let deployed = app.world().get::<ScientistDeployment>(apc).unwrap();
        assert!(deployed.positions.is_empty());
        assert!(deployed.prefabs.is_empty());
    }

    #[test]
    fn invalid_inline_settings_fall_back_to_defaults() {
        let app = setup_app(settings(-3, 5));
        let spawn_settings = app.world().resource::<BradleySpawnSettings>();
        assert_eq!(
            spawn_settings.ranges,
            SpawnRanges::new(RangeConfig::default(), RangeConfig::exactly(5))
        );
        assert_eq!(spawn_settings.settings.road, RangeSection::default());
    }

    #[test]
    fn reload_message_rereads_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bradley.json");

        let mut app = App::new();
        app.add_plugins(BradleySpawnsPlugin::from_file(&path).with_seed(1));
        assert_eq!(
            app.world().resource::<BradleySpawnSettings>().ranges,
            SpawnRanges::default()
        );
        assert!(path.exists());

        let store = SettingsStore::new(&path);
        store.save(&settings(2, 2)).unwrap();
        app.world_mut()
            .resource_mut::<Messages<ReloadBradleySettings>>()
            .write(ReloadBradleySettings);
        app.update();

        let apc = app.world_mut().spawn((Bradley::road(), deployment())).id();
        app.world_mut().trigger(ScientistsDeploying::new(apc));
        let deployed = app.world().get::<ScientistDeployment>(apc).unwrap();
        assert_eq!(deployed.positions.len(), 2);
        assert_eq!(deployed.prefabs.len(), 2);
    }
}
