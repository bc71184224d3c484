use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_bradley_spawns::prelude::*;

const HEAVY: &str = "assets/rust.ai/agents/npcplayer/humannpc/scientist/scientistnpc_bradley_heavy.prefab";
const LIGHT: &str = "assets/rust.ai/agents/npcplayer/humannpc/scientist/scientistnpc_bradley.prefab";

fn main() {
    App::new()
        .add_plugins(MinimalPlugins)
        .add_plugins(LogPlugin::default())
        .add_plugins(BradleySpawnsPlugin::from_file(
            std::env::temp_dir().join("NotEnoughBradleyScientists.json"),
        ))
        .add_systems(Startup, spawn_apcs)
        .add_systems(
            Update,
            (trigger_deployments, on_spawn_message, exit_after_deploying),
        )
        .add_observer(print_deployment)
        .run();
}

/// Spawns one road APC and one launch site APC, each with the engine's default deployment.
fn spawn_apcs(mut commands: Commands) {
    for (bradley, origin) in [
        (Bradley::road(), Vec3::new(120.0, 4.0, -40.0)),
        (Bradley::launch_site(), Vec3::new(-800.0, 12.0, 310.0)),
    ] {
        let positions = (0..4)
            .map(|i| {
                let turn = Quat::from_rotation_y(i as f32 * std::f32::consts::FRAC_PI_2);
                origin + turn * Vec3::X * 3.5
            })
            .collect();
        let prefabs = vec![
            ScientistPrefab::new(HEAVY),
            ScientistPrefab::new(LIGHT),
            ScientistPrefab::new(LIGHT),
            ScientistPrefab::new(LIGHT),
        ];
        commands.spawn((bradley, ScientistDeployment::new(positions, prefabs)));
    }
}

/// Plays the engine: tells the plugin that every APC is about to deploy.
fn trigger_deployments(
    mut commands: Commands,
    mut once: Local<bool>,
    apcs: Query<Entity, With<ScientistDeployment>>,
) {
    // Only run once.
    if *once {
        return;
    }
    for entity in &apcs {
        commands.trigger(ScientistsDeploying::new(entity));
    }
    *once = true;
}

fn on_spawn_message(mut reader: MessageReader<BradleySpawnMessage>) {
    for msg in reader.read() {
        match &msg.event {
            SpawnEvent::TargetResolved {
                variant,
                range,
                target,
                ..
            } => {
                info!(
                    "APC {:?} ({:?}): drew {} from {}..={}",
                    msg.apc,
                    variant,
                    target,
                    range.minimum(),
                    range.maximum()
                );
            }
            SpawnEvent::Resized {
                previous, target, ..
            } => {
                info!("APC {:?}: {} -> {} scientists", msg.apc, previous, target);
            }
            SpawnEvent::Aborted { message, .. } => {
                warn!("APC {:?}: resize aborted: {}", msg.apc, message);
            }
            _ => {}
        }
    }
}

/// Logs each deployment's scientists.
fn print_deployment(deploying: On<ScientistsDeploying>, deployments: Query<&ScientistDeployment>) {
    if let Ok(deployment) = deployments.get(deploying.entity) {
        for (position, prefab) in deployment.positions.iter().zip(&deployment.prefabs) {
            debug!("  {} at {:?}", prefab.0, position);
        }
    }
}

fn exit_after_deploying(mut frames: Local<u32>, mut exit: MessageWriter<AppExit>) {
    *frames += 1;
    if *frames > 3 {
        exit.write(AppExit::Success);
    }
}
