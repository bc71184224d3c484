use std::path::PathBuf;

use bradley_spawns::prelude::*;
use bradley_spawns_examples::{deployment_report, init_tracing, SimulatedHost};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Settings file; created with defaults if it does not exist yet.
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("NotEnoughBradleyScientists.json"));
    let store = SettingsStore::new(&path);

    // The engine deploys four scientists by default.
    let mut host = SimulatedHost::new(4);

    // One sink logs every draw, the other reports what happened to the lists.
    let events = MultiSink::new()
        .with(FnSink::new(|event| {
            if let SpawnEvent::TargetResolved {
                variant,
                range,
                target,
                ..
            } = event
            {
                info!(
                    "{:?} APC: drew {} from {}..={}",
                    variant,
                    target,
                    range.minimum(),
                    range.maximum()
                );
            }
        }))
        .with(FnSink::new(|event| match event {
            SpawnEvent::Resized {
                apc,
                previous,
                target,
                ..
            } => debug!("APC {apc}: {previous} -> {target} scientists"),
            SpawnEvent::Aborted { apc, message, .. } => {
                warn!("APC {apc}: kept the default deployment ({message})")
            }
            _ => {}
        }));
    let plugin =
        BradleyScientists::load(&store, StdRng::seed_from_u64(2024))?.with_sink(events);
    info!("Loaded settings from {}", store.path().display());
    let hook = host.registry_mut().register(Box::new(plugin));

    let apcs = [
        (BradleyApc::new(1, true), Vec3::new(120.0, 4.0, -40.0)),
        (BradleyApc::new(2, false), Vec3::new(-800.0, 12.0, 310.0)),
        (BradleyApc::new(3, true), Vec3::new(455.0, 2.0, 98.0)),
    ];

    for (apc, origin) in &apcs {
        let (positions, prefabs) = host.deploy(apc, *origin);
        info!("APC {} deploys {} scientists", apc.id, positions.len());
        for line in deployment_report(&positions, &prefabs) {
            info!("  {line}");
        }
    }

    // Unloading the plugin restores the engine default.
    host.registry_mut().unregister(hook);
    let (positions, _) = host.deploy(&apcs[0].0, apcs[0].1);
    info!("After unload APC 1 deploys {} scientists", positions.len());

    Ok(())
}
