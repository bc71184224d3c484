use bradley_spawns::prelude::*;
use glam::Vec3;

/// Prefabs the simulated engine picks scientists from.
pub const SCIENTIST_PREFABS: [&str; 2] = [
    "assets/rust.ai/agents/npcplayer/humannpc/scientist/scientistnpc_bradley_heavy.prefab",
    "assets/rust.ai/agents/npcplayer/humannpc/scientist/scientistnpc_bradley.prefab",
];

/// Default deployment the engine produces: `count` scientists on a ring around the APC,
/// the first one heavy.
pub fn apc_layout(origin: Vec3, count: usize) -> (Vec<Vec3>, Vec<String>) {
    let positions = (0..count)
        .map(|i| {
            let angle = i as f32 / count.max(1) as f32 * std::f32::consts::TAU;
            origin + Vec3::new(angle.cos() * 3.5, 0.0, angle.sin() * 3.5)
        })
        .collect();
    let prefabs = (0..count)
        .map(|i| SCIENTIST_PREFABS[usize::from(i > 0)].to_owned())
        .collect();
    (positions, prefabs)
}

/// One line per scientist: prefab file name and position.
pub fn deployment_report(positions: &[Vec3], prefabs: &[String]) -> Vec<String> {
    positions
        .iter()
        .zip(prefabs)
        .map(|(p, prefab)| {
            let name = prefab.rsplit('/').next().unwrap_or(prefab);
            format!("{name:<32} ({:>6.2}, {:>6.2}, {:>6.2})", p.x, p.y, p.z)
        })
        .collect()
}

/// Stand-in for the game engine: owns the hook registry and fires deployments through it.
pub struct SimulatedHost {
    registry: HookRegistry<String>,
    default_count: usize,
}

impl SimulatedHost {
    pub fn new(default_count: usize) -> Self {
        Self {
            registry: HookRegistry::new(),
            default_count,
        }
    }

    pub fn registry_mut(&mut self) -> &mut HookRegistry<String> {
        &mut self.registry
    }

    /// Builds the engine's default deployment for `apc`, lets the hooks rewrite it and
    /// returns what would be spawned.
    pub fn deploy(&mut self, apc: &BradleyApc, origin: Vec3) -> (Vec<Vec3>, Vec<String>) {
        let (mut positions, mut prefabs) = apc_layout(origin, self.default_count);
        let mut deployment = Deployment::new(apc, &mut prefabs, &mut positions);
        self.registry.dispatch(&mut deployment);
        (positions, prefabs)
    }
}
