#![allow(dead_code)]

use std::time::Duration;

use criterion::{Criterion, Throughput};
use glam::Vec3;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Positions spaced along a ring, like the host's default scientist layout.
pub fn ring_positions(count: usize) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let angle = i as f32 / count.max(1) as f32 * std::f32::consts::TAU;
            Vec3::new(angle.cos() * 4.0, 0.0, angle.sin() * 4.0)
        })
        .collect()
}

pub fn prefab_names(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("assets/prefabs/npc/scientist/scientist_{}.prefab", i % 3))
        .collect()
}
