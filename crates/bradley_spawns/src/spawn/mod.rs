//! Scientist deployment handling: spawn lists, the deployment hook, and its events.
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::range::SCIENTIST_LIMIT;

pub mod events;
pub mod hook;
pub mod resize;

/// World position a scientist is spawned at.
pub type SpawnPosition = Vec3;

/// Identifier of an APC entity as reported by the host.
pub type EntityId = u64;

/// Which of the two APC contexts triggered a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BradleyVariant {
    /// APC patrolling the road network.
    Road,
    /// APC guarding the launch site.
    LaunchSite,
}

impl BradleyVariant {
    pub fn from_road_spawned(road_spawned: bool) -> Self {
        if road_spawned {
            BradleyVariant::Road
        } else {
            BradleyVariant::LaunchSite
        }
    }
}

/// The APC that is deploying scientists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BradleyApc {
    pub id: EntityId,
    /// Set when the host spawned this APC on a road rather than at the launch site.
    pub road_spawned: bool,
}

impl BradleyApc {
    pub fn new(id: EntityId, road_spawned: bool) -> Self {
        Self { id, road_spawned }
    }

    pub fn variant(&self) -> BradleyVariant {
        BradleyVariant::from_road_spawned(self.road_spawned)
    }
}

/// Parallel position and kind lists for one deployment.
///
/// The lists are expected to have equal length; the caller is responsible for that.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest<K> {
    pub positions: Vec<SpawnPosition>,
    pub kinds: Vec<K>,
}

impl<K: Clone> SpawnRequest<K> {
    pub fn new(positions: Vec<SpawnPosition>, kinds: Vec<K>) -> Self {
        Self { positions, kinds }
    }

    /// Number of scientists this request currently spawns.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Resizes both lists to `target`. Neither list is touched if either cannot be resized.
    pub fn resize(&mut self, target: usize) -> Result<()> {
        resize_pair(&mut self.positions, &mut self.kinds, target)
    }
}

/// Resizes a position list and a kind list to the same `target`.
///
/// Fails before mutating anything if `target` exceeds [`SCIENTIST_LIMIT`] or if either
/// list is empty while `target > 0`.
pub fn resize_pair<K: Clone>(
    positions: &mut Vec<SpawnPosition>,
    kinds: &mut Vec<K>,
    target: usize,
) -> Result<()> {
    let limit = SCIENTIST_LIMIT as usize;
    if target > limit {
        return Err(Error::TooManyScientists { target, limit });
    }
    if target > 0 && (positions.is_empty() || kinds.is_empty()) {
        return Err(Error::EmptySource { target });
    }
    resize::resize_cyclic(positions, target)?;
    resize::resize_cyclic(kinds, target)?;
    Ok(())
}
