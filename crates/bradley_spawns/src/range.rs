//! Spawn count ranges and drawing a target count from them.
use rand::{Rng, RngExt};

use crate::error::{Error, Result};
use crate::spawn::BradleyVariant;

pub const DEFAULT_MINIMUM_SCIENTISTS: u32 = 4;
pub const DEFAULT_MAXIMUM_SCIENTISTS: u32 = 6;

/// Largest number of scientists a single deployment may be resized to.
pub const SCIENTIST_LIMIT: u32 = 1_000;

/// Inclusive bounds for the number of scientists spawned per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeConfig {
    minimum: u32,
    maximum: u32,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            minimum: DEFAULT_MINIMUM_SCIENTISTS,
            maximum: DEFAULT_MAXIMUM_SCIENTISTS,
        }
    }
}

impl RangeConfig {
    /// Creates a range, rejecting `minimum > maximum` and maxima above [`SCIENTIST_LIMIT`].
    pub fn new(minimum: u32, maximum: u32) -> Result<Self> {
        if minimum > maximum {
            return Err(Error::InvalidConfig(format!(
                "minimum ({minimum}) must not exceed maximum ({maximum})"
            )));
        }
        if maximum > SCIENTIST_LIMIT {
            return Err(Error::InvalidConfig(format!(
                "maximum ({maximum}) exceeds the limit of {SCIENTIST_LIMIT} scientists"
            )));
        }
        Ok(Self { minimum, maximum })
    }

    /// A range that always yields `count`.
    pub fn exactly(count: u32) -> Self {
        Self {
            minimum: count,
            maximum: count,
        }
    }

    pub fn minimum(&self) -> u32 {
        self.minimum
    }

    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    pub fn contains(&self, count: usize) -> bool {
        (self.minimum as usize..=self.maximum as usize).contains(&count)
    }

    /// Draws a count uniformly from `[minimum, maximum]`.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.random_range(self.minimum..=self.maximum) as usize
    }
}

/// One [`RangeConfig`] per [`BradleyVariant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpawnRanges {
    pub road: RangeConfig,
    pub launch_site: RangeConfig,
}

impl SpawnRanges {
    pub fn new(road: RangeConfig, launch_site: RangeConfig) -> Self {
        Self { road, launch_site }
    }

    /// Uses the same range for both variants.
    pub fn uniform(range: RangeConfig) -> Self {
        Self {
            road: range,
            launch_site: range,
        }
    }

    pub fn get(&self, variant: BradleyVariant) -> RangeConfig {
        match variant {
            BradleyVariant::Road => self.road,
            BradleyVariant::LaunchSite => self.launch_site,
        }
    }
}

/// Draws the target scientist count for a deployment of the given variant.
///
/// Call once per deployment so both spawn lists are resized to the same count.
pub fn resolve_target_count<R: Rng + ?Sized>(
    variant: BradleyVariant,
    ranges: &SpawnRanges,
    rng: &mut R,
) -> usize {
    ranges.get(variant).draw(rng)
}
