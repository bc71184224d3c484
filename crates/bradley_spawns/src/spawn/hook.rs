//! The deployment hook: the entry point the host calls when an APC deploys scientists.
//!
//! The host owns the spawn lists and lends them to [`handle_deployment`] through a
//! [`Deployment`]. Absent references are modeled as `None`. Observers are registered
//! with a [`HookRegistry`] at startup and removed again on unload; [`BradleyScientists`]
//! is the observer that applies the configured spawn ranges.
use rand::Rng;
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::range::{resolve_target_count, SpawnRanges};
use crate::settings::{Settings, SettingsStore};
use crate::spawn::events::{EventSink, IgnoreReason, SpawnEvent};
use crate::spawn::{resize_pair, BradleyApc, BradleyVariant, EntityId, SpawnPosition};

/// Name under which the host dispatches deployments.
pub const HOOK_NAME: &str = "OnScientistSpawnPositionsGenerated";

/// Payload of one deployment, borrowed from the host.
#[derive(Debug)]
pub struct Deployment<'a, K> {
    pub apc: Option<&'a BradleyApc>,
    /// Entity whose attack triggered the deployment, if known.
    pub attacker: Option<EntityId>,
    pub kinds: Option<&'a mut Vec<K>>,
    pub positions: Option<&'a mut Vec<SpawnPosition>>,
}

impl<'a, K> Deployment<'a, K> {
    pub fn new(
        apc: &'a BradleyApc,
        kinds: &'a mut Vec<K>,
        positions: &'a mut Vec<SpawnPosition>,
    ) -> Self {
        Self {
            apc: Some(apc),
            attacker: None,
            kinds: Some(kinds),
            positions: Some(positions),
        }
    }

    pub fn with_attacker(mut self, attacker: EntityId) -> Self {
        self.attacker = Some(attacker);
        self
    }
}

/// What [`handle_deployment`] did with a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentOutcome {
    Ignored(IgnoreReason),
    Resized {
        variant: BradleyVariant,
        previous: usize,
        target: usize,
    },
    /// The lists could not be resized and were left as the host produced them.
    Aborted {
        variant: BradleyVariant,
        target: usize,
    },
}

/// Resizes a deployment's spawn lists to a count drawn from `ranges`.
///
/// The count is drawn once and applied to both lists. Deployments without an APC or
/// with absent or empty lists are ignored without mutation.
pub fn handle_deployment<K, R>(
    deployment: &mut Deployment<'_, K>,
    ranges: &SpawnRanges,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> DeploymentOutcome
where
    K: Clone,
    R: Rng + ?Sized,
{
    let ignore = |sink: &mut dyn EventSink, reason: IgnoreReason| {
        trace!("{HOOK_NAME}: ignoring deployment ({reason:?})");
        sink.send(SpawnEvent::Ignored { reason });
        DeploymentOutcome::Ignored(reason)
    };

    let Some(apc) = deployment.apc else {
        return ignore(sink, IgnoreReason::MissingApc);
    };
    let Some(positions) = deployment
        .positions
        .as_deref_mut()
        .filter(|p| !p.is_empty())
    else {
        return ignore(sink, IgnoreReason::NoPositions);
    };
    let Some(kinds) = deployment
        .kinds
        .as_deref_mut()
        .filter(|k| !k.is_empty())
    else {
        return ignore(sink, IgnoreReason::NoKinds);
    };

    let variant = apc.variant();
    let range = ranges.get(variant);
    let target = resolve_target_count(variant, ranges, rng);
    sink.send(SpawnEvent::TargetResolved {
        apc: apc.id,
        variant,
        range,
        target,
    });

    let previous = positions.len();
    match resize_pair(positions, kinds, target) {
        Ok(()) => {
            debug!(
                "APC {} ({:?}) deploying {} scientists instead of {}",
                apc.id, variant, target, previous
            );
            sink.send(SpawnEvent::Resized {
                apc: apc.id,
                variant,
                previous,
                target,
            });
            DeploymentOutcome::Resized {
                variant,
                previous,
                target,
            }
        }
        Err(err) => {
            warn!(
                "APC {} ({:?}): keeping default scientists, resize to {} failed: {}",
                apc.id, variant, target, err
            );
            sink.send(SpawnEvent::Aborted {
                apc: apc.id,
                variant,
                target,
                message: err.to_string(),
            });
            DeploymentOutcome::Aborted { variant, target }
        }
    }
}

/// Receives deployments dispatched by the host.
pub trait DeploymentObserver<K> {
    fn on_deployment(&mut self, deployment: &mut Deployment<'_, K>);
}

/// Handle returned by [`HookRegistry::register`], used to unregister again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(u64);

/// Observers the host calls, in registration order, for every deployment.
pub struct HookRegistry<K> {
    observers: Vec<(HookId, Box<dyn DeploymentObserver<K>>)>,
    next_id: u64,
}

impl<K> Default for HookRegistry<K> {
    fn default() -> Self {
        Self {
            observers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<K> HookRegistry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, observer: Box<dyn DeploymentObserver<K>>) -> HookId {
        let id = HookId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Removes an observer, handing it back. Unknown ids yield `None`.
    pub fn unregister(&mut self, id: HookId) -> Option<Box<dyn DeploymentObserver<K>>> {
        let index = self.observers.iter().position(|(i, _)| *i == id)?;
        Some(self.observers.remove(index).1)
    }

    pub fn dispatch(&mut self, deployment: &mut Deployment<'_, K>) {
        for (_, observer) in &mut self.observers {
            observer.on_deployment(deployment);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

/// Observer that resizes every deployment according to its spawn ranges.
pub struct BradleyScientists<R> {
    ranges: SpawnRanges,
    rng: R,
    sink: Option<Box<dyn EventSink>>,
}

impl<R: Rng> BradleyScientists<R> {
    pub fn new(ranges: SpawnRanges, rng: R) -> Self {
        Self {
            ranges,
            rng,
            sink: None,
        }
    }

    pub fn from_settings(settings: &Settings, rng: R) -> Self {
        Self::new(settings.ranges(), rng)
    }

    /// Loads settings from `store`, creating or migrating the file as needed.
    pub fn load(store: &SettingsStore, rng: R) -> Result<Self> {
        let settings = store.load()?;
        Ok(Self::from_settings(&settings, rng))
    }

    /// Re-reads `store` and swaps in its ranges. On error the current ranges stay.
    pub fn reload(&mut self, store: &SettingsStore) -> Result<()> {
        let settings = store.load()?;
        self.ranges = settings.ranges();
        Ok(())
    }

    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn ranges(&self) -> SpawnRanges {
        self.ranges
    }

    pub fn set_ranges(&mut self, ranges: SpawnRanges) {
        self.ranges = ranges;
    }

    pub fn handle<K: Clone>(&mut self, deployment: &mut Deployment<'_, K>) -> DeploymentOutcome {
        match self.sink.as_deref_mut() {
            Some(sink) => handle_deployment(deployment, &self.ranges, &mut self.rng, sink),
            None => handle_deployment(deployment, &self.ranges, &mut self.rng, &mut ()),
        }
    }
}

impl<K: Clone, R: Rng> DeploymentObserver<K> for BradleyScientists<R> {
    fn on_deployment(&mut self, deployment: &mut Deployment<'_, K>) {
        self.handle(deployment);
    }
}
