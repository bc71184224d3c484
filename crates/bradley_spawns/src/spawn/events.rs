//! Event types and sinks for observing deployment handling.
//!
//! This module defines [`SpawnEvent`] and a set of sinks to emit, collect, or forward
//! events while [`crate::spawn::hook::handle_deployment`] processes a deployment.
use crate::range::RangeConfig;
use crate::spawn::{BradleyVariant, EntityId};

/// Why a deployment was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The host did not pass the APC.
    MissingApc,
    /// The position list was absent or empty.
    NoPositions,
    /// The kind list was absent or empty.
    NoKinds,
}

/// Describes events emitted while handling deployments.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum SpawnEvent {
    /// The deployment payload had nothing to resize.
    Ignored { reason: IgnoreReason },

    /// A target count was drawn for a deployment.
    TargetResolved {
        apc: EntityId,
        variant: BradleyVariant,
        range: RangeConfig,
        target: usize,
    },

    /// Both spawn lists were resized.
    Resized {
        apc: EntityId,
        variant: BradleyVariant,
        /// Length of the lists as produced by the host.
        previous: usize,
        target: usize,
    },

    /// Resizing failed; the host's lists were left as they were.
    Aborted {
        apc: EntityId,
        variant: BradleyVariant,
        target: usize,
        message: String,
    },
}

/// Receives [`SpawnEvent`]s from [`crate::spawn::hook::handle_deployment`].
pub trait EventSink {
    fn send(&mut self, event: SpawnEvent);
}

/// Discards every event.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: SpawnEvent) {}
}

/// Hands each event to a closure, e.g. to log draws or forward them to the host.
pub struct FnSink<F: FnMut(SpawnEvent)>(F);

impl<F: FnMut(SpawnEvent)> FnSink<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F: FnMut(SpawnEvent)> EventSink for FnSink<F> {
    #[inline]
    fn send(&mut self, event: SpawnEvent) {
        (self.0)(event);
    }
}

/// Records events in order of arrival.
#[derive(Debug, Default)]
pub struct VecSink {
    events: Vec<SpawnEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[SpawnEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: SpawnEvent) {
        self.events.push(event);
    }
}

/// Sends every event to each of its sinks, in the order they were added.
#[derive(Default)]
pub struct MultiSink {
    sinks: Vec<Box<dyn EventSink + Send>>,
}

impl MultiSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sink, returning `self` for chaining.
    pub fn with(mut self, sink: impl EventSink + Send + 'static) -> Self {
        self.push(sink);
        self
    }

    pub fn push(&mut self, sink: impl EventSink + Send + 'static) {
        self.sinks.push(Box::new(sink));
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl EventSink for MultiSink {
    fn send(&mut self, event: SpawnEvent) {
        if let Some((last, rest)) = self.sinks.split_last_mut() {
            for sink in rest {
                sink.send(event.clone());
            }
            last.send(event);
        }
    }
}
