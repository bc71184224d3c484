use bevy::prelude::*;
use bradley_spawns::prelude::{EventSink, SpawnEvent};

/// Bevy message containing the APC entity and the underlying [`SpawnEvent`].
#[derive(Message, Debug, Clone)]
pub struct BradleySpawnMessage {
    pub apc: Entity,
    pub event: SpawnEvent,
}

/// Requests a re-read of the settings file the plugin was configured with.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ReloadBradleySettings;

/// Event sink that writes spawn events as [`BradleySpawnMessage`]s, tagging each with the APC entity.
pub struct MessageSink<'w> {
    pub apc: Entity,
    pub messages: &'w mut Messages<BradleySpawnMessage>,
}

impl EventSink for MessageSink<'_> {
    #[inline]
    fn send(&mut self, event: SpawnEvent) {
        self.messages.write(BradleySpawnMessage {
            apc: self.apc,
            event,
        });
    }
}
