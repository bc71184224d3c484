#![forbid(unsafe_code)]
//! bradley_spawns: Resizes the scientist spawn lists of a Bradley APC deployment.
//!
//! Modules:
//! - spawn: spawn lists, cyclic resizing, the deployment hook and its events
//! - range: per-variant scientist count ranges and the target count draw
//! - settings: the versioned JSON settings document, migration and file store
//!
//! For examples, see the `bradley_spawns_examples` crate.
pub mod error;
pub mod range;
pub mod settings;
pub mod spawn;

/// Convenient re-exports for common types. Import with `use bradley_spawns::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::range::{resolve_target_count, RangeConfig, SpawnRanges, SCIENTIST_LIMIT};
    pub use crate::settings::{RangeSection, Settings, SettingsStore, SETTINGS_VERSION};
    pub use crate::spawn::events::{
        EventSink, FnSink, IgnoreReason, MultiSink, SpawnEvent, VecSink,
    };
    pub use crate::spawn::hook::{
        handle_deployment, BradleyScientists, Deployment, DeploymentObserver, DeploymentOutcome,
        HookId, HookRegistry, HOOK_NAME,
    };
    pub use crate::spawn::resize::{resize_cyclic, resized};
    pub use crate::spawn::{
        resize_pair, BradleyApc, BradleyVariant, EntityId, SpawnPosition, SpawnRequest,
    };
}
