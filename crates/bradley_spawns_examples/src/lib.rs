#![forbid(unsafe_code)]

mod host;
mod logging;

pub use host::{apc_layout, deployment_report, SimulatedHost, SCIENTIST_PREFABS};
pub use logging::init_tracing;
