mod client;
mod collector;

pub use client::{SystemdClient, SystemdConnection, UnitStatus};
pub use collector::{UnitsCollector, UNIT_STATES, UNIT_STATE_METRIC};
