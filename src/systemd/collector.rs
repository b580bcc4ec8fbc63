use log::debug;

use super::client::{SystemdClient, UnitStatus};
use crate::error::{ErrorKind, Result};
use crate::model::{Labels, Sample};
use crate::query::SampleSet;

pub const UNIT_STATE_METRIC: &str = "systemd_unit_state";

pub const UNIT_STATES: [&str; 5] = ["active", "inactive", "activating", "deactivating", "failed"];

/// Turns unit states into one-hot samples:
/// `systemd_unit_state{unit="x.service",unit_type="service",state="active"} 1`
/// and a 0 for every other state.
pub struct UnitsCollector<C> {
    client: C,
    include: Vec<String>,
}

impl<C: SystemdClient> UnitsCollector<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            include: vec!["*.service".to_string()],
        }
    }

    pub fn with_include(mut self, include: Vec<String>) -> Self {
        self.include = include;
        self
    }

    /// Adds the samples of every loaded unit to `set`, returns how many.
    pub fn collect(&self, set: &mut SampleSet) -> Result<usize> {
        let mut conn = self
            .client
            .connect()
            .map_err(|e| e.kind_of(ErrorKind::ConnectionFailure))?;

        let units = conn.list_units_by_patterns(&[], &self.include);
        conn.close();
        let units = units?;

        let mut added = 0;
        for unit in units.iter().filter(|u| u.load_state == "loaded") {
            added += add_unit(set, unit);
        }

        debug!(
            "collected {} samples out of {} units matching {:?}",
            added,
            units.len(),
            self.include
        );
        Ok(added)
    }
}

fn add_unit(set: &mut SampleSet, unit: &UnitStatus) -> usize {
    let unit_type = match unit.name.rfind('.') {
        Some(i) => &unit.name[i + 1..],
        None => "",
    };

    for state in UNIT_STATES.iter() {
        let mut labels = Labels::new(UNIT_STATE_METRIC);
        labels.push("unit", unit.name.as_str());
        labels.push("unit_type", unit_type);
        labels.push("state", *state);

        let value = if unit.active_state == *state { 1.0 } else { 0.0 };
        set.add(Sample::new(labels, value));
    }
    UNIT_STATES.len()
}
