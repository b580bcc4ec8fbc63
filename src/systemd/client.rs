use crate::error::Result;

/// State of one unit as reported by the service manager.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitStatus {
    pub name: String,
    pub description: String,
    pub load_state: String,
    pub active_state: String,
    pub sub_state: String,
}

pub trait SystemdConnection {
    /// Units whose name matches any of `patterns` (shell globs) and, unless
    /// `states` is empty, whose state is one of `states`.
    fn list_units_by_patterns(
        &mut self,
        states: &[&str],
        patterns: &[String],
    ) -> Result<Vec<UnitStatus>>;

    fn close(&mut self);
}

/// Entry point to the service manager's control plane. Failing to reach it is
/// reported as `ErrorKind::ConnectionFailure`.
pub trait SystemdClient {
    fn connect(&self) -> Result<Box<dyn SystemdConnection>>;
}
