use serde::Serialize;

use crate::map::MapSnapshot;
use crate::runtime::{ErrorKind, SessionSnapshot};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StepError {
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StepReport {
    pub index: usize,
    pub action: String,
    pub duration_ms: u128,
    pub error: Option<StepError>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScriptReport {
    pub script_name: Option<String>,
    pub steps: Vec<StepReport>,
    pub completed: bool,
    pub session: SessionSnapshot,
    pub map: MapSnapshot,
}

impl ScriptReport {
    pub fn failures(&self) -> usize {
        self.steps.iter().filter(|step| step.error.is_some()).count()
    }
}
