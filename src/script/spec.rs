use serde::{Deserialize, Serialize};

use crate::runtime::SessionInput;

use super::{Result, ScriptError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionScript {
    pub name: Option<String>,
    #[serde(default)]
    pub steps: Vec<SessionInput>,
    /// Stop at the first failing step instead of recording it and moving on.
    #[serde(default)]
    pub stop_on_error: bool,
}

impl SessionScript {
    pub fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(ScriptError::Parse(
                "session script must include at least one step".to_string(),
            ));
        }
        if self
            .name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(ScriptError::Parse(
                "session script name must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}
