use std::path::Path;

use crate::document::{read_document, write_document};

use super::{Result, ScriptError, ScriptReport, SessionScript};

pub fn load_script(path: impl AsRef<Path>) -> Result<SessionScript> {
    let script: SessionScript = read_document::<_, ScriptError>(path.as_ref())?;
    script.validate()?;
    Ok(script)
}

pub fn save_report(path: impl AsRef<Path>, report: &ScriptReport) -> Result<()> {
    write_document::<_, ScriptError>(path.as_ref(), report)
}
