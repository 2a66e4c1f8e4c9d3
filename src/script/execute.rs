use std::time::Instant;

use crate::map::HeadlessMap;
use crate::runtime::Session;
use crate::service::ImageryService;

use super::{Result, ScriptReport, SessionScript, StepError, StepReport};

/// Replays every step in order. A failing step leaves the session as it
/// was and is recorded in the report; it only aborts the run when the
/// script asks for that.
pub fn run_script<S: ImageryService>(
    session: &mut Session<HeadlessMap, S>,
    script: &SessionScript,
) -> Result<ScriptReport> {
    script.validate()?;

    let mut steps = Vec::with_capacity(script.steps.len());
    let mut completed = true;
    for (index, input) in script.steps.iter().enumerate() {
        let action = input.action().to_string();
        let started = Instant::now();
        let outcome = session.handle(input.clone());
        let duration_ms = started.elapsed().as_millis();
        let error = outcome.err().map(|error| StepError {
            kind: error.kind(),
            message: error.to_string(),
        });
        let failed = error.is_some();
        steps.push(StepReport {
            index,
            action,
            duration_ms,
            error,
        });
        if failed && script.stop_on_error {
            log::warn!("script stopped at step {index}");
            completed = false;
            break;
        }
    }

    let report = ScriptReport {
        script_name: script.name.clone(),
        steps,
        completed,
        session: session.snapshot(),
        map: session.map().snapshot(),
    };
    log::info!(
        "replayed {} step(s), {} failed",
        report.steps.len(),
        report.failures()
    );
    Ok(report)
}
