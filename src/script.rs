mod error;
mod execute;
mod io;
mod report;
mod spec;


pub use error::{Result, ScriptError};
pub use execute::run_script;
pub use io::{load_script, save_report};
pub use report::{ScriptReport, StepError, StepReport};
pub use spec::SessionScript;
