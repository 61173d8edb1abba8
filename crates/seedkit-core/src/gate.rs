//! Startup gate deciding whether seeding runs when the application boots

use crate::model::RunOnStart;

/// Environment variable naming the deployment environment
pub const ENVIRONMENT_VAR: &str = "SEEDKIT_ENV";

/// Decide whether seeding should run at startup
///
/// `environment` is the value of the deployment environment indicator. An
/// absent indicator counts as development.
pub fn should_run_seeding(run_on_start: &RunOnStart, environment: Option<&str>) -> bool {
    match run_on_start {
        RunOnStart::Never => false,
        RunOnStart::Enabled | RunOnStart::Always => true,
        RunOnStart::Development => environment.map_or(true, |env| env == "development"),
        RunOnStart::Unrecognized(_) => false,
    }
}

/// [`should_run_seeding`] against the `SEEDKIT_ENV` variable
pub fn should_run_seeding_from_env(run_on_start: &RunOnStart) -> bool {
    let environment = std::env::var(ENVIRONMENT_VAR).ok();
    should_run_seeding(run_on_start, environment.as_deref())
}
