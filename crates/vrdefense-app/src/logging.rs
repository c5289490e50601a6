//! Logger setup for the headless runner.

use env_logger::{Builder, Env};
use log::LevelFilter;

const SESSION_CRATES: [&str; 4] = [
    "vrdefense_core",
    "vrdefense_fighter_ai",
    "vrdefense_sim",
    "vrdefense_app",
];

/// Default `RUST_LOG`-style filter. Third-party crates stay at `warn`;
/// the session crates log at `info`, or `debug` when verbose.
fn default_filter(verbose: bool) -> String {
    let ours = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let mut directives = vec![LevelFilter::Warn.to_string().to_lowercase()];
    directives.extend(
        SESSION_CRATES
            .iter()
            .map(|name| format!("{name}={}", ours.to_string().to_lowercase())),
    );
    directives.join(",")
}

/// Install the global logger. `RUST_LOG` replaces the default filter.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    let _ = Builder::from_env(env).format_timestamp_millis().try_init();
}
