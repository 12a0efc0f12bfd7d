use anyhow::{Context, Result as AnyhowResult};
use mount_gcsfuse::cmd::handle_mount_command;
use mount_gcsfuse::{HelperConfig, HelperError};
use std::ffi::OsString;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: mount_gcsfuse [-o options] bucket mount_point";

/// Log filter. Fixed rather than read from `RUST_LOG`: the helper may run
/// privileged and its invoker does not get to change what it prints.
const LOG_FILTER: &str = "warn";

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(LOG_FILTER))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &[OsString]) -> AnyhowResult<()> {
    let config = HelperConfig::default();
    handle_mount_command(&config, args).context("mount failed")
}

fn main() {
    init_tracing();
    // mount(8) decides the argument order, so the vector goes to the parser
    // untouched: no token is a flag of ours.
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();

    if let Err(e) = run(&args) {
        let helper_err = e.downcast_ref::<HelperError>();
        match helper_err {
            Some(err) if err.is_usage() => {
                eprintln!("mount_gcsfuse: {}", err);
                eprintln!("{}", USAGE);
            }
            _ => eprintln!("mount_gcsfuse: {:#}", e),
        }
        std::process::exit(helper_err.map_or(1, HelperError::exit_code));
    }
}
