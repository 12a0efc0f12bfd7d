use crate::args::parse_args;
use crate::config::HelperConfig;
use crate::delegate;
use crate::env::ChildEnvironment;
use crate::error::HelperResult;
use crate::options::OptionSet;
use std::ffi::OsStr;

/// Mount `source` on `mount_point` through the delegate.
///
/// `args` is the raw token stream from mount(8), program name excluded. The
/// arguments are fully validated before anything on disk is looked at or
/// any process is started.
pub fn handle_mount_command<S: AsRef<OsStr>>(
    config: &HelperConfig,
    args: &[S],
) -> HelperResult<()> {
    let request = parse_args(args)?;
    tracing::debug!(
        source = ?request.source,
        mount_point = ?request.mount_point,
        options = ?request.options,
        "Parsed mount request"
    );

    let options = OptionSet::translate(&request.options);
    if !options.consumed.is_empty() {
        tracing::debug!(consumed = ?options.consumed, "Dropping mount-table options");
    }

    let env = ChildEnvironment::sanitized(config)?;
    let program = delegate::locate(config)?;

    let cmd = delegate::command(
        &program,
        &request.source,
        &request.mount_point,
        &options,
        &env,
    );
    let result = delegate::invoke(cmd)?;
    delegate::check(&program, result)?;

    tracing::info!(
        source = ?request.source,
        mount_point = ?request.mount_point,
        read_only = options.read_only,
        "Mounted"
    );
    Ok(())
}
