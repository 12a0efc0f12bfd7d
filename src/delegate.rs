//! Locating and running the delegate mount command.

use crate::config::HelperConfig;
use crate::env::ChildEnvironment;
use crate::error::{EnvironmentError, HelperError, HelperResult};
use crate::options::OptionSet;
use std::ffi::OsStr;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Outcome of one delegate run.
#[derive(Debug)]
pub struct InvocationResult {
    pub status: ExitStatus,
    /// stdout and stderr as the delegate interleaved them.
    pub output: Vec<u8>,
}

impl InvocationResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Resolve the delegate binary without consulting the inherited `PATH`.
pub fn locate(config: &HelperConfig) -> Result<PathBuf, EnvironmentError> {
    let delegate = &config.delegate;
    if delegate.components().count() > 1 || delegate.is_absolute() {
        return Ok(delegate.clone());
    }

    let mut searched = Vec::new();
    if config.search_exe_dir {
        let exe = std::env::current_exe().map_err(EnvironmentError::CurrentExe)?;
        if let Some(dir) = exe.parent() {
            searched.push(dir.to_path_buf());
        }
    }
    searched.extend(config.trusted_dirs.iter().filter(|d| d.is_absolute()).cloned());

    searched
        .iter()
        .map(|dir| dir.join(delegate))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| EnvironmentError::DelegateNotFound {
            name: delegate.display().to_string(),
            searched,
        })
}

/// Build the delegate command: `<program> <source> <mount_point> [-o opt]...`
/// with a cleared environment.
pub fn command(
    program: &Path,
    source: &OsStr,
    mount_point: &OsStr,
    options: &OptionSet,
    env: &ChildEnvironment,
) -> Command {
    let mut cmd = Command::new(program);
    cmd.arg(source)
        .arg(mount_point)
        .args(options.to_args())
        .env_clear()
        .envs(env.vars())
        .stdin(Stdio::null());
    cmd
}

/// Run the command to completion and collect its output. No timeout: a slow
/// mount is still a mount.
///
/// stdout and stderr share one pipe so the delegate's writes arrive in the
/// order it made them.
pub fn invoke(mut cmd: Command) -> HelperResult<InvocationResult> {
    let program = PathBuf::from(cmd.get_program());
    tracing::info!(
        program = %program.display(),
        args = ?cmd.get_args().collect::<Vec<_>>(),
        "Running delegate"
    );
    let spawn_err = |source| HelperError::Spawn {
        program: program.clone(),
        source,
    };

    let (mut reader, writer) = std::io::pipe().map_err(spawn_err)?;
    cmd.stdout(writer.try_clone().map_err(spawn_err)?)
        .stderr(writer);
    let mut child = cmd.spawn().map_err(spawn_err)?;
    // The command still holds write ends; the read below only sees EOF once
    // every copy is closed.
    drop(cmd);

    let mut output = Vec::new();
    let read = reader.read_to_end(&mut output);
    let status = child.wait().map_err(spawn_err)?;
    read.map_err(spawn_err)?;
    tracing::debug!(%status, bytes = output.len(), "Delegate exited");

    Ok(InvocationResult { status, output })
}

/// Turn a finished run into the helper's result.
pub fn check(program: &Path, result: InvocationResult) -> HelperResult<()> {
    if result.success() {
        return Ok(());
    }
    Err(HelperError::DelegateFailed {
        program: program.to_path_buf(),
        status: result.status,
        output: result.output,
    })
}
