use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Exit code for an incorrect invocation (mount(8) convention).
pub const EXIT_USAGE: i32 = 1;
/// Exit code for a system error, e.g. no safe environment could be built.
pub const EXIT_SYSTEM: i32 = 2;
/// Exit code for a mount failure reported by the delegate.
pub const EXIT_MOUNT_FAILURE: i32 = 32;

pub type HelperResult<T> = std::result::Result<T, HelperError>;

/// Malformed invocations. The message substrings are matched by callers and
/// must stay stable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("expected two positional arguments; got {got}")]
    TooFewPositionals { got: usize },

    #[error("Unexpected arg {index}: {arg:?}")]
    UnexpectedArg { index: usize, arg: String },

    #[error("Unexpected -o at end of args")]
    DanglingOption,
}

/// Failure to set up a safe execution context for the delegate.
#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error("no trusted directory for PATH among {candidates:?}")]
    NoTrustedDirectory { candidates: Vec<PathBuf> },

    #[error("can't find {name} in {searched:?}")]
    DelegateNotFound { name: String, searched: Vec<PathBuf> },

    #[error("locating own executable")]
    CurrentExe(#[source] std::io::Error),
}

#[derive(Error, Debug)]
pub enum HelperError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    #[error("running {}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("running {}: {status}\nOutput:\n{}", .program.display(), String::from_utf8_lossy(.output))]
    DelegateFailed {
        program: PathBuf,
        status: ExitStatus,
        output: Vec<u8>,
    },
}

impl HelperError {
    /// Process exit code for this error. Never derived from the delegate's
    /// own status.
    pub fn exit_code(&self) -> i32 {
        match self {
            HelperError::Usage(_) => EXIT_USAGE,
            HelperError::Environment(_) | HelperError::Spawn { .. } => EXIT_SYSTEM,
            HelperError::DelegateFailed { .. } => EXIT_MOUNT_FAILURE,
        }
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, HelperError::Usage(_))
    }
}
