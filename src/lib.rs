//! mount(8) helper for gcsfuse.
//!
//! Invoked by the system `mount` command as `mount_gcsfuse` (macOS) or
//! `mount.gcsfuse` (Linux). It validates the mount(8) calling convention,
//! translates mount options, strips the environment down to a trusted `PATH`
//! and hands the actual mount off to `gcsfuse`.

pub mod args;
pub mod cmd;
pub mod config;
pub mod delegate;
pub mod env;
pub mod error;
pub mod options;

pub use args::{parse_args, MountRequest};
pub use config::HelperConfig;
pub use env::ChildEnvironment;
pub use error::{EnvironmentError, HelperError, HelperResult, UsageError};
pub use options::{MountOptions, OptionSet};
