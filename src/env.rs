//! Child process environment.

use crate::config::HelperConfig;
use crate::error::EnvironmentError;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment handed to the delegate. Built from scratch; nothing is
/// inherited from the helper's own environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildEnvironment {
    vars: BTreeMap<OsString, OsString>,
}

impl ChildEnvironment {
    /// Environment whose only variable is `PATH=<dir>`.
    pub fn with_path(dir: &Path) -> Self {
        let mut vars = BTreeMap::new();
        vars.insert(OsString::from("PATH"), dir.as_os_str().to_os_string());
        Self { vars }
    }

    /// Pick the first usable trusted directory from `config` and build the
    /// environment around it.
    pub fn sanitized(config: &HelperConfig) -> Result<Self, EnvironmentError> {
        let dir = trusted_dir(config)?;
        tracing::debug!(path = %dir.display(), "Child PATH");
        Ok(Self::with_path(&dir))
    }

    pub fn path(&self) -> Option<&OsString> {
        self.vars.get(&OsString::from("PATH"))
    }

    pub fn vars(&self) -> impl Iterator<Item = (&OsString, &OsString)> {
        self.vars.iter()
    }
}

fn trusted_dir(config: &HelperConfig) -> Result<PathBuf, EnvironmentError> {
    config
        .trusted_dirs
        .iter()
        .find(|dir| {
            dir.is_absolute()
                && dir.is_dir()
                && config
                    .probe_tool
                    .as_ref()
                    .map_or(true, |tool| dir.join(tool).is_file())
        })
        .cloned()
        .ok_or_else(|| EnvironmentError::NoTrustedDirectory {
            candidates: config.trusted_dirs.clone(),
        })
}
