use std::path::PathBuf;

/// Name of the filesystem binary this helper hands off to.
pub const DEFAULT_DELEGATE: &str = "gcsfuse";

/// Helper configuration.
///
/// Nothing here is read from the environment or from files: the helper can
/// run with elevated privilege, and what it executes must not be steerable
/// by whoever invoked mount(8).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperConfig {
    /// Delegate binary. A bare name is searched for next to the helper's own
    /// executable and then in `trusted_dirs`; anything containing a `/` is
    /// used as given.
    pub delegate: PathBuf,
    /// Candidate directories for the child's `PATH`, in preference order.
    pub trusted_dirs: Vec<PathBuf>,
    /// Tool that must exist in the chosen `PATH` directory, if any.
    pub probe_tool: Option<String>,
    /// Also look for the delegate beside the running helper binary.
    pub search_exe_dir: bool,
}

impl Default for HelperConfig {
    #[cfg(target_os = "linux")]
    fn default() -> Self {
        // gcsfuse shells out to fusermount, so PATH must lead to it.
        Self {
            delegate: PathBuf::from(DEFAULT_DELEGATE),
            trusted_dirs: vec![PathBuf::from("/bin"), PathBuf::from("/usr/bin")],
            probe_tool: Some("fusermount".to_string()),
            search_exe_dir: true,
        }
    }

    #[cfg(not(target_os = "linux"))]
    fn default() -> Self {
        Self {
            delegate: PathBuf::from(DEFAULT_DELEGATE),
            trusted_dirs: vec![PathBuf::from("/usr/bin"), PathBuf::from("/bin")],
            probe_tool: None,
            search_exe_dir: true,
        }
    }
}

impl HelperConfig {
    pub fn with_delegate(mut self, delegate: impl Into<PathBuf>) -> Self {
        self.delegate = delegate.into();
        self
    }

    pub fn with_trusted_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.trusted_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_probe_tool(mut self, tool: Option<&str>) -> Self {
        self.probe_tool = tool.map(str::to_string);
        self
    }

    pub fn with_search_exe_dir(mut self, search: bool) -> Self {
        self.search_exe_dir = search;
        self
    }
}
