//! Mount option handling.
//!
//! Options arrive from mount(8) as comma-separated `key[=value]` lists after
//! `-o`. They are collected into [`MountOptions`] and then sorted into what
//! the delegate gets to see ([`OptionSet`]).

use std::collections::BTreeMap;
use std::fmt;

/// Options that only steer the system's mount-table bookkeeping. fusermount
/// rejects them, so they are consumed here.
pub const ADMINISTRATIVE_OPTIONS: [&str; 4] = ["noauto", "nouser", "auto", "user"];

const READ_ONLY: &str = "ro";

/// Raw mount options, keyed by name. Later insertions overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountOptions(BTreeMap<String, Option<String>>);

impl MountOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one option block such as `ro,uid=1000,,implicit_dirs` into the
    /// map. Empty entries are skipped; values split on the first `=`.
    pub fn parse_block(&mut self, block: &str) {
        for entry in block.split(',').filter(|s| !s.is_empty()) {
            match entry.split_once('=') {
                Some((name, value)) => self.insert(name, Some(value)),
                None => self.insert(entry, None),
            }
        }
    }

    pub fn insert(&mut self, name: &str, value: Option<&str>) {
        self.0.insert(name.to_string(), value.map(str::to_string));
    }

    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.0.get(name).map(|v| v.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

/// A single option forwarded to the delegate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassThrough {
    pub name: String,
    pub value: Option<String>,
}

impl fmt::Display for PassThrough {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.name, value),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Options after translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    /// Mount read-only. Read-write when false.
    pub read_only: bool,
    /// Administrative options that were recognized and dropped.
    pub consumed: Vec<String>,
    /// Everything else, in name order.
    pub pass_through: Vec<PassThrough>,
}

impl OptionSet {
    /// Sort raw options into forwarded and consumed ones. Never fails:
    /// unknown options are for the delegate to judge.
    pub fn translate(options: &MountOptions) -> Self {
        let mut set = OptionSet::default();
        for (name, value) in options.iter() {
            if name == READ_ONLY {
                set.read_only = true;
            } else if ADMINISTRATIVE_OPTIONS.contains(&name) {
                set.consumed.push(name.to_string());
            } else {
                set.pass_through.push(PassThrough {
                    name: name.to_string(),
                    value: value.map(str::to_string),
                });
            }
        }
        set
    }

    /// Delegate arguments, one `-o` per option, read-only first.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(2 * (self.pass_through.len() + 1));
        if self.read_only {
            args.push("-o".to_string());
            args.push(READ_ONLY.to_string());
        }
        for option in &self.pass_through {
            args.push("-o".to_string());
            args.push(option.to_string());
        }
        args
    }
}
