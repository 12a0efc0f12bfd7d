//! mount(8) argument parsing.
//!
//! macOS passes options before the positionals and Linux after them, so the
//! parser classifies each token on its own instead of expecting a fixed
//! layout. Tokens are taken as raw `OsStr`s: mount points need not be UTF-8.

use crate::error::UsageError;
use crate::options::MountOptions;
use std::ffi::{OsStr, OsString};

/// A validated mount invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountRequest {
    /// Bucket name.
    pub source: OsString,
    /// Directory to mount on.
    pub mount_point: OsString,
    /// Options from every `-o` block, later entries winning.
    pub options: MountOptions,
}

/// Parse the helper's arguments (program name excluded).
///
/// Errors name tokens by their 1-based position in `args`. No token is
/// special except `-o`; in particular `--` is not an end-of-flags marker.
pub fn parse_args<S: AsRef<OsStr>>(args: &[S]) -> Result<MountRequest, UsageError> {
    let mut positionals: Vec<&OsStr> = Vec::with_capacity(2);
    let mut options = MountOptions::new();

    let mut tokens = args.iter().map(AsRef::as_ref).enumerate();
    while let Some((i, token)) = tokens.next() {
        let index = i + 1;
        if token == "-o" {
            let Some((j, block)) = tokens.next() else {
                return Err(UsageError::DanglingOption);
            };
            let Some(block) = block.to_str() else {
                return Err(unexpected(j + 1, block));
            };
            options.parse_block(block);
        } else if token.as_encoded_bytes().starts_with(b"-") || positionals.len() == 2 {
            return Err(unexpected(index, token));
        } else {
            positionals.push(token);
        }
    }

    match positionals[..] {
        [source, mount_point] => Ok(MountRequest {
            source: source.to_os_string(),
            mount_point: mount_point.to_os_string(),
            options,
        }),
        _ => Err(UsageError::TooFewPositionals {
            got: positionals.len(),
        }),
    }
}

fn unexpected(index: usize, arg: &OsStr) -> UsageError {
    UsageError::UnexpectedArg {
        index,
        arg: arg.to_string_lossy().into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::ffi::OsStrExt;

    #[test]
    fn test_too_few_args() {
        let err = parse_args(&["bucket"]).unwrap_err();
        assert_eq!(err, UsageError::TooFewPositionals { got: 1 });
        assert!(err.to_string().contains("two positional arguments"));

        let err = parse_args::<&str>(&[]).unwrap_err();
        assert_eq!(err, UsageError::TooFewPositionals { got: 0 });

        let err = parse_args(&["-o", "ro", "bucket"]).unwrap_err();
        assert_eq!(err, UsageError::TooFewPositionals { got: 1 });
    }

    #[test]
    fn test_too_many_args() {
        let err = parse_args(&["bucket", "a", "b"]).unwrap_err();
        assert!(err.to_string().contains("Unexpected arg 3"));

        let err = parse_args(&["-o", "ro", "bucket", "a", "b", "c"]).unwrap_err();
        assert_eq!(
            err,
            UsageError::UnexpectedArg {
                index: 5,
                arg: "b".to_string()
            }
        );
    }

    #[test]
    fn test_trailing_dash_o() {
        let err = parse_args(&["bucket", "a", "-o"]).unwrap_err();
        assert_eq!(err, UsageError::DanglingOption);
        assert!(err.to_string().contains("Unexpected -o"));

        let err = parse_args(&["-o"]).unwrap_err();
        assert_eq!(err, UsageError::DanglingOption);
    }

    #[test]
    fn test_unknown_flag() {
        let err = parse_args(&["-n", "bucket", "/mnt/x"]).unwrap_err();
        assert_eq!(
            err,
            UsageError::UnexpectedArg {
                index: 1,
                arg: "-n".to_string()
            }
        );

        let err = parse_args(&["bucket", "/mnt/x", "--verbose"]).unwrap_err();
        assert!(err.to_string().contains("Unexpected arg 3"));
    }

    #[test]
    fn test_double_dash_is_not_special() {
        let err = parse_args(&["--", "bucket", "/mnt/x"]).unwrap_err();
        assert_eq!(
            err,
            UsageError::UnexpectedArg {
                index: 1,
                arg: "--".to_string()
            }
        );

        let err = parse_args(&["bucket", "--", "x"]).unwrap_err();
        assert!(err.to_string().contains("Unexpected arg 2"));
    }

    #[test]
    fn test_non_utf8_mount_point() {
        let mount_point = OsStr::from_bytes(b"/mnt/\xff");
        let req = parse_args(&[OsStr::new("bucket"), mount_point]).unwrap();
        assert_eq!(req.mount_point, mount_point);

        let err = parse_args(&[OsStr::new("bucket"), mount_point, OsStr::new("extra")])
            .unwrap_err();
        assert!(err.to_string().contains("Unexpected arg 3"));
    }

    #[test]
    fn test_non_utf8_option_block() {
        let block = OsStr::from_bytes(b"uid=\xff");
        let args = [OsStr::new("-o"), block, OsStr::new("bucket"), OsStr::new("/mnt/x")];
        let err = parse_args(&args).unwrap_err();
        assert!(err.to_string().contains("Unexpected arg 2"));
    }

    #[test]
    fn test_plain() {
        let req = parse_args(&["bucket", "/mnt/x"]).unwrap();
        assert_eq!(req.source, "bucket");
        assert_eq!(req.mount_point, "/mnt/x");
        assert!(req.options.is_empty());
    }

    #[test]
    fn test_bsd_and_linux_order() {
        let bsd = parse_args(&["-o", "ro", "bucket", "/mnt/x"]).unwrap();
        let linux = parse_args(&["bucket", "/mnt/x", "-o", "ro"]).unwrap();
        assert_eq!(bsd, linux);
        assert_eq!(bsd.options.get("ro"), Some(None));
    }

    #[test]
    fn test_split_option_blocks() {
        let req = parse_args(&["-o", "uid=1", "bucket", "-o", "ro", "/mnt/x", "-o", "uid=2"])
            .unwrap();
        assert_eq!(req.source, "bucket");
        assert_eq!(req.mount_point, "/mnt/x");
        assert_eq!(req.options.get("uid"), Some(Some("2")));
        assert_eq!(req.options.get("ro"), Some(None));
    }

    #[test]
    fn test_option_value_may_look_like_a_flag() {
        let req = parse_args(&["-o", "-weird", "bucket", "/mnt/x"]).unwrap();
        assert!(req.options.contains("-weird"));

        let req = parse_args(&["-o", "-o", "bucket", "/mnt/x"]).unwrap();
        assert!(req.options.contains("-o"));
    }
}
