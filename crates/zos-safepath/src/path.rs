//! Multi-segment path validation.
//!
//! A safe path is a non-empty list of safe segments joined by single `/`
//! characters. Paths are not normalized first: `.` and `..` segments are
//! rejected rather than resolved, and `\` is an ordinary byte.

use crate::error::{ErrorKind, SafePathError};
use crate::rules::RuleSet;
use crate::segment::validate_segment;
use crate::table::SEPARATOR;

/// Check that `path` is a safe relative path under `rules`.
///
/// Absolute paths, the empty path, paths ending in `/`, and paths
/// containing `//` are rejected. Every segment is checked with
/// [`validate_segment`]; the first failing segment is reported with the full
/// path attached.
///
/// # Example
/// ```
/// use zos_safepath::{validate_path, ErrorKind, RuleSet};
///
/// assert!(validate_path(RuleSet::STRICT, "docs/guide/intro.md").is_ok());
///
/// let err = validate_path(RuleSet::STRICT, "docs//intro.md").unwrap_err();
/// assert_eq!(err.kind(), &ErrorKind::DoubleSeparator);
/// ```
pub fn validate_path<S>(rules: RuleSet, path: &S) -> Result<(), SafePathError>
where
    S: AsRef<[u8]> + ?Sized,
{
    let path = path.as_ref();
    if path.is_empty() {
        return Err(reject(ErrorKind::EmptyPath, path));
    }
    if path[0] == SEPARATOR {
        return Err(reject(ErrorKind::AbsolutePath, path));
    }

    let mut rest = path;
    while !rest.is_empty() {
        let segment = match rest.iter().position(|&b| b == SEPARATOR) {
            Some(0) => return Err(reject(ErrorKind::DoubleSeparator, path)),
            None => core::mem::take(&mut rest),
            Some(i) => {
                let segment = &rest[..i];
                rest = &rest[i + 1..];
                if rest.is_empty() {
                    return Err(reject(ErrorKind::TrailingSeparator, path));
                }
                segment
            }
        };
        validate_segment(rules, segment).map_err(|e| e.within_path(path))?;
    }

    Ok(())
}

fn reject(kind: ErrorKind, path: &[u8]) -> SafePathError {
    log::trace!("rejected path: {:?}", kind);
    SafePathError::for_path(kind, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorScope;

    fn kind_of(rules: RuleSet, path: &str) -> Option<ErrorKind> {
        validate_path(rules, path).err().map(|e| e.kind().clone())
    }

    #[test]
    fn test_valid_paths() {
        assert!(validate_path(RuleSet::STRICT, "a").is_ok());
        assert!(validate_path(RuleSet::STRICT, "a/b/c").is_ok());
        assert!(validate_path(RuleSet::ANY, "a\\b/c d").is_ok());
    }

    #[test]
    fn test_structural_errors() {
        assert_eq!(kind_of(RuleSet::STRICT, ""), Some(ErrorKind::EmptyPath));
        assert_eq!(kind_of(RuleSet::STRICT, "/"), Some(ErrorKind::AbsolutePath));
        assert_eq!(kind_of(RuleSet::STRICT, "/a/b"), Some(ErrorKind::AbsolutePath));
        assert_eq!(kind_of(RuleSet::STRICT, "a//b"), Some(ErrorKind::DoubleSeparator));
        assert_eq!(kind_of(RuleSet::STRICT, "a/b/"), Some(ErrorKind::TrailingSeparator));
        assert_eq!(kind_of(RuleSet::ANY, "a/"), Some(ErrorKind::TrailingSeparator));
    }

    #[test]
    fn test_structural_error_has_no_segment() {
        let err = validate_path(RuleSet::ANY, "a//b").unwrap_err();
        assert_eq!(err.scope(), ErrorScope::Path);
        assert_eq!(err.segment(), None);
        assert_eq!(err.path(), Some(&b"a//b"[..]));
    }

    #[test]
    fn test_first_failing_segment_reported() {
        let err = validate_path(RuleSet::STRICT, "ok/-bad/.worse").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::LeadingCharacter('-'));
        assert_eq!(err.segment(), Some(&b"-bad"[..]));
        assert_eq!(err.path(), Some(&b"ok/-bad/.worse"[..]));
        assert!(err.is_path_error());
    }

    #[test]
    fn test_dot_segments_rejected() {
        assert_eq!(kind_of(RuleSet::ANY, "a/../b"), Some(ErrorKind::ReservedSegmentName));
        assert_eq!(kind_of(RuleSet::ANY, "./a"), Some(ErrorKind::ReservedSegmentName));
        assert_eq!(kind_of(RuleSet::ANY, "a/."), Some(ErrorKind::ReservedSegmentName));
    }

    #[test]
    fn test_backslash_is_content() {
        assert!(validate_path(RuleSet::ANY, "a\\..").is_ok());
        assert!(matches!(
            kind_of(RuleSet::WINDOWS_SAFE, "a\\b"),
            Some(ErrorKind::DisallowedByte { byte: b'\\', .. })
        ));
    }

    #[test]
    fn test_segment_error_matches_segment_check() {
        let from_path = validate_path(RuleSet::WINDOWS_SAFE, "dir/CON").unwrap_err();
        let from_segment = validate_segment(RuleSet::WINDOWS_SAFE, "CON").unwrap_err();
        assert_eq!(from_path.kind(), from_segment.kind());
        assert_eq!(from_path.segment(), from_segment.segment());
    }
}
