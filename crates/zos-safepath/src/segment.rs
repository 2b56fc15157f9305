//! Single path segment validation.

use alloc::string::String;

use crate::error::{ErrorKind, SafePathError};
use crate::rules::RuleSet;
use crate::table::{ClassificationTable, ReservedNameSet};

/// Check that `name` is a safe path segment under `rules`.
///
/// The empty name, `.`, and `..` are always unsafe, as are the `/` character
/// and the null byte, whatever `rules` contains. Checks run in a fixed order
/// and the first failure is returned:
///
/// 1. Reserved segment names
/// 2. UTF-8 well-formedness, when `ValidEncoding` is requested without
///    `ASCIIOnly`
/// 3. Per-byte classification
/// 4. Leading `~` (`ShellSafe`), leading `-` (`ArgumentSafe`), trailing `.`
///    or space and device names (`WindowsSafe`), leading `.` (`NotHidden`)
///
/// # Example
/// ```
/// use zos_safepath::{validate_segment, ErrorKind, RuleSet};
///
/// assert!(validate_segment(RuleSet::STRICT, "report-v1.2.txt").is_ok());
///
/// let err = validate_segment(RuleSet::WINDOWS_SAFE, "NUL.TXT").unwrap_err();
/// assert_eq!(err.kind(), &ErrorKind::ReservedWindowsName("nul".into()));
/// ```
pub fn validate_segment<S>(rules: RuleSet, name: &S) -> Result<(), SafePathError>
where
    S: AsRef<[u8]> + ?Sized,
{
    let name = name.as_ref();
    check(rules.effective(), name).map_err(|kind| {
        log::trace!("rejected segment under {}: {:?}", rules, kind);
        SafePathError::for_segment(kind, name)
    })
}

/// `rules` must already include the baseline.
fn check(rules: RuleSet, name: &[u8]) -> Result<(), ErrorKind> {
    if matches!(name, b"" | b"." | b"..") {
        return Err(ErrorKind::ReservedSegmentName);
    }

    if rules.contains(RuleSet::VALID_ENCODING) && !rules.contains(RuleSet::ASCII_ONLY) {
        if let Err(e) = core::str::from_utf8(name) {
            return Err(ErrorKind::InvalidEncoding {
                offset: e.valid_up_to(),
            });
        }
    }

    let table = ClassificationTable::get();
    if let Some(i) = name.iter().position(|&b| !table.allows(b, rules)) {
        let byte = name[i];
        let ch = char_at(name, i);
        return Err(if rules.contains(RuleSet::ASCII_ONLY) && !byte.is_ascii() {
            ErrorKind::NonAsciiByte { byte, ch }
        } else {
            ErrorKind::DisallowedByte { byte, ch }
        });
    }

    // Non-empty from here on. Every character tested below is ASCII, so
    // comparing the first and last bytes is the same as comparing chars.
    let first = name[0];
    let last = name[name.len() - 1];

    if rules.contains(RuleSet::SHELL_SAFE) && first == b'~' {
        return Err(ErrorKind::LeadingCharacter('~'));
    }
    if rules.contains(RuleSet::ARGUMENT_SAFE) && first == b'-' {
        return Err(ErrorKind::LeadingCharacter('-'));
    }
    if rules.contains(RuleSet::WINDOWS_SAFE) {
        if last == b'.' || last == b' ' {
            return Err(ErrorKind::TrailingCharacter(char::from(last)));
        }
        if let Some(base) = device_name_candidate(name) {
            if (base.len() == 3 || base.len() == 4) && ReservedNameSet::get().contains(base) {
                let base = String::from_utf8_lossy(base).to_ascii_lowercase();
                return Err(ErrorKind::ReservedWindowsName(base));
            }
        }
    }
    if rules.contains(RuleSet::NOT_HIDDEN) && first == b'.' {
        return Err(ErrorKind::LeadingCharacter('.'));
    }

    Ok(())
}

/// The part of `name` before its first `.`, or `None` when the name has two
/// or more dots. Names like `nul.txt.foo` are left alone.
fn device_name_candidate(name: &[u8]) -> Option<&[u8]> {
    match name.iter().position(|&b| b == b'.') {
        None => Some(name),
        Some(i) if !name[i + 1..].contains(&b'.') => Some(&name[..i]),
        Some(_) => None,
    }
}

/// Decode the character starting at byte `i`, if the bytes there are a
/// well-formed UTF-8 sequence.
fn char_at(bytes: &[u8], i: usize) -> Option<char> {
    let rest = &bytes[i..];
    (1..=rest.len().min(4)).find_map(|width| {
        core::str::from_utf8(&rest[..width])
            .ok()
            .and_then(|s| s.chars().next())
    })
}
