//! Rule sets for path safety checks.
//!
//! A [`RuleSet`] is a small bitset of independent constraints. Adding a
//! constraint only ever rejects more inputs, so rule sets compose by union:
//! `RuleSet::URL_UNESCAPED | RuleSet::NOT_HIDDEN` rejects any segment that
//! needs escaping in a URL *or* starts with `.`.
//!
//! # Rendering
//!
//! Rule sets render as their constituent names joined with `|`, in bit
//! order, or `Any` when empty. The same form is accepted by [`FromStr`], so
//! rule sets can be stored in configuration as plain strings.

use alloc::string::String;
use core::fmt;
use core::ops::{BitAnd, BitOr, BitOrAssign, Sub};
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ParseRulesError, SafePathError};

/// A combination of path safety constraints.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RuleSet(u8);

impl RuleSet {
    /// Allows anything a lax filesystem (Linux) would accept.
    ///
    /// Only the empty segment, `.`, `..`, the `/` character and the null
    /// byte are rejected.
    pub const ANY: RuleSet = RuleSet(0);

    /// Rejects non-ASCII bytes.
    pub const ASCII_ONLY: RuleSet = RuleSet(1 << 0);

    /// Rejects byte strings that are not valid UTF-8 text.
    pub const VALID_ENCODING: RuleSet = RuleSet(1 << 1);

    /// Rejects anything that needs percent-encoding in a URL path.
    ///
    /// The RFC 3986 sub-delims `!$&'()*+,;=` are allowed, as are `@` and `~`.
    /// The colon is rejected everywhere because it is not safe in the first
    /// segment of a relative reference.
    pub const URL_UNESCAPED: RuleSet = RuleSet(1 << 2);

    /// Rejects POSIX shell metacharacters `|&;<>()$` `` ` `` `\"'`, space, and
    /// segments starting with `~`.
    pub const SHELL_SAFE: RuleSet = RuleSet(1 << 3);

    /// Rejects segments starting with `-`, which a program may parse as an
    /// option.
    pub const ARGUMENT_SAFE: RuleSet = RuleSet(1 << 4);

    /// Rejects what Windows filesystems cannot store: control characters,
    /// `<>:"\|?*`, trailing `.` or space, and device names like `con`.
    pub const WINDOWS_SAFE: RuleSet = RuleSet(1 << 5);

    /// Rejects segments starting with `.`.
    pub const NOT_HIDDEN: RuleSet = RuleSet(1 << 6);

    /// Every selectable constraint.
    ///
    /// New constraints added to this crate will be added here as well.
    pub const STRICT: RuleSet = RuleSet(
        Self::ASCII_ONLY.0
            | Self::VALID_ENCODING.0
            | Self::URL_UNESCAPED.0
            | Self::SHELL_SAFE.0
            | Self::ARGUMENT_SAFE.0
            | Self::WINDOWS_SAFE.0
            | Self::NOT_HIDDEN.0,
    );

    /// Baseline constraint applied to every check. Used to reject `/` and
    /// the null byte; never selectable by callers.
    pub(crate) const ALWAYS: RuleSet = RuleSet(1 << 7);

    const NAMED: [(RuleSet, &'static str); 7] = [
        (Self::ASCII_ONLY, "ASCIIOnly"),
        (Self::VALID_ENCODING, "ValidEncoding"),
        (Self::URL_UNESCAPED, "URLUnescaped"),
        (Self::SHELL_SAFE, "ShellSafe"),
        (Self::ARGUMENT_SAFE, "ArgumentSafe"),
        (Self::WINDOWS_SAFE, "WindowsSafe"),
        (Self::NOT_HIDDEN, "NotHidden"),
    ];

    /// Raw bit representation.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Build a rule set from raw bits, dropping bits outside the selectable
    /// vocabulary.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        RuleSet(bits & Self::STRICT.0)
    }

    pub const fn union(self, other: RuleSet) -> Self {
        RuleSet(self.0 | other.0)
    }

    /// Relative complement: the constraints in `self` that are not in `other`.
    pub const fn minus(self, other: RuleSet) -> Self {
        RuleSet(self.0 & !other.0)
    }

    pub const fn intersection(self, other: RuleSet) -> Self {
        RuleSet(self.0 & other.0)
    }

    /// Check if every constraint in `other` is also in `self`.
    pub const fn contains(self, other: RuleSet) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_subset_of(self, other: RuleSet) -> bool {
        other.contains(self)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the named constraints in this set, in bit order.
    pub fn iter(self) -> impl Iterator<Item = RuleSet> {
        Self::NAMED
            .into_iter()
            .map(|(rule, _)| rule)
            .filter(move |&rule| self.contains(rule))
    }

    /// The rules actually evaluated for a request: unknown bits are masked
    /// away and the baseline constraint is added back.
    pub(crate) const fn effective(self) -> Self {
        RuleSet((self.0 & Self::STRICT.0) | Self::ALWAYS.0)
    }

    /// Check a single path segment against these rules.
    ///
    /// See [`validate_segment`](crate::validate_segment).
    pub fn check_segment<S>(self, name: &S) -> Result<(), SafePathError>
    where
        S: AsRef<[u8]> + ?Sized,
    {
        crate::segment::validate_segment(self, name)
    }

    /// Check a `/`-separated relative path against these rules.
    ///
    /// See [`validate_path`](crate::validate_path).
    pub fn check_path<S>(self, path: &S) -> Result<(), SafePathError>
    where
        S: AsRef<[u8]> + ?Sized,
    {
        crate::path::validate_path(self, path)
    }

    fn name_of(text: &str) -> Option<RuleSet> {
        match text {
            "Any" => Some(Self::ANY),
            "Strict" => Some(Self::STRICT),
            "ValidUTF8" => Some(Self::VALID_ENCODING),
            _ => Self::NAMED
                .iter()
                .find(|(_, name)| *name == text)
                .map(|&(rule, _)| rule),
        }
    }
}

impl BitOr for RuleSet {
    type Output = RuleSet;

    fn bitor(self, rhs: RuleSet) -> RuleSet {
        self.union(rhs)
    }
}

impl BitOrAssign for RuleSet {
    fn bitor_assign(&mut self, rhs: RuleSet) {
        *self = self.union(rhs);
    }
}

impl BitAnd for RuleSet {
    type Output = RuleSet;

    fn bitand(self, rhs: RuleSet) -> RuleSet {
        self.intersection(rhs)
    }
}

impl Sub for RuleSet {
    type Output = RuleSet;

    fn sub(self, rhs: RuleSet) -> RuleSet {
        self.minus(rhs)
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Any");
        }

        let mut first = true;
        for (rule, name) in Self::NAMED {
            if self.contains(rule) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }

        // Bits outside the vocabulary only show up on table entries.
        let rem = self.minus(Self::STRICT).0;
        if rem != 0 {
            if !first {
                f.write_str("|")?;
            }
            write!(f, "0x{:02x}", rem)?;
        }
        Ok(())
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for RuleSet {
    type Err = ParseRulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rules = RuleSet::ANY;
        for item in s.split('|') {
            let item = item.trim();
            if item.is_empty() {
                return Err(ParseRulesError::Empty);
            }
            rules |= RuleSet::name_of(item)
                .ok_or_else(|| ParseRulesError::UnknownRule(String::from(item)))?;
        }
        Ok(rules)
    }
}

impl Serialize for RuleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RuleSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
