//! Error types for path safety checks.
//!
//! Every rejection is a plain value: a closed [`ErrorKind`] plus the input
//! that produced it. Messages are rendered from those fields only.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde::{Deserialize, Serialize};

/// Why a segment or path was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ErrorKind {
    /// Segment is empty, `.`, or `..`.
    #[error("reserved segment name")]
    ReservedSegmentName,

    /// Segment is not valid UTF-8.
    #[error("not valid UTF-8 text")]
    InvalidEncoding {
        /// Offset of the first byte that does not start a valid sequence
        offset: usize,
    },

    /// Segment contains a byte the rules do not allow anywhere.
    #[error("contains disallowed {}", describe(.byte, .ch, false))]
    DisallowedByte {
        byte: u8,
        /// The character starting at the byte, if it decodes
        ch: Option<char>,
    },

    /// Segment contains a non-ASCII byte under `ASCIIOnly`.
    #[error("contains non-ASCII {}", describe(.byte, .ch, true))]
    NonAsciiByte { byte: u8, ch: Option<char> },

    /// Segment starts with a character the rules reserve.
    #[error("starts with disallowed character {0:?}")]
    LeadingCharacter(char),

    /// Segment ends with a character the rules reserve.
    #[error("ends with disallowed character {0:?}")]
    TrailingCharacter(char),

    /// Segment base name is a Windows device name. Holds the lowercased base.
    #[error("uses reserved Windows filename {0:?}")]
    ReservedWindowsName(String),

    #[error("path is empty")]
    EmptyPath,

    #[error("path is absolute")]
    AbsolutePath,

    #[error("path has trailing slash")]
    TrailingSeparator,

    #[error("path has double slash")]
    DoubleSeparator,
}

fn describe(byte: &u8, ch: &Option<char>, with_code_point: bool) -> String {
    match ch {
        Some(c) if with_code_point => format!("character {:?} U+{:04X}", c, *c as u32),
        Some(c) => format!("character {:?}", c),
        None => format!("byte 0x{:02x}", byte),
    }
}

impl ErrorKind {
    /// Check if this kind describes a single segment rather than the shape
    /// of a whole path.
    pub fn is_segment_kind(&self) -> bool {
        !matches!(
            self,
            ErrorKind::EmptyPath
                | ErrorKind::AbsolutePath
                | ErrorKind::TrailingSeparator
                | ErrorKind::DoubleSeparator
        )
    }
}

/// Whether an error came from a segment check or a path check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorScope {
    Segment,
    Path,
}

/// A rejected segment or path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafePathError {
    kind: ErrorKind,
    scope: ErrorScope,
    /// Offending segment (absent for path-shape errors)
    segment: Option<Vec<u8>>,
    /// Full input path (present when path-scoped)
    path: Option<Vec<u8>>,
}

impl SafePathError {
    pub(crate) fn for_segment(kind: ErrorKind, segment: &[u8]) -> Self {
        Self {
            kind,
            scope: ErrorScope::Segment,
            segment: Some(segment.to_vec()),
            path: None,
        }
    }

    pub(crate) fn for_path(kind: ErrorKind, path: &[u8]) -> Self {
        Self {
            kind,
            scope: ErrorScope::Path,
            segment: None,
            path: Some(path.to_vec()),
        }
    }

    /// Re-tag a segment error as part of checking `path`.
    pub(crate) fn within_path(mut self, path: &[u8]) -> Self {
        self.scope = ErrorScope::Path;
        self.path = Some(path.to_vec());
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn scope(&self) -> ErrorScope {
        self.scope
    }

    /// The segment that failed, if the failure is about one segment.
    pub fn segment(&self) -> Option<&[u8]> {
        self.segment.as_deref()
    }

    /// The full path, if the error came from a path check.
    pub fn path(&self) -> Option<&[u8]> {
        self.path.as_deref()
    }

    pub fn is_path_error(&self) -> bool {
        self.scope == ErrorScope::Path
    }
}

impl fmt::Display for SafePathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        if let Some(path) = &self.path {
            write!(f, "invalid path {:?}", String::from_utf8_lossy(path))?;
            sep = ": ";
        }
        if let Some(segment) = &self.segment {
            write!(f, "{}invalid path segment {:?}", sep, String::from_utf8_lossy(segment))?;
            sep = ": ";
        }
        if self.kind != ErrorKind::ReservedSegmentName {
            write!(f, "{}{}", sep, self.kind)?;
        }
        Ok(())
    }
}

impl core::error::Error for SafePathError {}

/// Errors from parsing a rule set name list.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseRulesError {
    /// Input or one of its `|`-separated items is blank.
    #[error("empty rule name")]
    Empty,

    #[error("unknown rule: {0:?}")]
    UnknownRule(String),
}
