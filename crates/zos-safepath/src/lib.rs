//! Zero OS Path Safety Rules
//!
//! Decides whether a path, or a single path segment, can be handed to other
//! contexts without escaping: POSIX shells, program argument lists, URL
//! paths, Windows filesystems, and directory listings that hide dotfiles.
//!
//! - **Rules**: [`RuleSet`] bitset of independent constraints
//! - **Table**: Per-byte classification and reserved Windows device names
//! - **Segment**: [`validate_segment`] for one path component
//! - **Path**: [`validate_path`] for `/`-separated relative paths
//! - **Error**: [`SafePathError`] structured rejection values
//!
//! # Design Principles
//!
//! 1. **Monotonic**: Adding a constraint only ever rejects more inputs
//! 2. **Pure**: No I/O, no shared mutable state, same input gives same result
//! 3. **Byte-oriented**: Inputs are arbitrary bytes; UTF-8 is a rule, not an
//!    assumption
//! 4. **No normalization**: `.` and `..` are rejected, never resolved
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌───────────────────────┐    ┌───────────────────┐
//! │   RuleSet    │───▶│ ClassificationTable   │───▶│ validate_segment  │
//! │  (bitset)    │    │ ReservedNameSet       │    │  first failure    │
//! └──────────────┘    │  (const statics)      │    └─────────┬─────────┘
//!                     └───────────────────────┘              │
//!                                                            ▼
//!                                                  ┌───────────────────┐
//!                                                  │  validate_path    │
//!                                                  │  split on '/'     │
//!                                                  └───────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use zos_safepath::RuleSet;
//!
//! let rules = RuleSet::URL_UNESCAPED | RuleSet::NOT_HIDDEN;
//! assert!(rules.check_path("assets/logo-v2.png").is_ok());
//! assert!(rules.check_path("assets/.cache").is_err());
//! assert!(rules.check_segment("mailto:user").is_err());
//! ```

#![no_std]
extern crate alloc;

pub mod error;
pub mod path;
pub mod rules;
pub mod segment;
pub mod table;

pub use error::{ErrorKind, ErrorScope, ParseRulesError, SafePathError};
pub use path::validate_path;
pub use rules::RuleSet;
pub use segment::validate_segment;
pub use table::{ClassificationTable, ReservedNameSet, SEPARATOR};
