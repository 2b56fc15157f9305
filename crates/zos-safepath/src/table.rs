//! Per-byte classification and reserved Windows names.
//!
//! Both tables are `const`-evaluated into statics, so they exist before any
//! check runs and are shared read-only by every caller.
//!
//! # Layering
//!
//! The byte table is built in a fixed order, and later layers only remove
//! grants:
//!
//! 1. Printable ASCII `0x20..=0x7E` accepts every constraint
//! 2. Control bytes `0x01..=0x1F`, `0x7F` accept only the baseline and the
//!    encoding constraints; high bytes `0x80..=0xFF` accept only the baseline
//!    and `ValidEncoding` (whether they actually form valid UTF-8 is checked
//!    per segment, not per byte)
//! 3. RFC 3986 reserved/excluded punctuation loses `URLUnescaped`
//! 4. POSIX shell metacharacters and space lose `ShellSafe`
//! 5. The Windows reserved characters lose `WindowsSafe`
//! 6. `/` accepts nothing, not even the baseline
//!
//! The null byte is never granted anything.

use crate::rules::RuleSet;

/// RFC 3986 section 3.3. Anything outside pchar except `%` is excluded, and
/// `:` is excluded because it is ambiguous in a relative reference.
const URL_EXCLUDED: &[u8] = b" \"#%/:<>?[\\]^`{|}";

/// IEEE Std 1003.1-2017, Shell Command Language: characters that need
/// quoting, plus space.
const SHELL_EXCLUDED: &[u8] = b" |&;<>()$`\\\"'";

/// Characters Windows does not allow in file names.
const WINDOWS_EXCLUDED: &[u8] = b"<>:\"/\\|?*";

/// The only recognized path separator.
pub const SEPARATOR: u8 = b'/';

static CLASSIFICATION: ClassificationTable = ClassificationTable::build();

static RESERVED_NAMES: ReservedNameSet = ReservedNameSet {
    names: [
        "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7",
        "com8", "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
    ],
};

/// Maps each byte value to the constraints that accept it in isolation.
pub struct ClassificationTable {
    accepted: [RuleSet; 256],
}

impl ClassificationTable {
    /// The shared table.
    pub fn get() -> &'static ClassificationTable {
        &CLASSIFICATION
    }

    /// Constraints that accept `byte`, ignoring its position.
    pub const fn accepted(&self, byte: u8) -> RuleSet {
        self.accepted[byte as usize]
    }

    /// Check if `byte` is acceptable under every constraint in `rules`.
    pub const fn allows(&self, byte: u8, rules: RuleSet) -> bool {
        self.accepted(byte).contains(rules)
    }

    const fn build() -> Self {
        let everything = RuleSet::STRICT.union(RuleSet::ALWAYS);
        let control = RuleSet::ALWAYS
            .union(RuleSet::ASCII_ONLY)
            .union(RuleSet::VALID_ENCODING);
        let high = RuleSet::ALWAYS.union(RuleSet::VALID_ENCODING);

        let mut accepted = [RuleSet::ANY; 256];

        let mut c = 0x20;
        while c <= 0x7e {
            accepted[c] = everything;
            c += 1;
        }

        let mut c = 0x01;
        while c < 0x20 {
            accepted[c] = control;
            c += 1;
        }
        accepted[0x7f] = control;

        let mut c = 0x80;
        while c <= 0xff {
            accepted[c] = high;
            c += 1;
        }

        let accepted = revoke(accepted, URL_EXCLUDED, RuleSet::URL_UNESCAPED);
        let accepted = revoke(accepted, SHELL_EXCLUDED, RuleSet::SHELL_SAFE);
        let mut accepted = revoke(accepted, WINDOWS_EXCLUDED, RuleSet::WINDOWS_SAFE);

        accepted[SEPARATOR as usize] = RuleSet::ANY;

        ClassificationTable { accepted }
    }
}

const fn revoke(mut table: [RuleSet; 256], bytes: &[u8], rule: RuleSet) -> [RuleSet; 256] {
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i] as usize;
        table[b] = table[b].minus(rule);
        i += 1;
    }
    table
}

/// Windows device names, matched case-insensitively.
pub struct ReservedNameSet {
    names: [&'static str; 22],
}

impl ReservedNameSet {
    /// The shared set.
    pub fn get() -> &'static ReservedNameSet {
        &RESERVED_NAMES
    }

    /// Check if `base` is a reserved device name, ignoring ASCII case.
    pub fn contains(&self, base: &[u8]) -> bool {
        self.names
            .iter()
            .any(|name| name.as_bytes().eq_ignore_ascii_case(base))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names.iter().copied()
    }
}
