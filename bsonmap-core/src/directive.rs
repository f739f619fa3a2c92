//! Per-field directive parsing.
//!
//! A directive is the comma separated string attached to a field under a tag
//! key, e.g. `"_id,omitempty"`. The first segment overrides the field's key, the
//! remaining segments are flags. Unknown flags are kept but have no effect.

use std::collections::HashSet;

/// Override name that removes a field from mapping entirely.
pub const SUPPRESS: &str = "-";

/// Skip the field when its value is empty.
pub const OMIT_EMPTY: &str = "omitempty";
/// Keep the raw value instead of mapping nested records.
pub const OMIT_NESTED: &str = "omitnested";
/// Merge a nested document's keys into the enclosing document.
pub const FLATTEN: &str = "flatten";
/// Emit the value's text representation.
pub const STRING: &str = "string";

/// A parsed field directive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Directive<'a> {
    name: &'a str,
    flags: HashSet<&'a str>,
}

impl<'a> Directive<'a> {
    /// Parses a raw directive string. Every input is valid.
    ///
    /// Empty segments after the first become the empty-string flag.
    pub fn parse(raw: &'a str) -> Self {
        let mut segments = raw.split(',');
        let name = segments.next().unwrap_or_default();

        Directive {
            name,
            flags: segments.collect(),
        }
    }

    /// The override name, empty when the declared name should be used.
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn flags(&self) -> &HashSet<&'a str> {
        &self.flags
    }

    /// Returns true if the directive carries `flag`.
    pub fn has(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Returns true if the override name is exactly `-`.
    pub fn is_suppressed(&self) -> bool {
        self.name == SUPPRESS
    }

    /// The key to emit for a field declared as `declared`.
    pub fn key_or<'b>(&self, declared: &'b str) -> &'b str
    where
        'a: 'b,
    {
        if self.name.is_empty() {
            declared
        } else {
            self.name
        }
    }
}
