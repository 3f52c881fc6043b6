//! Source/target identifier configuration

use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

/// Source identifiers used when none are configured
pub const DEFAULT_FROM: &[&str] = &["assault", "marksman"];

/// Target identifier used when none is configured
pub const DEFAULT_TO: &str = "pmcBot";

/// Identifiers to replace and their replacement
///
/// Immutable once built. `from` is never empty and `to` is never blank:
/// both fall back to [`DEFAULT_FROM`] / [`DEFAULT_TO`].
///
/// # Examples
/// ```
/// # use scav_patch::IdentifierSet;
/// let ids = IdentifierSet::new(["Assault", " ", "assault"], "  exUsec ");
/// assert_eq!(ids.from_ids(), ["Assault"]);
/// assert_eq!(ids.to(), "exUsec");
/// assert!(ids.matches("ASSAULT"));
///
/// let fallback = IdentifierSet::new(Vec::<String>::new(), "");
/// assert_eq!(fallback.from_ids(), ["assault", "marksman"]);
/// assert_eq!(fallback.to(), "pmcBot");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierSet {
    /// Configured spellings, in configuration order
    from: Vec<String>,
    /// Case-folded lookup
    folded: HashSet<String>,
    to: String,
}

impl IdentifierSet {
    /// Build from configured values
    ///
    /// Entries are trimmed; blanks and case-insensitive duplicates are dropped.
    #[must_use]
    pub fn new<I, S>(from: I, to: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ids = Self {
            from: Vec::new(),
            folded: HashSet::new(),
            to: match to.trim() {
                "" => DEFAULT_TO.to_string(),
                trimmed => trimmed.to_string(),
            },
        };

        for entry in from {
            ids.push(entry.as_ref());
        }
        if ids.from.is_empty() {
            for entry in DEFAULT_FROM {
                ids.push(entry);
            }
        }
        ids
    }

    fn push(&mut self, entry: &str) {
        let entry = entry.trim();
        if !entry.is_empty() && self.folded.insert(entry.to_lowercase()) {
            self.from.push(entry.to_string());
        }
    }

    /// Source identifiers, in configuration order
    #[inline]
    #[must_use]
    pub fn from_ids(&self) -> &[String] {
        &self.from
    }

    /// Target identifier, with its configured casing
    #[inline]
    #[must_use]
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Check if text is a source identifier, ignoring case
    #[inline]
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.folded.contains(&text.to_lowercase())
    }

    /// Check if text should be replaced
    ///
    /// Text already spelled exactly as the target is left alone, so a target
    /// that is also listed as a source does not count again on every pass.
    #[inline]
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        text != self.to && self.contains(text)
    }
}

impl Default for IdentifierSet {
    fn default() -> Self {
        Self::new(DEFAULT_FROM, DEFAULT_TO)
    }
}

impl Display for IdentifierSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "From=[{}] To=[{}]", self.from.join(", "), self.to)
    }
}
