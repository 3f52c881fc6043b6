//! Enumerations declared at run time
//!
//! Provides [`EnumDef`] for closed sets of named symbols and [`Symbol`] for
//! a single member of one.

use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ptr;

/// A closed enumeration of symbol names
///
/// Definitions are declared as `static` items so symbols can refer back to
/// them for their lifetime.
///
/// # Examples
/// ```
/// # use scav_graph::EnumDef;
/// static SIDE: EnumDef = EnumDef::new("Side", &["Savage", "Usec", "Bear"]);
///
/// let usec = SIDE.parse("usec").unwrap();
/// assert_eq!(usec.name(), "Usec");
/// assert!(SIDE.parse("raider").is_none());
/// ```
#[derive(Debug)]
pub struct EnumDef {
    name: &'static str,
    symbols: &'static [&'static str],
}

impl EnumDef {
    /// Declare an enumeration
    #[inline]
    #[must_use]
    pub const fn new(name: &'static str, symbols: &'static [&'static str]) -> Self {
        Self { name, symbols }
    }

    /// Enumeration name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared symbol names, in declaration order
    #[inline]
    #[must_use]
    pub fn symbols(&self) -> &'static [&'static str] {
        self.symbols
    }

    /// Parse a symbol name, ignoring case
    ///
    /// The returned symbol carries the declared spelling.
    #[must_use]
    pub fn parse(&'static self, text: &str) -> Option<Symbol> {
        self.symbols
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(text))
            .map(|index| Symbol { def: self, index })
    }

    /// Symbol at declaration index
    #[must_use]
    pub fn symbol(&'static self, index: usize) -> Option<Symbol> {
        (index < self.symbols.len()).then_some(Symbol { def: self, index })
    }
}

impl PartialEq for EnumDef {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other)
    }
}

impl Eq for EnumDef {}

/// One member of an [`EnumDef`]
#[derive(Clone, Copy)]
pub struct Symbol {
    def: &'static EnumDef,
    index: usize,
}

impl Symbol {
    /// Declared symbol name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.def.symbols[self.index]
    }

    /// Owning enumeration
    #[inline]
    #[must_use]
    pub fn def(&self) -> &'static EnumDef {
        self.def
    }

    /// Declaration index
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check membership in an enumeration
    #[inline]
    #[must_use]
    pub fn is_of(&self, def: &EnumDef) -> bool {
        ptr::eq(self.def, def)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.def, other.def) && self.index == other.index
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ptr::hash(self.def, state);
        self.index.hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.def.name, self.name())
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
