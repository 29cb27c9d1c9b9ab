use std::fmt::Display;
use std::fmt::Formatter;

use itertools::Itertools;

use crate::containers::StorageKey;

/// An opaque handle for an atom of the background theory.
///
/// Handles are handed out by an [`Oracle`](crate::oracle::Oracle); the minimiser never looks
/// inside them, it only compares and hashes them. The symbolic identity of an atom is available
/// through the [`LiteralLookup`](crate::oracle::LiteralLookup) of the oracle which created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomId {
    pub id: u32,
}

impl AtomId {
    pub const fn new(id: u32) -> Self {
        AtomId { id }
    }
}

impl StorageKey for AtomId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        AtomId { id: index as u32 }
    }
}

impl Display for AtomId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}

/// An argument of a [`Symbol`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    Number(i64),
    /// A lowercase identifier, e.g. `red` in `colour(red)`.
    Constant(String),
    /// A quoted string; stored without the surrounding quotes.
    String(String),
    Function(Symbol),
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Number(number) => write!(f, "{number}"),
            Term::Constant(constant) => write!(f, "{constant}"),
            Term::String(string) => write!(f, "\"{string}\""),
            Term::Function(symbol) => write!(f, "{symbol}"),
        }
    }
}

/// The symbolic identity of an atom, e.g. `a(1)` or `edge(x, f(2))`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    name: String,
    arguments: Vec<Term>,
}

impl Symbol {
    pub fn new(name: impl Into<String>, arguments: Vec<Term>) -> Self {
        Symbol {
            name: name.into(),
            arguments,
        }
    }

    /// A symbol without arguments.
    pub fn constant(name: impl Into<String>) -> Self {
        Symbol::new(name, vec![])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &[Term] {
        &self.arguments
    }

    pub fn arity(&self) -> usize {
        self.arguments.len()
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.arguments.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}({})", self.name, self.arguments.iter().join(","))
        }
    }
}
