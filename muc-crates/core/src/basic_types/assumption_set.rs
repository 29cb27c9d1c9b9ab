use std::fmt::Display;
use std::fmt::Formatter;

use itertools::Itertools;

use super::Literal;
use crate::containers::HashSet;

/// A set of [`Literal`]s which are hypothesised for a single solving attempt.
///
/// The set contains every atom-polarity pair at most once. It has no meaningful order; iteration
/// follows the (deterministic) hasher of [`HashSet`].
///
/// Both polarities of the same atom may be present, in which case the set is unsatisfiable
/// regardless of the background theory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssumptionSet {
    literals: HashSet<Literal>,
}

impl AssumptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Adds `literal` to the set; returns whether it was not present before.
    pub fn insert(&mut self, literal: Literal) -> bool {
        self.literals.insert(literal)
    }

    /// Removes `literal` from the set; returns whether it was present.
    pub fn remove(&mut self, literal: &Literal) -> bool {
        self.literals.remove(literal)
    }

    pub fn contains(&self, literal: &Literal) -> bool {
        self.literals.contains(literal)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> + '_ {
        self.literals.iter()
    }

    pub fn is_subset(&self, other: &AssumptionSet) -> bool {
        self.literals.is_subset(&other.literals)
    }

    pub fn union(&self, other: &AssumptionSet) -> AssumptionSet {
        self.literals.union(&other.literals).copied().collect()
    }

    pub fn intersection(&self, other: &AssumptionSet) -> AssumptionSet {
        self.literals.intersection(&other.literals).copied().collect()
    }

    /// Returns a copy of the set from which `literal` is removed.
    pub fn without(&self, literal: &Literal) -> AssumptionSet {
        self.literals
            .iter()
            .filter(|&other| other != literal)
            .copied()
            .collect()
    }

    /// Returns a literal whose complement is also in the set, if there is one.
    pub fn find_complementary_literal(&self) -> Option<Literal> {
        self.literals
            .iter()
            .find(|&&literal| self.literals.contains(&!literal))
            .copied()
    }

    /// The literals of the set as a vector, e.g. to pass them to an oracle.
    pub fn to_vec(&self) -> Vec<Literal> {
        self.literals.iter().copied().collect()
    }
}

impl FromIterator<Literal> for AssumptionSet {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        AssumptionSet {
            literals: iter.into_iter().collect(),
        }
    }
}

impl Extend<Literal> for AssumptionSet {
    fn extend<T: IntoIterator<Item = Literal>>(&mut self, iter: T) {
        self.literals.extend(iter)
    }
}

impl IntoIterator for AssumptionSet {
    type Item = Literal;
    type IntoIter = std::collections::hash_set::IntoIter<Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.into_iter()
    }
}

impl<'a> IntoIterator for &'a AssumptionSet {
    type Item = &'a Literal;
    type IntoIter = std::collections::hash_set::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

impl Display for AssumptionSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.literals.iter().sorted().join(", "))
    }
}
