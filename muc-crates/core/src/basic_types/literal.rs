use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Not;

use super::AtomId;

/// An atom together with the polarity under which it is assumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    atom: AtomId,
    is_positive: bool,
}

impl Literal {
    pub const fn new(atom: AtomId, is_positive: bool) -> Self {
        Literal { atom, is_positive }
    }

    /// The literal assuming `atom` to be true.
    pub const fn positive(atom: AtomId) -> Self {
        Literal::new(atom, true)
    }

    /// The literal assuming `atom` to be false.
    pub const fn negative(atom: AtomId) -> Self {
        Literal::new(atom, false)
    }

    pub fn atom(&self) -> AtomId {
        self.atom
    }

    pub fn is_positive(&self) -> bool {
        self.is_positive
    }

    pub fn is_negative(&self) -> bool {
        !self.is_positive
    }

    /// Returns true if the literal holds when its atom takes `value`.
    pub fn is_satisfied_by(&self, value: bool) -> bool {
        self.is_positive == value
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        Literal::new(self.atom, !self.is_positive)
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_positive {
            write!(f, "{}", self.atom)
        } else {
            write!(f, "!{}", self.atom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Literal;
    use crate::basic_types::AtomId;

    #[test]
    fn negation_flips_only_the_polarity() {
        let literal = Literal::positive(AtomId::new(4));

        assert_eq!(!literal, Literal::negative(AtomId::new(4)));
        assert_eq!(!!literal, literal);
        assert!(literal.is_satisfied_by(true));
        assert!((!literal).is_satisfied_by(false));
        assert_eq!((!literal).to_string(), "!x4");
    }
}
