use crate::basic_types::AtomId;
use crate::basic_types::Literal;
use crate::basic_types::Symbol;
use crate::containers::HashMap;

/// Maps the atoms of an [`Oracle`](super::Oracle) to their symbolic identity.
///
/// The lookup is immutable once built and is only consulted to render literals; atoms which are
/// not present are rendered through their [`AtomId`].
#[derive(Clone, Debug, Default)]
pub struct LiteralLookup {
    symbols: HashMap<AtomId, Symbol>,
}

impl LiteralLookup {
    pub fn symbol(&self, atom: AtomId) -> Option<&Symbol> {
        self.symbols.get(&atom)
    }

    /// Renders `literal` in program syntax: `a(1)` for a positive and `not a(1)` for a negative
    /// literal.
    pub fn render(&self, literal: Literal) -> String {
        let atom = match self.symbol(literal.atom()) {
            Some(symbol) => symbol.to_string(),
            None => literal.atom().to_string(),
        };

        if literal.is_positive() {
            atom
        } else {
            format!("not {atom}")
        }
    }
}

impl FromIterator<(AtomId, Symbol)> for LiteralLookup {
    fn from_iter<T: IntoIterator<Item = (AtomId, Symbol)>>(iter: T) -> Self {
        LiteralLookup {
            symbols: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LiteralLookup;
    use crate::basic_types::AtomId;
    use crate::basic_types::Literal;
    use crate::basic_types::Symbol;
    use crate::basic_types::Term;

    #[test]
    fn literals_are_rendered_with_their_symbol() {
        let lookup: LiteralLookup = [(AtomId::new(0), Symbol::new("a", vec![Term::Number(1)]))]
            .into_iter()
            .collect();

        assert_eq!(lookup.render(Literal::positive(AtomId::new(0))), "a(1)");
        assert_eq!(lookup.render(Literal::negative(AtomId::new(0))), "not a(1)");
    }

    #[test]
    fn unknown_atoms_fall_back_to_their_handle() {
        let lookup = LiteralLookup::default();

        assert_eq!(lookup.render(Literal::positive(AtomId::new(7))), "x7");
        assert_eq!(lookup.render(Literal::negative(AtomId::new(7))), "not x7");
    }
}
