use std::fmt::Display;
use std::fmt::Formatter;

use log::debug;
use muc_core::containers::HashSet;
use muc_core::AssumptionSet;
use muc_core::Symbol;

use crate::ast::AtomPattern;
use crate::ast::Program;
use crate::ast::Statement;
use crate::ground::GroundProgram;
use crate::signature::Signature;

/// Turns facts into assumptions.
///
/// Every fact whose atom matches one of the signatures is rewritten into a choice, and each of its
/// instances is assumed to be true. Without signatures, every fact is rewritten.
#[derive(Clone, Debug, Default)]
pub struct AssumptionTransformer {
    signatures: Vec<Signature>,
}

/// A program in which the selected facts have become choices, together with the atoms which are
/// assumed in their place.
#[derive(Clone, Debug)]
pub struct TransformedProgram {
    program: Program,
    assumptions: Vec<Symbol>,
}

impl AssumptionTransformer {
    pub fn new(signatures: impl IntoIterator<Item = Signature>) -> Self {
        AssumptionTransformer {
            signatures: signatures.into_iter().collect(),
        }
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    fn selects(&self, atom: &AtomPattern) -> bool {
        self.signatures.is_empty()
            || self
                .signatures
                .iter()
                .any(|signature| signature.matches(&atom.name, atom.arity()))
    }

    pub fn transform(&self, program: &Program) -> TransformedProgram {
        let mut seen: HashSet<Symbol> = HashSet::default();
        let mut assumptions = vec![];

        let statements = program
            .statements
            .iter()
            .map(|statement| match statement {
                Statement::Fact(atom) if self.selects(atom) => {
                    for symbol in atom.instances() {
                        if seen.insert(symbol.clone()) {
                            assumptions.push(symbol);
                        }
                    }

                    Statement::Choice(vec![atom.clone()])
                }
                statement => statement.clone(),
            })
            .collect();

        debug!("Assuming {} atoms which were facts", assumptions.len());

        TransformedProgram {
            program: Program { statements },
            assumptions,
        }
    }

    /// Replaces the facts which would be turned into assumptions by the given facts, e.g. the
    /// atoms of a MUC. The other statements keep their order; the new facts are appended.
    pub fn replace_assumed_facts(&self, program: &Program, facts: &[Symbol]) -> Program {
        let statements = program
            .statements
            .iter()
            .filter(|statement| !matches!(statement, Statement::Fact(atom) if self.selects(atom)))
            .cloned()
            .chain(facts.iter().map(|fact| Statement::Fact(AtomPattern::from(fact))))
            .collect();

        Program { statements }
    }
}

impl TransformedProgram {
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// The assumed atoms, in the order in which they appear in the program.
    pub fn assumption_symbols(&self) -> &[Symbol] {
        &self.assumptions
    }

    /// Grounds the rewritten program and resolves the assumed atoms to positive literals.
    pub fn ground(&self) -> (GroundProgram, AssumptionSet) {
        let ground_program = GroundProgram::ground(&self.program);
        let assumptions = ground_program.positive_literals(&self.assumptions);

        (ground_program, assumptions)
    }
}

impl Display for TransformedProgram {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)
    }
}

#[cfg(test)]
mod tests {
    use muc_core::AtomId;
    use muc_core::Literal;
    use muc_core::Symbol;
    use muc_core::Term;

    use super::AssumptionTransformer;
    use crate::ground::AtomStatus;
    use crate::parser::parse_program;
    use crate::signature::Signature;

    const PROGRAM: &str = "a(1..2).\nb(1).\nc.\n{ a(3) }.\n:- a(1), b(1).\n";

    #[test]
    fn matching_facts_become_choices() {
        let program = parse_program(PROGRAM).expect("valid program");
        let transformer = AssumptionTransformer::new([Signature::new("a", 1)]);

        let transformed = transformer.transform(&program);

        assert_eq!(
            transformed.to_string(),
            "{ a(1..2) }.\nb(1).\nc.\n{ a(3) }.\n:- a(1), b(1).\n"
        );
        let symbols = transformed
            .assumption_symbols()
            .iter()
            .map(|symbol| symbol.to_string())
            .collect::<Vec<_>>();
        assert_eq!(symbols, vec!["a(1)", "a(2)"]);
    }

    #[test]
    fn without_signatures_every_fact_becomes_a_choice() {
        let program = parse_program(PROGRAM).expect("valid program");

        let transformed = AssumptionTransformer::default().transform(&program);

        assert_eq!(
            transformed.to_string(),
            "{ a(1..2) }.\n{ b(1) }.\n{ c }.\n{ a(3) }.\n:- a(1), b(1).\n"
        );
        assert_eq!(transformed.assumption_symbols().len(), 4);
    }

    #[test]
    fn assumptions_resolve_to_choice_atoms() {
        let program = parse_program("a(1..3). a(2). b. :- a(1), b.").expect("valid program");
        let transformer = AssumptionTransformer::new([Signature::new("a", 1)]);

        let (ground_program, assumptions) = transformer.transform(&program).ground();

        assert_eq!(assumptions.len(), 3);
        assert!(assumptions.contains(&Literal::positive(AtomId::new(0))));
        assert_eq!(ground_program.status(AtomId::new(0)), AtomStatus::Choice);
        assert_eq!(ground_program.nogoods().len(), 1);
    }

    #[test]
    fn assumed_facts_are_replaced() {
        let program = parse_program("a(1..3). b. :- a(1), b. :- a(2).").expect("valid program");
        let transformer = AssumptionTransformer::new([Signature::new("a", 1)]);

        let replaced = transformer.replace_assumed_facts(&program, &[Symbol::new(
            "a",
            vec![Term::Number(1)],
        )]);

        assert_eq!(
            replaced.to_string(),
            "b.\n:- a(1), b.\n:- a(2).\na(1).\n"
        );
        assert_eq!(replaced.constraints().count(), 2);
    }

    #[test]
    fn signatures_with_other_arities_do_not_match() {
        let program = parse_program("a. a(1).").expect("valid program");
        let transformer = AssumptionTransformer::new([Signature::new("a", 0)]);

        let transformed = transformer.transform(&program);

        assert_eq!(transformed.to_string(), "{ a }.\na(1).\n");
    }
}
