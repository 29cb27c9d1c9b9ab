//! Turns a [`Program`] into a propositional theory over [`AtomId`]s.
//!
//! Every atom is either a fact, a choice or undefined. Facts are true and undefined atoms (atoms
//! which only occur in constraint bodies) are false in every model, so constraints are simplified
//! against them. What remains is a set of nogoods over choice atoms: conjunctions of literals which
//! may not hold together.

use log::debug;
use log::warn;
use muc_core::containers::HashMap;
use muc_core::containers::HashSet;
use muc_core::containers::KeyedVec;
use muc_core::AssumptionSet;
use muc_core::AtomId;
use muc_core::Literal;
use muc_core::LiteralLookup;
use muc_core::Symbol;

use crate::ast::Program;
use crate::ast::Statement;

/// How the value of an atom is determined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AtomStatus {
    /// The atom is true in every model.
    Fact,
    /// The atom may be true or false.
    Choice,
    /// The atom is not derived by any statement and is false in every model.
    Undefined,
}

impl AtomStatus {
    /// The value of the atom, if it does not depend on the model.
    pub fn fixed_value(self) -> Option<bool> {
        match self {
            AtomStatus::Fact => Some(true),
            AtomStatus::Choice => None,
            AtomStatus::Undefined => Some(false),
        }
    }
}

/// A propositional theory: atoms with a status and nogoods over the choice atoms.
#[derive(Clone, Debug, Default)]
pub struct GroundProgram {
    symbols: KeyedVec<AtomId, Symbol>,
    statuses: KeyedVec<AtomId, AtomStatus>,
    atom_ids: HashMap<Symbol, AtomId>,
    nogoods: Vec<Vec<Literal>>,
    /// For every nogood, the index of the constraint it was derived from.
    nogood_constraints: Vec<usize>,
    /// The indices of the constraints which are violated whatever the choices.
    violated_constraints: Vec<usize>,
    /// Whether the atom occurs in at least one nogood.
    constrained: KeyedVec<AtomId, bool>,
    is_inconsistent: bool,
}

impl GroundProgram {
    /// Expands the intervals of `program`, interns its atoms in order of first occurrence and
    /// simplifies its constraints.
    pub fn ground(program: &Program) -> GroundProgram {
        let mut ground_program = GroundProgram::default();

        for statement in &program.statements {
            match statement {
                Statement::Fact(atom) => {
                    for symbol in atom.instances() {
                        let atom = ground_program.intern(symbol, AtomStatus::Fact);
                        ground_program.statuses[atom] = AtomStatus::Fact;
                    }
                }
                Statement::Choice(atoms) => {
                    for symbol in atoms.iter().flat_map(|atom| atom.instances()) {
                        let atom = ground_program.intern(symbol, AtomStatus::Choice);
                        if ground_program.statuses[atom] == AtomStatus::Undefined {
                            ground_program.statuses[atom] = AtomStatus::Choice;
                        }
                    }
                }
                Statement::Constraint(constraint) => {
                    for literal in &constraint.body {
                        let _ = ground_program.intern(literal.atom.clone(), AtomStatus::Undefined);
                    }
                }
            }
        }

        // Statuses are only final once every statement has been seen.
        for (index, constraint) in program.constraints().enumerate() {
            let body = constraint
                .body
                .iter()
                .map(|literal| {
                    let atom = ground_program.atom_ids[&literal.atom];
                    Literal::new(atom, literal.is_positive)
                })
                .collect::<Vec<_>>();
            ground_program.add_constraint(index, &body);
        }

        debug!(
            "Grounded {} atoms into {} nogoods",
            ground_program.num_atoms(),
            ground_program.nogoods.len()
        );

        if ground_program.is_inconsistent {
            warn!("The program is inconsistent without any assumptions");
        }

        ground_program
    }

    fn intern(&mut self, symbol: Symbol, status: AtomStatus) -> AtomId {
        if let Some(&atom) = self.atom_ids.get(&symbol) {
            return atom;
        }

        let atom = self.symbols.push(symbol.clone());
        let _ = self.statuses.push(status);
        let _ = self.constrained.push(false);
        let _ = self.atom_ids.insert(symbol, atom);

        atom
    }

    /// Simplifies `body` against the fixed atoms; a body which can never hold is dropped and a body
    /// which always holds makes the program inconsistent.
    fn add_constraint(&mut self, index: usize, body: &[Literal]) {
        let mut nogood: Vec<Literal> = vec![];

        for &literal in body {
            match self.statuses[literal.atom()].fixed_value() {
                Some(value) if literal.is_satisfied_by(value) => continue,
                Some(_) => return,
                None => {}
            }

            if nogood.contains(&!literal) {
                return;
            }
            if !nogood.contains(&literal) {
                nogood.push(literal);
            }
        }

        if nogood.is_empty() {
            self.is_inconsistent = true;
            self.violated_constraints.push(index);
            return;
        }

        for literal in &nogood {
            self.constrained[literal.atom()] = true;
        }
        self.nogoods.push(nogood);
        self.nogood_constraints.push(index);
    }

    pub fn num_atoms(&self) -> usize {
        self.symbols.len()
    }

    pub fn atoms(&self) -> impl Iterator<Item = AtomId> + '_ {
        self.symbols.keys()
    }

    pub fn atom(&self, symbol: &Symbol) -> Option<AtomId> {
        self.atom_ids.get(symbol).copied()
    }

    pub fn symbol(&self, atom: AtomId) -> &Symbol {
        &self.symbols[atom]
    }

    pub fn status(&self, atom: AtomId) -> AtomStatus {
        self.statuses[atom]
    }

    /// The simplified constraints; every literal is over a choice atom.
    pub fn nogoods(&self) -> &[Vec<Literal>] {
        &self.nogoods
    }

    /// The index, among the constraints of the program, of the constraint from which the nogood at
    /// `nogood_index` was derived.
    pub fn constraint_of_nogood(&self, nogood_index: usize) -> usize {
        self.nogood_constraints[nogood_index]
    }

    /// The indices of the constraints whose body holds in every model; empty unless the program is
    /// inconsistent.
    pub fn violated_constraints(&self) -> &[usize] {
        &self.violated_constraints
    }

    /// Whether the atom occurs in at least one nogood.
    pub fn is_constrained(&self, atom: AtomId) -> bool {
        self.constrained[atom]
    }

    /// True if some constraint is violated whatever the values of the choice atoms.
    pub fn is_inconsistent(&self) -> bool {
        self.is_inconsistent
    }

    /// Positive literals for the atoms of `symbols`; symbols which do not occur in the program are
    /// skipped.
    pub fn positive_literals<'a>(
        &self,
        symbols: impl IntoIterator<Item = &'a Symbol>,
    ) -> AssumptionSet {
        symbols
            .into_iter()
            .filter_map(|symbol| self.atom(symbol))
            .map(Literal::positive)
            .collect()
    }

    pub fn literal_lookup(&self) -> LiteralLookup {
        self.symbols
            .key_values()
            .map(|(atom, symbol)| (atom, symbol.clone()))
            .collect()
    }

    /// Checks whether `model`, which assigns a value to every atom, respects the fixed atoms and
    /// violates no nogood.
    pub fn is_model(&self, model: &[Literal]) -> bool {
        let true_literals: HashSet<Literal> = model.iter().copied().collect();

        !self.is_inconsistent
            && model.len() == self.num_atoms()
            && self.atoms().all(|atom| {
                let assigned_true = true_literals.contains(&Literal::positive(atom));
                let assigned_false = true_literals.contains(&Literal::negative(atom));

                match self.status(atom).fixed_value() {
                    Some(value) => (assigned_true == value) && (assigned_false != value),
                    None => assigned_true != assigned_false,
                }
            })
            && self
                .nogoods
                .iter()
                .all(|nogood| !nogood.iter().all(|literal| true_literals.contains(literal)))
    }
}
