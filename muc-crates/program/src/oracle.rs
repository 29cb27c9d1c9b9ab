use log::debug;
use muc_core::containers::KeyedVec;
use muc_core::create_statistics_struct;
use muc_core::muc_assert_advanced;
use muc_core::statistics::should_log_statistics;
use muc_core::statistics::Statistic;
use muc_core::statistics::StatisticLogger;
use muc_core::termination::Indefinite;
use muc_core::termination::TerminationCondition;
use muc_core::AssumptionSet;
use muc_core::AtomId;
use muc_core::Literal;
use muc_core::LiteralLookup;
use muc_core::Oracle;
use muc_core::OracleError;
use muc_core::SolveOutcome;

use crate::ground::GroundProgram;

create_statistics_struct!(
    /// Counters of a [`ProgramOracle`], summed over all queries.
    ProgramOracleStatistics {
        /// The number of queries which were answered
        queries: u64,
        /// The number of values which were chosen during search
        decisions: u64,
        /// The number of values which were implied by a nogood
        propagations: u64,
        /// The number of times the search ran into a violated nogood
        conflicts: u64,
});

/// A partial assignment; fixed atoms always have their value.
type Assignment = KeyedVec<AtomId, Option<bool>>;

/// Decides a [`GroundProgram`] under assumptions.
///
/// Every query starts from the program itself, so queries do not influence each other. The choice
/// atoms are decided by a backtracking search with unit propagation over the nogoods; the
/// [`TerminationCondition`] is polled before every decision.
#[derive(Debug)]
pub struct ProgramOracle<T = Indefinite> {
    program: GroundProgram,
    termination: T,
    statistics: ProgramOracleStatistics,
}

impl ProgramOracle {
    pub fn new(program: GroundProgram) -> Self {
        ProgramOracle::with_termination(program, Indefinite)
    }
}

impl<T: TerminationCondition> ProgramOracle<T> {
    pub fn with_termination(program: GroundProgram, termination: T) -> Self {
        ProgramOracle {
            program,
            termination,
            statistics: ProgramOracleStatistics::default(),
        }
    }

    pub fn program(&self) -> &GroundProgram {
        &self.program
    }

    pub fn statistics(&self) -> &ProgramOracleStatistics {
        &self.statistics
    }

    pub fn log_statistics(&self) {
        if should_log_statistics() {
            self.statistics.log(StatisticLogger::new(["programOracle"]));
        }
    }

    fn initial_assignment(&self) -> Assignment {
        let mut assignment = KeyedVec::filled(self.program.num_atoms(), None);

        for atom in self.program.atoms() {
            assignment[atom] = self.program.status(atom).fixed_value();
        }

        assignment
    }

    /// The core for an assumption which contradicts the value its atom already has.
    fn conflicting_assumption_core(&self, literal: Literal) -> AssumptionSet {
        match self.program.status(literal.atom()).fixed_value() {
            Some(_) => [literal].into_iter().collect(),
            None => [literal, !literal].into_iter().collect(),
        }
    }

    /// Assigns the negation of the last open literal of a nogood until nothing changes. Returns
    /// false if a nogood is violated.
    fn propagate(&mut self, assignment: &mut Assignment) -> bool {
        loop {
            let mut has_changed = false;

            for nogood in self.program.nogoods() {
                let mut open_literal = None;
                let mut num_open_literals = 0;
                let mut is_satisfied = false;

                for &literal in nogood {
                    match assignment[literal.atom()] {
                        Some(value) if literal.is_satisfied_by(value) => {}
                        Some(_) => {
                            is_satisfied = true;
                            break;
                        }
                        None => {
                            num_open_literals += 1;
                            open_literal = Some(literal);
                        }
                    }
                }

                if is_satisfied {
                    continue;
                }

                match (num_open_literals, open_literal) {
                    (0, _) => return false,
                    (1, Some(literal)) => {
                        assignment[literal.atom()] = Some(literal.is_negative());
                        self.statistics.propagations += 1;
                        has_changed = true;
                    }
                    _ => {}
                }
            }

            if !has_changed {
                return true;
            }
        }
    }

    /// Extends `assignment` to a model of the program; returns false if there is none.
    fn search(&mut self, assignment: &mut Assignment) -> Result<bool, OracleError> {
        if !self.propagate(assignment) {
            self.statistics.conflicts += 1;
            return Ok(false);
        }

        // Atoms which occur in no nogood can take any value.
        let Some(atom) = self
            .program
            .atoms()
            .find(|&atom| self.program.is_constrained(atom) && assignment[atom].is_none())
        else {
            return Ok(true);
        };

        for value in [false, true] {
            if self.termination.should_stop() {
                return Err(OracleError::Interrupted);
            }
            self.termination.decision_has_been_made();
            self.statistics.decisions += 1;

            let mut branch = assignment.clone();
            branch[atom] = Some(value);

            if self.search(&mut branch)? {
                *assignment = branch;
                return Ok(true);
            }
        }

        Ok(false)
    }
}

impl<T: TerminationCondition> Oracle for ProgramOracle<T> {
    fn solve(&mut self, assumptions: &[Literal]) -> Result<SolveOutcome, OracleError> {
        self.statistics.queries += 1;

        if self.program.is_inconsistent() {
            return Ok(SolveOutcome::Unsatisfiable(AssumptionSet::new()));
        }

        let mut assignment = self.initial_assignment();
        for &literal in assumptions {
            match assignment[literal.atom()] {
                Some(value) if literal.is_satisfied_by(value) => {}
                Some(_) => {
                    let core = self.conflicting_assumption_core(literal);
                    debug!("Assumption {literal} contradicts the program");
                    return Ok(SolveOutcome::Unsatisfiable(core));
                }
                None => assignment[literal.atom()] = Some(literal.is_positive()),
            }
        }

        // Nogoods only mention choice atoms, so a nogood violated at this point consists of
        // assumptions only.
        let violated_nogood = self.program.nogoods().iter().find(|nogood| {
            nogood
                .iter()
                .all(|literal| assignment[literal.atom()] == Some(literal.is_positive()))
        });
        if let Some(nogood) = violated_nogood {
            return Ok(SolveOutcome::Unsatisfiable(nogood.iter().copied().collect()));
        }

        if !self.search(&mut assignment)? {
            let core = assumptions
                .iter()
                .copied()
                .filter(|literal| self.program.is_constrained(literal.atom()))
                .collect();
            return Ok(SolveOutcome::Unsatisfiable(core));
        }

        let model: Vec<Literal> = self
            .program
            .atoms()
            .map(|atom| Literal::new(atom, assignment[atom].unwrap_or(false)))
            .collect();
        muc_assert_advanced!(self.program.is_model(&model), "the witness is not a model");

        Ok(SolveOutcome::Satisfiable(Some(model)))
    }

    fn literal_lookup(&self) -> LiteralLookup {
        self.program.literal_lookup()
    }
}

#[cfg(test)]
mod tests {
    use muc_core::termination::DecisionBudget;
    use muc_core::AssumptionSet;
    use muc_core::Literal;
    use muc_core::Oracle;
    use muc_core::OracleError;
    use muc_core::SolveOutcome;
    use muc_core::Symbol;

    use super::ProgramOracle;
    use crate::ground::GroundProgram;
    use crate::parser::parse_program;

    fn oracle(source: &str) -> ProgramOracle {
        let program = parse_program(source).expect("valid program");
        ProgramOracle::new(GroundProgram::ground(&program))
    }

    fn literal(oracle: &ProgramOracle, name: &str, is_positive: bool) -> Literal {
        let atom = oracle
            .program()
            .atom(&Symbol::constant(name))
            .expect("the atom occurs in the program");
        Literal::new(atom, is_positive)
    }

    fn core(literals: &[Literal]) -> SolveOutcome {
        SolveOutcome::Unsatisfiable(literals.iter().copied().collect())
    }

    #[test]
    fn satisfiable_queries_report_a_model() {
        let mut oracle = oracle("f. { a; b; c }. :- a, b. :- not a, not c.");
        let b = literal(&oracle, "b", true);

        let SolveOutcome::Satisfiable(Some(model)) = oracle.solve(&[b]).expect("not interrupted")
        else {
            panic!("the query is satisfiable");
        };

        assert!(oracle.program().is_model(&model));
        assert!(model.contains(&b));
        assert!(model.contains(&literal(&oracle, "c", true)));
    }

    #[test]
    fn violated_nogoods_are_reported_as_core() {
        let mut oracle = oracle("{ a; b; c }. :- a, not b.");
        let a = literal(&oracle, "a", true);
        let not_b = literal(&oracle, "b", false);
        let c = literal(&oracle, "c", true);

        assert_eq!(oracle.solve(&[c, a, not_b]), Ok(core(&[a, not_b])));
    }

    #[test]
    fn assumptions_contradicting_fixed_atoms_are_reported_alone() {
        let mut oracle = oracle("f. { a }. :- u.");
        let a = literal(&oracle, "a", true);
        let not_f = literal(&oracle, "f", false);
        let u = literal(&oracle, "u", true);

        assert_eq!(oracle.solve(&[a, not_f]), Ok(core(&[not_f])));
        assert_eq!(oracle.solve(&[u, a]), Ok(core(&[u])));
    }

    #[test]
    fn complementary_assumptions_are_reported_together() {
        let mut oracle = oracle("{ a; b }.");
        let a = literal(&oracle, "a", true);
        let b = literal(&oracle, "b", true);

        assert_eq!(oracle.solve(&[a, b, !a]), Ok(core(&[a, !a])));
    }

    #[test]
    fn propagation_conflicts_report_the_constrained_assumptions() {
        let mut oracle = oracle("{ a; b; c }. :- a, b. :- a, not b.");
        let a = literal(&oracle, "a", true);
        let c = literal(&oracle, "c", true);

        assert_eq!(oracle.solve(&[a, c]), Ok(core(&[a])));
    }

    #[test]
    fn search_refutes_theories_without_models() {
        let mut oracle = oracle("{ a; b }. :- a, b. :- not a, b. :- a, not b. :- not a, not b.");

        assert_eq!(
            oracle.solve(&[]),
            Ok(SolveOutcome::Unsatisfiable(AssumptionSet::new()))
        );
        assert!(oracle.statistics().decisions > 0);
    }

    #[test]
    fn inconsistent_programs_report_an_empty_core() {
        let mut oracle = oracle("f. { a }. :- f.");
        let a = literal(&oracle, "a", true);

        assert_eq!(oracle.solve(&[a]), Ok(core(&[])));
        assert_eq!(oracle.solve(&[]), Ok(core(&[])));
    }

    #[test]
    fn empty_queries_on_consistent_programs_are_satisfiable() {
        let mut oracle = oracle("a. :- a, b.");

        assert!(oracle.solve(&[]).expect("not interrupted").is_satisfiable());
    }

    #[test]
    fn spent_termination_conditions_interrupt_the_search() {
        let program = parse_program("{ a; b }. :- a, b.").expect("valid program");
        let ground_program = GroundProgram::ground(&program);
        let mut oracle = ProgramOracle::with_termination(ground_program, DecisionBudget::new(0));

        assert_eq!(oracle.solve(&[]), Err(OracleError::Interrupted));
    }

    #[test]
    fn queries_are_independent() {
        let mut oracle = oracle("{ a; b }. :- a, b.");
        let a = literal(&oracle, "a", true);
        let b = literal(&oracle, "b", true);

        assert_eq!(oracle.solve(&[a, b]), Ok(core(&[a, b])));
        assert!(oracle.solve(&[a]).expect("not interrupted").is_satisfiable());
        assert!(oracle.solve(&[b]).expect("not interrupted").is_satisfiable());
        assert_eq!(oracle.statistics().queries, 3);
    }
}
