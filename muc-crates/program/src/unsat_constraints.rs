use log::debug;
use muc_core::containers::KeyedVec;
use muc_core::create_statistics_struct;
use muc_core::statistics::should_log_statistics;
use muc_core::statistics::Statistic;
use muc_core::statistics::StatisticLogger;
use muc_core::termination::Indefinite;
use muc_core::termination::TerminationCondition;
use muc_core::AtomId;
use muc_core::OracleError;

use crate::ast::Constraint;
use crate::ast::Program;
use crate::ground::GroundProgram;

create_statistics_struct!(
    /// Counters of an [`UnsatConstraintComputer`].
    UnsatConstraintStatistics {
        /// The number of values which were chosen during search
        decisions: u64,
        /// The number of times an assignment violating fewer constraints was found
        improvements: u64,
});

type Assignment = KeyedVec<AtomId, Option<bool>>;

/// Finds the constraints which are responsible for a program being unsatisfiable.
///
/// The choice atoms are assigned such that as few constraints as possible are violated; the
/// violated constraints of such an assignment are reported. Run on a program whose assumed facts
/// are replaced by a MUC, this points to the constraints which the MUC violates.
#[derive(Debug)]
pub struct UnsatConstraintComputer<'program, T = Indefinite> {
    program: &'program Program,
    termination: T,
    statistics: UnsatConstraintStatistics,
}

impl<'program> UnsatConstraintComputer<'program> {
    pub fn new(program: &'program Program) -> Self {
        UnsatConstraintComputer::with_termination(program, Indefinite)
    }
}

impl<'program, T: TerminationCondition> UnsatConstraintComputer<'program, T> {
    pub fn with_termination(program: &'program Program, termination: T) -> Self {
        UnsatConstraintComputer {
            program,
            termination,
            statistics: UnsatConstraintStatistics::default(),
        }
    }

    pub fn statistics(&self) -> &UnsatConstraintStatistics {
        &self.statistics
    }

    pub fn log_statistics(&self) {
        if should_log_statistics() {
            self.statistics
                .log(StatisticLogger::new(["unsatConstraints"]));
        }
    }

    /// The violated constraints of an assignment violating as few constraints as possible, in
    /// source order. Empty if the program is satisfiable.
    pub fn compute(&mut self) -> Result<Vec<Constraint>, OracleError> {
        let ground_program = GroundProgram::ground(self.program);

        let mut assignment = KeyedVec::filled(ground_program.num_atoms(), None);
        for atom in ground_program.atoms() {
            assignment[atom] = ground_program.status(atom).fixed_value();
        }
        let open_atoms = ground_program
            .atoms()
            .filter(|&atom| ground_program.is_constrained(atom))
            .collect::<Vec<_>>();

        let mut best = None;
        self.branch(&ground_program, &open_atoms, &mut assignment, &mut best)?;

        let mut indices = ground_program.violated_constraints().to_vec();
        if let Some((_, violated_nogoods)) = best {
            indices.extend(
                violated_nogoods
                    .into_iter()
                    .map(|nogood_index| ground_program.constraint_of_nogood(nogood_index)),
            );
        }
        indices.sort_unstable();
        indices.dedup();

        debug!("{} constraints are violated", indices.len());

        Ok(self
            .program
            .constraints()
            .enumerate()
            .filter(|(index, _)| indices.binary_search(index).is_ok())
            .map(|(_, constraint)| constraint.clone())
            .collect())
    }

    /// Branch and bound over `open_atoms`. `best` holds the fewest violated nogoods found so far,
    /// as their number and indices.
    fn branch(
        &mut self,
        ground_program: &GroundProgram,
        open_atoms: &[AtomId],
        assignment: &mut Assignment,
        best: &mut Option<(usize, Vec<usize>)>,
    ) -> Result<(), OracleError> {
        let violated = violated_nogoods(ground_program, assignment);

        // Assigning more atoms never repairs a violated nogood.
        if best
            .as_ref()
            .is_some_and(|(num_violated, _)| violated.len() >= *num_violated)
        {
            return Ok(());
        }

        let Some((&atom, remaining)) = open_atoms.split_first() else {
            debug!("Found an assignment violating {} nogoods", violated.len());
            self.statistics.improvements += 1;
            *best = Some((violated.len(), violated));
            return Ok(());
        };

        for value in [false, true] {
            if self.termination.should_stop() {
                return Err(OracleError::Interrupted);
            }
            self.termination.decision_has_been_made();
            self.statistics.decisions += 1;

            assignment[atom] = Some(value);
            self.branch(ground_program, remaining, assignment, best)?;

            if best
                .as_ref()
                .is_some_and(|(num_violated, _)| *num_violated == 0)
            {
                break;
            }
        }
        assignment[atom] = None;

        Ok(())
    }
}

/// The indices of the nogoods whose literals are all true under `assignment`.
fn violated_nogoods(ground_program: &GroundProgram, assignment: &Assignment) -> Vec<usize> {
    ground_program
        .nogoods()
        .iter()
        .enumerate()
        .filter(|(_, nogood)| {
            nogood.iter().all(|literal| {
                assignment[literal.atom()].is_some_and(|value| literal.is_satisfied_by(value))
            })
        })
        .map(|(index, _)| index)
        .collect()
}
