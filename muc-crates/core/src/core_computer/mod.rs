//! Shrinks an unsatisfiable set of assumptions to a minimal unsatisfiable subset (MUC).
//!
//! A [`CoreComputer`] is bound to one [`Oracle`] and one [`AssumptionSet`]. It first decides the
//! complete set of assumptions; if these are unsatisfiable, the core reported by the oracle seeds a
//! deletion-based minimisation. Every literal of the candidate set is tentatively removed and the
//! remainder is queried again:
//! - if the remainder is still unsatisfiable, the literal is not needed and is discarded for good;
//! - otherwise the literal is necessary and is kept.
//!
//! The necessary literals together with the candidates which have not been tried yet are
//! unsatisfiable at every point, and every necessary literal was satisfiable to remove from a
//! superset of the final result. By monotonicity, the result is thus unsatisfiable and removing any
//! single literal from it makes it satisfiable.
//!
//! The approach is based on \[1\].
//!
//! # Bibliography
//! \[1\] J. Marques-Silva, "Minimal unsatisfiability: Models, algorithms and applications," in
//! 2010 40th IEEE International Symposium on Multiple-Valued Logic, 2010, pp. 9–16.

mod core_computer_error;
mod explanation;
mod minimisation_options;

use std::fmt::Debug;
use std::fmt::Formatter;

pub use core_computer_error::CoreComputerError;
pub use explanation::Explanation;
use log::debug;
use log::info;
use log::warn;
pub use minimisation_options::MinimisationOptions;

use crate::basic_types::AssumptionSet;
use crate::basic_types::Literal;
use crate::create_statistics_struct;
use crate::muc_assert_moderate;
use crate::muc_assert_simple;
use crate::oracle::LiteralLookup;
use crate::oracle::Oracle;
use crate::oracle::SolveOutcome;
use crate::statistics::should_log_statistics;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

create_statistics_struct!(
    /// Counters of a single [`CoreComputer`].
    CoreComputerStatistics {
        /// The number of queries made to the oracle, including the top-level query
        oracle_calls: u64,
        /// The number of literals which were removed after a single unsatisfiable query
        discarded_literals: u64,
        /// The number of candidates which were dropped because they were absent from a reported core
        literals_removed_by_cores: u64,
        /// The number of literals in the computed explanation
        necessary_literals: u64,
        /// The number of times the necessary literals alone turned out to be unsatisfiable
        early_stops: u64,
});

/// Computes a single minimal unsatisfiable subset of a set of assumptions.
///
/// The computation is performed at most once per instance, through either
/// [`CoreComputer::explain`] or [`CoreComputer::shrink`].
///
/// # Example
/// ```rust
/// # use muc_core::AssumptionSet;
/// # use muc_core::AtomId;
/// # use muc_core::CoreComputer;
/// # use muc_core::Explanation;
/// # use muc_core::Literal;
/// # use muc_core::Oracle;
/// # use muc_core::OracleError;
/// # use muc_core::SolveOutcome;
/// // An oracle for a theory which forbids `x0` and `x1` from being true together.
/// struct AtMostOne;
///
/// impl Oracle for AtMostOne {
///     fn solve(&mut self, assumptions: &[Literal]) -> Result<SolveOutcome, OracleError> {
///         let conflict: AssumptionSet = assumptions
///             .iter()
///             .copied()
///             .filter(|literal| literal.is_positive() && literal.atom().id < 2)
///             .collect();
///
///         if conflict.len() == 2 {
///             Ok(SolveOutcome::Unsatisfiable(conflict))
///         } else {
///             Ok(SolveOutcome::Satisfiable(None))
///         }
///     }
/// }
///
/// let assumptions: AssumptionSet = (0..4)
///     .map(|id| Literal::positive(AtomId::new(id)))
///     .collect();
///
/// let mut oracle = AtMostOne;
/// let mut core_computer = CoreComputer::new(&mut oracle, assumptions);
/// let explanation = core_computer.explain().expect("the oracle is never interrupted");
///
/// let expected: AssumptionSet = (0..2)
///     .map(|id| Literal::positive(AtomId::new(id)))
///     .collect();
/// assert_eq!(explanation, &Explanation::Explained(expected));
/// ```
pub struct CoreComputer<'oracle, O: ?Sized> {
    oracle: &'oracle mut O,
    assumptions: AssumptionSet,
    literal_lookup: LiteralLookup,
    explanation: Explanation,
    options: MinimisationOptions,
    statistics: CoreComputerStatistics,
}

impl<O: ?Sized> Debug for CoreComputer<'_, O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreComputer")
            .field("oracle", &"<Oracle>")
            .field("assumptions", &self.assumptions)
            .field("literal_lookup", &self.literal_lookup)
            .field("explanation", &self.explanation)
            .field("options", &self.options)
            .field("statistics", &self.statistics)
            .finish()
    }
}

impl<'oracle, O: Oracle + ?Sized> CoreComputer<'oracle, O> {
    pub fn new(oracle: &'oracle mut O, assumptions: AssumptionSet) -> Self {
        CoreComputer::with_options(oracle, assumptions, MinimisationOptions::default())
    }

    pub fn with_options(
        oracle: &'oracle mut O,
        assumptions: AssumptionSet,
        options: MinimisationOptions,
    ) -> Self {
        let literal_lookup = oracle.literal_lookup();

        CoreComputer {
            oracle,
            assumptions,
            literal_lookup,
            explanation: Explanation::NotYetRun,
            options,
            statistics: CoreComputerStatistics::default(),
        }
    }

    /// Decides the complete set of assumptions and, if it is unsatisfiable, shrinks the reported
    /// core to a minimal unsatisfiable subset.
    ///
    /// If the oracle is interrupted, the error is returned and the explanation stays
    /// [`Explanation::NotYetRun`].
    pub fn explain(&mut self) -> Result<&Explanation, CoreComputerError> {
        self.ensure_not_finalised()?;

        let assumptions = self.assumptions.clone();
        match self.solve_subset(&assumptions)? {
            SolveOutcome::Satisfiable(_) => {
                info!(
                    "The {} assumptions are satisfiable, no explanation is needed",
                    assumptions.len()
                );
                self.explanation = Explanation::NoExplanationNeeded;
                self.log_statistics();
            }
            SolveOutcome::Unsatisfiable(core) if core.is_empty() => {
                warn!("The background theory is inconsistent without any assumptions");
                self.explanation = Explanation::Explained(core);
                self.log_statistics();
            }
            SolveOutcome::Unsatisfiable(core) => {
                let _ = self.shrink(core)?;
            }
        }

        Ok(&self.explanation)
    }

    /// Shrinks `core`, an unsatisfiable subset of the assumptions, to a minimal unsatisfiable
    /// subset and stores it as the explanation.
    pub fn shrink(&mut self, core: AssumptionSet) -> Result<&Explanation, CoreComputerError> {
        self.ensure_not_finalised()?;
        muc_assert_moderate!(
            core.is_subset(&self.assumptions),
            "the core {core} is not a subset of the assumptions {}",
            self.assumptions
        );

        let muc = self.minimise(&core)?;
        info!(
            "Shrunk a core of {} literals to a minimal core of {} literals",
            core.len(),
            muc.len()
        );

        self.explanation = Explanation::Explained(muc);
        self.log_statistics();

        Ok(&self.explanation)
    }

    /// Computes a minimal unsatisfiable subset of `candidate` by deletion, without storing it.
    ///
    /// `candidate` should be unsatisfiable; with the default [`MinimisationOptions`] at most
    /// `candidate.len()` queries are made.
    pub fn minimise(
        &mut self,
        candidate: &AssumptionSet,
    ) -> Result<AssumptionSet, CoreComputerError> {
        if candidate.is_empty() {
            return Err(CoreComputerError::EmptyCandidate);
        }

        let mut working = candidate.clone();
        let mut necessary = AssumptionSet::new();
        let mut necessary_has_grown = false;

        loop {
            let next = working.iter().next().copied();
            let Some(literal) = next else {
                break;
            };

            if self.options.check_necessary_early && necessary_has_grown {
                necessary_has_grown = false;

                if !self.solve_subset(&necessary)?.is_satisfiable() {
                    debug!(
                        "The necessary literals alone are unsatisfiable, dropping {} candidates",
                        working.len()
                    );
                    self.statistics.early_stops += 1;
                    break;
                }
            }

            let _ = working.remove(&literal);

            match self.solve_subset(&necessary.union(&working))? {
                SolveOutcome::Unsatisfiable(core) => {
                    self.statistics.discarded_literals += 1;

                    if self.options.intersect_with_reported_cores {
                        let num_candidates = working.len();
                        working = working.intersection(&core);
                        self.statistics.literals_removed_by_cores +=
                            (num_candidates - working.len()) as u64;
                    }
                }
                SolveOutcome::Satisfiable(_) => {
                    let is_new = necessary.insert(literal);
                    muc_assert_simple!(is_new, "{literal} was tried twice");
                    necessary_has_grown = true;
                }
            }
        }

        self.statistics.necessary_literals = necessary.len() as u64;
        Ok(necessary)
    }

    /// Queries the oracle exactly once with `subset`.
    fn solve_subset(&mut self, subset: &AssumptionSet) -> Result<SolveOutcome, CoreComputerError> {
        self.statistics.oracle_calls += 1;

        let outcome = self.oracle.solve(&subset.to_vec())?;
        match &outcome {
            SolveOutcome::Satisfiable(_) => {
                debug!("Query over {} assumptions is satisfiable", subset.len());
            }
            SolveOutcome::Unsatisfiable(core) => {
                muc_assert_moderate!(
                    core.is_subset(subset),
                    "the reported core {core} is not a subset of the queried assumptions {subset}"
                );
                debug!(
                    "Query over {} assumptions is unsatisfiable with a core of {} literals",
                    subset.len(),
                    core.len()
                );
            }
        }

        Ok(outcome)
    }

    fn ensure_not_finalised(&self) -> Result<(), CoreComputerError> {
        if self.explanation.is_finalised() {
            return Err(CoreComputerError::AlreadyFinalised);
        }

        Ok(())
    }

    fn log_statistics(&self) {
        if should_log_statistics() {
            self.statistics.log(StatisticLogger::new(["coreComputer"]));
        }
    }
}

impl<O: ?Sized> CoreComputer<'_, O> {
    pub fn explanation(&self) -> &Explanation {
        &self.explanation
    }

    /// The computed minimal unsatisfiable subset; empty if the assumptions are satisfiable.
    pub fn minimal_core(&self) -> Result<AssumptionSet, CoreComputerError> {
        match &self.explanation {
            Explanation::NotYetRun => Err(CoreComputerError::NotYetComputed),
            Explanation::Explained(core) => Ok(core.clone()),
            Explanation::NoExplanationNeeded => Ok(AssumptionSet::new()),
        }
    }

    pub fn assumptions(&self) -> &AssumptionSet {
        &self.assumptions
    }

    pub fn literal_lookup(&self) -> &LiteralLookup {
        &self.literal_lookup
    }

    pub fn statistics(&self) -> &CoreComputerStatistics {
        &self.statistics
    }

    pub fn options(&self) -> MinimisationOptions {
        self.options
    }

    /// Renders the literals of `set` through the literal lookup of the oracle, ordered by atom.
    pub fn render(&self, set: &AssumptionSet) -> Vec<String> {
        let mut literals: Vec<Literal> = set.to_vec();
        literals.sort();

        literals
            .into_iter()
            .map(|literal| self.literal_lookup.render(literal))
            .collect()
    }

    /// Renders the computed explanation; empty when there is no explanation.
    pub fn muc_to_strings(&self) -> Vec<String> {
        self.explanation
            .core()
            .map(|core| self.render(core))
            .unwrap_or_default()
    }
}
