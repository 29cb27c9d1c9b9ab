//! The interface to the decision procedure which the [`CoreComputer`](crate::CoreComputer)
//! consumes.
//!
//! An [`Oracle`] decides whether its fixed background theory together with a set of assumed
//! literals has a model. The minimiser never inspects the theory itself; every piece of
//! information it uses comes from the [`SolveOutcome`] of a call.

mod literal_lookup;

pub use literal_lookup::LiteralLookup;
use thiserror::Error;

use crate::basic_types::AssumptionSet;
use crate::basic_types::Literal;

/// The answer of an [`Oracle`] to a single query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    /// The background theory together with the assumptions has a model. The oracle may report
    /// the literals which hold in that model.
    Satisfiable(Option<Vec<Literal>>),
    /// The background theory together with the assumptions has no model. The reported core is a
    /// subset of the assumptions which on its own is sufficient for unsatisfiability; it does not
    /// have to be minimal and may equal the queried assumptions.
    ///
    /// An empty core means that the background theory is inconsistent on its own.
    Unsatisfiable(AssumptionSet),
}

impl SolveOutcome {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, SolveOutcome::Satisfiable(_))
    }
}

/// The ways in which an [`Oracle`] can fail to answer a query.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum OracleError {
    /// The oracle gave up before it could decide the query, e.g. because its
    /// [`TerminationCondition`](crate::termination::TerminationCondition) triggered.
    #[error("the oracle was interrupted before it decided the query")]
    Interrupted,
}

/// A decision procedure for a fixed background theory under assumptions.
///
/// Queries are independent of each other: the answer to a call depends only on the background
/// theory and the provided assumptions, never on earlier calls.
pub trait Oracle {
    /// Decides the background theory under `assumptions`.
    ///
    /// An empty slice is allowed; it is satisfiable unless the background theory is inconsistent,
    /// in which case [`SolveOutcome::Unsatisfiable`] is returned with an empty core.
    fn solve(&mut self, assumptions: &[Literal]) -> Result<SolveOutcome, OracleError>;

    /// The symbolic identities of the atoms known to this oracle. Only used to render results.
    fn literal_lookup(&self) -> LiteralLookup {
        LiteralLookup::default()
    }
}
