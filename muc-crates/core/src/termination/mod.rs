//! A [`TerminationCondition`] is polled by an [`Oracle`](crate::oracle::Oracle) while it decides
//! a single query. It is the only place where a bound on the running time of a computation can be
//! enforced: the minimiser itself runs every query to completion, so an oracle which is told to
//! stop reports [`OracleError::Interrupted`](crate::oracle::OracleError::Interrupted) instead of
//! a verdict.

mod combinator;
mod decision_budget;
mod indefinite;
mod time_budget;

pub use combinator::Combinator;
pub use decision_budget::DecisionBudget;
pub use indefinite::Indefinite;
pub use time_budget::TimeBudget;

/// The central trait that defines a termination condition. A termination condition determines when
/// an oracle should give up deciding a query.
pub trait TerminationCondition {
    /// Returns `true` when the oracle should stop, `false` otherwise.
    fn should_stop(&mut self) -> bool;
    fn decision_has_been_made(&mut self) {}
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self) -> bool {
        match self {
            Some(t) => t.should_stop(),
            None => false,
        }
    }

    fn decision_has_been_made(&mut self) {
        if let Some(t) = self {
            t.decision_has_been_made()
        }
    }
}
