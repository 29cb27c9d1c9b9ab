use thiserror::Error;

use crate::oracle::OracleError;

/// Errors which can occur while computing an explanation.
///
/// Apart from [`CoreComputerError::Oracle`], every variant indicates that the
/// [`CoreComputer`](super::CoreComputer) was used incorrectly.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum CoreComputerError {
    #[error("cannot minimise an empty set of assumptions")]
    EmptyCandidate,
    #[error("the explanation has already been computed")]
    AlreadyFinalised,
    #[error("the explanation has not been computed yet")]
    NotYetComputed,
    #[error(transparent)]
    Oracle(#[from] OracleError),
}
