use muc_solver::program::ProgramParseError;
use muc_solver::CoreComputerError;
use muc_solver::OracleError;
use thiserror::Error;

pub(crate) type MucSolverResult<T> = Result<T, MucSolverError>;

#[derive(Error, Debug)]
pub(crate) enum MucSolverError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("The program in {name} is invalid, more details: {error}")]
    InvalidProgram {
        name: String,
        #[source]
        error: ProgramParseError,
    },
    #[error("Failed to compute a minimal core, more details: {0}")]
    Computation(#[from] CoreComputerError),
    #[error("Failed to find the unsatisfiable constraints, more details: {0}")]
    UnsatConstraints(#[from] OracleError),
}

impl MucSolverError {
    pub(crate) fn invalid_program(name: impl Into<String>, error: ProgramParseError) -> Self {
        Self::InvalidProgram {
            name: name.into(),
            error,
        }
    }
}
