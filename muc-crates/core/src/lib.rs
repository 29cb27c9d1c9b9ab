//! The minimisation engine: shrinks an unsatisfiable set of assumed literals to a minimal
//! unsatisfiable subset by querying an [`Oracle`] for the background theory.
pub mod asserts;
pub(crate) mod basic_types;
pub mod containers;
pub(crate) mod core_computer;
pub mod oracle;
pub mod statistics;
pub mod termination;

pub use convert_case;

pub use crate::basic_types::AssumptionSet;
pub use crate::basic_types::AtomId;
pub use crate::basic_types::Literal;
pub use crate::basic_types::Symbol;
pub use crate::basic_types::Term;
pub use crate::core_computer::CoreComputer;
pub use crate::core_computer::CoreComputerError;
pub use crate::core_computer::CoreComputerStatistics;
pub use crate::core_computer::Explanation;
pub use crate::core_computer::MinimisationOptions;
pub use crate::oracle::LiteralLookup;
pub use crate::oracle::Oracle;
pub use crate::oracle::OracleError;
pub use crate::oracle::SolveOutcome;
