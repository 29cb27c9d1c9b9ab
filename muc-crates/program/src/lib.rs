//! The program front-end of the MUC solver.
//!
//! A program is parsed ([`parse_program`]), its facts are turned into assumptions
//! ([`AssumptionTransformer`]), and the result is grounded into a [`GroundProgram`] which the
//! [`ProgramOracle`] decides under assumptions.
//!
//! ```rust
//! # use muc_core::CoreComputer;
//! # use muc_program::parse_program;
//! # use muc_program::AssumptionTransformer;
//! # use muc_program::ProgramOracle;
//! # use muc_program::Signature;
//! let program = parse_program("a(1..5). :- a(1), a(4), a(5).").expect("valid program");
//! let signature: Signature = "a/1".parse().expect("valid signature");
//!
//! let transformed = AssumptionTransformer::new([signature]).transform(&program);
//! let (ground_program, assumptions) = transformed.ground();
//!
//! let mut oracle = ProgramOracle::new(ground_program);
//! let mut core_computer = CoreComputer::new(&mut oracle, assumptions);
//! let _ = core_computer.explain().expect("the oracle is not interrupted");
//!
//! assert_eq!(core_computer.muc_to_strings(), vec!["a(1)", "a(4)", "a(5)"]);
//! ```
pub mod ast;
mod ground;
mod oracle;
mod parser;
mod signature;
mod transformer;
mod unsat_constraints;

pub use ast::Constraint;
pub use ast::Location;
pub use ast::Position;
pub use ast::Program;
pub use ground::AtomStatus;
pub use ground::GroundProgram;
pub use oracle::ProgramOracle;
pub use oracle::ProgramOracleStatistics;
pub use parser::parse_program;
pub use parser::MAX_INSTANCES;
pub use parser::ProgramParseError;
pub use signature::Signature;
pub use signature::SignatureParseError;
pub use transformer::AssumptionTransformer;
pub use transformer::TransformedProgram;
pub use unsat_constraints::UnsatConstraintComputer;
pub use unsat_constraints::UnsatConstraintStatistics;
