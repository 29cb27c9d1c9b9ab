//! # MUC solver
//! Explains why a program has no answer under a set of assumed facts by computing a minimal
//! unsatisfiable core (MUC): a subset of the assumptions which cannot hold together, and from
//! which no assumption can be dropped without the remainder becoming satisfiable.
//!
//! The engine only talks to an [`Oracle`] and is independent of the program front-end in
//! [`program`], which parses programs, turns facts into assumptions and decides them with the
//! [`ProgramOracle`](program::ProgramOracle).
//!
//! ```rust
//! # use muc_solver::program::parse_program;
//! # use muc_solver::program::AssumptionTransformer;
//! # use muc_solver::program::ProgramOracle;
//! # use muc_solver::program::Signature;
//! # use muc_solver::CoreComputer;
//! # use muc_solver::Explanation;
//! // Facts of `a/1` become assumptions; an empty transformer would assume every fact.
//! let program = parse_program("a(1..5). :- a(3).").expect("valid program");
//! let transformer = AssumptionTransformer::new([Signature::new("a", 1)]);
//! let (ground_program, assumptions) = transformer.transform(&program).ground();
//!
//! let mut oracle = ProgramOracle::new(ground_program);
//! let mut core_computer = CoreComputer::new(&mut oracle, assumptions);
//! let explanation = core_computer.explain().expect("the oracle is not interrupted");
//! assert!(matches!(explanation, Explanation::Explained(core) if core.len() == 1));
//!
//! assert_eq!(core_computer.muc_to_strings(), vec!["a(3)"]);
//! ```
pub use muc_core::*;
pub use muc_program as program;
