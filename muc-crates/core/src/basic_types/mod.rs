mod assumption_set;
mod atom;
mod literal;

pub use assumption_set::AssumptionSet;
pub use atom::AtomId;
pub use atom::Symbol;
pub use atom::Term;
pub use literal::Literal;
