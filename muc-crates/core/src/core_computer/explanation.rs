use crate::basic_types::AssumptionSet;

/// The state of the explanation held by a [`CoreComputer`](super::CoreComputer).
///
/// It starts as [`Explanation::NotYetRun`] and is set exactly once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Explanation {
    #[default]
    NotYetRun,
    /// The assumptions are unsatisfiable and the set is a minimal unsatisfiable subset of them.
    ///
    /// The set is empty when the background theory is inconsistent on its own, in which case no
    /// assumption is to blame.
    Explained(AssumptionSet),
    /// The assumptions are satisfiable.
    NoExplanationNeeded,
}

impl Explanation {
    /// Returns true once the explanation has been computed.
    pub fn is_finalised(&self) -> bool {
        !matches!(self, Explanation::NotYetRun)
    }

    /// The minimal unsatisfiable subset, if one has been computed.
    pub fn core(&self) -> Option<&AssumptionSet> {
        match self {
            Explanation::Explained(core) => Some(core),
            Explanation::NotYetRun | Explanation::NoExplanationNeeded => None,
        }
    }

    pub fn into_core(self) -> Option<AssumptionSet> {
        match self {
            Explanation::Explained(core) => Some(core),
            Explanation::NotYetRun | Explanation::NoExplanationNeeded => None,
        }
    }
}
