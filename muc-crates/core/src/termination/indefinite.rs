use super::TerminationCondition;

/// A [`TerminationCondition`] which never triggers. The oracle can search forever.
#[derive(Clone, Copy, Debug, Default)]
pub struct Indefinite;

impl TerminationCondition for Indefinite {
    fn should_stop(&mut self) -> bool {
        false
    }
}
