/// Options which influence how a [`CoreComputer`](super::CoreComputer) shrinks a core.
///
/// Neither option changes whether the result is minimal; they only change which queries are
/// made.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MinimisationOptions {
    /// Intersect the remaining candidates with the core reported by every unsatisfiable query.
    /// Every literal removed this way saves one oracle call.
    pub intersect_with_reported_cores: bool,
    /// After a literal has been found to be necessary, first check whether the necessary
    /// literals alone are unsatisfiable; if so, the remaining candidates are dropped at once.
    ///
    /// This can save many queries when the core is small compared to the candidate set, at the
    /// cost of at most one additional query per necessary literal.
    pub check_necessary_early: bool,
}

impl Default for MinimisationOptions {
    fn default() -> Self {
        MinimisationOptions {
            intersect_with_reported_cores: true,
            check_necessary_early: false,
        }
    }
}
