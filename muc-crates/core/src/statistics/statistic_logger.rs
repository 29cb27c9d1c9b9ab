use std::fmt::Display;

use itertools::Itertools;

use super::statistic_logging::log_statistic;

/// Logs statistics under a shared name prefix, e.g. `coreComputer_oracleCalls`.
#[derive(Debug, Default, Clone)]
pub struct StatisticLogger {
    name_prefix: String,
}

impl StatisticLogger {
    pub fn new<Input: IntoIterator<Item = impl Display>>(name_prefix: Input) -> Self {
        Self {
            name_prefix: name_prefix.into_iter().join("_"),
        }
    }

    /// Returns a new [`StatisticLogger`] whose prefix is extended with `addition_to_prefix`.
    pub fn attach_to_prefix(&self, addition_to_prefix: impl Display) -> Self {
        if self.name_prefix.is_empty() {
            return Self {
                name_prefix: addition_to_prefix.to_string(),
            };
        }

        Self {
            name_prefix: format!("{}_{}", self.name_prefix, addition_to_prefix),
        }
    }

    pub fn log_statistic(&self, value: impl Display) {
        log_statistic(&self.name_prefix, value);
    }

    pub fn name_prefix(&self) -> &str {
        &self.name_prefix
    }
}

#[cfg(test)]
mod tests {
    use super::StatisticLogger;

    #[test]
    fn prefixes_are_joined_with_underscores() {
        let logger = StatisticLogger::new(["coreComputer", "minimise"]);
        assert_eq!(logger.name_prefix(), "coreComputer_minimise");

        let extended = logger.attach_to_prefix("oracleCalls");
        assert_eq!(extended.name_prefix(), "coreComputer_minimise_oracleCalls");
    }

    #[test]
    fn attaching_to_an_empty_prefix_does_not_add_a_separator() {
        let logger = StatisticLogger::default().attach_to_prefix("oracleCalls");
        assert_eq!(logger.name_prefix(), "oracleCalls");
    }
}
