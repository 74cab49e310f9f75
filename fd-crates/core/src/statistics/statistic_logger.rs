use std::fmt::Display;

use itertools::Itertools;

use super::statistic_logging::log_statistic;

/// Names statistics relative to the component that owns them: a statistic `decisions` logged
/// through a logger for `engine` is written as `engine_decisions`.
#[derive(Debug, Default, Clone)]
pub struct StatisticLogger {
    scope: String,
}

impl StatisticLogger {
    pub fn new<Input: IntoIterator<Item = impl Display>>(scope: Input) -> Self {
        Self {
            scope: scope.into_iter().join("_"),
        }
    }

    /// A logger one level deeper than `self`.
    pub fn attach_to_prefix(&self, name: impl Display) -> Self {
        let scope = if self.scope.is_empty() {
            name.to_string()
        } else {
            format!("{}_{name}", self.scope)
        };
        Self { scope }
    }

    pub fn log_statistic(&self, value: impl Display) {
        log_statistic(&self.scope, value);
    }

    pub fn name(&self) -> &str {
        &self.scope
    }
}
