//! Step keywords and conjunction-aware keyword matching.

use gherkin::StepType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::StepKeywordParseError;

/// Keyword a step is written or registered with.
///
/// `And` and `But` carry no meaning of their own when choosing a definition:
/// they continue whatever keyword came before, so [`accepts`](Self::accepts)
/// treats them as wildcards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKeyword {
    /// Setup preconditions for a scenario.
    Given,
    /// Perform an action.
    When,
    /// Assert an outcome.
    Then,
    /// Continue the previous keyword.
    And,
    /// Continue the previous keyword with a contrasting condition.
    But,
}

impl StepKeyword {
    /// Canonical spelling.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepkit_patterns::StepKeyword;
    ///
    /// assert_eq!(StepKeyword::But.as_str(), "But");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
        }
    }

    /// Whether this is `And` or `But`.
    #[must_use]
    pub const fn is_conjunction(self) -> bool {
        matches!(self, Self::And | Self::But)
    }

    /// Whether a step written with `self` may use a definition registered
    /// under `definition`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepkit_patterns::StepKeyword;
    ///
    /// assert!(StepKeyword::When.accepts(StepKeyword::When));
    /// assert!(!StepKeyword::When.accepts(StepKeyword::Then));
    /// assert!(StepKeyword::And.accepts(StepKeyword::Then));
    /// ```
    #[must_use]
    pub fn accepts(self, definition: Self) -> bool {
        self.is_conjunction() || definition.is_conjunction() || self == definition
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepKeyword {
    type Err = StepKeywordParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        [Self::Given, Self::When, Self::Then, Self::And, Self::But]
            .into_iter()
            .find(|keyword| trimmed.eq_ignore_ascii_case(keyword.as_str()))
            .ok_or_else(|| StepKeywordParseError(trimmed.to_string()))
    }
}

impl TryFrom<&str> for StepKeyword {
    type Error = StepKeywordParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StepType> for StepKeyword {
    fn from(ty: StepType) -> Self {
        match ty {
            StepType::Given => Self::Given,
            StepType::When => Self::When,
            StepType::Then => Self::Then,
        }
    }
}
