//! Specificity scoring for disambiguating step definitions.
//!
//! When several definitions match the same step text, the one whose
//! arguments are most constrained wins. Each argument contributes the weight
//! of its type (see [`ArgType::specificity`]); literal text contributes
//! nothing.

use serde::{Deserialize, Serialize};

use crate::types::{ArgType, ArgumentDefinition, StepDefinition};

/// Specificity score of a step definition. Higher is more specific.
///
/// # Examples
///
/// ```
/// use stepkit_patterns::{SpecificityScore, StepDefinition, StepKeyword};
///
/// let role = StepDefinition::from_pattern("a", "I am (admin|guest)", StepKeyword::Given);
/// let free = StepDefinition::from_pattern("b", "I am {string}", StepKeyword::Given);
/// assert!(SpecificityScore::of_definition(&role) > SpecificityScore::of_definition(&free));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct SpecificityScore(pub u32);

impl SpecificityScore {
    /// Sum of the type weights of `args`.
    #[must_use]
    pub fn of_arguments(args: &[ArgumentDefinition]) -> Self {
        Self(
            args.iter()
                .map(|arg| arg.arg_type.specificity())
                .fold(0, u32::saturating_add),
        )
    }

    /// Score of a definition's declared arguments.
    #[must_use]
    pub fn of_definition(definition: &StepDefinition) -> Self {
        Self::of_arguments(&definition.args)
    }

    /// Score of a single argument type.
    #[must_use]
    pub const fn of_type(arg_type: ArgType) -> Self {
        Self(arg_type.specificity())
    }
}
