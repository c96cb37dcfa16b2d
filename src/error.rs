// ⚠️ Cookbook errors
// Every rejection is a client error: nothing here is retried or recovered.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CookbookError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CookbookError {
    /// Input has no alphabetic content
    #[error("name has no alphabetic characters: {0:?}")]
    MalformedName(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Field present but of the wrong shape
    #[error("invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// Canonical name already taken (by either variant)
    #[error("an entry named {0:?} already exists")]
    DuplicateName(String),

    #[error("cookTime must be non-negative, got {0}")]
    InvalidDuration(String),

    #[error("quantity of {item:?} must be positive, got {value}")]
    InvalidQuantity { item: String, value: String },

    #[error("recipe lists {0:?} more than once")]
    DuplicateDependency(String),

    #[error("unknown entry type: {0}")]
    UnknownType(String),

    #[error("no entry named {0:?}")]
    NotFound(String),

    /// Summaries are only defined for recipes
    #[error("{0:?} is an ingredient, not a recipe")]
    NotARecipe(String),

    #[error("recipe {recipe:?} requires {dependency:?}, which is not in the cookbook")]
    MissingDependency { recipe: String, dependency: String },

    #[error("recipe {0:?} depends on itself")]
    CyclicDependency(String),

    #[error("quantities for {0:?} overflow")]
    QuantityOverflow(String),
}

impl CookbookError {
    pub(crate) fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        CookbookError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CookbookError::MissingDependency {
            recipe: "Cheese".to_string(),
            dependency: "Not Real".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "recipe \"Cheese\" requires \"Not Real\", which is not in the cookbook"
        );

        let err = CookbookError::invalid_field("cookTime", "must be an integer");
        assert_eq!(err.to_string(), "invalid field cookTime: must be an integer");
    }
}
