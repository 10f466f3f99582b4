use thiserror::Error;

/// Reasons a draft cannot be turned into a create request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("price must not be empty")]
    EmptyPrice,
    #[error("price '{value}' is not a valid number")]
    InvalidPrice { value: String },
    #[error("price '{value}' must not be negative")]
    NegativePrice { value: String },
}
