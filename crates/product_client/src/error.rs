use reqwest::StatusCode;
use shared::error::DraftError;
use thiserror::Error;

use crate::store::Operation;

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch products. Please try again.";
pub const CREATE_FAILED_MESSAGE: &str = "Failed to add product. Please try again.";

/// Failures talking to the remote product service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid product service url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("product service returned status {0}")]
    Status(StatusCode),
    #[error("product service request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("malformed product service response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ServiceError::Status(status)
        } else if err.is_decode() {
            ServiceError::Decode(err.to_string())
        } else {
            ServiceError::Transport(err)
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to fetch products: {0}")]
    Fetch(#[source] ServiceError),
    #[error("failed to create product: {0}")]
    Create(#[source] ServiceError),
    #[error("draft is not ready to submit: {0}")]
    InvalidDraft(#[from] DraftError),
    #[error("{0} is already in flight")]
    AlreadyInFlight(Operation),
}

impl StoreError {
    /// Text shown in the error banner. Transport, status and decode failures
    /// of one operation share a single message.
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Fetch(_) => FETCH_FAILED_MESSAGE.to_string(),
            StoreError::Create(_) => CREATE_FAILED_MESSAGE.to_string(),
            StoreError::InvalidDraft(err) => {
                let mut message = err.to_string();
                if let Some(first) = message.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                format!("{message}.")
            }
            StoreError::AlreadyInFlight(operation) => {
                format!("A {operation} request is already in progress.")
            }
        }
    }
}
