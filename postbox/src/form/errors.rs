use thiserror::Error;

/// Reason a control value was rejected.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("value is required")]
    Required,
}
