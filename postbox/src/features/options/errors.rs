use thiserror::Error;

use super::field::BaseField;

/// Errors emitted while reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("settings IO failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings JSON failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised when turning user input into base settings values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("unknown settings field `{0}`")]
    UnknownField(String),
    #[error("invalid value `{value}` for `{field}`: {reason}")]
    InvalidValue {
        field: BaseField,
        value: String,
        reason: &'static str,
    },
    #[error("value for `{0}` has the wrong type")]
    TypeMismatch(BaseField),
    #[error("`{0}` is required")]
    Required(BaseField),
}

/// Failures of the base settings patch flow.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
