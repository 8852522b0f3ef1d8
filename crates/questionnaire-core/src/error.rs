use questionnaire_spec::{SpecError, StepKind, StepValidation};
use thiserror::Error;

use crate::session::SessionId;

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("locale '{0}' is not available")]
    UnknownLocale(String),
    #[error("current step is incomplete: {0}")]
    Validation(StepValidation),
    #[error("field '{0}' is not declared by the schema")]
    UnknownField(String),
    #[error("field '{field}' belongs to a {kind} step and cannot be written by {operation}")]
    FieldKindMismatch {
        field: String,
        kind: StepKind,
        operation: &'static str,
    },
    #[error("'{option}' is not an option of field '{field}'")]
    UnknownOption { field: String, option: String },
    #[error("questionnaire is already completed; reset it first")]
    Completed,
    #[error("questionnaire is not completed yet")]
    NotCompleted,
    #[error("session {0} does not exist")]
    UnknownSession(SessionId),
    #[error(transparent)]
    Spec(#[from] SpecError),
    #[error("config error: {0}")]
    Config(String),
}
