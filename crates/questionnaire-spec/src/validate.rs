use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::answers::{AnswerRecord, AnswerValue};
use crate::spec::step::{InputSpec, StepKind, StepSpec};

/// Why a single field keeps its step from completing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

/// Outcome of evaluating one step against the current answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StepValidation {
    pub step: usize,
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl std::fmt::Display for StepValidation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "step {}", self.step)?;
        for error in &self.errors {
            write!(f, "; {}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

/// Per-kind completion predicate for the current step.
///
/// | kind | complete when |
/// |---|---|
/// | single choice | value is a non-empty, declared option id |
/// | multi choice | at least one option is selected |
/// | numeric | the raw input is not blank; no number parsing happens here |
/// | contact group | every required input (name, email) is non-empty |
#[derive(Debug, Default, Clone, Copy)]
pub struct ValidationPolicy;

impl ValidationPolicy {
    pub fn evaluate(&self, step: &StepSpec, answers: &AnswerRecord) -> StepValidation {
        validate_step(step, answers)
    }

    pub fn is_complete(&self, step: &StepSpec, answers: &AnswerRecord) -> bool {
        validate_step(step, answers).valid
    }
}

pub fn validate_step(step: &StepSpec, answers: &AnswerRecord) -> StepValidation {
    let errors: Vec<FieldError> = match step.kind {
        StepKind::SingleChoice => validate_single(step, answers.get(&step.field))
            .into_iter()
            .collect(),
        StepKind::MultiChoice => validate_multi(step, answers.get(&step.field))
            .into_iter()
            .collect(),
        StepKind::Numeric | StepKind::ContactGroup => step
            .inputs
            .iter()
            .filter(|input| input.required)
            .filter_map(|input| validate_input(step.kind, input, answers.get(&input.field)))
            .collect(),
    };

    StepValidation {
        step: step.id,
        valid: errors.is_empty(),
        errors,
    }
}

fn validate_single(step: &StepSpec, value: Option<&AnswerValue>) -> Option<FieldError> {
    match value {
        None => Some(missing(&step.field)),
        Some(AnswerValue::Choices(_)) => Some(type_mismatch(&step.field)),
        Some(AnswerValue::Text(option)) if option.is_empty() => Some(missing(&step.field)),
        Some(AnswerValue::Text(option)) if !step.has_option(option) => Some(FieldError {
            field: step.field.clone(),
            code: "unknown_option".into(),
            message: format!("'{}' is not an option of this step", option),
        }),
        Some(AnswerValue::Text(_)) => None,
    }
}

fn validate_multi(step: &StepSpec, value: Option<&AnswerValue>) -> Option<FieldError> {
    match value {
        Some(AnswerValue::Choices(choices)) if !choices.is_empty() => None,
        Some(AnswerValue::Text(_)) => Some(type_mismatch(&step.field)),
        _ => Some(missing(&step.field)),
    }
}

fn validate_input(
    kind: StepKind,
    input: &InputSpec,
    value: Option<&AnswerValue>,
) -> Option<FieldError> {
    match value {
        Some(AnswerValue::Text(text)) => {
            let blank = match kind {
                StepKind::Numeric => text.trim().is_empty(),
                _ => text.is_empty(),
            };
            blank.then(|| missing(&input.field))
        }
        Some(AnswerValue::Choices(_)) => Some(type_mismatch(&input.field)),
        None => Some(missing(&input.field)),
    }
}

fn missing(field: &str) -> FieldError {
    FieldError {
        field: field.to_string(),
        code: "missing".into(),
        message: "a value is required".into(),
    }
}

fn type_mismatch(field: &str) -> FieldError {
    FieldError {
        field: field.to_string(),
        code: "type_mismatch".into(),
        message: "value has the wrong shape for this step".into(),
    }
}
