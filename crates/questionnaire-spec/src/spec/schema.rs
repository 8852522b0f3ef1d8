use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::spec::step::{StepKind, StepSpec};

/// Serialized form of a step schema, as stored in schema files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StepSchemaDoc {
    pub form_id: String,
    pub version: String,
    pub steps: Vec<StepSpec>,
}

/// Read-only ordered sequence of steps, checked once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSchema {
    form_id: String,
    version: String,
    steps: Vec<StepSpec>,
}

impl StepSchema {
    pub fn new(
        form_id: impl Into<String>,
        version: impl Into<String>,
        steps: Vec<StepSpec>,
    ) -> Result<Self, SpecError> {
        check_steps(&steps)?;
        Ok(Self {
            form_id: form_id.into(),
            version: version.into(),
            steps,
        })
    }

    pub fn from_doc(doc: StepSchemaDoc) -> Result<Self, SpecError> {
        Self::new(doc.form_id, doc.version, doc.steps)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, SpecError> {
        let doc: StepSchemaDoc = serde_json::from_str(raw).map_err(SpecError::SchemaParse)?;
        Self::from_doc(doc)
    }

    pub fn to_doc(&self) -> StepSchemaDoc {
        StepSchemaDoc {
            form_id: self.form_id.clone(),
            version: self.version.clone(),
            steps: self.steps.clone(),
        }
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns a copy of the schema published under another form id.
    pub fn with_form_id(mut self, form_id: impl Into<String>) -> Self {
        self.form_id = form_id.into();
        self
    }

    pub fn step(&self, index: usize) -> Result<&StepSpec, SpecError> {
        self.steps.get(index).ok_or(SpecError::OutOfRange {
            index,
            count: self.steps.len(),
        })
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn steps(&self) -> &[StepSpec] {
        &self.steps
    }

    /// Finds the step writing `field`.
    pub fn step_for_field(&self, field: &str) -> Option<&StepSpec> {
        self.steps.iter().find(|step| step.writes(field))
    }

    /// Every answer slot in step order.
    pub fn fields(&self) -> Vec<&str> {
        self.steps
            .iter()
            .flat_map(|step| step.answer_fields())
            .collect()
    }
}

fn check_steps(steps: &[StepSpec]) -> Result<(), SpecError> {
    if steps.is_empty() {
        return Err(invalid("schema must declare at least one step"));
    }

    let mut seen_fields = BTreeSet::new();
    for (position, step) in steps.iter().enumerate() {
        if step.id != position {
            return Err(invalid(format!(
                "step '{}' has id {} but sits at position {}",
                step.field, step.id, position
            )));
        }
        if step.field.is_empty() {
            return Err(invalid(format!("step {} has an empty field name", position)));
        }

        if step.kind.is_choice() {
            if step.options.is_empty() {
                return Err(invalid(format!("choice step '{}' has no options", step.field)));
            }
            if !step.inputs.is_empty() {
                return Err(invalid(format!(
                    "choice step '{}' must not declare text inputs",
                    step.field
                )));
            }
            let mut option_ids = BTreeSet::new();
            for option in &step.options {
                if option.id.is_empty() || !option_ids.insert(option.id.as_str()) {
                    return Err(invalid(format!(
                        "step '{}' has an empty or duplicate option '{}'",
                        step.field, option.id
                    )));
                }
            }
        } else {
            if !step.options.is_empty() {
                return Err(invalid(format!(
                    "{} step '{}' must not declare options",
                    step.kind, step.field
                )));
            }
            if step.inputs.is_empty() {
                return Err(invalid(format!("step '{}' has no inputs", step.field)));
            }
        }

        if step.kind == StepKind::Numeric
            && (step.inputs.len() != 1 || step.inputs[0].field != step.field)
        {
            return Err(invalid(format!(
                "numeric step '{}' must have exactly one input writing its field",
                step.field
            )));
        }

        for field in step.answer_fields() {
            if field.is_empty() || !seen_fields.insert(field.to_string()) {
                return Err(invalid(format!(
                    "answer field '{}' is empty or written by more than one step",
                    field
                )));
            }
        }
    }

    Ok(())
}

fn invalid(message: impl Into<String>) -> SpecError {
    SpecError::InvalidSchema(message.into())
}
