use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Supported step input kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    SingleChoice,
    MultiChoice,
    Numeric,
    ContactGroup,
}

impl StepKind {
    pub fn is_choice(self) -> bool {
        matches!(self, StepKind::SingleChoice | StepKind::MultiChoice)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::SingleChoice => "single_choice",
            StepKind::MultiChoice => "multi_choice",
            StepKind::Numeric => "numeric",
            StepKind::ContactGroup => "contact_group",
        }
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering hint for free-text inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    Text,
    Number,
    Email,
    Tel,
}

/// One selectable option of a choice step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OptionSpec {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl OptionSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Free-text input owned by a numeric or contact step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct InputSpec {
    pub field: String,
    #[serde(rename = "type")]
    pub input_type: InputType,
    pub placeholder_key: String,
    #[serde(default = "required_by_default")]
    pub required: bool,
}

fn required_by_default() -> bool {
    true
}

impl InputSpec {
    pub fn required(field: impl Into<String>, input_type: InputType, placeholder_key: &str) -> Self {
        Self {
            field: field.into(),
            input_type,
            placeholder_key: placeholder_key.to_string(),
            required: true,
        }
    }

    pub fn optional(field: impl Into<String>, input_type: InputType, placeholder_key: &str) -> Self {
        Self {
            required: false,
            ..Self::required(field, input_type, placeholder_key)
        }
    }
}

/// A single questionnaire page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StepSpec {
    /// Ordinal position inside the schema, 0-based.
    pub id: usize,
    /// Answer slot for choice steps; group name for contact steps.
    pub field: String,
    pub kind: StepKind,
    pub question_key: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<InputSpec>,
}

impl StepSpec {
    pub fn option_keys(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|option| option.id.as_str())
    }

    pub fn has_option(&self, option_id: &str) -> bool {
        self.options.iter().any(|option| option.id == option_id)
    }

    pub fn input(&self, field: &str) -> Option<&InputSpec> {
        self.inputs.iter().find(|input| input.field == field)
    }

    /// Answer slots written by this step, in display order.
    pub fn answer_fields(&self) -> Vec<&str> {
        if self.kind.is_choice() {
            vec![self.field.as_str()]
        } else {
            self.inputs.iter().map(|input| input.field.as_str()).collect()
        }
    }

    pub fn writes(&self, field: &str) -> bool {
        self.answer_fields().contains(&field)
    }
}
