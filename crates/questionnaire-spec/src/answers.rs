use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::spec::schema::StepSchema;
use crate::spec::step::StepKind;

/// Value stored in one answer slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Single-choice option id, or raw text for numeric and contact inputs.
    Text(String),
    /// Multi-choice option ids in the order they were added.
    Choices(Vec<String>),
}

impl AnswerValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(text) => Some(text),
            AnswerValue::Choices(_) => None,
        }
    }

    pub fn as_choices(&self) -> Option<&[String]> {
        match self {
            AnswerValue::Choices(choices) => Some(choices),
            AnswerValue::Text(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Text(text) => text.is_empty(),
            AnswerValue::Choices(choices) => choices.is_empty(),
        }
    }
}

/// Accumulated answers, one slot per schema field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct AnswerRecord {
    values: BTreeMap<String, AnswerValue>,
}

impl AnswerRecord {
    /// Creates the record with every slot of `schema` at its empty default.
    pub fn defaults_for(schema: &StepSchema) -> Self {
        let mut values = BTreeMap::new();
        for step in schema.steps() {
            for field in step.answer_fields() {
                let value = match step.kind {
                    StepKind::MultiChoice => AnswerValue::Choices(Vec::new()),
                    StepKind::SingleChoice | StepKind::Numeric | StepKind::ContactGroup => {
                        AnswerValue::Text(String::new())
                    }
                };
                values.insert(field.to_string(), value);
            }
        }
        Self { values }
    }

    pub fn get(&self, field: &str) -> Option<&AnswerValue> {
        self.values.get(field)
    }

    /// Mutable access to an existing slot; never creates one.
    pub fn get_mut(&mut self, field: &str) -> Option<&mut AnswerValue> {
        self.values.get_mut(field)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(AnswerValue::as_text)
    }

    pub fn choices(&self, field: &str) -> Option<&[String]> {
        self.get(field).and_then(AnswerValue::as_choices)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.values.iter().map(|(field, value)| (field.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flat JSON object keyed by field name.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Default::default()))
    }
}

/// Optional metadata paired with a `Submission`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Meta {
    pub fn now() -> Self {
        Self {
            created_at: OffsetDateTime::now_utc().format(&Rfc3339).ok(),
        }
    }
}

/// Final answer record handed to a submission sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Submission {
    pub form_id: String,
    pub spec_version: String,
    pub locale: String,
    pub answers: AnswerRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Submission {
    pub fn new(schema: &StepSchema, locale: impl Into<String>, answers: AnswerRecord) -> Self {
        Self {
            form_id: schema.form_id().to_string(),
            spec_version: schema.version().to_string(),
            locale: locale.into(),
            answers,
            meta: Some(Meta::now()),
        }
    }

    /// The flat record keyed exactly by step field names.
    pub fn record(&self) -> Value {
        self.answers.to_json()
    }

    /// Serializes the whole submission as CBOR bytes.
    pub fn to_cbor(&self) -> Result<Vec<u8>, ciborium::ser::Error<std::io::Error>> {
        let mut bytes = Vec::new();
        ciborium::into_writer(self, &mut bytes)?;
        Ok(bytes)
    }

    /// Serializes the submission as indented JSON for debugging.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
