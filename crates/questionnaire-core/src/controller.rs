use std::collections::BTreeMap;
use std::sync::Arc;

use questionnaire_spec::{
    AnswerValue, InputType, LocaleCatalog, StepKind, StepSchema, StepSpec, Submission,
};
use serde::Serialize;

use crate::error::WizardError;
use crate::sink::{SubmissionAck, SubmissionSink};
use crate::state::{Advance, WizardState};

/// One option as the renderer shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewOption {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub selected: bool,
}

/// One text input as the renderer shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewInput {
    pub field: String,
    pub input_type: InputType,
    pub placeholder: String,
    pub required: bool,
    pub value: String,
}

/// Everything a renderer needs for the current step, already localized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardView {
    pub form_id: String,
    pub locale: String,
    pub available_locales: Vec<String>,
    pub title: String,
    pub subtitle: String,
    pub greeting: String,
    pub step_index: usize,
    pub step_number: usize,
    pub step_count: usize,
    pub progress_percent: usize,
    pub field: String,
    pub kind: StepKind,
    pub question: String,
    pub options: Vec<ViewOption>,
    pub inputs: Vec<ViewInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Answers of the visible step's fields only.
    pub answers: BTreeMap<String, AnswerValue>,
    pub can_advance: bool,
    pub can_retreat: bool,
    pub is_last_step: bool,
    pub back_label: String,
    pub next_label: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted: Option<SubmissionAck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_message: Option<String>,
}

/// Binds schema, catalog and one session's state for a renderer.
pub struct WizardController {
    schema: Arc<StepSchema>,
    catalog: Arc<LocaleCatalog>,
    state: WizardState,
    sink: Option<Arc<dyn SubmissionSink>>,
    ack: Option<SubmissionAck>,
}

impl std::fmt::Debug for WizardController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WizardController")
            .field("form_id", &self.schema.form_id())
            .field("state", &self.state)
            .field("has_sink", &self.sink.is_some())
            .field("ack", &self.ack)
            .finish()
    }
}

impl WizardController {
    pub(crate) fn new(schema: Arc<StepSchema>, catalog: Arc<LocaleCatalog>) -> Self {
        let state = WizardState::new(&schema, &catalog);
        Self {
            schema,
            catalog,
            state,
            sink: None,
            ack: None,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn SubmissionSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Starts in `locale` instead of the catalog default.
    pub fn with_locale(mut self, locale: &str) -> Result<Self, WizardError> {
        self.state.switch_locale(&self.catalog, locale)?;
        Ok(self)
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn schema(&self) -> &StepSchema {
        &self.schema
    }

    pub fn catalog(&self) -> &LocaleCatalog {
        &self.catalog
    }

    pub fn acknowledgement(&self) -> Option<&SubmissionAck> {
        self.ack.as_ref()
    }

    pub fn current_step(&self) -> Result<&StepSpec, WizardError> {
        Ok(self.schema.step(self.state.current_step())?)
    }

    pub fn current_view(&self) -> Result<WizardView, WizardError> {
        let step = self.current_step()?;
        let locale = self.state.locale();
        let answers = self.state.answers();
        let text = |key: &str| self.catalog.resolve(locale, key).to_string();

        let selected: &[String] = match answers.get(&step.field) {
            Some(AnswerValue::Choices(choices)) => choices,
            _ => &[],
        };
        let single = answers.text(&step.field).unwrap_or_default();
        let options = step
            .options
            .iter()
            .map(|option| ViewOption {
                id: option.id.clone(),
                label: self
                    .catalog
                    .option_label(locale, &step.field, &option.id)
                    .to_string(),
                image: option.image.clone(),
                selected: match step.kind {
                    StepKind::SingleChoice => single == option.id,
                    _ => selected.contains(&option.id),
                },
            })
            .collect();
        let inputs = step
            .inputs
            .iter()
            .map(|input| ViewInput {
                field: input.field.clone(),
                input_type: input.input_type,
                placeholder: text(&input.placeholder_key),
                required: input.required,
                value: answers.text(&input.field).unwrap_or_default().to_string(),
            })
            .collect();
        let visible = step
            .answer_fields()
            .into_iter()
            .filter_map(|field| {
                answers
                    .get(field)
                    .map(|value| (field.to_string(), value.clone()))
            })
            .collect();

        let index = self.state.current_step();
        let count = self.schema.step_count();
        let is_last_step = index == self.schema.last_index();
        let completed = self.state.is_completed();
        Ok(WizardView {
            form_id: self.schema.form_id().to_string(),
            locale: locale.to_string(),
            available_locales: self
                .catalog
                .available_locales()
                .into_iter()
                .map(str::to_string)
                .collect(),
            title: text("form.title"),
            subtitle: text("form.subtitle"),
            greeting: text("form.greeting"),
            step_index: index,
            step_number: index + 1,
            step_count: count,
            progress_percent: (index + 1) * 100 / count,
            field: step.field.clone(),
            kind: step.kind,
            question: text(&step.question_key),
            options,
            inputs,
            unit: (step.kind == StepKind::Numeric).then(|| text("form.area_unit")),
            answers: visible,
            can_advance: self.state.can_advance(&self.schema),
            can_retreat: !completed && index > 0,
            is_last_step,
            back_label: text("nav.back"),
            next_label: if is_last_step {
                text("nav.submit")
            } else {
                text("nav.next")
            },
            completed,
            submitted: self.ack.clone(),
            submitted_message: completed.then(|| text("form.submitted")),
        })
    }

    pub fn select_single(&mut self, field: &str, option_id: &str) -> Result<(), WizardError> {
        self.state.set_single_choice(&self.schema, field, option_id)
    }

    pub fn toggle_multi(&mut self, field: &str, option_id: &str) -> Result<bool, WizardError> {
        self.state.toggle_multi_choice(&self.schema, field, option_id)
    }

    pub fn set_text(&mut self, field: &str, value: &str) -> Result<(), WizardError> {
        self.state.set_text(&self.schema, field, value)
    }

    /// Advances; on completion hands the submission to the sink exactly once.
    pub fn go_next(&mut self) -> Result<Advance, WizardError> {
        let outcome = self.state.advance(&self.schema)?;
        if outcome == Advance::Completed {
            let submission = self.submission()?;
            let ack = match &self.sink {
                Some(sink) => sink.submit(&submission),
                None => SubmissionAck::Submitted,
            };
            tracing::info!(
                form_id = %submission.form_id,
                submitted = ack.is_submitted(),
                "submission handed to sink"
            );
            self.ack = Some(ack);
        }
        Ok(outcome)
    }

    pub fn go_back(&mut self) -> Result<usize, WizardError> {
        self.state.retreat()
    }

    pub fn change_locale(&mut self, locale: &str) -> Result<(), WizardError> {
        self.state.switch_locale(&self.catalog, locale)
    }

    /// Starts a new questionnaire in the current locale.
    pub fn restart(&mut self) {
        self.state.reset(&self.schema);
        self.ack = None;
    }

    /// The completed answers as a submission record.
    pub fn submission(&self) -> Result<Submission, WizardError> {
        if !self.state.is_completed() {
            return Err(WizardError::NotCompleted);
        }
        Ok(Submission::new(
            &self.schema,
            self.state.locale(),
            self.state.answers().clone(),
        ))
    }
}
