use questionnaire_spec::{
    AnswerRecord, AnswerValue, LocaleCatalog, StepKind, StepSchema, StepSpec, StepValidation,
    ValidationPolicy,
};
use serde::Serialize;

use crate::error::WizardError;

/// Result of a successful `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the given step index.
    Moved(usize),
    /// The last step passed validation; the questionnaire is complete.
    Completed,
}

/// Mutable lifecycle of one questionnaire session.
///
/// Every fallible operation leaves the state untouched when it returns an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardState {
    current_step: usize,
    answers: AnswerRecord,
    locale: String,
    completed: bool,
}

impl WizardState {
    /// Initial state: step 0, empty answers, the catalog's default locale.
    pub fn new(schema: &StepSchema, catalog: &LocaleCatalog) -> Self {
        Self {
            current_step: 0,
            answers: AnswerRecord::defaults_for(schema),
            locale: catalog.default_locale().to_string(),
            completed: false,
        }
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Replaces a single-choice value. An empty `option_id` clears the selection.
    pub fn set_single_choice(
        &mut self,
        schema: &StepSchema,
        field: &str,
        option_id: &str,
    ) -> Result<(), WizardError> {
        let step = self.writable_step(schema, field, "set_single_choice", |kind| {
            kind == StepKind::SingleChoice
        })?;
        if !option_id.is_empty() && !step.has_option(option_id) {
            return Err(unknown_option(field, option_id));
        }
        *self.slot(field)? = AnswerValue::Text(option_id.to_string());
        tracing::debug!(step = self.current_step, field, option = option_id, "single choice set");
        Ok(())
    }

    /// Adds `option_id` to a multi-choice set, or removes it when already present.
    ///
    /// Returns whether the option is selected afterwards. Additions append, so the
    /// set keeps insertion order.
    pub fn toggle_multi_choice(
        &mut self,
        schema: &StepSchema,
        field: &str,
        option_id: &str,
    ) -> Result<bool, WizardError> {
        let step = self.writable_step(schema, field, "toggle_multi_choice", |kind| {
            kind == StepKind::MultiChoice
        })?;
        if !step.has_option(option_id) {
            return Err(unknown_option(field, option_id));
        }

        let slot = self.slot(field)?;
        let mut choices = match slot {
            AnswerValue::Choices(choices) => std::mem::take(choices),
            AnswerValue::Text(_) => Vec::new(),
        };
        let selected = match choices.iter().position(|choice| choice == option_id) {
            Some(pos) => {
                choices.remove(pos);
                false
            }
            None => {
                choices.push(option_id.to_string());
                true
            }
        };
        *slot = AnswerValue::Choices(choices);
        tracing::debug!(
            step = self.current_step,
            field,
            option = option_id,
            selected,
            "multi choice toggled"
        );
        Ok(selected)
    }

    /// Stores raw numeric or contact input without trimming or coercion.
    pub fn set_text(
        &mut self,
        schema: &StepSchema,
        field: &str,
        value: &str,
    ) -> Result<(), WizardError> {
        self.writable_step(schema, field, "set_text", |kind| !kind.is_choice())?;
        *self.slot(field)? = AnswerValue::Text(value.to_string());
        tracing::debug!(step = self.current_step, field, "text set");
        Ok(())
    }

    /// Evaluates the current step only; earlier steps are never re-checked.
    pub fn validate_current(&self, schema: &StepSchema) -> Result<StepValidation, WizardError> {
        let step = schema.step(self.current_step)?;
        Ok(ValidationPolicy.evaluate(step, &self.answers))
    }

    pub fn can_advance(&self, schema: &StepSchema) -> bool {
        !self.completed
            && schema
                .step(self.current_step)
                .is_ok_and(|step| ValidationPolicy.is_complete(step, &self.answers))
    }

    pub fn advance(&mut self, schema: &StepSchema) -> Result<Advance, WizardError> {
        if self.completed {
            return Err(WizardError::Completed);
        }
        let validation = self.validate_current(schema)?;
        if !validation.valid {
            tracing::debug!(step = self.current_step, %validation, "advance blocked");
            return Err(WizardError::Validation(validation));
        }

        if self.current_step == schema.last_index() {
            self.completed = true;
            tracing::info!(step = self.current_step, locale = %self.locale, "questionnaire completed");
            return Ok(Advance::Completed);
        }
        self.current_step += 1;
        tracing::debug!(step = self.current_step, "advanced");
        Ok(Advance::Moved(self.current_step))
    }

    /// Steps back once, staying at 0 on the first step.
    pub fn retreat(&mut self) -> Result<usize, WizardError> {
        if self.completed {
            return Err(WizardError::Completed);
        }
        self.current_step = self.current_step.saturating_sub(1);
        tracing::debug!(step = self.current_step, "retreated");
        Ok(self.current_step)
    }

    pub fn switch_locale(&mut self, catalog: &LocaleCatalog, code: &str) -> Result<(), WizardError> {
        if !catalog.contains(code) {
            tracing::warn!(locale = code, "rejected switch to unknown locale");
            return Err(WizardError::UnknownLocale(code.to_string()));
        }
        self.locale = code.to_string();
        tracing::debug!(step = self.current_step, locale = code, "locale switched");
        Ok(())
    }

    /// Back to the initial lifecycle, keeping the selected locale.
    pub fn reset(&mut self, schema: &StepSchema) {
        self.current_step = 0;
        self.answers = AnswerRecord::defaults_for(schema);
        self.completed = false;
        tracing::debug!(locale = %self.locale, "questionnaire reset");
    }

    fn writable_step<'s>(
        &self,
        schema: &'s StepSchema,
        field: &str,
        operation: &'static str,
        accepts: impl Fn(StepKind) -> bool,
    ) -> Result<&'s StepSpec, WizardError> {
        if self.completed {
            return Err(WizardError::Completed);
        }
        let step = schema
            .step_for_field(field)
            .ok_or_else(|| WizardError::UnknownField(field.to_string()))?;
        if !accepts(step.kind) {
            return Err(WizardError::FieldKindMismatch {
                field: field.to_string(),
                kind: step.kind,
                operation,
            });
        }
        Ok(step)
    }

    fn slot(&mut self, field: &str) -> Result<&mut AnswerValue, WizardError> {
        self.answers
            .get_mut(field)
            .ok_or_else(|| WizardError::UnknownField(field.to_string()))
    }
}

fn unknown_option(field: &str, option: &str) -> WizardError {
    WizardError::UnknownOption {
        field: field.to_string(),
        option: option.to_string(),
    }
}
