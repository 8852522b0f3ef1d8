#![allow(missing_docs)]

pub mod answers;
pub mod error;
pub mod i18n;
pub mod spec;
pub mod validate;

pub use answers::{AnswerRecord, AnswerValue, Meta, Submission};
pub use error::SpecError;
pub use i18n::{
    CHROME_KEYS, DEFAULT_LOCALE, LocaleCatalog, LocaleTable, RequiredKey, builtin_tables,
    normalize_locale, required_keys,
};
pub use spec::{
    InputSpec, InputType, OptionSpec, StepKind, StepSchema, StepSchemaDoc, StepSpec,
};
pub use validate::{FieldError, StepValidation, ValidationPolicy, validate_step};
