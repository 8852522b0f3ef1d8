#![allow(missing_docs)]

pub mod config;
pub mod controller;
pub mod error;
pub mod questionnaire;
pub mod session;
pub mod sink;
pub mod state;

pub use config::{CONFIG_FILE_NAME, WizardConfig};
pub use controller::{ViewInput, ViewOption, WizardController, WizardView};
pub use error::WizardError;
pub use questionnaire::Questionnaire;
pub use session::{SessionId, SessionStore};
pub use sink::{JsonLinesSink, MemorySink, SubmissionAck, SubmissionSink, TracingSink};
pub use state::{Advance, WizardState};

pub use questionnaire_spec as spec;
