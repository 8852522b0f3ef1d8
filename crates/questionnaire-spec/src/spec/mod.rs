pub mod microcement;
pub mod schema;
pub mod step;

pub use schema::{StepSchema, StepSchemaDoc};
pub use step::{InputSpec, InputType, OptionSpec, StepKind, StepSpec};
