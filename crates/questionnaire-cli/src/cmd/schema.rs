use anyhow::Result;
use clap::Args;
use questionnaire_spec::{LocaleTable, StepSchemaDoc};
use schemars::schema_for;

#[derive(Args, Debug, Clone)]
pub struct SchemaArgs {
    /// Print the schema of a locale table instead of the step schema
    #[arg(long = "catalog")]
    pub catalog: bool,
}

pub fn run(args: &SchemaArgs) -> Result<()> {
    let schema = if args.catalog {
        schema_for!(LocaleTable)
    } else {
        schema_for!(StepSchemaDoc)
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
