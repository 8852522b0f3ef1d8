use anyhow::Result;
use questionnaire_spec::required_keys;

use super::AppContext;

/// Reaching this point means schema and catalogs loaded and validated.
pub fn run(ctx: &AppContext) -> Result<()> {
    let schema = ctx.questionnaire.schema();
    let catalog = ctx.questionnaire.catalog();
    match &ctx.config_path {
        Some(path) => println!("config: {}", path.display()),
        None => println!("config: built-in defaults"),
    }
    println!(
        "form: {} {} ({} steps)",
        schema.form_id(),
        schema.version(),
        schema.step_count()
    );
    println!(
        "locales: {} (default {})",
        catalog.available_locales().join(", "),
        catalog.default_locale()
    );
    println!("keys per locale: {}", required_keys(schema).len());
    if let Some(path) = ctx.config.submissions_path() {
        println!("submissions: {}", path.display());
    }
    println!("ok");
    Ok(())
}
