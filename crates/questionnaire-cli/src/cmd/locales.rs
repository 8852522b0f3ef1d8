use anyhow::Result;

use super::AppContext;

pub fn run(ctx: &AppContext) -> Result<()> {
    let catalog = ctx.questionnaire.catalog();
    for locale in catalog.available_locales() {
        let marker = if locale == ctx.locale { "*" } else { " " };
        let title = catalog.resolve(locale, "form.title");
        if locale == catalog.default_locale() {
            println!("{marker} {locale}\t{title} (default)");
        } else {
            println!("{marker} {locale}\t{title}");
        }
    }
    Ok(())
}
