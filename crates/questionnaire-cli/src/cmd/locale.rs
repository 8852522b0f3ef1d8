use std::env;

use questionnaire_spec::LocaleCatalog;

const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// Start locale: `--locale`, then the environment, then the OS, then the catalog default.
pub fn select_locale(catalog: &LocaleCatalog, cli_locale: Option<&str>) -> String {
    if let Some(cli) = cli_locale {
        if let Some(found) = catalog.negotiate(cli) {
            return found;
        }
        tracing::warn!(locale = cli, "requested locale is not available");
    }
    // Only the first non-empty variable counts, as with setlocale.
    let env_locale = LOCALE_VARS
        .iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.trim().is_empty());
    let system_locale = sys_locale::get_locale();
    catalog
        .negotiate_first(env_locale.iter().chain(system_locale.iter()).map(String::as_str))
        .unwrap_or_else(|| catalog.default_locale().to_string())
}
