use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use questionnaire_spec::{
    DEFAULT_LOCALE, LocaleCatalog, SpecError, StepSchema, builtin_tables,
};
use serde::{Deserialize, Serialize};

use crate::error::WizardError;
use crate::questionnaire::Questionnaire;

pub const CONFIG_FILE_NAME: &str = "questionnaire.toml";

/// On-disk wizard configuration.
///
/// ```toml
/// form_id = "microcement"
/// default_locale = "hr"
/// locales_dir = "i18n"
/// schema = "schema.json"
/// submissions = "submissions.jsonl"
/// ```
///
/// Every key is optional. Relative paths resolve against the directory of the
/// file the config was loaded from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WizardConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locales_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submissions: Option<PathBuf>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl WizardConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, WizardError> {
        toml::from_str(raw).map_err(|err| WizardError::Config(err.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, WizardError> {
        let raw = fs::read_to_string(path).map_err(|source| SpecError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&raw)
            .map_err(|err| WizardError::Config(format!("{}: {err}", path.display())))?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        tracing::debug!(path = %path.display(), "loaded wizard config");
        Ok(config)
    }

    /// `questionnaire.toml` in the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "questionnaire")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    pub fn submissions_path(&self) -> Option<PathBuf> {
        self.submissions.as_deref().map(|path| self.resolve_path(path))
    }

    /// Loads and validates the schema and catalogs this config points at.
    pub fn build(&self) -> Result<Questionnaire, WizardError> {
        let mut schema = match &self.schema {
            Some(path) => {
                let path = self.resolve_path(path);
                let raw = fs::read_to_string(&path).map_err(|source| SpecError::Io {
                    path: path.clone(),
                    source,
                })?;
                StepSchema::from_json_str(&raw)?
            }
            None => StepSchema::microcement(),
        };
        if let Some(form_id) = &self.form_id {
            schema = schema.with_form_id(form_id.clone());
        }

        let default_locale = self.default_locale.as_deref().unwrap_or(DEFAULT_LOCALE);
        let catalog = match &self.locales_dir {
            Some(dir) => LocaleCatalog::from_dir(&self.resolve_path(dir), default_locale, &schema)?,
            None => LocaleCatalog::new(default_locale, builtin_tables()?, &schema)?,
        };
        tracing::debug!(
            form_id = schema.form_id(),
            steps = schema.step_count(),
            default_locale,
            "questionnaire built from config"
        );
        Questionnaire::new(schema, catalog)
    }
}
