pub mod check;
pub mod locale;
pub mod locales;
pub mod run;
pub mod schema;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use questionnaire_core::{Questionnaire, WizardConfig};

/// Config, validated questionnaire and start locale shared by the commands.
#[derive(Debug)]
pub struct AppContext {
    pub config: WizardConfig,
    pub config_path: Option<PathBuf>,
    pub questionnaire: Questionnaire,
    pub locale: String,
}

impl AppContext {
    pub fn load(config_path: Option<&Path>, cli_locale: Option<&str>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => Some(path.to_path_buf()),
            None => WizardConfig::default_path().filter(|path| path.is_file()),
        };
        let config = match &config_path {
            Some(path) => WizardConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => WizardConfig::default(),
        };
        let questionnaire = config
            .build()
            .context("questionnaire configuration is invalid")?;
        let locale = locale::select_locale(questionnaire.catalog(), cli_locale);
        tracing::debug!(locale = %locale, "selected start locale");
        Ok(Self {
            config,
            config_path,
            questionnaire,
            locale,
        })
    }
}
