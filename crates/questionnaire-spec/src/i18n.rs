use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::error::SpecError;
use crate::spec::schema::StepSchema;

/// Page chrome keys every locale must define.
pub const CHROME_KEYS: &[&str] = &[
    "form.title",
    "form.subtitle",
    "form.greeting",
    "form.submitted",
    "form.area_unit",
    "nav.back",
    "nav.next",
    "nav.submit",
];

pub const DEFAULT_LOCALE: &str = "en";

const BUILTIN_CATALOGS: &[(&str, &str)] = &[
    ("de", include_str!("../i18n/de.json")),
    ("en", include_str!("../i18n/en.json")),
    ("hr", include_str!("../i18n/hr.json")),
];

/// Texts of one locale: plain strings plus option labels grouped by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LocaleTable {
    #[serde(default)]
    pub strings: BTreeMap<String, String>,
    #[serde(default)]
    pub options: BTreeMap<String, BTreeMap<String, String>>,
}

impl LocaleTable {
    pub fn from_json_str(locale: &str, raw: &str) -> Result<Self, SpecError> {
        serde_json::from_str(raw).map_err(|source| SpecError::CatalogParse {
            locale: locale.to_string(),
            source,
        })
    }

    fn option_label(&self, field: &str, option_id: &str) -> Option<&str> {
        self.options
            .get(field)
            .and_then(|labels| labels.get(option_id))
            .map(String::as_str)
    }
}

/// A key the catalog must resolve for every declared locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequiredKey {
    Text(String),
    OptionLabel { field: String, option: String },
}

impl std::fmt::Display for RequiredKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequiredKey::Text(key) => f.write_str(key),
            RequiredKey::OptionLabel { field, option } => {
                write!(f, "options.{}.{}", field, option)
            }
        }
    }
}

/// Every key `schema` needs at render time.
pub fn required_keys(schema: &StepSchema) -> Vec<RequiredKey> {
    let mut keys: Vec<RequiredKey> = CHROME_KEYS
        .iter()
        .map(|key| RequiredKey::Text((*key).to_string()))
        .collect();
    for step in schema.steps() {
        keys.push(RequiredKey::Text(step.question_key.clone()));
        keys.extend(
            step.inputs
                .iter()
                .map(|input| RequiredKey::Text(input.placeholder_key.clone())),
        );
        keys.extend(step.option_keys().map(|option| RequiredKey::OptionLabel {
            field: step.field.clone(),
            option: option.to_string(),
        }));
    }
    keys
}

/// Immutable locale → text mapping, complete for the schema it was built against.
#[derive(Debug, Clone)]
pub struct LocaleCatalog {
    default_locale: String,
    tables: BTreeMap<String, LocaleTable>,
}

impl LocaleCatalog {
    pub fn new(
        default_locale: impl Into<String>,
        tables: BTreeMap<String, LocaleTable>,
        schema: &StepSchema,
    ) -> Result<Self, SpecError> {
        let default_locale = default_locale.into();
        if !tables.contains_key(&default_locale) {
            return Err(SpecError::UnknownDefaultLocale(default_locale));
        }

        let catalog = Self {
            default_locale,
            tables,
        };
        catalog.check(schema)?;
        Ok(catalog)
    }

    /// Fails with `CatalogIncomplete` unless every locale defines every key `schema` needs.
    pub fn check(&self, schema: &StepSchema) -> Result<(), SpecError> {
        let required = required_keys(schema);
        for (locale, table) in &self.tables {
            if let Some(missing) = required.iter().find(|key| !defines(table, key)) {
                return Err(SpecError::CatalogIncomplete {
                    locale: locale.clone(),
                    key: missing.to_string(),
                });
            }
        }
        tracing::debug!(
            default_locale = %self.default_locale,
            form_id = schema.form_id(),
            locales = self.tables.len(),
            keys = required.len(),
            "locale catalog validated"
        );
        Ok(())
    }

    /// Embedded catalogs shipped with the crate (`de`, `en`, `hr`).
    pub fn builtin(schema: &StepSchema) -> Result<Self, SpecError> {
        Self::new(DEFAULT_LOCALE, builtin_tables()?, schema)
    }

    /// Loads one `<locale>.json` table per file in `dir`.
    pub fn from_dir(
        dir: &Path,
        default_locale: impl Into<String>,
        schema: &StepSchema,
    ) -> Result<Self, SpecError> {
        let io_err = |source| SpecError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut tables = BTreeMap::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(locale) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let raw = fs::read_to_string(&path).map_err(|source| SpecError::Io {
                path: path.clone(),
                source,
            })?;
            tables.insert(locale.to_string(), LocaleTable::from_json_str(locale, &raw)?);
        }
        Self::new(default_locale, tables, schema)
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Locale codes accepted by locale switches, sorted.
    pub fn available_locales(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, locale: &str) -> bool {
        self.tables.contains_key(locale)
    }

    /// Looks `key` up in `locale`, then in the default locale.
    pub fn try_resolve(&self, locale: &str, key: &str) -> Option<&str> {
        self.lookup(locale, |table| table.strings.get(key).map(String::as_str))
    }

    /// Text for `key`; keys outside the validated set fall back to the key itself.
    pub fn resolve<'a>(&'a self, locale: &str, key: &'a str) -> &'a str {
        match self.try_resolve(locale, key) {
            Some(text) => text,
            None => {
                tracing::warn!(locale, key, "no catalog text for key");
                key
            }
        }
    }

    pub fn option_label<'a>(&'a self, locale: &str, field: &str, option_id: &'a str) -> &'a str {
        match self.lookup(locale, |table| table.option_label(field, option_id)) {
            Some(label) => label,
            None => {
                tracing::warn!(locale, field, option_id, "no catalog label for option");
                option_id
            }
        }
    }

    /// Maps a raw user or OS tag onto a declared locale.
    pub fn negotiate(&self, raw: &str) -> Option<String> {
        let norm = normalize_locale(raw)?;
        if let Some(found) = self
            .tables
            .keys()
            .find(|locale| locale.eq_ignore_ascii_case(&norm))
        {
            return Some(found.clone());
        }
        let base = norm.split('-').next()?.to_ascii_lowercase();
        self.tables.keys().find(|locale| **locale == base).cloned()
    }

    /// First candidate tag that maps onto a declared locale.
    pub fn negotiate_first<'a>(
        &self,
        candidates: impl IntoIterator<Item = &'a str>,
    ) -> Option<String> {
        candidates
            .into_iter()
            .find_map(|candidate| self.negotiate(candidate))
    }

    fn lookup<'a, F>(&'a self, locale: &str, get: F) -> Option<&'a str>
    where
        F: Fn(&'a LocaleTable) -> Option<&'a str>,
    {
        let requested = self.tables.get(locale).and_then(&get);
        requested.or_else(|| self.tables.get(&self.default_locale).and_then(&get))
    }
}

/// Parses the embedded locale tables without validating them.
pub fn builtin_tables() -> Result<BTreeMap<String, LocaleTable>, SpecError> {
    let mut tables = BTreeMap::new();
    for (locale, raw) in BUILTIN_CATALOGS {
        tables.insert(locale.to_string(), LocaleTable::from_json_str(locale, raw)?);
    }
    Ok(tables)
}

fn defines(table: &LocaleTable, key: &RequiredKey) -> bool {
    match key {
        RequiredKey::Text(key) => table.strings.contains_key(key),
        RequiredKey::OptionLabel { field, option } => table.option_label(field, option).is_some(),
    }
}

/// Canonical BCP-47 form of a raw tag such as `hr_HR.UTF-8`.
pub fn normalize_locale(raw: &str) -> Option<String> {
    let mut cleaned = raw.trim();
    if cleaned.is_empty() {
        return None;
    }
    if let Some((head, _)) = cleaned.split_once('.') {
        cleaned = head;
    }
    if let Some((head, _)) = cleaned.split_once('@') {
        cleaned = head;
    }
    let cleaned = cleaned.replace('_', "-");
    cleaned
        .parse::<LanguageIdentifier>()
        .ok()
        .map(|lid| lid.to_string())
}
