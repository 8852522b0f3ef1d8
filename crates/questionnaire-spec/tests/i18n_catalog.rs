use std::collections::BTreeMap;
use std::fs;

use questionnaire_spec::{
    CHROME_KEYS, LocaleCatalog, LocaleTable, SpecError, StepSchema, required_keys,
};

fn english_table() -> LocaleTable {
    serde_json::from_str(include_str!("../i18n/en.json")).expect("parse en.json")
}

#[test]
fn builtin_catalog_declares_three_locales() {
    let schema = StepSchema::microcement();
    let catalog = LocaleCatalog::builtin(&schema).expect("builtin catalogs are complete");
    assert_eq!(catalog.default_locale(), "en");
    assert_eq!(catalog.available_locales(), vec!["de", "en", "hr"]);
}

#[test]
fn builtin_catalogs_define_every_required_key() {
    let schema = StepSchema::microcement();
    let catalog = LocaleCatalog::builtin(&schema).unwrap();
    for locale in catalog.available_locales() {
        for key in CHROME_KEYS {
            assert!(catalog.try_resolve(locale, key).is_some(), "{locale} lacks {key}");
        }
    }
    assert!(required_keys(&schema).len() > CHROME_KEYS.len() + schema.step_count());
}

#[test]
fn resolve_uses_requested_locale() {
    let schema = StepSchema::microcement();
    let catalog = LocaleCatalog::builtin(&schema).unwrap();
    assert_eq!(catalog.resolve("hr", "nav.next"), "Dalje");
    assert_eq!(catalog.resolve("de", "nav.submit"), "Absenden");
    assert_eq!(catalog.option_label("hr", "space", "Floor"), "Pod");
    assert_eq!(catalog.option_label("en", "surface", "OSB Boards"), "OSB Boards");
}

#[test]
fn unknown_locale_falls_back_to_default() {
    let schema = StepSchema::microcement();
    let catalog = LocaleCatalog::builtin(&schema).unwrap();
    assert_eq!(catalog.resolve("xx", "form.title"), "Microcement Questionnaire");
    assert_eq!(catalog.option_label("xx", "userType", "Contractor"), "Contractor");
}

#[test]
fn unvalidated_key_resolves_to_itself() {
    let schema = StepSchema::microcement();
    let catalog = LocaleCatalog::builtin(&schema).unwrap();
    assert_eq!(catalog.try_resolve("en", "not.a.key"), None);
    assert_eq!(catalog.resolve("en", "not.a.key"), "not.a.key");
}

#[test]
fn missing_string_key_is_catalog_incomplete() {
    let schema = StepSchema::microcement();
    let mut broken = english_table();
    broken.strings.remove("step.area.question");
    let tables = BTreeMap::from([("en".to_string(), english_table()), ("fr".to_string(), broken)]);

    let err = LocaleCatalog::new("en", tables, &schema).unwrap_err();
    match err {
        SpecError::CatalogIncomplete { locale, key } => {
            assert_eq!(locale, "fr");
            assert_eq!(key, "step.area.question");
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn missing_option_label_is_catalog_incomplete() {
    let schema = StepSchema::microcement();
    let mut broken = english_table();
    broken.options.get_mut("space").unwrap().remove("Pool");
    let tables = BTreeMap::from([("en".to_string(), broken)]);

    let err = LocaleCatalog::new("en", tables, &schema).unwrap_err();
    assert!(err.to_string().contains("options.space.Pool"));
}

#[test]
fn undeclared_default_locale_is_rejected() {
    let schema = StepSchema::microcement();
    let tables = BTreeMap::from([("en".to_string(), english_table())]);
    let err = LocaleCatalog::new("de", tables, &schema).unwrap_err();
    assert!(matches!(err, SpecError::UnknownDefaultLocale(locale) if locale == "de"));
}

#[test]
fn negotiate_maps_os_tags_onto_declared_locales() {
    let schema = StepSchema::microcement();
    let catalog = LocaleCatalog::builtin(&schema).unwrap();
    assert_eq!(catalog.negotiate("hr_HR.UTF-8").as_deref(), Some("hr"));
    assert_eq!(catalog.negotiate("de-AT").as_deref(), Some("de"));
    assert_eq!(catalog.negotiate("EN").as_deref(), Some("en"));
    assert_eq!(catalog.negotiate("ja_JP").as_deref(), None);
}

#[test]
fn negotiate_first_skips_undeclared_candidates() {
    let schema = StepSchema::microcement();
    let catalog = LocaleCatalog::builtin(&schema).unwrap();
    let picked = catalog.negotiate_first(["", "ja_JP.UTF-8", "hr_HR@euro", "de"]);
    assert_eq!(picked.as_deref(), Some("hr"));
    assert_eq!(catalog.negotiate_first(["C", "ja"]), None);
}

#[test]
fn check_rejects_catalog_built_for_another_schema() {
    let catalog = LocaleCatalog::builtin(&StepSchema::microcement()).unwrap();
    let budget = StepSchema::from_json_str(
        r#"{
        "form_id": "budget",
        "version": "0.1.0",
        "steps": [
            { "id": 0, "field": "budget", "kind": "numeric", "question_key": "step.budget.question",
              "inputs": [ { "field": "budget", "type": "number", "placeholder_key": "input.budget.placeholder" } ] }
        ]
    }"#,
    )
    .unwrap();

    assert!(catalog.check(&StepSchema::microcement()).is_ok());
    let err = catalog.check(&budget).unwrap_err();
    assert!(
        matches!(err, SpecError::CatalogIncomplete { ref key, .. } if key == "step.budget.question"),
        "unexpected error {err}"
    );
}

#[test]
fn from_dir_loads_one_table_per_json_file() {
    let schema = StepSchema::microcement();
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join("en.json"), include_str!("../i18n/en.json")).unwrap();
    fs::write(dir.path().join("hr.json"), include_str!("../i18n/hr.json")).unwrap();
    fs::write(dir.path().join("README.md"), "ignored").unwrap();

    let catalog = LocaleCatalog::from_dir(dir.path(), "hr", &schema).expect("catalog loads");
    assert_eq!(catalog.available_locales(), vec!["en", "hr"]);
    assert_eq!(catalog.default_locale(), "hr");
    assert_eq!(catalog.resolve("xx", "nav.back"), "Natrag");
}

#[test]
fn from_dir_reports_unparsable_tables() {
    let schema = StepSchema::microcement();
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join("en.json"), "{ not json").unwrap();
    let err = LocaleCatalog::from_dir(dir.path(), "en", &schema).unwrap_err();
    assert!(matches!(err, SpecError::CatalogParse { locale, .. } if locale == "en"));
}
