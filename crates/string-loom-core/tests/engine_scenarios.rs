//! Engine operation scenario tests for string-loom-core.
// crates/string-loom-core/tests/engine_scenarios.rs
// =============================================================================
// Module: Engine Scenario Tests
// Description: Concrete behavior checks for the four catalog operations.
// Purpose: Pin the template, merge, context, and coverage contracts.
// =============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::collections::BTreeMap;

use serde_json::json;
use string_loom_core::Catalog;
use string_loom_core::CatalogEntry;
use string_loom_core::CatalogError;
use string_loom_core::CoverageStatus;
use string_loom_core::LanguageCoverage;
use string_loom_core::LocalizedValue;
use string_loom_core::MergeValue;
use string_loom_core::extract_context;
use string_loom_core::generate_template;
use string_loom_core::is_translated;
use string_loom_core::merge_translations;
use string_loom_core::missing_keys;
use string_loom_core::verify_coverage;

type TestResult = Result<(), String>;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn catalog_from(tree: serde_json::Value) -> Result<Catalog, String> {
    Catalog::from_json(&tree).map_err(|err| err.to_string())
}

fn plain_entry(text: &str) -> serde_json::Value {
    json!({
        "localizations": {
            "en": {"stringUnit": {"state": "translated", "value": text}}
        }
    })
}

fn merge_input(pairs: &[(&str, serde_json::Value)]) -> BTreeMap<String, MergeValue> {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), MergeValue::from_json(value)))
        .collect()
}

// ============================================================================
// SECTION: Template Generation
// ============================================================================

#[test]
fn template_blanks_english_unit_for_target_language() -> TestResult {
    let catalog = catalog_from(json!({"strings": {"Save": plain_entry("Save")}}))?;
    let template = generate_template(&catalog, "ru");
    let value = template.get("Save").ok_or("template must include Save")?;
    if value.to_json() != json!({"stringUnit": {"state": "translated", "value": ""}}) {
        return Err(format!("unexpected template value: {:?}", value.to_json()));
    }
    Ok(())
}

#[test]
fn template_skips_keys_already_localized() -> TestResult {
    let catalog = catalog_from(json!({"strings": {
        "Save": {
            "localizations": {
                "en": {"stringUnit": {"state": "translated", "value": "Save"}},
                "ru": {"stringUnit": {"state": "translated", "value": "Сохранить"}}
            }
        },
        "Cancel": plain_entry("Cancel")
    }}))?;
    let template = generate_template(&catalog, "ru");
    if template.contains_key("Save") {
        return Err("already-localized key must be skipped".to_string());
    }
    if !template.contains_key("Cancel") {
        return Err("missing key must be templated".to_string());
    }
    Ok(())
}

#[test]
fn template_synthesizes_plural_for_integer_placeholder_key() -> TestResult {
    let catalog = catalog_from(json!({"strings": {"%d items": {}}}))?;

    let context = extract_context(&catalog);
    let entry = context.get("%d items").ok_or("context must include the key")?;
    if entry.needs_plural != Some(true) {
        return Err("integer placeholder must set needs_plural".to_string());
    }

    let template = generate_template(&catalog, "pl");
    let value = template.get("%d items").ok_or("template must include the key")?;
    let expected_unit = json!({"stringUnit": {"state": "translated", "value": ""}});
    let expected = json!({"variations": {"plural": {
        "few": expected_unit.clone(),
        "many": expected_unit.clone(),
        "one": expected_unit.clone(),
        "other": expected_unit
    }}});
    if value.to_json() != expected {
        return Err(format!("unexpected plural scaffold: {:?}", value.to_json()));
    }
    Ok(())
}

#[test]
fn template_rekeys_nested_substitution_plural() -> TestResult {
    let catalog = catalog_from(json!({"strings": {"event.count": {
        "localizations": {"en": {
            "stringUnit": {"state": "translated", "value": "%1$#@count@ scheduled"},
            "substitutions": {"count": {
                "argNum": 1,
                "formatSpecifier": "ld",
                "variations": {"plural": {
                    "one": {"stringUnit": {"state": "translated", "value": "%arg event"}},
                    "other": {"stringUnit": {"state": "translated", "value": "%arg events"}}
                }}
            }}
        }}
    }}}))?;

    let template = generate_template(&catalog, "ru");
    let value = template.get("event.count").ok_or("template must include the key")?;
    let tree = value.to_json();
    let plural = tree
        .pointer("/substitutions/count/variations/plural")
        .and_then(serde_json::Value::as_object)
        .ok_or("nested plural must survive the walk")?;
    let categories: Vec<&str> = plural.keys().map(String::as_str).collect();
    if categories != ["few", "many", "one", "other"] {
        return Err(format!("unexpected categories: {categories:?}"));
    }
    for member in plural.values() {
        if member != &json!({"stringUnit": {"state": "translated", "value": ""}}) {
            return Err(format!("plural member must be blanked: {member:?}"));
        }
    }
    let arg_num = tree.pointer("/substitutions/count/argNum");
    if arg_num != Some(&json!(1)) {
        return Err("numeric metadata must pass through untouched".to_string());
    }
    Ok(())
}

#[test]
fn template_uses_default_categories_for_unknown_language() -> TestResult {
    let catalog = catalog_from(json!({"strings": {"%lld files": {}}}))?;
    let template = generate_template(&catalog, "tlh");
    let value = template.get("%lld files").ok_or("template must include the key")?;
    let plural = value
        .to_json()
        .pointer("/variations/plural")
        .and_then(serde_json::Value::as_object)
        .map(|members| members.keys().cloned().collect::<Vec<_>>())
        .ok_or("fallback must synthesize a plural container")?;
    if plural != ["one", "other"] {
        return Err(format!("unknown languages must fall back to one/other: {plural:?}"));
    }
    Ok(())
}

// ============================================================================
// SECTION: Merge
// ============================================================================

#[test]
fn merge_plain_string_wraps_as_translated_unit() -> TestResult {
    let mut catalog = catalog_from(json!({"strings": {"Save": plain_entry("Save")}}))?;
    let translations = merge_input(&[("Save", json!("Сохранить"))]);

    let report = merge_translations(&mut catalog, "ru", &translations, false);
    if report.added != 1 {
        return Err(format!("expected added == 1, got {}", report.added));
    }
    let stored = catalog
        .strings
        .get("Save")
        .and_then(|entry| entry.localizations.get("ru"))
        .ok_or("merged value must be stored")?;
    if stored.to_json() != json!({"stringUnit": {"state": "translated", "value": "Сохранить"}}) {
        return Err(format!("unexpected stored value: {:?}", stored.to_json()));
    }
    Ok(())
}

#[test]
fn merge_stores_structured_values_verbatim() -> TestResult {
    let mut catalog = catalog_from(json!({"strings": {"event.inDays": plain_entry("In %d days")}}))?;
    let structured = json!({"variations": {"plural": {
        "one": {"stringUnit": {"state": "translated", "value": "Через %lld день"}},
        "few": {"stringUnit": {"state": "translated", "value": "Через %lld дня"}},
        "many": {"stringUnit": {"state": "translated", "value": "Через %lld дней"}},
        "other": {"stringUnit": {"state": "translated", "value": "Через %lld дней"}}
    }}});
    let translations = merge_input(&[("event.inDays", structured.clone())]);

    let report = merge_translations(&mut catalog, "ru", &translations, false);
    if report.added != 1 {
        return Err(format!("expected added == 1, got {}", report.added));
    }
    let stored = catalog
        .strings
        .get("event.inDays")
        .and_then(|entry| entry.localizations.get("ru"))
        .ok_or("merged value must be stored")?;
    if stored.to_json() != structured {
        return Err("structured values must be stored verbatim".to_string());
    }
    Ok(())
}

#[test]
fn merge_counts_conserve_across_outcomes() -> TestResult {
    let mut catalog = catalog_from(json!({"strings": {
        "Save": plain_entry("Save"),
        "Cancel": {
            "localizations": {
                "ru": {"stringUnit": {"state": "translated", "value": "Отмена"}}
            }
        }
    }}))?;
    let translations = merge_input(&[
        ("Save", json!("Сохранить")),
        ("Cancel", json!("Отменить")),
        ("Ghost", json!("Призрак")),
    ]);

    let report = merge_translations(&mut catalog, "ru", &translations, false);
    let processed =
        report.added + report.overwritten + report.skipped_exists + report.skipped_missing;
    if processed != translations.len() {
        return Err(format!("counts must conserve: {report:?}"));
    }
    if (report.added, report.skipped_exists, report.skipped_missing) != (1, 1, 1) {
        return Err(format!("unexpected outcome split: {report:?}"));
    }
    if report.missing_keys != ["Ghost"] {
        return Err(format!("unexpected missing keys: {:?}", report.missing_keys));
    }
    Ok(())
}

#[test]
fn merge_without_overwrite_never_mutates_existing_pairs() -> TestResult {
    let mut catalog = catalog_from(json!({"strings": {"Cancel": {
        "localizations": {"ru": {"stringUnit": {"state": "needs_review", "value": "Отмена"}}}
    }}}))?;
    let before = catalog
        .strings
        .get("Cancel")
        .and_then(|entry| entry.localizations.get("ru"))
        .cloned()
        .ok_or("fixture must carry a ru value")?;
    let translations = merge_input(&[("Cancel", json!("Отменить"))]);

    let report = merge_translations(&mut catalog, "ru", &translations, false);
    if report.skipped_exists != 1 {
        return Err(format!("expected skipped_exists == 1, got {report:?}"));
    }
    let after = catalog
        .strings
        .get("Cancel")
        .and_then(|entry| entry.localizations.get("ru"))
        .ok_or("value must remain present")?;
    if *after != before {
        return Err("existing pair must not change without overwrite".to_string());
    }

    let report = merge_translations(&mut catalog, "ru", &translations, true);
    if report.overwritten != 1 {
        return Err(format!("expected overwritten == 1, got {report:?}"));
    }
    Ok(())
}

// ============================================================================
// SECTION: Context Extraction
// ============================================================================

#[test]
fn context_resolves_english_text_and_comment() -> TestResult {
    let catalog = catalog_from(json!({"strings": {
        "Save": {
            "comment": "Toolbar action",
            "localizations": {
                "en": {"stringUnit": {"state": "translated", "value": "Save"}}
            }
        },
        "welcome.title": {}
    }}))?;

    let context = extract_context(&catalog);
    let save = context.get("Save").ok_or("context must include Save")?;
    if save.en != "Save" || save.comment.as_deref() != Some("Toolbar action") {
        return Err(format!("unexpected Save context: {save:?}"));
    }
    if save.needs_plural.is_some() {
        return Err("plain text must not set needs_plural".to_string());
    }

    let fallback = context.get("welcome.title").ok_or("context must include the key")?;
    if fallback.en != "welcome.title" {
        return Err("missing English localization must fall back to the key".to_string());
    }
    Ok(())
}

#[test]
fn context_detects_positional_and_long_specifiers() -> TestResult {
    let catalog = catalog_from(json!({"strings": {
        "a": plain_entry("%d items"),
        "b": plain_entry("%1$lld bytes"),
        "c": plain_entry("100% done"),
        "d": plain_entry("%@ items")
    }}))?;
    let context = extract_context(&catalog);
    let flags: Vec<Option<bool>> = ["a", "b", "c", "d"]
        .iter()
        .map(|key| context.get(*key).and_then(|entry| entry.needs_plural))
        .collect();
    if flags != [Some(true), Some(true), None, None] {
        return Err(format!("unexpected plural flags: {flags:?}"));
    }
    Ok(())
}

// ============================================================================
// SECTION: Coverage
// ============================================================================

#[test]
fn coverage_percent_truncates_and_applies_threshold() -> TestResult {
    let nine_of_ten = LanguageCoverage::from_counts(9, 10);
    if nine_of_ten.percent != 90 || nine_of_ten.status != CoverageStatus::Warn {
        return Err(format!("unexpected 9/10 coverage: {nine_of_ten:?}"));
    }
    let full = LanguageCoverage::from_counts(10, 10);
    if full.percent != 100 || full.status != CoverageStatus::Ok {
        return Err(format!("unexpected 10/10 coverage: {full:?}"));
    }
    let boundary = LanguageCoverage::from_counts(99, 100);
    if boundary.percent != 99 || boundary.status != CoverageStatus::Ok {
        return Err(format!("99 percent must report OK: {boundary:?}"));
    }
    let below = LanguageCoverage::from_counts(989, 1000);
    if below.percent != 98 || below.status != CoverageStatus::Warn {
        return Err(format!("98.9 percent must truncate to 98 WARN: {below:?}"));
    }
    let empty = LanguageCoverage::from_counts(0, 0);
    if empty.percent != 0 {
        return Err("empty catalog must report zero percent".to_string());
    }
    Ok(())
}

#[test]
fn coverage_counts_presence_not_text_content() -> TestResult {
    let catalog = catalog_from(json!({"strings": {"Save": {
        "localizations": {"ru": {"stringUnit": {"state": "translated", "value": ""}}}
    }}}))?;
    let value = catalog
        .strings
        .get("Save")
        .and_then(|entry| entry.localizations.get("ru"))
        .ok_or("fixture must carry a ru value")?;
    if !is_translated(value) {
        return Err("an empty-text unit still counts as a translation attempt".to_string());
    }
    let coverage = verify_coverage(&catalog);
    let ru = coverage.get("ru").ok_or("coverage must report ru")?;
    if ru.translated != 1 {
        return Err(format!("unexpected ru coverage: {ru:?}"));
    }
    Ok(())
}

#[test]
fn coverage_reports_every_language_and_missing_keys_sorted() -> TestResult {
    let mut strings = BTreeMap::new();
    for key in ["b", "a", "c"] {
        let mut entry = CatalogEntry::default();
        entry.localizations.insert("de".to_string(), LocalizedValue::translated_unit(key));
        strings.insert(key.to_string(), entry);
    }
    if let Some(entry) = strings.get_mut("b") {
        entry.localizations.insert("ru".to_string(), LocalizedValue::translated_unit("б"));
    }
    let catalog = Catalog {
        strings,
        ..Catalog::default()
    };

    let coverage = verify_coverage(&catalog);
    let de = coverage.get("de").ok_or("coverage must report de")?;
    let ru = coverage.get("ru").ok_or("coverage must report ru")?;
    if de.translated != 3 || ru.translated != 1 || ru.total != 3 {
        return Err(format!("unexpected coverage: de {de:?}, ru {ru:?}"));
    }

    let missing = missing_keys(&catalog, "ru");
    if missing != ["a", "c"] {
        return Err(format!("missing keys must be sorted: {missing:?}"));
    }
    Ok(())
}

// ============================================================================
// SECTION: Structural Errors
// ============================================================================

#[test]
fn parse_rejects_catalog_without_strings_map() -> TestResult {
    match Catalog::parse_str("{}") {
        Err(CatalogError::MissingStrings) => Ok(()),
        other => Err(format!("expected MissingStrings, got {other:?}")),
    }
}

#[test]
fn parse_rejects_non_object_root() -> TestResult {
    match Catalog::parse_str("[]") {
        Err(CatalogError::RootNotObject) => Ok(()),
        other => Err(format!("expected RootNotObject, got {other:?}")),
    }
}
