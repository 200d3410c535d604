//! Tests for settings module

use crate::graph::TraversalScope;
use crate::settings::*;
use std::path::{Path, PathBuf};

#[test]
fn test_settings_default_values() {
    let settings = Settings::default();

    assert_eq!(settings.data.dir, PathBuf::from("data"));
    assert_eq!(settings.logging.level, "info");
    assert_eq!(settings.scheme.grammar, GrammarKind::Indexed);
    assert_eq!(settings.traversal.scope, TraversalScope::FromFirst);
    assert!(settings.results.dir.as_os_str().is_empty());
    assert!(settings.validate().is_ok());
}

#[test]
fn test_settings_from_toml_overrides_sections() {
    let toml_str = r#"
        [data]
        dir = "plans"

        [scheme]
        grammar = "literal"

        [traversal]
        scope = "all"
    "#;

    let settings = Settings::from_toml(toml_str).expect("parse");

    assert_eq!(settings.data.dir, PathBuf::from("plans"));
    assert_eq!(settings.scheme.grammar, GrammarKind::Literal);
    assert_eq!(settings.traversal.scope, TraversalScope::AllNodes);
    // untouched sections keep their defaults
    assert_eq!(settings.logging.level, "info");
}

#[test]
fn test_settings_rejects_unknown_grammar() {
    let result = Settings::from_toml("[scheme]\ngrammar = \"arrows\"\n");

    assert!(matches!(result, Err(SettingsError::ParseError(_))));
}

#[test]
fn test_validate_rejects_bad_log_level() {
    let mut settings = Settings::default();
    settings.logging.level = "loud".to_string();

    let err = settings.validate().unwrap_err();

    assert!(err.to_string().contains("logging.level"));
}

#[test]
fn test_validate_rejects_empty_data_dir() {
    let mut settings = Settings::default();
    settings.data.dir = PathBuf::new();

    assert!(matches!(
        settings.validate(),
        Err(SettingsError::InvalidValue { key, .. }) if key == "data.dir"
    ));
}

#[test]
fn test_results_dir_falls_back_to_plan_dir() {
    let mut settings = Settings::default();

    assert_eq!(settings.results_dir(Path::new("data")), PathBuf::from("data"));

    settings.results.dir = PathBuf::from("out");
    assert_eq!(settings.results_dir(Path::new("data")), PathBuf::from("out"));
}

#[test]
fn test_load_from_path_reads_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("opgraph.toml");
    std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").expect("write");

    let settings = Settings::load_from_path(&path).expect("load");

    assert_eq!(settings.logging.level, "debug");
}

#[test]
fn test_load_from_missing_path_uses_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");

    let settings = Settings::load_from_path(dir.path().join("absent.toml")).expect("load");

    assert_eq!(settings.data.dir, PathBuf::from("data"));
}

#[test]
fn test_to_toml_round_trips_through_from_toml() {
    let mut settings = Settings::default();
    settings.scheme.grammar = GrammarKind::Literal;

    let text = settings.to_toml().expect("serialize");
    let parsed = Settings::from_toml(&text).expect("parse");

    assert!(text.contains("[scheme]"));
    assert_eq!(parsed.scheme.grammar, GrammarKind::Literal);
}

#[test]
fn test_grammar_kind_builds_scheme_grammar() {
    let ids = vec!["a".to_string(), "b".to_string()];

    assert_eq!(
        GrammarKind::Indexed.grammar(ids.clone()),
        crate::scheme::SchemeGrammar::Indexed { ids: ids.clone() }
    );
    assert_eq!(
        GrammarKind::Literal.grammar(ids),
        crate::scheme::SchemeGrammar::Literal
    );
}
