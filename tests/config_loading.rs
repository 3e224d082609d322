//! Loading configuration files from disk.

use std::io::Write;

use region_check::check::{ErrorVerbosity, FramingMode, PredicateKind, TimingUnit};
use region_check::config::{load_config, load_or_default, ConfigError};

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_full_file() {
    let file = write_config(
        r#"
        [listener]
        bind_address = "127.0.0.1:9000"

        [service]
        predicate = "triangle_existence"
        framing = "body"
        verbosity = "generic"

        [service.timing]
        unit = "us"
        precision = 2

        [observability]
        log_format = "json"
        "#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
    assert_eq!(config.service.predicate, PredicateKind::TriangleExistence);
    assert_eq!(config.service.framing, FramingMode::Body);
    assert_eq!(config.service.verbosity, ErrorVerbosity::Generic);
    assert_eq!(config.service.timing.unit, TimingUnit::Micros);
    assert_eq!(config.service.timing.precision, 2);
}

#[test]
fn test_unknown_predicate_is_parse_error() {
    let file = write_config("[service]\npredicate = \"circle\"\n");
    assert!(matches!(load_config(file.path()), Err(ConfigError::Parse(_))));
}

#[test]
fn test_semantic_errors_are_reported_together() {
    let file = write_config(
        r#"
        [service]
        timestamp_format = ""

        [security]
        max_body_size = 0
        "#,
    );
    match load_config(file.path()) {
        Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 2),
        other => panic!("expected validation errors, got {:?}", other),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_no_path_gives_defaults() {
    let config = load_or_default(None).unwrap();
    assert_eq!(config.service.predicate, PredicateKind::QuadrantHit);
}
