//! Redaction of change events through the JSON-lines filter command.

use filters::FilterPipeline;
use std::io::Write;
use sync_core::{ChangeEvent, UniversalValue};
use sync_stress::filter_events;

const FILTERS: &str = r#"
[[filters]]
type = "delete-dml-column"
match-schema = "test"
match-table = "test_table"
columns = ["e", "f"]
"#;

fn run(pipeline: &FilterPipeline, input: &str) -> Vec<ChangeEvent> {
    let mut output = Vec::new();
    filter_events(pipeline, input.as_bytes(), &mut output).unwrap();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| ChangeEvent::from_json(line).unwrap())
        .collect()
}

#[test]
fn test_redacts_configured_columns_from_file_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(FILTERS.as_bytes()).unwrap();
    let pipeline = FilterPipeline::from_file(file.path()).unwrap();

    let events = run(
        &pipeline,
        r#"{"schema":"test","table":"test_table","dml":{"data":{"a":1,"e":2,"f":3},"pks":{"a":1}}}"#,
    );

    assert_eq!(events.len(), 1);
    let dml = events[0].dml.as_ref().unwrap();
    assert_eq!(dml.data.keys().collect::<Vec<_>>(), vec!["a"]);
    assert_eq!(dml.data["a"], UniversalValue::Int64(1));
    assert_eq!(dml.pks.as_ref().unwrap().keys().collect::<Vec<_>>(), vec!["a"]);
    assert!(dml.old.is_none());
}

#[test]
fn test_update_event_and_passthrough() {
    let pipeline = FilterPipeline::from_toml(FILTERS).unwrap();
    let input = [
        r#"{"schema":"test","table":"test_table","dml":{"data":{"a":1,"e":"new"},"old":{"a":1,"e":"old","g":null},"pks":{"a":1,"f":9}}}"#,
        r#"{"schema":"test","table":"other","dml":{"data":{"a":2,"e":3}}}"#,
    ]
    .join("\n");

    let events = run(&pipeline, &input);

    assert_eq!(events.len(), 2);
    let updated = events[0].dml.as_ref().unwrap();
    assert!(!updated.data.contains_key("e"));
    let old = updated.old.as_ref().unwrap();
    assert_eq!(old.keys().collect::<Vec<_>>(), vec!["a", "g"]);
    assert_eq!(old["g"], UniversalValue::Null);
    assert!(!updated.pks.as_ref().unwrap().contains_key("f"));

    let untouched = events[1].dml.as_ref().unwrap();
    assert!(untouched.data.contains_key("e"));
}

#[test]
fn test_filtering_twice_changes_nothing() {
    let pipeline = FilterPipeline::from_toml(FILTERS).unwrap();
    let input = r#"{"schema":"test","table":"test_table","dml":{"data":{"a":1,"e":2,"f":3},"old":{"f":1}}}"#;

    let once = run(&pipeline, input);
    let twice = run(&pipeline, &once[0].to_json().unwrap());

    assert_eq!(once, twice);
}
