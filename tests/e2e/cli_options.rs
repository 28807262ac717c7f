//! CLI end-to-end tests for option validation and resolution.

use search_index_testkit::fixtures::{TWEETS_TABLE_ID, fixture_path};
use serde_json::Value;
use std::error::Error;
use std::process::{Command, Output};

type TestResult = Result<(), Box<dyn Error>>;

const TWEETS_COLUMNS: [&str; 4] = ["id:int", "user:text", "body:text", "created:timestamp"];

fn run_cli(args: &[&str]) -> std::io::Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_search-index"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
}

fn options_arg(fixture: &str) -> String {
    fixture_path(&format!("options/{fixture}"))
        .display()
        .to_string()
}

fn table_args() -> Vec<String> {
    let mut args = vec![
        "--keyspace".to_string(),
        "demo".to_string(),
        "--table".to_string(),
        "tweets".to_string(),
    ];
    for column in TWEETS_COLUMNS {
        args.push("--column".to_string());
        args.push(column.to_string());
    }
    args
}

fn stdout_json(output: &Output) -> Result<Value, serde_json::Error> {
    serde_json::from_slice(&output.stdout)
}

fn resolve_json(fixture: &str) -> std::io::Result<Output> {
    let options = options_arg(fixture);
    let mut args = vec![
        "--output".to_string(),
        "json".to_string(),
        "resolve".to_string(),
        "--options".to_string(),
        options,
        "--index".to_string(),
        "tweets_index".to_string(),
        "--table-id".to_string(),
        TWEETS_TABLE_ID.to_string(),
        "--data-dir".to_string(),
        "/var/lib/search".to_string(),
    ];
    args.extend(table_args());
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    run_cli(&args)
}

#[test]
fn resolve_prints_full_config() -> TestResult {
    let output = resolve_json("tweets.valid.json")?;
    assert_eq!(output.status.code(), Some(0));

    let json = stdout_json(&output)?;
    assert_eq!(json.get("status").and_then(Value::as_str), Some("ok"));
    assert_eq!(json.get("table").and_then(Value::as_str), Some("demo.tweets"));
    assert_eq!(
        json.pointer("/config/path").and_then(Value::as_str),
        Some("/var/lib/search/demo/tweets-5a1c395eb41f11e59f22ba0be0483c18/lucene/tweets_index")
    );
    assert_eq!(
        json.pointer("/config/refresh_seconds").and_then(Value::as_f64),
        Some(0.5)
    );
    assert_eq!(
        json.pointer("/config/ram_buffer_mb").and_then(Value::as_u64),
        Some(128)
    );
    assert_eq!(
        json.pointer("/config/indexing_threads").and_then(Value::as_i64),
        Some(-1)
    );
    assert_eq!(
        json.pointer("/config/excluded_data_centers"),
        Some(&serde_json::json!(["dc2", "dc3"]))
    );
    Ok(())
}

#[test]
fn resolve_is_deterministic() -> TestResult {
    let first = resolve_json("tweets.valid.json")?;
    let second = resolve_json("tweets.valid.json")?;
    assert_eq!(first.stdout, second.stdout);
    Ok(())
}

#[test]
fn toml_options_keep_explicit_path() -> TestResult {
    let json = stdout_json(&resolve_json("tweets.valid.toml")?)?;
    assert_eq!(
        json.pointer("/config/path").and_then(Value::as_str),
        Some("/mnt/fast/tweets_index")
    );
    assert_eq!(
        json.pointer("/config/excluded_data_centers"),
        Some(&serde_json::json!(["dc1", ""]))
    );
    assert_eq!(
        json.pointer("/config/indexing_threads").and_then(Value::as_i64),
        Some(4)
    );
    Ok(())
}

#[test]
fn resolve_reports_zero_ram_buffer() -> TestResult {
    let output = resolve_json("tweets.zero-ram.json")?;
    assert_eq!(output.status.code(), Some(2));

    let json = stdout_json(&output)?;
    assert_eq!(json.get("status").and_then(Value::as_str), Some("error"));
    assert_eq!(
        json.pointer("/error/code").and_then(Value::as_str),
        Some("index_options:out_of_range")
    );
    assert_eq!(
        json.pointer("/error/metadata/option").and_then(Value::as_str),
        Some("ram_buffer_mb")
    );
    assert_eq!(
        json.pointer("/error/message").and_then(Value::as_str),
        Some("'ram_buffer_mb' must be strictly positive")
    );
    Ok(())
}

#[test]
fn validate_without_table_skips_column_checks() -> TestResult {
    let options = options_arg("tweets.unknown-column.json");
    let output = run_cli(&["validate", "--options", &options])?;
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.starts_with("status: ok\n"));
    assert!(stdout.contains("table: unknown\n"));
    Ok(())
}

#[test]
fn validate_with_table_rejects_unknown_column() -> TestResult {
    let options = options_arg("tweets.unknown-column.json");
    let mut args = vec![
        "--output".to_string(),
        "json".to_string(),
        "validate".to_string(),
        "--options".to_string(),
        options,
    ];
    args.extend(table_args());
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let output = run_cli(&args)?;
    assert_eq!(output.status.code(), Some(2));
    let json = stdout_json(&output)?;
    assert_eq!(
        json.pointer("/error/code").and_then(Value::as_str),
        Some("index_options:invalid_schema")
    );
    Ok(())
}

#[test]
fn validate_requires_schema() -> TestResult {
    let options = options_arg("tweets.no-schema.json");
    let output = run_cli(&["validate", "--options", &options])?;
    assert_eq!(output.status.code(), Some(2));

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("code: index_options:missing_schema\n"));
    Ok(())
}

#[test]
fn missing_option_file_is_io_failure() -> TestResult {
    let output = run_cli(&["validate", "--options", "/nonexistent/tweets.json"])?;
    assert_eq!(output.status.code(), Some(3));

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("code: index_options:options_file_not_found\n"));
    Ok(())
}

#[test]
fn verbose_json_logs_every_supplied_option() -> TestResult {
    let options = options_arg("tweets.valid.json");
    let output = run_cli(&["--verbose", "--log-json", "validate", "--options", &options])?;
    assert_eq!(output.status.code(), Some(0));

    let events: Vec<Value> = String::from_utf8(output.stderr)?
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    let named = |name: &str| {
        events
            .iter()
            .filter(|event| event.get("event").and_then(Value::as_str) == Some(name))
            .count()
    };

    assert_eq!(named("index_options.option"), 8);
    assert_eq!(named("index_options.unknown_option"), 1);
    assert_eq!(named("index_options.validated"), 1);
    Ok(())
}
