use alertgen::cli::ExportFormat;
use alertgen::commands::{GenerateCommandArgs, execute_generate};
use alertgen::{AlertGenError, GenerateConfig, generate_groups};
use serde_json::{Value, json};
use std::time::Duration;
use tempfile::NamedTempFile;

#[test]
fn missing_config_is_rejected() {
    let err = generate_groups(None).unwrap_err();
    assert!(matches!(err, AlertGenError::MissingConfiguration));

    let err = generate_groups(Some(&Value::Null)).unwrap_err();
    assert!(matches!(err, AlertGenError::MissingConfiguration));
}

#[test]
fn explicit_seed_is_echoed() {
    for seed in [0_i64, 42, -7] {
        let output = generate_groups(Some(&json!({ "seed": seed }))).unwrap();
        assert_eq!(output.input_config.seed, seed);
    }
}

#[test]
fn omitted_seed_comes_from_clock() {
    let first = generate_groups(Some(&json!({}))).unwrap();
    std::thread::sleep(Duration::from_millis(2));
    let second = generate_groups(Some(&json!({}))).unwrap();

    assert_ne!(first.input_config.seed, 0);
    assert!(second.input_config.seed > first.input_config.seed);
}

#[test]
fn unknown_properties_do_not_change_output() {
    let plain = json!({
        "alertRuleCount": 4,
        "recordingRuleCount": 2,
        "rulesPerGroup": 2,
        "groupsPerFolder": 2,
        "seed": 11
    });
    let mut extended = plain.clone();
    extended["grafanaURL"] = json!("http://localhost:3000");
    extended["concurrency"] = json!(100);

    let a = generate_groups(Some(&plain)).unwrap();
    let b = generate_groups(Some(&extended)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn config_is_passed_through_verbatim() {
    let raw = json!({
        "alertRuleCount": 3,
        "recordingRuleCount": 2,
        "rulesPerGroup": 1,
        "groupsPerFolder": 1,
        "seed": 42
    });

    let output = generate_groups(Some(&raw)).unwrap();
    assert_eq!(
        output.input_config,
        GenerateConfig {
            num_alerting: 3,
            num_recording: 2,
            query_datasource: String::new(),
            write_datasource: String::new(),
            rules_per_group: 1,
            groups_per_folder: 1,
            seed: 42,
        }
    );

    // One rule per group, one group per folder
    assert_eq!(output.groups.len(), 5);
    let value = output.to_value().unwrap();
    assert_eq!(
        value["inputConfig"],
        json!({
            "alertRuleCount": 3,
            "recordingRuleCount": 2,
            "queryDatasource": "",
            "writeDatasource": "",
            "rulesPerGroup": 1,
            "groupsPerFolder": 1,
            "seed": 42
        })
    );
}

#[test]
fn generator_failure_returns_no_output() {
    let raw = json!({"alertRuleCount": 3, "rulesPerGroup": 0, "groupsPerFolder": 1});

    let err = generate_groups(Some(&raw)).unwrap_err();
    assert!(matches!(err, AlertGenError::GenerationFailed(_)));
    assert!(err.to_string().contains("rulesPerGroup"));
}

#[test]
fn oversized_counts_fail_without_panicking() {
    for raw in [
        json!({"alertRuleCount": 1e17, "rulesPerGroup": 1, "groupsPerFolder": 1, "seed": 1}),
        json!({"alertRuleCount": 1e300, "rulesPerGroup": 1, "groupsPerFolder": 1, "seed": 1}),
        json!({"recordingRuleCount": "1e20", "rulesPerGroup": 1, "groupsPerFolder": 1}),
    ] {
        let result = std::panic::catch_unwind(|| generate_groups(Some(&raw)));
        let err = result.expect("generation must not panic").unwrap_err();
        assert!(matches!(err, AlertGenError::GenerationFailed(_)), "{err}");
        assert!(err.to_string().contains("rules requested"), "{err}");
    }
}

#[test]
fn out_of_range_numbers_saturate() {
    let raw = json!({
        "alertRuleCount": -1e300,
        "rulesPerGroup": 1,
        "groupsPerFolder": 1,
        "seed": 1e300
    });

    let err = generate_groups(Some(&raw)).unwrap_err();
    assert!(err.to_string().contains("alertRuleCount must not be negative"));
    assert!(err.to_string().contains(&i64::MIN.to_string()));

    let output = generate_groups(Some(&json!({"seed": -1e300}))).unwrap();
    assert_eq!(output.input_config.seed, i64::MIN);
    let output = generate_groups(Some(&json!({"seed": 1e300}))).unwrap();
    assert_eq!(output.input_config.seed, i64::MAX);
}

#[test]
fn example_script_config() {
    let raw = json!({
        "alertRuleCount": 20,
        "recordingRuleCount": 30,
        "queryDatasource": "query_ds_id",
        "writeDatasource": "write_ds_id",
        "rulesPerGroup": 4,
        "groupsPerFolder": 5
    });

    let value = generate_groups(Some(&raw)).unwrap().to_value().unwrap();
    let groups = value["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 13);
    assert!(!groups[0]["title"].as_str().unwrap().is_empty());
    assert_eq!(groups[0]["rules"].as_array().unwrap().len(), 4);
    assert!(!groups[0]["rules"][0]["title"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn generate_command_writes_output_file() {
    let output_file = NamedTempFile::with_suffix(".json").unwrap();

    let output = execute_generate(GenerateCommandArgs {
        config_path: None,
        alert_rule_count: Some(2),
        recording_rule_count: Some(1),
        query_datasource: Some("prom"),
        write_datasource: Some("mimir"),
        rules_per_group: Some(3),
        groups_per_folder: Some(1),
        seed: Some(99),
        format: ExportFormat::Json,
        output_path: Some(output_file.path()),
        upload: None,
    })
    .await
    .unwrap();

    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(output_file.path()).unwrap()).unwrap();
    assert_eq!(written, output.to_value().unwrap());
    assert_eq!(written["inputConfig"]["seed"], 99);
    assert_eq!(written["groups"].as_array().unwrap().len(), 1);
}
