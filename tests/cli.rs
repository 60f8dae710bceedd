//! Тесты бинарника `leadcast`.

use std::{
    fs,
    process::{Command, Output},
};

fn command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_leadcast"));
    cmd.env_remove("LEADCAST_CONFIG");
    cmd
}

fn leadcast(args: &[&str]) -> Output {
    command()
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run leadcast")
}

fn stderr_json(out: &Output) -> serde_json::Value {
    let stderr = String::from_utf8_lossy(&out.stderr);
    let line = stderr.lines().last().expect("stderr is empty");
    serde_json::from_str(line).expect("stderr ends with a JSON report")
}

fn stdout_json(out: &Output) -> serde_json::Value {
    serde_json::from_slice(&out.stdout).expect("stdout is JSON")
}

const LEAD: &str = r#"{"FirstName":"Test","LastName":"Tester","Company":"ISC2","Email":"example@example.com"}"#;

/// Тест проверяет сценарий default + LMS + OKTA с отпиской OKTA через CLI.
#[test]
fn test_publish_round() {
    let out = leadcast(&[
        "publish",
        "-s",
        "IncomingLeadsSubscriber",
        "-s",
        "LMS",
        "-s",
        "OKTA",
        "-u",
        "OKTA",
        "--lead",
        LEAD,
    ]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let json = stdout_json(&out);
    assert_eq!(json["channel"], "IncomingLeads");
    assert_eq!(json["processed"].as_array().unwrap().len(), 2);
    assert_eq!(json["processed"][0]["firstName"], "Test");
    assert_eq!(json["remaining_subscribers"].as_array().unwrap().len(), 0);
    assert_eq!(json["stats"]["delivered_count"], 2);
}

#[test]
fn test_publish_other_channel_keeps_subscribers() {
    let out = leadcast(&["publish", "--channel", "nope", "--lead", LEAD]);
    assert!(out.status.success());

    let json = stdout_json(&out);
    assert_eq!(json["processed"].as_array().unwrap().len(), 0);
    assert_eq!(json["remaining_subscribers"][0], "IncomingLeadsSubscriber");
}

/// Тест проверяет код завершения 2 и числовой код статуса в отчёте об
/// ошибке для невалидного лида и пустого сообщения.
#[test]
fn test_invalid_input_exit_code() {
    for (lead, status) in [
        (r#"{"FirstName":""}"#, 1004),
        ("null", 1004),
        ("{not json", 2010),
    ] {
        let out = leadcast(&["publish", "--lead", lead]);
        assert_eq!(out.status.code(), Some(2), "lead: {lead}");
        assert!(out.stdout.is_empty());

        let report = stderr_json(&out);
        assert_eq!(report["code"], status, "lead: {lead}");
        assert!(report["message"].is_string());
    }
}

/// Тест проверяет, что событие об отклонённой команде успевает попасть в
/// файл логов до остановки файлового writer-а.
#[test]
fn test_rejection_reaches_log_file() {
    let tmp = tempfile::tempdir().unwrap();
    let log_dir = tmp.path().join("logs");
    let config = tmp.path().join("leadcast.toml");
    fs::write(
        &config,
        format!(
            "[logging]\nlevel = \"debug\"\nwith_ansi = false\n\n[logging.file]\ndir = '{}'\n",
            log_dir.display()
        ),
    )
    .unwrap();

    let out = command()
        .env_remove("RUST_LOG")
        .args(["--config", config.to_str().unwrap()])
        .args(["publish", "--lead", r#"{"FirstName":""}"#])
        .output()
        .expect("failed to run leadcast");
    assert_eq!(out.status.code(), Some(2));

    let mut contents = String::new();
    for entry in fs::read_dir(&log_dir).unwrap() {
        contents.push_str(&fs::read_to_string(entry.unwrap().path()).unwrap());
    }
    assert!(contents.contains("Subscribed"), "log: {contents}");
    assert!(contents.contains("Command rejected"), "log: {contents}");
    assert!(contents.contains("field=first_name"), "log: {contents}");
}

#[test]
fn test_channels_command() {
    let out = leadcast(&["channels", "--lead", LEAD, "IncomingLeads", "Other", "IncomingLeads"]);
    assert!(out.status.success());

    let json = stdout_json(&out);
    assert_eq!(json, serde_json::json!(["IncomingLeads", "Other"]));
}
