use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("unphp"))
}

const ASSOC_ARRAY: &[u8] = b"a:3:{s:5:\"apple\";i:1;s:6:\"orange\";i:2;s:5:\"grape\";i:3;}";

fn write_fixture(dir: &TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).expect("write fixture");
    path
}

#[test]
fn help_supports_json_and_convert() {
    cmd().arg("json").arg("--help").assert().success();
    cmd().arg("convert").arg("--help").assert().success();
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.ser");
    let output = temp.path().join("out.json");

    cmd()
        .arg("json")
        .arg(missing)
        .arg("-o")
        .arg(output)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn stdout_outputs_json() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_fixture(&temp, "session.ser", ASSOC_ARRAY);

    let assert = cmd().arg("json").arg(input).arg("--stdout").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let parsed: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(parsed["apple"], Value::from(1));
    assert_eq!(parsed["grape"], Value::from(3));
}

#[test]
fn writes_json_file_and_ok_notice() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_fixture(&temp, "session.ser", ASSOC_ARRAY);
    let output = temp.path().join("out.json");

    cmd()
        .arg("json")
        .arg(input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stderr(contains("OK: json written"));

    let written = std::fs::read_to_string(&output).expect("read output");
    let _: Value = serde_json::from_str(&written).expect("valid json");
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_fixture(&temp, "session.ser", ASSOC_ARRAY);
    let output = temp.path().join("out.json");

    let assert = cmd()
        .arg("json")
        .arg(input)
        .arg("-o")
        .arg(&output)
        .arg("--quiet")
        .assert()
        .success();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).expect("utf8 stderr");
    assert!(stderr.is_empty());
}

#[test]
fn stdout_and_output_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_fixture(&temp, "session.ser", ASSOC_ARRAY);
    let output = temp.path().join("out.json");

    cmd()
        .arg("json")
        .arg(input)
        .arg("--stdout")
        .arg("-o")
        .arg(output)
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn pretty_and_compact_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_fixture(&temp, "session.ser", ASSOC_ARRAY);
    let output = temp.path().join("out.json");

    cmd()
        .arg("json")
        .arg(input)
        .arg("-o")
        .arg(output)
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn pretty_output_is_indented() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_fixture(&temp, "session.ser", ASSOC_ARRAY);

    let assert = cmd()
        .arg("json")
        .arg(input)
        .arg("--stdout")
        .arg("--pretty")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    assert!(stdout.contains('\n'));
}

#[test]
fn invalid_input_reports_decode_error() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_fixture(&temp, "garbage.bin", b"Z;not-serialize-data");

    cmd()
        .arg("json")
        .arg(input)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("decode failed").and(contains("unknown type tag")));
}

#[test]
fn output_must_differ_from_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_fixture(&temp, "session.ser", ASSOC_ARRAY);

    cmd()
        .arg("json")
        .arg(&input)
        .arg("-o")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("must differ from input"));
}

#[test]
fn glob_with_multiple_matches_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    write_fixture(&temp, "a.ser", ASSOC_ARRAY);
    write_fixture(&temp, "b.ser", ASSOC_ARRAY);
    let pattern = temp.path().join("*.ser");

    cmd()
        .arg("json")
        .arg(pattern)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("multiple files match"));
}
