use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn scratch(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cpusched-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn cpusched() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cpusched"))
}

#[test]
fn writes_report_to_output_file() {
    let input = scratch("input-ok", "0 0 4 0\n1 1 1 0\n2 2 2 0\n");
    let output = input.with_file_name("report-ok");

    let status = cpusched()
        .arg(&input)
        .args(["-s", "RR:2", "-o"])
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());

    let report = fs::read_to_string(&output).unwrap();
    assert!(report.starts_with("RR 2\n"));
    assert!(report.lines().last().unwrap().starts_with("SUM: 7.0"));
}

#[test]
fn prints_report_to_stdout() {
    let input = scratch("input-stdout", "0 0 1 0\n");
    let out = cpusched().arg(&input).args(["-s", "SRTF"]).output().unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("SUM: 1.0"));
}

#[test]
fn invalid_input_exits_non_zero_without_report() {
    let input = scratch("input-bad", "0 2 1 0\n1 1 1 0\n");
    let output = input.with_file_name("report-bad");

    let out = cpusched()
        .arg(&input)
        .args(["-s", "FCFS", "-o"])
        .arg(&output)
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(!output.exists());
    assert!(String::from_utf8_lossy(&out.stderr).contains("sorted"));
}

#[test]
fn rejects_unknown_policy() {
    let input = scratch("input-policy", "0 0 1 0\n");
    let out = cpusched().arg(&input).args(["-s", "LCFS"]).output().unwrap();
    assert!(!out.status.success());
}
