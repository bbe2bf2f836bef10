use std::process::Command;

fn w3mirror() -> Command {
    Command::new(env!("CARGO_BIN_EXE_w3mirror"))
}

#[test]
fn test_single_argument_exits_with_usage() {
    let output = w3mirror().arg("owner@example.com").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("<SPACE>"), "stderr was: {}", stderr);
    assert!(stderr.contains("Usage"), "stderr was: {}", stderr);
}

#[test]
fn test_no_arguments_exits_with_usage() {
    let output = w3mirror().output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("<EMAIL>"), "stderr was: {}", stderr);
}

#[test]
fn test_help_exits_zero() {
    let output = w3mirror().arg("--help").output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("EMAIL"));
    assert!(stdout.contains("--staging-dir"));
}

#[test]
fn test_missing_w3_binary_does_not_fail_the_process() {
    let temp = tempfile::TempDir::new().unwrap();
    let output = w3mirror()
        .current_dir(temp.path())
        .args([
            "--w3-bin",
            "/nonexistent/w3",
            "owner@example.com",
            "did:key:z6MkSpace",
            "http://127.0.0.1:9/",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("w3 client not found"), "stderr was: {}", stderr);
}
