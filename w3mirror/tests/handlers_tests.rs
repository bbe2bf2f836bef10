use clap::error::ErrorKind;
use std::path::PathBuf;
use tracing::Level;
use w3mirror::*;

fn matches(args: &[&str]) -> Result<clap::ArgMatches, clap::Error> {
    command_argument_builder().try_get_matches_from(args)
}

#[test]
fn test_parse_mirror_args_defaults() {
    let m = matches(&[
        "w3mirror",
        "owner@example.com",
        "did:key:z6MkSpace",
        "https://example.com/page",
    ])
    .unwrap();
    let args = parse_mirror_args(&m).unwrap();

    assert_eq!(args.email, "owner@example.com");
    assert_eq!(args.space, "did:key:z6MkSpace");
    assert_eq!(args.url.as_str(), "https://example.com/page");
    assert_eq!(args.staging_dir, PathBuf::from("./assets"));
    assert_eq!(args.w3_bin, None);
    assert_eq!(args.timeout_secs, None);
    assert!(!args.quiet);
    assert!(!args.verbose);
}

#[test]
fn test_parse_mirror_args_with_options() {
    let m = matches(&[
        "w3mirror",
        "-q",
        "--staging-dir",
        "/tmp/mirror",
        "--w3-bin",
        "/opt/w3/bin/w3",
        "--timeout",
        "30",
        "owner@example.com",
        "did:key:z6MkSpace",
        "https://example.com/",
    ])
    .unwrap();
    let args = parse_mirror_args(&m).unwrap();

    assert_eq!(args.staging_dir, PathBuf::from("/tmp/mirror"));
    assert_eq!(args.w3_bin, Some(PathBuf::from("/opt/w3/bin/w3")));
    assert_eq!(args.timeout_secs, Some(30));
    assert!(args.quiet);
}

#[test]
fn test_staging_dir_expands_tilde() {
    let m = matches(&[
        "w3mirror",
        "-d",
        "~/mirror",
        "owner@example.com",
        "did:key:z6MkSpace",
        "https://example.com/",
    ])
    .unwrap();
    let args = parse_mirror_args(&m).unwrap();

    assert!(!args.staging_dir.to_string_lossy().starts_with('~'));
    assert!(args.staging_dir.ends_with("mirror"));
}

#[test]
fn test_missing_arguments_are_usage_errors() {
    let err = matches(&["w3mirror", "owner@example.com"]).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    assert_eq!(usage_exit_code(err.kind()), 1);
    let rendered = err.to_string();
    assert!(rendered.contains("<SPACE>"));
    assert!(rendered.contains("<URL>"));
}

#[test]
fn test_invalid_url_is_rejected() {
    let err = matches(&["w3mirror", "owner@example.com", "did:key:x", "not a url"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
    assert_eq!(usage_exit_code(err.kind()), 1);
}

#[test]
fn test_help_and_version_exit_cleanly() {
    let err = matches(&["w3mirror", "--help"]).unwrap_err();
    assert_eq!(usage_exit_code(err.kind()), 0);

    let err = matches(&["w3mirror", "--version"]).unwrap_err();
    assert_eq!(usage_exit_code(err.kind()), 0);
}

#[test]
fn test_quiet_conflicts_with_verbose() {
    let err = matches(&[
        "w3mirror",
        "-q",
        "-v",
        "owner@example.com",
        "did:key:x",
        "https://example.com/",
    ])
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
}

#[test]
fn test_log_level() {
    assert_eq!(log_level(true, false), Level::WARN);
    assert_eq!(log_level(false, false), Level::INFO);
    assert_eq!(log_level(false, true), Level::DEBUG);
}

#[test]
fn test_resolve_storage_client_explicit_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::TempDir::new()?;
    let fake = temp.path().join("w3");
    std::fs::write(&fake, "#!/bin/sh\n")?;

    let client = resolve_storage_client(Some(&fake))?;
    assert_eq!(client.binary_path(), fake.as_path());

    let missing = temp.path().join("not-here");
    let err = resolve_storage_client(Some(&missing)).unwrap_err();
    assert!(err.contains("not-here"));

    Ok(())
}
