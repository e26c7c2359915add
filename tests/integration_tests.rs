//! End-to-end tests of the `ffr` binary

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ffr(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ffr").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    for key in [
        "FFR_FFMPEG",
        "FFR_FFPROBE",
        "FFR_CODEC",
        "FFR_PRESET",
        "FFR_HWACCEL_DEVICE",
        "FFR_MAX_NAME_LENGTH",
        "FFR_KEYFRAME_LIMIT",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn test_help_lists_commands() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    ffr(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("merge-parts"))
        .stdout(predicate::str::contains("insert-dimensions"))
        .stdout(predicate::str::contains("--dry-run"));
    Ok(())
}

#[test]
fn test_dry_run_prints_plan_and_keeps_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("foo-1bar.txt"), "x")?;

    ffr(&dir)
        .args(["--dry-run", "add-number", "2", "foo-1bar.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"foo-1bar.txt\" -> \"foo-3bar.txt\""));

    assert!(dir.path().join("foo-1bar.txt").exists());
    assert!(!dir.path().join("foo-3bar.txt").exists());
    Ok(())
}

#[test]
fn test_negative_number_and_alias() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("foo-5bar.txt"), "x")?;

    ffr(&dir).args(["a", "-2", "foo-5bar.txt"]).assert().success();

    assert!(dir.path().join("foo-3bar.txt").exists());
    Ok(())
}

#[test]
fn test_rename_with_global_flag_after_command() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("foo-1bar-2baz.txt"), "x")?;

    ffr(&dir)
        .args(["merge-parts", "foo-1bar-2baz.txt", "--verbose"])
        .assert()
        .success();

    assert!(dir.path().join("foo-3bar-baz.txt").exists());
    Ok(())
}

#[test]
fn test_per_file_error_keeps_exit_status() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("plain.txt"), "x")?;
    fs::write(dir.path().join("foo-1bar.txt"), "x")?;

    ffr(&dir)
        .args(["delete-regexp", "plain.txt", "foo-1bar.txt"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No matches"));

    assert!(dir.path().join("plain.txt").exists());
    assert!(dir.path().join("foo.txt").exists());
    Ok(())
}

#[test]
fn test_missing_file_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("foo.txt"), "x")?;

    ffr(&dir)
        .args(["suffix", "bar", "foo.txt", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.txt"));

    assert!(dir.path().join("foo.txt").exists());
    Ok(())
}

#[test]
fn test_no_files_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    ffr(&dir)
        .args(["prefix-date"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no files provided"));
    Ok(())
}

#[test]
fn test_explicit_missing_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("foo.txt"), "x")?;

    ffr(&dir)
        .args(["--config", "nope.toml", "prefix", "x", "foo.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config"));
    Ok(())
}

#[test]
fn test_crf_out_of_range_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    ffr(&dir)
        .args(["reencode", "--crf", "64", "foo.mp4"])
        .assert()
        .failure();
    Ok(())
}
