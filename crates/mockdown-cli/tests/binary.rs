//! End-to-end runs of the `mockdown` binary.

use std::path::Path;
use std::process::{Command, Output};

fn mockdown(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mockdown"))
        .arg("--config")
        .arg(config)
        .arg("--quiet")
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn generated_notes_pass_link_check() {
    let temp = tempfile::TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    let out = temp.path().join("notes");
    let out = out.to_str().unwrap();

    let run = mockdown(&config, &["notes", "-n", "12", "-o", out, "--seed", "5"]);
    assert!(run.status.success(), "{}", String::from_utf8_lossy(&run.stderr));

    let check = mockdown(&config, &["links", "check", out]);
    assert!(check.status.success(), "{}", String::from_utf8_lossy(&check.stdout));
    assert!(String::from_utf8_lossy(&check.stdout).contains("Documents:      13"));
}

#[test]
fn broken_links_fail_the_check() {
    let temp = tempfile::TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    let content = temp.path().join("content");
    std::fs::create_dir(&content).unwrap();
    std::fs::write(content.join("a.md"), "[[missing]]\n").unwrap();

    let check = mockdown(&config, &["links", "check", content.to_str().unwrap()]);
    assert!(!check.status.success());
    assert!(String::from_utf8_lossy(&check.stdout).contains("DANGLING_LINKS"));
    assert!(String::from_utf8_lossy(&check.stderr).contains("error:"));
}

#[test]
fn config_init_then_get() {
    let temp = tempfile::TempDir::new().unwrap();
    let config = temp.path().join("config.toml");

    let init = mockdown(&config, &["config", "init", "--file", config.to_str().unwrap()]);
    assert!(init.status.success());

    let set = mockdown(&config, &["config", "set", "notes.prefix", "NOTE"]);
    assert!(set.status.success());

    let get = mockdown(&config, &["config", "get", "notes.prefix"]);
    assert_eq!(String::from_utf8_lossy(&get.stdout).trim(), "NOTE");
}
