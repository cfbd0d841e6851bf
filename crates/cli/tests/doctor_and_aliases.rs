use assert_cmd::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn doctor_reports_defaults_when_no_config_exists() {
    let tmp = tempdir().unwrap();
    let xdg = tmp.path().join("xdg");
    fs::create_dir_all(&xdg).unwrap();

    let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin!("tyf"));
    cmd.env("XDG_CONFIG_HOME", &xdg);
    cmd.arg("doctor");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("OK   tyf doctor"))
        .stdout(predicates::str::contains("config: (defaults"))
        .stdout(predicates::str::contains("logging.level: info"))
        .stdout(predicates::str::contains("aliases: (none)"));
}

#[test]
fn doctor_prints_configured_aliases() {
    let tmp = tempdir().unwrap();
    let xdg = tmp.path().join("xdg");
    let cfg_dir = xdg.join("typefill");
    fs::create_dir_all(&cfg_dir).unwrap();
    fs::write(
        cfg_dir.join("config.toml"),
        "version = 1\n[logging]\nlevel = \"debug\"\n[aliases]\nreadme = \"/tmp/readme.tpl\"\n",
    )
    .unwrap();

    let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin!("tyf"));
    cmd.env("XDG_CONFIG_HOME", &xdg);
    cmd.arg("doctor");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("logging.level: debug"))
        .stdout(predicates::str::contains("readme -> /tmp/readme.tpl"));
}

#[test]
fn doctor_fails_on_missing_explicit_config() {
    let tmp = tempdir().unwrap();
    let xdg = tmp.path().join("xdg");
    fs::create_dir_all(&xdg).unwrap();

    let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin!("tyf"));
    cmd.env("XDG_CONFIG_HOME", &xdg);
    cmd.args(["--config", "/nonexistent/typefill.toml", "doctor"]);

    cmd.assert()
        .failure()
        .stdout(predicates::str::contains("FAIL tyf doctor"))
        .stdout(predicates::str::contains("not found"));
}

#[test]
fn alias_name_renders_the_aliased_file() {
    let tmp = tempdir().unwrap();
    let xdg = tmp.path().join("xdg");
    let cfg_dir = xdg.join("typefill");
    fs::create_dir_all(&cfg_dir).unwrap();

    let tpl = tmp.path().join("greeting.tpl");
    fs::write(&tpl, "$Name: text = World\n---\nHello {{ Name }}!").unwrap();
    fs::write(
        cfg_dir.join("config.toml"),
        format!("version = 1\n[aliases]\ngreeting = \"{}\"\n", tpl.display()),
    )
    .unwrap();

    let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin!("tyf"));
    cmd.env("XDG_CONFIG_HOME", &xdg);
    cmd.args(["render", "--batch", "greeting"]);

    cmd.assert().success().stdout(predicates::str::contains("Hello World!"));
}

#[test]
fn unknown_alias_fails_with_a_hint() {
    let tmp = tempdir().unwrap();
    let xdg = tmp.path().join("xdg");
    fs::create_dir_all(&xdg).unwrap();

    let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin!("tyf"));
    cmd.env("XDG_CONFIG_HOME", &xdg);
    cmd.current_dir(tmp.path());
    cmd.args(["render", "--batch", "no-such-template"]);

    cmd.assert()
        .failure()
        .stdout(predicates::str::contains("FAIL tyf render"))
        .stdout(predicates::str::contains("not a configured alias"));
}
