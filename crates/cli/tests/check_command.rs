use assert_cmd::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn check_reports_all_violations_and_fails() {
    let tmp = tempdir().unwrap();
    let xdg = tmp.path().join("xdg");
    fs::create_dir_all(&xdg).unwrap();

    let tpl = tmp.path().join("bad.tpl");
    fs::write(&tpl, "$pick: select {\n}\n$age: text\n$age: text\n---\nbody").unwrap();

    let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin!("tyf"));
    cmd.env("XDG_CONFIG_HOME", &xdg);
    cmd.args(["check", "--file", tpl.to_str().unwrap()]);

    cmd.assert()
        .failure()
        .stdout(predicates::str::contains("FAIL tyf check"))
        .stdout(predicates::str::contains("options are required"))
        .stdout(predicates::str::contains("declared more than once"));
}

#[test]
fn check_passes_a_clean_template() {
    let tmp = tempdir().unwrap();
    let xdg = tmp.path().join("xdg");
    fs::create_dir_all(&xdg).unwrap();

    let tpl = tmp.path().join("good.tpl");
    fs::write(&tpl, "$name: text = World\n$age: number\n---\n{{ name }}").unwrap();

    let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin!("tyf"));
    cmd.env("XDG_CONFIG_HOME", &xdg);
    cmd.args(["check", "--file", tpl.to_str().unwrap()]);

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("OK   tyf check"))
        .stdout(predicates::str::contains("2 variable declaration(s)"));
}

#[test]
fn validation_blocks_render_before_prompting() {
    let tmp = tempdir().unwrap();
    let xdg = tmp.path().join("xdg");
    fs::create_dir_all(&xdg).unwrap();

    let tpl = tmp.path().join("bad.tpl");
    fs::write(&tpl, "$pick: select {\n}\n---\n{{ pick }}").unwrap();

    let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin!("tyf"));
    cmd.env("XDG_CONFIG_HOME", &xdg);
    // Not batch mode: if validation did not block first, this would
    // hang on a prompt.
    cmd.args(["render", "--file", tpl.to_str().unwrap()]);

    cmd.assert()
        .failure()
        .stdout(predicates::str::contains("FAIL tyf render"))
        .stdout(predicates::str::contains("failed validation"));
}
