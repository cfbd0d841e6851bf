use assert_cmd::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn batch_render_uses_defaults() {
    let tmp = tempdir().unwrap();
    let xdg = tmp.path().join("xdg");
    fs::create_dir_all(&xdg).unwrap();

    let tpl = tmp.path().join("greeting.tpl");
    fs::write(&tpl, "$Name: text = World\n---\nHello {{ Name }}!").unwrap();

    let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin!("tyf"));
    cmd.env("XDG_CONFIG_HOME", &xdg);
    cmd.env("NO_COLOR", "1");
    cmd.args(["render", "--batch", "--file", tpl.to_str().unwrap()]);

    cmd.assert().success().stdout(predicates::str::contains("Hello World!"));
}

#[test]
fn batch_render_binds_empty_text_without_default() {
    let tmp = tempdir().unwrap();
    let xdg = tmp.path().join("xdg");
    fs::create_dir_all(&xdg).unwrap();

    let tpl = tmp.path().join("empty.tpl");
    fs::write(&tpl, "$name: text\n---\nX{{ name }}Y").unwrap();

    let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin!("tyf"));
    cmd.env("XDG_CONFIG_HOME", &xdg);
    cmd.args(["render", "--batch", "--file", tpl.to_str().unwrap()]);

    cmd.assert().success().stdout(predicates::str::contains("XY"));
}

#[test]
fn render_writes_output_file() {
    let tmp = tempdir().unwrap();
    let xdg = tmp.path().join("xdg");
    fs::create_dir_all(&xdg).unwrap();

    let tpl = tmp.path().join("greeting.tpl");
    fs::write(&tpl, "$Name: text = World\n---\nHello {{ Name }}!").unwrap();
    let out = tmp.path().join("out.txt");

    let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin!("tyf"));
    cmd.env("XDG_CONFIG_HOME", &xdg);
    cmd.args([
        "render",
        "--batch",
        "--file",
        tpl.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
    ]);

    cmd.assert().success().stdout(predicates::str::contains("OK   wrote"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "Hello World!");
}

#[test]
fn render_without_input_fails() {
    let tmp = tempdir().unwrap();
    let xdg = tmp.path().join("xdg");
    fs::create_dir_all(&xdg).unwrap();

    let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin!("tyf"));
    cmd.env("XDG_CONFIG_HOME", &xdg);
    cmd.args(["render", "--batch"]);

    cmd.assert()
        .failure()
        .stdout(predicates::str::contains("FAIL tyf render"))
        .stdout(predicates::str::contains("no template given"));
}
