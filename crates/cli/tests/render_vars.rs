use assert_cmd::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn var_preset_maps_select_label_to_value() {
    let tmp = tempdir().unwrap();
    let xdg = tmp.path().join("xdg");
    fs::create_dir_all(&xdg).unwrap();

    let tpl = tmp.path().join("choice.tpl");
    fs::write(
        &tpl,
        "$choice: select {\n    A\n        1\n    B\n        2\n}\n---\nv={{ choice }}",
    )
    .unwrap();

    let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin!("tyf"));
    cmd.env("XDG_CONFIG_HOME", &xdg);
    cmd.args([
        "render",
        "--batch",
        "--file",
        tpl.to_str().unwrap(),
        "--var",
        "choice=A",
    ]);

    cmd.assert().success().stdout(predicates::str::contains("v=1"));
}

#[test]
fn var_preset_reaches_nested_component_fields() {
    let tmp = tempdir().unwrap();
    let xdg = tmp.path().join("xdg");
    fs::create_dir_all(&xdg).unwrap();

    let tpl = tmp.path().join("person.tpl");
    fs::write(
        &tpl,
        "$person: component {\n    $name: text\n}\n---\nname={{ person.name }}",
    )
    .unwrap();

    let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin!("tyf"));
    cmd.env("XDG_CONFIG_HOME", &xdg);
    cmd.args([
        "render",
        "--batch",
        "--file",
        tpl.to_str().unwrap(),
        "--var",
        "person.name=Ada",
    ]);

    cmd.assert().success().stdout(predicates::str::contains("name=Ada"));
}

#[test]
fn var_preset_feeds_number_arithmetic() {
    let tmp = tempdir().unwrap();
    let xdg = tmp.path().join("xdg");
    fs::create_dir_all(&xdg).unwrap();

    let tpl = tmp.path().join("count.tpl");
    fs::write(&tpl, "$count: number\n---\ndouble={{ count * 2 }}").unwrap();

    let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin!("tyf"));
    cmd.env("XDG_CONFIG_HOME", &xdg);
    cmd.args([
        "render",
        "--batch",
        "--file",
        tpl.to_str().unwrap(),
        "--var",
        "count=3",
    ]);

    cmd.assert().success().stdout(predicates::str::contains("double=6"));
}

#[test]
fn malformed_var_is_rejected() {
    let tmp = tempdir().unwrap();
    let xdg = tmp.path().join("xdg");
    fs::create_dir_all(&xdg).unwrap();

    let tpl = tmp.path().join("t.tpl");
    fs::write(&tpl, "$a: text\n---\nx").unwrap();

    let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin!("tyf"));
    cmd.env("XDG_CONFIG_HOME", &xdg);
    cmd.args(["render", "--batch", "--file", tpl.to_str().unwrap(), "--var", "novalue"]);

    cmd.assert()
        .failure()
        .stdout(predicates::str::contains("malformed --var 'novalue'"));
}
