
use fixtures::*;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn xslt() -> Command {
    let mut cmd = Command::cargo_bin("xslt").unwrap();
    cmd.env_remove(TEMPLATE_PATH_VAR);
    cmd
}

#[test]
fn it_prints_usage_without_arguments() {
    let d = tempdir().unwrap();

    xslt()
        .current_dir(d.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("--template"))
        .stdout(predicate::str::contains(
            "xslt data.xml -t template.xslt -o transformed.html",
        ));

    assert!(entries(d.path()).is_empty(), "Expected no files to be created");
}

#[test]
fn help_tokens_behave_like_no_arguments() {
    let d = tempdir().unwrap();
    let bare = xslt().current_dir(d.path()).output().unwrap();

    for token in ["-h", "--help", "/?"] {
        let out = xslt().current_dir(d.path()).arg(token).output().unwrap();
        assert!(out.status.success());
        assert_eq!(out.stdout, bare.stdout, "{token} should print the same usage");
    }

    assert!(entries(d.path()).is_empty());
}

#[test]
fn it_prints_the_version() {
    xslt()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("xslt "));
}

#[test]
fn it_transforms_with_explicit_flags() {
    let d = workspace();

    xslt()
        .current_dir(d.path())
        .args(["data.xml", "-o", "out.html", "-t", "tpl.xslt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("out.html"));

    let html = fs::read_to_string(d.path().join("out.html")).unwrap();
    assert!(html.contains("http://localhost:80/app/default.aspx"));
    assert!(html.contains("MODULE_SET_RESPONSE_ERROR_STATUS"));
}

#[test]
fn it_accepts_the_transform_verb_and_long_flags() {
    let d = workspace();

    xslt()
        .current_dir(d.path())
        .args([
            "transform",
            "--input",
            "data.xml",
            "--template",
            "tpl.xslt",
            "--output",
            "report.html",
        ])
        .assert()
        .success();

    assert!(d.path().join("report.html").exists());
}

#[test]
fn it_reads_the_template_from_the_environment() {
    let d = workspace();

    xslt()
        .current_dir(d.path())
        .env(TEMPLATE_PATH_VAR, d.path().join("tpl.xslt"))
        .args(["data.xml", "-o", "out.html"])
        .assert()
        .success();

    assert!(!fs::read(d.path().join("out.html")).unwrap().is_empty());
}

#[test]
fn it_fails_without_a_template_and_writes_nothing() {
    let d = workspace();

    xslt()
        .current_dir(d.path())
        .args(["data.xml", "-o", "out.html"])
        .assert()
        .failure()
        .code(255)
        .stderr(predicate::str::contains(TEMPLATE_PATH_VAR));

    assert_eq!(entries(d.path()), vec!["data.xml", "tpl.xslt"]);
}

#[test]
fn it_fails_when_the_input_does_not_exist() {
    let d = workspace();

    xslt()
        .current_dir(d.path())
        .args(["missing.xml", "-o", "out.html", "-t", "nowhere.xslt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file missing.xml does not exist."));

    assert!(!d.path().join("out.html").exists());
}

#[test]
fn it_rejects_a_flag_without_value() {
    let d = workspace();

    xslt()
        .current_dir(d.path())
        .args(["data.xml", "-t", "tpl.xslt", "-o"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid arguments"))
        .stderr(predicate::str::contains("--output"));
}

#[test]
fn it_reports_malformed_input() {
    let d = workspace();
    fs::write(d.path().join("data.xml"), "<failedRequest>\n<Event>\n</failedRequest>").unwrap();

    xslt()
        .current_dir(d.path())
        .args(["data.xml", "-o", "out.html", "-t", "tpl.xslt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("as XML"));

    assert!(!d.path().join("out.html").exists());
}

#[test]
fn it_reports_an_invalid_template() {
    let d = workspace();
    fs::write(d.path().join("tpl.xslt"), "<notAStylesheet/>").unwrap();

    xslt()
        .current_dir(d.path())
        .args(["data.xml", "-o", "out.html", "-t", "tpl.xslt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load template"));
}

#[test]
fn it_uses_the_default_output_name_when_not_interactive() {
    let d = workspace();

    xslt()
        .current_dir(d.path())
        .args(["data.xml", "-t", "tpl.xslt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("transformed.html"));

    assert!(d.path().join("transformed.html").exists());
}

#[test]
fn it_overwrites_identically_when_not_interactive() {
    let d = workspace();
    let args = ["data.xml", "-o", "out.html", "-t", "tpl.xslt"];

    xslt().current_dir(d.path()).args(args).assert().success();
    let first = fs::read(d.path().join("out.html")).unwrap();

    xslt().current_dir(d.path()).args(args).assert().success();
    let second = fs::read(d.path().join("out.html")).unwrap();

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn it_refuses_to_overwrite_a_directory() {
    let d = workspace();
    fs::create_dir(d.path().join("out.html")).unwrap();

    xslt()
        .current_dir(d.path())
        .args(["data.xml", "-o", "out.html", "-t", "tpl.xslt", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to overwrite"));
}
