use assert_cmd::prelude::*;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{TempDir, tempdir};

const GENERATE_PATH: &str = "/v1beta/models/gemini-test:generateContent";

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn reply(text: &str) -> serde_json::Value {
    json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] })
}

/// Temp dir with a config pointing the client at `server`.
fn setup(server: &MockServer) -> (TempDir, PathBuf) {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("config.toml");
    let toml = format!(
        r#"version = 1

[generation]
model = "gemini-test"
endpoint = "{}"
timeout_secs = 5
"#,
        server.base_url()
    );
    write_file(&cfg, &toml);
    (tmp, cfg)
}

fn docmeta(dir: &Path, cfg: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("docmeta"));
    cmd.current_dir(dir);
    cmd.env("NO_COLOR", "1");
    cmd.env("GEMINI_API_KEY", "test-key");
    cmd.env_remove("RUST_LOG");
    cmd.arg("--config").arg(cfg);
    cmd
}

#[test]
fn creates_front_matter_for_plain_file() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path(GENERATE_PATH)
            .header("x-goog-api-key", "test-key")
            .body_includes("Some content.");
        then.status(200)
            .json_body(reply("description: A short page.\nkeywords: [intro, overview]"));
    });

    let (tmp, cfg) = setup(&server);
    let page = tmp.path().join("docs/page.md");
    write_file(&page, "# Title\nSome content.");

    docmeta(tmp.path(), &cfg)
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::contains("created"))
        .stdout(predicate::str::contains("1 created, 0 updated, 0 skipped, 0 failed"));

    mock.assert();
    assert_eq!(
        fs::read_to_string(&page).unwrap(),
        "---\ndescription: A short page.\nkeywords: [intro, overview]\n---\n\n# Title\nSome content."
    );
}

#[test]
fn updates_existing_front_matter_in_place() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200).json_body(reply("description: Fresh.\nkeywords: [a, b]"));
    });

    let (tmp, cfg) = setup(&server);
    let page = tmp.path().join("page.md");
    write_file(
        &page,
        "---\ntitle: Old\ndescription: stale\nsidebar_position: 1\n---\nBody\n",
    );

    docmeta(tmp.path(), &cfg)
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::contains("updated"));

    assert_eq!(
        fs::read_to_string(&page).unwrap(),
        "---\ntitle: Old\ndescription: Fresh.\nsidebar_position: 1\nkeywords: [a, b]\n---\n\nBody\n"
    );
}

#[test]
fn ignore_existing_makes_no_calls() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200).json_body(reply("description: d\nkeywords: [k]"));
    });

    let (tmp, cfg) = setup(&server);
    let page = tmp.path().join("page.md");
    let original = "---\ntitle: Old\ndescription: stale\n---\nBody";
    write_file(&page, original);

    docmeta(tmp.path(), &cfg)
        .arg("--ignore-existing")
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped"));

    mock.assert_calls(0);
    assert_eq!(fs::read_to_string(&page).unwrap(), original);
}

#[test]
fn one_failure_does_not_stop_the_others() {
    let server = MockServer::start();
    let ok_alpha = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH).body_includes("Alpha page");
        then.status(200).json_body(reply("description: Alpha.\nkeywords: [alpha]"));
    });
    let broken = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH).body_includes("Beta page");
        then.status(500).json_body(json!({ "error": { "code": 500, "message": "backend exploded" } }));
    });
    let ok_gamma = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH).body_includes("Gamma page");
        then.status(200).json_body(reply("description: Gamma.\nkeywords: [gamma]"));
    });

    let (tmp, cfg) = setup(&server);
    let alpha = tmp.path().join("alpha.md");
    let beta = tmp.path().join("beta.md");
    let gamma = tmp.path().join("gamma.md");
    write_file(&alpha, "Alpha page");
    write_file(&beta, "---\ntitle: Beta\n---\nBeta page");
    write_file(&gamma, "Gamma page");

    docmeta(tmp.path(), &cfg)
        .args([&alpha, &beta, &gamma])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("beta.md"))
        .stderr(predicate::str::contains("backend exploded"))
        .stdout(predicate::str::contains("2 created, 0 updated, 0 skipped, 1 failed"));

    ok_alpha.assert();
    broken.assert();
    ok_gamma.assert();
    assert_eq!(fs::read_to_string(&beta).unwrap(), "---\ntitle: Beta\n---\nBeta page");
    assert!(fs::read_to_string(&alpha).unwrap().starts_with("---\ndescription: Alpha.\n"));
    assert!(fs::read_to_string(&gamma).unwrap().starts_with("---\ndescription: Gamma.\n"));
}

#[test]
fn missing_file_is_reported_and_others_continue() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200).json_body(reply("description: d\nkeywords: [k]"));
    });

    let (tmp, cfg) = setup(&server);
    let page = tmp.path().join("page.md");
    write_file(&page, "Body");

    docmeta(tmp.path(), &cfg)
        .arg(tmp.path().join("missing.md"))
        .arg(&page)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read"))
        .stderr(predicate::str::contains("missing.md"));

    assert!(fs::read_to_string(&page).unwrap().starts_with("---\n"));
}

#[test]
fn dry_run_prints_and_does_not_write() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200).json_body(reply("description: Preview only.\nkeywords: [p]"));
    });

    let (tmp, cfg) = setup(&server);
    let page = tmp.path().join("page.md");
    write_file(&page, "Body");

    docmeta(tmp.path(), &cfg)
        .arg("--dry-run")
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::contains("description: Preview only.\nkeywords: [p]\n"));

    assert_eq!(fs::read_to_string(&page).unwrap(), "Body");
}

#[test]
fn model_flag_selects_endpoint_path() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v1beta/models/gemini-other:generateContent");
        then.status(200).json_body(reply("description: d\nkeywords: [k]"));
    });

    let (tmp, cfg) = setup(&server);
    let page = tmp.path().join("page.md");
    write_file(&page, "Body");

    docmeta(tmp.path(), &cfg)
        .args(["--model", "models/gemini-other"])
        .arg(&page)
        .assert()
        .success();

    mock.assert();
}
