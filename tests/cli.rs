//! Integration tests for top-level CLI behavior.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::json;

use doclink::cassette::recorder::CassetteRecorder;

const SITE: &str = "https://docs.example.com/api/";

/// Creates an isolated working directory holding a cassette for `SITE`.
fn workspace(name: &str) -> (PathBuf, PathBuf) {
    let dir = std::env::temp_dir().join(format!("doclink_cli_{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    let cassette = dir.join("site.cassette.yaml");
    let mut recorder = CassetteRecorder::new(&cassette, "cli");
    recorder.record(
        "http",
        "get_text",
        json!({ "url": format!("{SITE}member-search-index.js") }),
        json!({ "ok": r#"memberSearchIndex = [{"p":"com.example","c":"Widget","l":"build","u":"build(int)"}];updateSearchResults();"# }),
    );
    recorder.record(
        "http",
        "get_text",
        json!({ "url": format!("{SITE}package-search-index.js") }),
        json!({ "ok": r#"packageSearchIndex = [{"l":"com.example"}];updateSearchResults();"# }),
    );
    recorder.save().unwrap();

    (dir, cassette)
}

fn run_doclink(cwd: &Path, cassette: Option<&Path>, args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_doclink");
    let mut command = Command::new(bin);
    command
        .args(args)
        .current_dir(cwd)
        .env_remove("DOCLINK_SITES")
        .env_remove("DOCLINK_TIMEOUT_SECS")
        .env_remove("DOCLINK_RECORD")
        .env_remove("DOCLINK_REPLAY");
    if let Some(cassette) = cassette {
        command.env("DOCLINK_REPLAY", cassette);
    }
    command.output().expect("failed to run doclink binary")
}

#[test]
fn resolve_prints_urls_and_sentinel() {
    let (dir, cassette) = workspace("resolve");

    let output = run_doclink(
        &dir,
        Some(&cassette),
        &["--site", SITE, "resolve", "com.example.Widget#build(int)", "Gadget", "../x/"],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        stdout,
        "com.example.Widget#build(int)\thttps://docs.example.com/api/com/example/Widget.html#build(int)\n\
         Gadget\tInvalid\n\
         ../x/\t../x/\n"
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn rewrite_updates_file_and_deny_invalid_fails() {
    let (dir, cassette) = workspace("rewrite");
    let page = dir.join("page.html");
    std::fs::write(&page, r#"<a href="Widget">w</a><a href="Gadget">g</a>"#).unwrap();

    let output = run_doclink(
        &dir,
        Some(&cassette),
        &["--site", SITE, "rewrite", "page.html", "--deny-invalid"],
    );
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("1 resolved, 1 invalid"));
    assert!(stderr.contains("could not be resolved"));
    assert_eq!(
        std::fs::read_to_string(&page).unwrap(),
        r#"<a href="https://docs.example.com/api/com/example/Widget.html">w</a><a href="Invalid">g</a>"#
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn rewrite_to_stdout_keeps_page_links() {
    let (dir, cassette) = workspace("stdout");
    let source = r#"<a href="index.html">Home</a> <a href="changelog.md">c</a> <a href="Widget">w</a>"#;
    std::fs::write(dir.join("page.html"), source).unwrap();

    let output =
        run_doclink(&dir, Some(&cassette), &["--site", SITE, "rewrite", "page.html", "--stdout"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        r#"<a href="index.html">Home</a> <a href="changelog.md">c</a> <a href="https://docs.example.com/api/com/example/Widget.html">w</a>"#
    );
    assert_eq!(std::fs::read_to_string(dir.join("page.html")).unwrap(), source);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn site_after_subcommand_is_a_usage_error() {
    let (dir, cassette) = workspace("late_site");

    let output = run_doclink(
        &dir,
        Some(&cassette),
        &["--site", SITE, "resolve", "Widget", "--site", "https://other.example/"],
    );
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("unexpected argument '--site'"), "{stderr}");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn sites_can_come_from_config_file() {
    let (dir, cassette) = workspace("config");
    std::fs::write(dir.join("doclink.yaml"), format!("sites:\n  - {SITE}\n")).unwrap();

    let output = run_doclink(&dir, Some(&cassette), &["resolve", "Widget"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("https://docs.example.com/api/com/example/Widget.html"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_sites_is_an_error() {
    let (dir, _) = workspace("no_sites");

    let output = run_doclink(&dir, None, &["resolve", "Widget"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("no reference sites configured"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn insecure_site_is_rejected() {
    let (dir, _) = workspace("insecure");

    let output = run_doclink(&dir, None, &["--site", "http://docs.example.com/", "resolve", "X"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("must be an https:// URL"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let (dir, _) = workspace("invalid");
    let output = run_doclink(&dir, None, &["nonsense"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));

    let _ = std::fs::remove_dir_all(&dir);
}
