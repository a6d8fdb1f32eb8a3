//! End-to-end tests for a full pipeline run.
//!
//! Source repositories are local git repositories reached through `file://`
//! URLs, and `sphinx-build` is replaced by a shell script, so these tests run
//! offline. They are skipped when `git` is unavailable.
#![cfg(unix)]

mod common;
use common::prelude::*;

use std::fs;

const VELOS_LINK: &str = "https://clouddocs.f5.com/training/community/velos-training/html/";

fn run(fixture: &TestFixture) -> assert_cmd::assert::Assert {
    let sphinx = fixture.fake_sphinx_build();
    let mut cmd = cargo_bin_cmd!("docs-hub");
    cmd.current_dir(fixture.path())
        .env_remove("RUST_LOG")
        .env_remove("DOCS_HUB_CONFIG")
        .arg("--sphinx-build")
        .arg(sphinx)
        .assert()
}

/// A reachable and an unreachable repository: the run succeeds with 1/2.
#[test]
fn test_partial_failure_still_succeeds() {
    if should_skip_git_tests() {
        return;
    }
    let fixture = TestFixture::new();
    let a = fixture.git_repo("a", &[("docs/index.rst", "Welcome to A\n")]);
    let b = fixture.unreachable_url();
    let fixture = fixture.with_config(&format!(
        "repos:\n  - name: a\n    url: {a}\n  - name: b\n    url: {b}\n"
    ));

    run(&fixture)
        .code(0)
        .stderr(predicate::str::contains(
            "Build complete: 1/2 repositories processed successfully",
        ))
        .stderr(predicate::str::contains("Failed to clone b"));

    let html = fixture.html_root();
    assert!(html.join("a").join("index.html").is_file());
    assert!(!html.join("b").exists());

    let index = fs::read_to_string(html.join("index.html")).unwrap();
    assert!(index.contains(r#"<a href="a/index.html">a</a>"#));
    assert!(index.contains(r#"<a href="b/index.html">b</a>"#));
}

/// Only an unsupported repository: nothing is built, the run fails, and the
/// landing page still lists it.
#[test]
fn test_unsupported_only_exits_one() {
    if should_skip_git_tests() {
        return;
    }
    let fixture = TestFixture::new();
    let guide = fixture.git_repo("guide", &[("docs/index.md", "# Guide\n")]);
    let fixture = fixture.with_config(&format!(
        "repos:\n  - name: guide\n    url: {guide}\n    type: mkdocs\n"
    ));

    run(&fixture)
        .code(1)
        .stderr(predicate::str::contains("Unsupported documentation type: mkdocs"))
        .stderr(predicate::str::contains("No documentation was built successfully"));

    let index = fs::read_to_string(fixture.html_root().join("index.html")).unwrap();
    assert!(index.contains("guide/index.html"));
    assert!(index.contains("Type: mkdocs"));
    assert!(!fixture.html_root().join("guide").exists());
}

/// A clone without the configured documentation directory is skipped.
#[test]
fn test_missing_doc_dir_is_skipped() {
    if should_skip_git_tests() {
        return;
    }
    let fixture = TestFixture::new();
    let a = fixture.git_repo("a", &[("README.md", "no docs here\n")]);
    let fixture = fixture.with_config(&format!("repos:\n  - name: a\n    url: {a}\n"));

    run(&fixture)
        .code(1)
        .stderr(predicate::str::contains("Documentation directory docs not found in a"));

    assert!(!fixture.html_root().join("a").exists());
}

/// Staged sources have links stripped, plain text intact, caches excluded.
#[test]
fn test_sources_are_normalized() {
    if should_skip_git_tests() {
        return;
    }
    let fixture = TestFixture::new();
    let notes = format!("see {VELOS_LINK}\n");
    let index = format!("Read {VELOS_LINK}intro.html\n");
    let a = fixture.git_repo(
        "a",
        &[
            ("manual/index.rst", index.as_str()),
            ("manual/notes.txt", notes.as_str()),
            ("manual/conf.py", "html_theme = 'alabaster'\n"),
            ("manual/_build/html/index.html", "stale"),
            ("manual/images/arch.svg", "<svg/>"),
        ],
    );
    let fixture = fixture.with_config(&format!(
        "repos:\n  - name: a\n    url: {a}\n    dir: manual\n"
    ));

    run(&fixture).code(0);

    let staged = fixture.path().join("_source").join("a");
    assert_eq!(
        fs::read_to_string(staged.join("index.rst")).unwrap(),
        "Read intro.html\n"
    );
    assert_eq!(fs::read_to_string(staged.join("notes.txt")).unwrap(), notes);
    assert_eq!(
        fs::read_to_string(staged.join("images").join("arch.svg")).unwrap(),
        "<svg/>"
    );
    assert!(!staged.join("_build").exists());
    let conf = fs::read_to_string(staged.join("conf.py")).unwrap();
    assert!(conf.contains("project = 'a'"));
    assert!(!conf.contains("alabaster"));
}

/// Two runs with the same configuration give the same landing page apart
/// from its timestamp, and the second run clears the first run's output.
#[test]
fn test_rerun_is_idempotent() {
    if should_skip_git_tests() {
        return;
    }
    let fixture = TestFixture::new();
    let a = fixture.git_repo("a", &[("docs/index.rst", "Welcome\n")]);
    let fixture = fixture.with_config(&format!("repos:\n  - name: a\n    url: {a}\n"));

    let without_timestamp = |html: String| -> String {
        html.lines()
            .filter(|line| !line.contains("Last updated:"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    run(&fixture).code(0);
    let first = fs::read_to_string(fixture.html_root().join("index.html")).unwrap();
    fs::write(fixture.html_root().join("stray.html"), "stray").unwrap();

    run(&fixture).code(0);
    let second = fs::read_to_string(fixture.html_root().join("index.html")).unwrap();

    assert_eq!(without_timestamp(first), without_timestamp(second));
    assert!(!fixture.html_root().join("stray.html").exists());
}

/// A failing compiler is reported with its stderr and counted as a failure.
#[test]
fn test_compiler_failure_is_reported() {
    if should_skip_git_tests() {
        return;
    }
    let fixture = TestFixture::new();
    let a = fixture.git_repo("a", &[("docs/index.rst", "Welcome\n")]);
    let fixture = fixture.with_config(&format!("repos:\n  - name: a\n    url: {a}\n"));

    let failing = fixture.path().join("bin").join("failing-sphinx-build");
    fs::create_dir_all(failing.parent().unwrap()).unwrap();
    fs::write(&failing, "#!/bin/sh\necho 'extension error' >&2\nexit 2\n").unwrap();
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&failing, fs::Permissions::from_mode(0o755)).unwrap();
    }

    let mut cmd = cargo_bin_cmd!("docs-hub");
    cmd.current_dir(fixture.path())
        .env_remove("RUST_LOG")
        .env_remove("DOCS_HUB_CONFIG")
        .env("DOCS_HUB_SPHINX_BUILD", &failing)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("extension error"))
        .stderr(predicate::str::contains("0/1"));
}
