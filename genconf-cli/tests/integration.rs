use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

fn fonts_dir() -> Option<PathBuf> {
    if let Ok(env_override) = env::var("GENCONF_TEST_FONTS") {
        let path = PathBuf::from(env_override);
        if let Ok(dir) = path.canonicalize() {
            return Some(dir);
        }
    }

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let candidates = [
        manifest_dir.join("..").join("test-fonts"),
        manifest_dir.join("test-fonts"),
    ];

    candidates.into_iter().find_map(|c| c.canonicalize().ok())
}

fn genconf(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fc-genconf"))
        .args(args)
        .output()
        .expect("run fc-genconf")
}

#[test]
fn empty_directory_prints_nothing_and_succeeds() {
    let tmp = tempdir().expect("tempdir");
    let output = genconf(&["generate", tmp.path().to_str().expect("utf8 path")]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_path_fails_with_error() {
    let tmp = tempdir().expect("tempdir");
    let missing = tmp.path().join("missing");
    let output = genconf(&["generate", missing.to_str().expect("utf8 path")]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: unable to scan"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn output_file_is_written_even_when_empty() {
    let tmp = tempdir().expect("tempdir");
    let fonts = tmp.path().join("fonts");
    fs::create_dir_all(&fonts).expect("mkdir");
    let out = tmp.path().join("local.conf");
    fs::write(&out, "stale").expect("seed output");

    let output = genconf(&[
        "generate",
        "-o",
        out.to_str().expect("utf8 path"),
        fonts.to_str().expect("utf8 path"),
    ]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(fs::read_to_string(&out).expect("read output"), "");
}

#[test]
fn unwritable_output_fails() {
    let tmp = tempdir().expect("tempdir");
    let out = tmp.path().join("no-such-dir").join("local.conf");

    let output = genconf(&[
        "generate",
        "-o",
        out.to_str().expect("utf8 path"),
        tmp.path().to_str().expect("utf8 path"),
    ]);

    assert!(!output.status.success());
    assert!(!out.exists());
}

#[test]
fn invalid_generic_family_is_a_usage_error() {
    let tmp = tempdir().expect("tempdir");
    let output = genconf(&["generate", "-g", "gothic", tmp.path().to_str().expect("utf8 path")]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid generic family"), "stderr: {stderr}");
}

#[test]
fn generate_with_languages_emits_one_alias_per_family() {
    let fonts = match fonts_dir() {
        Some(dir) => dir,
        None => return, // skip when fixtures are unavailable
    };

    let output = Command::new(env!("CARGO_BIN_EXE_fc-genconf"))
        .args(["generate", "-g", "sans-serif", "-l", "en,ja"])
        .arg(&fonts)
        .output()
        .expect("run fc-genconf");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    assert!(stdout.starts_with("<?xml version=\"1.0\"?>\n"));
    assert!(stdout.ends_with("</fontconfig>\n"));

    let aliases = stdout.matches("<alias>").count();
    let matches = stdout.matches("<match pattern=\"pattern\">").count();
    assert!(aliases > 0);
    assert_eq!(matches, aliases * 2);
}

#[test]
fn scan_json_lists_fixture_families() {
    let fonts = match fonts_dir() {
        Some(dir) => dir,
        None => return, // skip when fixtures are unavailable
    };

    let output = Command::new(env!("CARGO_BIN_EXE_fc-genconf"))
        .args(["scan", "--json"])
        .arg(&fonts)
        .output()
        .expect("run fc-genconf");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let parsed: Value = serde_json::from_slice(&output.stdout).expect("parse json output");
    let arr = parsed.as_array().expect("scan --json returns a JSON array");
    assert!(!arr.is_empty());
    assert!(arr.iter().all(|entry| entry["path"].is_string()));
}
