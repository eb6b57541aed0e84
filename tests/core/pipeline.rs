use license_gate::core::check::run_check;
use license_gate::core::discover::Selection;
use license_gate::core::error::LicenseGateError;
use license_gate::core::matcher::{self, FailureReason};
use license_gate::core::normalize::normalize;
use license_gate::core::report::{self, Outcome};
use license_gate::core::template::{CANONICAL_HEADER, LicenseTemplate};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn gate(root: &Path) -> (String, report::RunResult) {
    colored::control::set_override(false);
    let verdicts = run_check(
        root,
        &Selection::new("rs", vec![]),
        &LicenseTemplate::canonical(),
        None,
    )
    .expect("check should run");
    let mut buf = Vec::new();
    let result = report::aggregate(verdicts, &mut buf).unwrap();
    (String::from_utf8(buf).unwrap(), result)
}

#[test]
fn header_then_code_passes() {
    let tmp = tempdir().unwrap();
    write(
        tmp.path(),
        "main.rs",
        &format!("{}\nmod cli;\n\nfn main() {{}}\n", CANONICAL_HEADER),
    );

    let (out, result) = gate(tmp.path());
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("✔ "));
    assert!(lines[0].ends_with("main.rs contains the expected license"));
    assert_eq!(result.exit_code(), 0);
}

#[test]
fn single_character_change_fails() {
    let tmp = tempdir().unwrap();
    write(
        tmp.path(),
        "lib.rs",
        &CANONICAL_HEADER.replace("Copyright (C) 2025", "Copyright (C) 2026"),
    );

    let (out, result) = gate(tmp.path());
    assert!(out.lines().next().unwrap().starts_with("❌ "));
    assert!(out.contains("lib.rs does NOT contain the expected license"));
    assert_eq!(result.outcome(), Outcome::SomeFailed);
    assert_eq!(result.exit_code(), 1);
}

#[test]
fn whitespace_change_fails() {
    let tmp = tempdir().unwrap();
    // Two spaces before "See the" in the canonical text.
    write(
        tmp.path(),
        "lib.rs",
        &CANONICAL_HEADER.replace("PURPOSE.  See", "PURPOSE. See"),
    );

    let (_, result) = gate(tmp.path());
    assert!(!result.all_passed());
}

#[test]
fn crlf_checkout_passes() {
    let tmp = tempdir().unwrap();
    let crlf = format!("{}fn main() {{}}\n", CANONICAL_HEADER).replace('\n', "\r\n");
    write(tmp.path(), "main.rs", &crlf);

    let (out, result) = gate(tmp.path());
    assert!(out.starts_with("✔ "));
    assert!(result.all_passed());
}

#[test]
fn no_matching_files_passes_with_no_file_lines() {
    let tmp = tempdir().unwrap();
    write(tmp.path(), "README.md", "no header here");

    let (out, result) = gate(tmp.path());
    assert_eq!(out, "✔ No files to check\n");
    assert_eq!(result.checked(), 0);
    assert_eq!(result.exit_code(), 0);
}

#[test]
fn missing_root_is_fatal() {
    let tmp = tempdir().unwrap();
    let err = run_check(
        &tmp.path().join("missing"),
        &Selection::new("rs", vec![]),
        &LicenseTemplate::canonical(),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, LicenseGateError::DiscoveryError(_)));
}

#[test]
fn every_file_gets_exactly_one_verdict() {
    let tmp = tempdir().unwrap();
    let good = format!("{}pub fn f() {{}}\n", CANONICAL_HEADER);
    write(tmp.path(), "a.rs", &good);
    write(tmp.path(), "b/c.rs", "pub fn g() {}\n");
    write(tmp.path(), "b/d/e.rs", &good);
    write(tmp.path(), "b/d/e.txt", "ignored");

    let (out, result) = gate(tmp.path());
    assert_eq!(result.checked(), 3);
    assert_eq!(result.failed(), 1);
    assert_eq!(out.lines().count(), 4);
    assert!(out.lines().last().unwrap().contains("1 of 3 file(s)"));
}

#[cfg(target_os = "linux")]
#[test]
fn fifo_fails_without_aborting() {
    let tmp = tempdir().unwrap();
    let good = format!("{}pub fn f() {{}}\n", CANONICAL_HEADER);
    write(tmp.path(), "a.rs", &good);
    write(tmp.path(), "c.rs", &good);
    // Not a regular file whatever the caller's privileges; reading it would block.
    let status = std::process::Command::new("mkfifo")
        .arg(tmp.path().join("b.rs"))
        .status()
        .unwrap();
    assert!(status.success());

    let verdicts = run_check(
        tmp.path(),
        &Selection::new("rs", vec![]),
        &LicenseTemplate::canonical(),
        None,
    )
    .unwrap();
    assert_eq!(verdicts.len(), 3);
    assert!(verdicts[0].passed);
    assert_eq!(verdicts[1].path, tmp.path().join("b.rs"));
    assert!(matches!(verdicts[1].reason, Some(FailureReason::Unreadable(_))));
    assert!(verdicts[2].passed);
}

#[cfg(unix)]
#[test]
fn dangling_symlink_gets_a_failed_verdict() {
    let tmp = tempdir().unwrap();
    let good = format!("{}pub fn f() {{}}\n", CANONICAL_HEADER);
    write(tmp.path(), "a.rs", &good);
    write(tmp.path(), "c.rs", &good);
    std::os::unix::fs::symlink(tmp.path().join("gone.rs"), tmp.path().join("b.rs")).unwrap();

    let (out, result) = gate(tmp.path());
    assert_eq!(result.checked(), 3);
    assert_eq!(result.failed(), 1);
    assert!(matches!(
        result.verdicts()[1].reason,
        Some(FailureReason::Unreadable(_))
    ));
    assert!(out.ends_with("❌ 1 of 3 file(s) do NOT contain the expected license\n"));
}

#[test]
fn build_output_dirs_are_checked_like_any_other() {
    let tmp = tempdir().unwrap();
    write(tmp.path(), "lib.rs", &format!("{}pub mod target;\n", CANONICAL_HEADER));
    write(tmp.path(), "target/mod.rs", "pub fn f() {}\n");

    let (_, result) = gate(tmp.path());
    assert_eq!(result.checked(), 2);
    assert_eq!(result.verdicts()[1].path, tmp.path().join("target").join("mod.rs"));
    assert!(!result.verdicts()[1].passed);
    assert_eq!(result.outcome(), Outcome::SomeFailed);
}

#[test]
fn matcher_agrees_with_reference_containment() {
    let samples = ["", "a", "ab", "abc", "// x\n// y\n", "xx// x\n// y\nyy", "é€"];
    for a in samples {
        for b in samples {
            let reference = (0..=a.len())
                .filter(|&i| a.is_char_boundary(i))
                .any(|i| a[i..].starts_with(b));
            assert_eq!(matcher::matches(a, b), reference, "matches({:?}, {:?})", a, b);
        }
    }
}

#[test]
fn normalize_is_identity_without_cr() {
    for t in ["", "line\n", CANONICAL_HEADER] {
        assert_eq!(normalize(t), t);
    }
}
