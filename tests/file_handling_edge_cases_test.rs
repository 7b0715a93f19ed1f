//! File Handling Edge Cases Tests
//!
//! Tests that the detector handles problematic files predictably:
//! - Non-UTF8 encodings (Latin-1, UTF-16)
//! - Multi-byte characters before a literal
//! - Large files
//! - Symlinks (to files, directories, broken)
//!
//! Unreadable input must fail the run with an I/O error rather than be
//! skipped silently.

mod common;

use common::{raw_values, scan, TestProject};
use numlint::{collect_source_files, DetectError, DetectorConfig};
use std::fs;

// ============================================================================
// Encodings
// ============================================================================

/// A Latin-1 file is not valid UTF-8 and fails the run
#[tokio::test]
async fn test_non_utf8_file_encoding() {
    println!("[Test] Testing Latin-1 encoded file handling...");

    let project = TestProject::new().expect("Failed to create project");
    let path = project.project_dir().join("latin1.js");

    // // Autor: José\nwait(5);
    let latin1_bytes: Vec<u8> = vec![
        0x2f, 0x2f, 0x20, 0x41, 0x75, 0x74, 0x6f, 0x72, 0x3a, 0x20, 0x4a, 0x6f, 0x73, 0xe9, 0x0a,
        0x77, 0x61, 0x69, 0x74, 0x28, 0x35, 0x29, 0x3b, 0x0a,
    ];
    fs::write(&path, &latin1_bytes).expect("Failed to write Latin-1 file");

    let err = scan(vec![path.clone()], DetectorConfig::default())
        .await
        .expect_err("Latin-1 input should fail the run");

    match err.downcast::<DetectError>() {
        Ok(DetectError::Io { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("expected Io error, got {:?}", other),
    }
    println!("[Test] ✅ Latin-1 file rejected with an I/O error");
}

/// UTF-16 with a BOM is rejected the same way
#[tokio::test]
async fn test_utf16_file_handling() {
    println!("[Test] Testing UTF-16 file handling...");

    let project = TestProject::new().expect("Failed to create project");
    let path = project.project_dir().join("utf16.js");

    let mut bytes = vec![0xff, 0xfe];
    for unit in "wait(5);".encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    fs::write(&path, &bytes).expect("Failed to write UTF-16 file");

    let err = scan(vec![path], DetectorConfig::default())
        .await
        .expect_err("UTF-16 input should fail the run");
    assert!(matches!(
        err.downcast::<DetectError>(),
        Ok(DetectError::Io { .. })
    ));
    println!("[Test] ✅ UTF-16 file rejected with an I/O error");
}

/// Columns are byte offsets, so slicing the line at them yields the literal
#[tokio::test]
async fn test_multibyte_characters_before_literal() {
    let project = TestProject::new().expect("Failed to create project");
    let findings = project
        .scan_source(
            "unicode.js",
            "greet(\"héllo wörld ✓\", 12);",
            DetectorConfig::default(),
        )
        .await
        .expect("Scan failed");

    assert_eq!(findings.len(), 1);
    let finding = &findings[0];
    assert_eq!(
        &finding.line_source[finding.start_column..finding.end_column],
        "12"
    );
}

// ============================================================================
// Large files
// ============================================================================

/// Every literal of a large file is reported, in line order
#[tokio::test]
async fn test_large_file_reported_in_order() {
    println!("[Test] Testing large file handling...");

    let line_count = 5_000;
    let content: String = (1..=line_count)
        .map(|i| format!("tick({});\n", i))
        .collect();

    let project = TestProject::new().expect("Failed to create project");
    let findings = project
        .scan_source("large.js", &content, DetectorConfig::default())
        .await
        .expect("Scan failed");

    assert_eq!(findings.len(), line_count);
    assert!(findings
        .windows(2)
        .all(|pair| pair[0].line_number < pair[1].line_number));
    assert_eq!(findings[0].file_length, line_count + 1);
    println!("[Test] ✅ {} findings reported in order", findings.len());
}

/// Many files scanned in one run all contribute findings
#[tokio::test]
async fn test_many_files_in_one_run() {
    let project = TestProject::new().expect("Failed to create project");
    let paths: Vec<_> = (0..50)
        .map(|i| {
            project
                .create_file(&format!("src/file{}.js", i), "retry(3);\nwait(250);")
                .expect("Failed to create file")
        })
        .collect();

    let report = scan(paths, DetectorConfig::default())
        .await
        .expect("Scan failed");

    assert_eq!(report.summary.file_count, 50);
    assert_eq!(report.summary.finding_count, 100);
    assert_eq!(report.findings.len(), 100);

    // Files interleave, but each file's findings stay in document order
    for i in 0..50 {
        let suffix = format!("file{}.js", i);
        let per_file: Vec<_> = report
            .findings
            .iter()
            .filter(|f| f.file.ends_with(&suffix))
            .cloned()
            .collect();
        assert_eq!(raw_values(&per_file), vec!["3", "250"]);
    }
}

// ============================================================================
// Symlinks
// ============================================================================

/// A symlink named explicitly is read through
#[cfg(unix)]
#[tokio::test]
async fn test_symlink_to_file() {
    println!("[Test] Testing symlink to file...");

    let project = TestProject::new().expect("Failed to create project");
    let real = project.create_file("real.js", "wait(30);").expect("Failed to create file");
    let link = project.project_dir().join("link.js");
    std::os::unix::fs::symlink(&real, &link).expect("Failed to create symlink");

    let report = scan(vec![link], DetectorConfig::default())
        .await
        .expect("Scan failed");
    assert_eq!(raw_values(&report.findings), vec!["30"]);
    println!("[Test] ✅ Content read successfully through symlink");
}

/// Directory expansion does not follow symlinks
#[cfg(unix)]
#[test]
fn test_symlink_to_directory_not_followed() {
    println!("[Test] Testing symlink to directory...");

    let project = TestProject::new().expect("Failed to create project");
    let real = project
        .create_file("real_dir/app.js", "wait(30);")
        .expect("Failed to create file");
    let link_dir = project.project_dir().join("link_dir");
    std::os::unix::fs::symlink(project.project_dir().join("real_dir"), &link_dir)
        .expect("Failed to create directory symlink");

    // A link back to the root must not cause an endless walk
    std::os::unix::fs::symlink(project.project_dir(), project.project_dir().join("loop"))
        .expect("Failed to create loop symlink");

    let files = collect_source_files(&[project.project_dir()]);
    assert_eq!(files, vec![real]);
    println!("[Test] ✅ Directory symlinks skipped without infinite loop");
}

/// A broken symlink named explicitly fails the run
#[cfg(unix)]
#[tokio::test]
async fn test_broken_symlink() {
    println!("[Test] Testing broken symlink...");

    let project = TestProject::new().expect("Failed to create project");
    let broken = project.project_dir().join("broken_link.js");
    std::os::unix::fs::symlink(project.project_dir().join("nonexistent.js"), &broken)
        .expect("Failed to create broken symlink");

    assert!(broken.symlink_metadata().is_ok(), "Symlink should exist");

    let err = scan(vec![broken], DetectorConfig::default())
        .await
        .expect_err("Broken symlink should fail the run");
    assert!(matches!(
        err.downcast::<DetectError>(),
        Ok(DetectError::Io { .. })
    ));
    println!("[Test] ✅ Broken symlink reported as an I/O error");
}

/// Broken symlinks inside a directory are ignored by expansion
#[cfg(unix)]
#[test]
fn test_broken_symlink_in_directory_skipped() {
    let project = TestProject::new().expect("Failed to create project");
    let real = project.create_file("ok.js", "wait(1);").expect("Failed to create file");
    std::os::unix::fs::symlink(
        project.project_dir().join("nonexistent.js"),
        project.project_dir().join("dangling.js"),
    )
    .expect("Failed to create broken symlink");

    let files = collect_source_files(&[project.project_dir()]);
    assert_eq!(files, vec![real]);
}
