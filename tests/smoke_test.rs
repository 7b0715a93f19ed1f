//! Smoke test to verify test infrastructure works
//!
//! This test verifies that the common test helpers compile and work correctly.

mod common;

use common::{scan, TestProject};
use numlint::DetectorConfig;

#[tokio::test]
async fn test_common_module_works() {
    let project = TestProject::new().unwrap();

    let path = project.create_file("nested/dir/app.js", "var A = 1;").unwrap();
    assert!(path.exists());
    assert!(path.starts_with(project.project_dir()));

    let report = scan(vec![path], DetectorConfig::default()).await.unwrap();
    assert_eq!(report.summary.file_count, 1);
    assert!(report.findings.is_empty());
}
