//! End-to-end checks of the scan, classify, aggregate and export pipeline

use assert_cmd::Command;
use chrono::{Duration as ChronoDuration, Utc};
use file_census::classifier::{explain_unused, explain_zero_byte};
use file_census::export::{build_export, ExportOptions};
use file_census::filter::FilterConfig;
use file_census::scanner::{extract, list_files, DirectSource, ScanCache, ScanOptions};
use file_census::stats::aggregate;
use predicates::prelude::*;
use std::fs::{File, FileTimes};
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

const TEN_MB: u64 = 10 * 1024 * 1024;

fn file_census() -> Command {
    Command::cargo_bin("file-census").unwrap()
}

fn create_sized(path: &Path, size: u64, last_used_days_ago: u64) {
    let file = File::create(path).unwrap();
    file.set_len(size).unwrap();

    let when = SystemTime::now() - Duration::from_secs(last_used_days_ago * 24 * 3600);
    file.set_times(FileTimes::new().set_accessed(when).set_modified(when))
        .unwrap();
}

/// a.txt: empty; b.pdf: 10 MB, last used 90 days ago; c.pdf: 10 MB, used yesterday
fn create_scenario() -> TempDir {
    let dir = TempDir::new().unwrap();
    File::create(dir.path().join("a.txt")).unwrap();
    create_sized(&dir.path().join("b.pdf"), TEN_MB, 90);
    create_sized(&dir.path().join("c.pdf"), TEN_MB, 1);
    dir
}

#[test]
fn test_scenario_classification() {
    let dir = create_scenario();

    let a = extract(&dir.path().join("a.txt")).unwrap();
    let b = extract(&dir.path().join("b.pdf")).unwrap();
    let c = extract(&dir.path().join("c.pdf")).unwrap();

    assert!(explain_zero_byte(&a).is_some());
    assert!(explain_unused(&a, 60).is_none());

    assert!(explain_zero_byte(&b).is_none());
    assert!(explain_unused(&b, 60).is_some());

    assert!(explain_zero_byte(&c).is_none());
    assert!(explain_unused(&c, 60).is_none());
}

#[test]
fn test_scenario_distribution() {
    let dir = create_scenario();
    let files = list_files(dir.path(), &ScanOptions::default()).unwrap();

    let dist = aggregate(&files, &FilterConfig::default(), &mut DirectSource);

    assert_eq!(dist.grand_count, 3);
    assert_eq!(dist.grand_size_bytes, 2 * TEN_MB);
    assert_eq!(dist.stats.len(), 2);
    assert_eq!(dist.stats[0].file_type, "pdf");
    assert_eq!(dist.stats[0].count, 2);
    assert_eq!(dist.stats[0].total_size_bytes, 2 * TEN_MB);
    assert_eq!(dist.stats[1].file_type, "txt");
    assert_eq!(dist.stats[1].count, 1);
}

#[test]
fn test_scenario_export_flags() {
    let dir = create_scenario();
    let files = list_files(dir.path(), &ScanOptions::default()).unwrap();

    let mut cache = ScanCache::new();
    let export = build_export(
        &files,
        &FilterConfig::default(),
        dir.path(),
        &ExportOptions::default(),
        &mut cache,
    );

    let flags = |name: &str| {
        let record = export.files.iter().find(|f| f.name == name).unwrap();
        (record.is_unused, record.is_zero_byte)
    };

    assert_eq!(flags("a.txt"), (false, true));
    assert_eq!(flags("b.pdf"), (true, false));
    assert_eq!(flags("c.pdf"), (false, false));
    assert_eq!(export.file_count, 3);
    assert_eq!(export.total_size, 2 * TEN_MB);
}

#[test]
fn test_cache_and_direct_source_agree() {
    let dir = create_scenario();
    let files = list_files(dir.path(), &ScanOptions::default()).unwrap();
    let filter = FilterConfig::default();

    let mut cache = ScanCache::new();
    let cached = aggregate(&files, &filter, &mut cache);
    let direct = aggregate(&files, &filter, &mut DirectSource);

    assert_eq!(cached, direct);
    assert_eq!(cache.len(), 3);
}

#[test]
fn test_scan_reports_distribution() {
    let dir = create_scenario();

    file_census()
        .arg("scan")
        .arg("--no-color")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("File Type Distribution (3 files, 20 MiB total)"))
        .stdout(predicate::str::contains("pdf"))
        .stdout(predicate::str::contains("File Types:  2"));
}

#[test]
fn test_scan_json_distribution() {
    let dir = create_scenario();

    let output = file_census()
        .arg("scan")
        .arg("--json")
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["grand_count"], 3);
    assert_eq!(json["stats"][0]["file_type"], "pdf");
    assert_eq!(json["stats"][0]["count"], 2);
    assert_eq!(json["stats"][1]["file_type"], "txt");
}

#[test]
fn test_scan_applies_filters() {
    let dir = create_scenario();

    file_census()
        .arg("scan")
        .arg("--no-color")
        .arg("--ext")
        .arg("txt")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(1 files, 0 B total)"));

    file_census()
        .arg("scan")
        .arg("--no-color")
        .arg("--min-size")
        .arg("1MB")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(2 files, 20 MiB total)"));
}

#[test]
fn test_hidden_rule_under_dot_directory_root() {
    // TempDir roots are themselves dot-directories (/tmp/.tmpXXXX)
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("visible.txt"), b"seen").unwrap();
    std::fs::write(dir.path().join(".secret"), b"hidden").unwrap();

    let root = dir.path().canonicalize().unwrap();
    let files = list_files(&root, &ScanOptions::new()).unwrap();
    assert_eq!(files.len(), 2);

    let filter = FilterConfig {
        include_hidden: false,
        ..Default::default()
    }
    .with_scan_root(root);
    let dist = aggregate(&files, &filter, &mut DirectSource);
    assert_eq!(dist.grand_count, 1);
    assert_eq!(dist.stats[0].file_type, "txt");
}

#[test]
fn test_scan_no_hidden_counts_visible_files() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("visible.txt"), b"seen").unwrap();
    std::fs::write(dir.path().join(".secret"), b"hidden").unwrap();
    std::fs::create_dir(dir.path().join(".cache")).unwrap();
    std::fs::write(dir.path().join(".cache/blob.bin"), b"cached").unwrap();

    let output = file_census()
        .arg("scan")
        .arg("--json")
        .arg("--no-hidden")
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["grand_count"], 1);
}

#[test]
fn test_scan_empty_directory() {
    let dir = TempDir::new().unwrap();

    file_census()
        .arg("scan")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No files found matching filters"));
}

#[test]
fn test_scan_nonexistent_path() {
    file_census()
        .arg("scan")
        .arg("/nonexistent/path/12345")
        .assert()
        .failure();
}

#[test]
fn test_find_lists_matches_with_reasons() {
    let dir = create_scenario();

    file_census()
        .arg("find")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt"))
        .stdout(predicate::str::contains("zero-byte: file is empty"))
        .stdout(predicate::str::contains("b.pdf"))
        .stdout(predicate::str::contains("unused: last accessed 90 days ago"))
        .stdout(predicate::str::contains("c.pdf").not())
        .stdout(predicate::str::contains("Matched: 1 unused, 1 zero-byte"));
}

#[test]
fn test_find_zero_byte_only() {
    let dir = create_scenario();

    file_census()
        .arg("find")
        .arg("--zero-byte")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt"))
        .stdout(predicate::str::contains("b.pdf").not());
}

#[test]
fn test_find_custom_threshold() {
    let dir = create_scenario();

    // Nothing is 120 days old
    file_census()
        .arg("find")
        .arg(dir.path())
        .arg("--unused=120")
        .assert()
        .success()
        .stdout(predicate::str::contains("Matched: 0 unused"));
}

#[test]
fn test_find_unused_flag_before_path() {
    let dir = create_scenario();

    file_census()
        .arg("find")
        .arg("--unused")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("b.pdf"))
        .stdout(predicate::str::contains("a.txt").not())
        .stdout(predicate::str::contains("Matched: 1 unused (3 files scanned)"));
}

#[test]
fn test_classification_is_repeatable() {
    let dir = create_scenario();
    let b = extract(&dir.path().join("b.pdf")).unwrap();
    let now = Utc::now();

    let first = file_census::classifier::classify(&b, 60, now);
    let second = file_census::classifier::classify(&b, 60, now + ChronoDuration::seconds(1));
    assert_eq!(first, second);
}
