//! Command-Line Interface Tests
//!
//! Runs the `bam-config` binary against config files on disk and on stdin.

use std::io::Write;

use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::Compression;
use predicates::prelude::*;
use tempfile::NamedTempFile;

const CONFIG_PATH: &str = "tests/data/two_libraries.cfg";
const CONFIG: &str = include_str!("data/two_libraries.cfg");

fn bam_config() -> Command {
    Command::cargo_bin("bam-config").expect("binary should build")
}

#[test]
fn test_libraries_text() {
    bam_config()
        .args(["libraries", CONFIG_PATH])
        .assert()
        .success()
        .stdout(predicate::str::contains("Libraries: 2"))
        .stdout(predicate::str::contains("[0] lib1"))
        .stdout(predicate::str::contains("[1] lib2"))
        .stdout(predicate::str::contains("x.bam: samtools view"))
        .stdout(predicate::str::contains("rg14: lib2 (illumina)"))
        .stdout(predicate::str::contains("Max read window size: 287"));
}

#[test]
fn test_libraries_json() {
    let output = bam_config()
        .args(["libraries", CONFIG_PATH, "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["libraries"].as_array().unwrap().len(), 2);
    assert_eq!(json["libraries"][1]["name"], "lib2");
    assert_eq!(json["bam_files"], serde_json::json!(["x.bam", "y.bam"]));
    assert_eq!(json["readgroup_library"]["rg3"], "lib1");
    assert_eq!(json["max_read_window_size"], 287);
}

#[test]
fn test_libraries_tsv_with_fastq_prefix() {
    bam_config()
        .args([
            "libraries",
            CONFIG_PATH,
            "--format",
            "tsv",
            "--fastq-output-prefix",
            "out",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("index\tname\tbam_file"))
        .stdout(predicate::str::contains("1\tlib2\ty.bam\t475.7600"));
}

#[test]
fn test_libraries_fastq_prefix_text() {
    bam_config()
        .args(["libraries", CONFIG_PATH, "--fastq-output-prefix", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "FASTQ output: out.lib1.1.fastq, out.lib1.2.fastq",
        ));
}

#[test]
fn test_libraries_from_stdin() {
    bam_config()
        .args(["libraries", "-"])
        .write_stdin(CONFIG)
        .assert()
        .success()
        .stdout(predicate::str::contains("Libraries: 2"));
}

#[test]
fn test_libraries_from_gzip() {
    let temp = NamedTempFile::with_suffix(".cfg.gz").unwrap();
    let mut encoder = GzEncoder::new(temp.reopen().unwrap(), Compression::default());
    encoder.write_all(CONFIG.as_bytes()).unwrap();
    encoder.finish().unwrap();

    bam_config()
        .arg("libraries")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Libraries: 2"));
}

#[test]
fn test_libraries_conflicting_exe_fails() {
    let mut temp = NamedTempFile::with_suffix(".cfg").unwrap();
    writeln!(temp, "map:x.bam\tlib:lib1\texe:samtools view").unwrap();
    writeln!(temp, "map:x.bam\tlib:lib2\texe:sambamba view").unwrap();

    bam_config()
        .arg("libraries")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("identical exe commands"));
}

#[test]
fn test_libraries_missing_file_fails() {
    bam_config()
        .args(["libraries", "/nonexistent/bd.cfg"])
        .assert()
        .failure();
}

#[test]
fn test_entries_tsv() {
    let output = bam_config()
        .args(["entries", CONFIG_PATH, "--format", "tsv"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 15);
    assert_eq!(lines[1], "rg1\tlib1\tillumina\tx.bam");
    assert_eq!(lines[14], "rg14\tlib2\tillumina\ty.bam");
}

#[test]
fn test_classify() {
    bam_config()
        .args(["classify", "mean_insert_size", "rEaDlEnGtH", "readgroup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mean_insert_size\tinsert_size_mean"))
        .stdout(predicate::str::contains("rEaDlEnGtH\tread_length"))
        .stdout(predicate::str::contains("readgroup\t-"));
}
