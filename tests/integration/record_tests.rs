//! Recording through the binary, with and without overrides.

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::util::{daily_files, dulog_command, lines, written_path, HEADER};

#[test]
fn no_args_records_home_into_disk_reports() {
    let home = tempfile::tempdir().unwrap();
    let out = dulog_command(home.path()).output().unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let path = written_path(&out.stdout);
    let reports = home.path().join("disk_reports");
    assert_eq!(path.parent(), Some(reports.as_path()));
    assert_eq!(daily_files(&reports), vec![path.clone()]);

    let content = lines(&path);
    assert_eq!(content.len(), 2);
    assert_eq!(content[0], HEADER);

    let fields: Vec<&str> = content[1].split(',').collect();
    assert_eq!(fields.len(), 9);
    assert_eq!(fields[1], home.path().to_string_lossy());
    assert!(fields[5].split_once('.').map_or(false, |(_, frac)| frac.len() == 2));
}

#[test]
fn repeated_runs_append_rows_under_one_header() {
    let home = tempfile::tempdir().unwrap();
    for _ in 0..3 {
        dulog_command(home.path()).assert().success();
    }

    // A run that straddles midnight splits across two files; each still has one header.
    let files = daily_files(&home.path().join("disk_reports"));
    let mut rows = 0;
    for f in &files {
        let content = lines(f);
        assert_eq!(content[0], HEADER);
        assert_eq!(content.iter().filter(|l| l.as_str() == HEADER).count(), 1);
        rows += content.len() - 1;
    }
    assert_eq!(rows, 3);
}

#[test]
fn explicit_path_and_output_dir() {
    let home = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    let out_dir = home.path().join("custom").join("reports");

    let out = dulog_command(home.path())
        .arg("--path")
        .arg(target.path())
        .arg("-o")
        .arg(&out_dir)
        .output()
        .unwrap();
    assert!(out.status.success());

    let path = written_path(&out.stdout);
    assert_eq!(path.parent(), Some(out_dir.as_path()));
    assert!(lines(&path)[1].contains(&*target.path().to_string_lossy()));
    assert!(!home.path().join("disk_reports").exists());
}

#[test]
fn missing_path_fails_without_writing() {
    let home = tempfile::tempdir().unwrap();
    let out_dir = home.path().join("reports");

    dulog_command(home.path())
        .arg("--path")
        .arg(home.path().join("does-not-exist"))
        .arg("--output-dir")
        .arg(&out_dir)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to read filesystem statistics"));

    assert!(daily_files(&out_dir).is_empty());
}

#[test]
fn json_prints_the_sample() {
    let home = tempfile::tempdir().unwrap();
    dulog_command(home.path())
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote disk usage to: "))
        .stdout(predicate::str::contains("\"free_percent\""))
        .stdout(predicate::str::contains("\"total_human\""));
}

#[test]
fn locked_run_writes_header_once() {
    let home = tempfile::tempdir().unwrap();
    dulog_command(home.path()).arg("--lock").assert().success();
    dulog_command(home.path()).arg("--lock").assert().success();

    let files = daily_files(&home.path().join("disk_reports"));
    let headers: usize = files
        .iter()
        .map(|f| lines(f).iter().filter(|l| l.as_str() == HEADER).count())
        .sum();
    assert_eq!(headers, files.len());
}

#[test]
fn completions_mention_binary() {
    let home = tempfile::tempdir().unwrap();
    dulog_command(home.path())
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dulog"));
    assert!(!home.path().join("disk_reports").exists());
}
