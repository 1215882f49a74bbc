use super::*;
use std::fs::{self, File};
use std::time::{Duration, SystemTime};
use tempfile::tempdir;

fn write_log(dir: &Path, name: &str, body: &str, age_secs: u64) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    let mtime = SystemTime::now() - Duration::from_secs(age_secs);
    File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(mtime)
        .unwrap();
    path
}

#[test]
fn test_missing_store_has_no_records() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("task-logs").join("daily");
    assert!(collect_log_records(&missing).is_empty());
    assert!(find_latest_record(&missing).is_none());
    assert!(previous_agent(&missing, &AttributionChain::default()).is_none());
}

#[test]
fn test_only_markdown_files_are_records() {
    let dir = tempdir().unwrap();
    write_log(dir.path(), "a__x__completed.md", "", 30);
    write_log(dir.path(), "b__y__completed.txt", "", 10);
    fs::create_dir(dir.path().join("nested.md")).unwrap();

    let records = collect_log_records(dir.path());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].file_name(), "a__x__completed.md");
}

#[test]
fn test_hidden_files_are_not_records() {
    let dir = tempdir().unwrap();
    write_log(
        dir.path(),
        "2026-02-20T07-00-00Z__real-agent__completed.md",
        "",
        100,
    );
    write_log(
        dir.path(),
        ".2026-02-21T07-00-00Z__ghost-agent__completed.md",
        "",
        1,
    );

    let records = collect_log_records(dir.path());
    assert_eq!(records.len(), 1);
    let agent = previous_agent(dir.path(), &AttributionChain::default()).unwrap();
    assert_eq!(agent.as_str(), "real-agent");
}

#[test]
fn test_latest_by_modification_time_not_name() {
    let dir = tempdir().unwrap();
    write_log(dir.path(), "2026-02-21T00-00-00Z__newer-name__completed.md", "", 300);
    write_log(dir.path(), "2026-02-20T00-00-00Z__older-name__completed.md", "", 5);

    let latest = find_latest_record(dir.path()).unwrap();
    assert_eq!(
        latest.file_name(),
        "2026-02-20T00-00-00Z__older-name__completed.md"
    );
}

#[test]
fn test_mtime_tie_breaks_on_greatest_name() {
    let now = SystemTime::now();
    let records = vec![
        LogRecord {
            path: PathBuf::from("logs/b.md"),
            modified: now,
        },
        LogRecord {
            path: PathBuf::from("logs/c.md"),
            modified: now,
        },
        LogRecord {
            path: PathBuf::from("logs/a.md"),
            modified: now,
        },
    ];
    let latest = latest_record(records.clone()).unwrap();
    assert_eq!(latest.file_name(), "c.md");

    let mut reversed = records;
    reversed.reverse();
    assert_eq!(latest_record(reversed).unwrap().file_name(), "c.md");
}

#[test]
fn test_previous_agent_from_frontmatter() {
    let dir = tempdir().unwrap();
    write_log(
        dir.path(),
        "2026-02-20T07-00-00Z__name-agent__completed.md",
        "---\ncadence: daily\nagent: body-agent\nstatus: completed\n---\n",
        1,
    );
    let agent = previous_agent(dir.path(), &AttributionChain::default()).unwrap();
    assert_eq!(agent.as_str(), "body-agent");
}

#[test]
fn test_previous_agent_from_filename() {
    let dir = tempdir().unwrap();
    write_log(dir.path(), "old__stale-agent__completed.md", "", 100);
    write_log(dir.path(), "new__fresh-agent__failed.md", "# no frontmatter\n", 1);
    let agent = previous_agent(dir.path(), &AttributionChain::default()).unwrap();
    assert_eq!(agent.as_str(), "fresh-agent");
}

#[test]
fn test_previous_agent_unknown_when_unattributable() {
    let dir = tempdir().unwrap();
    write_log(dir.path(), "attributed__a__completed.md", "", 100);
    write_log(dir.path(), "notes.md", "just notes\n", 1);
    assert!(previous_agent(dir.path(), &AttributionChain::default()).is_none());
}

#[test]
fn test_store_path_with_glob_metacharacters() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("logs [daily]");
    fs::create_dir(&store).unwrap();
    write_log(&store, "t__bracket-agent__completed.md", "", 1);

    let agent = previous_agent(&store, &AttributionChain::default()).unwrap();
    assert_eq!(agent.as_str(), "bracket-agent");
}
