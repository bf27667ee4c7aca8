use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn diary(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("diary").unwrap();
    cmd.arg("--data-dir").arg(data_dir).arg("--no-color");
    cmd
}

#[test]
fn test_write_then_show_page() {
    let temp_dir = tempfile::tempdir().unwrap();

    diary(temp_dir.path())
        .args(["write", "3", "Today", "was", "good"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 3 saved"));

    diary(temp_dir.path())
        .args(["show", "--page", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Today was good"))
        .stdout(predicate::str::contains("My Diary"));

    let stored = std::fs::read_to_string(temp_dir.path().join("diary-entries.json")).unwrap();
    assert!(stored.contains(r#"{"id":3,"text":"Today was good"}"#));
}

#[test]
fn test_show_fresh_diary() {
    let temp_dir = tempfile::tempdir().unwrap();

    diary(temp_dir.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Write your day..."))
        .stdout(predicate::str::contains("‹ Prev"))
        .stdout(predicate::str::contains("Next ›"));

    // Opening persists the defaults
    assert!(temp_dir.path().join("diary-entries.json").exists());
    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("diary-sticky-notes.json")).unwrap(),
        "[]"
    );
}

#[test]
fn test_sticky_add_and_list() {
    let temp_dir = tempfile::tempdir().unwrap();

    diary(temp_dir.path())
        .args(["sticky", "add", "500", "300"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sticky note placed"));

    diary(temp_dir.path())
        .args(["sticky", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(420, 220)"))
        .stdout(predicate::str::contains("(empty)"));
}

#[test]
fn test_sticky_outside_book_is_not_placed() {
    let temp_dir = tempfile::tempdir().unwrap();

    diary(temp_dir.path())
        .args(["sticky", "add", "2000", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("outside the book"));

    diary(temp_dir.path())
        .args(["sticky", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No sticky notes."));
}

#[test]
fn test_sticky_unknown_id_warns() {
    let temp_dir = tempfile::tempdir().unwrap();

    diary(temp_dir.path())
        .args(["sticky", "rm", "deadbeef"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No sticky note matches deadbeef"));
}

#[test]
fn test_config_set_and_get() {
    let temp_dir = tempfile::tempdir().unwrap();

    diary(temp_dir.path())
        .args(["config", "page-count", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("page-count = 4"));

    diary(temp_dir.path())
        .args(["config", "page-count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("page-count = 4\n"));

    diary(temp_dir.path())
        .args(["write", "5", "too far"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 5 does not exist"));
}

#[test]
fn test_config_rejects_invalid_values() {
    let temp_dir = tempfile::tempdir().unwrap();

    diary(temp_dir.path())
        .args(["config", "page-count", "5"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));

    diary(temp_dir.path())
        .args(["config", "colour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_config_repairs_invalid_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("config.json"), r#"{"page_count": 7}"#).unwrap();

    diary(temp_dir.path())
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("page-count"));

    diary(temp_dir.path())
        .args(["config", "page-count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("page-count = 7"));

    diary(temp_dir.path())
        .args(["config", "page-count", "8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("page-count = 8"));

    diary(temp_dir.path()).arg("show").assert().success();
}

#[test]
fn test_link() {
    let temp_dir = tempfile::tempdir().unwrap();

    diary(temp_dir.path())
        .arg("link")
        .assert()
        .success()
        .stdout(predicate::str::diff("https://vercel.com/\n"));
}

#[test]
fn test_session_over_stdin() {
    let temp_dir = tempfile::tempdir().unwrap();

    diary(temp_dir.path())
        .args(["config", "flip-duration-ms", "0"])
        .assert()
        .success();

    diary(temp_dir.path())
        .write_stdin("write 3 hello there\nnext\nsticky\nclick 100 100\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Turning forward: page 2 → page 3"))
        .stdout(predicate::str::contains("hello there"))
        .stdout(predicate::str::contains(
            "Click anywhere on the page to place the sticky",
        ))
        .stdout(predicate::str::contains("Sticky note placed"));

    let notes = std::fs::read_to_string(temp_dir.path().join("diary-sticky-notes.json")).unwrap();
    assert!(notes.contains(r#""x":20.0"#));
    assert!(notes.contains(r#""r":"#));
}

#[test]
fn test_malformed_store_exits_with_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("diary-entries.json"), "not json").unwrap();

    diary(temp_dir.path())
        .arg("show")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Serialization error"));

    // Left untouched for the user to repair
    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("diary-entries.json")).unwrap(),
        "not json"
    );
}

#[test]
fn test_odd_entry_list_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        temp_dir.path().join("diary-entries.json"),
        r#"[{"id":0,"text":"alone"}]"#,
    )
    .unwrap();

    diary(temp_dir.path())
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed record"));
}
