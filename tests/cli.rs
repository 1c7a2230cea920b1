//! End-to-end tests driving the `todo` binary against a temp task file.

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

fn todo_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("todo").unwrap();
    cmd.arg("--db").arg(dir.path().join("todos.json"));
    cmd
}

#[test]
fn add_then_list_shows_the_task() {
    let dir = tempfile::tempdir().unwrap();

    todo_cmd(&dir)
        .args(["add", "Write the weekly report", "--category", "work"])
        .assert()
        .success()
        .stdout(contains("Added task"));

    todo_cmd(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Write the weekly report"))
        .stdout(contains("work"))
        .stdout(contains("just now"))
        .stdout(contains("1 active, 0 completed (1 shown, 1 total)"));
}

#[test]
fn empty_text_is_rejected() {
    let dir = tempfile::tempdir().unwrap();

    todo_cmd(&dir)
        .args(["add", "   "])
        .assert()
        .failure()
        .stderr(contains("Task text cannot be empty"));

    todo_cmd(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Your task list is empty"));
}

#[test]
fn unknown_category_is_rejected() {
    let dir = tempfile::tempdir().unwrap();

    todo_cmd(&dir)
        .args(["add", "mow the lawn", "--category", "chores"])
        .assert()
        .failure()
        .stderr(contains("Unknown category 'chores'"));
}

#[test]
fn toggle_by_exact_text_completes_the_task() {
    let dir = tempfile::tempdir().unwrap();

    todo_cmd(&dir).args(["add", "stretch"]).assert().success();

    todo_cmd(&dir)
        .args(["toggle", "stretch"])
        .assert()
        .success()
        .stdout(contains("marked complete"));

    todo_cmd(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Completed"))
        .stdout(contains("[x] stretch"))
        .stdout(contains("0 active, 1 completed"));
}

#[test]
fn unknown_id_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();

    todo_cmd(&dir)
        .args(["toggle", "no-such-task"])
        .assert()
        .failure()
        .stderr(contains("No task found for 'no-such-task'"));
}

#[test]
fn remove_deletes_with_yes_flag() {
    let dir = tempfile::tempdir().unwrap();

    todo_cmd(&dir).args(["add", "doomed"]).assert().success();

    todo_cmd(&dir)
        .args(["remove", "doomed", "--yes"])
        .assert()
        .success()
        .stdout(contains("Deleted task \"doomed\""));

    todo_cmd(&dir)
        .args(["toggle", "doomed"])
        .assert()
        .failure()
        .stderr(contains("No task found"));
}

#[test]
fn move_reorders_the_active_group() {
    let dir = tempfile::tempdir().unwrap();

    for text in ["a", "b", "c"] {
        todo_cmd(&dir).args(["add", text]).assert().success();
    }

    // Newest-first order is c, b, a; send c to the bottom.
    todo_cmd(&dir)
        .args(["move", "c", "--to", "3"])
        .assert()
        .success()
        .stdout(contains("Moved task to position 3"));

    let output = todo_cmd(&dir).arg("list").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let pos = |needle: &str| stdout.find(needle).unwrap();
    assert!(pos("[ ] b") < pos("[ ] a"));
    assert!(pos("[ ] a") < pos("[ ] c"));
}

#[test]
fn filtered_list_reports_empty_for_filter() {
    let dir = tempfile::tempdir().unwrap();

    todo_cmd(&dir)
        .args(["add", "buy milk", "--category", "shopping"])
        .assert()
        .success();

    todo_cmd(&dir)
        .args(["list", "--category", "personal"])
        .assert()
        .success()
        .stdout(contains("No tasks in 'personal' (1 elsewhere)"));
}

#[test]
fn list_can_restrict_to_one_group() {
    let dir = tempfile::tempdir().unwrap();

    todo_cmd(&dir).args(["add", "open task"]).assert().success();
    todo_cmd(&dir).args(["add", "done task"]).assert().success();
    todo_cmd(&dir).args(["toggle", "done task"]).assert().success();

    todo_cmd(&dir)
        .args(["list", "--active-only"])
        .assert()
        .success()
        .stdout(contains("open task"))
        .stdout(contains("done task").not());

    todo_cmd(&dir)
        .args(["list", "--completed-only"])
        .assert()
        .success()
        .stdout(contains("[x] done task"))
        .stdout(contains("open task").not());
}

#[test]
fn category_command_updates_and_counts() {
    let dir = tempfile::tempdir().unwrap();

    todo_cmd(&dir).args(["add", "call the dentist"]).assert().success();

    todo_cmd(&dir)
        .args(["category", "call the dentist", "health"])
        .assert()
        .success()
        .stdout(contains("is now 'health'"));

    todo_cmd(&dir)
        .arg("categories")
        .assert()
        .success()
        .stdout(contains("health"))
        .stdout(contains("all"));
}

#[test]
fn completed_task_text_is_locked() {
    let dir = tempfile::tempdir().unwrap();

    todo_cmd(&dir).args(["add", "ship it"]).assert().success();
    todo_cmd(&dir).args(["toggle", "ship it"]).assert().success();

    todo_cmd(&dir)
        .args(["edit", "ship it", "ship it harder"])
        .assert()
        .failure()
        .stderr(contains("Completed tasks cannot be edited"));
}

#[test]
fn malformed_task_file_loads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("todos.json"), "{definitely not json").unwrap();

    todo_cmd(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Your task list is empty"));
}
