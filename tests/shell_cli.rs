use assert_cmd::Command;
use predicates::prelude::*;

fn querydeck(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("querydeck").unwrap();
    cmd.env("QUERYDECK_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("QUERYDECK_USER")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn create_save_push_then_list() {
    let home = tempfile::tempdir().unwrap();

    querydeck(home.path())
        .args(["--user", "alice", "shell"])
        .write_stdin("new\nset select 1\nsave\npush\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created query: Untitled Query"))
        .stdout(predicate::str::contains("Saved: Untitled Query"))
        .stdout(predicate::str::contains("Pushed 1 query"));

    assert!(home.path().join("remote/alice/default.json").exists());

    querydeck(home.path())
        .args(["--user", "alice", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Untitled Query  select 1"));
}

#[test]
fn unsaved_edit_prompts_before_new() {
    let home = tempfile::tempdir().unwrap();

    querydeck(home.path())
        .args(["--user", "alice"])
        .write_stdin("new\nrename First\nset select 1\nnew\ny\nlist\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Save changes before creating a new query? [y/N]",
        ))
        .stdout(predicate::str::contains("Saved: First"))
        .stdout(predicate::str::contains("Leaving with changes that were not pushed."));
}

#[test]
fn declining_the_prompt_discards_the_edit() {
    let home = tempfile::tempdir().unwrap();

    querydeck(home.path())
        .args(["--user", "bob", "--instance", "analytics"])
        .write_stdin("new\nsave\npush\nset draft\nopen 1\npush\nn\nshow\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Save changes before pushing? [y/N]"))
        .stdout(predicate::str::contains("Unsaved changes discarded."))
        .stdout(predicate::str::contains("Nothing to push."))
        .stdout(predicate::str::contains("(empty)"));
}

#[test]
fn delete_and_recover() {
    let home = tempfile::tempdir().unwrap();

    querydeck(home.path())
        .args(["--user", "alice"])
        .write_stdin("new\nsave\npush\ndelete 1\nrecover 1\ny\npush\nlist\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked for deletion: Untitled Query"))
        .stdout(predicate::str::contains("Recover 'Untitled Query' marked for deletion? [y/N]"))
        .stdout(predicate::str::contains("Recovered: Untitled Query"))
        .stdout(predicate::str::contains("Deleted 1 query").not());
}

#[test]
fn unknown_selector_reports_error_and_continues() {
    let home = tempfile::tempdir().unwrap();

    querydeck(home.path())
        .args(["--user", "alice"])
        .write_stdin("open 7\nlegend\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Query not found: 7"))
        .stdout(predicate::str::contains("marked for deletion on next push"));
}

#[test]
fn requires_a_signed_in_user() {
    let home = tempfile::tempdir().unwrap();

    querydeck(home.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in"));
}

#[test]
fn user_can_come_from_environment() {
    let home = tempfile::tempdir().unwrap();

    querydeck(home.path())
        .env("QUERYDECK_USER", "carol")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No queries yet."));
}

#[test]
fn config_roundtrip() {
    let home = tempfile::tempdir().unwrap();

    querydeck(home.path())
        .args(["config", "push-failure", "advance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration saved."));

    querydeck(home.path())
        .args(["config", "default-query-name", "Scratch"])
        .assert()
        .success();

    querydeck(home.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("push-failure: advance-baseline"))
        .stdout(predicate::str::contains("default-query-name: Scratch"));

    querydeck(home.path())
        .args(["--user", "alice"])
        .write_stdin("new\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created query: Scratch"));
}
