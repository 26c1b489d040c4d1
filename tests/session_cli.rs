use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

/// A full session: add, mark, list, then bye; the task file is written as we go.
#[test]
fn session_adds_marks_and_persists() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("data").join("chiron.txt");

    Command::cargo_bin("chiron")
        .unwrap()
        .arg("--data").arg(&data)
        .write_stdin("todo read book\ndeadline return book /by 2026-02-05\nmark 1\nlist\nbye\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("I'm here."))
        .stdout(predicate::str::contains("1. [T][X] read book"))
        .stdout(predicate::str::contains("2. [D][ ] return book (by: Feb 05 2026)"))
        .stdout(predicate::str::contains("Rest well."));

    let contents = fs::read_to_string(&data).unwrap();
    assert_eq!(contents, "T | 1 | read book\nD | 0 | return book | 2026-02-05\n");
}

/// Tasks saved by one run are listed by the next.
#[test]
fn second_run_loads_previous_tasks() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("tasks.txt");
    fs::write(&data, "E | 0 | meeting | 2026-02-10 1400 | 2026-02-10 1600\nD | 1 | broken\n").unwrap();

    Command::cargo_bin("chiron")
        .unwrap()
        .arg("--data").arg(&data)
        .write_stdin("list\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "1. [E][ ] meeting (from: Feb 10 2026 1400 to: Feb 10 2026 1600)",
        ))
        .stdout(predicate::str::contains("broken").not());
}

/// Bad input is reported and the session keeps going until end of input.
#[test]
fn errors_do_not_end_session() {
    let dir = tempdir().unwrap();

    Command::cargo_bin("chiron")
        .unwrap()
        .env("CHIRON_DATA", dir.path().join("chiron.txt"))
        .write_stdin("blah\nmark 3\ndeadline x /by soon\ntodo still works\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("I don't know the command 'blah'."))
        .stdout(predicate::str::contains("Task 3 doesn't exist."))
        .stdout(predicate::str::contains("deadline <description> /by <yyyy-mm-dd> [HHmm]"))
        .stdout(predicate::str::contains("1. [T][ ] still works"));
}

/// Default location is data/chiron.txt under the working directory.
#[test]
fn default_data_file_is_relative() {
    let dir = tempdir().unwrap();

    Command::cargo_bin("chiron")
        .unwrap()
        .current_dir(dir.path())
        .env_remove("CHIRON_DATA")
        .write_stdin("todo here\nbye\n")
        .assert()
        .success();

    let contents = fs::read_to_string(dir.path().join("data").join("chiron.txt")).unwrap();
    assert_eq!(contents, "T | 0 | here\n");
}

#[test]
fn reject_duplicates_flag() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("chiron.txt");

    Command::cargo_bin("chiron")
        .unwrap()
        .arg("--data").arg(&data)
        .arg("--reject-duplicates")
        .write_stdin("todo buy milk\ntodo buy milk\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("This task already exists"));

    assert_eq!(fs::read_to_string(&data).unwrap(), "T | 0 | buy milk\n");
}

/// JSON mode writes one response object per line.
#[test]
fn json_output_mode() {
    let dir = tempdir().unwrap();

    let output = Command::cargo_bin("chiron")
        .unwrap()
        .arg("--data").arg(dir.path().join("chiron.txt"))
        .arg("--json")
        .write_stdin("todo read\nmark x\nbye\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines: Vec<serde_json::Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1]["ok"], true);
    assert_eq!(lines[1]["tasks"][0]["kind"], "todo");
    assert_eq!(lines[1]["tasks"][0]["description"], "read");
    assert_eq!(lines[2]["ok"], false);
    assert_eq!(lines[2]["hint"], "mark <n>");
    assert_eq!(lines[3]["keep_running"], false);
}

/// A line that is not valid UTF-8 is handled like any other bad input.
#[test]
fn invalid_utf8_input_does_not_end_session() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("chiron.txt");

    Command::cargo_bin("chiron")
        .unwrap()
        .arg("--data").arg(&data)
        .write_stdin(&b"todo a\nt\xffdo x\ntodo b\nlist\nbye\n"[..])
        .assert()
        .success()
        .stdout(predicate::str::contains("I don't know the command"))
        .stdout(predicate::str::contains("2. [T][ ] b"))
        .stdout(predicate::str::contains("Rest well."));

    assert_eq!(fs::read_to_string(&data).unwrap(), "T | 0 | a\nT | 0 | b\n");
}

/// Corrupted records are reported on startup and the valid ones survive the next save.
#[test]
fn corrupted_lines_are_reported_and_valid_tasks_kept() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("chiron.txt");
    fs::write(&data, &b"T | 0 | keep me\nT | 0 | caf\xff\nD | 1 | no date\nT | 1 | keep me too\n"[..]).unwrap();

    Command::cargo_bin("chiron")
        .unwrap()
        .arg("--data").arg(&data)
        .write_stdin("todo new\nbye\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped 2 corrupted line(s)"))
        .stdout(predicate::str::contains("3. [T][ ] new"));

    assert_eq!(
        fs::read_to_string(&data).unwrap(),
        "T | 0 | keep me\nT | 1 | keep me too\nT | 0 | new\n"
    );
}
