use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn json_stdout(cmd: &mut Command) -> Value {
    let out = cmd.output().expect("run binary");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    serde_json::from_slice(&out.stdout).expect("stdout is one JSON object")
}

#[test]
fn puzzle_solve_reference_instance_json() {
    let mut cmd = Command::cargo_bin("puzzle").unwrap();
    cmd.args(["solve", "--start", "724/506/831", "--json"]);
    let v = json_stdout(&mut cmd);
    assert_eq!(v["solved"], true);
    assert_eq!(v["moves"], 26);
    assert_eq!(v["path"].as_array().unwrap().len(), 26);
    assert_eq!(v["path"][25]["board"], serde_json::json!([1, 2, 3, 4, 5, 6, 7, 8, 0]));
}

#[test]
fn puzzle_solve_text_reports_move_count() {
    Command::cargo_bin("puzzle")
        .unwrap()
        .args(["solve", "--start", "123456708", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Solved in 1 moves"))
        .stdout(predicate::str::contains("1. Right"));
}

#[test]
fn puzzle_solve_wrong_parity_warns_and_reports_no_solution() {
    Command::cargo_bin("puzzle")
        .unwrap()
        .args(["solve", "--start", "213456780", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No solution."))
        .stderr(predicate::str::contains("parity"));
}

#[test]
fn puzzle_rejects_malformed_start() {
    Command::cargo_bin("puzzle")
        .unwrap()
        .args(["solve", "--start", "12345678"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidBoardLength"));

    Command::cargo_bin("puzzle")
        .unwrap()
        .args(["solve", "--start", "113456780"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DuplicateTile"));
}

#[test]
fn puzzle_scramble_is_seeded() {
    let run = || {
        let mut cmd = Command::cargo_bin("puzzle").unwrap();
        cmd.args(["scramble", "--moves", "15", "--seed", "42", "--json"]);
        json_stdout(&mut cmd)
    };
    let a = run();
    let b = run();
    assert_eq!(a["start"], b["start"]);
    assert_eq!(a["solved"], true);
    assert!(a["moves"].as_u64().unwrap() <= 15);
}

#[test]
fn tapatan_best_move_opening_json() {
    let mut cmd = Command::cargo_bin("tapatan").unwrap();
    cmd.args(["best-move", "--json", "--depth", "3"]);
    let v = json_stdout(&mut cmd);
    let from = v["best_move"]["from"].as_u64().unwrap();
    assert!([0, 2, 7].contains(&from), "from = {from}");
    assert_eq!(v["depth"], 3);
    assert_eq!(v["adjacency"], "orthogonal");
    assert_eq!(v["to_move"], "X");
    assert_eq!(v["position"], "XOX/.../OXO");
}

#[test]
fn tapatan_best_move_accepts_diagonal_and_rejects_unknown_adjacency() {
    let mut cmd = Command::cargo_bin("tapatan").unwrap();
    cmd.args(["best-move", "--adjacency", "diagonal", "--depth", "2", "--json"]);
    let v = json_stdout(&mut cmd);
    assert_eq!(v["adjacency"], "diagonal");

    Command::cargo_bin("tapatan")
        .unwrap()
        .args(["best-move", "--adjacency", "hex"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown adjacency 'hex'"));
}

#[test]
fn tapatan_weights_file_with_zero_scale_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("weights.json");
    std::fs::write(&path, r#"{ "scale": 0 }"#).unwrap();
    Command::cargo_bin("tapatan")
        .unwrap()
        .args(["best-move", "--weights"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidWeight"));
}

#[test]
fn tapatan_tiny_scale_still_takes_the_win() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("weights.json");
    std::fs::write(&path, r#"{ "scale": 1 }"#).unwrap();
    let mut cmd = Command::cargo_bin("tapatan").unwrap();
    cmd.args(["best-move", "--position", "XX./O.X/O.O", "--depth", "1", "--json", "--weights"])
        .arg(&path);
    let v = json_stdout(&mut cmd);
    assert_eq!(v["best_move"], serde_json::json!({ "from": 5, "to": 2 }));
    assert_eq!(v["value"], 1.0);
}

#[test]
fn tapatan_best_move_finds_the_win() {
    let mut cmd = Command::cargo_bin("tapatan").unwrap();
    cmd.args(["best-move", "--position", "XX./O.X/O.O", "--depth", "2", "--json"]);
    let v = json_stdout(&mut cmd);
    assert_eq!(v["best_move"], serde_json::json!({ "from": 5, "to": 2 }));
    assert_eq!(v["value"], 1.0);
}

#[test]
fn tapatan_best_move_rejects_bad_piece_counts() {
    Command::cargo_bin("tapatan")
        .unwrap()
        .args(["best-move", "--position", "XXX/X../OOO"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidPieceCounts"));
}

#[test]
fn tapatan_rules_lists_the_opening() {
    Command::cargo_bin("tapatan")
        .unwrap()
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("TAPATAN RULES"))
        .stdout(predicate::str::contains("O X O"));
}

#[test]
fn tapatan_play_rejects_non_numeric_input_then_leaves_on_eof() {
    Command::cargo_bin("tapatan")
        .unwrap()
        .args(["play", "--mode", "pvp", "--no-clear"])
        .write_stdin("abc\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid input! Please enter a number."))
        .stdout(predicate::str::contains("Input closed"));
}

#[test]
fn tapatan_play_human_move_is_applied() {
    // Piece 1 of X is at (0, 0); its only destination is (1, 0).
    Command::cargo_bin("tapatan")
        .unwrap()
        .args(["play", "--mode", "pvp", "--no-clear"])
        .write_stdin("1\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Current player: O"));
}

#[test]
fn tapatan_computer_opens_when_human_plays_o() {
    Command::cargo_bin("tapatan")
        .unwrap()
        .args(["play", "--mode", "pvc", "--human", "o", "--no-clear", "--depth", "2"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("The computer moved"))
        .stdout(predicate::str::contains("Your turn (player O)"));
}
