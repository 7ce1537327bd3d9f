use regex::Regex;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    _dir: TempDir,
    words_path: PathBuf,
    bigrams_path: PathBuf,
    weights_path: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let words_path = dir.path().join("words.tsv");
        let bigrams_path = dir.path().join("bigrams.tsv");
        let weights_path = dir.path().join("weights.json");

        let mut words = File::create(&words_path).unwrap();
        writeln!(words, "# word\tprobability").unwrap();
        writeln!(words, "great\t180").unwrap();
        writeln!(words, "grate\t120").unwrap();
        writeln!(words, "cat\t150").unwrap();
        writeln!(words, "good\t200").unwrap();
        writeln!(words, "morning\t140").unwrap();

        let mut bigrams = File::create(&bigrams_path).unwrap();
        writeln!(bigrams, "good\tmorning\t15").unwrap();

        Self {
            _dir: dir,
            words_path,
            bigrams_path,
            weights_path,
        }
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_keysuggest"))
            .args(args)
            .args([
                "--dict",
                self.words_path.to_str().unwrap(),
                "--bigrams",
                self.bigrams_path.to_str().unwrap(),
            ])
            .output()
            .expect("Failed to execute binary")
    }
}

#[test]
fn test_cli_suggest_ranks_transposed_word_first() {
    let ctx = TestContext::new();
    let output = ctx.run(&["suggest", "graet"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Input: graet"), "STDOUT:\n{}", stdout);
    let first = Regex::new(r"\|\s*1\s*\|\s*great\s*\|").unwrap();
    assert!(first.is_match(&stdout), "STDOUT:\n{}", stdout);
}

#[test]
fn test_cli_suggest_runs_every_input() {
    let ctx = TestContext::new();
    let output = ctx.run(&["suggest", "cat", "graet", "--prev-word", "good"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Input: cat"));
    assert!(stdout.contains("Input: graet"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Bigram context: 'good'"), "STDERR:\n{}", stderr);
}

#[test]
fn test_cli_profile_prints_operation_counts() {
    let ctx = TestContext::new();
    let output = ctx.run(&["suggest", "cat", "--profile"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("total"), "STDOUT:\n{}", stdout);
    assert!(stdout.contains("match"), "STDOUT:\n{}", stdout);
}

#[test]
fn test_cli_operations_lists_all_tags() {
    let ctx = TestContext::new();
    let output = ctx.run(&["operations"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let row = Regex::new(r"(?m)^\|\s*\d+\s*\|").unwrap();
    assert_eq!(row.find_iter(&stdout).count(), 10, "STDOUT:\n{}", stdout);
}

#[test]
fn test_cli_operations_gesture_hides_typing_only() {
    let ctx = TestContext::new();
    let output = ctx.run(&["operations", "--modality", "gesture"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let row = Regex::new(r"(?m)^\|\s*\d+\s*\|").unwrap();
    assert_eq!(row.find_iter(&stdout).count(), 7, "STDOUT:\n{}", stdout);
}

#[test]
fn test_cli_rejects_negative_weights() {
    let ctx = TestContext::new();
    std::fs::write(&ctx.weights_path, r#"{"typing": {"omission_cost": -1.0}}"#).unwrap();

    let output = ctx.run(&[
        "suggest",
        "cat",
        "--weights",
        ctx.weights_path.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_missing_dictionary_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_keysuggest"))
        .args(["suggest", "cat", "--dict", "/nonexistent/words.tsv"])
        .output()
        .expect("Failed to execute binary");
    assert!(!output.status.success());
}
