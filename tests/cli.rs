use std::fs;
use std::path::{Path, PathBuf};

use adaptive_huffman::report::render_dot;
use adaptive_huffman::{Encoder, EncoderConfig};
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli() -> Command {
    Command::cargo_bin("adaptive-huffman").unwrap()
}

fn write_input(dir: &TempDir, text: &str) -> PathBuf {
    let path = dir.path().join("input.txt");
    fs::write(&path, text).unwrap();
    path
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|err| panic!("cannot read {}: {err}", path.display()))
}

#[test]
fn test_encode_writes_per_step_tables() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "ab");
    let out = dir.path().join("results");

    cli().arg("encode").arg(&input).arg("--out").arg(&out).assert().success();

    assert_eq!(
        read(&out.join("tree0.tsv")),
        "Order number\tCharacter\tOccurrences\tCodeword\n2\ta\t1\t1\n"
    );
    assert_eq!(
        read(&out.join("tree1.tsv")),
        "Order number\tCharacter\tOccurrences\tCodeword\n4\ta\t1\t1\n2\tb\t1\t01\n"
    );
    assert!(!out.join("tree2.tsv").exists());
    assert_eq!(
        read(&out.join("_stats.tsv")),
        "Character\tAverage Codeword Length\tEntropy\na\t1\t0\nb\t1.5\t1\n"
    );
    assert!(!out.join("tree0.dot").exists());
}

#[test]
fn test_encode_clears_stale_files_but_keeps_directories() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "a");
    let out = dir.path().join("results");
    fs::create_dir_all(out.join("nested")).unwrap();
    fs::write(out.join("tree7.tsv"), "left over").unwrap();

    cli().arg("encode").arg(&input).arg("--out").arg(&out).assert().success();

    assert!(!out.join("tree7.tsv").exists());
    assert!(out.join("nested").is_dir());
    assert!(out.join("tree0.tsv").exists());
}

#[test]
fn test_encode_dot_matches_library_rendering() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "abb");
    let out = dir.path().join("results");

    cli()
        .arg("encode")
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .arg("--dot")
        .arg("--verify")
        .assert()
        .success();

    let mut encoder = Encoder::new(EncoderConfig::default());
    for (step, symbol) in "abb".chars().enumerate() {
        encoder.encode(symbol).unwrap();
        let written = read(&out.join(format!("tree{step}.dot")));
        assert_eq!(written, render_dot(&encoder.snapshot()), "step {step}");
    }
}

#[test]
fn test_encode_packed_output() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "abracadabra");
    let out = dir.path().join("results");
    let packed = dir.path().join("packed.bin");

    cli()
        .arg("encode")
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .arg("--packed")
        .arg(&packed)
        .assert()
        .success();

    assert_eq!(fs::read(&packed).unwrap(), vec![0x7C, 0xA9, 0x7C]);
    assert!(out.join("tree10.tsv").exists());
}

#[test]
fn test_encode_alphabet_bound_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "ab");
    let out = dir.path().join("results");

    cli()
        .arg("encode")
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .arg("--max-symbols")
        .arg("1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("alphabet exhausted"));

    assert!(out.join("tree0.tsv").exists());
    assert!(!out.join("_stats.tsv").exists());
}

#[test]
fn test_encode_missing_input_fails() {
    let dir = TempDir::new().unwrap();

    cli()
        .arg("encode")
        .arg(dir.path().join("absent.txt"))
        .arg("--out")
        .arg(dir.path().join("results"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read input"));
}

#[test]
fn test_codes_prints_table_and_statistics() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "ab");

    cli()
        .arg("codes")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("4\ta\t1\t1\n2\tb\t1\t01\n"))
        .stdout(predicate::str::contains("average=1.5000\tentropy=1.0000\tredundancy=0.5000"));
}

#[test]
fn test_codes_on_empty_input() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "");

    cli()
        .arg("codes")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Input is empty; no codes."));
}
