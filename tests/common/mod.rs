//! Golden DOT renderings under `tests/snapshots/`, one file per input and step

use std::fs;
use std::path::PathBuf;

use adaptive_huffman::report::render_dot;
use adaptive_huffman::{Encoder, EncoderConfig};

/// Set to rewrite the golden files from the current renderer
const REGENERATE_VAR: &str = "ADAPTIVE_HUFFMAN_BLESS";

fn golden_path(input: &str, step: usize) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
        .join(format!("{input}_step{step}.dot"))
}

/// Encode `input` through `step` (zero-based) and compare the tree's DOT
/// rendering with its golden file, line by line.
pub fn assert_dot_golden(input: &str, step: usize) {
    let mut encoder = Encoder::new(EncoderConfig::strict());
    encoder
        .encode_all(input.chars().take(step + 1))
        .expect("encoding succeeds");
    let rendered = render_dot(&encoder.snapshot());
    let path = golden_path(input, step);

    if std::env::var_os(REGENERATE_VAR).is_some() {
        fs::write(&path, &rendered).expect("write golden rendering");
        return;
    }

    let golden = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("missing golden {}: {err}", path.display()));
    // lines() also drops a trailing '\r', so CRLF checkouts compare equal
    let golden_lines: Vec<&str> = golden.lines().collect();
    let rendered_lines: Vec<&str> = rendered.lines().collect();

    if let Some(line) = golden_lines
        .iter()
        .zip(&rendered_lines)
        .position(|(golden, rendered)| golden != rendered)
    {
        panic!(
            "{} differs at line {}\n  golden:   {}\n  rendered: {}\n(set {REGENERATE_VAR}=1 to regenerate)",
            path.display(),
            line + 1,
            golden_lines[line],
            rendered_lines[line]
        );
    }
    assert_eq!(
        golden_lines.len(),
        rendered_lines.len(),
        "{} has a different line count",
        path.display()
    );
}
