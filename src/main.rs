use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use adaptive_huffman::report::{data_rows, render_dot, DataTableRow, StatsTableRow, TableWriter};
use adaptive_huffman::{Encoder, EncoderConfig, Symbol};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "adaptive-huffman", about = "Adaptive Huffman (FGK) tree builder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a text file, writing per-step tables and tree renderings.
    Encode {
        /// Input text file (UTF-8).
        input: PathBuf,
        /// Output directory; cleared before the run.
        #[arg(long, default_value = "results")]
        out: PathBuf,
        /// Write a Graphviz DOT rendering of the tree after every step.
        #[arg(long)]
        dot: bool,
        /// Write a JSON snapshot after every step (needs the `visualize` feature).
        #[arg(long)]
        json: bool,
        /// Write the stream packed with the final code table to this file.
        #[arg(long)]
        packed: Option<PathBuf>,
        /// Validate the tree after every step.
        #[arg(long)]
        verify: bool,
        /// Maximum number of distinct symbols.
        #[arg(long)]
        max_symbols: Option<usize>,
    },
    /// Print the final code table and statistics for a text file.
    Codes {
        /// Input text file (UTF-8).
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("adaptive_huffman=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            input,
            out,
            dot,
            json,
            packed,
            verify,
            max_symbols,
        } => {
            let config = EncoderConfig {
                verify_invariants: verify,
                max_symbols,
            };
            let options = EncodeOptions { dot, json, packed };
            run_encode(&input, &out, config, &options)?
        }
        Commands::Codes { input } => run_codes(&input)?,
    }

    Ok(())
}

#[derive(Debug)]
struct EncodeOptions {
    dot: bool,
    json: bool,
    packed: Option<PathBuf>,
}

fn run_encode(input: &Path, out: &Path, config: EncoderConfig, options: &EncodeOptions) -> Result<()> {
    if options.json && !cfg!(feature = "visualize") {
        bail!("--json requires building with the `visualize` feature");
    }

    let text = read_input(input)?;
    prepare_output_dir(out)?;

    let mut encoder = Encoder::try_new(config).context("invalid encoder configuration")?;
    let writer = TableWriter::default();
    let mut stats_rows = Vec::new();

    for (step, symbol) in text.chars().enumerate() {
        let report = encoder
            .encode(symbol)
            .with_context(|| format!("encoding failed at step {step}"))?;

        let table = encoder.code_table();
        let rows = data_rows(encoder.tree(), &table);
        let path = out.join(format!("tree{step}.tsv"));
        writer
            .write(create(&path)?, &DataTableRow::HEADERS, &rows)
            .with_context(|| format!("failed to write {}", path.display()))?;

        if options.dot {
            let path = out.join(format!("tree{step}.dot"));
            fs::write(&path, render_dot(&encoder.snapshot()))
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        if options.json {
            write_json_snapshot(&encoder, &out.join(format!("tree{step}.json")))?;
        }

        let stats = adaptive_huffman::CodeStatistics::from_table(&table);
        stats_rows.push(StatsTableRow {
            symbol,
            average_code_length: stats.average_code_length,
            entropy: stats.entropy,
        });

        info!(
            step,
            symbol = %symbol.escape_debug(),
            emitted = %report.emitted,
            exchanges = report.exchanges,
            "symbol read, table written"
        );
    }

    let stats_path = out.join("_stats.tsv");
    writer
        .write(create(&stats_path)?, &StatsTableRow::HEADERS, &stats_rows)
        .with_context(|| format!("failed to write {}", stats_path.display()))?;

    if let Some(packed_path) = &options.packed {
        let packed = encoder
            .pack(text.chars())
            .context("failed to pack input stream")?;
        fs::write(packed_path, packed.as_bytes())
            .with_context(|| format!("failed to write {}", packed_path.display()))?;
        info!(
            path = %packed_path.display(),
            bits = packed.bit_len(),
            bytes = packed.byte_len(),
            blake3 = %blake3::hash(packed.as_bytes()).to_hex(),
            "packed stream written"
        );
    }

    let stats = encoder.statistics();
    info!(
        symbols = stats.symbols,
        occurrences = stats.total,
        nodes = encoder.tree().len(),
        height = encoder.tree().height(),
        average_code_length = stats.average_code_length,
        entropy = stats.entropy,
        "encoding finished"
    );

    Ok(())
}

fn run_codes(input: &Path) -> Result<()> {
    let text = read_input(input)?;
    let mut encoder = Encoder::new(EncoderConfig::default());
    encoder
        .encode_all(text.chars())
        .context("encoding failed")?;

    let table = encoder.code_table();
    let rows = data_rows(encoder.tree(), &table);
    if rows.is_empty() {
        println!("Input is empty; no codes.");
        return Ok(());
    }

    for row in &rows {
        println!(
            "{}\t{}\t{}\t{}",
            row.order_number,
            display_symbol(row.symbol),
            row.occurrences,
            row.codeword
        );
    }

    let stats = encoder.statistics();
    println!(
        "average={:.4}\tentropy={:.4}\tredundancy={:.4}",
        stats.average_code_length,
        stats.entropy,
        stats.redundancy()
    );

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read input {}", path.display()))
}

/// Create `dir` if missing and remove any files left from a previous run.
fn prepare_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    for entry in fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() {
            fs::remove_file(&path).with_context(|| format!("failed to remove {}", path.display()))?;
        } else {
            warn!(path = %path.display(), "leaving non-file entry in output directory");
        }
    }
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

#[cfg(feature = "visualize")]
fn write_json_snapshot(encoder: &Encoder, path: &Path) -> Result<()> {
    use std::io::Write;

    let mut out = create(path)?;
    serde_json::to_writer_pretty(&mut out, &encoder.snapshot())
        .with_context(|| format!("failed to serialize snapshot to {}", path.display()))?;
    out.flush()?;
    Ok(())
}

#[cfg(not(feature = "visualize"))]
fn write_json_snapshot(_encoder: &Encoder, _path: &Path) -> Result<()> {
    bail!("--json requires building with the `visualize` feature")
}

fn display_symbol(symbol: Symbol) -> String {
    match symbol {
        ' ' => "space".to_string(),
        '\n' => "\\n".to_string(),
        '\t' => "\\t".to_string(),
        other => other.to_string(),
    }
}
