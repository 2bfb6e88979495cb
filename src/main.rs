//! bamslice CLI entry point
//!
//! Slices regions around target reference positions out of a BAM/SAM file,
//! one gzip FASTQ file per merged interval.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

use bamslice::core::{merge_intervals, pad_position};
use bamslice::formats::{filename_prefix, read_positions, slice_bam};

#[derive(Parser)]
#[command(name = "bamslice")]
#[command(about = "Slice read subsequences around reference positions out of a BAM/SAM file")]
#[command(version)]
struct Cli {
    /// BAM or SAM file to slice positions from
    bam: PathBuf,

    /// File containing the target positions; pass '-' to read from stdin
    positions_file: String,

    /// Directory to save the FASTQ files to
    #[arg(short = 'o', long, default_value = ".")]
    output: PathBuf,

    /// Column within the positions file containing the positions
    #[arg(short = 'c', long, default_value = "0")]
    column: usize,

    /// Delimiter for the positions file (single character)
    #[arg(short = 'd', long, default_value = "\t")]
    delimiter: char,

    /// Number of bases taken either side of each position
    #[arg(short = 'p', long, default_value = "100")]
    padding: u64,

    /// Ceiling on simultaneously open interval output files; more intervals
    /// than this are processed in batches with one BAM scan per batch
    #[arg(long = "max-open-files", default_value = "1000")]
    max_open_files: usize,

    /// Number of threads for BAM decompression
    #[arg(short = 't', long, default_value = "1")]
    threads: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    if !cli.delimiter.is_ascii() {
        anyhow::bail!("delimiter must be a single ASCII character");
    }
    let delimiter = cli.delimiter as u8;

    let positions = read_positions(&cli.positions_file, cli.column, delimiter)
        .context("failed to read positions file")?;
    eprintln!("Loaded {} unique positions", positions.len());

    let padded: Vec<_> = positions
        .iter()
        .map(|&pos| pad_position(pos, cli.padding))
        .collect();
    let intervals = merge_intervals(&padded).context("failed to merge intervals")?;
    eprintln!(
        "Merged into {} intervals (padding {})",
        intervals.len(),
        cli.padding
    );

    let prefix = filename_prefix(&cli.bam);
    let stats = slice_bam(
        &cli.bam,
        &intervals,
        &cli.output,
        &prefix,
        cli.max_open_files,
        cli.threads,
    )
    .with_context(|| format!("failed to slice {:?}", cli.bam))?;

    eprintln!("\n=== Slice Statistics ===");
    eprintln!("Alignments seen: {}", stats.total);
    eprintln!("Filtered out:    {}", stats.skipped);
    eprintln!("Intervals:       {}", stats.intervals);
    eprintln!("Batches:         {}", stats.batches);
    eprintln!("Records written: {}", stats.records);
    eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}
