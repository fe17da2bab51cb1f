use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Splice site to read, plus the sorted junction list
    Sites,
    /// Donor/acceptor partner lists and site sets
    Connections,
    /// Per-read extents and per-junction distances
    Geometry,
    /// Junction to every contributing read
    JunctionReads,
    /// As junction-reads, restricted to the reads in --reads
    Selection,
}

#[derive(Parser, Debug)]
#[command(
    name = "spanki-rs",
    about = "Extract splice junctions and splice sites from spliced alignments",
    version
)]
pub struct Args {
    /// Input BAM with spliced alignments
    pub in_bam: PathBuf,

    /// Which tables to build
    #[arg(short = 'm', long = "mode", value_enum, default_value_t = Mode::Sites)]
    pub mode: Mode,

    /// Output directory (created if missing)
    #[arg(short = 'o', long = "out", value_name = "DIR")]
    pub out_dir: PathBuf,

    /// Read ids to keep, one per line (selection mode)
    #[arg(short = 'r', long = "reads", value_name = "FILE", required_if_eq("mode", "selection"))]
    pub reads: Option<PathBuf>,

    /// Two-letter tag carrying the transcription strand
    #[arg(long = "strand-tag", default_value = "XS", value_parser = parse_tag)]
    pub strand_tag: [u8; 2],

    /// Set logging level to WARN
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

fn parse_tag(s: &str) -> Result<[u8; 2], String> {
    match s.as_bytes() {
        &[a, b] if a.is_ascii_alphabetic() && b.is_ascii_alphanumeric() => Ok([a, b]),
        _ => Err(format!("invalid tag {s:?}: expected two characters like XS")),
    }
}
