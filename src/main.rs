mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use mimalloc::MiMalloc;
use noodles::sam::alignment::record::data::field::Tag;
use spanki_rs::aggregate::{Connectivity, Geometry, JunctionMembership, SiteMembership};
use spanki_rs::bam_input::{RecordOptions, open_bam};
use spanki_rs::{Stats, read_list, run, tables};
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Mode};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<()> {
    let args = cli::Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            if args.quiet {
                EnvFilter::new("warn")
            } else {
                EnvFilter::new("info")
            }
        });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;

    let stats = extract(&args)?;
    tracing::info!(
        total_records = stats.total_records,
        spliced_records = stats.spliced_records,
        unspliced_records = stats.unspliced_records,
        filtered_records = stats.filtered_records,
        malformed_records = stats.malformed_records,
        junctions = stats.junctions,
        "spanki-rs: processing complete"
    );
    Ok(())
}

fn extract(args: &Args) -> Result<Stats> {
    let [a, b] = args.strand_tag;
    let options = RecordOptions {
        strand_tag: Tag::new(a, b),
    };
    let mut bam = open_bam(&args.in_bam, options)
        .with_context(|| format!("failed to open {}", args.in_bam.display()))?;
    tracing::info!(
        input = %args.in_bam.display(),
        references = bam.reference_names.len(),
        mode = ?args.mode,
        "extracting junctions"
    );
    let out = args.out_dir.as_path();

    let stats = match args.mode {
        Mode::Sites => {
            let mut aggregator = SiteMembership::new();
            let stats = run(bam.records(), &mut aggregator)?;
            tables::write_site_membership(out, &aggregator.finish())?;
            stats
        }
        Mode::Connections => {
            let mut aggregator = Connectivity::new();
            let stats = run(bam.records(), &mut aggregator)?;
            tables::write_connectivity(out, &aggregator.finish())?;
            stats
        }
        Mode::Geometry => {
            let mut aggregator = Geometry::new();
            let stats = run(bam.records(), &mut aggregator)?;
            tables::write_geometry(out, &aggregator.finish())?;
            stats
        }
        Mode::JunctionReads => {
            let mut aggregator = JunctionMembership::all();
            let stats = run(bam.records(), &mut aggregator)?;
            tables::write_junction_membership(out, &aggregator.finish())?;
            stats
        }
        Mode::Selection => {
            let Some(path) = args.reads.as_deref() else {
                bail!("--reads is required in selection mode");
            };
            let allowed = read_list::load_read_ids(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            tracing::info!(reads = allowed.len(), "loaded read selection");
            let mut aggregator = JunctionMembership::restricted_to(allowed);
            let stats = run(bam.records(), &mut aggregator)?;
            tables::write_junction_membership(out, &aggregator.finish())?;
            stats
        }
    };
    Ok(stats)
}
