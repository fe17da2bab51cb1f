//! Tab-separated output for the aggregate values.
//!
//! Keyed tables are written with rows sorted by key; list values keep their
//! accumulated order and are comma-joined.

use crate::aggregate::{
    ConnectivityOutput, GeometryOutput, JunctionMembershipOutput, SiteMembershipOutput,
};
use crate::types::HashMap;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const SITE_READS: &str = "site_reads.tsv";
pub const JUNCTIONS: &str = "junctions.txt";
pub const SITE_PARTNERS: &str = "site_partners.tsv";
pub const DONORS: &str = "donors.txt";
pub const ACCEPTORS: &str = "acceptors.txt";
pub const READS: &str = "reads.tsv";
pub const JUNCTION_POSITIONS: &str = "junction_positions.tsv";
pub const JUNCTION_READS: &str = "junction_reads.tsv";

fn create(dir: &Path, name: &str) -> Result<BufWriter<File>> {
    let path = dir.join(name);
    let file =
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn sorted_keys<V>(map: &HashMap<String, V>) -> Vec<&String> {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort_unstable();
    keys
}

fn write_lines(dir: &Path, name: &str, lines: &[String]) -> Result<()> {
    let mut writer = create(dir, name)?;
    for line in lines {
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;
    Ok(())
}

fn write_site_reads(dir: &Path, sites: &HashMap<String, String>) -> Result<()> {
    let mut writer = create(dir, SITE_READS)?;
    writeln!(writer, "site\tread")?;
    for site in sorted_keys(sites) {
        writeln!(writer, "{}\t{}", site, sites[site])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_site_membership(dir: &Path, output: &SiteMembershipOutput) -> Result<()> {
    write_site_reads(dir, &output.sites)?;
    write_lines(dir, JUNCTIONS, &output.junction_ids)
}

pub fn write_connectivity(dir: &Path, output: &ConnectivityOutput) -> Result<()> {
    let mut writer = create(dir, SITE_PARTNERS)?;
    writeln!(writer, "site\tpartners")?;
    for site in sorted_keys(&output.partners) {
        writeln!(writer, "{}\t{}", site, output.partners[site].join(","))?;
    }
    writer.flush()?;

    write_lines(dir, DONORS, &output.donors)?;
    write_lines(dir, ACCEPTORS, &output.acceptors)
}

pub fn write_geometry(dir: &Path, output: &GeometryOutput) -> Result<()> {
    let mut writer = create(dir, READS)?;
    writeln!(writer, "read\treference\tstart\tend\tstrand\tjunctions")?;
    for read in sorted_keys(&output.reads) {
        let summary = &output.reads[read];
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}",
            read,
            summary.reference,
            summary.start,
            summary.end,
            summary.strand,
            summary.junction_count
        )?;
    }
    writer.flush()?;

    let mut writer = create(dir, JUNCTION_POSITIONS)?;
    writeln!(writer, "junction\torder\tstart_distance\tend_distance")?;
    for junction in sorted_keys(&output.placements) {
        for placement in &output.placements[junction] {
            writeln!(
                writer,
                "{}\t{}\t{}\t{}",
                junction, placement.order, placement.start_distance, placement.end_distance
            )?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn write_junction_membership(dir: &Path, output: &JunctionMembershipOutput) -> Result<()> {
    write_site_reads(dir, &output.sites)?;
    write_lines(dir, JUNCTIONS, &output.junction_ids)?;

    let mut writer = create(dir, JUNCTION_READS)?;
    writeln!(writer, "junction\treads")?;
    for junction in &output.junction_ids {
        let reads = output
            .junction_reads
            .get(junction)
            .map(|r| r.join(","))
            .unwrap_or_default();
        writeln!(writer, "{junction}\t{reads}")?;
    }
    writer.flush()?;
    Ok(())
}
