use crate::aggregate::Aggregator;
use crate::alignment::AlignmentRecord;
use crate::cigar::decode_runs;
use crate::error::{Error, Result};
use crate::extent::ReadExtent;
use crate::junction::{Junction, build_junctions};
use crate::strand::Strand;
use crate::types::Pos;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    pub total_records: u64,
    pub filtered_records: u64,
    pub unspliced_records: u64,
    pub malformed_records: u64,
    pub spliced_records: u64,
    pub junctions: u64,
}

/// A junction crossed by one read, with its splice sites and placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JunctionHit {
    pub junction: Junction,
    pub junction_id: String,
    pub donor_id: String,
    pub acceptor_id: String,
    /// 1-based position of the junction along the read, left to right.
    pub order: usize,
    pub start_distance: i64,
    pub end_distance: i64,
}

/// Everything one spliced record contributes to an aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplicedRead<'a> {
    pub record: &'a AlignmentRecord,
    pub strand: Strand,
    pub start: Pos,
    pub end: Pos,
    pub hits: Vec<JunctionHit>,
}

/// Decode, build and orient the junctions of a single record.
///
/// Returns `Ok(None)` for records without a gap. All junctions are built
/// before anything is returned, so a failure leaves no partial output.
pub fn extract_read(record: &AlignmentRecord) -> Result<Option<SplicedRead<'_>>> {
    if record.cigar.len() < 2 {
        return Ok(None);
    }
    let runs = decode_runs(&record.cigar);
    if !runs.is_spliced() {
        return Ok(None);
    }

    let strand = Strand::from_char(record.strand, &record.read_id)?;
    let junctions = build_junctions(
        &record.reference,
        record.start,
        strand,
        &runs,
        &record.read_id,
    )?;

    let start = record.start;
    let end = record.end();
    let extent = ReadExtent::new(start, end, strand);

    let hits = junctions
        .into_iter()
        .enumerate()
        .map(|(i, junction)| {
            let (start_distance, end_distance) = extent.distances(&junction);
            JunctionHit {
                junction_id: junction.id(),
                donor_id: junction.donor().to_string(),
                acceptor_id: junction.acceptor().to_string(),
                order: i + 1,
                start_distance,
                end_distance,
                junction,
            }
        })
        .collect();

    Ok(Some(SplicedRead {
        record,
        strand,
        start,
        end,
        hits,
    }))
}

/// Feed a stream of records through the junction pipeline into `aggregator`.
///
/// Malformed records are logged and skipped. An unrecognized strand or an
/// input error stops the pass and is returned.
pub fn run<I, A>(records: I, aggregator: &mut A) -> Result<Stats>
where
    I: IntoIterator<Item = Result<AlignmentRecord>>,
    A: Aggregator + ?Sized,
{
    let mut stats = Stats::default();

    for result in records {
        let record = result?;
        stats.total_records += 1;

        if !aggregator.accepts(&record) {
            stats.filtered_records += 1;
            continue;
        }

        match extract_read(&record) {
            Ok(Some(read)) => {
                stats.spliced_records += 1;
                stats.junctions += read.hits.len() as u64;
                aggregator.add_read(&read);
            }
            Ok(None) => {
                stats.unspliced_records += 1;
            }
            Err(e) if e.is_recoverable() => {
                tracing::warn!(read = %record.read_id, cigar = %record.cigar, "skipping record: {e}");
                stats.malformed_records += 1;
            }
            Err(e @ Error::UnrecognizedStrand { .. }) => {
                tracing::error!(read = %record.read_id, "{e}");
                return Err(e);
            }
            Err(e) => return Err(e),
        }
    }

    tracing::debug!(?stats, "junction pass finished");
    Ok(stats)
}
