use crate::cigar::{Cigar, CigarOp};
use crate::error::{Error, Result};
use crate::types::Pos;
use noodles::bam;
use noodles::sam::alignment::record::data::field::{Tag, Value};

/// One alignment as seen by the junction pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    pub read_id: String,
    pub reference: String,
    /// 0-based leftmost reference position.
    pub start: Pos,
    /// Raw strand character; only validated for spliced records.
    pub strand: char,
    pub cigar: Cigar,
}

impl AlignmentRecord {
    pub fn new(read_id: &str, reference: &str, start: Pos, strand: char, cigar: Cigar) -> Self {
        Self {
            read_id: read_id.to_string(),
            reference: reference.to_string(),
            start,
            strand,
            cigar,
        }
    }

    /// A record with no placement; contributes nothing downstream.
    pub fn unmapped(read_id: &str) -> Self {
        Self::new(read_id, "*", 0, '.', Cigar::default())
    }

    /// Exclusive 0-based alignment end.
    pub fn end(&self) -> Pos {
        self.start + self.cigar.reference_span()
    }
}

/// Convert a BAM record, resolving its reference id against `reference_names`.
///
/// The strand comes from the character tag `strand_tag` (`.` when absent).
pub fn from_bam_record(
    record: &bam::Record,
    reference_names: &[String],
    strand_tag: Tag,
) -> Result<AlignmentRecord> {
    let read_id = record.name().map(|n| n.to_string()).unwrap_or_default();

    if record.flags().is_unmapped() {
        return Ok(AlignmentRecord::unmapped(&read_id));
    }
    let ref_id = record.reference_sequence_id().transpose()?;
    let position = record.alignment_start().transpose()?;
    let (Some(ref_id), Some(position)) = (ref_id, position) else {
        return Ok(AlignmentRecord::unmapped(&read_id));
    };
    let reference = reference_names
        .get(ref_id)
        .ok_or(Error::UnknownReference(ref_id))?;

    let mut cigar = Cigar::default();
    for result in record.cigar().iter() {
        let op = result?;
        cigar.add_operation(op.len() as u32, CigarOp::from(op.kind()));
    }

    let strand = get_char_tag(record, strand_tag).map_or('.', char::from);
    let start = (position.get() - 1) as Pos;

    Ok(AlignmentRecord::new(&read_id, reference, start, strand, cigar))
}

fn get_char_tag(record: &bam::Record, tag: Tag) -> Option<u8> {
    let data = record.data();
    let value = data.get(&tag)?;
    let value = value.ok()?;
    match value {
        Value::Character(c) => Some(c),
        Value::String(s) => s.first().copied(),
        _ => None,
    }
}
