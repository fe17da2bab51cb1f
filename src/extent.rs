use crate::junction::Junction;
use crate::strand::Strand;
use crate::types::Pos;

/// Alignment span in transcription direction.
///
/// On the reverse strand the transcript starts at the alignment end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadExtent {
    pub tx_start: Pos,
    pub tx_end: Pos,
    pub strand: Strand,
}

impl ReadExtent {
    /// `start` is 0-based, `end` is exclusive.
    pub fn new(start: Pos, end: Pos, strand: Strand) -> Self {
        let (tx_start, tx_end) = match strand {
            Strand::Forward => (start, end),
            Strand::Reverse => (end, start),
        };
        Self {
            tx_start,
            tx_end,
            strand,
        }
    }

    /// Signed distances from the transcript start and end to the junction.
    ///
    /// The reverse-strand end distance is measured from `right`, not `left`.
    pub fn distances(&self, junction: &Junction) -> (i64, i64) {
        let tx_start = self.tx_start as i64;
        let tx_end = self.tx_end as i64;
        let left = junction.left as i64;
        let right = junction.right as i64;
        match self.strand {
            Strand::Forward => (left - tx_start, tx_end - right),
            Strand::Reverse => (tx_start - right, right - tx_end),
        }
    }
}
