//! Junction coordinates, splice-site orientation and identifiers.
//!
//! Junction bounds are 1-based and inclusive: `left` is the first intron
//! base and `right` the last. Identifiers are the canonical string keys used
//! by every aggregator:
//!
//! - splice site: `reference:position`
//! - junction:    `reference:left_right:strand`
//!
//! Identifier lists are sorted as plain strings, so `chr1:100_200:+` sorts
//! before `chr1:50_60:+`.

use crate::cigar::Runs;
use crate::error::{Error, Result};
use crate::strand::Strand;
use crate::types::Pos;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Junction {
    pub reference: String,
    pub left: Pos,
    pub right: Pos,
    pub strand: Strand,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpliceSite {
    pub reference: String,
    pub position: Pos,
}

impl SpliceSite {
    pub fn new(reference: &str, position: Pos) -> Self {
        Self {
            reference: reference.to_string(),
            position,
        }
    }
}

impl Junction {
    pub fn new(reference: &str, left: Pos, right: Pos, strand: Strand) -> Self {
        Self {
            reference: reference.to_string(),
            left,
            right,
            strand,
        }
    }

    /// Genomic position of the 5' splice site.
    pub fn donor_position(&self) -> Pos {
        match self.strand {
            Strand::Forward => self.left,
            Strand::Reverse => self.right,
        }
    }

    /// Genomic position of the 3' splice site.
    pub fn acceptor_position(&self) -> Pos {
        match self.strand {
            Strand::Forward => self.right,
            Strand::Reverse => self.left,
        }
    }

    pub fn donor(&self) -> SpliceSite {
        SpliceSite::new(&self.reference, self.donor_position())
    }

    pub fn acceptor(&self) -> SpliceSite {
        SpliceSite::new(&self.reference, self.acceptor_position())
    }

    pub fn id(&self) -> String {
        self.to_string()
    }
}

/// Walk the match/gap runs from the alignment start and emit one junction
/// per gap, left to right.
///
/// `start` is the 0-based alignment start. Fails with
/// [`Error::MalformedCigar`] unless every gap sits between two match runs.
pub fn build_junctions(
    reference: &str,
    start: Pos,
    strand: Strand,
    runs: &Runs,
    read_id: &str,
) -> Result<Vec<Junction>> {
    if !runs.is_well_formed() {
        return Err(Error::MalformedCigar {
            read_id: read_id.to_string(),
            matches: runs.matches.len(),
            gaps: runs.gaps.len(),
        });
    }

    let mut offset = start;
    let mut junctions = Vec::with_capacity(runs.gaps.len());
    for (matched, gap) in runs.matches.iter().zip(&runs.gaps) {
        let left = offset + matched + 1;
        let right = left + gap - 1;
        junctions.push(Junction::new(reference, left, right, strand));
        offset += matched + gap;
    }
    Ok(junctions)
}

impl fmt::Display for SpliceSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.reference, self.position)
    }
}

impl fmt::Display for Junction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}_{}:{}",
            self.reference, self.left, self.right, self.strand
        )
    }
}

impl FromStr for SpliceSite {
    type Err = Error;

    // Split on the last colon; reference names may contain colons.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidSiteId(s.to_string());
        let (reference, position) = s.rsplit_once(':').ok_or_else(invalid)?;
        if reference.is_empty() {
            return Err(invalid());
        }
        let position = position.parse::<Pos>().map_err(|_| invalid())?;
        Ok(SpliceSite::new(reference, position))
    }
}

impl FromStr for Junction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidJunctionId(s.to_string());
        let mut fields = s.rsplitn(3, ':');
        let strand = fields.next().ok_or_else(invalid)?;
        let range = fields.next().ok_or_else(invalid)?;
        let reference = fields.next().filter(|r| !r.is_empty()).ok_or_else(invalid)?;

        let mut strand_chars = strand.chars();
        let strand = match (strand_chars.next(), strand_chars.next()) {
            (Some(c), None) => Strand::from_char(c, "").map_err(|_| invalid())?,
            _ => return Err(invalid()),
        };

        let (left, right) = range.split_once('_').ok_or_else(invalid)?;
        let left = left.parse::<Pos>().map_err(|_| invalid())?;
        let right = right.parse::<Pos>().map_err(|_| invalid())?;
        if left > right {
            return Err(invalid());
        }
        Ok(Junction::new(reference, left, right, strand))
    }
}

/// Sort junction identifiers as strings, not by position.
pub fn sort_ids(ids: &mut [String]) {
    ids.sort_unstable();
}
