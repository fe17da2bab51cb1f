use crate::error::{Error, Result};
use crate::types::Pos;
use noodles::sam::alignment::record::cigar::op::Kind as CigarKind;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CigarOp {
    #[default]
    Match,
    Ins,
    Del,
    RefSkip,
    SoftClip,
    HardClip,
    Pad,
    Equal,
    Diff,
}

impl CigarOp {
    /// Aligned bases, whether or not they agree with the reference.
    pub fn is_match(self) -> bool {
        matches!(self, Self::Match | Self::Equal | Self::Diff)
    }

    pub fn consumes_reference(self) -> bool {
        matches!(
            self,
            Self::Match | Self::Del | Self::RefSkip | Self::Equal | Self::Diff
        )
    }

    pub fn consumes_read(self) -> bool {
        matches!(
            self,
            Self::Match | Self::Ins | Self::SoftClip | Self::Equal | Self::Diff
        )
    }

    fn as_char(self) -> char {
        match self {
            CigarOp::Match => 'M',
            CigarOp::Ins => 'I',
            CigarOp::Del => 'D',
            CigarOp::RefSkip => 'N',
            CigarOp::SoftClip => 'S',
            CigarOp::HardClip => 'H',
            CigarOp::Pad => 'P',
            CigarOp::Equal => '=',
            CigarOp::Diff => 'X',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        let op = match c {
            'M' => CigarOp::Match,
            'I' => CigarOp::Ins,
            'D' => CigarOp::Del,
            'N' => CigarOp::RefSkip,
            'S' => CigarOp::SoftClip,
            'H' => CigarOp::HardClip,
            'P' => CigarOp::Pad,
            '=' => CigarOp::Equal,
            'X' => CigarOp::Diff,
            _ => return None,
        };
        Some(op)
    }
}

impl From<CigarKind> for CigarOp {
    fn from(kind: CigarKind) -> Self {
        match kind {
            CigarKind::Match => CigarOp::Match,
            CigarKind::Insertion => CigarOp::Ins,
            CigarKind::Deletion => CigarOp::Del,
            CigarKind::Skip => CigarOp::RefSkip,
            CigarKind::SoftClip => CigarOp::SoftClip,
            CigarKind::HardClip => CigarOp::HardClip,
            CigarKind::Pad => CigarOp::Pad,
            CigarKind::SequenceMatch => CigarOp::Equal,
            CigarKind::SequenceMismatch => CigarOp::Diff,
        }
    }
}

/// Run-length encoded alignment operations, as `(length, op)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cigar {
    pub ops: Vec<(u32, CigarOp)>,
}

impl Cigar {
    pub fn add_operation(&mut self, len: u32, op: CigarOp) {
        if len == 0 {
            return;
        }
        if let Some((prev_len, prev_op)) = self.ops.last_mut()
            && *prev_op == op
        {
            *prev_len += len;
            return;
        }
        self.ops.push((len, op));
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of reference bases covered, including deletions and skips.
    pub fn reference_span(&self) -> Pos {
        self.ops
            .iter()
            .filter(|(_, op)| op.consumes_reference())
            .map(|(len, _)| Pos::from(*len))
            .sum()
    }

    pub fn read_length(&self) -> usize {
        self.ops
            .iter()
            .filter(|(_, op)| op.consumes_read())
            .map(|(len, _)| *len as usize)
            .sum()
    }
}

impl FromIterator<(u32, CigarOp)> for Cigar {
    fn from_iter<I: IntoIterator<Item = (u32, CigarOp)>>(iter: I) -> Self {
        let mut cigar = Cigar::default();
        for (len, op) in iter {
            cigar.add_operation(len, op);
        }
        cigar
    }
}

impl fmt::Display for Cigar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ops.is_empty() {
            return f.write_str("*");
        }
        for (len, op) in &self.ops {
            write!(f, "{}{}", len, op.as_char())?;
        }
        Ok(())
    }
}

impl FromStr for Cigar {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "*" {
            return Ok(Cigar::default());
        }
        let mut cigar = Cigar::default();
        let mut len: Option<u32> = None;
        for c in s.chars() {
            if let Some(d) = c.to_digit(10) {
                let next = len
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(d))
                    .ok_or_else(|| Error::InvalidCigar(s.to_string()))?;
                len = Some(next);
                continue;
            }
            let op = CigarOp::from_char(c).ok_or_else(|| Error::InvalidCigar(s.to_string()))?;
            let n = len.take().ok_or_else(|| Error::InvalidCigar(s.to_string()))?;
            cigar.add_operation(n, op);
        }
        if len.is_some() || cigar.is_empty() {
            return Err(Error::InvalidCigar(s.to_string()));
        }
        Ok(cigar)
    }
}

/// Match and gap runs of one alignment, in reference order.
///
/// `gaps[i]` lies between `matches[i]` and `matches[i + 1]` when the
/// alignment is well formed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Runs {
    pub matches: Vec<Pos>,
    pub gaps: Vec<Pos>,
}

impl Runs {
    pub fn is_spliced(&self) -> bool {
        !self.gaps.is_empty()
    }

    pub fn is_well_formed(&self) -> bool {
        self.matches.len() == self.gaps.len() + 1
    }
}

/// Collapse a CIGAR into match runs separated by intron gaps.
///
/// Insertions and deletions do not split a match run: the match that follows
/// them is folded into the previous run, and deleted bases are added to its
/// reference length. An indel right after a gap opens the next run instead.
/// Clips and padding are ignored.
pub fn decode_runs(cigar: &Cigar) -> Runs {
    let mut runs = Runs::default();
    // An indel since the last match; the next match extends the previous run.
    let mut merge_pending = false;
    let mut pending_del: Pos = 0;
    let mut last_was_match = false;
    // No match since the last gap; the next match starts a new run.
    let mut after_gap = false;

    for &(len, op) in &cigar.ops {
        if len == 0 {
            continue;
        }
        let len = Pos::from(len);
        match op {
            op if op.is_match() => {
                match runs.matches.last_mut() {
                    Some(last) if !after_gap && (merge_pending || last_was_match) => {
                        *last += len + pending_del
                    }
                    _ => runs.matches.push(len + pending_del),
                }
                after_gap = false;
                merge_pending = false;
                pending_del = 0;
                last_was_match = true;
            }
            CigarOp::RefSkip => {
                if let Some(last) = runs.matches.last_mut() {
                    *last += pending_del;
                    merge_pending = false;
                    pending_del = 0;
                }
                runs.gaps.push(len);
                after_gap = true;
                last_was_match = false;
            }
            CigarOp::Ins => {
                // Keeps any pending deletion; D after I and D after D both add up.
                merge_pending = true;
                last_was_match = false;
            }
            CigarOp::Del => {
                merge_pending = true;
                pending_del += len;
                last_was_match = false;
            }
            _ => {}
        }
    }

    runs
}
