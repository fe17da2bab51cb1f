/// Errors raised while turning alignment records into junctions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Gap runs do not sit between match runs (`matches != gaps + 1`).
    #[error("malformed CIGAR for read {read_id}: {matches} match runs around {gaps} gaps")]
    MalformedCigar {
        read_id: String,
        matches: usize,
        gaps: usize,
    },

    /// A spliced record carries a strand other than `+` or `-`. Aborts the pass.
    #[error("unrecognized strand {strand:?} for read {read_id}")]
    UnrecognizedStrand { read_id: String, strand: char },

    #[error("invalid junction identifier: {0}")]
    InvalidJunctionId(String),

    #[error("invalid splice site identifier: {0}")]
    InvalidSiteId(String),

    #[error("invalid CIGAR string: {0}")]
    InvalidCigar(String),

    #[error("reference sequence id {0} not found in header")]
    UnknownReference(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Per-record failures are logged and skipped; everything else ends the pass.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MalformedCigar { .. })
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
