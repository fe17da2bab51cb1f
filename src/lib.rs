//! spanki-rs: extract splice junctions and splice sites from spliced alignments.
//!
//! Every record goes through one pipeline: CIGAR decoding into match and gap
//! runs, junction coordinates from the alignment start, donor/acceptor
//! orientation by strand, then canonical identifiers. An [`Aggregator`]
//! decides what is kept.
//!
//! # Library usage
//!
//! ```no_run
//! use spanki_rs::{AlignmentRecord, Cigar, run};
//! use spanki_rs::aggregate::SiteMembership;
//!
//! # fn main() -> Result<(), spanki_rs::Error> {
//! let cigar: Cigar = "50M30N60M".parse()?;
//! let record = AlignmentRecord::new("read1", "chr1", 1000, '+', cigar);
//!
//! let mut sites = SiteMembership::new();
//! run([Ok(record)], &mut sites)?;
//! let output = sites.finish();
//! assert_eq!(output.junction_ids, vec!["chr1:1051_1080:+".to_string()]);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod alignment;
pub mod bam_input;
pub mod cigar;
pub mod error;
pub mod extent;
pub mod junction;
pub mod pipeline;
pub mod read_list;
pub mod strand;
pub mod tables;
pub mod types;

// Flat re-exports for the most commonly used public types.
pub use aggregate::Aggregator;
pub use alignment::AlignmentRecord;
pub use cigar::{Cigar, CigarOp, Runs, decode_runs};
pub use error::{Error, Result};
pub use extent::ReadExtent;
pub use junction::{Junction, SpliceSite, build_junctions};
pub use pipeline::{JunctionHit, SplicedRead, Stats, extract_read, run};
pub use strand::Strand;
