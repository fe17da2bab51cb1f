//! Reductions over the junctions of every spliced record.
//!
//! Each aggregator consumes [`SplicedRead`]s from [`crate::pipeline::run`]
//! and is turned into its output value with `finish`.

mod connectivity;
mod geometry;
mod membership;
mod selection;

pub use connectivity::{Connectivity, ConnectivityOutput};
pub use geometry::{Geometry, GeometryOutput, JunctionPlacement, ReadSummary};
pub use membership::{SiteMembership, SiteMembershipOutput};
pub use selection::{JunctionMembership, JunctionMembershipOutput};

use crate::alignment::AlignmentRecord;
use crate::pipeline::SplicedRead;

pub trait Aggregator {
    /// Records rejected here are dropped before decoding.
    fn accepts(&self, _record: &AlignmentRecord) -> bool {
        true
    }

    fn add_read(&mut self, read: &SplicedRead<'_>);
}
