use super::Aggregator;
use crate::alignment::AlignmentRecord;
use crate::junction::sort_ids;
use crate::pipeline::SplicedRead;
use crate::types::{HashMap, HashMapExt, HashSet};

/// Site membership with the full list of reads behind every junction,
/// optionally restricted to an allow-list of read ids.
#[derive(Debug, Default)]
pub struct JunctionMembership {
    allowed: Option<HashSet<String>>,
    sites: HashMap<String, String>,
    junctions: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JunctionMembershipOutput {
    pub sites: HashMap<String, String>,
    /// Junction ids, string-sorted.
    pub junction_ids: Vec<String>,
    /// Junction id to contributing read ids, in stream order.
    pub junction_reads: HashMap<String, Vec<String>>,
}

impl JunctionMembership {
    /// Accept every record.
    pub fn all() -> Self {
        Self {
            allowed: None,
            sites: HashMap::new(),
            junctions: HashMap::new(),
        }
    }

    /// Only records whose read id is in `allowed` contribute.
    pub fn restricted_to(allowed: HashSet<String>) -> Self {
        Self {
            allowed: Some(allowed),
            ..Self::all()
        }
    }

    pub fn finish(self) -> JunctionMembershipOutput {
        let mut junction_ids: Vec<String> = self.junctions.keys().cloned().collect();
        sort_ids(&mut junction_ids);
        JunctionMembershipOutput {
            sites: self.sites,
            junction_ids,
            junction_reads: self.junctions,
        }
    }
}

impl Aggregator for JunctionMembership {
    fn accepts(&self, record: &AlignmentRecord) -> bool {
        self.allowed
            .as_ref()
            .is_none_or(|allowed| allowed.contains(&record.read_id))
    }

    fn add_read(&mut self, read: &SplicedRead<'_>) {
        let read_id = &read.record.read_id;
        for hit in &read.hits {
            self.sites.insert(hit.donor_id.clone(), read_id.clone());
            self.sites.insert(hit.acceptor_id.clone(), read_id.clone());
            self.junctions
                .entry(hit.junction_id.clone())
                .or_default()
                .push(read_id.clone());
        }
    }
}
