use super::Aggregator;
use crate::junction::sort_ids;
use crate::pipeline::SplicedRead;
use crate::types::{HashMap, HashMapExt, HashSet, HashSetExt};

/// Site to last read touching it, plus the set of distinct junctions.
#[derive(Debug, Default)]
pub struct SiteMembership {
    sites: HashMap<String, String>,
    junctions: HashSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteMembershipOutput {
    /// Splice site id to the most recent read id that touched it.
    pub sites: HashMap<String, String>,
    /// Distinct junction ids, string-sorted.
    pub junction_ids: Vec<String>,
}

impl SiteMembership {
    pub fn new() -> Self {
        Self {
            sites: HashMap::new(),
            junctions: HashSet::new(),
        }
    }

    pub fn finish(self) -> SiteMembershipOutput {
        let mut junction_ids: Vec<String> = self.junctions.into_iter().collect();
        sort_ids(&mut junction_ids);
        SiteMembershipOutput {
            sites: self.sites,
            junction_ids,
        }
    }
}

impl Aggregator for SiteMembership {
    fn add_read(&mut self, read: &SplicedRead<'_>) {
        let read_id = &read.record.read_id;
        for hit in &read.hits {
            self.sites.insert(hit.donor_id.clone(), read_id.clone());
            self.sites.insert(hit.acceptor_id.clone(), read_id.clone());
            self.junctions.insert(hit.junction_id.clone());
        }
    }
}
