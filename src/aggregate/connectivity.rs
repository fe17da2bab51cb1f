use super::Aggregator;
use crate::junction::sort_ids;
use crate::pipeline::SplicedRead;
use crate::types::{HashMap, HashMapExt, HashSet, HashSetExt};

/// Donor/acceptor graph. Partner lists keep one entry per supporting read.
#[derive(Debug, Default)]
pub struct Connectivity {
    partners: HashMap<String, Vec<String>>,
    donors: HashSet<String>,
    acceptors: HashSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectivityOutput {
    pub partners: HashMap<String, Vec<String>>,
    pub donors: Vec<String>,
    pub acceptors: Vec<String>,
}

impl Connectivity {
    pub fn new() -> Self {
        Self {
            partners: HashMap::new(),
            donors: HashSet::new(),
            acceptors: HashSet::new(),
        }
    }

    pub fn finish(self) -> ConnectivityOutput {
        let mut donors: Vec<String> = self.donors.into_iter().collect();
        let mut acceptors: Vec<String> = self.acceptors.into_iter().collect();
        sort_ids(&mut donors);
        sort_ids(&mut acceptors);
        ConnectivityOutput {
            partners: self.partners,
            donors,
            acceptors,
        }
    }
}

impl Aggregator for Connectivity {
    fn add_read(&mut self, read: &SplicedRead<'_>) {
        for hit in &read.hits {
            self.partners
                .entry(hit.donor_id.clone())
                .or_default()
                .push(hit.acceptor_id.clone());
            self.partners
                .entry(hit.acceptor_id.clone())
                .or_default()
                .push(hit.donor_id.clone());
            self.donors.insert(hit.donor_id.clone());
            self.acceptors.insert(hit.acceptor_id.clone());
        }
    }
}
