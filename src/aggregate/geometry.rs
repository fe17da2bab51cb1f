use super::Aggregator;
use crate::pipeline::SplicedRead;
use crate::strand::Strand;
use crate::types::{HashMap, HashMapExt, Pos};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadSummary {
    pub reference: String,
    /// 0-based alignment start.
    pub start: Pos,
    /// Exclusive alignment end.
    pub end: Pos,
    pub strand: Strand,
    pub junction_count: usize,
}

/// Where one read places a junction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JunctionPlacement {
    pub order: usize,
    pub start_distance: i64,
    pub end_distance: i64,
}

/// Per-read extents and per-junction placements, in stream order.
#[derive(Debug, Default)]
pub struct Geometry {
    reads: HashMap<String, ReadSummary>,
    placements: HashMap<String, Vec<JunctionPlacement>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeometryOutput {
    pub reads: HashMap<String, ReadSummary>,
    pub placements: HashMap<String, Vec<JunctionPlacement>>,
}

impl Geometry {
    pub fn new() -> Self {
        Self {
            reads: HashMap::new(),
            placements: HashMap::new(),
        }
    }

    pub fn finish(self) -> GeometryOutput {
        GeometryOutput {
            reads: self.reads,
            placements: self.placements,
        }
    }
}

impl Aggregator for Geometry {
    fn add_read(&mut self, read: &SplicedRead<'_>) {
        // A read name seen again (multi-mapping) replaces the earlier summary.
        self.reads.insert(
            read.record.read_id.clone(),
            ReadSummary {
                reference: read.record.reference.clone(),
                start: read.start,
                end: read.end,
                strand: read.strand,
                junction_count: read.hits.len(),
            },
        );
        for hit in &read.hits {
            self.placements
                .entry(hit.junction_id.clone())
                .or_default()
                .push(JunctionPlacement {
                    order: hit.order,
                    start_distance: hit.start_distance,
                    end_distance: hit.end_distance,
                });
        }
    }
}
