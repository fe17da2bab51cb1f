use crate::alignment::{AlignmentRecord, from_bam_record};
use crate::error::Result;
use noodles::bam;
use noodles::sam::alignment::record::data::field::Tag;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct RecordOptions {
    /// Character tag holding the transcription strand.
    pub strand_tag: Tag,
}

impl Default for RecordOptions {
    fn default() -> Self {
        Self {
            strand_tag: Tag::new(b'X', b'S'),
        }
    }
}

pub struct BamInput<R> {
    pub reference_names: Vec<String>,
    reader: bam::io::Reader<R>,
    options: RecordOptions,
}

pub fn open_bam(path: &Path, options: RecordOptions) -> Result<BamInput<impl Read + use<>>> {
    let file = File::open(path)?;
    let mut reader = bam::io::Reader::new(file);
    let header = reader.read_header()?;
    let reference_names = header
        .reference_sequences()
        .keys()
        .map(|name| name.to_string())
        .collect();
    Ok(BamInput {
        reference_names,
        reader,
        options,
    })
}

impl<R: Read> BamInput<R> {
    /// Lazily convert every record in the file.
    pub fn records(&mut self) -> impl Iterator<Item = Result<AlignmentRecord>> + '_ {
        let reference_names = &self.reference_names;
        let strand_tag = self.options.strand_tag;
        self.reader.records().map(move |result| {
            let record = result?;
            from_bam_record(&record, reference_names, strand_tag)
        })
    }
}
