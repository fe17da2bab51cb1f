/// End-to-end tests: write a small BAM with noodles, then run both the library
/// pipeline and the `spanki-rs` binary over it.
use noodles::bam;
use noodles::core::Position;
use noodles::sam;
use noodles::sam::alignment::RecordBuf;
use noodles::sam::alignment::io::Write as _;
use noodles::sam::alignment::record::Flags;
use noodles::sam::alignment::record::cigar::{Op, op::Kind};
use noodles::sam::alignment::record::data::field::Tag;
use noodles::sam::alignment::record_buf::Sequence;
use noodles::sam::alignment::record_buf::data::field::Value;
use noodles::sam::header::record::value::{Map, map::ReferenceSequence};
use spanki_rs::aggregate::{Geometry, SiteMembership};
use spanki_rs::bam_input::{RecordOptions, open_bam};
use spanki_rs::{Cigar, CigarOp, Error, run};
use std::fs::File;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

// ── helpers ──────────────────────────────────────────────────────────────────

fn header() -> sam::Header {
    let len = NonZeroUsize::new(1_000_000).expect("non-zero length");
    sam::Header::builder()
        .add_reference_sequence("chr1", Map::<ReferenceSequence>::new(len))
        .add_reference_sequence("chr2", Map::<ReferenceSequence>::new(len))
        .build()
}

fn to_kind(op: CigarOp) -> Kind {
    match op {
        CigarOp::Match => Kind::Match,
        CigarOp::Ins => Kind::Insertion,
        CigarOp::Del => Kind::Deletion,
        CigarOp::RefSkip => Kind::Skip,
        CigarOp::SoftClip => Kind::SoftClip,
        CigarOp::HardClip => Kind::HardClip,
        CigarOp::Pad => Kind::Pad,
        CigarOp::Equal => Kind::SequenceMatch,
        CigarOp::Diff => Kind::SequenceMismatch,
    }
}

/// A mapped record; `start` is 0-based, `strand` goes into XS when given.
fn mapped(name: &str, ref_id: usize, start: usize, cigar: &str, strand: Option<u8>) -> RecordBuf {
    let cigar: Cigar = cigar.parse().expect("valid CIGAR");
    let mut record = RecordBuf::default();
    *record.name_mut() = Some(name.as_bytes().to_vec().into());
    *record.flags_mut() = Flags::empty();
    *record.reference_sequence_id_mut() = Some(ref_id);
    *record.alignment_start_mut() = Some(Position::try_from(start + 1).expect("valid position"));
    *record.cigar_mut() = cigar
        .ops
        .iter()
        .map(|&(len, op)| Op::new(to_kind(op), len as usize))
        .collect();
    *record.sequence_mut() = Sequence::from(vec![b'A'; cigar.read_length()]);
    if let Some(strand) = strand {
        *record.data_mut() = [(Tag::new(b'X', b'S'), Value::Character(strand))]
            .into_iter()
            .collect();
    }
    record
}

fn write_bam(path: &Path, records: &[RecordBuf]) {
    let header = header();
    let mut writer = bam::io::Writer::new(File::create(path).expect("create BAM"));
    writer.write_header(&header).expect("write header");
    for record in records {
        writer
            .write_alignment_record(&header, record)
            .expect("write record");
    }
    writer.finish(&header).expect("finish BAM");
}

fn sample_records() -> Vec<RecordBuf> {
    let mut unmapped = RecordBuf::default();
    *unmapped.name_mut() = Some(b"lost".to_vec().into());

    vec![
        mapped("tx1", 0, 1000, "50M30N60M", Some(b'+')),
        mapped("tx2", 0, 1000, "50M30N60M", Some(b'-')),
        mapped("tx3", 1, 0, "5S10M100N20M2I200N30M", Some(b'+')),
        // Unspliced reads usually carry no XS tag.
        mapped("plain", 0, 500, "100M", None),
        unmapped,
    ]
}

fn spanki_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_spanki-rs"))
}

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .expect("read output")
        .lines()
        .map(str::to_string)
        .collect()
}

fn run_mode(bam: &Path, mode: &str, out_dir: &Path) {
    let status = Command::new(spanki_bin())
        .arg(bam)
        .args(["--mode", mode, "-q", "-o"])
        .arg(out_dir)
        .status()
        .expect("failed to spawn spanki-rs");
    assert!(status.success(), "spanki-rs exited with status {status}");
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[test]
fn library_pass_over_bam() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("in.bam");
    write_bam(&path, &sample_records());

    let mut bam = open_bam(&path, RecordOptions::default()).expect("open BAM");
    assert_eq!(bam.reference_names, vec!["chr1", "chr2"]);

    let mut sites = SiteMembership::new();
    let stats = run(bam.records(), &mut sites).expect("pass succeeds");
    assert_eq!(stats.total_records, 5);
    assert_eq!(stats.spliced_records, 3);
    assert_eq!(stats.unspliced_records, 2);
    assert_eq!(stats.junctions, 4);

    let out = sites.finish();
    // tx3: 10M -> intron 11..=110, then 20M2I -> intron 131..=330 on chr2.
    // "11_" sorts before "131" as a string.
    assert_eq!(
        out.junction_ids,
        vec![
            "chr1:1051_1080:+",
            "chr1:1051_1080:-",
            "chr2:11_110:+",
            "chr2:131_330:+",
        ]
    );
    assert_eq!(out.sites["chr1:1051"], "tx2");
    assert_eq!(out.sites["chr2:330"], "tx3");
}

#[test]
fn geometry_uses_alignment_end_from_cigar() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("in.bam");
    write_bam(&path, &sample_records());

    let mut bam = open_bam(&path, RecordOptions::default()).expect("open BAM");
    let mut geometry = Geometry::new();
    run(bam.records(), &mut geometry).expect("pass succeeds");
    let out = geometry.finish();

    let tx3 = &out.reads["tx3"];
    assert_eq!(tx3.reference, "chr2");
    assert_eq!((tx3.start, tx3.end), (0, 360));
    assert_eq!(tx3.junction_count, 2);
    assert!(!out.reads.contains_key("plain"));
}

#[test]
fn missing_strand_on_spliced_read_is_fatal() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("in.bam");
    write_bam(
        &path,
        &[
            mapped("tx1", 0, 1000, "50M30N60M", Some(b'+')),
            mapped("untagged", 0, 2000, "50M30N60M", None),
        ],
    );

    let mut bam = open_bam(&path, RecordOptions::default()).expect("open BAM");
    let mut sites = SiteMembership::new();
    let err = run(bam.records(), &mut sites).unwrap_err();
    assert!(matches!(err, Error::UnrecognizedStrand { strand: '.', .. }));
}

#[test]
fn binary_writes_site_tables() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("in.bam");
    let out_dir = dir.path().join("out");
    write_bam(&path, &sample_records());

    run_mode(&path, "sites", &out_dir);

    let junctions = read_lines(&out_dir.join("junctions.txt"));
    assert_eq!(junctions.len(), 4);
    assert_eq!(junctions[0], "chr1:1051_1080:+");

    let sites = read_lines(&out_dir.join("site_reads.tsv"));
    assert_eq!(sites[0], "site\tread");
    assert!(sites.contains(&"chr1:1080\ttx2".to_string()));
}

#[test]
fn binary_selection_mode_requires_and_applies_read_list() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("in.bam");
    let out_dir = dir.path().join("out");
    let reads = dir.path().join("reads.txt");
    write_bam(&path, &sample_records());
    std::fs::write(&reads, "# wanted\ntx3\n\n").expect("write read list");

    let status = Command::new(spanki_bin())
        .arg(&path)
        .args(["--mode", "selection", "-q", "-o"])
        .arg(&out_dir)
        .status()
        .expect("failed to spawn spanki-rs");
    assert!(!status.success(), "selection without --reads must fail");

    let status = Command::new(spanki_bin())
        .arg(&path)
        .args(["--mode", "selection", "-q", "-o"])
        .arg(&out_dir)
        .arg("--reads")
        .arg(&reads)
        .status()
        .expect("failed to spawn spanki-rs");
    assert!(status.success(), "spanki-rs exited with status {status}");

    let rows = read_lines(&out_dir.join("junction_reads.tsv"));
    assert_eq!(
        rows,
        vec![
            "junction\treads",
            "chr2:11_110:+\ttx3",
            "chr2:131_330:+\ttx3",
        ]
    );
}

/// tx4 comes first, so chr1:1051 lists chr1:1110 before chr1:1080.
#[test]
fn binary_writes_connection_tables() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("in.bam");
    let out_dir = dir.path().join("out");
    let mut records = vec![mapped("tx4", 0, 1000, "50M60N60M", Some(b'+'))];
    records.extend(sample_records());
    write_bam(&path, &records);

    run_mode(&path, "connections", &out_dir);

    assert_eq!(
        read_lines(&out_dir.join("site_partners.tsv")),
        vec![
            "site\tpartners",
            "chr1:1051\tchr1:1110,chr1:1080,chr1:1080",
            "chr1:1080\tchr1:1051,chr1:1051",
            "chr1:1110\tchr1:1051",
            "chr2:11\tchr2:110",
            "chr2:110\tchr2:11",
            "chr2:131\tchr2:330",
            "chr2:330\tchr2:131",
        ]
    );
    // tx2 is on `-`, so chr1:1080 is its donor and chr1:1051 its acceptor.
    assert_eq!(
        read_lines(&out_dir.join("donors.txt")),
        vec!["chr1:1051", "chr1:1080", "chr2:11", "chr2:131"]
    );
    assert_eq!(
        read_lines(&out_dir.join("acceptors.txt")),
        vec!["chr1:1051", "chr1:1080", "chr1:1110", "chr2:110", "chr2:330"]
    );
}

/// tx5 crosses the same junction as tx1 but is written first.
#[test]
fn binary_writes_geometry_tables() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("in.bam");
    let out_dir = dir.path().join("out");
    let mut records = vec![mapped("tx5", 0, 990, "60M30N50M", Some(b'+'))];
    records.extend(sample_records());
    write_bam(&path, &records);

    run_mode(&path, "geometry", &out_dir);

    assert_eq!(
        read_lines(&out_dir.join("reads.tsv")),
        vec![
            "read\treference\tstart\tend\tstrand\tjunctions",
            "tx1\tchr1\t1000\t1140\t+\t1",
            "tx2\tchr1\t1000\t1140\t-\t1",
            "tx3\tchr2\t0\t360\t+\t2",
            "tx5\tchr1\t990\t1130\t+\t1",
        ]
    );
    assert_eq!(
        read_lines(&out_dir.join("junction_positions.tsv")),
        vec![
            "junction\torder\tstart_distance\tend_distance",
            "chr1:1051_1080:+\t1\t61\t50",
            "chr1:1051_1080:+\t1\t51\t60",
            "chr1:1051_1080:-\t1\t60\t80",
            "chr2:11_110:+\t1\t11\t250",
            "chr2:131_330:+\t2\t131\t30",
        ]
    );
}

#[test]
fn binary_writes_every_read_per_junction() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("in.bam");
    let out_dir = dir.path().join("out");
    let mut records = sample_records();
    records.push(mapped("dup", 0, 990, "60M30N50M", Some(b'+')));
    write_bam(&path, &records);

    run_mode(&path, "junction-reads", &out_dir);

    assert_eq!(
        read_lines(&out_dir.join("junction_reads.tsv")),
        vec![
            "junction\treads",
            "chr1:1051_1080:+\ttx1,dup",
            "chr1:1051_1080:-\ttx2",
            "chr2:11_110:+\ttx3",
            "chr2:131_330:+\ttx3",
        ]
    );
    assert_eq!(read_lines(&out_dir.join("junctions.txt")).len(), 4);

    let sites = read_lines(&out_dir.join("site_reads.tsv"));
    assert!(sites.contains(&"chr1:1051\tdup".to_string()));
    assert!(sites.contains(&"chr2:330\ttx3".to_string()));
}
