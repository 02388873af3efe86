use amplicon_qc::ambiguity::{sliding_density, AmbiguitySummary, DensityNormalization};
use amplicon_qc::config::PlotConfig;
use amplicon_qc::coverage::{amplicon_median_depth, DepthSeries};
use amplicon_qc::export::{qc_table_bytes, StagedOutputs};
use amplicon_qc::metrics::{compose, CoverageThresholdPolicy, PredicatePolicy, QcMeasurements, SampleInputs};
use amplicon_qc::plot::{render_svg, PlotBundle};
use amplicon_qc::primers::{load_amplicons, AmpliconSet, PrimerNaming};
use amplicon_qc::types::DepthRecord;
use amplicon_qc::QcError;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

// Two-amplicon scheme over a 600 bp reference:
// pool 1 primers at 10-40 and 360-390, pool 2 primers at 200-230 and 550-580.
const PRIMER_BED: &str = "ref\t10\t40\tTOY_v1_1_LEFT\t1\t+\n\
ref\t360\t390\tTOY_v1_1_RIGHT\t1\t-\n\
ref\t200\t230\tTOY_v1_2_LEFT\t2\t+\n\
ref\t550\t580\tTOY_v1_2_RIGHT\t2\t-\n";

const PRIMER_PAIRS: &str = "TOY_v1_1_LEFT\tTOY_v1_1_RIGHT\nTOY_v1_2_LEFT\tTOY_v1_2_RIGHT\n";

fn temp_with(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(suffix).unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

fn toy_amplicons() -> AmpliconSet {
    let bed = temp_with(PRIMER_BED, ".bed");
    let pairs = temp_with(PRIMER_PAIRS, ".tsv");
    load_amplicons(bed.path(), pairs.path(), &PrimerNaming::default()).unwrap()
}

fn sample<'a>(depth: &'a DepthSeries, consensus: &'a [u8], amplicons: &'a AmpliconSet) -> SampleInputs<'a> {
    SampleInputs {
        sample_name: "toy",
        fasta_label: "toy.consensus.fa",
        bam_label: "toy.bam",
        reference_path: PathBuf::from("ref.fa"),
        reference_length: 600,
        num_aligned_reads: 2500,
        min_depth: 10,
        depth,
        consensus,
        amplicons,
    }
}

fn uniform_depth(depth: u32) -> DepthSeries {
    let records: Vec<DepthRecord> = (1..=600).map(|pos| DepthRecord::new("ref", pos, depth)).collect();
    DepthSeries::from_records(&records, 600)
}

#[test]
fn primer_scheme_resolves_to_two_amplicons() {
    let amplicons = toy_amplicons();
    assert_eq!(amplicons.len(), 2);

    let first = amplicons.get("1").unwrap();
    assert_eq!((first.pool.as_str(), first.start, first.end), ("1", 40, 360));
    assert_eq!(first.length, first.end - first.start);

    let second = amplicons.get("2").unwrap();
    assert_eq!((second.pool.as_str(), second.start, second.end), ("2", 230, 550));
    assert_eq!(second.length, first.length);
}

#[test]
fn minimal_primer_tables_resolve() {
    let bed = temp_with("r\t1\t2\ta_b_1_L\t1\t+\nr\t8\t9\ta_b_1_R\t1\t-\n", ".bed");
    let pairs = temp_with("a_b_1_L\ta_b_1_R", ".tsv");
    let amplicons = load_amplicons(bed.path(), pairs.path(), &PrimerNaming::default()).unwrap();
    assert_eq!(amplicons.get("1").map(|a| a.length), Some(6));
}

#[test]
fn primer_without_pair_aborts() {
    let bed = temp_with(PRIMER_BED, ".bed");
    let pairs = temp_with("TOY_v1_1_LEFT\tTOY_v1_1_RIGHT\n", ".tsv");
    let err = load_amplicons(bed.path(), pairs.path(), &PrimerNaming::default()).unwrap_err();
    assert!(matches!(err, QcError::MissingPair(name) if name == "TOY_v1_2_LEFT"));
}

#[test]
fn malformed_primer_name_aborts() {
    let bed = temp_with(PRIMER_BED, ".bed");
    let pairs = temp_with(PRIMER_PAIRS, ".tsv");
    let naming = PrimerNaming::new("_", 7);
    let err = load_amplicons(bed.path(), pairs.path(), &naming).unwrap_err();
    assert!(matches!(err, QcError::MalformedIdentifier { field: 7, .. }));
}

#[test]
fn uniform_depth_and_clean_consensus() {
    let amplicons = toy_amplicons();
    let depth = uniform_depth(50);
    let consensus = vec![b'A'; 600];
    let record = compose(&sample(&depth, &consensus, &amplicons), &CoverageThresholdPolicy::default()).unwrap();

    let header = record.header();
    let row = record.row();
    let column = |name: &str| row[header.iter().position(|h| h == name).unwrap()].as_str();

    assert_eq!(column("pct_covered_bases"), "100.00");
    assert_eq!(column("pct_N_bases"), "0.00");
    assert_eq!(column("longest_no_N_run"), "600");
    assert_eq!(column("median_depth_coverage"), "50");
    assert_eq!(column("num_aligned_reads"), "2500");
    assert_eq!(column("amplicon_1_median_depth"), "50");
    assert_eq!(column("amplicon_2_median_depth"), "50");
    assert_eq!(column("qc_pass"), "TRUE");
}

#[test]
fn all_n_consensus() {
    let amplicons = toy_amplicons();
    let depth = uniform_depth(50);
    let consensus = vec![b'N'; 600];
    let record = compose(&sample(&depth, &consensus, &amplicons), &CoverageThresholdPolicy::default()).unwrap();

    let row = record.row();
    assert_eq!(row[1], "100.00");
    assert_eq!(row[4], "0");
}

#[test]
fn empty_consensus_short_circuits() {
    let summary = AmbiguitySummary::from_sequence(b"");
    assert_eq!(summary.pct_n_bases, 0.0);
    assert_eq!(summary.longest_clean_run, 0);

    let amplicons = toy_amplicons();
    let depth = uniform_depth(0);
    let record = compose(&sample(&depth, b"", &amplicons), &CoverageThresholdPolicy::default()).unwrap();
    let m = record.measurements();
    assert_eq!(m.pct_n_bases, 0.0);
    assert_eq!(m.longest_no_n_run, 0);
    assert_eq!(m.pct_covered_bases, 0.0);
    assert_eq!(m.median_depth_coverage, 0.0);
    assert!(!record.qc_pass());
}

#[test]
fn sparse_depth_records_fill_with_zero() {
    // Depth only over amplicon 1's insert, as an extractor without -a would report
    let records: Vec<DepthRecord> = (41..=360).map(|pos| DepthRecord::new("ref", pos, 30)).collect();
    let depth = DepthSeries::from_records(&records, 600);
    assert_eq!(depth.len(), 600);

    let amplicons = toy_amplicons();
    let consensus = vec![b'A'; 600];
    let record = compose(&sample(&depth, &consensus, &amplicons), &CoverageThresholdPolicy::default()).unwrap();
    let m = record.measurements();

    assert_eq!(format!("{:.2}", m.pct_covered_bases), "53.33");
    // 320 positions at 30x against 280 at zero
    assert_eq!(m.median_depth_coverage, 30.0);
    assert_eq!(m.amplicon_median_depths.get("1"), Some(30.0));
    // Amplicon 2 spans 230..=550: 131 positions at 30x, 190 at zero
    assert_eq!(m.amplicon_median_depths.get("2"), Some(0.0));
    assert!(!record.qc_pass());
}

#[test]
fn amplicon_outside_depth_has_zero_median() {
    let depth = DepthSeries::from_depths(vec![40; 100]);
    assert_eq!(amplicon_median_depth(&depth, 230, 550), 0.0);
}

#[test]
fn custom_policy_decides_pass() {
    let amplicons = toy_amplicons();
    let depth = uniform_depth(50);
    let consensus = vec![b'A'; 600];
    let policy = PredicatePolicy::new("every-amplicon-20x", |m: &QcMeasurements| {
        m.amplicon_median_depths.iter().all(|(_, d)| d >= 20.0)
    });
    let record = compose(&sample(&depth, &consensus, &amplicons), &policy).unwrap();
    assert!(record.qc_pass());
    assert_eq!(record.policy(), "every-amplicon-20x");
}

#[test]
fn qc_file_header_matches_row() {
    let amplicons = toy_amplicons();
    let depth = uniform_depth(50);
    let consensus = vec![b'A'; 600];
    let record = compose(&sample(&depth, &consensus, &amplicons), &CoverageThresholdPolicy::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("toy.qc.csv");
    let table = qc_table_bytes(&record).unwrap();
    let mut outputs = StagedOutputs::new();
    outputs.stage(&path, &table).unwrap();
    outputs.commit().unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let header = reader.headers().unwrap().clone();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(header.len(), rows[0].len());
    assert_eq!(header.get(0), Some("sample_name"));
    assert_eq!(header.get(header.len() - 1), Some("qc_pass"));
    assert_eq!(rows[0].get(0), Some("toy"));

    assert_eq!(table, std::fs::read(&path).unwrap());
}

#[test]
fn plot_renders_from_bundle() {
    let amplicons = toy_amplicons();
    let depth = uniform_depth(50);
    let mut consensus = vec![b'A'; 600];
    consensus[100..150].fill(b'N');
    let density = sliding_density(&consensus, 10, DensityNormalization::Nominal);
    assert_eq!(density.len(), 600);

    let bundle = PlotBundle::new("toy", &depth, density, &amplicons, 10, &PlotConfig::default());
    assert_eq!(bundle.amplicons.len(), 2);
    assert_eq!(bundle.y_axis_top, 10_000.0);

    let svg = render_svg(&bundle, 20.0);
    assert!(svg.contains(">toy</text>"));
    assert!(svg.contains("<polyline"));
}
