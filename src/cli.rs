use crate::config::Config;
use crate::sources::AlignmentBackend;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute QC metrics and a coverage plot for one amplicon-sequenced sample
    Qc(QcArgs),

    /// Resolve a primer scheme into its amplicons and print them as TSV
    Amplicons(AmpliconArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct QcArgs {
    /// Sample name used in the QC row and plot title
    #[arg(long)]
    pub sample: String,

    /// Reference FASTA the reads were aligned to
    #[arg(long = "ref")]
    pub reference: PathBuf,

    /// Aligned reads (BAM)
    #[arg(long)]
    pub bam: PathBuf,

    /// Consensus FASTA for the sample
    #[arg(long)]
    pub fasta: PathBuf,

    /// Primer BED: contig, start, end, name, pool, strand
    #[arg(long)]
    pub primer_bed: PathBuf,

    /// Tab-separated primer pairs, one forward/reverse name pair per line
    #[arg(long)]
    pub primer_pairs: PathBuf,

    /// Output file for the QC row (CSV with header)
    #[arg(long)]
    pub outfile: PathBuf,

    /// Minimum depth for a position to count as covered (default: 10)
    #[arg(long)]
    pub min_depth: Option<u32>,

    /// Plot depth axis runs up to 10^N (default: 4)
    #[arg(long)]
    pub max_y_axis_exponent: Option<i32>,

    /// Moving-average window for the plotted depth (default: 200)
    #[arg(long)]
    pub window: Option<usize>,

    /// Plot width in inches (default: 36.0)
    #[arg(long)]
    pub width: Option<f64>,

    /// Plot height in inches (default: 6.0)
    #[arg(long)]
    pub height: Option<f64>,

    /// Where to write the plot (default: <sample>.depth.svg)
    #[arg(long)]
    pub plot_output: Option<PathBuf>,

    /// Also write the plot inputs as JSON to this path
    #[arg(long)]
    pub plot_bundle: Option<PathBuf>,

    /// Minimum percent of covered genome positions for qc_pass (default: 90)
    #[arg(long)]
    pub min_pct_covered_bases: Option<f64>,

    /// Delimiter used to split primer names (default: _)
    #[arg(long)]
    pub delimiter: Option<String>,

    /// 0-based field of the split primer name holding the amplicon number (default: 2)
    #[arg(long)]
    pub amplicon_field: Option<usize>,

    /// How depth and read counts are obtained from the BAM
    #[arg(long, value_enum, default_value_t = AlignmentBackend::Htslib)]
    pub backend: AlignmentBackend,

    /// Configuration file (default: per-user config.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl QcArgs {
    pub fn apply_overrides(&self, config: &mut Config) {
        apply_naming_overrides(self.delimiter.as_deref(), self.amplicon_field, config);
        if let Some(min_depth) = self.min_depth {
            config.coverage.min_depth = min_depth;
        }
        if let Some(exponent) = self.max_y_axis_exponent {
            config.plot.max_y_axis_exponent = exponent;
        }
        if let Some(window) = self.window {
            config.plot.moving_average_window = window;
        }
        if let Some(width) = self.width {
            config.plot.width = width;
        }
        if let Some(height) = self.height {
            config.plot.height = height;
        }
        if let Some(min_pct) = self.min_pct_covered_bases {
            config.policy.min_pct_covered_bases = min_pct;
        }
    }

    pub fn plot_path(&self) -> PathBuf {
        self.plot_output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.depth.svg", self.sample)))
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct AmpliconArgs {
    /// Primer BED: contig, start, end, name, pool, strand
    #[arg(long)]
    pub primer_bed: PathBuf,

    /// Tab-separated primer pairs
    #[arg(long)]
    pub primer_pairs: PathBuf,

    /// Output TSV (default: stdout)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Delimiter used to split primer names (overrides config)
    #[arg(long)]
    pub delimiter: Option<String>,

    /// 0-based field of the split primer name holding the amplicon number (overrides config)
    #[arg(long)]
    pub amplicon_field: Option<usize>,

    /// Configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl AmpliconArgs {
    pub fn apply_overrides(&self, config: &mut Config) {
        apply_naming_overrides(self.delimiter.as_deref(), self.amplicon_field, config);
    }
}

fn apply_naming_overrides(delimiter: Option<&str>, amplicon_field: Option<usize>, config: &mut Config) {
    if let Some(delimiter) = delimiter {
        config.primers.delimiter = delimiter.to_string();
    }
    if let Some(field) = amplicon_field {
        config.primers.amplicon_field = field;
    }
}
