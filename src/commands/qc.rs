use crate::ambiguity::sliding_density;
use crate::cli::QcArgs;
use crate::config::Config;
use crate::coverage::DepthSeries;
use crate::export::{plot_bundle_bytes, qc_table_bytes, StagedOutputs};
use crate::metrics::{compose, SampleInputs};
use crate::plot::{render_svg, PlotBundle};
use crate::primers::load_amplicons;
use crate::sources::{read_consensus, reference_length};
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{Context, Result};
use log::info;
use std::time::Duration;

/// Runs QC for one sample. The QC row, the plot and the optional plot bundle are all
/// staged before any of them is moved into place, so a failed run writes none of them.
pub fn run(args: QcArgs, verbose: u8) -> Result<()> {
    let mut config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    args.apply_overrides(&mut config);
    config.validate()?;

    let progress = ProgressBarBuilder::new("Resolving amplicons...")
        .hidden(verbose > 0)
        .with_tick(Duration::from_millis(120))
        .build()?;

    let amplicons = load_amplicons(&args.primer_bed, &args.primer_pairs, &config.primers)
        .context("Failed to resolve amplicons from the primer scheme")?;
    info!("Resolved {} amplicons", amplicons.len());

    progress.set_message("Reading reference...");
    let reference_length = reference_length(&args.reference)
        .with_context(|| format!("Failed to read reference {}", args.reference.display()))?;

    progress.set_message("Extracting depth...");
    let (depth_source, read_counter) = args.backend.open(&args.bam)?;
    let records = depth_source
        .depth_records()
        .with_context(|| format!("Failed to extract depth from {}", args.bam.display()))?;
    let depth = DepthSeries::from_records(&records, reference_length);
    drop(records);

    progress.set_message("Counting aligned reads...");
    let num_aligned_reads = read_counter
        .count_aligned_reads()
        .with_context(|| format!("Failed to count reads in {}", args.bam.display()))?;

    progress.set_message("Analyzing consensus...");
    let consensus = read_consensus(&args.fasta)
        .with_context(|| format!("Failed to read consensus {}", args.fasta.display()))?;

    let fasta_label = args.fasta.display().to_string();
    let bam_label = args.bam.display().to_string();
    let record = compose(
        &SampleInputs {
            sample_name: &args.sample,
            fasta_label: &fasta_label,
            bam_label: &bam_label,
            reference_path: args.reference.clone(),
            reference_length,
            num_aligned_reads,
            min_depth: config.coverage.min_depth,
            depth: &depth,
            consensus: &consensus,
            amplicons: &amplicons,
        },
        &config.policy,
    )
    .context("Failed to compute QC metrics")?;
    let table = qc_table_bytes(&record)?;

    progress.set_message("Rendering plot...");
    let density = sliding_density(
        &consensus,
        config.ambiguity.density_window,
        config.ambiguity.density_normalization,
    );
    let bundle = PlotBundle::new(
        &args.sample,
        &depth,
        density,
        &amplicons,
        config.coverage.min_depth,
        &config.plot,
    );

    let plot_path = args.plot_path();
    let mut outputs = StagedOutputs::new();
    outputs
        .stage(&plot_path, render_svg(&bundle, config.plot.pixels_per_inch).as_bytes())
        .with_context(|| format!("Failed to write plot {}", plot_path.display()))?;
    outputs
        .stage(&args.outfile, &table)
        .with_context(|| format!("Failed to write QC table {}", args.outfile.display()))?;
    if let Some(bundle_path) = &args.plot_bundle {
        outputs
            .stage(bundle_path, &plot_bundle_bytes(&bundle)?)
            .with_context(|| format!("Failed to write plot bundle {}", bundle_path.display()))?;
    }

    for path in outputs.commit().context("Failed to write outputs")? {
        info!("Wrote {}", path.display());
    }

    progress.finish_with_message(format!(
        "{}: qc_pass={}",
        args.sample,
        if record.qc_pass() { "TRUE" } else { "FALSE" }
    ));
    Ok(())
}
