use crate::cli::AmpliconArgs;
use crate::config::Config;
use crate::primers::{load_amplicons, AmpliconSet};
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::fs::File;
use std::io::{self, Write};

pub fn run(args: AmpliconArgs) -> Result<()> {
    let mut config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    args.apply_overrides(&mut config);
    config.validate()?;

    let amplicons = load_amplicons(&args.primer_bed, &args.primer_pairs, &config.primers)
        .context("Failed to resolve amplicons from the primer scheme")?;

    match &args.output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
            write_amplicon_table(&amplicons, file)
        }
        None => write_amplicon_table(&amplicons, io::stdout().lock()),
    }
}

/// Tab-separated amplicon table with a header row.
pub fn write_amplicon_table<W: Write>(amplicons: &AmpliconSet, writer: W) -> Result<()> {
    let mut tsv = WriterBuilder::new().delimiter(b'\t').from_writer(writer);
    for amplicon in amplicons {
        tsv.serialize(amplicon)?;
    }
    tsv.flush()?;
    Ok(())
}
