use amplicon_qc::{cli, commands};
use clap::Parser;
use log::debug;

fn main() {
    let args = cli::Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    debug!("Logging set to {}", log_level);

    let result = match args.command {
        cli::Commands::Qc(qc_args) => commands::qc::run(qc_args, args.verbose),
        cli::Commands::Amplicons(amplicon_args) => commands::amplicons::run(amplicon_args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
