use std::process;

use clap::{error::ErrorKind, Parser};
use colored::Colorize;
use lociphy::{cli::Args, config::Config, error::LociError, run};

fn main() {
    let args = Args::try_parse().unwrap_or_else(|e| {
        if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
            e.exit();
        }
        let message = match e.kind() {
            ErrorKind::MissingRequiredArgument
            | ErrorKind::UnknownArgument
            | ErrorKind::TooManyValues
            | ErrorKind::WrongNumberOfValues => LociError::ArgumentCount.to_string(),
            _ => e.to_string(),
        };
        eprintln!();
        eprintln!(
            "{}\n {}",
            "Problem parsing arguments:".blue().bold(),
            message.blue()
        );
        eprintln!();
        eprintln!(
            "{}\n {}\n  {}\n   {}",
            "Help menu:".blue().bold(),
            "$ cargo run -- --help".bold(),
            "or".underline(),
            "$ lociphy --help".bold()
        );
        eprintln!();
        process::exit(1);
    });

    #[cfg(feature = "tracing")]
    init_tracing();

    let config = Config::from(&args);

    if !args.quiet {
        eprintln!("{}: {}", "loci".bold(), config.loci.to_string().underline().bold().blue());
        eprintln!(
            "{}: {}",
            "arguments".bold(),
            config.arguments.display().to_string().underline().bold().blue()
        );
        eprintln!();
    }

    match run::run(&config) {
        Ok(progress) => {
            if !args.quiet {
                eprintln!(
                    "{}: {} of {} loci retained ({} discarded)",
                    "loci".bold(),
                    progress.batches_retained.to_string().blue().bold(),
                    progress.batches_processed,
                    progress.batches_discarded()
                );
                eprintln!(
                    "{}: {} bp",
                    "alignment length".bold(),
                    progress.alignment_length.to_string().blue().bold()
                );
                eprintln!("{}: {}", "phylip".bold(), config.phylip.display());
                eprintln!("{}: {}", "matrix".bold(), config.matrix.display());
            }
        }
        Err(e) => {
            eprintln!(
                "{}\n {}",
                "Application error:".blue().bold(),
                e.to_string().blue()
            );
            drop(e);
            process::exit(1);
        }
    }
}

#[cfg(feature = "tracing")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
