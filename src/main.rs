use aminoscope::cli::{Args, Commands};
use aminoscope::commands;
use clap::Parser;

fn main() {
    let args = Args::parse();
    init_logging(&args);

    let result = match args.command {
        Commands::Search { query, limit } => commands::search::run(&query, limit),
        Commands::Add { accession } => commands::add::run(&accession),
        Commands::Import { fasta_file } => commands::import::run(&fasta_file),
        Commands::List => commands::list::run(),
        Commands::Dashboard {
            record,
            output_file,
        } => commands::dashboard::run(&record, &output_file),
        Commands::Compare {
            first,
            second,
            output_file,
        } => commands::compare::run(&first, &second, &output_file),
        Commands::Remove { record } => commands::remove::run(&record),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(args: &Args) {
    // warnings and errors are always shown; -v raises the level, -q drops everything
    stderrlog::new()
        .quiet(args.quiet)
        .verbosity(1 + args.verbose as usize)
        .timestamp(stderrlog::Timestamp::Off)
        .init()
        .unwrap();
}
