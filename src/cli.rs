use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Silence all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search UniProtKB for proteins by name, gene or organism
    Search {
        /// Free-text query, e.g. "insulin human"
        query: String,

        /// Maximum number of hits to show
        #[arg(short = 'n', long)]
        limit: Option<u64>,
    },

    /// Download a protein by accession and store it locally
    Add {
        /// UniProtKB accession, e.g. P01308
        accession: String,
    },

    /// Store every record of a UniProtKB FASTA export (plain or compressed)
    Import {
        /// Path to the FASTA file
        fasta_file: PathBuf,
    },

    /// List the stored protein records
    List,

    /// Render the amino-acid composition dashboard for a stored protein
    Dashboard {
        /// Record id, accession or entry name
        record: String,

        /// Output file for the HTML report
        #[arg(short = 'o', long = "output", default_value = "dashboard.html")]
        output_file: String,
    },

    /// Compare the amino-acid composition of two stored proteins
    Compare {
        /// First record id, accession or entry name
        first: String,

        /// Second record id, accession or entry name
        second: String,

        /// Output file for the HTML report
        #[arg(short = 'o', long = "output", default_value = "comparison.html")]
        output_file: String,
    },

    /// Delete a stored protein record
    Remove {
        /// Record id, accession or entry name
        record: String,
    },
}
