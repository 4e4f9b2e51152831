use std::io;
use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while fetching, storing or analyzing protein records.
#[derive(Debug, Error)]
pub enum Error {
    /// The record text does not follow the UniProtKB FASTA conventions
    /// this tool relies on (header line ending in `SV=<digit>`, followed
    /// by at least one residue line).
    #[error("malformed FASTA record: {0}")]
    MalformedFasta(String),

    #[error("no stored protein matches '{0}'")]
    RecordNotFound(String),

    #[error("no UniProtKB entry found for '{0}'")]
    AccessionNotFound(String),

    #[error("'{0}' is already in the protein database")]
    DuplicateRecord(String),

    #[error("UniProt request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected UniProt response: {0}")]
    Api(String),

    #[error("protein database error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("compressed input error: {0}")]
    Decompress(#[from] niffler::Error),
}
