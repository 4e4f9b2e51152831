pub mod fasta;
pub mod types;

use crate::config::Config;
use crate::error::{Error, Result};
use log::debug;
use std::time::Duration;
pub use types::SearchHit;
use types::SearchResponse;

const SEARCH_URL: &str = "https://rest.uniprot.org/uniprotkb/search";
const FASTA_URL: &str = "https://rest.uniprot.org/uniprotkb/";

/// Fields requested from the search endpoint; keep in sync with
/// the mapping in [`types::SearchEntry`].
const SEARCH_FIELDS: &str = "accession,id,organism_name,protein_name";

/// Blocking client for the UniProtKB REST API.
pub struct UniProtClient {
    client: reqwest::blocking::Client,
}

impl UniProtClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.download_timeout))
            .build()?;
        Ok(Self { client })
    }

    /// Runs a free-text query against UniProtKB and returns up to `limit` hits.
    pub fn search(&self, query: &str, limit: u64) -> Result<Vec<SearchHit>> {
        debug!("searching UniProtKB for '{}' (limit {})", query, limit);
        let size = limit.to_string();
        let response: SearchResponse = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("query", query),
                ("format", "json"),
                ("fields", SEARCH_FIELDS),
                ("size", size.as_str()),
            ])
            .send()?
            .error_for_status()?
            .json()?;

        Ok(response.results.into_iter().map(SearchHit::from).collect())
    }

    /// Looks up a single entry by accession.
    pub fn find_by_accession(&self, accession: &str) -> Result<SearchHit> {
        let query = format!("accession:{}", accession);
        self.search(&query, 1)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::AccessionNotFound(accession.to_string()))
    }

    /// Downloads the canonical FASTA record for an accession.
    pub fn fetch_fasta(&self, accession: &str) -> Result<String> {
        let url = format!("{}{}.fasta", FASTA_URL, accession);
        debug!("downloading {}", url);
        let body = self
            .client
            .get(&url)
            .send()?
            .error_for_status()?
            .text()?;

        // UniProt answers some bad accessions with an empty 200 body.
        if !body.starts_with('>') {
            return Err(Error::Api(format!(
                "response for {} is not a FASTA record",
                accession
            )));
        }
        Ok(body)
    }
}
