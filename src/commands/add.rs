use crate::composition;
use crate::config::Config;
use crate::error::Error;
use crate::progress::network_spinner;
use crate::store::{NewProtein, ProteinStore};
use crate::uniprot::UniProtClient;
use anyhow::Result;

pub fn run(accession: &str) -> Result<()> {
    let config = Config::load();
    let client = UniProtClient::new(&config)?;
    let mut store = ProteinStore::open_default()?;

    // check locally before going to the network
    if let Ok(existing) = store.find(accession) {
        return Err(Error::DuplicateRecord(existing.accession.clone()).into());
    }

    let spinner = network_spinner(format!("Fetching {} from UniProtKB...", accession));
    let fetched = client
        .find_by_accession(accession)
        .and_then(|hit| client.fetch_fasta(&hit.accession).map(|fasta| (hit, fasta)));
    spinner.finish_and_clear();
    let (hit, fasta) = fetched?;

    // only records the normalizer accepts go into the database
    composition::normalize(&fasta)?;

    let record = store.add(NewProtein {
        accession: hit.accession,
        entry_name: hit.entry_name,
        organism: hit.organism,
        protein_name: hit.protein_name,
        fasta,
    })?;

    println!(
        "Added {} ({}) to the protein database as record {}.",
        record.accession,
        record.display_name(),
        record.id
    );
    Ok(())
}
