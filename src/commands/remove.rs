use crate::store::ProteinStore;
use anyhow::Result;

pub fn run(record_key: &str) -> Result<()> {
    let mut store = ProteinStore::open_default()?;
    let record = store.remove(record_key)?;

    println!(
        "Removed {} ({}) from the protein database.",
        record.accession,
        record.display_name()
    );
    Ok(())
}
