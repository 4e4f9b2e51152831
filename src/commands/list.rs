use crate::commands::clip;
use crate::store::ProteinStore;
use anyhow::Result;

pub fn run() -> Result<()> {
    let store = ProteinStore::open_default()?;

    if store.is_empty() {
        println!("No proteins stored yet. Fetch one with 'aminoscope search' and 'aminoscope add'.");
        return Ok(());
    }

    println!(
        "{:>4} {:<12} {:<18} {:<28} {}",
        "ID", "ACCESSION", "ENTRY", "ORGANISM", "PROTEIN"
    );
    for record in store.list() {
        println!(
            "{:>4} {:<12} {:<18} {:<28} {}",
            record.id,
            record.accession,
            clip(&record.entry_name, 18),
            clip(&record.organism, 28),
            record.protein_name
        );
    }
    println!();
    println!("{} proteins in {}", store.len(), store.path().display());
    Ok(())
}
