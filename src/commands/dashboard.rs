use crate::composition;
use crate::report;
use crate::store::ProteinStore;
use anyhow::Result;
use std::path::Path;

pub fn run(record_key: &str, output_file: &str) -> Result<()> {
    let store = ProteinStore::open_default()?;
    let record = store.find(record_key)?;

    let sequence = composition::normalize(&record.fasta)?;
    let table = composition::count(&sequence);
    report::write_dashboard(record, &sequence, &table, Path::new(output_file))?;

    println!(
        "Wrote composition dashboard for {} ({} residues) to {}",
        record.display_name(),
        sequence.length,
        output_file
    );
    Ok(())
}
