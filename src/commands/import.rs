use crate::composition;
use crate::error::Error;
use crate::store::{NewProtein, ProteinStore};
use crate::uniprot::fasta::{read_records, ExportRecord};
use anyhow::Result;
use log::warn;
use std::path::Path;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub added: u64,
    pub duplicates: u64,
    pub invalid: u64,
}

pub fn run(fasta_file: &Path) -> Result<()> {
    let mut store = ProteinStore::open_default()?;

    let records = read_records(fasta_file)?;
    let total = records.len();
    let stats = import_records(&mut store, records)?;

    println!(
        "Imported {} of {} records ({} duplicates, {} invalid skipped).",
        stats.added, total, stats.duplicates, stats.invalid
    );
    Ok(())
}

/// Stores every record that normalizes cleanly and is not already present.
/// Duplicates and malformed records are skipped with a warning; anything
/// else (IO, corrupt store) aborts the import.
pub fn import_records(
    store: &mut ProteinStore,
    records: Vec<ExportRecord>,
) -> crate::error::Result<ImportStats> {
    let mut stats = ImportStats::default();

    for record in records {
        if let Err(e) = composition::normalize(&record.fasta) {
            warn!("skipping {}: {}", record.fields.accession, e);
            stats.invalid += 1;
            continue;
        }

        let ExportRecord { fields, fasta } = record;
        match store.add(NewProtein {
            accession: fields.accession,
            entry_name: fields.entry_name,
            organism: fields.organism,
            protein_name: fields.protein_name,
            fasta,
        }) {
            Ok(_) => stats.added += 1,
            Err(Error::DuplicateRecord(accession)) => {
                warn!("{} is already stored, skipping", accession);
                stats.duplicates += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(stats)
}
