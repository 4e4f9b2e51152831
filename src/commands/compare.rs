use crate::composition;
use crate::report;
use crate::store::ProteinStore;
use anyhow::{bail, Result};
use std::path::Path;

pub fn run(first_key: &str, second_key: &str, output_file: &str) -> Result<()> {
    let store = ProteinStore::open_default()?;
    let first = store.find(first_key)?;
    let second = store.find(second_key)?;

    if first.id == second.id {
        bail!(
            "'{}' and '{}' name the same record; pick two different proteins",
            first_key,
            second_key
        );
    }

    let first_seq = composition::normalize(&first.fasta)?;
    let second_seq = composition::normalize(&second.fasta)?;
    let table = composition::merge(
        composition::count(&first_seq),
        &first.display_name(),
        composition::count(&second_seq),
        &second.display_name(),
    );
    report::write_comparison(
        first,
        &first_seq,
        second,
        &second_seq,
        &table,
        Path::new(output_file),
    )?;

    println!(
        "Wrote comparison dashboard for {} vs {} to {}",
        first.entry_name, second.entry_name, output_file
    );
    Ok(())
}
