use crate::commands::clip;
use crate::config::Config;
use crate::progress::network_spinner;
use crate::uniprot::UniProtClient;
use anyhow::Result;

pub fn run(query: &str, limit: Option<u64>) -> Result<()> {
    let config = Config::load();
    let limit = limit.unwrap_or(config.search_limit);
    let client = UniProtClient::new(&config)?;

    let spinner = network_spinner(format!("Searching UniProtKB for '{}'...", query));
    let result = client.search(query, limit);
    spinner.finish_and_clear();
    let hits = result?;

    if hits.is_empty() {
        println!("No UniProtKB entries matched '{}'.", query);
        return Ok(());
    }

    println!(
        "{:<12} {:<18} {:<28} {}",
        "ACCESSION", "ENTRY", "ORGANISM", "PROTEIN"
    );
    for hit in &hits {
        println!(
            "{:<12} {:<18} {:<28} {}",
            hit.accession,
            clip(&hit.entry_name, 18),
            clip(&hit.organism, 28),
            hit.protein_name
        );
    }
    println!();
    println!(
        "{} hits. Store one with: aminoscope add <ACCESSION>",
        hits.len()
    );
    Ok(())
}
