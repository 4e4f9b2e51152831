mod chart;

use crate::composition::{ComparisonTable, CompositionTable, NormalizedSequence};
use crate::error::Result;
use crate::store::ProteinRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the single-protein composition dashboard.
pub fn write_dashboard(
    record: &ProteinRecord,
    sequence: &NormalizedSequence,
    table: &CompositionTable,
    output_path: &Path,
) -> Result<()> {
    let mut html = String::new();
    html.push_str(include_str!("templates/report_header.html"));

    write_record_section(&mut html, record, sequence);

    html.push_str(&format!(
        "<h2>Amino-acid composition of {}</h2>",
        record.entry_name
    ));
    html.push_str("<figure class='composition-plot'>");
    html.push_str(&chart::composition_chart(table));
    html.push_str(&format!(
        "<figcaption>Amino-acid counts in {}, {} residues in total.</figcaption>",
        record.display_name(),
        sequence.length
    ));
    html.push_str("</figure>");

    write_composition_table(&mut html, table);

    html.push_str(include_str!("templates/report_footer.html"));
    write_out(&html, output_path)
}

/// Writes the two-protein comparison dashboard.
pub fn write_comparison(
    first: &ProteinRecord,
    first_seq: &NormalizedSequence,
    second: &ProteinRecord,
    second_seq: &NormalizedSequence,
    table: &ComparisonTable,
    output_path: &Path,
) -> Result<()> {
    let mut html = String::new();
    html.push_str(include_str!("templates/report_header.html"));

    html.push_str("<section class='stats-box'>");
    html.push_str(&format!(
        "<h2>{} vs {}</h2>",
        first.entry_name, second.entry_name
    ));
    html.push_str("<div class='stats-columns'>");
    write_record_columns(&mut html, first, first_seq);
    write_record_columns(&mut html, second, second_seq);
    html.push_str("</div></section>");

    html.push_str("<h2>Composition comparison</h2>");
    html.push_str("<figure class='composition-plot'>");
    html.push_str(&chart::comparison_chart(table));
    html.push_str(&format!(
        "<figcaption>Amino-acid counts in {} and {}.</figcaption>",
        first.display_name(),
        second.display_name()
    ));
    html.push_str("</figure>");

    write_comparison_table(&mut html, table);

    html.push_str(include_str!("templates/report_footer.html"));
    write_out(&html, output_path)
}

fn write_record_section(html: &mut String, record: &ProteinRecord, sequence: &NormalizedSequence) {
    html.push_str("<section class='stats-box'>");
    html.push_str(&format!("<h2>{}</h2>", record.protein_name));
    html.push_str("<div class='stats-columns'>");
    write_record_columns(html, record, sequence);
    html.push_str("</div></section>");
}

fn write_record_columns(html: &mut String, record: &ProteinRecord, sequence: &NormalizedSequence) {
    html.push_str("<dl>");
    html.push_str(&format!(
        "<dt>Accession</dt><dd>{}</dd>\
         <dt>Entry name</dt><dd>{}</dd>\
         <dt>Protein</dt><dd>{}</dd>\
         <dt>Organism</dt><dd>{}</dd>\
         <dt>Residues</dt><dd>{}</dd>\
         <dt>Added</dt><dd>{}</dd>",
        record.accession,
        record.entry_name,
        record.protein_name,
        record.organism,
        sequence.length,
        record.added_at.format("%Y-%m-%d")
    ));
    html.push_str("</dl>");
}

fn write_composition_table(html: &mut String, table: &CompositionTable) {
    let total = table.total();

    html.push_str("<table>");
    html.push_str("<thead><tr><th>Amino acid</th><th>Count</th><th>Share</th></tr></thead><tbody>");
    for row in table.rows() {
        let share = if total > 0 {
            row.count as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        html.push_str(&format!(
            "<tr><td>{}</td><td class='numeric'>{}</td><td class='numeric'>{:.1}%</td></tr>",
            row.symbol, row.count, share
        ));
    }
    html.push_str("</tbody></table>");
}

fn write_comparison_table(html: &mut String, table: &ComparisonTable) {
    html.push_str("<table>");
    html.push_str("<thead><tr><th>Amino acid</th><th>Count</th><th>Protein</th></tr></thead><tbody>");
    for row in table.rows() {
        html.push_str(&format!(
            "<tr><td>{}</td><td class='numeric'>{}</td><td>{}</td></tr>",
            row.symbol, row.count, row.source
        ));
    }
    html.push_str("</tbody></table>");
}

fn write_out(html: &str, output_path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(output_path)?);
    writer.write_all(html.as_bytes())?;
    writer.flush()?;
    Ok(())
}
