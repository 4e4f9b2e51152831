use crate::error::{Error, Result};
use bio::io::fasta;
use niffler::get_reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Residues per line when a record is written back out as FASTA.
const FASTA_LINE_WIDTH: usize = 60;

/// Metadata parsed from a UniProtKB FASTA header,
/// e.g. `>sp|P01308|INS_HUMAN Insulin OS=Homo sapiens OX=9606 GN=INS PE=1 SV=1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFields {
    pub accession: String,
    pub entry_name: String,
    pub protein_name: String,
    pub organism: String,
}

/// One record read from a FASTA export: parsed header fields plus the
/// record rendered back to canonical FASTA text for storage.
#[derive(Debug, Clone)]
pub struct ExportRecord {
    pub fields: HeaderFields,
    pub fasta: String,
}

/// Parses a UniProtKB-style header.
///
/// `id` is the part before the first whitespace (`sp|P01308|INS_HUMAN`),
/// `desc` the free text after it. The database tag (`sp` or `tr`) is
/// accepted but not recorded. Headers whose id is not `db|accession|entry`
/// are rejected.
pub fn parse_header(id: &str, desc: Option<&str>) -> Result<HeaderFields> {
    let mut parts = id.split('|');
    let (accession, entry_name) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_db), Some(accession), Some(entry_name), None)
            if !accession.is_empty() && !entry_name.is_empty() =>
        {
            (accession, entry_name)
        }
        _ => {
            return Err(Error::MalformedFasta(format!(
                "'{}' is not a UniProtKB db|accession|entry header",
                id
            )))
        }
    };

    let desc = desc.unwrap_or("");
    // The name is the free text before the first ` XX=` tag.
    let name_end = next_tag_start(desc).unwrap_or(desc.len());
    let protein_name = desc[..name_end].trim();
    let protein_name = if protein_name.is_empty() {
        entry_name
    } else {
        protein_name
    };
    let organism = field_value(desc, "OS").unwrap_or("unknown organism");

    Ok(HeaderFields {
        accession: accession.to_string(),
        entry_name: entry_name.to_string(),
        protein_name: protein_name.to_string(),
        organism: organism.to_string(),
    })
}

/// Value of a ` TAG=` field in a header description. The value runs up
/// to the next tag (` OX=`, ` GN=`, ` PE=`, ` SV=`) or the end of the line.
fn field_value<'a>(desc: &'a str, tag: &str) -> Option<&'a str> {
    let marker = format!(" {}=", tag);
    let start = desc.find(&marker)? + marker.len();
    let rest = &desc[start..];
    let end = next_tag_start(rest).unwrap_or(rest.len());
    let value = rest[..end].trim_end();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn next_tag_start(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    (0..bytes.len()).find(|&i| {
        bytes[i] == b' '
            && i + 3 < bytes.len()
            && bytes[i + 1].is_ascii_uppercase()
            && bytes[i + 2].is_ascii_uppercase()
            && bytes[i + 3] == b'='
    })
}

/// Renders a record back to FASTA text with 60-column residue lines.
pub fn render_fasta(id: &str, desc: Option<&str>, seq: &[u8]) -> String {
    let mut out = String::with_capacity(seq.len() + seq.len() / FASTA_LINE_WIDTH + 80);
    match desc {
        Some(desc) => out.push_str(&format!(">{} {}\n", id, desc)),
        None => out.push_str(&format!(">{}\n", id)),
    }
    for chunk in seq.chunks(FASTA_LINE_WIDTH) {
        out.push_str(&String::from_utf8_lossy(chunk));
        out.push('\n');
    }
    out
}

/// Reads every record of a FASTA export file. Plain and gzip/bzip2/xz
/// compressed files are handled transparently.
pub fn read_records(path: &Path) -> Result<Vec<ExportRecord>> {
    let file = File::open(path)?;
    let (inner_reader, _compression) = get_reader(Box::new(file))?;
    let reader = fasta::Reader::new(BufReader::new(inner_reader));

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        let fields = parse_header(record.id(), record.desc())?;
        let fasta = render_fasta(record.id(), record.desc(), record.seq());
        records.push(ExportRecord { fields, fasta });
    }

    if records.is_empty() {
        return Err(Error::MalformedFasta(format!(
            "no FASTA records found in {}",
            path.display()
        )));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_swissprot_header() {
        let fields = parse_header(
            "sp|P01308|INS_HUMAN",
            Some("Insulin OS=Homo sapiens OX=9606 GN=INS PE=1 SV=1"),
        )
        .unwrap();

        assert_eq!(
            fields,
            HeaderFields {
                accession: "P01308".to_string(),
                entry_name: "INS_HUMAN".to_string(),
                protein_name: "Insulin".to_string(),
                organism: "Homo sapiens".to_string(),
            }
        );
    }

    #[test]
    fn parses_a_trembl_header_with_multiword_fields() {
        let fields = parse_header(
            "tr|A0A024R6I7|A0A024R6I7_HUMAN",
            Some("Serum albumin OS=Homo sapiens OX=9606 GN=ALB PE=1 SV=1"),
        )
        .unwrap();

        assert_eq!(fields.accession, "A0A024R6I7");
        assert_eq!(fields.protein_name, "Serum albumin");
        assert_eq!(fields.organism, "Homo sapiens");
    }

    #[test]
    fn header_without_organism_falls_back() {
        let fields = parse_header("sp|P0C1|TEST_YEAST", Some("Test protein SV=2")).unwrap();
        assert_eq!(fields.organism, "unknown organism");
        // the SV tag is part of the tag grammar, not the name
        assert_eq!(fields.protein_name, "Test protein");
    }

    #[test]
    fn header_without_description_uses_the_entry_name() {
        let fields = parse_header("sp|P0C1|TEST_YEAST", None).unwrap();
        assert_eq!(fields.protein_name, "TEST_YEAST");
    }

    #[test]
    fn rejects_non_uniprot_header_ids() {
        assert!(parse_header("NM_000207.3", Some("insulin mRNA")).is_err());
        assert!(parse_header("sp|P01308", None).is_err());
        assert!(parse_header("sp||INS_HUMAN", None).is_err());
    }

    #[test]
    fn protein_name_stops_at_the_first_tag() {
        let fields = parse_header(
            "sp|P05067|A4_HUMAN",
            Some("Amyloid-beta precursor protein OS=Homo sapiens OX=9606 GN=APP PE=1 SV=3"),
        )
        .unwrap();
        assert_eq!(fields.protein_name, "Amyloid-beta precursor protein");
    }

    #[test]
    fn renders_fasta_with_wrapped_residue_lines() {
        let seq: Vec<u8> = b"M".iter().cycle().take(130).copied().collect();
        let text = render_fasta("sp|X|X_X", Some("Test OS=Y SV=1"), &seq);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], ">sp|X|X_X Test OS=Y SV=1");
        assert_eq!(lines[1].len(), 60);
        assert_eq!(lines[2].len(), 60);
        assert_eq!(lines[3].len(), 10);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn field_value_reads_tags_in_any_order() {
        let desc = "Insulin OS=Homo sapiens OX=9606 GN=INS PE=1 SV=1";
        assert_eq!(field_value(desc, "OS"), Some("Homo sapiens"));
        assert_eq!(field_value(desc, "GN"), Some("INS"));
        assert_eq!(field_value(desc, "SV"), Some("1"));
        assert_eq!(field_value(desc, "ZZ"), None);
    }
}
