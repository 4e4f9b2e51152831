use crate::error::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

/// UniProtKB FASTA headers end with a sequence-version tag (`SV=3`)
/// followed by a newline. Everything after that newline is residue data.
fn header_terminator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"SV=.\n").unwrap())
}

/// A protein sequence with the FASTA header and all whitespace removed.
///
/// `length` is the residue count of `sequence`; the two never disagree
/// because values are only built here or by [`NormalizedSequence::from_residues`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSequence {
    pub sequence: String,
    pub length: usize,
}

impl NormalizedSequence {
    /// Wraps an already-clean residue string (no header, no whitespace).
    pub fn from_residues(residues: impl Into<String>) -> Self {
        let sequence = residues.into();
        Self {
            length: sequence.chars().count(),
            sequence,
        }
    }
}

/// Strips the UniProtKB header and line breaks from a raw FASTA record.
///
/// The header is everything up to and including the `SV=<version>` tag and
/// its trailing newline. Residue order and case are preserved. If the text
/// holds more than one record, only the first is kept. Input without the
/// `SV=` terminator, or with no residues after it, is rejected.
pub fn normalize(raw_fasta: &str) -> Result<NormalizedSequence> {
    let header_end = header_terminator()
        .find(raw_fasta)
        .ok_or_else(|| Error::MalformedFasta("no 'SV=' header terminator found".to_string()))?
        .end();

    let body = &raw_fasta[header_end..];
    // A second '>' starts another record; residue lines never contain one.
    let body = match body.find('>') {
        Some(next_record) => &body[..next_record],
        None => body,
    };

    let sequence: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if sequence.is_empty() {
        return Err(Error::MalformedFasta(
            "record has a header but no sequence data".to_string(),
        ));
    }

    Ok(NormalizedSequence {
        length: sequence.chars().count(),
        sequence,
    })
}

/// One counted symbol in a composition table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionRow {
    pub symbol: char,
    pub count: u64,
}

/// Per-symbol counts for a single sequence, ordered by first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositionTable {
    rows: Vec<CompositionRow>,
}

impl CompositionTable {
    pub fn rows(&self) -> &[CompositionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all counts, equal to the length of the counted sequence.
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|r| r.count).sum()
    }

    pub fn get(&self, symbol: char) -> Option<u64> {
        self.rows.iter().find(|r| r.symbol == symbol).map(|r| r.count)
    }
}

/// Counts every symbol of a normalized sequence.
///
/// Rows appear in the order each symbol is first seen, so two runs over
/// the same sequence produce identical tables. Symbols are counted as-is;
/// nothing is checked against an amino-acid alphabet here.
pub fn count(sequence: &NormalizedSequence) -> CompositionTable {
    let mut rows: Vec<CompositionRow> = Vec::new();
    for symbol in sequence.sequence.chars() {
        match rows.iter_mut().find(|r| r.symbol == symbol) {
            Some(row) => row.count += 1,
            None => rows.push(CompositionRow { symbol, count: 1 }),
        }
    }
    CompositionTable { rows }
}

/// A composition row tagged with the protein it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    pub symbol: char,
    pub count: u64,
    pub source: String,
}

/// Two labeled composition tables laid side by side for charting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonTable {
    rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Source labels in the order their rows appear.
    pub fn sources(&self) -> Vec<&str> {
        let mut sources: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !sources.contains(&row.source.as_str()) {
                sources.push(&row.source);
            }
        }
        sources
    }

    /// Symbols in the order they first appear across all rows.
    pub fn symbols(&self) -> Vec<char> {
        let mut symbols: Vec<char> = Vec::new();
        for row in &self.rows {
            if !symbols.contains(&row.symbol) {
                symbols.push(row.symbol);
            }
        }
        symbols
    }

    pub fn get(&self, symbol: char, source: &str) -> Option<u64> {
        self.rows
            .iter()
            .find(|r| r.symbol == symbol && r.source == source)
            .map(|r| r.count)
    }
}

/// Joins two composition tables into one comparison table.
///
/// Every row of `a` comes first, tagged `label_a`, then every row of `b`
/// tagged `label_b`. A symbol counted in both inputs keeps both rows; the
/// chart layer is what groups them.
pub fn merge(
    a: CompositionTable,
    label_a: &str,
    b: CompositionTable,
    label_b: &str,
) -> ComparisonTable {
    let mut rows = Vec::with_capacity(a.rows.len() + b.rows.len());
    for row in a.rows {
        rows.push(ComparisonRow {
            symbol: row.symbol,
            count: row.count,
            source: label_a.to_string(),
        });
    }
    for row in b.rows {
        rows.push(ComparisonRow {
            symbol: row.symbol,
            count: row.count,
            source: label_b.to_string(),
        });
    }
    ComparisonTable { rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INSULIN_RECORD: &str = ">sp|P01308|INS_HUMAN Insulin OS=Homo sapiens OX=9606 GN=INS PE=1 SV=1\n\
        MALWMRLLPLLALLALWGPDPAAAFVNQHLCGSHLVEALYLVCGERGFFYTPKTRREAED\n\
        LQVGQVELGGGPGAGSLQPLALEGSLQKRGIVEQCCTSICSLYQLENYCN\n";

    #[test]
    fn normalize_strips_header_and_whitespace() {
        let normalized = normalize(">hdr SV=1\nMKT\nVLA\n").unwrap();
        assert_eq!(normalized.sequence, "MKTVLA");
        assert_eq!(normalized.length, 6);
    }

    #[test]
    fn normalize_handles_a_real_uniprot_record() {
        let normalized = normalize(INSULIN_RECORD).unwrap();
        assert_eq!(normalized.length, 110);
        assert!(normalized.sequence.starts_with("MALWMRLL"));
        assert!(normalized.sequence.ends_with("ENYCN"));
        assert!(!normalized.sequence.contains('\n'));
    }

    #[test]
    fn normalize_preserves_residue_order_and_case() {
        let normalized = normalize(">x SV=2\nmK tV\n").unwrap();
        assert_eq!(normalized.sequence, "mKtV");
    }

    #[test]
    fn normalize_rejects_input_without_header_terminator() {
        let err = normalize("MKTAYIAKQRQISFVKSHFSRQLEERLGLIEVQ").unwrap_err();
        assert!(matches!(err, Error::MalformedFasta(_)));

        let err = normalize(">sp|Q0|NONE_HUMAN Some protein OS=Homo sapiens\nMKTV\n").unwrap_err();
        assert!(matches!(err, Error::MalformedFasta(_)));
    }

    #[test]
    fn normalize_rejects_header_without_residues() {
        let err = normalize(">sp|P01308|INS_HUMAN Insulin OS=Homo sapiens SV=1\n").unwrap_err();
        assert!(matches!(err, Error::MalformedFasta(_)));

        let err = normalize(">x SV=1\n   \n\n").unwrap_err();
        assert!(matches!(err, Error::MalformedFasta(_)));
    }

    #[test]
    fn normalize_keeps_only_the_first_record() {
        let two_records = ">sp|A|A_X First OS=X SV=1\nMKTV\n>sp|B|B_X Second OS=X SV=2\nAAAA\n";
        let normalized = normalize(two_records).unwrap();
        assert_eq!(normalized.sequence, "MKTV");
    }

    #[test]
    fn count_orders_rows_by_first_appearance() {
        let table = count(&NormalizedSequence::from_residues("AAB"));
        assert_eq!(
            table.rows(),
            &[
                CompositionRow { symbol: 'A', count: 2 },
                CompositionRow { symbol: 'B', count: 1 },
            ]
        );

        let table = count(&NormalizedSequence::from_residues("BAAB"));
        assert_eq!(
            table.rows(),
            &[
                CompositionRow { symbol: 'B', count: 2 },
                CompositionRow { symbol: 'A', count: 2 },
            ]
        );
    }

    #[test]
    fn count_gives_one_row_per_distinct_symbol() {
        let table = count(&NormalizedSequence::from_residues("MKTVLA"));
        assert_eq!(table.len(), 6);
        for symbol in ['M', 'K', 'T', 'V', 'L', 'A'] {
            assert_eq!(table.get(symbol), Some(1));
        }
    }

    #[test]
    fn count_takes_nonstandard_symbols_as_they_are() {
        let table = count(&NormalizedSequence::from_residues("MU*X-X"));
        assert_eq!(table.get('U'), Some(1));
        assert_eq!(table.get('*'), Some(1));
        assert_eq!(table.get('-'), Some(1));
        assert_eq!(table.get('X'), Some(2));
    }

    #[test]
    fn count_totals_match_sequence_length() {
        let normalized = normalize(INSULIN_RECORD).unwrap();
        let table = count(&normalized);
        assert_eq!(table.total() as usize, normalized.length);
    }

    #[test]
    fn count_is_deterministic() {
        let sequence = NormalizedSequence::from_residues("GIVEQCCTSICSLYQLENYCN");
        assert_eq!(count(&sequence), count(&sequence));
    }

    #[test]
    fn count_of_empty_residues_is_empty() {
        let table = count(&NormalizedSequence::from_residues(""));
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn merge_concatenates_a_rows_before_b_rows() {
        let a = count(&NormalizedSequence::from_residues("AAB"));
        let b = count(&NormalizedSequence::from_residues("BCC"));
        let merged = merge(a, "P1", b, "P2");

        let expected: Vec<(char, u64, &str)> =
            vec![('A', 2, "P1"), ('B', 1, "P1"), ('B', 1, "P2"), ('C', 2, "P2")];
        let actual: Vec<(char, u64, &str)> = merged
            .rows()
            .iter()
            .map(|r| (r.symbol, r.count, r.source.as_str()))
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn merge_keeps_shared_symbols_from_both_sources() {
        let a = count(&NormalizedSequence::from_residues("MK"));
        let b = count(&NormalizedSequence::from_residues("KM"));
        let merged = merge(a, "first", b, "second");

        assert_eq!(merged.len(), 4);
        assert_eq!(merged.get('M', "first"), Some(1));
        assert_eq!(merged.get('M', "second"), Some(1));
        assert_eq!(merged.sources(), vec!["first", "second"]);
        assert_eq!(merged.symbols(), vec!['M', 'K']);
    }

    #[test]
    fn merge_with_an_empty_side_keeps_the_other() {
        let a = CompositionTable::default();
        let b = count(&NormalizedSequence::from_residues("WW"));
        let merged = merge(a, "empty", b, "full");

        assert_eq!(merged.len(), 1);
        assert_eq!(merged.get('W', "full"), Some(2));
        assert_eq!(merged.sources(), vec!["full"]);
    }
}
