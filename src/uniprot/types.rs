use serde::Deserialize;

/// Envelope of the UniProtKB search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchEntry>,
}

/// One entry as returned by the search endpoint. Only the fields this
/// tool asks for (`accession,id,organism_name,protein_name`) are mapped.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntry {
    pub primary_accession: String,
    #[serde(default)]
    pub uni_protkb_id: Option<String>,
    #[serde(default)]
    pub organism: Option<OrganismName>,
    #[serde(default)]
    pub protein_description: Option<ProteinDescription>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganismName {
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub common_name: Option<String>,
}

/// Reviewed entries carry a `recommendedName`; unreviewed TrEMBL entries
/// often only have `submissionNames`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProteinDescription {
    #[serde(default)]
    pub recommended_name: Option<NameBlock>,
    #[serde(default)]
    pub submission_names: Vec<NameBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameBlock {
    pub full_name: TextValue,
}

#[derive(Debug, Deserialize)]
pub struct TextValue {
    pub value: String,
}

/// A search result flattened to the fields the rest of the tool works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub accession: String,
    pub entry_name: String,
    pub organism: String,
    pub protein_name: String,
}

impl From<SearchEntry> for SearchHit {
    fn from(entry: SearchEntry) -> Self {
        let protein_name = entry
            .protein_description
            .as_ref()
            .and_then(|desc| {
                desc.recommended_name
                    .as_ref()
                    .or_else(|| desc.submission_names.first())
                    .map(|name| name.full_name.value.clone())
            })
            .unwrap_or_else(|| "uncharacterized protein".to_string());

        let organism = entry
            .organism
            .and_then(|o| o.scientific_name.or(o.common_name))
            .unwrap_or_else(|| "unknown organism".to_string());

        let entry_name = entry
            .uni_protkb_id
            .unwrap_or_else(|| entry.primary_accession.clone());

        Self {
            accession: entry.primary_accession,
            entry_name,
            organism,
            protein_name,
        }
    }
}
