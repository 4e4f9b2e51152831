use crate::config::PROJECT_DIRS;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use log::{debug, info};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fs;
use std::path::{Path, PathBuf};

/// A protein kept in the local database, mirroring the UniProtKB entry
/// it was fetched from. `fasta` is the raw record text as downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProteinRecord {
    pub id: u64,
    pub accession: String,
    pub entry_name: String,
    pub organism: String,
    pub protein_name: String,
    pub fasta: String,
    #[serde(
        serialize_with = "serialize_datetime",
        deserialize_with = "deserialize_datetime"
    )]
    pub added_at: DateTime<Utc>,
}

impl ProteinRecord {
    /// Label used in listings and chart legends.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.entry_name, self.protein_name)
    }
}

/// Fields supplied when storing a protein; the id and timestamp are
/// assigned by the store.
#[derive(Debug, Clone)]
pub struct NewProtein {
    pub accession: String,
    pub entry_name: String,
    pub organism: String,
    pub protein_name: String,
    pub fasta: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    next_id: u64,
    records: Vec<ProteinRecord>,
}

/// JSON-file backed protein database. Every mutation is written through
/// to disk before it returns.
pub struct ProteinStore {
    path: PathBuf,
    file: StoreFile,
}

impl ProteinStore {
    /// Opens the store in the platform data directory, creating an empty
    /// one on first use.
    pub fn open_default() -> Result<Self> {
        let (qualifier, organization, application) = PROJECT_DIRS;
        let proj_dirs = ProjectDirs::from(qualifier, organization, application)
            .ok_or_else(|| Error::Store("failed to determine project directories".to_string()))?;
        Self::open(proj_dirs.data_dir().join("proteins.json"))
    }

    /// Opens (or initializes) a store at an explicit path.
    pub fn open(path: PathBuf) -> Result<Self> {
        let file = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            StoreFile::default()
        };
        debug!(
            "protein database at {} holds {} records",
            path.display(),
            file.records.len()
        );
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.file.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file.records.is_empty()
    }

    /// Stores a new protein and returns the finished record.
    /// Accessions are unique; a second add with the same accession fails.
    pub fn add(&mut self, new: NewProtein) -> Result<ProteinRecord> {
        if let Some(existing) = self
            .file
            .records
            .iter()
            .find(|r| r.accession.eq_ignore_ascii_case(&new.accession))
        {
            return Err(Error::DuplicateRecord(existing.accession.clone()));
        }

        self.file.next_id += 1;
        let record = ProteinRecord {
            id: self.file.next_id,
            accession: new.accession,
            entry_name: new.entry_name,
            organism: new.organism,
            protein_name: new.protein_name,
            fasta: new.fasta,
            added_at: Utc::now(),
        };
        info!("storing {} ({})", record.accession, record.entry_name);

        self.file.records.push(record.clone());
        self.save()?;
        Ok(record)
    }

    /// All records sorted by entry name for stable listings.
    pub fn list(&self) -> Vec<&ProteinRecord> {
        let mut records: Vec<&ProteinRecord> = self.file.records.iter().collect();
        records.sort_by(|a, b| a.entry_name.cmp(&b.entry_name));
        records
    }

    /// Finds a record by numeric id, accession or entry name.
    pub fn find(&self, key: &str) -> Result<&ProteinRecord> {
        self.position_of(key)
            .map(|idx| &self.file.records[idx])
            .ok_or_else(|| Error::RecordNotFound(key.to_string()))
    }

    /// Removes a record by numeric id, accession or entry name and
    /// returns what was removed.
    pub fn remove(&mut self, key: &str) -> Result<ProteinRecord> {
        let idx = self
            .position_of(key)
            .ok_or_else(|| Error::RecordNotFound(key.to_string()))?;
        let record = self.file.records.remove(idx);
        info!("removed {} ({})", record.accession, record.entry_name);
        self.save()?;
        Ok(record)
    }

    fn position_of(&self, key: &str) -> Option<usize> {
        if let Ok(id) = key.parse::<u64>() {
            return self.file.records.iter().position(|r| r.id == id);
        }
        self.file.records.iter().position(|r| {
            r.accession.eq_ignore_ascii_case(key) || r.entry_name.eq_ignore_ascii_case(key)
        })
    }

    fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(&self.file)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

fn serialize_datetime<S>(date: &DateTime<Utc>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.to_rfc3339())
}

fn deserialize_datetime<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(D::Error::custom)
}
