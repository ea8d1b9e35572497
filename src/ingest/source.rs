//! Tabular record sources
//!
//! A source yields raw rows with the four fields the normalizer needs. Fetching
//! the bytes (network, retries, caching) happens before this layer; sources
//! here only parse local files or bytes handed over by the caller.

use crate::error::{RatingError, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A row as read from a source, before any validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMatchRow {
    pub date: Option<String>,
    pub partition: Option<String>,
    pub winner: Option<String>,
    pub loser: Option<String>,
}

impl RawMatchRow {
    /// Convenience constructor for fully populated rows
    pub fn new(date: &str, partition: &str, winner: &str, loser: &str) -> Self {
        Self {
            date: Some(date.to_string()),
            partition: Some(partition.to_string()),
            winner: Some(winner.to_string()),
            loser: Some(loser.to_string()),
        }
    }
}

/// Header names of the four columns a row is built from
///
/// The partition column may be absent from a file; rows then carry no
/// partition and only combined-mode normalization can use them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub date: String,
    pub partition: String,
    pub winner: String,
    pub loser: String,
}

impl Default for ColumnMapping {
    /// Layout of the ATP/WTA `*_matches_<year>.csv` files
    fn default() -> Self {
        Self {
            date: "tourney_date".to_string(),
            partition: "surface".to_string(),
            winner: "winner_name".to_string(),
            loser: "loser_name".to_string(),
        }
    }
}

/// Trait for anything that can hand raw match rows to the normalizer
pub trait RecordSource {
    /// Human readable name used in logs and errors
    fn name(&self) -> &str;

    /// Read every row of the source, in source order
    fn rows(&self) -> Result<Vec<RawMatchRow>>;
}

#[derive(Debug, Clone)]
enum CsvInput {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// CSV source with a header row, read from a local file or in-memory bytes
#[derive(Debug, Clone)]
pub struct CsvRecordSource {
    name: String,
    input: CsvInput,
    columns: ColumnMapping,
}

impl CsvRecordSource {
    /// Read from a file on disk
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            name: path.display().to_string(),
            input: CsvInput::Path(path),
            columns: ColumnMapping::default(),
        }
    }

    /// Read from bytes that were already fetched by the caller
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            input: CsvInput::Bytes(bytes.into()),
            columns: ColumnMapping::default(),
        }
    }

    /// Use a different column layout
    pub fn with_columns(mut self, columns: ColumnMapping) -> Self {
        self.columns = columns;
        self
    }

    fn read_failed(&self, message: impl ToString) -> anyhow::Error {
        RatingError::SourceReadFailed {
            source_name: self.name.clone(),
            message: message.to_string(),
        }
        .into()
    }

    fn read_from<R: Read>(&self, input: R) -> Result<Vec<RawMatchRow>> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(input);

        let headers = reader
            .headers()
            .map_err(|e| self.read_failed(e))?
            .clone();

        let position = |column: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| {
                    RatingError::MissingColumn {
                        source_name: self.name.clone(),
                        column: column.to_string(),
                    }
                    .into()
                })
        };

        let date = position(&self.columns.date)?;
        let partition = position(&self.columns.partition).ok();
        let winner = position(&self.columns.winner)?;
        let loser = position(&self.columns.loser)?;

        if partition.is_none() {
            warn!(
                "Source {} has no {} column, its rows carry no partition",
                self.name, self.columns.partition
            );
        }

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| self.read_failed(e))?;
            rows.push(RawMatchRow {
                date: field(&record, date),
                partition: partition.and_then(|index| field(&record, index)),
                winner: field(&record, winner),
                loser: field(&record, loser),
            });
        }

        debug!("Read {} rows from {}", rows.len(), self.name);
        Ok(rows)
    }
}

fn field(record: &csv::StringRecord, index: usize) -> Option<String> {
    record
        .get(index)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

impl RecordSource for CsvRecordSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn rows(&self) -> Result<Vec<RawMatchRow>> {
        match &self.input {
            CsvInput::Path(path) => {
                let file = std::fs::File::open(path).map_err(|e| self.read_failed(e))?;
                self.read_from(file)
            }
            CsvInput::Bytes(bytes) => self.read_from(bytes.as_slice()),
        }
    }
}

/// In-memory source
#[derive(Debug, Clone, Default)]
pub struct StaticRecordSource {
    name: String,
    rows: Vec<RawMatchRow>,
}

impl StaticRecordSource {
    pub fn new(name: impl Into<String>, rows: Vec<RawMatchRow>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

impl RecordSource for StaticRecordSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn rows(&self) -> Result<Vec<RawMatchRow>> {
        Ok(self.rows.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ATP_SAMPLE: &str = "\
tourney_id,tourney_name,surface,tourney_date,winner_name,loser_name,score
2023-0520,Roland Garros,Clay,20230528,Novak Djokovic,Casper Ruud,7-6(1) 6-3 7-5
2023-0540,Wimbledon,Grass,20230703,Carlos Alcaraz,Novak Djokovic,1-6 7-6(6) 6-1 3-6 6-4
2023-9999,Exhibition,,20230801,Jannik Sinner,,6-4 6-4
";

    #[test]
    fn test_csv_default_columns() {
        let source = CsvRecordSource::from_bytes("atp_2023", ATP_SAMPLE);
        let rows = source.rows().unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            RawMatchRow::new("20230528", "Clay", "Novak Djokovic", "Casper Ruud")
        );
        assert_eq!(rows[2].partition, None);
        assert_eq!(rows[2].loser, None);
        assert_eq!(rows[2].winner.as_deref(), Some("Jannik Sinner"));
    }

    #[test]
    fn test_csv_custom_columns() {
        let data = "day,court,won,lost\n2024-01-20,HARD,Aryna Sabalenka,Coco Gauff\n";
        let source = CsvRecordSource::from_bytes("custom", data).with_columns(ColumnMapping {
            date: "day".to_string(),
            partition: "court".to_string(),
            winner: "won".to_string(),
            loser: "lost".to_string(),
        });

        let rows = source.rows().unwrap();
        assert_eq!(
            rows,
            vec![RawMatchRow::new("2024-01-20", "HARD", "Aryna Sabalenka", "Coco Gauff")]
        );
    }

    #[test]
    fn test_csv_missing_column() {
        let data = "tourney_date,surface,winner_name\n20230101,Hard,A\n";
        let err = CsvRecordSource::from_bytes("no_loser", data)
            .rows()
            .unwrap_err();

        match err.downcast_ref::<RatingError>() {
            Some(RatingError::MissingColumn { source_name, column }) => {
                assert_eq!(source_name, "no_loser");
                assert_eq!(column, "loser_name");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_csv_without_surface_column() {
        let data = "tourney_date,winner_name,loser_name\n20230101,A,B\n";
        let rows = CsvRecordSource::from_bytes("no_surface", data)
            .rows()
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].partition, None);
        assert_eq!(rows[0].winner.as_deref(), Some("A"));
        assert_eq!(rows[0].loser.as_deref(), Some("B"));
    }

    #[test]
    fn test_csv_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", ATP_SAMPLE).unwrap();

        let source = CsvRecordSource::from_path(file.path());
        assert_eq!(source.rows().unwrap().len(), 3);
    }

    #[test]
    fn test_csv_missing_file() {
        let source = CsvRecordSource::from_path("/definitely/not/here.csv");
        let err = source.rows().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RatingError>(),
            Some(RatingError::SourceReadFailed { .. })
        ));
    }

    #[test]
    fn test_static_source() {
        let source = StaticRecordSource::new(
            "fixture",
            vec![RawMatchRow::new("20230101", "hard", "A", "B")],
        );
        assert_eq!(source.name(), "fixture");
        assert_eq!(source.rows().unwrap().len(), 1);
    }
}
