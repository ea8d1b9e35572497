//! Record normalization
//!
//! Turns raw rows from any number of sources into a chronologically sorted
//! sequence of [`MatchRecord`]s ready for replay. Incomplete rows are dropped,
//! partitions are case-folded and sources are concatenated without
//! deduplication unless the explicit dedup stage is switched on.

use crate::config::SourceSettings;
use crate::error::{RatingError, Result};
use crate::ingest::source::{RawMatchRow, RecordSource};
use crate::types::{MatchRecord, COMBINED_PARTITION};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

/// How records are assigned to rating partitions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionMode {
    /// One partition per playing surface
    #[default]
    Surface,
    /// Every record rated under a single `overall` partition
    Combined,
}

/// Counts of what happened to the rows handed to the normalizer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationReport {
    pub rows_read: usize,
    pub records_emitted: usize,
    pub missing_fields: usize,
    pub invalid_dates: usize,
    pub self_play: usize,
    pub duplicates_removed: usize,
}

impl NormalizationReport {
    /// Rows that never became records
    pub fn rows_dropped(&self) -> usize {
        self.missing_fields + self.invalid_dates + self.self_play + self.duplicates_removed
    }
}

/// Sorted replay input plus what was dropped on the way
#[derive(Debug, Clone, Default)]
pub struct NormalizedRecords {
    pub records: Vec<MatchRecord>,
    pub report: NormalizationReport,
}

#[derive(Debug, thiserror::Error)]
enum Rejection {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("unparseable date: {0}")]
    InvalidDate(String),
    #[error("{0}")]
    Malformed(String),
}

/// Converts raw rows into replay input
#[derive(Debug, Clone, Default)]
pub struct RecordNormalizer {
    mode: PartitionMode,
    deduplicate: bool,
}

impl RecordNormalizer {
    pub fn new(mode: PartitionMode, deduplicate: bool) -> Self {
        Self { mode, deduplicate }
    }

    pub fn from_settings(settings: &SourceSettings) -> Self {
        Self::new(settings.partition_mode, settings.deduplicate)
    }

    pub fn mode(&self) -> PartitionMode {
        self.mode
    }

    /// Validate a single row
    pub fn normalize_row(&self, row: &RawMatchRow) -> Result<MatchRecord> {
        self.try_row(row).map_err(|rejection| {
            RatingError::MalformedRecord {
                reason: rejection.to_string(),
            }
            .into()
        })
    }

    fn try_row(&self, row: &RawMatchRow) -> std::result::Result<MatchRecord, Rejection> {
        let date = required(&row.date, "date")?;
        let winner = required(&row.winner, "winner")?;
        let loser = required(&row.loser, "loser")?;
        let partition = match self.mode {
            PartitionMode::Surface => required(&row.partition, "partition")?,
            PartitionMode::Combined => COMBINED_PARTITION,
        };

        let occurred_on =
            parse_match_date(date).ok_or_else(|| Rejection::InvalidDate(date.to_string()))?;

        MatchRecord::new(occurred_on, partition, winner, loser)
            .map_err(|e| Rejection::Malformed(e.to_string()))
    }

    /// Normalize every source in order, concatenate and sort by date
    pub fn normalize(&self, sources: &[&dyn RecordSource]) -> Result<NormalizedRecords> {
        let mut report = NormalizationReport::default();
        let mut records = Vec::new();

        for source in sources {
            let rows = source.rows()?;
            let before = records.len();
            self.collect_rows(&rows, &mut records, &mut report);
            debug!(
                "Source {} contributed {} of {} rows",
                source.name(),
                records.len() - before,
                rows.len()
            );
        }

        if self.deduplicate {
            report.duplicates_removed = remove_exact_duplicates(&mut records);
        }

        sort_chronologically(&mut records);
        report.records_emitted = records.len();

        info!(
            "Normalized {} records from {} rows ({} dropped)",
            report.records_emitted,
            report.rows_read,
            report.rows_dropped()
        );

        Ok(NormalizedRecords { records, report })
    }

    /// Historical sources first, then live ones; shared records are kept twice
    pub fn merge(
        &self,
        historical: &[&dyn RecordSource],
        live: &[&dyn RecordSource],
    ) -> Result<NormalizedRecords> {
        let sources: Vec<&dyn RecordSource> =
            historical.iter().chain(live.iter()).copied().collect();
        self.normalize(&sources)
    }

    fn collect_rows(
        &self,
        rows: &[RawMatchRow],
        records: &mut Vec<MatchRecord>,
        report: &mut NormalizationReport,
    ) {
        for row in rows {
            report.rows_read += 1;
            match self.try_row(row) {
                Ok(record) => records.push(record),
                Err(rejection) => {
                    debug!("Dropping row {:?}: {}", row, rejection);
                    match rejection {
                        Rejection::MissingField(_) => report.missing_fields += 1,
                        Rejection::InvalidDate(_) => report.invalid_dates += 1,
                        Rejection::Malformed(_) => report.self_play += 1,
                    }
                }
            }
        }
    }
}

fn required<'a>(
    value: &'a Option<String>,
    name: &'static str,
) -> std::result::Result<&'a str, Rejection> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(Rejection::MissingField(name))
}

/// Parse `YYYYMMDD`, ignoring any separators between the digits
pub fn parse_match_date(raw: &str) -> Option<NaiveDate> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 8 {
        NaiveDate::parse_from_str(&digits, "%Y%m%d").ok()
    } else {
        None
    }
}

/// Stable sort by date; same-day records keep their input order
pub fn sort_chronologically(records: &mut [MatchRecord]) {
    records.sort_by_key(MatchRecord::occurred_on);
}

/// Keep the first occurrence of each identical record, returns how many were removed
pub fn remove_exact_duplicates(records: &mut Vec<MatchRecord>) -> usize {
    let before = records.len();
    let mut seen = HashSet::with_capacity(records.len());
    records.retain(|record| seen.insert(record.clone()));
    before - records.len()
}
