//! Record ingestion: tabular sources and the normalizer that turns them into
//! replay input.

pub mod normalizer;
pub mod source;

// Re-export commonly used types
pub use normalizer::{
    NormalizationReport, NormalizedRecords, PartitionMode, RecordNormalizer,
};
pub use source::{ColumnMapping, CsvRecordSource, RawMatchRow, RecordSource, StaticRecordSource};
