//! Review records, partitioning and JSON Lines storage.
//!
//! A record is an ordered JSON object. The pipeline reads `review_text`,
//! writes `lemmatized_text` and splits on `pro_or_con`; every other field
//! passes through untouched and in its original position.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use lemmata_types::Label;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use crate::config::UnknownLabelPolicy;
use crate::error::PipelineError;

pub const REVIEW_TEXT: &str = "review_text";
pub const LEMMATIZED_TEXT: &str = "lemmatized_text";
pub const PRO_OR_CON: &str = "pro_or_con";

/// One review row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewRecord(Map<String, Value>);

impl ReviewRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Sets `field`, keeping its position if it already exists.
    pub fn insert(&mut self, field: &str, value: impl Into<Value>) {
        self.0.insert(field.to_owned(), value.into());
    }

    pub fn review_text(&self) -> Option<&str> {
        self.0.get(REVIEW_TEXT).and_then(Value::as_str)
    }

    pub fn lemmatized_text(&self) -> Option<&str> {
        self.0.get(LEMMATIZED_TEXT).and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ReviewRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Records split by label. Order within each side follows the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    pub pro: Vec<ReviewRecord>,
    pub con: Vec<ReviewRecord>,
    /// Records whose label was neither `pro` nor `con`.
    pub dropped: usize,
}

/// An ordered collection of review records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<ReviewRecord>,
}

impl RecordSet {
    pub fn new(records: Vec<ReviewRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ReviewRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ReviewRecord> {
        self.records
    }

    /// Borrows every record's `review_text`, in order.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Schema` for the first record whose
    /// `review_text` is missing or not a string.
    pub fn texts(&self) -> Result<Vec<&str>, PipelineError> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                record.review_text().ok_or(PipelineError::Schema {
                    index,
                    field: REVIEW_TEXT,
                })
            })
            .collect()
    }

    /// Sets `lemmatized_text` on every record from a parallel column.
    pub fn attach_lemmatized(&mut self, lemmatized: Vec<String>) {
        debug_assert_eq!(lemmatized.len(), self.records.len());
        for (record, text) in self.records.iter_mut().zip(lemmatized) {
            record.insert(LEMMATIZED_TEXT, text);
        }
    }

    /// Splits the set by `pro_or_con`.
    ///
    /// # Errors
    ///
    /// - `PipelineError::Schema` if a record has no `pro_or_con`
    /// - `PipelineError::UnknownLabel` for an unrecognized value under
    ///   [`UnknownLabelPolicy::Reject`]
    pub fn partition(self, policy: UnknownLabelPolicy) -> Result<Partition, PipelineError> {
        let mut out = Partition::default();

        for (index, record) in self.records.into_iter().enumerate() {
            let raw = record.get(PRO_OR_CON).ok_or(PipelineError::Schema {
                index,
                field: PRO_OR_CON,
            })?;

            match raw.as_str().and_then(Label::parse) {
                Some(Label::Pro) => out.pro.push(record),
                Some(Label::Con) => out.con.push(record),
                None => match policy {
                    UnknownLabelPolicy::Drop => {
                        warn!(index, value = %raw, "dropping record with unknown label");
                        out.dropped += 1;
                    }
                    UnknownLabelPolicy::Reject => {
                        return Err(PipelineError::UnknownLabel {
                            index,
                            value: raw.to_string(),
                        });
                    }
                },
            }
        }

        Ok(out)
    }
}

impl From<Vec<ReviewRecord>> for RecordSet {
    fn from(records: Vec<ReviewRecord>) -> Self {
        Self::new(records)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("record set '{key}' line {line} is not a JSON object: {source}")]
    Corrupt {
        key: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed encoding record {index} of '{key}': {source}")]
    Encode {
        key: String,
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Bulk load and save of record sets as `<root>/<key>.jsonl`.
#[derive(Debug, Clone)]
pub struct RecordStore {
    root: PathBuf,
}

impl RecordStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    pub fn path_of(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.jsonl"))
    }

    /// Reads a whole record set. Blank lines are skipped; line numbers in
    /// errors are 1-based.
    pub fn load(&self, key: &str) -> Result<RecordSet, StoreError> {
        let path = self.path_of(key);
        let read_err = |source| StoreError::Read {
            path: path.clone(),
            source,
        };

        let reader = BufReader::new(File::open(&path).map_err(read_err)?);
        let mut records = Vec::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line.map_err(read_err)?;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Map<String, Value> =
                serde_json::from_str(&line).map_err(|source| StoreError::Corrupt {
                    key: key.to_owned(),
                    line: i + 1,
                    source,
                })?;
            records.push(ReviewRecord(fields));
        }

        Ok(RecordSet::new(records))
    }

    /// Writes a record set, replacing any previous one under `key`.
    ///
    /// Records go to a temporary file that is renamed into place once
    /// complete, so readers never see a partial set.
    pub fn save(&self, key: &str, records: &[ReviewRecord]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|source| StoreError::Write {
            path: self.root.clone(),
            source,
        })?;

        let path = self.path_of(key);
        let tmp_path = path.with_extension("jsonl.tmp");
        let write_err = |source| StoreError::Write {
            path: tmp_path.clone(),
            source,
        };

        let mut writer = BufWriter::new(File::create(&tmp_path).map_err(write_err)?);
        for (index, record) in records.iter().enumerate() {
            serde_json::to_writer(&mut writer, record).map_err(|source| StoreError::Encode {
                key: key.to_owned(),
                index,
                source,
            })?;
            writer.write_all(b"\n").map_err(write_err)?;
        }
        writer.flush().map_err(write_err)?;
        drop(writer);

        fs::rename(&tmp_path, &path).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })
    }
}
