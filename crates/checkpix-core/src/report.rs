//! Tabular report of a reconciliation response.
//!
//! Builds a serialization-agnostic [`Document`]: a title plus one section per
//! non-empty bucket, each holding a header row and body rows. Writers for a
//! concrete file format live with the caller.

use serde::Serialize;

use crate::columns::columns_for;
use crate::model::{Bucket, ReconciliationResponse, Record};
use crate::reconcile::reconcile_record;

pub const REPORT_TITLE: &str = "Relatório de Validação";

/// Default file name of the exported report.
pub const REPORT_FILE_NAME: &str = "relatorio.html";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub bucket: Bucket,
    pub heading: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub title: String,
    pub sections: Vec<Section>,
}

impl Document {
    pub fn section(&self, bucket: Bucket) -> Option<&Section> {
        self.sections.iter().find(|s| s.bucket == bucket)
    }

    pub fn row_count(&self) -> usize {
        self.sections.iter().map(|s| s.rows.len()).sum()
    }
}

/// One row per reconciled pair, records in order, using the bucket's column
/// schema.
pub fn build_table(records: &[Record], bucket: Bucket) -> Vec<Vec<String>> {
    let columns = columns_for(bucket);
    records
        .iter()
        .flat_map(reconcile_record)
        .map(|pair| columns.iter().map(|c| c.format(&pair)).collect())
        .collect()
}

/// Assemble the report. Buckets without rows get no section at all.
pub fn build_document(response: &ReconciliationResponse) -> Document {
    let sections = Bucket::ALL
        .iter()
        .filter_map(|&bucket| {
            let rows = build_table(response.records(bucket), bucket);
            if rows.is_empty() {
                return None;
            }
            Some(Section {
                bucket,
                heading: bucket.label().to_string(),
                headers: columns_for(bucket)
                    .iter()
                    .map(|c| c.label.to_string())
                    .collect(),
                rows,
            })
        })
        .collect();

    Document {
        title: REPORT_TITLE.to_string(),
        sections,
    }
}
