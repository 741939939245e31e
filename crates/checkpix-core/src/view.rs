//! Structured, render-ready view of a reconciliation response.

use serde::Serialize;

use crate::classify::{classify, PairStatus};
use crate::columns::{columns_for, Side};
use crate::model::{Bucket, ReconciliationResponse};
use crate::reconcile::{reconcile_record, ReconciledPair};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailField {
    pub label: String,
    pub value: String,
}

/// One reconciled pair as displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailBlock {
    pub status: PairStatus,
    pub comprovante: Vec<DetailField>,
    /// Present only for records of the valid bucket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transferencia: Option<Vec<DetailField>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordView {
    /// 1-based position of the record in its bucket.
    pub number: usize,
    pub title: String,
    pub blocks: Vec<DetailBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketView {
    pub bucket: Bucket,
    pub heading: String,
    pub records: Vec<RecordView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub buckets: Vec<BucketView>,
}

impl ResultView {
    pub fn bucket(&self, bucket: Bucket) -> Option<&BucketView> {
        self.buckets.iter().find(|b| b.bucket == bucket)
    }
}

/// Build the view: one group per non-empty bucket, one sub-group per record,
/// one detail block per reconciled pair.
pub fn render(response: &ReconciliationResponse) -> ResultView {
    let buckets = Bucket::ALL
        .iter()
        .filter(|&&bucket| !response.records(bucket).is_empty())
        .map(|&bucket| BucketView {
            bucket,
            heading: bucket.label().to_string(),
            records: response
                .records(bucket)
                .iter()
                .enumerate()
                .map(|(i, record)| RecordView {
                    number: i + 1,
                    title: format!("Registro {}", i + 1),
                    blocks: reconcile_record(record)
                        .iter()
                        .map(|pair| detail_block(pair, bucket))
                        .collect(),
                })
                .collect(),
        })
        .collect();

    ResultView { buckets }
}

fn detail_block(pair: &ReconciledPair, bucket: Bucket) -> DetailBlock {
    let fields_for = |side: Side| -> Vec<DetailField> {
        columns_for(bucket)
            .iter()
            .filter(|c| c.side == side)
            .map(|c| DetailField {
                label: c.label.to_string(),
                value: c.format(pair),
            })
            .collect()
    };

    DetailBlock {
        status: classify(pair, bucket),
        comprovante: fields_for(Side::Comprovante),
        transferencia: match bucket {
            Bucket::Valid => Some(fields_for(Side::Transferencia)),
            Bucket::Invalid => None,
        },
    }
}
