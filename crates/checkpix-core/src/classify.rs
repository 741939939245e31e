use serde::{Deserialize, Serialize};

use crate::columns::Field;
use crate::model::Bucket;
use crate::normalize::normalize;
use crate::reconcile::ReconciledPair;

/// Per-pair transfer status. Only drives presentation; it never changes
/// which fields are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairStatus {
    TransferFound,
    TransferNotFound,
    NoTransfer,
}

impl PairStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PairStatus::TransferFound => "transferência encontrada",
            PairStatus::TransferNotFound => "transferência não encontrada",
            PairStatus::NoTransfer => "sem transferência",
        }
    }
}

/// Derive the status of a pair from its bucket and transfer data.
///
/// A valid record can still carry placeholder transfers, so the bucket alone
/// is not enough: a transfer counts as found only when its name is non-blank.
pub fn classify(pair: &ReconciledPair, bucket: Bucket) -> PairStatus {
    match bucket {
        Bucket::Invalid => PairStatus::NoTransfer,
        Bucket::Valid => {
            let name = normalize(pair.transferencia.get(Field::Nome.key()));
            if name.trim().is_empty() {
                PairStatus::TransferNotFound
            } else {
                PairStatus::TransferFound
            }
        }
    }
}
