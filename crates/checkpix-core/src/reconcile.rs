use serde::Serialize;
use serde_json::Value;

use crate::columns::Side;
use crate::model::{Entry, EntryGroup, Record, TransferGroup};

/// A receipt aligned by position with its candidate transfer. Either side may
/// be the empty placeholder, never absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconciledPair {
    pub comprovante: Entry,
    pub transferencia: Entry,
}

impl ReconciledPair {
    pub fn side(&self, side: Side) -> &Entry {
        match side {
            Side::Comprovante => &self.comprovante,
            Side::Transferencia => &self.transferencia,
        }
    }
}

/// Pair receipts and transfers positionally.
///
/// Produces `max(receipts, structured transfers)` pairs; the shorter side is
/// padded with placeholders. Transfer values that are not entry objects are
/// dropped, and scalar or missing transfer groups count as empty.
pub fn reconcile(comprovantes: &EntryGroup, transferencias: &TransferGroup) -> Vec<ReconciledPair> {
    let comprovantes: Vec<&Entry> = comprovantes.entries().collect();
    let transferencias = structured_transfers(transferencias);
    let len = comprovantes.len().max(transferencias.len());

    (0..len)
        .map(|i| ReconciledPair {
            comprovante: comprovantes.get(i).map(|e| (*e).clone()).unwrap_or_default(),
            transferencia: transferencias.get(i).cloned().unwrap_or_default(),
        })
        .collect()
}

/// Reconcile both groups of a record.
pub fn reconcile_record(record: &Record) -> Vec<ReconciledPair> {
    reconcile(&record.comprovante, &record.transferencia)
}

fn structured_transfers(group: &TransferGroup) -> Vec<Entry> {
    match group {
        TransferGroup::Mapping(values) => values
            .iter()
            .filter_map(|(key, value)| match value {
                Value::Object(_) => Some(Entry::from(value.clone())),
                other => {
                    tracing::debug!(key = %key, value = %other, "dropping non-entry transfer value");
                    None
                }
            })
            .collect(),
        TransferGroup::Scalar(value) => {
            tracing::debug!(value = %value, "transfer group is a scalar, treating as empty");
            Vec::new()
        }
        TransferGroup::Missing => Vec::new(),
    }
}
