//! Response model of the validation service.
//!
//! The server's shapes are loose: buckets may be missing, records may not be
//! objects and `transferencia` flips between a keyed map, a bare scalar and
//! `null`. Every type here is built from a `serde_json::Value` so that shape
//! variance is absorbed at the deserialization boundary and never surfaces as
//! a parse error.

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Server verdict bucket a record was returned in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Valid,
    Invalid,
}

impl Bucket {
    /// Buckets in presentation order.
    pub const ALL: [Bucket; 2] = [Bucket::Valid, Bucket::Invalid];

    /// Section heading used by both the view and the exported document.
    pub fn label(&self) -> &'static str {
        match self {
            Bucket::Valid => "Válidos",
            Bucket::Invalid => "Inválidos",
        }
    }

    /// Key of the bucket in the server response.
    pub fn response_key(&self) -> &'static str {
        match self {
            Bucket::Valid => "validos",
            Bucket::Invalid => "invalidos",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A receipt or transfer entry: the raw attribute map sent by the server
/// (`nome`, `valor`, `data`, `path`, `banco`, ...).
///
/// The default value is the empty placeholder used to pad uneven pairs.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct Entry {
    fields: Map<String, Value>,
}

impl Entry {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn is_placeholder(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Value> for Entry {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Entry { fields },
            _ => Entry::default(),
        }
    }
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// Keyed receipt entries of a record, in mapping order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct EntryGroup {
    entries: Vec<(String, Entry)>,
}

impl EntryGroup {
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().map(|(_, entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Value> for EntryGroup {
    fn from(value: Value) -> Self {
        let entries = keyed_values(value)
            .unwrap_or_default()
            .into_iter()
            .map(|(key, v)| (key, Entry::from(v)))
            .collect();
        EntryGroup { entries }
    }
}

impl Serialize for EntryGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

/// The `transferencia` side of a record, whatever shape the server chose.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum TransferGroup {
    /// Keyed values. Not every value is guaranteed to be an entry object.
    Mapping(Vec<(String, Value)>),
    /// A bare scalar where a mapping was expected.
    Scalar(Value),
    #[default]
    Missing,
}

impl From<Value> for TransferGroup {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => TransferGroup::Missing,
            Value::Object(_) | Value::Array(_) => {
                TransferGroup::Mapping(keyed_values(value).unwrap_or_default())
            }
            scalar => TransferGroup::Scalar(scalar),
        }
    }
}

impl Serialize for TransferGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TransferGroup::Mapping(values) => {
                let mut map = serializer.serialize_map(Some(values.len()))?;
                for (key, value) in values {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            TransferGroup::Scalar(value) => value.serialize(serializer),
            TransferGroup::Missing => serializer.serialize_none(),
        }
    }
}

/// One receipt-to-possible-transfers unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Record {
    pub comprovante: EntryGroup,
    pub transferencia: TransferGroup,
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(mut fields) => Record {
                comprovante: fields
                    .remove("comprovante")
                    .map(EntryGroup::from)
                    .unwrap_or_default(),
                transferencia: fields
                    .remove("transferencia")
                    .map(TransferGroup::from)
                    .unwrap_or_default(),
            },
            _ => Record::default(),
        }
    }
}

/// The server's answer: records split into the two verdict buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct ReconciliationResponse {
    pub validos: Vec<Record>,
    pub invalidos: Vec<Record>,
}

impl ReconciliationResponse {
    pub fn records(&self, bucket: Bucket) -> &[Record] {
        match bucket {
            Bucket::Valid => &self.validos,
            Bucket::Invalid => &self.invalidos,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.validos.is_empty() && self.invalidos.is_empty()
    }
}

impl From<Value> for ReconciliationResponse {
    fn from(value: Value) -> Self {
        let mut fields = match value {
            Value::Object(fields) => fields,
            _ => return ReconciliationResponse::default(),
        };
        let mut take = |bucket: Bucket| -> Vec<Record> {
            match fields.remove(bucket.response_key()) {
                Some(Value::Array(items)) => items.into_iter().map(Record::from).collect(),
                _ => Vec::new(),
            }
        };
        ReconciliationResponse {
            validos: take(Bucket::Valid),
            invalidos: take(Bucket::Invalid),
        }
    }
}

/// Values of a keyed container in iteration order. Arrays are keyed by index.
/// Returns `None` for anything that is not a container.
fn keyed_values(value: Value) -> Option<Vec<(String, Value)>> {
    match value {
        Value::Object(map) => Some(map.into_iter().collect()),
        Value::Array(items) => Some(
            items
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_from_non_object_is_placeholder() {
        assert!(Entry::from(json!("abc")).is_placeholder());
        assert!(Entry::from(json!(null)).is_placeholder());
        assert!(!Entry::from(json!({"nome": "Ana"})).is_placeholder());
    }

    #[test]
    fn test_entry_group_keeps_document_order() {
        let group: EntryGroup = serde_json::from_value(json!({
            "z": {"nome": "primeiro"},
            "a": {"nome": "segundo"},
        }))
        .unwrap();
        let names: Vec<_> = group.entries().map(|e| e.get("nome").cloned()).collect();
        assert_eq!(names, vec![Some(json!("primeiro")), Some(json!("segundo"))]);
    }

    #[test]
    fn test_entry_group_from_scalar_is_empty() {
        assert!(EntryGroup::from(json!(42)).is_empty());
        assert!(EntryGroup::from(json!(null)).is_empty());
    }

    #[test]
    fn test_transfer_group_shapes() {
        assert_eq!(TransferGroup::from(json!(null)), TransferGroup::Missing);
        assert_eq!(
            TransferGroup::from(json!("nada")),
            TransferGroup::Scalar(json!("nada"))
        );
        assert_eq!(
            TransferGroup::from(json!({"x": {"nome": "Bob"}, "y": 3})),
            TransferGroup::Mapping(vec![
                ("x".into(), json!({"nome": "Bob"})),
                ("y".into(), json!(3)),
            ])
        );
    }

    #[test]
    fn test_record_missing_transferencia_is_missing() {
        let record: Record = serde_json::from_value(json!({"comprovante": {}})).unwrap();
        assert_eq!(record.transferencia, TransferGroup::Missing);
    }

    #[test]
    fn test_response_tolerates_bad_buckets() {
        let response: ReconciliationResponse = serde_json::from_value(json!({
            "validos": "oops",
            "invalidos": [1, {"comprovante": {"a": {"nome": "Ana"}}}],
        }))
        .unwrap();
        assert!(response.validos.is_empty());
        assert_eq!(response.invalidos.len(), 2);
        assert!(response.invalidos[0].comprovante.is_empty());
        assert_eq!(response.invalidos[1].comprovante.len(), 1);
    }

    #[test]
    fn test_response_serializes_back_to_server_shape() {
        let raw = json!({
            "validos": [{
                "comprovante": {"a": {"nome": "Bob"}},
                "transferencia": {"x": {"nome": "Bob", "banco": "X"}},
            }],
            "invalidos": [{"comprovante": {"b": {"nome": "Ana"}}, "transferencia": null}],
        });
        let response: ReconciliationResponse = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&response).unwrap(), raw);
    }
}
