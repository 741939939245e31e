//! Column catalogue shared by the exported report and the result view.
//!
//! Both projections read fields through the same [`Column`] definitions so a
//! field can never be formatted differently in one of them.

use crate::model::Bucket;
use crate::normalize::{format_field, FieldKind};
use crate::reconcile::ReconciledPair;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Comprovante,
    Transferencia,
}

/// Entry attribute read by a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Nome,
    Valor,
    Data,
    Path,
    Banco,
}

impl Field {
    /// Attribute name in the server's entry objects.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Nome => "nome",
            Field::Valor => "valor",
            Field::Data => "data",
            Field::Path => "path",
            Field::Banco => "banco",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Nome => FieldKind::Name,
            Field::Valor => FieldKind::Amount,
            Field::Data => FieldKind::Date,
            Field::Path | Field::Banco => FieldKind::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub label: &'static str,
    pub side: Side,
    pub field: Field,
}

impl Column {
    const fn new(label: &'static str, side: Side, field: Field) -> Self {
        Column { label, side, field }
    }

    /// Display text of this column for a pair.
    pub fn format(&self, pair: &ReconciledPair) -> String {
        let entry = pair.side(self.side);
        format_field(self.field.kind(), entry.get(self.field.key()))
    }
}

pub const VALID_COLUMNS: [Column; 8] = [
    Column::new("Comp. Nome", Side::Comprovante, Field::Nome),
    Column::new("Comp. Valor", Side::Comprovante, Field::Valor),
    Column::new("Comp. Data", Side::Comprovante, Field::Data),
    Column::new("Comp. Path", Side::Comprovante, Field::Path),
    Column::new("Transf. Nome", Side::Transferencia, Field::Nome),
    Column::new("Transf. Valor", Side::Transferencia, Field::Valor),
    Column::new("Transf. Data", Side::Transferencia, Field::Data),
    Column::new("Transf. Banco", Side::Transferencia, Field::Banco),
];

// Transfer columns are omitted for invalid records, not left blank.
pub const INVALID_COLUMNS: [Column; 4] = [
    Column::new("Comp. Nome", Side::Comprovante, Field::Nome),
    Column::new("Comp. Valor", Side::Comprovante, Field::Valor),
    Column::new("Comp. Data", Side::Comprovante, Field::Data),
    Column::new("Comp. Path", Side::Comprovante, Field::Path),
];

pub fn columns_for(bucket: Bucket) -> &'static [Column] {
    match bucket {
        Bucket::Valid => &VALID_COLUMNS,
        Bucket::Invalid => &INVALID_COLUMNS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Entry;
    use crate::normalize::UNKNOWN;
    use serde_json::json;

    #[test]
    fn test_invalid_columns_are_receipt_only() {
        assert!(INVALID_COLUMNS.iter().all(|c| c.side == Side::Comprovante));
        assert_eq!(&VALID_COLUMNS[..4], &INVALID_COLUMNS[..]);
    }

    #[test]
    fn test_placeholder_pair_formats_to_unknown() {
        let pair = ReconciledPair::default();
        let texts: Vec<String> = VALID_COLUMNS.iter().map(|c| c.format(&pair)).collect();
        assert_eq!(texts[0], UNKNOWN);
        assert_eq!(texts[1], "");
        assert_eq!(texts[2], UNKNOWN);
        assert_eq!(texts[3], "");
        assert_eq!(texts[4], UNKNOWN);
        assert_eq!(texts[6], UNKNOWN);
    }

    #[test]
    fn test_format_reads_the_right_side() {
        let pair = ReconciledPair {
            comprovante: Entry::from(json!({"nome": "Comp", "banco": "ignorado"})),
            transferencia: Entry::from(json!({"nome": "Transf", "banco": "Itaú"})),
        };
        assert_eq!(VALID_COLUMNS[0].format(&pair), "Comp");
        assert_eq!(VALID_COLUMNS[4].format(&pair), "Transf");
        assert_eq!(VALID_COLUMNS[7].format(&pair), "Itaú");
    }
}
