use checkpix_core::classify::PairStatus;
use checkpix_core::view::{DetailField, ResultView};
use std::fmt::Write;

pub fn print(view: &ResultView) {
    print!("{}", format_view(view));
}

pub fn format_view(view: &ResultView) -> String {
    let mut out = String::new();

    if view.buckets.is_empty() {
        out.push_str("Nenhum registro retornado.\n");
        return out;
    }

    for (i, bucket) in view.buckets.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "=== {} ===\n", bucket.heading);

        for record in &bucket.records {
            let _ = writeln!(out, "  {}", record.title);

            for block in &record.blocks {
                let _ = writeln!(out, "    {} {}", marker(block.status), block.status.label());
                out.push_str("      Comprovante\n");
                write_fields(&mut out, &block.comprovante);

                if let Some(ref transfer) = block.transferencia {
                    out.push_str("      Transferência\n");
                    write_fields(&mut out, transfer);
                }
            }
            out.push('\n');
        }
    }

    out
}

fn marker(status: PairStatus) -> &'static str {
    match status {
        PairStatus::TransferFound => "[+]",
        PairStatus::TransferNotFound => "[?]",
        PairStatus::NoTransfer => "[-]",
    }
}

fn write_fields(out: &mut String, fields: &[DetailField]) {
    let width = fields.iter().map(|f| f.label.chars().count()).max().unwrap_or(0) + 1;
    for field in fields {
        let label = format!("{}:", field.label);
        let _ = writeln!(out, "        {:<width$} {}", label, field.value, width = width);
    }
}
