//! Printable HTML rendition of a report [`Document`].
//!
//! Produces one self-contained file: title, then per section a heading and a
//! grid table. Styling is inline so the file prints the same anywhere.

use checkpix_core::report::{Document, Section};
use std::fmt::Write;

const STYLE: &str = "\
body { font-family: Helvetica, Arial, sans-serif; font-size: 8pt; margin: 14mm; }
h1 { font-size: 14pt; margin: 0 0 6mm 0; }
h2 { font-size: 8pt; margin: 5mm 0 1mm 0; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #bbb; padding: 2px 4px; text-align: left; }
th { background: rgb(74, 144, 226); color: #fff; }
";

pub fn render(document: &Document) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n<h1>{title}</h1>\n",
        title = esc(&document.title),
    );
    for section in &document.sections {
        write_section(&mut out, section);
    }
    out.push_str("</body>\n</html>\n");
    out
}

fn write_section(out: &mut String, section: &Section) {
    let _ = writeln!(out, "<h2>{}</h2>", esc(&section.heading));
    out.push_str("<table>\n<thead>\n<tr>");
    for header in &section.headers {
        let _ = write!(out, "<th>{}</th>", esc(header));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in &section.rows {
        out.push_str("<tr>");
        for cell in row {
            let _ = write!(out, "<td>{}</td>", esc(cell));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
}

fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
