//! CSV and printable exports of the filtered set
//!
//! Exports always cover every record that passed the search filter, in the
//! current sort order, regardless of which page is on screen.

use crate::core::Product;
use crate::layout::DisplayRow;
use chrono::{DateTime, Local, NaiveDate};
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use thiserror::Error;

/// Errors during export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

/// Human-readable header row, distinct from the field names
pub const CSV_HEADERS: [&str; 6] = [
    "ID Produk",
    "Kategori",
    "Nama Produk",
    "Harga",
    "Stok",
    "Deskripsi",
];

/// Serialize `records` as CSV
///
/// Every field is quoted and embedded quotes are doubled, so commas,
/// quotes and newlines inside values survive a standard CSV parser.
pub fn to_csv(records: &[Product]) -> String {
    let mut out = String::new();
    push_row(&mut out, CSV_HEADERS.iter().map(|h| h.to_string()));

    for product in records {
        push_row(
            &mut out,
            [
                product.product_id.to_string(),
                product.category_label(),
                product.product_name.clone(),
                product.price.map(raw_number).unwrap_or_default(),
                product.stock.map(|s| s.to_string()).unwrap_or_default(),
                product.description_text().to_string(),
            ],
        );
    }

    out
}

fn push_row(out: &mut String, fields: impl IntoIterator<Item = String>) {
    let line = fields
        .into_iter()
        .map(|field| qualify(&field))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&line);
    out.push('\n');
}

fn qualify(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Numeric value without currency formatting; whole numbers drop the fraction
fn raw_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// `products_<YYYY-MM-DD>.csv`
pub fn csv_filename(date: NaiveDate) -> String {
    format!("products_{}.csv", date.format("%Y-%m-%d"))
}

/// Write the CSV export into `dir`, returning the created file path
pub fn write_csv(dir: &Path, records: &[Product], date: NaiveDate) -> Result<PathBuf, ExportError> {
    let path = dir.join(csv_filename(date));
    std::fs::write(&path, to_csv(records))?;
    tracing::info!(path = %path.display(), rows = records.len(), "CSV export written");
    Ok(path)
}

const PRINT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="id">
<head>
<meta charset="utf-8">
<title>{{ title }}</title>
<style>
body { font-family: sans-serif; margin: 24px; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #999; padding: 6px 8px; text-align: left; }
th { background: #eee; }
.stock-badge.low { color: #b00020; }
.stock-badge.medium { color: #b36b00; }
.stock-badge.high { color: #1b5e20; }
</style>
</head>
<body>
<h1>{{ title }}</h1>
<p>Dicetak pada: {{ generated_at | safe }}</p>
<p>Total Produk: {{ total }}</p>
<table>
<thead>
<tr><th>ID Produk</th><th>Kategori</th><th>Nama Produk</th><th>Harga</th><th>Stok</th><th>Deskripsi</th></tr>
</thead>
<tbody>
{% for row in rows -%}
<tr><td>{{ row.id_label }}</td><td>{{ row.category_label }}</td><td>{{ row.name }}</td><td>{{ row.price_label }}</td><td><span class="stock-badge {{ row.tier }}">{{ row.stock_label }}</span></td><td>{{ row.description }}</td></tr>
{% endfor -%}
{% if total == 0 -%}
<tr><td colspan="6">Tidak ada data produk</td></tr>
{% endif -%}
</tbody>
</table>
</body>
</html>
"#;

/// Title used for printed documents
pub const PRINT_TITLE: &str = "Data Produk";

/// Render `rows` as a standalone printable HTML document
///
/// The document is built in isolation from any interactive state: it
/// carries the title, the generation timestamp and the row count, and no
/// controls. All record text is HTML-escaped.
pub fn to_printable(rows: &[DisplayRow], generated_at: DateTime<Local>) -> Result<String, ExportError> {
    let mut context = Context::new();
    context.insert("title", PRINT_TITLE);
    context.insert(
        "generated_at",
        &generated_at.format("%d/%m/%Y %H:%M:%S").to_string(),
    );
    context.insert("total", &rows.len());
    context.insert("rows", rows);

    Ok(Tera::one_off(PRINT_TEMPLATE, &context, true)?)
}
