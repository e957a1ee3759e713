//! Print Document
//!
//! Headless replacement for a browser print window: renders the order as one
//! self-contained HTML string a caller can write to disk, pipe to an
//! HTML-to-PDF tool or hand to a print dialog. Same columns and per-row
//! formulas as the CSV writer, plus a totals band.

use std::{fmt::Write as _, fs, path::Path};

use chrono::Utc;
use tracing::debug;

use crate::{
    cart::CartItem,
    export::{COLUMNS, ExportError, OrderRow, format_quantity},
    totals::cart_totals,
};

/// Conventional filename for a print-document export.
pub const DEFAULT_FILENAME: &str = "order.html";

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2em; }\n\
h1 { font-size: 1.4em; }\n\
p.meta { color: #555; }\n\
table { border-collapse: collapse; width: 100%; }\n\
th, td { border: 1px solid #999; padding: 4px 8px; text-align: left; }\n\
th { background: #eee; }\n\
tfoot td { font-weight: bold; }\n\
@media print { body { margin: 0; } }";

/// Render the order as a print-ready HTML document.
///
/// Pure: the returned string is the whole document, generated entirely from
/// the line snapshot.
#[must_use]
pub fn render_order(items: &[CartItem]) -> String {
    let totals = cart_totals(items);
    let mut doc = String::with_capacity(1024 + items.len() * 256);

    // Writing into a String cannot fail; the results are discarded the same
    // way throughout.
    _ = doc.write_str("<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    _ = doc.write_str("<title>Bulk Order</title>\n<style>\n");
    _ = doc.write_str(STYLE);
    _ = doc.write_str("\n</style>\n</head>\n<body>\n");
    _ = doc.write_str("<h1>Bulk Order</h1>\n");
    _ = writeln!(
        doc,
        "<p class=\"meta\">{} lines, generated {}</p>",
        items.len(),
        Utc::now().format("%Y-%m-%d")
    );

    _ = doc.write_str("<table>\n<thead>\n<tr>");

    for column in COLUMNS {
        _ = write!(doc, "<th>{}</th>", escape_html(column));
    }

    _ = doc.write_str("</tr>\n</thead>\n<tbody>\n");

    for item in items {
        _ = doc.write_str("<tr>");

        for cell in OrderRow::from_item(item).cells() {
            _ = write!(doc, "<td>{}</td>", escape_html(&cell));
        }

        _ = doc.write_str("</tr>\n");
    }

    _ = doc.write_str("</tbody>\n<tfoot>\n<tr>");

    // The totals band lines up under Boxes, Total Pcs, Total Kg and Total m3.
    _ = write!(doc, "<td colspan=\"6\">Totals</td>");
    _ = write!(doc, "<td>{}</td>", totals.boxes);
    _ = write!(doc, "<td>{}</td>", totals.pcs);
    _ = doc.write_str("<td></td><td></td>");
    _ = write!(doc, "<td>{}</td>", format_quantity(totals.kg));
    _ = write!(doc, "<td>{}</td>", format_quantity(totals.m3));
    _ = doc.write_str("<td></td>");
    _ = doc.write_str("</tr>\n</tfoot>\n</table>\n</body>\n</html>\n");

    doc
}

/// Write the print document to a file, conventionally named
/// [`DEFAULT_FILENAME`].
///
/// # Errors
///
/// Returns an [`ExportError`] when the file cannot be written.
pub fn write_order_file(items: &[CartItem], path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();

    fs::write(path, render_order(items))?;

    debug!(path = %path.display(), lines = items.len(), "wrote print document");

    Ok(())
}

/// Minimal escaping for HTML text nodes and attribute values.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }

    escaped
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;
    use crate::catalog::Product;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            sku: format!("SKU-{id}"),
            name: name.to_string(),
            category: "Tiles".to_string(),
            sub: String::new(),
            sizes: crate::catalog::OptionList::new(),
            thicknesses: crate::catalog::OptionList::new(),
            colors: crate::catalog::OptionList::new(),
            pcs_per_box: 10,
            box_kg: Decimal::from(5),
            box_m3: Decimal::new(1, 1),
            thumbnail: None,
        }
    }

    #[test]
    fn renders_every_column_and_row() {
        let items = vec![
            CartItem::from_product(&product("P-1", "Tile Ice"), Some("White"), None, None, 3),
            CartItem::from_product(&product("P-2", "Tile Storm"), Some("Grey"), None, None, 2),
        ];

        let doc = render_order(&items);

        for column in COLUMNS {
            assert!(doc.contains(&format!("<th>{column}</th>")), "missing column {column}");
        }

        assert!(doc.contains("<td>Tile Ice</td>"));
        assert!(doc.contains("<td>Tile Storm</td>"));
        assert_eq!(doc.matches("<tr>").count(), 4, "header, two rows, totals band");
    }

    #[test]
    fn totals_band_sums_the_lines() {
        let items = vec![
            CartItem::from_product(&product("P-1", "Tile"), None, None, None, 3),
            CartItem::from_product(&product("P-2", "Board"), None, None, None, 2),
        ];

        let doc = render_order(&items);

        assert!(doc.contains("<td colspan=\"6\">Totals</td>"));
        assert!(doc.contains("<td>5</td>"), "total boxes");
        assert!(doc.contains("<td>50</td>"), "total pieces");
        assert!(doc.contains("<td>25</td>"), "total kilograms");
        assert!(doc.contains("<td>0.5</td>"), "total cubic metres");
    }

    #[test]
    fn escapes_markup_in_catalog_text() {
        let items = vec![CartItem::from_product(
            &product("P-9", "<b>Bold</b> \"Beam\" & Co"),
            None,
            None,
            None,
            1,
        )];

        let doc = render_order(&items);

        assert!(doc.contains("&lt;b&gt;Bold&lt;/b&gt; &quot;Beam&quot; &amp; Co"));
        assert!(!doc.contains("<b>Bold</b>"), "raw markup must not leak through");
    }

    #[test]
    fn empty_orders_still_render_a_complete_document() {
        let doc = render_order(&[]);

        assert!(doc.starts_with("<!doctype html>"));
        assert!(doc.ends_with("</html>\n"));
        assert!(doc.contains("<td>0</td>"), "zero totals band");
    }

    #[test]
    fn file_writer_round_trips_through_disk() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(DEFAULT_FILENAME);

        let items = vec![CartItem::from_product(&product("P-1", "Tile"), None, None, None, 2)];

        write_order_file(&items, &path)?;

        let text = std::fs::read_to_string(&path)?;

        assert!(text.contains("<title>Bulk Order</title>"));

        Ok(())
    }
}
