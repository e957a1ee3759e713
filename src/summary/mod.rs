//! Order Summary

use std::{fmt::Write, io};

use smallvec::{SmallVec, smallvec};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::CartItem,
    containers::ContainerSpec,
    export::format_quantity,
    totals::{Totals, cart_totals},
};

/// Errors that can occur when writing a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Console view of an order in progress.
///
/// Borrows the committed lines and the containers to gauge against; rendering
/// happens in [`write_to`](OrderSummary::write_to), against any writer, so
/// the same summary drives a terminal, a log capture or a test buffer.
#[derive(Debug, Clone)]
pub struct OrderSummary<'a> {
    items: &'a [CartItem],
    containers: &'a [ContainerSpec],
}

impl<'a> OrderSummary<'a> {
    /// Create a summary over the given lines and container specs.
    #[must_use]
    pub fn new(items: &'a [CartItem], containers: &'a [ContainerSpec]) -> Self {
        OrderSummary { items, containers }
    }

    /// Write the themed line table, the totals band and one fill gauge pair
    /// per container.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if the underlying writer fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SummaryError> {
        let totals = cart_totals(self.items);

        let mut builder = Builder::default();

        push_summary_header(&mut builder);

        let mut color_ops: SmallVec<[(usize, usize, Color); 32]> = smallvec![];

        append_line_rows(self.items, &mut builder, &mut color_ops);

        write_summary_table(&mut out, builder, color_ops)?;

        write_totals_band(&mut out, &totals)?;

        write_fill_gauges(&mut out, &totals, self.containers)?;

        Ok(())
    }
}

fn push_summary_header(builder: &mut Builder) {
    builder.push_record(["", "Item", "Variant", "Boxes", "Pcs", "Kg", "m³"]);
}

fn append_line_rows(
    items: &[CartItem],
    builder: &mut Builder,
    color_ops: &mut SmallVec<[(usize, usize, Color); 32]>,
) {
    for (idx, item) in items.iter().enumerate() {
        builder.push_record([
            format!("#{:<3}", idx + 1),
            item.name.clone(),
            variant_display(item),
            item.qty_boxes.to_string(),
            item.total_pcs().to_string(),
            format_quantity(item.total_kg()),
            format_quantity(item.total_m3()),
        ]);

        color_ops.push((idx + 1, 2, color_dark_grey()));
    }
}

/// Joins the selected option values for display ("Ice White / 60x60 / 9mm").
fn variant_display(item: &CartItem) -> String {
    let parts: SmallVec<[&str; 3]> = [
        item.color.as_deref(),
        item.size.as_deref(),
        item.thickness.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(" / ")
    }
}

fn write_summary_table(
    out: &mut impl io::Write,
    builder: Builder,
    color_ops: SmallVec<[(usize, usize, Color); 32]>,
) -> Result<(), SummaryError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..7), Alignment::right());

    for (row, col, color) in color_ops {
        table.modify((row, col), color);
    }

    let table_str = colorize_borders(&table.to_string());

    writeln!(out, "\n{table_str}").map_err(|_err| SummaryError::IO)
}

fn write_totals_band(out: &mut impl io::Write, totals: &Totals) -> Result<(), SummaryError> {
    let boxes_label = " Boxes:";
    let pcs_label = " Pieces:";
    let kg_label = " \x1b[1mTotal Kg:\x1b[0m";
    let m3_label = " \x1b[1mTotal m³:\x1b[0m";

    let boxes_val = format!("{}  ", totals.boxes);
    let pcs_val = format!("{}  ", totals.pcs);
    let kg_val = format!("{}  ", format_quantity(totals.kg));
    let m3_val = format!("{}  ", format_quantity(totals.m3));

    let label_width = visible_width(boxes_label)
        .max(visible_width(pcs_label))
        .max(visible_width(kg_label))
        .max(visible_width(m3_label));

    let value_width = boxes_val
        .len()
        .max(pcs_val.len())
        .max(kg_val.len())
        .max(m3_val.len());

    write_band_line(out, boxes_label, &boxes_val, label_width, value_width)?;
    write_band_line(out, pcs_label, &pcs_val, label_width, value_width)?;

    write_band_line(
        out,
        kg_label,
        &format!("\x1b[1m{kg_val}\x1b[0m"),
        label_width,
        value_width,
    )?;

    write_band_line(
        out,
        m3_label,
        &format!("\x1b[1m{m3_val}\x1b[0m"),
        label_width,
        value_width,
    )?;

    writeln!(out).map_err(|_err| SummaryError::IO)
}

fn write_fill_gauges(
    out: &mut impl io::Write,
    totals: &Totals,
    containers: &[ContainerSpec],
) -> Result<(), SummaryError> {
    if containers.is_empty() {
        return Ok(());
    }

    let label_width = containers
        .iter()
        .map(|spec| spec.label.chars().count())
        .max()
        .unwrap_or(0);

    writeln!(out, " Container fill:").map_err(|_err| SummaryError::IO)?;

    for spec in containers {
        let fit = spec.fit(totals);

        writeln!(
            out,
            "   {:<label_width$}  kg {} {:>4}  m³ {} {:>4}",
            spec.label,
            gauge(fit.kg_percent),
            format!("{}%", fit.kg_percent),
            gauge(fit.m3_percent),
            format!("{}%", fit.m3_percent),
        )
        .map_err(|_err| SummaryError::IO)?;
    }

    writeln!(out).map_err(|_err| SummaryError::IO)
}

/// Renders a 20-cell fill bar, colored by how close to capacity it is.
fn gauge(percent: u8) -> String {
    const CELLS: usize = 20;

    let filled = (usize::from(percent) * CELLS) / 100;

    let color = if percent >= 100 {
        "\x1b[31m"
    } else if percent >= 80 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    let mut bar = String::with_capacity(CELLS * 3 + 16);

    _ = bar.write_str(color);

    for _ in 0..filled {
        bar.push('█');
    }

    _ = bar.write_str("\x1b[90m");

    for _ in filled..CELLS {
        bar.push('░');
    }

    _ = bar.write_str("\x1b[0m");

    bar
}

/// Wraps runs of UTF-8 box-drawing characters in ANSI dark-grey escape codes.
///
/// Box-drawing characters occupy the Unicode range U+2500..U+257F. This scans
/// each character, grouping consecutive border characters and emitting one
/// grey escape sequence around each run, leaving cell content untouched.
fn colorize_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_run = false;

    for ch in table.chars() {
        let box_char = ('\u{2500}'..='\u{257F}').contains(&ch);

        if box_char && !in_run {
            _ = out.write_str("\x1b[90m");
            in_run = true;
        } else if !box_char && in_run {
            _ = out.write_str("\x1b[0m");
            in_run = false;
        }

        out.push(ch);
    }

    if in_run {
        _ = out.write_str("\x1b[0m");
    }

    out
}

/// Returns the visible (non-ANSI) width of a string.
fn visible_width(s: &str) -> usize {
    let mut width = 0usize;
    let mut in_escape = false;

    for ch in s.chars() {
        if in_escape {
            if ch.is_ascii_alphabetic() {
                in_escape = false;
            }
        } else if ch == '\x1b' {
            in_escape = true;
        } else {
            width += 1;
        }
    }

    width
}

/// Writes a band line with a right-aligned label and a fixed-width value
/// column.
fn write_band_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
    label_col_width: usize,
    value_col_width: usize,
) -> Result<(), SummaryError> {
    let label_vis = visible_width(label);
    let value_vis = visible_width(value);

    // 2 chars of spacing between label and value column.
    let label_pad = label_col_width.saturating_sub(label_vis);
    let value_pad = value_col_width.saturating_sub(value_vis);

    writeln!(
        out,
        "{:>label_pad$}{label}  {value_pad}{value}",
        "",
        value_pad = " ".repeat(value_pad)
    )
    .map_err(|_err| SummaryError::IO)
}

/// ANSI dark grey foreground.
fn color_dark_grey() -> Color {
    Color::new("\x1b[90m", "\x1b[0m")
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;
    use crate::catalog::Product;

    fn tile_line(color: &str, boxes: u32) -> CartItem {
        let product = Product {
            id: "P-1001".to_string(),
            sku: "TIL-ICE-6060".to_string(),
            name: "Porcelain Tile Ice".to_string(),
            category: "Tiles".to_string(),
            sub: "Porcelain".to_string(),
            sizes: crate::catalog::OptionList::new(),
            thicknesses: crate::catalog::OptionList::new(),
            colors: crate::catalog::OptionList::new(),
            pcs_per_box: 10,
            box_kg: Decimal::from(5),
            box_m3: Decimal::new(1, 1),
            thumbnail: None,
        };

        CartItem::from_product(&product, Some(color), Some("60x60"), Some("9mm"), boxes)
    }

    fn render(items: &[CartItem], containers: &[ContainerSpec]) -> TestResult<String> {
        let mut out = Vec::new();

        OrderSummary::new(items, containers).write_to(&mut out)?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn renders_lines_totals_and_gauges() -> TestResult {
        let items = vec![tile_line("Ice White", 3), tile_line("Storm Grey", 2)];
        let rendered = render(&items, &ContainerSpec::builtins())?;

        assert!(rendered.contains("Porcelain Tile Ice"), "item name missing:\n{rendered}");
        assert!(rendered.contains("Ice White / 60x60 / 9mm"), "variant column missing");
        assert!(rendered.contains("Boxes:"), "totals band missing");
        assert!(rendered.contains("Total Kg:"), "weight total missing");
        assert!(rendered.contains("20' Container"), "gauge label missing");
        assert!(rendered.contains("0%"), "tiny order gauges to zero");

        Ok(())
    }

    #[test]
    fn an_empty_cart_still_renders_header_and_zeros() -> TestResult {
        let rendered = render(&[], &ContainerSpec::builtins())?;

        assert!(rendered.contains("Item"), "table header missing");
        assert!(rendered.contains("Boxes:"), "totals band missing");
        assert!(rendered.contains("Container fill:"), "gauges missing");

        Ok(())
    }

    #[test]
    fn gauges_are_skipped_without_containers() -> TestResult {
        let rendered = render(&[tile_line("Ice White", 1)], &[])?;

        assert!(!rendered.contains("Container fill:"), "no specs means no gauges");

        Ok(())
    }

    #[test]
    fn lines_without_selections_show_a_placeholder_variant() {
        let product = Product {
            id: "P-2001".to_string(),
            sku: "SAND-25".to_string(),
            name: "Kiln Dried Sand".to_string(),
            category: "Aggregates".to_string(),
            sub: String::new(),
            sizes: crate::catalog::OptionList::new(),
            thicknesses: crate::catalog::OptionList::new(),
            colors: crate::catalog::OptionList::new(),
            pcs_per_box: 1,
            box_kg: Decimal::from(25),
            box_m3: Decimal::new(2, 2),
            thumbnail: None,
        };

        let item = CartItem::from_product(&product, None, None, None, 2);

        assert_eq!(variant_display(&item), "-");
    }

    #[test]
    fn gauge_thresholds_change_the_bar_color() {
        assert!(gauge(10).starts_with("\x1b[32m"), "low fill is green");
        assert!(gauge(85).starts_with("\x1b[33m"), "high fill is yellow");
        assert!(gauge(100).starts_with("\x1b[31m"), "full is red");
    }
}
