//! Catalog Ingestion
//!
//! Lenient, typed parsing of upstream catalog payloads. The admin API is not
//! strongly shaped, so every field is coerced or defaulted here (empty
//! strings and lists, zero numerics) and each repair is reported as an
//! [`IngestWarning`]. Downstream code receives only fully-populated
//! [`Product`] and [`Category`] records and never re-checks payload shape.

use std::fmt;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use crate::catalog::{Catalog, Category, OptionList, Product};

/// Ingestion Errors
#[derive(Debug, Error)]
pub enum IngestError {
    /// The payload was not valid JSON at all.
    #[error("failed to parse payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload was valid JSON but not a record listing.
    #[error("payload is not a {expected} listing")]
    UnexpectedShape {
        /// Kind of listing that was expected.
        expected: &'static str,
    },
}

/// What a lenient coercion did to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// The field was absent or null and has been defaulted.
    Missing,

    /// The field was present but unusable and has been defaulted.
    Malformed,

    /// The whole record was unusable and has been dropped.
    SkippedRecord,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::Missing => f.write_str("missing"),
            WarningKind::Malformed => f.write_str("malformed"),
            WarningKind::SkippedRecord => f.write_str("record skipped"),
        }
    }
}

/// One defaulted or coerced field, reported per occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestWarning {
    /// External id of the record, or `#<index>` when the id itself was
    /// unusable.
    pub record: String,

    /// Field that was repaired.
    pub field: &'static str,

    /// What happened to it.
    pub kind: WarningKind,
}

impl fmt::Display for IngestWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.record, self.field, self.kind)
    }
}

/// Result of one ingestion pass: the typed records plus every repair applied.
#[derive(Debug)]
pub struct Ingest<T> {
    /// Fully-defaulted records, in payload order.
    pub records: Vec<T>,

    /// Every lenient repair, in the order it was applied.
    pub warnings: Vec<IngestWarning>,
}

impl Ingest<Product> {
    /// Fold the ingested products into a catalog, deduplicating by external
    /// id (later records replace earlier ones).
    #[must_use]
    pub fn into_catalog(self) -> (Catalog, Vec<IngestWarning>) {
        let mut catalog = Catalog::new();

        for product in self.records {
            catalog.insert(product);
        }

        (catalog, self.warnings)
    }
}

/// Parse a product listing payload.
///
/// Accepts either a bare JSON array of records or an object wrapping one
/// under a `products` field.
///
/// # Errors
///
/// Returns an [`IngestError`] when the payload is not JSON or not a product
/// listing. Per-field problems are never errors; they are repaired and
/// reported as warnings.
pub fn parse_products(payload: &str) -> Result<Ingest<Product>, IngestError> {
    let value: Value = serde_json::from_str(payload)?;

    products_from_value(&value)
}

/// Parse an already-deserialized product listing.
///
/// # Errors
///
/// Returns [`IngestError::UnexpectedShape`] when the value is not a product
/// listing.
pub fn products_from_value(value: &Value) -> Result<Ingest<Product>, IngestError> {
    let records = listing(value, "products").ok_or(IngestError::UnexpectedShape {
        expected: "product",
    })?;

    let mut ingest = Ingest {
        records: Vec::with_capacity(records.len()),
        warnings: Vec::new(),
    };

    for (index, record) in records.iter().enumerate() {
        if let Some(product) = product_from_record(record, index, &mut ingest.warnings) {
            ingest.records.push(product);
        }
    }

    Ok(ingest)
}

/// Parse a category listing payload.
///
/// Accepts either a bare JSON array of records or an object wrapping one
/// under a `categories` field. Records without a usable slug get one derived
/// from their name.
///
/// # Errors
///
/// Returns an [`IngestError`] when the payload is not JSON or not a category
/// listing.
pub fn parse_categories(payload: &str) -> Result<Ingest<Category>, IngestError> {
    let value: Value = serde_json::from_str(payload)?;

    categories_from_value(&value)
}

/// Parse an already-deserialized category listing.
///
/// # Errors
///
/// Returns [`IngestError::UnexpectedShape`] when the value is not a category
/// listing.
pub fn categories_from_value(value: &Value) -> Result<Ingest<Category>, IngestError> {
    let records = listing(value, "categories").ok_or(IngestError::UnexpectedShape {
        expected: "category",
    })?;

    let mut ingest = Ingest {
        records: Vec::with_capacity(records.len()),
        warnings: Vec::new(),
    };

    for (index, record) in records.iter().enumerate() {
        if let Some(category) = category_from_record(record, index, &mut ingest.warnings) {
            ingest.records.push(category);
        }
    }

    Ok(ingest)
}

/// A listing payload is either a bare array or an object wrapping one under
/// the given field.
fn listing<'v>(value: &'v Value, field_name: &str) -> Option<&'v Vec<Value>> {
    match value {
        Value::Array(records) => Some(records),
        Value::Object(fields) => fields.get(field_name).and_then(Value::as_array),
        _ => None,
    }
}

fn product_from_record(
    record: &Value,
    index: usize,
    warnings: &mut Vec<IngestWarning>,
) -> Option<Product> {
    let Some(fields) = record.as_object() else {
        push_warning(warnings, &format!("#{index}"), "record", WarningKind::SkippedRecord);
        return None;
    };

    // A record without a usable id cannot be keyed, carted or exported.
    let Some(id) = lenient_string(field(fields, &["id", "productId", "product_id"]))
        .filter(|id| !id.is_empty())
    else {
        push_warning(warnings, &format!("#{index}"), "id", WarningKind::SkippedRecord);
        return None;
    };

    let name = required_string(fields, &["name", "title"], "name", &id, warnings);
    let category = required_string(fields, &["category"], "category", &id, warnings);

    Some(Product {
        sku: optional_string(fields, &["sku", "code"]),
        name,
        category,
        sub: optional_string(fields, &["sub", "subcategory", "sub_category"]),
        sizes: option_list(fields, &["sizes", "size"], "sizes", &id, warnings),
        thicknesses: option_list(
            fields,
            &["thickness", "thicknesses"],
            "thickness",
            &id,
            warnings,
        ),
        colors: option_list(fields, &["colors", "color"], "colors", &id, warnings),
        pcs_per_box: required_count(
            fields,
            &["pcsPerBox", "pcs_per_box"],
            "pcsPerBox",
            &id,
            warnings,
        ),
        box_kg: required_quantity(fields, &["boxKg", "box_kg"], "boxKg", &id, warnings),
        box_m3: required_quantity(fields, &["boxM3", "box_m3"], "boxM3", &id, warnings),
        thumbnail: lenient_string(field(fields, &["image", "thumbnail", "imageUrl"]))
            .filter(|url| !url.is_empty()),
        id,
    })
}

fn category_from_record(
    record: &Value,
    index: usize,
    warnings: &mut Vec<IngestWarning>,
) -> Option<Category> {
    let Some(fields) = record.as_object() else {
        push_warning(warnings, &format!("#{index}"), "record", WarningKind::SkippedRecord);
        return None;
    };

    let Some(id) = lenient_string(field(fields, &["id", "categoryId", "category_id"]))
        .filter(|id| !id.is_empty())
    else {
        push_warning(warnings, &format!("#{index}"), "id", WarningKind::SkippedRecord);
        return None;
    };

    let name = required_string(fields, &["name", "title"], "name", &id, warnings);

    let slug = lenient_string(field(fields, &["slug"]))
        .filter(|slug| !slug.is_empty())
        .unwrap_or_else(|| slugify(&name));

    Some(Category { id, name, slug })
}

/// First value present under any of the accepted field names.
fn field<'v>(fields: &'v Map<String, Value>, names: &[&str]) -> Option<&'v Value> {
    names.iter().find_map(|name| fields.get(*name))
}

/// Strings pass through trimmed; bare numbers are accepted as their decimal
/// rendering (legacy payloads carry numeric ids). Everything else is
/// unusable.
fn lenient_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Numbers pass through; numeric strings are trimmed and parsed. Everything
/// else is unusable.
fn lenient_decimal(value: Option<&Value>) -> Option<Decimal> {
    match value? {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Some(Decimal::from(int))
            } else {
                Decimal::from_f64_retain(number.as_f64()?)
            }
        }
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn missing(value: Option<&Value>) -> bool {
    value.is_none() || matches!(value, Some(Value::Null))
}

fn required_string(
    fields: &Map<String, Value>,
    names: &[&str],
    field_name: &'static str,
    record: &str,
    warnings: &mut Vec<IngestWarning>,
) -> String {
    let raw = field(fields, names);

    if let Some(text) = lenient_string(raw) {
        return text;
    }

    let kind = if missing(raw) { WarningKind::Missing } else { WarningKind::Malformed };
    push_warning(warnings, record, field_name, kind);

    String::new()
}

/// Absent optional strings default silently.
fn optional_string(fields: &Map<String, Value>, names: &[&str]) -> String {
    lenient_string(field(fields, names)).unwrap_or_default()
}

/// An option axis: absent or null means the product does not have it, an
/// array is filtered element-wise, and a bare scalar is an older payload
/// shape for a single-option axis.
fn option_list(
    fields: &Map<String, Value>,
    names: &[&str],
    field_name: &'static str,
    record: &str,
    warnings: &mut Vec<IngestWarning>,
) -> OptionList {
    let Some(raw) = field(fields, names) else {
        return OptionList::new();
    };

    match raw {
        Value::Null => OptionList::new(),
        Value::Array(values) => values
            .iter()
            .filter_map(|value| lenient_string(Some(value)))
            .filter(|text| !text.is_empty())
            .collect(),
        Value::String(_) | Value::Number(_) => lenient_string(Some(raw))
            .filter(|text| !text.is_empty())
            .into_iter()
            .collect(),
        _ => {
            push_warning(warnings, record, field_name, WarningKind::Malformed);
            OptionList::new()
        }
    }
}

/// Non-negative decimal quantity, defaulted to zero with a warning.
fn required_quantity(
    fields: &Map<String, Value>,
    names: &[&str],
    field_name: &'static str,
    record: &str,
    warnings: &mut Vec<IngestWarning>,
) -> Decimal {
    let raw = field(fields, names);

    if let Some(amount) = lenient_decimal(raw) {
        if amount >= Decimal::ZERO {
            return amount;
        }

        push_warning(warnings, record, field_name, WarningKind::Malformed);
        return Decimal::ZERO;
    }

    let kind = if missing(raw) { WarningKind::Missing } else { WarningKind::Malformed };
    push_warning(warnings, record, field_name, kind);

    Decimal::ZERO
}

/// Whole-number count, defaulted to zero with a warning. Fractional values
/// truncate; negative values are unusable.
fn required_count(
    fields: &Map<String, Value>,
    names: &[&str],
    field_name: &'static str,
    record: &str,
    warnings: &mut Vec<IngestWarning>,
) -> u32 {
    let raw = field(fields, names);

    if let Some(count) = lenient_decimal(raw).and_then(|amount| amount.trunc().to_u32()) {
        return count;
    }

    let kind = if missing(raw) { WarningKind::Missing } else { WarningKind::Malformed };
    push_warning(warnings, record, field_name, kind);

    0
}

fn push_warning(
    warnings: &mut Vec<IngestWarning>,
    record: &str,
    field_name: &'static str,
    kind: WarningKind,
) {
    if kind == WarningKind::SkippedRecord {
        warn!(record, field = field_name, "skipped unusable catalog record");
    } else {
        warn!(record, field = field_name, %kind, "defaulted catalog field");
    }

    warnings.push(IngestWarning {
        record: record.to_string(),
        field: field_name,
        kind,
    });
}

/// Lowercase alphanumerics joined by single dashes ("Wall Tiles" becomes
/// "wall-tiles").
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    slug.trim_end_matches('-').to_string()
}
