//! CSV Export

use std::{fs::File, io, path::Path};

use csv::WriterBuilder;
use tracing::debug;

use crate::{
    cart::CartItem,
    export::{COLUMNS, ExportError, OrderRow},
};

/// Conventional filename for a cart export.
pub const DEFAULT_FILENAME: &str = "order.csv";

/// Write the fixed header plus one row per committed line.
///
/// Values carrying separators or quotes are quoted by the serializer, so a
/// name like `Beam, steel` cannot shear a row apart.
///
/// # Errors
///
/// Returns an [`ExportError`] when serialization or the underlying writer
/// fails.
pub fn write_order(items: &[CartItem], out: impl io::Write) -> Result<(), ExportError> {
    let mut writer = WriterBuilder::new().from_writer(out);

    writer.write_record(COLUMNS)?;

    for item in items {
        writer.write_record(OrderRow::from_item(item).cells())?;
    }

    writer.flush()?;

    Ok(())
}

/// Write an order CSV to a file, conventionally named [`DEFAULT_FILENAME`].
///
/// # Errors
///
/// Returns an [`ExportError`] when the file cannot be created or written.
pub fn write_order_file(items: &[CartItem], path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    let file = File::create(path)?;

    write_order(items, file)?;

    debug!(path = %path.display(), lines = items.len(), "wrote order CSV");

    Ok(())
}
