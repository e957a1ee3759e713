//! Order Example
//!
//! This example replays a fixture order through the row-state gate, prints the
//! order summary with container-fill gauges, and optionally exports the order.
//!
//! Use `-f` to load a fixture set by name
//! Use `-n` to specify the number of order lines to replay
//! Use `-o` to specify a filename stem for CSV and print-document exports in `target/orders`

use std::{fs::create_dir_all, io, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use pallet::{
    export::{csv, document},
    fixtures::Fixture,
    summary::OrderSummary,
    utils::ExampleOrderArgs,
};

/// Order Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = ExampleOrderArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let (cart, _rows) = fixture.fill_cart(args.n)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    OrderSummary::new(cart.items(), fixture.containers()).write_to(&mut handle)?;

    if let Some(out) = args.out.as_deref() {
        let output_dir = PathBuf::from("target").join("orders");
        create_dir_all(&output_dir)?;

        let csv_path = output_dir.join(format!("{out}.csv"));
        let document_path = output_dir.join(format!("{out}.html"));

        csv::write_order_file(cart.items(), &csv_path)?;
        document::write_order_file(cart.items(), &document_path)?;

        println!("\nExported {} and {}", csv_path.display(), document_path.display());
    }

    Ok(())
}
