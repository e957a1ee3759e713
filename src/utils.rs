//! Utils

use clap::Parser;

/// Arguments for the order examples
#[derive(Debug, Parser)]
pub struct ExampleOrderArgs {
    /// Number of order lines to replay into the cart
    #[clap(short, long)]
    pub n: Option<usize>,

    /// Fixture set to use for the catalog, containers & order
    #[clap(short, long, default_value = "wholesale")]
    pub fixture: String,

    /// Output file path stem for the CSV and print-document exports
    #[clap(short, long)]
    pub out: Option<String>,
}
