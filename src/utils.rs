//! Utils

use clap::Parser;

/// Arguments for the shop demos
#[derive(Debug, Parser)]
pub struct DemoShopArgs {
    /// YAML catalog fixture to load instead of the seeded catalog
    #[clap(short, long)]
    pub fixture: Option<String>,

    /// Username for the demo session
    #[clap(short, long, default_value = "demo")]
    pub user: String,
}
