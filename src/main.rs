mod app;
mod config;
mod layout;
mod mobs;
mod scales;
mod util;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use tracing::info;

use crate::config::LayoutConfig;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Mob table to visualize (CSV with a header row).
    #[arg(long, default_value = "data/Mobs.csv")]
    data: PathBuf,

    /// Optional JSON file overriding layout, scale and loader settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Settle the layout without a window and print it as JSON.
    #[arg(long)]
    print_layout: bool,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => LayoutConfig::load(path)?,
        None => LayoutConfig::default(),
    };

    if args.print_layout {
        let dataset = mobs::load_dataset(&args.data, config.loader.missing_numeric)?;
        println!("{}", app::settled_layout_json(&dataset, &config)?);
        return Ok(());
    }

    info!(data = %args.data.display(), "starting mob ring viewer");
    let source = app::DataSource {
        data_path: args.data,
        config,
    };
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "mob-rings",
        options,
        Box::new(move |cc| Ok(Box::new(app::MobRingsApp::new(cc, source)))),
    )
    .map_err(|error| anyhow!("viewer exited with an error: {error}"))
}
