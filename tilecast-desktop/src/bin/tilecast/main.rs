//! Binary for the tilecast command-line frame renderer.

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]

use std::time::Instant;

use anyhow::Context as _;
use clap::Parser as _;

use tilecast_desktop::{logging, read_settings_file, render_frame, write_png};

mod command_options;
use command_options::TilecastArgs;

fn main() -> Result<(), anyhow::Error> {
    let options = TilecastArgs::parse();
    logging::install(&options.logging)?;

    let mut settings = options.settings();
    if let Some(ref config_path) = options.config {
        settings = settings.or(read_settings_file(config_path)?);
    }
    log::debug!("Settings: {settings:?}");

    let start_time = Instant::now();
    let (image, info) = render_frame(&settings)?;
    log::info!(
        "Rendered {}×{} in {:.3} s: {info}",
        image.size.width,
        image.size.height,
        Instant::now().duration_since(start_time).as_secs_f32(),
    );

    write_png(&options.output, &image)
        .with_context(|| format!("failed to write {}", options.output.display()))?;
    log::info!("Wrote {}", options.output.display());
    Ok(())
}
