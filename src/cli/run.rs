//! Top-level command: decode, run the chosen effects, write PNG.

use std::path::Path;

use image::RgbaImage;
use tracing::info;

use crate::effect::{render, Effect, RenderOptions};
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::render::{load_image, write_png};

use super::Cli;

pub fn run(cli: Cli, printer: &Printer) -> Result<()> {
    let Some(source_path) = cli.file.as_deref().filter(|p| !p.as_os_str().is_empty()) else {
        printer.error("Error", "file parameter cannot be empty.");
        return Ok(());
    };

    let effects = cli.effects();
    if effects.is_empty() {
        printer.error("Error", "at least one effect should be chosen.");
        return Ok(());
    }

    let options = cli.render_options();

    printer.status("Decoding", &display_path(source_path));
    let source = load_image(source_path)?;
    let (width, height) = source.dimensions();
    info!(width, height, "decoded source image");

    if effects.len() > 1 {
        printer.warning(
            "Warning",
            &format!(
                "{} selected; each one overwrites {}",
                plural(effects.len(), "effect", "effects"),
                display_path(&cli.output)
            ),
        );
    }

    for effect in effects {
        run_effect(effect, source_path, &source, &cli, &options, printer)?;
    }

    Ok(())
}

fn run_effect(
    effect: Effect,
    source_path: &Path,
    source: &RgbaImage,
    cli: &Cli,
    options: &RenderOptions,
    printer: &Printer,
) -> Result<()> {
    printer.status("Rendering", &effect.to_string());

    let rendered = render(effect, source_path, source, options)?;
    write_png(&rendered.image, &cli.output)?;
    printer.rendered(effect, &rendered, &cli.output);

    Ok(())
}
