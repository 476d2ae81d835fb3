//! Components of the `tilecast` command-line program, which renders one frame of a
//! [`tilecast`] world to a PNG file.
//!
//! This is not a general-purpose library. It exists separately from the binary target
//! so that its pieces can be tested on their own.

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]

use anyhow::Context as _;

use tilecast::euclid::{point3, vec2};
use tilecast::material::Palette;
use tilecast::math::ImageSize;
use tilecast::viewer::Viewer;
use tilecast_render::camera::Camera;
use tilecast_render::{ColumnRenderer, HierarchyRenderer, RenderInfo, Renderer, Rendering};

mod config_files;
pub use config_files::{RendererKind, Settings, TemplateKind, read_settings_file};
mod layout_source;
pub use layout_source::{LayoutParseError, LayoutSource, parse_layout};
pub mod logging;
mod write_png;
pub use write_png::{encode_png, write_png};

/// Image size used when none is specified.
pub const DEFAULT_DISPLAY_SIZE: [u32; 2] = [640, 480];

/// Builds the world and renderer described by `settings` and renders one frame.
pub fn render_frame(settings: &Settings) -> Result<(Rendering, RenderInfo), anyhow::Error> {
    let [x, y] = settings.position.unwrap_or([1.5, 1.5]);
    let [dx, dy] = settings.direction.unwrap_or([1.0, 0.0]);
    let viewer = Viewer::new(point3(x, y, 0.5), vec2(dx, dy)).context("invalid viewer")?;

    let palette = if settings.textured.unwrap_or(false) {
        Palette::textured_placeholder()
    } else {
        Palette::placeholder()
    };
    let source = match settings.layout {
        Some(ref path) => LayoutSource::File(path.clone()),
        None => LayoutSource::Template(
            settings.template.unwrap_or_default().into(),
            settings.seed,
        ),
    };
    let world = source.create_world(palette, viewer)?;

    let [width, height] = settings.display_size.unwrap_or(DEFAULT_DISPLAY_SIZE);
    let camera = Camera::new(
        ImageSize::new(width, height),
        settings.fov.unwrap_or(Camera::DEFAULT_FOV_DEGREES),
    )
    .context("invalid camera settings")?;

    let renderer: Box<dyn Renderer> = match settings.renderer.unwrap_or_default() {
        RendererKind::Hierarchy => {
            let mut renderer = HierarchyRenderer::new(camera);
            if let Some(max_length) = settings.max_length {
                renderer = renderer
                    .with_max_length(max_length)
                    .context("invalid renderer settings")?;
            }
            Box::new(renderer)
        }
        RendererKind::Columns => Box::new(ColumnRenderer::new(camera)),
    };
    Ok(renderer.render(&world))
}
