use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

/// Everything that determines what frame is rendered, other than where it is written.
///
/// Each field is optional so that settings from several sources can be layered with
/// [`Settings::or()`]; missing values take the defaults documented on each field.
/// Settings files are JSON objects with these field names, for example:
///
/// ```json
/// { "renderer": "columns", "display_size": [320, 200], "seed": 42 }
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, deny_unknown_fields)]
#[allow(clippy::exhaustive_structs)]
pub struct Settings {
    /// Which renderer to use. Default: [`RendererKind::Hierarchy`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renderer: Option<RendererKind>,
    /// Image width and height in pixels. Default: 640×480.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_size: Option<[u32; 2]>,
    /// Horizontal field of view in degrees. Default: 60.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fov: Option<f64>,
    /// Maximum ray length for the hierarchy renderer. Default: 64.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<f64>,
    /// Use textured materials instead of flat colors. Default: false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textured: Option<bool>,
    /// Demo layout template, used if there is no `layout`. Default: flat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateKind>,
    /// Demo layout seed. Default: random.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Text layout file to load instead of generating a demo layout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<PathBuf>,
    /// Viewer X and Y position. Default: 1.5, 1.5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<[f64; 2]>,
    /// Viewer facing direction; need not be normalized. Default: +X.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<[f64; 2]>,
}

impl Settings {
    /// Combines two sets of settings, preferring values from `self`.
    #[must_use]
    pub fn or(self, fallback: Settings) -> Settings {
        let Settings {
            renderer,
            display_size,
            fov,
            max_length,
            textured,
            template,
            seed,
            layout,
            position,
            direction,
        } = self;
        Settings {
            renderer: renderer.or(fallback.renderer),
            display_size: display_size.or(fallback.display_size),
            fov: fov.or(fallback.fov),
            max_length: max_length.or(fallback.max_length),
            textured: textured.or(fallback.textured),
            template: template.or(fallback.template),
            seed: seed.or(fallback.seed),
            layout: layout.or(fallback.layout),
            position: position.or(fallback.position),
            direction: direction.or(fallback.direction),
        }
    }
}

/// Which [`tilecast_render::Renderer`] to draw with.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    clap::ValueEnum,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
#[non_exhaustive]
pub enum RendererKind {
    /// One ray per pixel through nested grids.
    #[default]
    Hierarchy,
    /// One textured wall slice per column, root grid only.
    Columns,
}

/// Which demo layout to generate; corresponds to [`tilecast::content::DemoTemplate`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    clap::ValueEnum,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
#[non_exhaustive]
pub enum TemplateKind {
    /// Solid and empty cells only.
    #[default]
    Flat,
    /// Some cells subdivided into smaller grids.
    Nested,
}

impl From<TemplateKind> for tilecast::content::DemoTemplate {
    fn from(value: TemplateKind) -> Self {
        match value {
            TemplateKind::Flat => Self::Flat,
            TemplateKind::Nested => Self::Nested,
        }
    }
}

/// Reads a JSON settings file. It is an error for the file to be missing.
pub fn read_settings_file(path: &Path) -> Result<Settings, anyhow::Error> {
    let file = File::open(path)
        .with_context(|| format!("failed to open settings file {}", path.display()))?;
    let settings: Settings = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("syntax error in settings file {}", path.display()))?;
    log::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}
