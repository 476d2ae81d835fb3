//! Command line option parsing.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use tilecast_desktop::logging::LoggingArgs;
use tilecast_desktop::{RendererKind, Settings, TemplateKind};

#[derive(Clone, Debug, Parser)]
#[command(
    name = "tilecast", author, about, version,
    help_template = "\
{name} {version}
{about-with-newline}
{usage-heading}
    {usage}

{all-args}{after-help}",
)]
pub(crate) struct TilecastArgs {
    /// PNG file to write the rendered frame to.
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub(crate) output: PathBuf,

    /// Which renderer to use [default: hierarchy].
    #[arg(long = "renderer", short = 'r', value_name = "KIND")]
    pub(crate) renderer: Option<RendererKind>,

    /// Image size in pixels [default: 640×480].
    #[arg(long = "display-size", value_name = "W×H")]
    pub(crate) display_size: Option<DisplaySizeArg>,

    /// Seed value for the randomly generated layout.
    ///
    /// May be an integer between 0 and 18446744073709551615 (2⁶⁴ - 1).
    ///
    /// If not specified, a randomly chosen seed will be used.
    #[arg(long = "seed")]
    pub(crate) seed: Option<u64>,

    /// Which layout template to use [default: flat].
    ///
    /// Mutually exclusive with --layout.
    #[arg(long = "template", short = 't', value_name = "TEMPLATE")]
    pub(crate) template: Option<TemplateKind>,

    /// Text layout file to render instead of a generated layout.
    ///
    /// One row per line; “.” or “0” is an empty cell and “1” to “9” are walls
    /// of that material. The layout must be square with a power-of-two side.
    #[arg(
        long = "layout",
        value_name = "FILE",
        conflicts_with = "template",
        conflicts_with = "seed"
    )]
    pub(crate) layout: Option<PathBuf>,

    /// Viewer position [default: 1.5,1.5].
    #[arg(long = "position", value_name = "X,Y", allow_hyphen_values = true)]
    pub(crate) position: Option<PairArg>,

    /// Viewer facing direction [default: 1,0].
    #[arg(long = "direction", value_name = "X,Y", allow_hyphen_values = true)]
    pub(crate) direction: Option<PairArg>,

    /// Horizontal field of view in degrees [default: 60].
    #[arg(long = "fov", value_name = "DEGREES")]
    pub(crate) fov: Option<f64>,

    /// Maximum ray length for the hierarchy renderer [default: 64].
    #[arg(long = "max-length", value_name = "LENGTH")]
    pub(crate) max_length: Option<f64>,

    /// Draw walls with textures instead of flat colors.
    #[arg(long = "textured")]
    pub(crate) textured: bool,

    /// JSON file of settings. Options given on the command line take precedence.
    #[arg(long = "config", value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    #[command(flatten)]
    pub(crate) logging: LoggingArgs,
}

impl TilecastArgs {
    /// The settings given on the command line, without defaults.
    pub(crate) fn settings(&self) -> Settings {
        Settings {
            renderer: self.renderer,
            display_size: self.display_size.map(|DisplaySizeArg(size)| size),
            fov: self.fov,
            max_length: self.max_length,
            textured: self.textured.then_some(true),
            template: self.template,
            seed: self.seed,
            layout: self.layout.clone(),
            position: self.position.map(|PairArg(pair)| pair),
            direction: self.direction.map(|PairArg(pair)| pair),
        }
    }
}

/// Image size, parseable in a variety of formats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct DisplaySizeArg(pub [u32; 2]);

impl FromStr for DisplaySizeArg {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dims: [u32; 2] = s
            .split(&['×', 'x', ',', ';', ' '][..])
            .map(|s| {
                s.parse::<u32>()
                    .map_err(|_| format!("{s:?} not an integer"))
            })
            .collect::<Result<Vec<u32>, String>>()?
            .try_into()
            .map_err(|_| String::from("must be two integers"))?;
        Ok(DisplaySizeArg(dims))
    }
}

/// Two numbers separated by a comma.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PairArg(pub [f64; 2]);

impl FromStr for PairArg {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pair: [f64; 2] = s
            .split(',')
            .map(|s| {
                s.trim()
                    .parse::<f64>()
                    .map_err(|_| format!("{s:?} not a number"))
            })
            .collect::<Result<Vec<f64>, String>>()?
            .try_into()
            .map_err(|_| String::from("must be two numbers separated by a comma"))?;
        Ok(PairArg(pair))
    }
}
