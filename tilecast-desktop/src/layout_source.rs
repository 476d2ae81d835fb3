use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context as _;
use rand::Rng as _;

use tilecast::World;
use tilecast::content::{DemoTemplate, demo_layout};
use tilecast::layout::{Layout, LayoutCell};
use tilecast::material::Palette;
use tilecast::viewer::Viewer;

/// Where the layout of the world to render comes from.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum LayoutSource {
    /// Generate a demo layout. If the seed is [`None`], one is chosen randomly.
    Template(DemoTemplate, Option<u64>),
    /// Read a text layout file; see [`parse_layout()`].
    File(PathBuf),
}

impl LayoutSource {
    /// Obtains the layout and builds a world from it, logging what was done.
    pub fn create_world(self, palette: Palette, viewer: Viewer) -> Result<World, anyhow::Error> {
        let start_time = Instant::now();
        let layout = match self {
            LayoutSource::Template(template, seed) => {
                let seed = seed.unwrap_or_else(|| {
                    let seed = rand::rng().random();
                    log::info!("Randomly chosen layout seed: {seed}");
                    seed
                });
                demo_layout(template, seed)
            }
            LayoutSource::File(ref path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read layout file {}", path.display()))?;
                parse_layout(&text)
                    .with_context(|| format!("failed to parse layout file {}", path.display()))?
            }
        };
        let world = World::new(&layout, palette, viewer).context("invalid layout")?;
        log::debug!(
            "World created in {:.3} s",
            Instant::now().duration_since(start_time).as_secs_f32()
        );
        Ok(world)
    }
}

/// Parses the text layout format: one row per line, `.` or `0` for an empty cell, and
/// `1` through `9` for a solid cell of that material. Spaces and tabs are ignored, as are
/// blank lines and lines starting with `#`.
///
/// Only the characters are checked here; whether the layout is square and has a
/// power-of-two side is checked when it is built into a [`World`].
pub fn parse_layout(text: &str) -> Result<Layout, LayoutParseError> {
    let mut rows = Vec::new();
    for (line_index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let row = line
            .chars()
            .enumerate()
            .filter(|&(_, ch)| ch != ' ' && ch != '\t')
            .map(|(column, ch)| match ch {
                '.' => Ok(LayoutCell::Empty),
                '0'..='9' => Ok(LayoutCell::from_id(u16::from(ch as u8 - b'0'))),
                _ => Err(LayoutParseError::Character {
                    line: line_index + 1,
                    column: column + 1,
                    character: ch,
                }),
            })
            .collect::<Result<Vec<LayoutCell>, _>>()?;
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(LayoutParseError::Empty);
    }
    Ok(Layout::new(rows))
}

/// Error from [`parse_layout()`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum LayoutParseError {
    /// A character which does not stand for any kind of cell.
    #[error("line {line}, column {column}: {character:?} is not a cell")]
    Character {
        /// Line number, counting from 1.
        line: usize,
        /// Character position in the line, counting from 1.
        column: usize,
        /// The offending character.
        character: char,
    },

    /// There were no rows.
    #[error("layout has no rows")]
    Empty,
}
