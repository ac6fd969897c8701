//! Drawing the figure models with plotters
//!
//! Every figure is drawn into a staging file next to its destination and
//! renamed into place once the backend has flushed, so a failed render never
//! leaves a truncated image under the final name.

mod climate;
mod histogram;
mod sigma;

use std::fmt;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::{Deserialize, Serialize};

use crate::config::FigureSettings;
use crate::util::io::{discard_staged, promote_staged, staging_path};

pub use climate::ClimatePlot;

pub type DrawResult = Result<(), Box<dyn std::error::Error>>;

/// Output image encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug)]
pub enum RenderError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Drawing {
        path: PathBuf,
        message: String,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Io { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
            RenderError::Drawing { path, message } => {
                write!(f, "failed to draw {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Io { source, .. } => Some(source),
            RenderError::Drawing { .. } => None,
        }
    }
}

/// Something that can draw itself on any plotters backend.
pub trait Figure {
    /// File stem of the written image
    fn file_stem(&self) -> String;

    fn draw<DB>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static;
}

/// Destination of `figure` inside `out_dir`
pub fn output_path<F: Figure>(figure: &F, out_dir: &Path, format: ImageFormat) -> PathBuf {
    out_dir.join(format!("{}.{}", figure.file_stem(), format.extension()))
}

/// Render `figure` into `out_dir` and return the written path.
pub fn render_figure<F: Figure>(
    figure: &F,
    out_dir: &Path,
    settings: &FigureSettings,
) -> Result<PathBuf, RenderError> {
    std::fs::create_dir_all(out_dir).map_err(|source| RenderError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let path = output_path(figure, out_dir, settings.format);
    let staged = staging_path(&path);
    let size = (settings.width, settings.height);

    let drawn = match settings.format {
        ImageFormat::Png => draw_on(
            BitMapBackend::new(&staged, size).into_drawing_area(),
            figure,
        ),
        ImageFormat::Svg => draw_on(SVGBackend::new(&staged, size).into_drawing_area(), figure),
    };

    if let Err(err) = drawn {
        discard_staged(&staged);
        return Err(RenderError::Drawing {
            path,
            message: err.to_string(),
        });
    }

    promote_staged(&staged, &path).map_err(|source| RenderError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::info!(path = %path.display(), "figure written");
    Ok(path)
}

fn draw_on<DB, F>(root: DrawingArea<DB, Shift>, figure: &F) -> DrawResult
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    F: Figure,
{
    root.fill(&WHITE)?;
    figure.draw(&root)?;
    root.present()?;
    Ok(())
}

/// Length in pixels of a hand-drawn axis tick
const TICK_LENGTH: i32 = 5;
const TICK_LABEL_SIZE: f64 = 14.0;

/// Tick hanging below the x axis at pixel `at`, labelled underneath unless `label` is empty
fn draw_x_tick<DB>(root: &DrawingArea<DB, Shift>, at: (i32, i32), label: &str) -> DrawResult
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (x, y) = at;
    root.draw(&PathElement::new(vec![(x, y), (x, y + TICK_LENGTH)], BLACK))?;
    if !label.is_empty() {
        root.draw(&Text::new(
            label.to_string(),
            (x, y + TICK_LENGTH + 2),
            text_style(TICK_LABEL_SIZE, BLACK, HPos::Center, VPos::Top),
        ))?;
    }
    Ok(())
}

/// Tick left of a vertical axis at pixel `at`, labelled to its left unless `label` is empty
fn draw_y_tick<DB>(root: &DrawingArea<DB, Shift>, at: (i32, i32), label: &str) -> DrawResult
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (x, y) = at;
    root.draw(&PathElement::new(vec![(x - TICK_LENGTH, y), (x, y)], BLACK))?;
    if !label.is_empty() {
        root.draw(&Text::new(
            label.to_string(),
            (x - TICK_LENGTH - 3, y),
            text_style(TICK_LABEL_SIZE, BLACK, HPos::Right, VPos::Center),
        ))?;
    }
    Ok(())
}

/// Anchored text style
fn text_style(size: f64, color: RGBColor, h: HPos, v: VPos) -> TextStyle<'static> {
    ("sans-serif", size)
        .into_font()
        .color(&color)
        .pos(Pos::new(h, v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extensions() {
        assert_eq!(ImageFormat::Png.extension(), "png");
        assert_eq!(ImageFormat::Svg.to_string(), "svg");
    }

    #[test]
    fn test_format_yaml_names() {
        let format: ImageFormat = serde_json::from_str("\"svg\"").unwrap();
        assert_eq!(format, ImageFormat::Svg);
        assert_eq!(serde_json::to_string(&ImageFormat::Png).unwrap(), "\"png\"");
    }
}
