use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, VPos};

use statplot_core::FourDistributions;

use super::{DrawResult, Figure, text_style};

/// Fill colours in draw order
const PALETTE: [RGBColor; 4] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
];
const BAR_ALPHA: f64 = 0.5;
const CAPTION_SIZE: f64 = 16.0;
const CAPTION_LINE_HEIGHT: i32 = 20;

/// Data coordinates of the centred footnote under the x axis
const FOOTNOTE_ANCHOR: (f64, f64) = (2.0, -0.08);

impl Figure for FourDistributions {
    fn file_stem(&self) -> String {
        "Four distributions".to_string()
    }

    fn draw<DB>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let window = self.axis_window();

        let mut chart = ChartBuilder::on(root)
            .margin_top(30)
            .margin_left(20)
            .margin_right(20)
            .margin_bottom(50)
            .x_label_area_size(30)
            .y_label_area_size(45)
            .build_cartesian_2d(window.x_min..window.x_max, window.y_min..window.y_max)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_label_formatter(&|x| format!("{x:.0}"))
            .y_label_formatter(&|y| format!("{y:.1}"))
            .draw()?;

        for (series, color) in self.series.iter().zip(PALETTE) {
            let fill = color.mix(BAR_ALPHA).filled();
            chart.draw_series(
                series
                    .histogram
                    .iter()
                    .filter(|bin| bin.end > window.x_min && bin.start < window.x_max)
                    .map(|bin| {
                        let start = bin.start.max(window.x_min);
                        let end = bin.end.min(window.x_max);
                        let top = bin.density.min(window.y_max);
                        Rectangle::new([(start, 0.0), (end, top)], fill)
                    }),
            )?;
        }

        // Captions hang from just above the plotting area
        let caption_style = text_style(CAPTION_SIZE, BLACK, HPos::Left, VPos::Top);
        for series in &self.series {
            let (x, y) = chart.backend_coord(&series.caption_anchor());
            for (i, line) in series.caption_lines().into_iter().enumerate() {
                root.draw(&Text::new(
                    line,
                    (x, y + i as i32 * CAPTION_LINE_HEIGHT),
                    caption_style.clone(),
                ))?;
            }
        }

        let footnote_at = chart.backend_coord(&FOOTNOTE_ANCHOR);
        root.draw(&Text::new(
            FourDistributions::FOOTNOTE,
            footnote_at,
            text_style(14.0, BLACK, HPos::Center, VPos::Top),
        ))?;

        Ok(())
    }
}
