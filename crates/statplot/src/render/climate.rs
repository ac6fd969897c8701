use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, VPos};

use statplot_core::RecordAnalysis;
use statplot_core::date_math::{
    DAYS_PER_YEAR, MONTH_ABBREVIATIONS, MonthDay, month_start_ordinals,
};

use super::{DrawResult, Figure, draw_x_tick, text_style};

const RECORD_LOW: RGBColor = RGBColor(0, 0, 255);
const RECORD_HIGH: RGBColor = RGBColor(255, 0, 0);
const BAND: RGBColor = RGBColor(255, 255, 0);

/// Record analysis of one named region.
pub struct ClimatePlot<'a> {
    pub region: &'a str,
    pub analysis: &'a RecordAnalysis,
}

/// Month abbreviation for a day-of-year tick
fn month_label(ordinal: f64) -> String {
    month_start_ordinals()
        .iter()
        .position(|&start| f64::from(start) == ordinal)
        .map(|month| MONTH_ABBREVIATIONS[month].to_string())
        .unwrap_or_default()
}

impl Figure for ClimatePlot<'_> {
    fn file_stem(&self) -> String {
        format!("Climate Data - {}", self.region)
    }

    fn draw<DB>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let analysis = self.analysis;
        let plot_area = root.titled(&analysis.headline(), ("sans-serif", 22))?;

        let (t_min, t_max) = analysis.temperature_range;
        let days = f64::from(DAYS_PER_YEAR);

        let mut chart = ChartBuilder::on(&plot_area)
            .margin(20)
            .caption(self.region, ("sans-serif", 18))
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(0.0..days, t_min..t_max)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_label_formatter(&|y| format!("{y:.0}"))
            .y_desc("Temperature (°C)")
            .label_style(("sans-serif", 16))
            .draw()?;

        // x axis with a tick on the first day of each month
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(0.0, t_min), (days, t_min)],
            BLACK,
        )))?;
        for start in month_start_ordinals() {
            let ordinal = f64::from(start);
            draw_x_tick(
                root,
                chart.backend_coord(&(ordinal, t_min)),
                &month_label(ordinal),
            )?;
        }
        let (mid_x, axis_y) = chart.backend_coord(&(days / 2.0, t_min));
        root.draw(&Text::new(
            "Daily extreme temperatures",
            (mid_x, axis_y + 25),
            text_style(16.0, BLACK, HPos::Center, VPos::Top),
        ))?;

        let x = |md: MonthDay| f64::from(md.ordinal());

        // Band between the baseline records, only where both exist
        let band: Vec<(f64, f64, f64)> = analysis
            .days
            .iter()
            .filter_map(|d| {
                Some((
                    x(d.month_day),
                    d.baseline.record_low?,
                    d.baseline.record_high?,
                ))
            })
            .collect();
        if !band.is_empty() {
            let outline: Vec<(f64, f64)> = band
                .iter()
                .map(|&(x, _, high)| (x, high))
                .chain(band.iter().rev().map(|&(x, low, _)| (x, low)))
                .collect();
            chart.draw_series(std::iter::once(Polygon::new(
                outline,
                BAND.mix(0.2).filled(),
            )))?;
        }

        chart
            .draw_series(LineSeries::new(
                analysis.baseline_lows().map(|(md, t)| (x(md), t)),
                RECORD_LOW.mix(0.7),
            ))?
            .label("Past Record Lows")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RECORD_LOW));

        chart
            .draw_series(LineSeries::new(
                analysis.baseline_highs().map(|(md, t)| (x(md), t)),
                RECORD_HIGH.mix(0.7),
            ))?
            .label("Past Record Highs")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RECORD_HIGH));

        let year = analysis.target_year;
        chart
            .draw_series(
                analysis
                    .record_highs()
                    .map(|(md, t)| Circle::new((x(md), t), 3, RECORD_HIGH.filled())),
            )?
            .label(format!("{year} Record Highs"))
            .legend(|(x, y)| Circle::new((x + 10, y), 3, RECORD_HIGH.filled()));

        chart
            .draw_series(
                analysis
                    .record_lows()
                    .map(|(md, t)| Circle::new((x(md), t), 3, RECORD_LOW.filled())),
            )?
            .label(format!("{year} Record Lows"))
            .legend(|(x, y)| Circle::new((x + 10, y), 3, RECORD_LOW.filled()));

        chart
            .configure_series_labels()
            .border_style(TRANSPARENT)
            .background_style(WHITE.mix(0.6))
            .label_font(("sans-serif", 14))
            .position(SeriesLabelPosition::LowerMiddle)
            .draw()?;

        Ok(())
    }
}
