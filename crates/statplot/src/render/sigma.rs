use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use statplot_core::{CurveShift, SigmaFigure};

use super::{DrawResult, Figure, draw_x_tick, draw_y_tick, text_style};
use crate::util::format::format_scientific;

const LIMITS: RGBColor = RGBColor(128, 0, 128);
const SPINE: RGBColor = RGBColor(128, 128, 128);
const FILL_ALPHA: f64 = 0.15;
const LINE_ALPHA: f64 = 0.4;
const LABEL_SIZE: f64 = 13.0;

fn curve_color(shift: CurveShift) -> RGBColor {
    match shift {
        CurveShift::Down => RGBColor(0, 0, 255),
        CurveShift::Unshifted => RGBColor(0, 128, 0),
        CurveShift::Up => RGBColor(255, 0, 0),
    }
}

impl Figure for SigmaFigure {
    fn file_stem(&self) -> String {
        "My Normal Distribution Fig".to_string()
    }

    fn draw<DB>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let params = &self.params;
        let (start, end) = params.x_range();

        let mut chart = ChartBuilder::on(root)
            .margin(15)
            .caption(params.title(), ("sans-serif", 18))
            .x_label_area_size(35)
            .y_label_area_size(45)
            .build_cartesian_2d(start..end, 0.0..self.y_max)?;

        draw_axes(root, &mut chart, self)?;

        let plus_prefix = CurveShift::Up.mean_prefix();
        let minus_prefix = CurveShift::Down.mean_prefix();

        for curve in &self.curves {
            let color = curve_color(curve.shift);
            let points = self.grid.iter().copied().zip(curve.density.iter().copied());

            chart
                .draw_series(
                    AreaSeries::new(points, 0.0, color.mix(FILL_ALPHA))
                        .border_style(color.mix(LINE_ALPHA).stroke_width(2)),
                )?
                .label(curve.shift.label(params.shift))
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });

            let line = color.mix(LINE_ALPHA).stroke_width(2);
            let plus = curve.plus_sigma(params.std_dev);
            let minus = curve.minus_sigma(params.std_dev);

            chart.draw_series(DashedLineSeries::new(
                vec![(curve.mean, 0.0), (curve.mean, curve.peak_density)],
                8,
                5,
                line,
            ))?;
            for (x, top) in [
                (plus, curve.density_plus_sigma),
                (minus, curve.density_minus_sigma),
            ] {
                chart.draw_series(DashedLineSeries::new(vec![(x, 0.0), (x, top)], 2, 3, line))?;
            }

            let label = text_style(LABEL_SIZE, color, HPos::Center, VPos::Center);
            let layout = &self.layout;
            chart.draw_series([
                Text::new(
                    format!("{}{:.2}", curve.shift.mean_prefix(), curve.mean),
                    (curve.mean, layout.mean_label_y),
                    label.clone(),
                ),
                Text::new(
                    format!("{plus_prefix}{plus:.2}"),
                    (plus, layout.plus_sigma_label_y),
                    label.clone(),
                ),
                Text::new(
                    format!("{minus_prefix}{minus:.2}"),
                    (minus, layout.minus_sigma_label_y),
                    label,
                ),
            ])?;
        }

        draw_limit_annotations(&mut chart, self)?;
        draw_total_box(&mut chart, self)?;

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.3))
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;

        Ok(())
    }
}

type SigmaChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Baseline along zero density, the spine through the mean and ticks at the figure's own positions
fn draw_axes<DB>(
    root: &DrawingArea<DB, Shift>,
    chart: &mut SigmaChart<'_, DB>,
    figure: &SigmaFigure,
) -> DrawResult
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let params = &figure.params;
    let (start, end) = params.x_range();

    chart.draw_series([
        PathElement::new(vec![(start, 0.0), (end, 0.0)], SPINE),
        PathElement::new(vec![(params.mean, 0.0), (params.mean, figure.y_max)], SPINE),
    ])?;

    for (x, label) in figure.x_ticks() {
        draw_x_tick(root, chart.backend_coord(&(x, 0.0)), &label)?;
    }
    for (y, label) in figure.y_ticks() {
        draw_y_tick(root, chart.backend_coord(&(params.mean, y)), &label)?;
    }

    let (x, y) = chart.backend_coord(&(end, 0.0));
    root.draw(&Text::new("x", (x, y + 20), text_style(16.0, BLACK, HPos::Right, VPos::Top)))?;
    Ok(())
}

/// Stacked tail areas on both sides, the LSL/USL markers and the φ(x) caption
fn draw_limit_annotations<DB>(chart: &mut SigmaChart<'_, DB>, figure: &SigmaFigure) -> DrawResult
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let layout = &figure.layout;
    let params = &figure.params;

    let sides = [
        (
            "Area left of LSL:",
            layout.left_stack_x,
            HPos::Left,
            figure
                .curves
                .iter()
                .map(|c| (c.shift, c.tails.below_lower))
                .collect::<Vec<_>>(),
        ),
        (
            "Area right of USL:",
            layout.right_stack_x,
            HPos::Right,
            figure
                .curves
                .iter()
                .map(|c| (c.shift, c.tails.above_upper))
                .collect(),
        ),
    ];

    for (header, x, anchor, tails) in sides {
        chart.draw_series(std::iter::once(Text::new(
            header,
            (x, layout.stack_top),
            text_style(LABEL_SIZE, LIMITS, anchor, VPos::Bottom),
        )))?;
        chart.draw_series(tails.iter().zip(layout.stack_line_offsets).map(
            |(&(shift, mass), offset)| {
                Text::new(
                    format!(
                        "{} {}",
                        shift.stack_label(params.shift),
                        format_scientific(mass, 3)
                    ),
                    (x, layout.stack_top - offset),
                    text_style(LABEL_SIZE, curve_color(shift), anchor, VPos::Bottom),
                )
            },
        ))?;
        draw_arrow(chart, (x, layout.stack_top - layout.arrow_offset), (x, 0.0))?;
    }

    for (label, x) in [("LSL", params.lower_limit()), ("USL", params.upper_limit())] {
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(x, 0.0), (x, layout.limit_marker_y)],
            LIMITS,
        )))?;
        chart.draw_series(std::iter::once(Text::new(
            label,
            (x, layout.limit_marker_y),
            text_style(LABEL_SIZE, LIMITS, HPos::Center, VPos::Bottom),
        )))?;
    }

    chart.draw_series(std::iter::once(Text::new(
        "φ(x)",
        layout.density_caption,
        ("sans-serif", 18.0)
            .into_font()
            .style(FontStyle::Bold)
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Center)),
    )))?;
    Ok(())
}

/// Framed box with the total mass beyond both limits per curve
fn draw_total_box<DB>(chart: &mut SigmaChart<'_, DB>, figure: &SigmaFigure) -> DrawResult
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let layout = &figure.layout;
    let (x0, y0, x1, y1) = layout.total_box;
    let (tx, ty) = layout.total_text;

    chart.draw_series(std::iter::once(Rectangle::new(
        [(x0, y0), (x1, y1)],
        LIMITS.mix(LINE_ALPHA).stroke_width(1),
    )))?;
    chart.draw_series(std::iter::once(Text::new(
        "Total area beyond SL:",
        (tx, ty),
        text_style(LABEL_SIZE, LIMITS, HPos::Left, VPos::Bottom),
    )))?;
    chart.draw_series(figure.curves.iter().zip(layout.stack_line_offsets).map(
        |(curve, offset)| {
            Text::new(
                format!(
                    "{} {}",
                    curve.shift.stack_label(figure.params.shift),
                    format_scientific(curve.tails.total(), 3)
                ),
                (tx, ty - offset),
                text_style(LABEL_SIZE, curve_color(curve.shift), HPos::Left, VPos::Bottom),
            )
        },
    ))?;
    Ok(())
}

/// Straight arrow with a small filled head at `to`
fn draw_arrow<DB>(chart: &mut SigmaChart<'_, DB>, from: (f64, f64), to: (f64, f64)) -> DrawResult
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let style = LIMITS.mix(LINE_ALPHA).stroke_width(2);
    chart.draw_series(std::iter::once(PathElement::new(vec![from, to], style)))?;

    let (tip_x, tip_y) = to;
    let half_width = 0.08;
    let length = 0.012 * (from.1 - to.1).signum();
    chart.draw_series(std::iter::once(Polygon::new(
        vec![
            (tip_x, tip_y),
            (tip_x - half_width, tip_y + length),
            (tip_x + half_width, tip_y + length),
        ],
        LIMITS.mix(LINE_ALPHA).filled(),
    )))?;
    Ok(())
}
