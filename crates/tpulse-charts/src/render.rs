//! SVG previews of chart specs drawn with plotters.

#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]

use crate::palette::{parse_color, FALLBACK_COLOR};
use crate::spec::{BarMode, ChartKind, ChartSpec, ColorSpec, Layout, Orientation, Series, SeriesData};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::TAU;
use tpulse_common::{truncate_label, Result, Rgb, TPulseError};
use tpulse_config::RenderConfig;
use tracing::{debug, instrument};

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;

const BAR_WIDTH: f64 = 0.8;
const LABEL_CHARS: usize = 18;
const DONUT_SEGMENTS: usize = 180;

struct Theme<'a> {
    background: RGBColor,
    family: &'a str,
    size: u32,
    color: RGBColor,
}

impl<'a> Theme<'a> {
    fn from_layout(layout: &'a Layout) -> Self {
        Self {
            background: parse_color(&layout.background),
            family: layout.font.family.as_str(),
            size: layout.font.size,
            color: parse_color(&layout.font.color),
        }
    }

    fn text(&self, scale: f64) -> TextStyle<'a> {
        (self.family, f64::from(self.size) * scale)
            .into_font()
            .color(&self.color)
    }
}

struct BarRect {
    lo: f64,
    hi: f64,
    from: f64,
    to: f64,
    color: RGBColor,
    value: u64,
}

/// Draws [`ChartSpec`]s as standalone SVG documents.
#[derive(Debug, Clone, Copy)]
pub struct SvgRenderer {
    width: u32,
    height: u32,
}

impl From<&RenderConfig> for SvgRenderer {
    fn from(config: &RenderConfig) -> Self {
        Self::new(config.width, config.height)
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::from(&RenderConfig::default())
    }
}

impl SvgRenderer {
    /// Creates a renderer producing a `width` x `height` canvas.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Renders `spec` to an SVG string.
    #[instrument(skip(self, spec), fields(kind = ?spec.kind))]
    pub fn render(&self, spec: &ChartSpec) -> Result<String> {
        if self.width == 0 || self.height == 0 {
            return Err(TPulseError::render("Canvas size must be non-zero"));
        }

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height)).into_drawing_area();
            let theme = Theme::from_layout(&spec.layout);
            root.fill(&theme.background)?;

            let area = match &spec.layout.title {
                Some(title) => root.titled(title, theme.text(1.3))?,
                None => root.clone(),
            };
            let margins = spec.layout.margins;
            let area = area.margin(
                margins.top as i32,
                margins.bottom as i32,
                margins.left as i32,
                margins.right as i32,
            );

            if !spec.is_empty() {
                match spec.kind {
                    ChartKind::Bar | ChartKind::StackedBar => draw_bars(&area, spec, &theme)?,
                    ChartKind::Line => draw_lines(&area, spec, &theme)?,
                    ChartKind::Map => draw_map(&area, spec, &theme)?,
                    ChartKind::Pie => draw_donut(&area, spec, &theme)?,
                    ChartKind::Indicator => draw_indicators(&area, spec, &theme)?,
                }
            }
            root.present()?;
        }

        debug!(bytes = svg.len(), "Rendered SVG preview");
        Ok(svg)
    }
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn point_color(color: &ColorSpec, point: usize) -> RGBColor {
    match color {
        ColorSpec::Fixed { color } => parse_color(color),
        ColorSpec::PerPoint { colors } => colors.get(point).map_or(FALLBACK_COLOR, |c| parse_color(c)),
        ColorSpec::Scale { .. } => FALLBACK_COLOR,
    }
}

fn series_color(series: &Series) -> RGBColor {
    point_color(&series.color, 0)
}

/// Categories across every series, in first-seen order.
fn category_axis(spec: &ChartSpec) -> Vec<&str> {
    let mut axis: Vec<&str> = Vec::new();
    for series in &spec.series {
        if let SeriesData::Categorical { categories, .. } = &series.data {
            for category in categories {
                if !axis.contains(&category.as_str()) {
                    axis.push(category);
                }
            }
        }
    }
    axis
}

fn category_label(labels: &[&str], reversed: bool, value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    let slot = rounded as usize;
    if slot >= labels.len() {
        return String::new();
    }
    let index = if reversed { labels.len() - 1 - slot } else { slot };
    truncate_label(labels[index], LABEL_CHARS)
}

fn bar_rects(spec: &ChartSpec, labels: &[&str], reversed: bool) -> Vec<Vec<BarRect>> {
    let stacked = spec.layout.bar_mode == Some(BarMode::Stack);
    let groups = if stacked { 1 } else { spec.series.len().max(1) };
    let width = BAR_WIDTH / groups as f64;
    let mut offsets = vec![0.0_f64; labels.len()];

    spec.series
        .iter()
        .enumerate()
        .map(|(index, series)| {
            let SeriesData::Categorical { categories, values } = &series.data else {
                return Vec::new();
            };
            categories
                .iter()
                .zip(values)
                .enumerate()
                .filter_map(|(point, (category, value))| {
                    let slot = labels.iter().position(|label| label == category)?;
                    let position = (if reversed { labels.len() - 1 - slot } else { slot }) as f64;
                    let lo = if stacked {
                        position - BAR_WIDTH / 2.0
                    } else {
                        position - BAR_WIDTH / 2.0 + width * index as f64
                    };
                    let (from, to) = if stacked {
                        let base = offsets[slot];
                        offsets[slot] += *value as f64;
                        (base, offsets[slot])
                    } else {
                        (0.0, *value as f64)
                    };
                    Some(BarRect {
                        lo,
                        hi: lo + width,
                        from,
                        to,
                        color: point_color(&series.color, point),
                        value: *value,
                    })
                })
                .collect()
        })
        .collect()
}

fn draw_bars(area: &Area<'_>, spec: &ChartSpec, theme: &Theme<'_>) -> Result<()> {
    let horizontal = spec
        .series
        .iter()
        .any(|series| series.orientation == Orientation::Horizontal);
    let (category_axis_spec, value_axis_spec) = if horizontal {
        (&spec.layout.y_axis, &spec.layout.x_axis)
    } else {
        (&spec.layout.x_axis, &spec.layout.y_axis)
    };
    let reversed = category_axis_spec.reversed;
    let labels = category_axis(spec);
    let rects = bar_rects(spec, &labels, reversed);
    let max = rects
        .iter()
        .flatten()
        .map(|rect| rect.to)
        .fold(0.0_f64, f64::max);
    let value_range = 0.0..(max * 1.1).max(1.0);
    let slot_range = -0.5..(labels.len() as f64 - 0.5);
    let category_text = |value: &f64| category_label(&labels, reversed, *value);
    let count_text = |value: &f64| format!("{value:.0}");

    let (x_range, y_range) = if horizontal {
        (value_range, slot_range)
    } else {
        (slot_range, value_range)
    };
    let x_visible = spec.layout.x_axis.visible;
    let y_visible = spec.layout.y_axis.visible;
    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(if x_visible { 40 } else { 0 })
        .y_label_area_size(if y_visible { 110 } else { 0 })
        .build_cartesian_2d(x_range, y_range)?;

    {
        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh()
            .label_style(theme.text(0.85))
            .axis_desc_style(theme.text(1.0));
        if horizontal {
            mesh.y_labels(labels.len())
                .y_label_formatter(&category_text)
                .x_label_formatter(&count_text);
        } else {
            mesh.x_labels(labels.len())
                .x_label_formatter(&category_text)
                .y_label_formatter(&count_text);
        }
        if !x_visible {
            mesh.x_labels(0);
        }
        if !y_visible {
            mesh.y_labels(0);
        }
        if let Some(title) = category_axis_spec.title.as_deref().filter(|_| category_axis_spec.visible) {
            if horizontal {
                mesh.y_desc(title);
            } else {
                mesh.x_desc(title);
            }
        }
        if let Some(title) = value_axis_spec.title.as_deref().filter(|_| value_axis_spec.visible) {
            if horizontal {
                mesh.x_desc(title);
            } else {
                mesh.y_desc(title);
            }
        }
        mesh.draw()?;
    }

    let place = |rect: &BarRect| -> [(f64, f64); 2] {
        if horizontal {
            [(rect.from, rect.lo), (rect.to, rect.hi)]
        } else {
            [(rect.lo, rect.from), (rect.hi, rect.to)]
        }
    };
    let value_style = theme.text(0.8).pos(Pos::new(HPos::Center, VPos::Center));

    for (series, series_rects) in spec.series.iter().zip(&rects) {
        let color = series_color(series);
        let annotation = chart.draw_series(
            series_rects
                .iter()
                .map(|rect| Rectangle::new(place(rect), rect.color.filled())),
        )?;
        if spec.series.len() > 1 {
            annotation
                .label(series.name.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }

        if series.show_values {
            chart.draw_series(series_rects.iter().filter(|rect| rect.value > 0).map(|rect| {
                let [(x0, y0), (x1, y1)] = place(rect);
                Text::new(
                    rect.value.to_string(),
                    ((x0 + x1) / 2.0, (y0 + y1) / 2.0),
                    value_style.clone(),
                )
            }))?;
        }
    }

    if spec.series.len() > 1 && spec.layout.show_legend {
        chart
            .configure_series_labels()
            .background_style(theme.background.mix(0.8))
            .border_style(theme.color)
            .label_font(theme.text(0.85))
            .draw()?;
    }
    Ok(())
}

fn draw_lines(area: &Area<'_>, spec: &ChartSpec, theme: &Theme<'_>) -> Result<()> {
    let dates = spec
        .series
        .iter()
        .find_map(|series| match &series.data {
            SeriesData::TimeSeries { dates, .. } => Some(dates.as_slice()),
            _ => None,
        })
        .unwrap_or_default();
    let max = spec
        .series
        .iter()
        .filter_map(|series| match &series.data {
            SeriesData::TimeSeries { values, .. } => values.iter().copied().max(),
            _ => None,
        })
        .max()
        .unwrap_or(0);
    let x_max = (dates.len().saturating_sub(1)).max(1) as f64;
    let date_text = |value: &f64| {
        let rounded = value.round();
        if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
            return String::new();
        }
        dates
            .get(rounded as usize)
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    };
    let count_text = |value: &f64| format!("{value:.0}");

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..x_max, 0.0..(max as f64 * 1.1).max(1.0))?;

    {
        let mut mesh = chart.configure_mesh();
        mesh.label_style(theme.text(0.85))
            .axis_desc_style(theme.text(1.0))
            .x_labels(dates.len().min(8))
            .x_label_formatter(&date_text)
            .y_label_formatter(&count_text);
        if let Some(title) = spec.layout.x_axis.title.as_deref() {
            mesh.x_desc(title);
        }
        if let Some(title) = spec.layout.y_axis.title.as_deref() {
            mesh.y_desc(title);
        }
        mesh.draw()?;
    }

    for series in &spec.series {
        let SeriesData::TimeSeries { values, .. } = &series.data else {
            continue;
        };
        let color = series_color(series);
        chart
            .draw_series(LineSeries::new(
                values.iter().enumerate().map(|(i, v)| (i as f64, *v as f64)),
                color.stroke_width(2),
            ))?
            .label(series.name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    if spec.layout.show_legend {
        chart
            .configure_series_labels()
            .background_style(theme.background.mix(0.8))
            .border_style(theme.color)
            .label_font(theme.text(0.85))
            .draw()?;
    }
    Ok(())
}

fn draw_map(area: &Area<'_>, spec: &ChartSpec, theme: &Theme<'_>) -> Result<()> {
    let Some(series) = spec.series.first() else {
        return Ok(());
    };
    let SeriesData::Geo { points } = &series.data else {
        return Err(TPulseError::render("Map charts need geographic series data"));
    };

    let (mut lon_min, mut lon_max, mut lat_min, mut lat_max) = spec.layout.map.as_ref().map_or(
        (f64::MAX, f64::MIN, f64::MAX, f64::MIN),
        |view| (view.center_lon, view.center_lon, view.center_lat, view.center_lat),
    );
    for point in points {
        lon_min = lon_min.min(point.lon);
        lon_max = lon_max.max(point.lon);
        lat_min = lat_min.min(point.lat);
        lat_max = lat_max.max(point.lat);
    }
    let lon_pad = ((lon_max - lon_min) * 0.1).max(1.0);
    let lat_pad = ((lat_max - lat_min) * 0.1).max(1.0);

    let (plot, legend) = area.split_horizontally(area.dim_in_pixel().0.saturating_sub(90) as i32);
    let mut chart = ChartBuilder::on(&plot)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(
            (lon_min - lon_pad)..(lon_max + lon_pad),
            (lat_min - lat_pad)..(lat_max + lat_pad),
        )?;
    chart
        .configure_mesh()
        .label_style(theme.text(0.75))
        .x_label_formatter(&|lon| format!("{lon:.0}°"))
        .y_label_formatter(&|lat| format!("{lat:.0}°"))
        .draw()?;

    let size = series.marker_size.unwrap_or(10) as i32;
    let marker_color = |value: u64| match &series.color {
        ColorSpec::Scale { scale, min, max, .. } => rgb(scale.color_for(value as f64, *min, *max)),
        other => point_color(other, 0),
    };
    chart.draw_series(points.iter().map(|point| {
        Circle::new((point.lon, point.lat), size, marker_color(point.value).filled())
    }))?;
    let label_style = theme.text(0.75).pos(Pos::new(HPos::Left, VPos::Bottom));
    chart.draw_series(points.iter().map(|point| {
        Text::new(
            format!("{} ({})", point.label, point.value),
            (point.lon, point.lat),
            label_style.clone(),
        )
    }))?;

    if let ColorSpec::Scale { scale, min, max, title } = &series.color {
        let (_, height) = legend.dim_in_pixel();
        let top = 30_i32;
        let bottom = (height as i32 - 30).max(top + 10);
        let steps = 20;
        let step = f64::from(bottom - top) / f64::from(steps);
        for i in 0..steps {
            let t = 1.0 - f64::from(i) / f64::from(steps - 1);
            let y0 = top + (f64::from(i) * step) as i32;
            let y1 = top + (f64::from(i + 1) * step) as i32;
            legend.draw(&Rectangle::new(
                [(10, y0), (30, y1)],
                rgb(scale.sample(t)).filled(),
            ))?;
        }
        let style = theme.text(0.75);
        legend.draw_text(title, &style, (5, 10))?;
        legend.draw_text(&format!("{max:.0}"), &style, (35, top))?;
        legend.draw_text(&format!("{min:.0}"), &style, (35, bottom - 10))?;
    }
    Ok(())
}

fn donut_point(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    (
        center.0 + (radius * angle.sin()).round() as i32,
        center.1 - (radius * angle.cos()).round() as i32,
    )
}

fn draw_donut(area: &Area<'_>, spec: &ChartSpec, theme: &Theme<'_>) -> Result<()> {
    let Some(series) = spec.series.first() else {
        return Ok(());
    };
    let SeriesData::Categorical { categories, values } = &series.data else {
        return Err(TPulseError::render("Pie charts need categorical series data"));
    };
    let total: u64 = values.iter().sum();
    if total == 0 {
        return Ok(());
    }

    let (width, height) = area.dim_in_pixel();
    let legend_width = if spec.layout.show_legend { 160 } else { 0 };
    let plot_width = width.saturating_sub(legend_width);
    let center = ((plot_width / 2) as i32, (height / 2) as i32);
    let radius = f64::from(plot_width.min(height)) * 0.4;
    let hole = spec.layout.hole.unwrap_or(0.0).clamp(0.0, 0.95);
    let label_style = theme.text(0.85).pos(Pos::new(HPos::Center, VPos::Center));

    let mut start = 0.0_f64;
    for (point, value) in values.iter().enumerate() {
        if *value == 0 {
            continue;
        }
        let share = *value as f64 / total as f64;
        let sweep = share * TAU;
        let segments = ((share * DONUT_SEGMENTS as f64).ceil() as usize).max(2);
        let outer = (0..=segments).map(|i| {
            donut_point(center, radius, start + sweep * i as f64 / segments as f64)
        });
        let inner = (0..=segments).rev().map(|i| {
            donut_point(center, radius * hole, start + sweep * i as f64 / segments as f64)
        });
        let outline: Vec<(i32, i32)> = outer.chain(inner).collect();
        area.draw(&Polygon::new(outline, point_color(&series.color, point).filled()))?;

        let middle = donut_point(center, radius * (1.0 + hole) / 2.0, start + sweep / 2.0);
        area.draw(&Text::new(
            format!("{:.1}%", share * 100.0),
            middle,
            label_style.clone(),
        ))?;
        start += sweep;
    }

    if legend_width > 0 {
        let style = theme.text(0.85).pos(Pos::new(HPos::Left, VPos::Center));
        let x = plot_width as i32 + 10;
        for (point, category) in categories.iter().enumerate() {
            let y = 30 + point as i32 * 24;
            area.draw(&Rectangle::new(
                [(x, y - 6), (x + 12, y + 6)],
                point_color(&series.color, point).filled(),
            ))?;
            area.draw(&Text::new(category.as_str(), (x + 18, y), style.clone()))?;
        }
    }
    Ok(())
}

fn draw_indicators(area: &Area<'_>, spec: &ChartSpec, theme: &Theme<'_>) -> Result<()> {
    let cells = area.split_evenly((1, spec.series.len().max(1)));
    let name_style = theme.text(0.9).pos(Pos::new(HPos::Center, VPos::Center));
    for (cell, series) in cells.iter().zip(&spec.series) {
        let SeriesData::Indicator { value, format } = &series.data else {
            continue;
        };
        let (width, height) = cell.dim_in_pixel();
        let x = (width / 2) as i32;
        let value_color = series_color(series);
        let value_style = theme
            .text(2.2)
            .color(&value_color)
            .pos(Pos::new(HPos::Center, VPos::Center));
        cell.draw(&Text::new(
            series.name.as_str(),
            (x, (height / 3) as i32),
            name_style.clone(),
        ))?;
        cell.draw(&Text::new(
            format.format(*value),
            (x, (height * 2 / 3) as i32),
            value_style,
        ))?;
    }
    Ok(())
}
