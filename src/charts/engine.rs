use std::path::Path;

use anyhow::Result;
use log::{info, warn};
use plotters::coord::Shift;
use plotters::prelude::*;

use super::{mean_line, padded_range, series_groups, CAPTION_FONT};
use crate::color::ColorMap;
use crate::data::model::EngineSample;
use crate::data::reshape::{
    count_categories, distinct_count, melt, select_mode, CategoryMap, ChartMode, Extractor,
};

/// Render the 3×2 engine metrics figure.
pub fn render(samples: &[EngineSample], out_path: &Path) -> Result<()> {
    if samples.is_empty() {
        warn!("engine log is empty; skipping {}", out_path.display());
        return Ok(());
    }

    let root = BitMapBackend::new(out_path, (1800, 2000)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((3, 2));

    draw_mouse(samples, &panels[0])?;
    draw_clicks(samples, &panels[1])?;
    draw_fps_time(samples, &panels[2])?;
    draw_fps_entities(samples, &panels[3])?;
    draw_entity_distribution(samples, &panels[4])?;
    draw_drawcalls(samples, &panels[5])?;

    root.present()?;
    info!("wrote {}", out_path.display());
    Ok(())
}

/// `"mouseX"` → `"X"`.
fn axis_label(name: &str) -> String {
    name.trim_start_matches("mouse").to_string()
}

/// `"pointAmount"` → `"Point"`, `"linesAmount"` → `"Line"`,
/// `"polyAmount"` → `"Poly"`: strip the suffix, drop the plural `s`,
/// title-case.
fn geometry_label(name: &str) -> String {
    let stem: String = name
        .trim_end_matches("Amount")
        .chars()
        .filter(|&c| c != 's')
        .collect();
    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => stem,
    }
}

fn draw_mouse(samples: &[EngineSample], area: &DrawingArea<BitMapBackend, Shift>) -> Result<()> {
    let columns: [(&str, Extractor<EngineSample>); 2] =
        [("mouseX", |s| s.mouse_x), ("mouseY", |s| s.mouse_y)];
    let melted = melt(samples, |s| s.time, &columns, axis_label);

    let (x_min, x_max) = padded_range(melted.iter().map(|r| r.id));
    let (y_min, y_max) = padded_range(melted.iter().map(|r| r.value));

    let mut chart = ChartBuilder::on(area)
        .caption("Mouse Position x Execution Time", CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Execution time (s)")
        .y_desc("Coordinate (Pixels)")
        .draw()?;

    let groups = series_groups(&melted);
    let labels: Vec<String> = groups.iter().map(|(label, _)| label.clone()).collect();
    let colors = ColorMap::new(&labels);

    for (label, points) in &groups {
        let color = colors.color_for(label);
        chart
            .draw_series(LineSeries::new(
                mean_line(points.iter().copied()),
                color.stroke_width(2),
            ))?
            .label(label.clone())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

fn draw_clicks(samples: &[EngineSample], area: &DrawingArea<BitMapBackend, Shift>) -> Result<()> {
    let counts = count_categories(
        samples.iter().map(|s| s.uuid_type),
        &CategoryMap::geometries(),
    )?;
    let bars: Vec<(String, f64)> = counts
        .into_iter()
        .map(|(label, n)| (label.to_string(), n as f64))
        .collect();

    draw_bars(area, "Mouse Clicks per Entity", "Entity", "Clicks", &bars)
}

fn draw_fps_time(samples: &[EngineSample], area: &DrawingArea<BitMapBackend, Shift>) -> Result<()> {
    let line = mean_line(samples.iter().map(|s| (s.time, s.fps)));
    let (x_min, x_max) = padded_range(line.iter().map(|(x, _)| *x));
    let (y_min, y_max) = padded_range(line.iter().map(|(_, y)| *y));

    let mut chart = ChartBuilder::on(area)
        .caption("FPS x Execution Time", CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Execution time (s)")
        .y_desc("Frames Per Second (CPU-Side)")
        .draw()?;

    chart.draw_series(LineSeries::new(line, BLUE.stroke_width(2)))?;
    Ok(())
}

/// FPS against entity amount. With a single distinct entity count there is
/// no trend to draw, so the panel flips to a horizontal box plot of the
/// FPS distribution (axes swapped).
fn draw_fps_entities(
    samples: &[EngineSample],
    area: &DrawingArea<BitMapBackend, Shift>,
) -> Result<()> {
    let mode = select_mode(distinct_count(samples.iter().map(|s| s.entities as f64)));
    match mode {
        ChartMode::Line => {
            let line = mean_line(samples.iter().map(|s| (s.entities as f64, s.fps)));
            let (x_min, x_max) = padded_range(line.iter().map(|(x, _)| *x));
            let (y_min, y_max) = padded_range(line.iter().map(|(_, y)| *y));

            let mut chart = ChartBuilder::on(area)
                .caption("FPS x Entity Amount", CAPTION_FONT)
                .margin(10)
                .x_label_area_size(40)
                .y_label_area_size(60)
                .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

            chart
                .configure_mesh()
                .x_desc("Entity Amount")
                .y_desc("Frames Per Second (CPU-Side)")
                .draw()?;

            chart.draw_series(LineSeries::new(line, BLUE.stroke_width(2)))?;
        }
        ChartMode::Distribution => {
            let fps: Vec<f64> = samples.iter().map(|s| s.fps).collect();
            let entities = samples[0].entities;
            let quartiles = Quartiles::new(&fps);
            let (x_min, x_max) = padded_range(fps.iter().copied());

            // Boxplot elements live on an f32 value axis.
            let mut chart = ChartBuilder::on(area)
                .caption("FPS x Entity Amount", CAPTION_FONT)
                .margin(10)
                .x_label_area_size(40)
                .y_label_area_size(60)
                .build_cartesian_2d(x_min as f32..x_max as f32, (0..1i32).into_segmented())?;

            chart
                .configure_mesh()
                .x_desc("Frames Per Second (CPU-Side)")
                .y_desc("Entity Amount")
                .y_label_formatter(&|seg| match seg {
                    SegmentValue::CenterOf(_) => entities.to_string(),
                    _ => String::new(),
                })
                .draw()?;

            chart.draw_series(std::iter::once(Boxplot::new_horizontal(
                SegmentValue::CenterOf(0),
                &quartiles,
            )))?;
        }
    }
    Ok(())
}

fn draw_entity_distribution(
    samples: &[EngineSample],
    area: &DrawingArea<BitMapBackend, Shift>,
) -> Result<()> {
    let columns: [(&str, Extractor<EngineSample>); 3] = [
        ("pointAmount", |s| s.point_amount as f64),
        ("linesAmount", |s| s.lines_amount as f64),
        ("polyAmount", |s| s.poly_amount as f64),
    ];
    let melted = melt(samples, |s| s.time, &columns, geometry_label);

    // Bar height is the per-series mean over all frames.
    let bars: Vec<(String, f64)> = series_groups(&melted)
        .into_iter()
        .map(|(label, points)| {
            let mean = points.iter().map(|(_, v)| *v).sum::<f64>() / points.len() as f64;
            (label, mean)
        })
        .collect();

    draw_bars(area, "Entity Type Distribution", "Entity", "Amount", &bars)
}

/// Draw calls against entity amount: trend line when the entity count
/// varies, scatter otherwise.
fn draw_drawcalls(
    samples: &[EngineSample],
    area: &DrawingArea<BitMapBackend, Shift>,
) -> Result<()> {
    let mode = select_mode(distinct_count(samples.iter().map(|s| s.entities as f64)));
    let points: Vec<(f64, f64)> = samples
        .iter()
        .map(|s| (s.entities as f64, s.draw_calls as f64))
        .collect();

    let (x_min, x_max) = padded_range(points.iter().map(|(x, _)| *x));
    let (y_min, y_max) = padded_range(points.iter().map(|(_, y)| *y));

    let mut chart = ChartBuilder::on(area)
        .caption("Drawcalls x Entity Amount", CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Entity Amount")
        .y_desc("OpenGL Drawcalls")
        .draw()?;

    match mode {
        ChartMode::Line => {
            chart.draw_series(LineSeries::new(mean_line(points), BLUE.stroke_width(2)))?;
        }
        ChartMode::Distribution => {
            chart.draw_series(
                points
                    .into_iter()
                    .map(|p| Circle::new(p, 4, BLUE.filled())),
            )?;
        }
    }
    Ok(())
}

/// Categorical bar panel shared by the clicks and entity-type charts.
fn draw_bars(
    area: &DrawingArea<BitMapBackend, Shift>,
    caption: &str,
    x_desc: &str,
    y_desc: &str,
    bars: &[(String, f64)],
) -> Result<()> {
    let y_max = bars
        .iter()
        .map(|(_, v)| *v)
        .fold(0.0f64, f64::max)
        .max(1.0)
        * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption(caption, CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0usize..bars.len()).into_segmented(), 0.0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) if *i < bars.len() => bars[*i].0.clone(),
            _ => String::new(),
        })
        .draw()?;

    let color = RGBColor(70, 120, 200);
    chart.draw_series(bars.iter().enumerate().map(|(i, (_, v))| {
        Rectangle::new(
            [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), *v)],
            color.filled(),
        )
    }))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_labels_strip_the_mouse_prefix() {
        assert_eq!(axis_label("mouseX"), "X");
        assert_eq!(axis_label("mouseY"), "Y");
    }

    #[test]
    fn geometry_labels_match_the_report_convention() {
        assert_eq!(geometry_label("pointAmount"), "Point");
        assert_eq!(geometry_label("linesAmount"), "Line");
        assert_eq!(geometry_label("polyAmount"), "Poly");
    }
}
