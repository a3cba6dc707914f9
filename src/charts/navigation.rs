use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Result;
use log::{debug, info, warn};
use plotters::coord::Shift;
use plotters::prelude::*;

use super::{mean_line, padded_range, CAPTION_FONT};
use crate::color::ColorMap;
use crate::data::model::NavSample;
use crate::data::reshape::{aggregate, AggField, Reducer};

/// `pathTime` is logged in nanoseconds and charted in milliseconds.
const NS_PER_MS: f64 = 1e6;

/// Totals for one benchmark repetition, ready for charting.
#[derive(Debug, Clone, PartialEq)]
pub struct NavAggregate {
    /// `"{rows}x{cols}|{pathAmount}/{obsAmount}"`.
    pub config: String,
    /// `"{rows}x{cols}"`.
    pub grid: String,
    pub rows: u32,
    pub cols: u32,
    pub path_amount: u32,
    pub obs_amount: u32,
    /// Dijkstra frame time summed over the repetition, milliseconds.
    pub path_time_ms: f64,
    /// Path distance summed over the repetition.
    pub path_dist: f64,
}

/// Collapse per-frame samples to one row per (config, sample, run) key.
///
/// `pathTime` and `pathDist` are summed; the configuration columns are
/// reduced by mean (they are constant within a group) and truncated back
/// to integers. The sum/mean mix per column is deliberate and kept as
/// declared.
pub fn aggregate_runs(samples: &[NavSample]) -> Vec<NavAggregate> {
    let fields: [AggField<NavSample>; 6] = [
        AggField {
            reducer: Reducer::Sum,
            extract: |s| s.path_time,
        },
        AggField {
            reducer: Reducer::Sum,
            extract: |s| s.path_dist,
        },
        AggField {
            reducer: Reducer::Mean,
            extract: |s| s.obs_amount as f64,
        },
        AggField {
            reducer: Reducer::Mean,
            extract: |s| s.path_amount as f64,
        },
        AggField {
            reducer: Reducer::Mean,
            extract: |s| s.rows as f64,
        },
        AggField {
            reducer: Reducer::Mean,
            extract: |s| s.cols as f64,
        },
    ];

    aggregate(
        samples,
        |s| format!("{}|{}|{}", s.config_key(), s.sample, s.run),
        &fields,
    )
    .into_iter()
    .map(|group| {
        let obs_amount = group.values[2] as u32;
        let path_amount = group.values[3] as u32;
        let rows = group.values[4] as u32;
        let cols = group.values[5] as u32;
        NavAggregate {
            config: format!("{rows}x{cols}|{path_amount}/{obs_amount}"),
            grid: format!("{rows}x{cols}"),
            rows,
            cols,
            path_amount,
            obs_amount,
            path_time_ms: group.values[0] / NS_PER_MS,
            path_dist: group.values[1],
        }
    })
    .collect()
}

/// Render the 2×2 navigation benchmark figure.
pub fn render(samples: &[NavSample], out_path: &Path) -> Result<()> {
    if samples.is_empty() {
        warn!("navigation log is empty; skipping {}", out_path.display());
        return Ok(());
    }

    let all = aggregate_runs(samples);
    let configs: BTreeSet<&str> = all.iter().map(|a| a.config.as_str()).collect();
    let grids: BTreeSet<(u32, u32)> = all.iter().map(|a| (a.rows, a.cols)).collect();
    debug!(
        "{} aggregated runs over {} configurations on {} grids",
        all.len(),
        configs.len(),
        grids.len()
    );

    let frame: Vec<&NavAggregate> = all.iter().filter(|a| a.rows == 64).collect();
    let paths64: Vec<&NavAggregate> = all.iter().filter(|a| a.path_amount == 64).collect();
    let everything: Vec<&NavAggregate> = all.iter().collect();

    let root = BitMapBackend::new(out_path, (1800, 2000)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((2, 2));

    draw_hue_lines(
        &panels[0],
        "Tempo Dijkstra x Qtde de Caminhos (obstaculos)",
        "Quantidade de Caminhos",
        "Tempo Dijkstra Frame (ms)",
        &hue_points(&frame, |a| a.obs_amount.to_string(), |a| {
            (a.path_amount as f64, a.path_time_ms)
        }),
    )?;
    draw_hue_lines(
        &panels[1],
        "Tempo Dijkstra x Qtde de Obstaculos (caminhos)",
        "Quantidade de Obstaculos",
        "Tempo Dijkstra Frame (ms)",
        &hue_points(&frame, |a| a.path_amount.to_string(), |a| {
            (a.obs_amount as f64, a.path_time_ms)
        }),
    )?;
    draw_hue_lines(
        &panels[2],
        "Quantidade de Caminhos = 64",
        "Quantidade de Obstaculos",
        "Tempo Dijkstra Frame (ms)",
        &hue_points(&paths64, |a| a.grid.clone(), |a| {
            (a.obs_amount as f64, a.path_time_ms)
        }),
    )?;
    draw_hue_lines(
        &panels[3],
        "Tempo Dijkstra x Soma das Distancias",
        "Soma das Distancias dos Caminhos",
        "Tempo Dijkstra Frame (ms)",
        &hue_points(&everything, |a| a.grid.clone(), |a| {
            (a.path_dist, a.path_time_ms)
        }),
    )?;

    root.present()?;
    info!("wrote {}", out_path.display());
    Ok(())
}

/// Split aggregate rows into per-hue point lists, first-seen hue order.
fn hue_points(
    rows: &[&NavAggregate],
    hue: impl Fn(&NavAggregate) -> String,
    point: impl Fn(&NavAggregate) -> (f64, f64),
) -> Vec<(String, Vec<(f64, f64)>)> {
    let mut series: Vec<(String, Vec<(f64, f64)>)> = Vec::new();
    for &row in rows {
        let label = hue(row);
        let p = point(row);
        match series.iter_mut().find(|(l, _)| *l == label) {
            Some((_, points)) => points.push(p),
            None => series.push((label, vec![p])),
        }
    }
    series
}

/// One panel of mean lines, one per hue value, with a legend.
fn draw_hue_lines(
    area: &DrawingArea<BitMapBackend, Shift>,
    caption: &str,
    x_desc: &str,
    y_desc: &str,
    series: &[(String, Vec<(f64, f64)>)],
) -> Result<()> {
    let (x_min, x_max) = padded_range(
        series
            .iter()
            .flat_map(|(_, points)| points.iter().map(|(x, _)| *x)),
    );
    let (y_min, y_max) = padded_range(
        series
            .iter()
            .flat_map(|(_, points)| points.iter().map(|(_, y)| *y)),
    );

    let mut chart = ChartBuilder::on(area)
        .caption(caption, CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart.configure_mesh().x_desc(x_desc).y_desc(y_desc).draw()?;

    let labels: Vec<String> = series.iter().map(|(label, _)| label.clone()).collect();
    let colors = ColorMap::new(&labels);

    for (label, points) in series {
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

    if !series.is_empty() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    Ok(())
}
